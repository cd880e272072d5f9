// src/extractors/template.rs
//! Replacement templates.
//!
//! A template is parsed once into literal chunks and group references, then
//! assembled against a [`MatchedText`] in a single pass. The syntax follows
//! JavaScript's `String.prototype.replace`:
//!
//! | token            | expands to                                  |
//! |------------------|---------------------------------------------|
//! | `$$`             | a literal `$`                               |
//! | `$&`, `$0`       | the full match                              |
//! | `$n`, `$nn`      | capture group `n`                           |
//! | `$<name>`        | named capture group                         |
//! | `` $` ``, `$'`   | nothing                                     |
//!
//! Groups that are out of range, unknown or did not participate expand to the
//! empty string.

use crate::extractors::compiler::CompiledMatcher;
use crate::extractors::extractor::MatchedText;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Literal(String),
    Group(usize),
    Named(String),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementTemplate {
    tokens: Vec<TemplateToken>,
}

impl ReplacementTemplate {
    /// Tokenizes `template` for use with `matcher`.
    ///
    /// The matcher is only consulted for its group count, which decides
    /// whether `$12` means group 12 or group 1 followed by `2`.
    pub fn parse(template: &str, matcher: &CompiledMatcher) -> Self {
        Self::parse_with_group_count(template, matcher.group_count())
    }

    pub fn parse_with_group_count(template: &str, group_count: usize) -> Self {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(pos) = rest.find('$') {
            literal.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            let (token, consumed) = match after.as_bytes().first() {
                Some(b'$') => (TemplateToken::Literal("$".to_string()), 1),
                Some(b'&') => (TemplateToken::Group(0), 1),
                Some(b'`') | Some(b'\'') => (TemplateToken::Empty, 1),
                Some(d) if d.is_ascii_digit() => group_reference(after, group_count),
                Some(b'<') => match after[1..].find('>') {
                    Some(end) => (TemplateToken::Named(after[1..end + 1].to_string()), end + 2),
                    None => (TemplateToken::Literal("$".to_string()), 0),
                },
                _ => (TemplateToken::Literal("$".to_string()), 0),
            };

            match token {
                TemplateToken::Literal(text) => literal.push_str(&text),
                other => {
                    if !literal.is_empty() {
                        tokens.push(TemplateToken::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(other);
                }
            }
            rest = &after[consumed..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            tokens.push(TemplateToken::Literal(literal));
        }

        Self { tokens }
    }

    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    pub fn has_references(&self) -> bool {
        self.tokens.iter().any(|t| !matches!(t, TemplateToken::Literal(_)))
    }

    /// Assembles the output. `lookup` resolves a group name to its index.
    pub fn expand<F>(&self, matched: &MatchedText, lookup: F) -> String
    where
        F: Fn(&str) -> Option<usize>,
    {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                TemplateToken::Literal(text) => out.push_str(text),
                TemplateToken::Group(index) => out.push_str(matched.group(*index).unwrap_or("")),
                TemplateToken::Named(name) => {
                    if let Some(text) = lookup(name).and_then(|i| matched.group(i)) {
                        out.push_str(text);
                    }
                }
                TemplateToken::Empty => {}
            }
        }
        out
    }
}

// `after` starts with an ASCII digit. Two digits are taken only when they
// name an existing group.
fn group_reference(after: &str, group_count: usize) -> (TemplateToken, usize) {
    let bytes = after.as_bytes();
    let first = usize::from(bytes[0] - b'0');
    if let Some(second) = bytes.get(1).filter(|b| b.is_ascii_digit()) {
        let two = first * 10 + usize::from(second - b'0');
        if two >= 1 && two <= group_count {
            return (TemplateToken::Group(two), 2);
        }
    }
    (TemplateToken::Group(first), 1)
}

/// Produces the final value for a present match.
///
/// Without a template the full match is returned verbatim.
pub fn substitute(
    matched: &MatchedText,
    template: Option<&ReplacementTemplate>,
    matcher: &CompiledMatcher,
) -> String {
    match template {
        None => matched.full_match().to_string(),
        Some(template) => template.expand(matched, |name| matcher.group_index(name)),
    }
}
