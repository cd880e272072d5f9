// src/extractors/extractor.rs
use std::ops::Range;

use crate::extractors::compiler::CompiledMatcher;

/// Outcome of a single search over a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Absent,
    Present(MatchedText),
}

/// The first match found in a document.
///
/// `groups[0]` is the full match; explicit capture groups start at 1 and are
/// `None` when their branch of the pattern did not take part in the match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedText {
    pub span: Range<usize>,
    groups: Vec<Option<String>>,
}

impl MatchedText {
    pub fn new(span: Range<usize>, full_match: String, mut groups: Vec<Option<String>>) -> Self {
        groups.insert(0, Some(full_match));
        Self { span, groups }
    }

    pub fn full_match(&self) -> &str {
        self.groups[0].as_deref().unwrap_or_default()
    }

    /// Text of group `index`, or `None` when it is absent or out of range.
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|g| g.as_deref())
    }

    /// Number of explicit capture groups.
    pub fn group_count(&self) -> usize {
        self.groups.len() - 1
    }
}

/// Runs one unanchored, left-to-right search and keeps the first match.
pub fn extract(matcher: &CompiledMatcher, document: &[u8]) -> MatchResult {
    let Some(caps) = matcher.regex().captures(document) else {
        tracing::debug!("No match in {} byte document", document.len());
        return MatchResult::Absent;
    };

    let Some(whole) = caps.get(0) else {
        return MatchResult::Absent;
    };

    // Leftmost semantics: a match at offset 0, if any, is the one returned here
    if matcher.flags().sticky && whole.start() != 0 {
        tracing::debug!("Sticky match required at offset 0, first match at {}", whole.start());
        return MatchResult::Absent;
    }

    let groups = caps
        .iter()
        .skip(1)
        .map(|g| g.map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned()))
        .collect();

    tracing::debug!("Matched bytes {}..{}", whole.start(), whole.end());
    MatchResult::Present(MatchedText::new(
        whole.range(),
        String::from_utf8_lossy(whole.as_bytes()).into_owned(),
        groups,
    ))
}
