// src/extractors/compiler.rs
use regex::bytes::{Regex, RegexBuilder};

use crate::extractors::flags::FlagSet;
use crate::utils::error::CompileError;

pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);
pub const DEFAULT_DFA_SIZE_LIMIT: usize = 2 * (1 << 20);

/// Upper bounds on the memory a compiled matcher may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherLimits {
    pub size_limit: usize,
    pub dfa_size_limit: usize,
}

impl Default for MatcherLimits {
    fn default() -> Self {
        Self {
            size_limit: DEFAULT_SIZE_LIMIT,
            dfa_size_limit: DEFAULT_DFA_SIZE_LIMIT,
        }
    }
}

/// A pattern compiled together with its flags.
///
/// Backed by the `regex` crate, which only accepts constructs it can run in
/// time linear in the input. Patterns using backreferences or lookaround fail
/// to compile instead of falling back to a backtracking engine.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    regex: Regex,
    flags: FlagSet,
}

impl CompiledMatcher {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn flags(&self) -> FlagSet {
        self.flags
    }

    /// Number of explicit capture groups, not counting group 0.
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    pub fn group_index(&self, name: &str) -> Option<usize> {
        self.regex
            .capture_names()
            .position(|n| n == Some(name))
    }
}

pub struct MatcherCompiler {
    limits: MatcherLimits,
}

impl MatcherCompiler {
    pub fn new(limits: MatcherLimits) -> Self {
        Self { limits }
    }

    pub fn compile(&self, pattern: &str, flags: &str) -> Result<CompiledMatcher, CompileError> {
        let flags = FlagSet::parse(flags)?;

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(flags.case_insensitive)
            .multi_line(flags.multi_line)
            .dot_matches_new_line(flags.dot_all)
            .swap_greed(flags.swap_greed)
            .ignore_whitespace(flags.ignore_whitespace)
            .unicode(true)
            .size_limit(self.limits.size_limit)
            .dfa_size_limit(self.limits.dfa_size_limit)
            .build()
            .map_err(|e| {
                tracing::warn!("Pattern {:?} rejected by regex engine", pattern);
                CompileError::InvalidPattern(e.to_string())
            })?;

        tracing::debug!(
            "Compiled pattern {:?} with flags '{}' ({} capture groups)",
            pattern,
            flags,
            regex.captures_len() - 1
        );
        Ok(CompiledMatcher { regex, flags })
    }
}

impl Default for MatcherCompiler {
    fn default() -> Self {
        Self::new(MatcherLimits::default())
    }
}
