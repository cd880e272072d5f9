// src/extractors/flags.rs
use std::fmt;

use crate::utils::error::CompileError;

/// Validated set of regex modifiers.
///
/// Built from a user supplied flag string such as `"imsU"`. Order does not
/// matter and repeats collapse; anything outside the supported characters is
/// rejected rather than passed through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagSet {
    pub case_insensitive: bool, // i
    pub multi_line: bool,       // m
    pub dot_all: bool,          // s
    pub swap_greed: bool,       // U
    pub ignore_whitespace: bool, // x
    pub unicode: bool,          // u
    pub global: bool,           // g
    pub sticky: bool,           // y
}

impl FlagSet {
    pub fn parse(flags: &str) -> Result<Self, CompileError> {
        let mut set = FlagSet::default();
        for c in flags.chars() {
            let slot = match c {
                'i' => &mut set.case_insensitive,
                'm' => &mut set.multi_line,
                's' => &mut set.dot_all,
                'U' => &mut set.swap_greed,
                'x' => &mut set.ignore_whitespace,
                'u' => &mut set.unicode,
                'g' => &mut set.global,
                'y' => &mut set.sticky,
                other => {
                    tracing::debug!("Rejecting flag character {:?}", other);
                    return Err(CompileError::UnsupportedFlag(other));
                }
            };
            *slot = true;
        }
        Ok(set)
    }

    pub fn is_empty(&self) -> bool {
        *self == FlagSet::default()
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Canonical order, uppercase last
        let pairs = [
            (self.global, 'g'),
            (self.case_insensitive, 'i'),
            (self.multi_line, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.ignore_whitespace, 'x'),
            (self.sticky, 'y'),
            (self.swap_greed, 'U'),
        ];
        for (on, c) in pairs {
            if on {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}
