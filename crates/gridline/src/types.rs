//! Small configuration enums shared by the formatter, the table and the
//! serde configuration layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Text alignment within a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left-align text (pad on the right).
    #[default]
    Left,
    /// Center text (smaller half of the padding on the left).
    Center,
    /// Right-align text (pad on the left).
    Right,
}

impl Align {
    /// Splits `padding` columns into (before, after) for this alignment.
    pub fn split(self, padding: usize) -> (usize, usize) {
        match self {
            Align::Left => (0, padding),
            Align::Right => (padding, 0),
            Align::Center => {
                let before = padding / 2;
                (before, padding - before)
            }
        }
    }
}

impl FromStr for Align {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Align::Left),
            "center" | "centre" | "c" => Ok(Align::Center),
            "right" | "r" => Ok(Align::Right),
            other => Err(GridError::invalid("alignment", other)),
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        })
    }
}

/// What truncation does with escape sequences embedded in a cell.
///
/// Padding never touches escape sequences. Truncation has to choose: the
/// styling that was open at the cut point either disappears with the cut
/// text or has to be closed explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EscapePolicy {
    /// Drop all escape sequences from a truncated cell.
    #[default]
    Strip,
    /// Keep the sequences that precede the cut point and append an SGR reset.
    PreserveAndReset,
}

impl FromStr for EscapePolicy {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strip" => Ok(EscapePolicy::Strip),
            "preserve" | "preserve-and-reset" => Ok(EscapePolicy::PreserveAndReset),
            other => Err(GridError::invalid("escape policy", other)),
        }
    }
}
