//! Border character tables.
//!
//! The layout engine has no opinion on glyphs. It asks a [`BorderChars`] for
//! the character at a position and writes it. [`BorderStyle`] names the
//! built-in sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Named border style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// Light Unicode box-drawing characters: ┌ ─ ┬ ┐ │ ├ ┼ ┤ └ ┴ ┘
    #[default]
    Single,
    /// Double-line Unicode box-drawing: ╔ ═ ╦ ╗ ║ ╠ ╬ ╣ ╚ ╩ ╝
    Double,
    /// Rounded corners with light lines: ╭ ─ ┬ ╮ │ ├ ┼ ┤ ╰ ┴ ╯
    Rounded,
    /// Heavy Unicode box-drawing characters: ┏ ━ ┳ ┓ ┃ ┣ ╋ ┫ ┗ ┻ ┛
    Heavy,
    /// ASCII borders: + - |
    Ascii,
    /// Spaces only. Lines keep their width but draw nothing.
    None,
}

impl BorderStyle {
    /// Every built-in style, in declaration order.
    pub const ALL: [BorderStyle; 6] = [
        BorderStyle::Single,
        BorderStyle::Double,
        BorderStyle::Rounded,
        BorderStyle::Heavy,
        BorderStyle::Ascii,
        BorderStyle::None,
    ];

    /// The character set for this style.
    pub const fn chars(self) -> BorderChars {
        match self {
            BorderStyle::Single => BorderChars {
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                horizontal: '─',
                vertical: '│',
                cross: '┼',
                top_tee: '┬',
                bottom_tee: '┴',
                left_tee: '├',
                right_tee: '┤',
            },
            BorderStyle::Double => BorderChars {
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                horizontal: '═',
                vertical: '║',
                cross: '╬',
                top_tee: '╦',
                bottom_tee: '╩',
                left_tee: '╠',
                right_tee: '╣',
            },
            BorderStyle::Rounded => BorderChars {
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                horizontal: '─',
                vertical: '│',
                cross: '┼',
                top_tee: '┬',
                bottom_tee: '┴',
                left_tee: '├',
                right_tee: '┤',
            },
            BorderStyle::Heavy => BorderChars {
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
                horizontal: '━',
                vertical: '┃',
                cross: '╋',
                top_tee: '┳',
                bottom_tee: '┻',
                left_tee: '┣',
                right_tee: '┫',
            },
            BorderStyle::Ascii => BorderChars {
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                horizontal: '-',
                vertical: '|',
                cross: '+',
                top_tee: '+',
                bottom_tee: '+',
                left_tee: '+',
                right_tee: '+',
            },
            BorderStyle::None => BorderChars::blank(),
        }
    }

    /// Lowercase name, as accepted by `FromStr` and serde.
    pub const fn name(self) -> &'static str {
        match self {
            BorderStyle::Single => "single",
            BorderStyle::Double => "double",
            BorderStyle::Rounded => "rounded",
            BorderStyle::Heavy => "heavy",
            BorderStyle::Ascii => "ascii",
            BorderStyle::None => "none",
        }
    }
}

impl FromStr for BorderStyle {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        BorderStyle::ALL
            .into_iter()
            .find(|style| style.name() == name)
            .or(match name.as_str() {
                "light" => Some(BorderStyle::Single),
                "plain" | "blank" => Some(BorderStyle::None),
                _ => None,
            })
            .ok_or_else(|| GridError::invalid("border style", s))
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The eleven characters a table border is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BorderChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    pub cross: char,
    pub top_tee: char,
    pub bottom_tee: char,
    pub left_tee: char,
    pub right_tee: char,
}

impl BorderChars {
    /// All positions set to a space.
    pub const fn blank() -> Self {
        BorderChars {
            top_left: ' ',
            top_right: ' ',
            bottom_left: ' ',
            bottom_right: ' ',
            horizontal: ' ',
            vertical: ' ',
            cross: ' ',
            top_tee: ' ',
            bottom_tee: ' ',
            left_tee: ' ',
            right_tee: ' ',
        }
    }

    /// Character at `position`.
    pub const fn get(&self, position: BorderPosition) -> char {
        match position {
            BorderPosition::TopLeft => self.top_left,
            BorderPosition::TopRight => self.top_right,
            BorderPosition::BottomLeft => self.bottom_left,
            BorderPosition::BottomRight => self.bottom_right,
            BorderPosition::Horizontal => self.horizontal,
            BorderPosition::Vertical => self.vertical,
            BorderPosition::Cross => self.cross,
            BorderPosition::TopTee => self.top_tee,
            BorderPosition::BottomTee => self.bottom_tee,
            BorderPosition::LeftTee => self.left_tee,
            BorderPosition::RightTee => self.right_tee,
        }
    }

    /// True when corners and lines are all spaces, i.e. nothing is drawn.
    pub fn is_blank(&self) -> bool {
        self.top_left == ' ' && self.horizontal == ' ' && self.vertical == ' '
    }
}

impl Default for BorderChars {
    fn default() -> Self {
        BorderStyle::default().chars()
    }
}

impl From<BorderStyle> for BorderChars {
    fn from(style: BorderStyle) -> Self {
        style.chars()
    }
}

/// A slot in [`BorderChars`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BorderPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Horizontal,
    Vertical,
    Cross,
    TopTee,
    BottomTee,
    LeftTee,
    RightTee,
}

impl FromStr for BorderPosition {
    type Err = GridError;

    /// Accepts the long names and the usual abbreviations
    /// (`"top-left"`, `"tl"`, `"btm-tee"`, `"h"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let position = match s.trim().to_ascii_lowercase().as_str() {
            "top-left" | "topleft" | "tl" | "topl" | "tleft" => BorderPosition::TopLeft,
            "top-right" | "topright" | "tr" | "topr" => BorderPosition::TopRight,
            "bottom-left" | "bottomleft" | "btm-left" | "btm-lft" | "bl" | "btml" => {
                BorderPosition::BottomLeft
            }
            "bottom-right" | "bottomright" | "btm-right" | "br" | "botr" => {
                BorderPosition::BottomRight
            }
            "horizontal" | "h" => BorderPosition::Horizontal,
            "vertical" | "v" => BorderPosition::Vertical,
            "cross" | "x" => BorderPosition::Cross,
            "top-tee" | "t-tee" | "tt" => BorderPosition::TopTee,
            "bottom-tee" | "btm-tee" | "btm-t" | "btmt" | "bt" => BorderPosition::BottomTee,
            "left-tee" | "l-tee" | "lt" => BorderPosition::LeftTee,
            "right-tee" | "r-tee" | "rt" => BorderPosition::RightTee,
            _ => return Err(GridError::invalid("border position", s)),
        };
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_single() {
        assert_eq!(BorderStyle::default(), BorderStyle::Single);
        assert_eq!(BorderChars::default().top_left, '┌');
    }

    #[test]
    fn ascii_chars() {
        let chars = BorderStyle::Ascii.chars();
        assert_eq!(chars.horizontal, '-');
        assert_eq!(chars.vertical, '|');
        assert_eq!(chars.cross, '+');
    }

    #[test]
    fn double_and_rounded_corners() {
        assert_eq!(BorderStyle::Double.chars().top_left, '╔');
        assert_eq!(BorderStyle::Rounded.chars().bottom_right, '╯');
        assert_eq!(BorderStyle::Heavy.chars().cross, '╋');
    }

    #[test]
    fn none_is_blank() {
        assert!(BorderStyle::None.chars().is_blank());
        assert!(!BorderStyle::Ascii.chars().is_blank());
    }

    #[test]
    fn style_names_round_trip() {
        for style in BorderStyle::ALL {
            assert_eq!(style.name().parse::<BorderStyle>().unwrap(), style);
            assert_eq!(style.to_string(), style.name());
        }
        assert_eq!("LIGHT".parse::<BorderStyle>().unwrap(), BorderStyle::Single);
        assert!("dotted".parse::<BorderStyle>().is_err());
    }

    #[test]
    fn style_serde() {
        let style: BorderStyle = serde_yaml::from_str("rounded").unwrap();
        assert_eq!(style, BorderStyle::Rounded);
    }

    #[test]
    fn position_lookup() {
        let chars = BorderStyle::Single.chars();
        assert_eq!(chars.get("tl".parse().unwrap()), '┌');
        assert_eq!(chars.get("top-right".parse().unwrap()), '┐');
        assert_eq!(chars.get("btm-lft".parse().unwrap()), '└');
        assert_eq!(chars.get("h".parse().unwrap()), '─');
        assert_eq!(chars.get("btm-tee".parse().unwrap()), '┴');
        assert_eq!(chars.get("r-tee".parse().unwrap()), '┤');
        assert!("middle".parse::<BorderPosition>().is_err());
    }
}
