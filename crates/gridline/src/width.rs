//! Display width of single code points.
//!
//! The built-in classifier is a pair of compact range tables: one for
//! zero-width code points (combining marks, joiners, format controls) and one
//! for wide code points (CJK, full-width forms, emoji blocks). Anything not
//! covered by either table is one column wide.
//!
//! The rest of the crate never calls the tables directly. Every measurement
//! goes through a [`WidthFn`], so callers can swap in a more precise
//! classifier (see [`UnicodeWidth`]) without touching layout code.
//!
//! ```rust
//! use gridline::width::{char_width, is_wide, WidthFn, TableWidth};
//!
//! assert_eq!(char_width('a'), 1);
//! assert_eq!(char_width('中'), 2);
//! assert_eq!(char_width('\u{0301}'), 0);
//! assert!(is_wide('😀'));
//! assert_eq!(TableWidth.char_width('x'), 1);
//! ```

/// An inclusive code point range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeRange {
    pub start: u32,
    pub end: u32,
}

const fn r(start: u32, end: u32) -> CodeRange {
    CodeRange { start, end }
}

/// Zero-width code points, sorted and non-overlapping.
pub static ZERO_WIDTH: &[CodeRange] = &[
    r(0x0300, 0x036F), // Combining Diacritical Marks
    r(0x1AB0, 0x1AFF), // Combining Diacritical Marks Extended
    r(0x1DC0, 0x1DFF), // Combining Diacritical Marks Supplement
    r(0x200B, 0x200F), // ZWSP, ZWNJ, ZWJ, LRM, RLM
    r(0x2028, 0x2029), // Line / paragraph separators
    r(0x202A, 0x202E), // Bidi embedding and override controls
    r(0x2060, 0x2064), // Word joiner and invisible operators
    r(0x20D0, 0x20FF), // Combining Diacritical Marks for Symbols
    r(0xFE00, 0xFE0F), // Variation selectors
    r(0xFE20, 0xFE2F), // Combining Half Marks
];

/// Double-width code points, sorted and non-overlapping.
pub static WIDE: &[CodeRange] = &[
    r(0x1100, 0x115F),   // Hangul Jamo (leading consonants)
    r(0x1160, 0x11FF),   // Hangul Jamo (vowels, trailing consonants)
    r(0x2460, 0x24FF),   // Enclosed Alphanumerics
    r(0x25A0, 0x25FF),   // Geometric Shapes
    r(0x2600, 0x26FF),   // Miscellaneous Symbols
    r(0x2700, 0x27BF),   // Dingbats
    r(0x2E80, 0x2EFF),   // CJK Radicals Supplement
    r(0x2F00, 0x2FDF),   // Kangxi Radicals
    r(0x2FF0, 0x2FFF),   // Ideographic Description Characters
    r(0x3000, 0x303F),   // CJK Symbols and Punctuation
    r(0x3040, 0x309F),   // Hiragana
    r(0x30A0, 0x30FF),   // Katakana
    r(0x31F0, 0x31FF),   // Katakana Phonetic Extensions
    r(0x3400, 0x4DBF),   // CJK Extension A
    r(0x4E00, 0x9FFF),   // CJK Unified Ideographs
    r(0xA960, 0xA97F),   // Hangul Jamo Extended-A
    r(0xAC00, 0xD7AF),   // Hangul Syllables
    r(0xF900, 0xFAFF),   // CJK Compatibility Ideographs
    r(0xFE30, 0xFE4F),   // CJK Compatibility Forms
    r(0xFF01, 0xFF60),   // Fullwidth ASCII variants
    r(0xFFE0, 0xFFE6),   // Fullwidth symbol variants
    r(0x1F300, 0x1F5FF), // Miscellaneous Symbols and Pictographs
    r(0x1F600, 0x1F64F), // Emoticons
    r(0x1F680, 0x1F6FF), // Transport and Map Symbols
    r(0x1F700, 0x1F77F), // Alchemical Symbols
    r(0x1F780, 0x1F7FF), // Geometric Shapes Extended
    r(0x1F800, 0x1F8FF), // Supplemental Arrows-C
    r(0x1F900, 0x1F9FF), // Supplemental Symbols and Pictographs
    r(0x1FA00, 0x1FA6F), // Chess Symbols
    r(0x1FA70, 0x1FAFF), // Symbols and Pictographs Extended-A
    r(0x20000, 0x2A6DF), // CJK Extension B
    r(0x2A700, 0x2B73F), // CJK Extension C
    r(0x2B740, 0x2B81F), // CJK Extension D
    r(0x2B820, 0x2CEAF), // CJK Extension E
    r(0x2CEB0, 0x2EBEF), // CJK Extension F
    r(0x30000, 0x3134F), // CJK Extension G
];

fn in_table(table: &[CodeRange], cp: u32) -> bool {
    table
        .binary_search_by(|range| {
            if range.end < cp {
                std::cmp::Ordering::Less
            } else if range.start > cp {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Returns the display width of `c` according to the built-in tables.
///
/// Printable ASCII is 1, ASCII control codes (including DEL) are 0, then the
/// zero-width table wins over the wide table, and everything else is 1.
///
/// DEL (0x7F) is a control code: terminals do not advance the cursor for
/// it, so it is 0 like the C0 range rather than 1.
pub fn char_width(c: char) -> usize {
    let cp = c as u32;
    if cp < 0x80 {
        return if (0x20..0x7F).contains(&cp) { 1 } else { 0 };
    }
    if in_table(ZERO_WIDTH, cp) {
        return 0;
    }
    if in_table(WIDE, cp) {
        return 2;
    }
    1
}

/// True when `c` occupies two terminal columns.
pub fn is_wide(c: char) -> bool {
    char_width(c) > 1
}

/// True when `c` occupies no terminal column.
pub fn is_zero_width(c: char) -> bool {
    char_width(c) == 0
}

/// Maps a code point to its display width.
///
/// This is the seam for plugging in a different width model. Implementations
/// may carry state (a loaded table, a terminal probe result); they must be
/// shareable across threads because a [`Table`](crate::Table) can be rendered
/// concurrently.
pub trait WidthFn: Send + Sync {
    /// Display width of `c`, normally 0, 1 or 2.
    fn char_width(&self, c: char) -> usize;
}

/// The built-in range-table classifier. This is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableWidth;

impl WidthFn for TableWidth {
    fn char_width(&self, c: char) -> usize {
        char_width(c)
    }
}

/// Classifier backed by the Unicode East Asian Width data of the
/// `unicode-width` crate.
///
/// Characters `unicode-width` declines to measure (control characters)
/// count as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnicodeWidth;

impl WidthFn for UnicodeWidth {
    fn char_width(&self, c: char) -> usize {
        unicode_width::UnicodeWidthChar::width(c).unwrap_or(0)
    }
}

impl<F> WidthFn for F
where
    F: Fn(char) -> usize + Send + Sync,
{
    fn char_width(&self, c: char) -> usize {
        self(c)
    }
}
