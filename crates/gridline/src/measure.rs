//! Display width of whole buffers.
//!
//! [`measure`] is the only place that turns bytes into a width. The cell
//! formatter and the layout engine both call it, so the width a column is
//! sized for is always the width its cells are padded to.

use crate::ansi::sequence_len;
use crate::width::{TableWidth, WidthFn};

/// Decodes the UTF-8 code point at the start of `bytes`.
///
/// Returns the character and its encoded length, or `None` when `bytes` is
/// empty or does not start with a valid encoding.
pub fn decode_char(bytes: &[u8]) -> Option<(char, usize)> {
    let end = bytes.len().min(4);
    let valid = match std::str::from_utf8(&bytes[..end]) {
        Ok(s) => s,
        Err(e) if e.valid_up_to() > 0 => {
            // valid_up_to() is a char boundary inside the slice.
            std::str::from_utf8(&bytes[..e.valid_up_to()]).ok()?
        }
        Err(_) => return None,
    };
    let c = valid.chars().next()?;
    Some((c, c.len_utf8()))
}

/// Measures the display width of `bytes` using `width_fn`.
///
/// Escape sequences contribute nothing. Bytes that are not valid UTF-8 count
/// one column each. Never fails.
///
/// ```rust
/// use gridline::measure::measure;
/// use gridline::width::TableWidth;
///
/// assert_eq!(measure(b"\x1b[31mRed\x1b[0m", &TableWidth), 3);
/// assert_eq!(measure("日本語".as_bytes(), &TableWidth), 6);
/// ```
pub fn measure(bytes: &[u8], width_fn: &dyn WidthFn) -> usize {
    let mut width = 0;
    let mut i = 0;
    while i < bytes.len() {
        let rest = &bytes[i..];
        let skip = sequence_len(rest);
        if skip > 0 {
            i += skip;
            continue;
        }
        match decode_char(rest) {
            Some((c, len)) => {
                width += width_fn.char_width(c);
                i += len;
            }
            None => {
                width += 1;
                i += 1;
            }
        }
    }
    width
}

/// [`measure`] with the built-in width tables.
pub fn measure_default(bytes: &[u8]) -> usize {
    measure(bytes, &TableWidth)
}

/// Display width of a string, ignoring escape sequences.
pub fn display_width(s: &str) -> usize {
    measure(s.as_bytes(), &TableWidth)
}

/// Display width of a string without escape handling.
///
/// Every character, including the ones inside an escape sequence, goes
/// through the width tables. Useful for text known to be free of styling.
pub fn plain_width(s: &str) -> usize {
    s.chars().map(crate::width::char_width).sum()
}
