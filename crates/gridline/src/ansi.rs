//! Terminal escape sequence scanning.
//!
//! Escape sequences carry styling, not text: they occupy no terminal column
//! and must survive formatting untouched. This module only answers "how many
//! bytes does the sequence at this position span", so measurement and
//! formatting can step over it without decoding it.
//!
//! Recognised forms:
//! - CSI: `ESC [` parameter bytes (0x30-0x3F), intermediate bytes (0x20-0x2F),
//!   final byte (0x40-0x7E)
//! - OSC: `ESC ]` ... terminated by BEL (0x07) or ST (`ESC \`)
//!
//! An `ESC` followed by anything else is not a sequence; callers treat the
//! byte as an ordinary (zero-width) control character.

use std::borrow::Cow;

/// The escape byte that starts every sequence.
pub const ESC: u8 = 0x1B;

/// Select Graphic Rendition reset, appended after kept styling on truncation.
pub const RESET: &[u8] = b"\x1b[0m";

/// Returns the byte length of the escape sequence at the start of `bytes`,
/// or 0 when no sequence starts there.
///
/// Never reads past the end of `bytes`. An unterminated sequence spans the
/// remainder of the buffer. A CSI sequence interrupted by a byte outside
/// 0x20-0x7E ends just before that byte.
///
/// ```rust
/// use gridline::ansi::sequence_len;
///
/// assert_eq!(sequence_len(b"\x1b[31mred"), 5);
/// assert_eq!(sequence_len(b"red"), 0);
/// assert_eq!(sequence_len(b"\x1b[3"), 4);
/// ```
pub fn sequence_len(bytes: &[u8]) -> usize {
    if bytes.len() < 2 || bytes[0] != ESC {
        return 0;
    }
    match bytes[1] {
        b'[' => csi_end(bytes, 2),
        b']' => string_terminated_end(bytes, 2),
        _ => 0,
    }
}

/// End offset of a CSI sequence whose parameters start at `pos`.
fn csi_end(bytes: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while i < bytes.len() {
        let b = bytes[i];
        if (0x40..=0x7E).contains(&b) {
            return i + 1;
        }
        if !(0x20..=0x3F).contains(&b) {
            return i;
        }
        i += 1;
    }
    bytes.len()
}

/// End offset of an OSC sequence whose payload starts at `pos`.
fn string_terminated_end(bytes: &[u8], pos: usize) -> usize {
    let mut i = pos;
    while i < bytes.len() {
        match bytes[i] {
            0x07 => return i + 1,
            ESC if bytes.get(i + 1) == Some(&b'\\') => return i + 2,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// True when `seq`, a sequence as delimited by [`sequence_len`], ends with
/// its terminator rather than at an interrupting byte or the end of input.
pub fn is_terminated(seq: &[u8]) -> bool {
    match seq.get(1) {
        Some(b'[') => seq.len() > 2 && (0x40..=0x7E).contains(&seq[seq.len() - 1]),
        Some(b']') => seq.ends_with(&[0x07]) || (seq.len() >= 4 && seq.ends_with(b"\x1b\\")),
        _ => false,
    }
}

/// Drops an unterminated sequence running to the end of `bytes`.
///
/// Such a sequence would otherwise swallow whatever is written after the
/// buffer, padding and borders included.
///
/// ```rust
/// use gridline::ansi::trim_unterminated;
///
/// assert_eq!(trim_unterminated(b"ab\x1b[31"), b"ab");
/// assert_eq!(trim_unterminated(b"ab\x1b[31m"), b"ab\x1b[31m");
/// ```
pub fn trim_unterminated(bytes: &[u8]) -> &[u8] {
    // Start and end of the current run of back-to-back unterminated
    // sequences. Dropping the last one leaves the one before it dangling,
    // so the whole run goes.
    let mut run: Option<(usize, usize)> = None;
    let mut i = 0;
    while let Some(offset) = bytes[i..].iter().position(|&b| b == ESC) {
        let at = i + offset;
        let len = sequence_len(&bytes[at..]);
        if len == 0 {
            run = None;
            i = at + 1;
            continue;
        }
        let end = at + len;
        run = if is_terminated(&bytes[at..end]) {
            None
        } else {
            match run {
                Some((start, prev_end)) if prev_end == at => Some((start, end)),
                _ => Some((at, end)),
            }
        };
        i = end;
    }
    match run {
        Some((start, end)) if end == bytes.len() => &bytes[..start],
        _ => bytes,
    }
}

/// True when `bytes` contains at least one recognised escape sequence.
pub fn has_escapes(bytes: &[u8]) -> bool {
    let mut i = 0;
    while let Some(offset) = bytes[i..].iter().position(|&b| b == ESC) {
        let at = i + offset;
        if sequence_len(&bytes[at..]) > 0 {
            return true;
        }
        i = at + 1;
    }
    false
}

/// Removes every recognised escape sequence from `bytes`.
///
/// Borrows when there is nothing to remove.
pub fn strip_escapes(bytes: &[u8]) -> Cow<'_, [u8]> {
    if !has_escapes(bytes) {
        return Cow::Borrowed(bytes);
    }

    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let skip = sequence_len(&bytes[i..]);
        if skip > 0 {
            i += skip;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Cow::Owned(out)
}

/// `&str` flavour of [`strip_escapes`].
pub fn strip_str(s: &str) -> Cow<'_, str> {
    match strip_escapes(s.as_bytes()) {
        Cow::Borrowed(_) => Cow::Borrowed(s),
        // Sequences are pure ASCII, so removing them keeps UTF-8 boundaries.
        Cow::Owned(bytes) => Cow::Owned(String::from_utf8_lossy(&bytes).into_owned()),
    }
}
