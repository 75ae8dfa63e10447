//! Fitting a cell into an exact column width.
//!
//! [`CellFormatter`] pads narrow cells and truncates wide ones so that the
//! result always measures exactly the requested width. Measurement goes
//! through [`measure`](crate::measure::measure) with the formatter's width
//! function, so padding agrees with the layout pass that sized the column.
//!
//! ```rust
//! use gridline::format::CellFormatter;
//! use gridline::width::TableWidth;
//! use gridline::Align;
//!
//! let fmt = CellFormatter::new(&TableWidth);
//! assert_eq!(&*fmt.format(b"ab", 5, Align::Right), b"   ab");
//! assert_eq!(&*fmt.format(b"Supercalifragilistic", 5, Align::Left), b"Su...");
//! ```

use std::borrow::Cow;

use crate::ansi::{is_terminated, sequence_len, trim_unterminated, ESC, RESET};
use crate::measure::{decode_char, measure};
use crate::types::{Align, EscapePolicy};
use crate::width::{TableWidth, WidthFn};

/// Marker appended to truncated content when there is room for it.
pub const ELLIPSIS: &[u8] = b"...";

/// Pads and truncates cells to an exact display width.
#[derive(Clone, Copy)]
pub struct CellFormatter<'a> {
    width_fn: &'a dyn WidthFn,
    escapes: EscapePolicy,
}

impl<'a> CellFormatter<'a> {
    /// Creates a formatter measuring with `width_fn` and stripping escapes on
    /// truncation.
    pub fn new(width_fn: &'a dyn WidthFn) -> Self {
        CellFormatter {
            width_fn,
            escapes: EscapePolicy::default(),
        }
    }

    /// Sets how escape sequences are handled when a cell is truncated.
    pub fn escape_policy(mut self, policy: EscapePolicy) -> Self {
        self.escapes = policy;
        self
    }

    /// Measures `bytes` with this formatter's width function.
    pub fn measure(&self, bytes: &[u8]) -> usize {
        measure(bytes, self.width_fn)
    }

    /// Returns `cell` fitted to exactly `target` columns.
    ///
    /// Borrows when the cell already has the right width. A trailing
    /// unterminated escape sequence is dropped so it cannot swallow the
    /// padding or whatever follows the cell.
    pub fn format<'c>(&self, cell: &'c [u8], target: usize, align: Align) -> Cow<'c, [u8]> {
        let cell = trim_unterminated(cell);
        let width = self.measure(cell);
        if width == target {
            return Cow::Borrowed(cell);
        }
        let mut out = Vec::with_capacity(cell.len() + target.saturating_sub(width));
        self.fit(&mut out, cell, width, target, align);
        Cow::Owned(out)
    }

    /// Appends `cell` fitted to exactly `target` columns to `out`.
    pub fn format_into(&self, out: &mut Vec<u8>, cell: &[u8], target: usize, align: Align) {
        let cell = trim_unterminated(cell);
        let width = self.measure(cell);
        self.fit(out, cell, width, target, align);
    }

    fn fit(&self, out: &mut Vec<u8>, cell: &[u8], width: usize, target: usize, align: Align) {
        if width <= target {
            write_padded(out, cell, target - width, align);
            return;
        }

        let mut cut = Vec::with_capacity(cell.len());
        let visible = self.truncate_into(&mut cut, cell, target);
        tracing::trace!(width, target, visible, "truncated cell");
        // A wide character that straddles the limit leaves a gap to fill.
        write_padded(out, &cut, target.saturating_sub(visible), align);
    }

    /// Appends `cell` cut down to at most `max` columns and returns the width
    /// written.
    ///
    /// Content that already fits is copied unchanged, escape sequences
    /// included. Invalid UTF-8 in a cut cell comes out as U+FFFD.
    pub fn truncate_into(&self, out: &mut Vec<u8>, cell: &[u8], max: usize) -> usize {
        let width = self.measure(cell);
        if width <= max {
            out.extend_from_slice(cell);
            return width;
        }
        let keep_escapes = self.escapes == EscapePolicy::PreserveAndReset;
        self.cut(out, cell, max, keep_escapes)
    }

    /// Greedy prefix of `bytes` within `max` columns, followed by the
    /// ellipsis when `max` leaves room for at least one column of content.
    ///
    /// Only whole characters and complete sequences are emitted, so the
    /// output measures exactly the returned width.
    fn cut(&self, out: &mut Vec<u8>, bytes: &[u8], max: usize, keep_escapes: bool) -> usize {
        let ellipsis_width = self.measure(ELLIPSIS);
        let with_ellipsis = max > ellipsis_width;
        let budget = if with_ellipsis {
            max - ellipsis_width
        } else {
            max
        };

        let mut width = 0;
        let mut kept_escape = false;
        let mut i = 0;
        while i < bytes.len() {
            let rest = &bytes[i..];
            let skip = sequence_len(rest);
            if skip > 0 {
                let seq = &rest[..skip];
                if keep_escapes && is_terminated(seq) {
                    out.extend_from_slice(seq);
                    kept_escape = true;
                }
                i += skip;
                continue;
            }

            let (c, len) = decode_char(rest).unwrap_or((char::REPLACEMENT_CHARACTER, 1));
            // A lone ESC could pair with the bytes written after it.
            if c as u32 == u32::from(ESC) {
                i += len;
                continue;
            }
            let char_width = self.width_fn.char_width(c);
            if width + char_width > budget {
                break;
            }
            let mut buf = [0u8; 4];
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            width += char_width;
            i += len;
        }

        if with_ellipsis {
            out.extend_from_slice(ELLIPSIS);
            width += ellipsis_width;
        }
        if kept_escape {
            out.extend_from_slice(RESET);
        }
        width
    }
}

impl Default for CellFormatter<'static> {
    fn default() -> Self {
        CellFormatter::new(&TableWidth)
    }
}

impl std::fmt::Debug for CellFormatter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellFormatter")
            .field("escapes", &self.escapes)
            .finish_non_exhaustive()
    }
}

fn write_padded(out: &mut Vec<u8>, content: &[u8], padding: usize, align: Align) {
    let (before, after) = align.split(padding);
    out.resize(out.len() + before, b' ');
    out.extend_from_slice(content);
    out.resize(out.len() + after, b' ');
}

/// Pads `cell` with spaces up to `target` columns. Wider cells are returned
/// unchanged.
pub fn pad<'c>(
    cell: &'c [u8],
    target: usize,
    align: Align,
    width_fn: &dyn WidthFn,
) -> Cow<'c, [u8]> {
    let width = measure(cell, width_fn);
    if width >= target {
        return Cow::Borrowed(cell);
    }
    let mut out = Vec::with_capacity(cell.len() + target - width);
    write_padded(&mut out, cell, target - width, align);
    Cow::Owned(out)
}

/// Cuts `cell` down to at most `max` columns, appending `...` when there is
/// room. Escape sequences are stripped from a cut cell.
pub fn truncate<'c>(cell: &'c [u8], max: usize, width_fn: &dyn WidthFn) -> Cow<'c, [u8]> {
    if measure(cell, width_fn) <= max {
        return Cow::Borrowed(cell);
    }
    let mut out = Vec::with_capacity(cell.len().min(max * 4 + ELLIPSIS.len()));
    CellFormatter::new(width_fn).truncate_into(&mut out, cell, max);
    Cow::Owned(out)
}

/// [`pad`] for strings, using the built-in width tables.
///
/// ```rust
/// use gridline::format::pad_str;
/// use gridline::Align;
///
/// assert_eq!(pad_str("ab", 6, Align::Center), "  ab  ");
/// assert_eq!(pad_str("日本", 6, Align::Right), "  日本");
/// ```
pub fn pad_str(s: &str, target: usize, align: Align) -> String {
    match pad(s.as_bytes(), target, align, &TableWidth) {
        Cow::Borrowed(_) => s.to_string(),
        Cow::Owned(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// [`truncate`] for strings, using the built-in width tables.
///
/// ```rust
/// use gridline::format::truncate_str;
///
/// assert_eq!(truncate_str("Hello World", 8), "Hello...");
/// assert_eq!(truncate_str("Hello", 3), "Hel");
/// assert_eq!(truncate_str("Hi", 8), "Hi");
/// ```
pub fn truncate_str(s: &str, max: usize) -> String {
    match truncate(s.as_bytes(), max, &TableWidth) {
        Cow::Borrowed(_) => s.to_string(),
        Cow::Owned(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::measure_default;

    fn fmt() -> CellFormatter<'static> {
        CellFormatter::default()
    }

    fn formatted(cell: &str, target: usize, align: Align) -> String {
        String::from_utf8(fmt().format(cell.as_bytes(), target, align).into_owned()).unwrap()
    }

    #[test]
    fn exact_width_is_borrowed() {
        assert!(matches!(
            fmt().format(b"Alice", 5, Align::Left),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn pads_left_aligned_by_default() {
        assert_eq!(formatted("Bob", 5, Align::default()), "Bob  ");
    }

    #[test]
    fn pads_right() {
        assert_eq!(formatted("7", 3, Align::Right), "  7");
    }

    #[test]
    fn pads_center_with_smaller_half_first() {
        assert_eq!(formatted("ab", 5, Align::Center), " ab  ");
        assert_eq!(formatted("ab", 6, Align::Center), "  ab  ");
    }

    #[test]
    fn padding_stays_outside_escapes() {
        assert_eq!(
            formatted("\x1b[31mRed\x1b[0m", 5, Align::Right),
            "  \x1b[31mRed\x1b[0m"
        );
        assert_eq!(
            formatted("\x1b[31mRed\x1b[0m", 5, Align::Left),
            "\x1b[31mRed\x1b[0m  "
        );
    }

    #[test]
    fn truncates_with_ellipsis() {
        assert_eq!(formatted("Supercalifragilistic", 5, Align::Left), "Su...");
        assert_eq!(formatted("Hello World", 8, Align::Left), "Hello...");
        assert_eq!(formatted("Hello World", 4, Align::Left), "H...");
    }

    #[test]
    fn hard_cut_without_room_for_ellipsis() {
        assert_eq!(formatted("Hello", 3, Align::Left), "Hel");
        assert_eq!(formatted("Hello", 1, Align::Left), "H");
        assert_eq!(formatted("Hello", 0, Align::Left), "");
    }

    #[test]
    fn wide_character_at_the_limit_is_padded() {
        // Budget after the ellipsis is 2: one CJK char fits exactly.
        assert_eq!(formatted("日本語テキスト", 5, Align::Left), "日...");
        // Budget 3: the second char would need columns 3-4, so a space fills.
        assert_eq!(formatted("日本語テキスト", 6, Align::Left), "日... ");
        assert_eq!(formatted("日本語テキスト", 6, Align::Right), " 日...");
        // No ellipsis: 3 columns hold one wide char plus padding.
        assert_eq!(formatted("日本語", 3, Align::Left), "日 ");
    }

    #[test]
    fn strip_policy_drops_styling_when_cutting() {
        let cell = "\x1b[32mSupercalifragilistic\x1b[0m";
        assert_eq!(formatted(cell, 5, Align::Left), "Su...");
    }

    #[test]
    fn preserve_policy_keeps_leading_styling_and_resets() {
        let fmt = fmt().escape_policy(EscapePolicy::PreserveAndReset);
        let out = fmt.format(b"\x1b[32mSupercalifragilistic\x1b[0m", 5, Align::Left);
        assert_eq!(&*out, b"\x1b[32mSu...\x1b[0m");
        assert_eq!(measure_default(&out), 5);
    }

    #[test]
    fn preserve_policy_without_room_for_ellipsis() {
        let fmt = fmt().escape_policy(EscapePolicy::PreserveAndReset);
        let out = fmt.format(b"\x1b[1mbold\x1b[0m", 2, Align::Left);
        assert_eq!(&*out, b"\x1b[1mbo\x1b[0m");
    }

    #[test]
    fn invalid_utf8_is_replaced_when_cut() {
        let out = fmt().format(&[0xFF, 0xFE, 0xFD, 0xFC, 0xFB], 4, Align::Left);
        assert_eq!(&*out, "\u{FFFD}...".as_bytes());
        assert_eq!(measure_default(&out), 4);
        // Uncut invalid bytes are left as they are.
        assert_eq!(&*fmt().format(&[0xFF], 2, Align::Left), &[0xFF, b' ']);
    }

    #[test]
    fn dangling_escape_is_dropped_before_padding() {
        let out = fmt().format(b"ab\x1b[31", 4, Align::Left);
        assert_eq!(&*out, b"ab  ");
    }

    #[test]
    fn long_chain_of_interrupted_escapes_is_dropped() {
        let mut cell = b"ok".to_vec();
        cell.extend(b"\x1b[3".repeat(100_000));
        for policy in [EscapePolicy::Strip, EscapePolicy::PreserveAndReset] {
            let fmt = fmt().escape_policy(policy);
            assert_eq!(&*fmt.format(&cell, 2, Align::Left), b"ok");
            let out = fmt.format(&cell, 5, Align::Right);
            assert_eq!(&*out, b"   ok");
            assert_eq!(measure_default(&out), 5);
        }
    }

    #[test]
    fn cut_never_glues_bytes_into_new_text() {
        // Dropping the sequence must not join 0xC3 and 0xA9 into 'é'.
        let cell = [b'x', 0xC3, 0x1B, b'[', b'm', 0xA9, b'y', b'z', b'w'];
        let out = fmt().format(&cell, 3, Align::Left);
        assert_eq!(measure_default(&out), 3);

        // A lone ESC followed by "[31m" text must not become a sequence.
        let out = fmt().format(b"\x1b\x1b[0m[31mabcdef", 5, Align::Left);
        assert_eq!(&*out, b"[3...");
    }

    #[test]
    fn preserve_policy_drops_interrupted_sequences() {
        let fmt = fmt().escape_policy(EscapePolicy::PreserveAndReset);
        let out = fmt.format("\x1b[3日本語テキスト".as_bytes(), 6, Align::Left);
        assert_eq!(measure_default(&out), 6);
        assert!(!out.starts_with(b"\x1b[3"));
    }

    #[test]
    fn format_into_appends() {
        let mut out = b"| ".to_vec();
        fmt().format_into(&mut out, b"x", 3, Align::Center);
        assert_eq!(out, b"|  x ");
    }

    #[test]
    fn already_formatted_is_stable() {
        for target in 0..12 {
            for align in [Align::Left, Align::Center, Align::Right] {
                let once = fmt().format("Supercalifragilistic 日本".as_bytes(), target, align);
                let twice = fmt().format(&once, target, align);
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn free_helpers() {
        assert_eq!(&*pad(b"ab", 4, Align::Left, &TableWidth), b"ab  ");
        assert_eq!(&*pad(b"abcdef", 4, Align::Left, &TableWidth), b"abcdef");
        assert_eq!(&*truncate(b"abcdef", 5, &TableWidth), b"ab...");
        assert_eq!(&*truncate(b"abc", 5, &TableWidth), b"abc");
        assert_eq!(pad_str("x", 3, Align::Right), "  x");
        assert_eq!(truncate_str("\x1b[1mlong text\x1b[0m", 6), "lon...");
    }
}
