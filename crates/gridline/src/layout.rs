//! Column width resolution and line emission.
//!
//! [`ColumnLayout`] resolves one width per column from the header and data
//! cells. The `write_*` functions then emit border lines and row lines into a
//! byte buffer using those widths.
//!
//! Every emitted line has the same display width, [`ColumnLayout::line_width`]:
//! one border character on the left, then for each column a space, the cell,
//! a space and a border character.

use crate::cell::Cell;
use crate::format::CellFormatter;
use crate::measure::measure;
use crate::style::BorderChars;
use crate::types::Align;
use crate::width::WidthFn;

/// Resolved widths for all columns of a table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    widths: Vec<usize>,
}

impl ColumnLayout {
    /// Resolves column widths from `headers` and `rows`.
    ///
    /// Each column is as wide as its widest cell, header included. Cells
    /// beyond the header count are ignored and missing cells count as empty.
    /// A positive `max_widths[i]` clips column `i`; zero or a missing entry
    /// leaves it unbounded.
    pub fn compute<R>(
        headers: &[Cell],
        rows: &[R],
        max_widths: &[usize],
        width_fn: &dyn WidthFn,
    ) -> Self
    where
        R: AsRef<[Cell]>,
    {
        let mut widths: Vec<usize> = headers
            .iter()
            .map(|header| measure(header.as_bytes(), width_fn))
            .collect();

        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row.as_ref()) {
                *width = (*width).max(measure(cell.as_bytes(), width_fn));
            }
        }

        for (width, &max) in widths.iter_mut().zip(max_widths) {
            if max > 0 {
                *width = (*width).min(max);
            }
        }

        ColumnLayout { widths }
    }

    /// Layout with explicit widths.
    pub fn from_widths(widths: Vec<usize>) -> Self {
        ColumnLayout { widths }
    }

    /// Width of each column, in display columns.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// Width of column `index`.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.widths.get(index).copied()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// True when there are no columns.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Display width of every emitted line, newline excluded.
    pub fn line_width(&self) -> usize {
        1 + self.widths.iter().map(|w| w + 3).sum::<usize>()
    }

    /// Upper bound on the bytes of one emitted line, used to size buffers.
    pub(crate) fn line_capacity(&self) -> usize {
        // Box-drawing glyphs are at most three bytes, cells roughly one per
        // column plus escapes.
        self.line_width() * 3 + 16
    }
}

/// Which horizontal border line to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Above the header.
    Top,
    /// Between the header and the data rows.
    Middle,
    /// Below the last row.
    Bottom,
}

impl LineKind {
    /// The (start, separator, end) characters of this line.
    fn joints(self, chars: &BorderChars) -> (char, char, char) {
        match self {
            LineKind::Top => (chars.top_left, chars.top_tee, chars.top_right),
            LineKind::Middle => (chars.left_tee, chars.cross, chars.right_tee),
            LineKind::Bottom => (chars.bottom_left, chars.bottom_tee, chars.bottom_right),
        }
    }
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

/// Appends a border line, newline included.
pub fn write_border(out: &mut Vec<u8>, layout: &ColumnLayout, chars: &BorderChars, kind: LineKind) {
    let (start, separator, end) = kind.joints(chars);
    let mut fill = [0u8; 4];
    let fill = chars.horizontal.encode_utf8(&mut fill).as_bytes();

    push_char(out, start);
    for (i, &width) in layout.widths().iter().enumerate() {
        if i > 0 {
            push_char(out, separator);
        }
        for _ in 0..width + 2 {
            out.extend_from_slice(fill);
        }
    }
    push_char(out, end);
    out.push(b'\n');
}

/// Appends one row line, newline included.
///
/// `cells` shorter than the layout are completed with empty cells. Columns
/// without an entry in `aligns` are left-aligned.
pub fn write_row(
    out: &mut Vec<u8>,
    layout: &ColumnLayout,
    cells: &[Cell],
    aligns: &[Align],
    formatter: &CellFormatter<'_>,
    vertical: char,
) {
    push_char(out, vertical);
    for (i, &width) in layout.widths().iter().enumerate() {
        let cell = cells.get(i).map(Cell::as_bytes).unwrap_or_default();
        let align = aligns.get(i).copied().unwrap_or_default();
        out.push(b' ');
        formatter.format_into(out, cell, width, align);
        out.push(b' ');
        push_char(out, vertical);
    }
    out.push(b'\n');
}
