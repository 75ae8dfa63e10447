//! The [`Table`] type.
//!
//! A table owns its header and row cells and the presentation settings for
//! each column. Rendering takes `&self`, so one table can be rendered from
//! many threads at once.
//!
//! # Example
//!
//! ```rust
//! use gridline::{row, Align, BorderStyle, Table};
//!
//! let mut table = Table::new(["Name", "Age"]);
//! table.add_row(row!["Alice", 30]);
//! table.add_row(row!["Bob", 7]);
//! table.set_style(BorderStyle::Ascii).set_align(1, Align::Right);
//!
//! assert_eq!(
//!     table.to_string(),
//!     "\
//! +-------+-----+
//! | Name  | Age |
//! +-------+-----+
//! | Alice |  30 |
//! | Bob   |   7 |
//! +-------+-----+
//! "
//! );
//! ```

use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use crate::cell::Cell;
use crate::config::{TableConfig, WidthMode};
use crate::format::CellFormatter;
use crate::layout::{write_border, write_row, ColumnLayout, LineKind};
use crate::pool;
use crate::style::BorderChars;
use crate::types::{Align, EscapePolicy};
use crate::width::{TableWidth, UnicodeWidth, WidthFn};

/// A table of text cells with per-column alignment and width limits.
#[derive(Clone)]
pub struct Table {
    headers: Vec<Cell>,
    rows: Vec<Vec<Cell>>,
    style: BorderChars,
    aligns: Vec<Align>,
    max_widths: Vec<usize>,
    width_fn: Arc<dyn WidthFn>,
    escapes: EscapePolicy,
}

impl Table {
    /// Creates a table with the given column headers.
    ///
    /// The header count fixes the number of columns.
    pub fn new<I>(headers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        let headers: Vec<Cell> = headers.into_iter().map(Into::into).collect();
        let columns = headers.len();
        Table {
            headers,
            rows: Vec::new(),
            style: BorderChars::default(),
            aligns: vec![Align::default(); columns],
            max_widths: vec![0; columns],
            width_fn: Arc::new(TableWidth),
            escapes: EscapePolicy::default(),
        }
    }

    /// Appends a row.
    ///
    /// Values past the header count are dropped and missing values become
    /// empty cells. An empty row is ignored.
    pub fn add_row<I>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        let columns = self.headers.len();
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return self;
        }
        let mut row: Vec<Cell> = values.take(columns).map(Into::into).collect();
        row.resize_with(columns, Cell::empty);
        self.rows.push(row);
        self
    }

    /// Appends each row of `rows`.
    pub fn add_rows<R, I>(&mut self, rows: R) -> &mut Self
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator,
        I::Item: Into<Cell>,
    {
        for row in rows {
            self.add_row(row);
        }
        self
    }

    /// Replaces each header cell with `f(header)`.
    pub fn map_headers<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&Cell) -> Cell,
    {
        self.headers = self.headers.iter().map(f).collect();
        self
    }

    /// Replaces every cell, headers included, with `f(cell)`.
    pub fn map_cells<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(&Cell) -> Cell,
    {
        for cell in self.headers.iter_mut().chain(self.rows.iter_mut().flatten()) {
            *cell = f(cell);
        }
        self
    }

    /// Sets the alignment of column `column`. Out-of-range columns are ignored.
    pub fn set_align(&mut self, column: usize, align: Align) -> &mut Self {
        if let Some(slot) = self.aligns.get_mut(column) {
            *slot = align;
        }
        self
    }

    /// Sets the maximum width of column `column`; 0 removes the limit.
    /// Out-of-range columns are ignored.
    pub fn set_max_width(&mut self, column: usize, max_width: usize) -> &mut Self {
        if let Some(slot) = self.max_widths.get_mut(column) {
            *slot = max_width;
        }
        self
    }

    /// Replaces the width function used for measuring and formatting.
    pub fn set_width_fn(&mut self, width_fn: impl WidthFn + 'static) -> &mut Self {
        self.width_fn = Arc::new(width_fn);
        self
    }

    /// Sets the border characters, from a [`BorderStyle`](crate::BorderStyle)
    /// or a custom [`BorderChars`].
    pub fn set_style(&mut self, style: impl Into<BorderChars>) -> &mut Self {
        self.style = style.into();
        self
    }

    /// Sets how escape sequences are treated in truncated cells.
    pub fn set_escape_policy(&mut self, policy: EscapePolicy) -> &mut Self {
        self.escapes = policy;
        self
    }

    /// Applies every setting present in `config`.
    pub fn apply_config(&mut self, config: &TableConfig) -> &mut Self {
        if let Some(style) = config.style {
            self.set_style(style);
        }
        if let Some(policy) = config.escape_policy {
            self.set_escape_policy(policy);
        }
        match config.width {
            Some(WidthMode::Table) => {
                self.set_width_fn(TableWidth);
            }
            Some(WidthMode::Unicode) => {
                self.set_width_fn(UnicodeWidth);
            }
            None => {}
        }
        for (column, settings) in config.columns.iter().enumerate() {
            if let Some(align) = settings.align {
                self.set_align(column, align);
            }
            if let Some(max_width) = settings.max_width {
                self.set_max_width(column, max_width);
            }
        }
        self
    }

    /// The header cells.
    pub fn headers(&self) -> &[Cell] {
        &self.headers
    }

    /// The data rows, each exactly [`column_count`](Self::column_count) long.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The current border characters.
    pub fn style(&self) -> &BorderChars {
        &self.style
    }

    /// Per-column alignment.
    pub fn aligns(&self) -> &[Align] {
        &self.aligns
    }

    /// Per-column maximum widths (0 = unbounded).
    pub fn max_widths(&self) -> &[usize] {
        &self.max_widths
    }

    /// The escape policy applied when truncating.
    pub fn escape_policy(&self) -> EscapePolicy {
        self.escapes
    }

    /// Resolves the column widths the next render would use.
    pub fn layout(&self) -> ColumnLayout {
        ColumnLayout::compute(
            &self.headers,
            &self.rows,
            &self.max_widths,
            &*self.width_fn,
        )
    }

    /// Column widths the next render would use.
    pub fn column_widths(&self) -> Vec<usize> {
        self.layout().widths().to_vec()
    }

    fn formatter(&self) -> CellFormatter<'_> {
        CellFormatter::new(&*self.width_fn).escape_policy(self.escapes)
    }

    fn resolve(&self) -> Option<ColumnLayout> {
        if self.headers.is_empty() {
            return None;
        }
        let layout = self.layout();
        tracing::debug!(
            columns = layout.len(),
            rows = self.rows.len(),
            widths = ?layout.widths(),
            "rendering table"
        );
        Some(layout)
    }

    /// Appends the rendered table to `out`.
    ///
    /// A table without headers renders as nothing.
    pub fn render_into(&self, out: &mut Vec<u8>) {
        let Some(layout) = self.resolve() else {
            return;
        };
        out.reserve(layout.line_capacity() * (self.rows.len() + 4));

        let formatter = self.formatter();
        let vertical = self.style.vertical;
        write_border(out, &layout, &self.style, LineKind::Top);
        write_row(out, &layout, &self.headers, &self.aligns, &formatter, vertical);
        write_border(out, &layout, &self.style, LineKind::Middle);
        for row in &self.rows {
            write_row(out, &layout, row, &self.aligns, &formatter, vertical);
        }
        write_border(out, &layout, &self.style, LineKind::Bottom);
    }

    /// Renders the table into a new buffer.
    pub fn render(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.render_into(&mut out);
        out
    }

    /// Renders into a pooled buffer and writes it with a single `write_all`.
    ///
    /// Returns the number of bytes written.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<u64> {
        let mut buf = pool::global().checkout();
        self.render_into(&mut buf);
        writer.write_all(&buf)?;
        Ok(buf.len() as u64)
    }

    /// Writes the table one line at a time through a single scratch buffer.
    ///
    /// Output is identical to [`render`](Self::render) but peak memory is
    /// bounded by one line. Lines already written stay written if the
    /// writer fails.
    pub fn stream_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<u64> {
        let Some(layout) = self.resolve() else {
            return Ok(0);
        };
        let formatter = self.formatter();
        let vertical = self.style.vertical;
        let mut line = pool::global().checkout_with_capacity(layout.line_capacity());
        let mut written = 0;

        write_border(&mut line, &layout, &self.style, LineKind::Top);
        written += flush_line(writer, &mut line)?;
        write_row(&mut line, &layout, &self.headers, &self.aligns, &formatter, vertical);
        written += flush_line(writer, &mut line)?;
        write_border(&mut line, &layout, &self.style, LineKind::Middle);
        written += flush_line(writer, &mut line)?;
        for row in &self.rows {
            write_row(&mut line, &layout, row, &self.aligns, &formatter, vertical);
            written += flush_line(writer, &mut line)?;
        }
        write_border(&mut line, &layout, &self.style, LineKind::Bottom);
        written += flush_line(writer, &mut line)?;
        Ok(written)
    }

    /// Writes the table to stdout.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_to(&mut lock)?;
        lock.flush()
    }
}

fn flush_line<W: Write + ?Sized>(writer: &mut W, line: &mut Vec<u8>) -> io::Result<u64> {
    writer.write_all(line)?;
    let len = line.len() as u64;
    line.clear();
    Ok(len)
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = pool::global().checkout();
        self.render_into(&mut buf);
        f.write_str(&String::from_utf8_lossy(&buf))
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("headers", &self.headers)
            .field("rows", &self.rows.len())
            .field("style", &self.style)
            .field("aligns", &self.aligns)
            .field("max_widths", &self.max_widths)
            .field("escapes", &self.escapes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnConfig;
    use crate::measure::measure_default;
    use crate::row;
    use crate::style::BorderStyle;

    fn name_age() -> Table {
        let mut table = Table::new(["Name", "Age"]);
        table.add_row(["Alice", "30"]).add_row(["Bob", "7"]);
        table
    }

    fn text(table: &Table) -> String {
        String::from_utf8(table.render()).unwrap()
    }

    #[test]
    fn ascii_name_age() {
        let mut table = name_age();
        table.set_style(BorderStyle::Ascii);
        assert_eq!(table.column_widths(), vec![5, 3]);

        let out = text(&table);
        assert_eq!(
            out,
            "+-------+-----+\n\
             | Name  | Age |\n\
             +-------+-----+\n\
             | Alice | 30  |\n\
             | Bob   | 7   |\n\
             +-------+-----+\n"
        );
        for line in out.lines() {
            assert_eq!(line.len(), 15);
        }
    }

    #[test]
    fn single_style_by_default() {
        let out = text(&name_age());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "┌───────┬─────┐");
        assert_eq!(lines[1], "│ Name  │ Age │");
        assert_eq!(lines[2], "├───────┼─────┤");
        assert_eq!(lines[5], "└───────┴─────┘");
    }

    #[test]
    fn none_style_keeps_line_width() {
        let mut table = name_age();
        table.set_style(BorderStyle::None);
        let out = text(&table);
        assert_eq!(out.lines().next(), Some(" ".repeat(15).as_str()));
        assert!(out.lines().all(|line| line.chars().count() == 15));
    }

    #[test]
    fn cjk_column() {
        let mut table = Table::new(["Word"]);
        table.add_row(["日本語"]);
        assert_eq!(table.column_widths(), vec![6]);
        assert!(text(&table).contains("│ 日本語 │"));
    }

    #[test]
    fn escapes_pass_through() {
        let mut table = Table::new(["Color", "x"]);
        table.add_row(["\x1b[31mRed\x1b[0m", "1"]);
        assert_eq!(table.column_widths(), vec![5, 1]);
        assert!(text(&table).contains("│ \x1b[31mRed\x1b[0m   │"));
    }

    #[test]
    fn max_width_truncates() {
        let mut table = Table::new(["Word"]);
        table.add_row(["Supercalifragilistic"]).set_max_width(0, 5);
        assert_eq!(table.column_widths(), vec![5]);
        let out = text(&table);
        assert!(out.contains("│ Su... │"));
        // Header "Word" fits within 5 columns.
        assert!(out.contains("│ Word  │"));
    }

    #[test]
    fn rows_are_normalized_to_header_length() {
        let mut table = Table::new(["a", "b"]);
        table.add_row(["1"]).add_row(["1", "2", "3"]);
        assert_eq!(table.rows()[0], vec![Cell::from("1"), Cell::empty()]);
        assert_eq!(table.rows()[1], vec![Cell::from("1"), Cell::from("2")]);
    }

    #[test]
    fn empty_rows_are_ignored() {
        let mut table = Table::new(["a"]);
        table.add_row(Vec::<Cell>::new());
        assert!(table.is_empty());
    }

    #[test]
    fn mixed_values_are_converted_once() {
        let mut table = Table::new(["s", "i", "f", "b"]);
        table.add_row(row!["x", -3, 2.5, true]);
        let cells: Vec<_> = table.rows()[0].iter().map(|c| c.as_str().unwrap()).collect();
        assert_eq!(cells, vec!["x", "-3", "2.5", "true"]);
    }

    #[test]
    fn out_of_range_settings_are_ignored() {
        let mut table = name_age();
        let before = table.render();
        table.set_align(9, Align::Right).set_max_width(9, 1);
        assert_eq!(table.render(), before);
    }

    #[test]
    fn center_and_right_alignment() {
        let mut table = Table::new(["Header"]);
        table.add_row(["ab"]).set_style(BorderStyle::Ascii);
        table.set_align(0, Align::Center);
        assert!(text(&table).contains("|   ab   |"));
        table.set_align(0, Align::Right);
        assert!(text(&table).contains("|     ab |"));
    }

    #[test]
    fn no_headers_renders_nothing() {
        let table = Table::new(Vec::<&str>::new());
        assert!(table.render().is_empty());
        assert_eq!(table.to_string(), "");
        assert_eq!(table.stream_to(&mut Vec::new()).unwrap(), 0);
    }

    #[test]
    fn custom_width_fn() {
        let mut table = Table::new(["ab"]);
        table.set_width_fn(|_: char| 2usize);
        assert_eq!(table.column_widths(), vec![4]);
    }

    #[test]
    fn output_modes_agree() {
        let mut table = name_age();
        table.add_row(row!["日本語テキスト", "\x1b[1m99\x1b[0m"]);
        table.set_max_width(0, 6).set_style(BorderStyle::Rounded);

        let rendered = table.render();
        assert_eq!(table.to_string().as_bytes(), &rendered[..]);

        let mut written = Vec::new();
        assert_eq!(table.write_to(&mut written).unwrap(), rendered.len() as u64);
        assert_eq!(written, rendered);

        let mut streamed = Vec::new();
        assert_eq!(table.stream_to(&mut streamed).unwrap(), rendered.len() as u64);
        assert_eq!(streamed, rendered);
    }

    #[test]
    fn every_line_measures_the_same() {
        let mut table = Table::new(["Name", "Note"]);
        table
            .add_row(["\x1b[32mok\x1b[0m", "日本"])
            .add_row(["x", "Supercalifragilistic"])
            .set_max_width(1, 7)
            .set_style(BorderStyle::Double);
        let width = table.layout().line_width();
        for line in text(&table).lines() {
            assert_eq!(measure_default(line.as_bytes()), width);
        }
    }

    #[test]
    fn apply_config_sets_everything() {
        let config = TableConfig {
            style: Some(BorderStyle::Ascii),
            columns: vec![
                ColumnConfig {
                    align: Some(Align::Right),
                    max_width: Some(4),
                },
                ColumnConfig::default(),
                ColumnConfig {
                    align: Some(Align::Center),
                    max_width: None,
                },
            ],
            escape_policy: Some(EscapePolicy::PreserveAndReset),
            width: Some(WidthMode::Unicode),
        };
        let mut table = name_age();
        table.apply_config(&config);
        assert_eq!(table.style(), &BorderStyle::Ascii.chars());
        assert_eq!(table.aligns(), &[Align::Right, Align::Left]);
        assert_eq!(table.max_widths(), &[4, 0]);
        assert_eq!(table.escape_policy(), EscapePolicy::PreserveAndReset);
        assert_eq!(table.column_widths(), vec![4, 3]);
    }

    #[test]
    fn map_cells_and_headers() {
        let mut table = Table::new(["\x1b[1ma\x1b[0m"]);
        table.add_row(["\x1b[31mx\x1b[0m"]);
        table.map_cells(|cell| Cell::new(crate::ansi::strip_escapes(cell.as_bytes())));
        assert_eq!(table.headers()[0].as_str(), Some("a"));
        assert_eq!(table.rows()[0][0].as_str(), Some("x"));

        table.map_headers(|h| Cell::from(h.to_string().to_uppercase()));
        assert_eq!(table.headers()[0].as_str(), Some("A"));
        assert_eq!(table.rows()[0][0].as_str(), Some("x"));
    }

    #[test]
    fn table_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Table>();
    }

    #[test]
    fn write_errors_surface() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let table = name_age();
        assert_eq!(
            table.write_to(&mut Closed).unwrap_err().kind(),
            io::ErrorKind::BrokenPipe
        );
        assert!(table.stream_to(&mut Closed).is_err());
    }
}
