//! Common imports for building tables.
//!
//! ```rust
//! use gridline::prelude::*;
//!
//! let mut table = Table::new(["a", "b"]);
//! table.add_row(row![1, true]).set_style(BorderStyle::Ascii);
//! assert_eq!(table.column_widths(), vec![1, 4]);
//! ```

pub use crate::row;
pub use crate::{Align, BorderStyle, Cell, EscapePolicy, GridError, Table, TableConfig};
