//! # Gridline - Display-Width Aware Tables
//!
//! `gridline` renders rows of mixed values as bordered, aligned text for the
//! terminal. Column widths are measured the way a terminal draws text: CJK
//! and emoji take two cells, combining marks take none, and embedded colour
//! escape sequences take no room at all.
//!
//! ## Core Concepts
//!
//! - [`Table`]: headers, rows and per-column settings; renders with `&self`
//! - [`Cell`]: one entry, converted to text once when the row is added
//! - [`BorderStyle`] / [`BorderChars`]: the eleven glyphs a border is drawn with
//! - [`WidthFn`]: the code point width capability, [`TableWidth`] by default
//! - [`measure`]: the single width measurement every layout decision uses
//! - [`TableConfig`]: serde-loadable presentation settings
//!
//! ## Quick Start
//!
//! ```rust
//! use gridline::{row, Align, BorderStyle, Table};
//!
//! let mut table = Table::new(["Item", "Qty", "Note"]);
//! table
//!     .add_row(row!["Widget", 4, "\x1b[32min stock\x1b[0m"])
//!     .add_row(row!["Gadget (large)", 12, "日本から"])
//!     .set_style(BorderStyle::Rounded)
//!     .set_align(1, Align::Right)
//!     .set_max_width(0, 10);
//!
//! assert_eq!(table.column_widths(), vec![10, 3, 8]);
//! print!("{table}");
//! ```
//!
//! ## Measuring and Fitting Text
//!
//! The building blocks are public for callers laying out text themselves:
//!
//! ```rust
//! use gridline::format::{pad_str, truncate_str};
//! use gridline::{display_width, Align};
//!
//! assert_eq!(display_width("\x1b[1m日本\x1b[0m"), 4);
//! assert_eq!(truncate_str("Supercalifragilistic", 5), "Su...");
//! assert_eq!(pad_str("7", 3, Align::Right), "  7");
//! ```
//!
//! ## Configuration Files
//!
//! ```rust
//! use gridline::{Table, TableConfig};
//!
//! let config = TableConfig::from_yaml(r#"
//! style: ascii
//! columns:
//!   - align: right
//! "#).unwrap();
//!
//! let mut table = Table::new(["n"]);
//! table.add_row([42]).apply_config(&config);
//! assert_eq!(table.to_string(), "+----+\n|  n |\n+----+\n| 42 |\n+----+\n");
//! ```

pub mod ansi;
mod cell;
pub mod config;
mod error;
pub mod format;
mod ingest;
pub mod layout;
pub mod measure;
pub mod pool;
pub mod prelude;
pub mod style;
mod table;
mod types;
pub mod width;

// Error type
pub use error::{GridError, Result};

// Data model
pub use cell::Cell;
pub use table::Table;
pub use types::{Align, EscapePolicy};

// Measurement
pub use measure::{display_width, measure, measure_default};
pub use width::{char_width, TableWidth, UnicodeWidth, WidthFn};

// Formatting and layout
pub use format::CellFormatter;
pub use layout::{ColumnLayout, LineKind};
pub use style::{BorderChars, BorderPosition, BorderStyle};

// Configuration and ingestion
pub use config::{ColumnConfig, TableConfig, WidthMode};
pub use ingest::flatten_json;
