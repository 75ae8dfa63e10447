//! Table cells.
//!
//! A [`Cell`] is the canonical text of one table entry, fixed when the value
//! is added. Numbers, booleans and other typed values are converted exactly
//! once here, never again at render time.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

use crate::measure::measure;
use crate::width::WidthFn;

/// One table entry as an owned byte buffer.
///
/// The bytes are usually UTF-8 text, possibly with embedded escape
/// sequences, but any bytes are accepted.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Cell(Box<[u8]>);

impl Cell {
    /// Creates a cell from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Cell(bytes.into().into_boxed_slice())
    }

    /// An empty cell.
    pub fn empty() -> Self {
        Cell::default()
    }

    /// Creates a cell from any `Display` value.
    ///
    /// This is the fallback for types without a dedicated conversion.
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Cell::from(value.to_string())
    }

    /// The cell content.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The cell content as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// The cell content as text, replacing invalid UTF-8.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a cell with no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display width of the content under `width_fn`.
    pub fn width(&self, width_fn: &dyn WidthFn) -> usize {
        measure(&self.0, width_fn)
    }
}

impl AsRef<[u8]> for Cell {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({:?})", self.to_string_lossy())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::new(value.as_bytes())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::new(value.into_bytes())
    }
}

impl From<&String> for Cell {
    fn from(value: &String) -> Self {
        Cell::from(value.as_str())
    }
}

impl From<Cow<'_, str>> for Cell {
    fn from(value: Cow<'_, str>) -> Self {
        Cell::from(value.into_owned())
    }
}

impl From<&[u8]> for Cell {
    fn from(value: &[u8]) -> Self {
        Cell::new(value)
    }
}

impl<const N: usize> From<&[u8; N]> for Cell {
    fn from(value: &[u8; N]) -> Self {
        Cell::new(&value[..])
    }
}

impl From<Vec<u8>> for Cell {
    fn from(value: Vec<u8>) -> Self {
        Cell::new(value)
    }
}

impl From<&Cell> for Cell {
    fn from(value: &Cell) -> Self {
        value.clone()
    }
}

impl From<char> for Cell {
    fn from(value: char) -> Self {
        let mut buf = [0u8; 4];
        Cell::from(&*value.encode_utf8(&mut buf))
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::from(if value { "true" } else { "false" })
    }
}

macro_rules! cell_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Cell {
                fn from(value: $ty) -> Self {
                    Cell::from(value.to_string())
                }
            }
        )*
    };
}

// Integers print in decimal. Floats print the shortest text that round-trips,
// never in exponent form.
cell_from_display!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T> From<Option<T>> for Cell
where
    T: Into<Cell>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl From<&Value> for Cell {
    /// Strings are taken verbatim, `null` is empty, everything else uses its
    /// JSON text.
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Cell::empty(),
            Value::String(s) => Cell::from(s.as_str()),
            Value::Bool(b) => Cell::from(*b),
            Value::Number(n) => Cell::from(n.to_string()),
            other => Cell::from(other.to_string()),
        }
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        Cell::from(&value)
    }
}

/// Builds a `Vec<Cell>` from values of mixed types.
///
/// ```rust
/// use gridline::{row, Cell};
///
/// let cells = row!["Alice", 30, 1.5, true];
/// assert_eq!(cells, vec![
///     Cell::from("Alice"),
///     Cell::from("30"),
///     Cell::from("1.5"),
///     Cell::from("true"),
/// ]);
/// ```
#[macro_export]
macro_rules! row {
    () => {
        ::std::vec::Vec::<$crate::Cell>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Cell::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::width::TableWidth;

    #[test]
    fn text_is_copied() {
        let mut source = String::from("abc");
        let cell = Cell::from(&source);
        source.push('d');
        assert_eq!(cell.as_bytes(), b"abc");
    }

    #[test]
    fn integers() {
        assert_eq!(Cell::from(42).as_str(), Some("42"));
        assert_eq!(Cell::from(-7i64).as_str(), Some("-7"));
        assert_eq!(Cell::from(u64::MAX).as_str(), Some("18446744073709551615"));
    }

    #[test]
    fn floats_use_shortest_form() {
        assert_eq!(Cell::from(3.0).as_str(), Some("3"));
        assert_eq!(Cell::from(0.1).as_str(), Some("0.1"));
        assert_eq!(Cell::from(2.5f32).as_str(), Some("2.5"));
        assert_eq!(Cell::from(1e21).as_str(), Some("1000000000000000000000"));
    }

    #[test]
    fn booleans_and_chars() {
        assert_eq!(Cell::from(true).as_str(), Some("true"));
        assert_eq!(Cell::from(false).as_str(), Some("false"));
        assert_eq!(Cell::from('中').as_str(), Some("中"));
    }

    #[test]
    fn bytes_are_kept_verbatim() {
        let cell = Cell::from(&[0xFF, b'a'][..]);
        assert_eq!(cell.as_bytes(), &[0xFF, b'a']);
        assert_eq!(cell.as_str(), None);
        assert_eq!(cell.to_string_lossy(), "\u{FFFD}a");
    }

    #[test]
    fn display_fallback() {
        struct Point(i32, i32);
        impl fmt::Display for Point {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "({}, {})", self.0, self.1)
            }
        }
        assert_eq!(Cell::display(&Point(1, 2)).as_str(), Some("(1, 2)"));
    }

    #[test]
    fn options() {
        assert_eq!(Cell::from(Some(5)).as_str(), Some("5"));
        assert!(Cell::from(None::<i32>).is_empty());
    }

    #[test]
    fn json_values() {
        let value = serde_json::json!({"s": "text", "n": 12.5, "b": false, "z": null, "a": [1, 2]});
        assert_eq!(Cell::from(&value["s"]).as_str(), Some("text"));
        assert_eq!(Cell::from(&value["n"]).as_str(), Some("12.5"));
        assert_eq!(Cell::from(&value["b"]).as_str(), Some("false"));
        assert!(Cell::from(&value["z"]).is_empty());
        assert_eq!(Cell::from(&value["a"]).as_str(), Some("[1,2]"));
    }

    #[test]
    fn width_ignores_escapes() {
        assert_eq!(Cell::from("\x1b[31mRed\x1b[0m").width(&TableWidth), 3);
        assert_eq!(Cell::from("日本語").width(&TableWidth), 6);
    }

    #[test]
    fn row_macro() {
        let cells = row!["x", 1u8, 'y', Some("z")];
        assert_eq!(cells.len(), 4);
        assert_eq!(cells[3].as_str(), Some("z"));
        assert!(row![].is_empty());
    }
}
