//! Building tables from CSV and JSON data.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

use serde_json::Value;

use crate::cell::Cell;
use crate::error::Result;
use crate::table::Table;

impl Table {
    /// Reads comma-separated data. The first record supplies the headers.
    ///
    /// Records may have differing lengths; they are normalised like any other
    /// row. Fields are taken as raw bytes, so non-UTF-8 input is accepted.
    ///
    /// ```rust
    /// use gridline::Table;
    ///
    /// let table = Table::from_csv_reader("name,qty\napple,3\npear,10\n".as_bytes()).unwrap();
    /// assert_eq!(table.column_count(), 2);
    /// assert_eq!(table.len(), 2);
    /// ```
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Table> {
        Self::from_delimited_reader(reader, b',')
    }

    /// Like [`from_csv_reader`](Self::from_csv_reader) with a custom field
    /// delimiter, e.g. `b'\t'`.
    pub fn from_delimited_reader<R: Read>(reader: R, delimiter: u8) -> Result<Table> {
        let mut records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader)
            .into_byte_records();

        let headers = match records.next() {
            Some(record) => record?,
            None => return Ok(Table::new(Vec::<Cell>::new())),
        };
        let mut table = Table::new(headers.iter());
        for record in records {
            let record = record?;
            table.add_row(record.iter());
        }
        tracing::debug!(
            columns = table.column_count(),
            rows = table.len(),
            "read delimited data"
        );
        Ok(table)
    }

    /// Builds a table from a JSON document.
    ///
    /// An array yields one row per element; any other value yields a single
    /// row. Nested object keys are joined with dots, headers are the sorted
    /// union of all keys, arrays are kept as JSON text and scalars at the top
    /// level land in a `value` column.
    ///
    /// ```rust
    /// use gridline::Table;
    /// use serde_json::json;
    ///
    /// let table = Table::from_json(&json!([
    ///     {"name": "Alice", "meta": {"age": 30}},
    ///     {"name": "Bob", "tags": ["x", "y"]},
    /// ]));
    /// let headers: Vec<_> = table.headers().iter().map(|h| h.to_string()).collect();
    /// assert_eq!(headers, ["meta.age", "name", "tags"]);
    /// ```
    pub fn from_json(value: &Value) -> Table {
        let (headers, rows) = flatten_json(value);
        let mut table = Table::new(headers);
        table.add_rows(rows);
        table
    }

    /// Parses `json` and builds a table with [`from_json`](Self::from_json).
    pub fn from_json_str(json: &str) -> Result<Table> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_json(&value))
    }
}

/// Flattens a JSON document into sorted headers and one cell list per row.
pub fn flatten_json(value: &Value) -> (Vec<String>, Vec<Vec<Cell>>) {
    let items: Vec<BTreeMap<String, Cell>> = match value {
        Value::Array(items) => items.iter().map(flatten_item).collect(),
        other => vec![flatten_item(other)],
    };

    let headers: Vec<String> = items
        .iter()
        .flat_map(|item| item.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rows = items
        .into_iter()
        .map(|mut item| {
            headers
                .iter()
                .map(|header| item.remove(header).unwrap_or_default())
                .collect()
        })
        .collect();

    (headers, rows)
}

fn flatten_item(value: &Value) -> BTreeMap<String, Cell> {
    let mut acc = BTreeMap::new();
    flatten_into(value, "", &mut acc);
    acc
}

fn flatten_into(value: &Value, prefix: &str, acc: &mut BTreeMap<String, Cell>) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(child, &path, acc);
            }
        }
        scalar_or_array => {
            let key = if prefix.is_empty() { "value" } else { prefix };
            acc.insert(key.to_string(), Cell::from(scalar_or_array));
        }
    }
}
