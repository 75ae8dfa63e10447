//! Serializable table configuration.
//!
//! A [`TableConfig`] carries everything a table can be configured with apart
//! from its data, so presentation can live in a file next to the program:
//!
//! ```yaml
//! style: rounded
//! escape_policy: preserve-and-reset
//! width: unicode
//! columns:
//!   - align: left
//!     max_width: 24
//!   - align: right
//! ```
//!
//! Apply it with [`Table::apply_config`](crate::Table::apply_config).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::style::BorderStyle;
use crate::types::{Align, EscapePolicy};

/// Which width function a configured table measures with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidthMode {
    /// The built-in range tables.
    #[default]
    Table,
    /// Unicode East Asian Width data.
    Unicode,
}

/// Settings for one column. Omitted fields keep the table's current value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    /// Maximum width; 0 removes the limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<usize>,
}

/// Table presentation settings.
///
/// Every field is optional. `columns[i]` applies to column `i`; entries past
/// the table's column count are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<BorderStyle>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escape_policy: Option<EscapePolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<WidthMode>,
}

impl TableConfig {
    /// Parses a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a file, as JSON when the extension is `.json` and as YAML
    /// otherwise.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Serializes to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
