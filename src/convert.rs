//! JSON to TOML conversion for the compiled configuration
//!
//! The evaluation stage hands over the configuration as JSON text; this
//! module re-encodes it as TOML without touching the key set, nesting, or
//! scalar types. Conversion is a pure function from input text to output
//! text: either the whole document converts, or the caller gets an error
//! and nothing is written.

use serde_json::Value as Json;
use thiserror::Error;
use toml::value::{Table, Value as Toml};

/// Conversion error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The intermediate representation is not valid JSON
    #[error("Failed to parse configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration module exported something other than an object
    #[error("Configuration must be an object, got {found}")]
    NonTableRoot {
        /// What the root value actually was
        found: &'static str,
    },
    /// TOML has no representation for null
    #[error("TOML cannot represent null; remove `{path}` or give it a value")]
    Null {
        /// Key path of the offending value (e.g. `install.cache.dir`)
        path: String,
    },
    /// TOML encoding failed
    #[error("Failed to encode TOML: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Convert JSON text into TOML text.
///
/// The root value must be a JSON object; it becomes the TOML document's
/// top-level table. Nested objects become sub-tables, arrays become TOML
/// arrays (arrays of objects become arrays of tables), and scalars keep
/// their type. `null` anywhere in the document is an error rather than a
/// silently dropped key.
///
/// Output is deterministic: the same input text always produces the same
/// output bytes.
pub fn json_to_toml(input: &str) -> Result<String, ConvertError> {
    let root: Json = serde_json::from_str(input)?;
    let table = match root {
        Json::Object(map) => convert_table(map, "")?,
        other => {
            return Err(ConvertError::NonTableRoot {
                found: kind_name(&other),
            })
        }
    };

    let document = Toml::Table(table);
    Ok(toml::to_string_pretty(&document)?)
}

/// Convert a JSON object into a TOML table.
///
/// TOML requires plain values to appear before sub-tables within a table,
/// so entries are emitted in two groups (values, then tables and arrays of
/// tables), preserving relative order within each group.
fn convert_table(map: serde_json::Map<String, Json>, path: &str) -> Result<Table, ConvertError> {
    let (tables, values): (Vec<_>, Vec<_>) = map.into_iter().partition(|(_, v)| is_table_like(v));

    let mut table = Table::new();
    for (key, value) in values.into_iter().chain(tables) {
        let child_path = join_path(path, &key);
        table.insert(key, convert_value(value, &child_path)?);
    }
    Ok(table)
}

/// Convert a single JSON value into a TOML value.
fn convert_value(value: Json, path: &str) -> Result<Toml, ConvertError> {
    match value {
        Json::Null => Err(ConvertError::Null {
            path: path.to_string(),
        }),
        Json::Bool(b) => Ok(Toml::Boolean(b)),
        Json::Number(n) => {
            // TOML integers are i64; anything outside that range falls
            // back to a float, as does any fractional number
            if let Some(i) = n.as_i64() {
                Ok(Toml::Integer(i))
            } else {
                Ok(Toml::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        Json::String(s) => Ok(Toml::String(s)),
        Json::Array(items) => {
            let mut array = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                array.push(convert_value(item, &format!("{}[{}]", path, index))?);
            }
            Ok(Toml::Array(array))
        }
        Json::Object(map) => Ok(Toml::Table(convert_table(map, path)?)),
    }
}

/// Whether a value renders as a TOML table or array of tables.
///
/// These must be emitted after plain values at the same nesting level.
fn is_table_like(value: &Json) -> bool {
    match value {
        Json::Object(_) => true,
        Json::Array(items) => !items.is_empty() && items.iter().all(Json::is_object),
        _ => false,
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn kind_name(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
