//! Route parser: converts raw YAML/JSON/TOML text into [`RouteSchema`].

use super::schema::RouteSchema;
use crate::error::CompileError;

/// Supported route document formats.
#[derive(Debug, Clone, Copy)]
pub enum DslFormat {
    /// YAML format (`.yaml` / `.yml`).
    Yaml,
    /// JSON format (`.json`).
    Json,
    /// TOML format (`.toml`).
    Toml,
}

/// Parse a route document.
///
/// YAML and TOML are read into a [`serde_json::Value`] first so that all
/// three formats go through the same deserializer.
pub fn parse_route(content: &str, format: DslFormat) -> Result<RouteSchema, CompileError> {
    let value = match format {
        DslFormat::Yaml => serde_saphyr::from_str::<serde_json::Value>(content)
            .map_err(|e| CompileError::DslParseError(e.to_string()))?,
        DslFormat::Json => serde_json::from_str::<serde_json::Value>(content)
            .map_err(|e| CompileError::DslParseError(e.to_string()))?,
        DslFormat::Toml => {
            let toml_val: toml::Value = toml::from_str(content)
                .map_err(|e| CompileError::DslParseError(e.to_string()))?;
            toml_value_to_json(toml_val)
        }
    };
    serde_json::from_value(value).map_err(|e| CompileError::DslParseError(e.to_string()))
}

/// Convert a [`toml::Value`] into a [`serde_json::Value`].
///
/// TOML has no null; `Datetime` values are stringified.
fn toml_value_to_json(val: toml::Value) -> serde_json::Value {
    match val {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_value_to_json).collect())
        }
        toml::Value::Table(tbl) => {
            let map: serde_json::Map<String, serde_json::Value> = tbl
                .into_iter()
                .map(|(k, v)| (k, toml_value_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
    }
}
