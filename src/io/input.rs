use anyhow::{Context, Result};
use serde_json::Value;

use crate::domain::{FormTemplate, parse_form_template};

use super::DocumentFormat;

/// Parse structured data in any supported format into a `serde_json::Value`.
pub fn parse_document_str(contents: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str::<Value>(contents).with_context(|| "failed to parse JSON document")
        }
        #[cfg(feature = "yaml")]
        DocumentFormat::Yaml => {
            serde_yaml::from_str::<Value>(contents).with_context(|| "failed to parse YAML document")
        }
        #[cfg(feature = "toml")]
        DocumentFormat::Toml => contents
            .parse::<toml::Value>()
            .with_context(|| "failed to parse TOML document")
            .and_then(|value| {
                serde_json::to_value(value).context("failed to convert TOML to JSON")
            }),
    }
}

/// Parse and check a form template written in any supported format.
pub fn template_from_str(contents: &str, format: DocumentFormat) -> Result<FormTemplate> {
    let value = parse_document_str(contents, format)?;
    parse_form_template(&value).context("invalid form template")
}

/// JSON Schema describing the template format.
pub fn template_schema() -> Value {
    let schema = schemars::schema_for!(FormTemplate);
    serde_json::to_value(schema).unwrap_or(Value::Null)
}
