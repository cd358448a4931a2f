use std::{fmt, sync::Arc};

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid document schema: {message}")]
pub struct SchemaSetupError {
    pub message: String,
}

/// Per-session settings that are not part of the form template.
#[derive(Clone, Default)]
pub struct SessionOptions {
    pub(crate) validator: Option<Arc<Validator>>,
    pub(crate) require_entry: Option<bool>,
}

impl fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOptions")
            .field("validator", &self.validator.is_some())
            .field("require_entry", &self.require_entry)
            .finish()
    }
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every document against `schema` before it is submitted.
    pub fn with_schema(mut self, schema: &Value) -> Result<Self, SchemaSetupError> {
        let validator = jsonschema::validator_for(schema).map_err(|err| SchemaSetupError {
            message: err.to_string(),
        })?;
        self.validator = Some(Arc::new(validator));
        Ok(self)
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Override the template's policy on removing the last entry.
    pub fn with_require_entry(mut self, required: bool) -> Self {
        self.require_entry = Some(required);
        self
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_deref()
    }
}
