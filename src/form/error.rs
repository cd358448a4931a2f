use thiserror::Error;

/// Raised when an incoming value cannot be stored in the targeted field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{pointer}: {message}")]
pub struct FieldCoercionError {
    pub pointer: String,
    pub message: String,
}

impl FieldCoercionError {
    pub fn new(pointer: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            message: message.into(),
        }
    }
}
