use jsonschema::Validator;
use serde_json::Value;

#[derive(Debug)]
pub enum ValidationOutcome {
    Valid,
    Invalid { issues: Vec<String> },
}

/// Check a serialized form document against the configured schema.
pub fn validate_document(document: &Value, validator: &Validator) -> ValidationOutcome {
    if validator.is_valid(document) {
        return ValidationOutcome::Valid;
    }
    let issues = validator
        .iter_errors(document)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let prefix = if pointer.is_empty() {
                "<root>".to_string()
            } else {
                pointer
            };
            format!("{prefix}: {error}")
        })
        .collect();
    ValidationOutcome::Invalid { issues }
}
