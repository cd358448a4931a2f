use chrono::NaiveDate;
use serde_json::{Number, Value};

use crate::domain::{FieldKind, FieldSpec};

use super::error::FieldCoercionError;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Coerce user input into the shape a field of `spec.kind` stores.
/// Null and blank strings clear the field.
pub(crate) fn coerce_field(
    value: &Value,
    spec: &FieldSpec,
    pointer: &str,
) -> Result<Value, FieldCoercionError> {
    if is_blank(value) {
        return Ok(Value::Null);
    }
    match &spec.kind {
        FieldKind::Text => match value {
            Value::String(text) => Ok(Value::String(text.clone())),
            Value::Number(num) => Ok(Value::String(num.to_string())),
            Value::Bool(flag) => Ok(Value::String(flag.to_string())),
            _ => Err(FieldCoercionError::new(pointer, "expected text")),
        },
        FieldKind::Integer => integer_value(value)
            .map(Value::from)
            .ok_or_else(|| FieldCoercionError::new(pointer, "expected integer")),
        FieldKind::Number => number_value(value)
            .map(Value::Number)
            .ok_or_else(|| FieldCoercionError::new(pointer, "expected number")),
        FieldKind::Boolean => bool_value(value)
            .map(Value::Bool)
            .ok_or_else(|| FieldCoercionError::new(pointer, "expected true or false")),
        FieldKind::Date => date_value(value)
            .map(|date| Value::String(date.format(DATE_FORMAT).to_string()))
            .ok_or_else(|| FieldCoercionError::new(pointer, "expected date (YYYY-MM-DD)")),
        FieldKind::Enum(options) => match value {
            Value::String(text) if options.iter().any(|option| option == text) => {
                Ok(Value::String(text.clone()))
            }
            _ => Err(FieldCoercionError::new(
                pointer,
                format!("expected one of: {}", options.join(", ")),
            )),
        },
    }
}

pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

pub(crate) fn bool_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub(crate) fn date_value(value: &Value) -> Option<NaiveDate> {
    value
        .as_str()
        .and_then(|text| NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok())
}

fn integer_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(num) => num.as_i64().or_else(|| {
            num.as_f64()
                .filter(|float| float.fract() == 0.0 && float.abs() < i64::MAX as f64)
                .map(|float| float as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn number_value(value: &Value) -> Option<Number> {
    match value {
        Value::Number(num) => Some(num.clone()),
        Value::String(text) => {
            let trimmed = text.trim();
            if let Ok(int) = trimmed.parse::<i64>() {
                return Some(Number::from(int));
            }
            trimmed.parse::<f64>().ok().and_then(Number::from_f64)
        }
        _ => None,
    }
}
