//! Count-driven dose collections.
//!
//! An entry's doses always have exactly as many records as its count field
//! says. Resizing keeps every record whose position is still valid and only
//! appends fresh records or drops the tail.

use std::iter;

use chrono::NaiveDate;
use serde_json::{Value, json};

use super::{
    convert::{DATE_FORMAT, bool_value, date_value, is_blank},
    error::FieldCoercionError,
};

/// Largest dose count an entry accepts. Larger counts read as zero.
pub const MAX_DOSE_COUNT: usize = 1_000;

/// One scheduled dose: an optional date plus whether it was administered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoseRecord {
    pub date: Option<NaiveDate>,
    pub taken: bool,
}

/// Addressable fields of a [`DoseRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoseField {
    Date,
    Taken,
}

impl DoseField {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "date" => Some(DoseField::Date),
            "taken" => Some(DoseField::Taken),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DoseField::Date => "date",
            DoseField::Taken => "taken",
        }
    }
}

impl DoseRecord {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && !self.taken
    }

    /// Apply `value` to one field. Returns whether the record changed.
    pub fn apply(
        &mut self,
        field: DoseField,
        value: &Value,
        pointer: &str,
    ) -> Result<bool, FieldCoercionError> {
        match field {
            DoseField::Date => {
                let next = if is_blank(value) {
                    None
                } else {
                    Some(date_value(value).ok_or_else(|| {
                        FieldCoercionError::new(pointer, "expected date (YYYY-MM-DD)")
                    })?)
                };
                let changed = self.date != next;
                self.date = next;
                Ok(changed)
            }
            DoseField::Taken => {
                let next = if is_blank(value) {
                    false
                } else {
                    bool_value(value)
                        .ok_or_else(|| FieldCoercionError::new(pointer, "expected true or false"))?
                };
                let changed = self.taken != next;
                self.taken = next;
                Ok(changed)
            }
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "date": self.date.map(|date| date.format(DATE_FORMAT).to_string()),
            "taken": self.taken,
        })
    }

    pub(crate) fn from_value(value: &Value, pointer: &str) -> Result<Self, FieldCoercionError> {
        let Some(object) = value.as_object() else {
            return Err(FieldCoercionError::new(pointer, "expected a dose object"));
        };
        let mut record = DoseRecord::default();
        for field in [DoseField::Date, DoseField::Taken] {
            if let Some(raw) = object.get(field.name()) {
                let child = format!("{pointer}/{}", field.name());
                record.apply(field, raw, &child)?;
            }
        }
        Ok(record)
    }
}

/// Read a count field value as a non-negative integer.
///
/// Anything that is not a non-negative whole number up to
/// [`MAX_DOSE_COUNT`] counts as zero.
pub fn parse_count(value: &Value) -> usize {
    let count = match value {
        Value::Number(num) => num
            .as_u64()
            .or_else(|| {
                num.as_f64()
                    .filter(|float| *float >= 0.0 && float.fract() == 0.0)
                    .map(|float| float as u64)
            })
            .and_then(|count| usize::try_from(count).ok())
            .unwrap_or(0),
        Value::String(text) => text.trim().parse::<usize>().unwrap_or(0),
        _ => 0,
    };
    if count > MAX_DOSE_COUNT { 0 } else { count }
}

/// Build a collection of exactly `target` records, keeping `existing[k]` for
/// every `k < target` and padding with empty records.
///
/// `target` is capped at [`MAX_DOSE_COUNT`].
pub fn resize_doses(existing: Vec<DoseRecord>, target: usize) -> Vec<DoseRecord> {
    let target = target.min(MAX_DOSE_COUNT);
    existing
        .into_iter()
        .chain(iter::repeat_with(DoseRecord::default))
        .take(target)
        .collect()
}
