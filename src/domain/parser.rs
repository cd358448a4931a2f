use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::form::MAX_DOSE_COUNT;

use super::schema::{FieldSpec, FormTemplate};

static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid field name pattern"));

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template is not well-formed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("'{name}' is not a valid field name")]
    InvalidName { name: String },
    #[error("field '{name}' is declared more than once in {scope}")]
    Duplicate { name: String, scope: &'static str },
    #[error("'{name}' is both a scalar field and part of the dose schedule")]
    ScheduleCollision { name: String },
    #[error("default dose count {count} exceeds the limit of {MAX_DOSE_COUNT}")]
    CountLimit { count: usize },
}

pub fn parse_form_template(value: &Value) -> Result<FormTemplate, TemplateError> {
    let template: FormTemplate = serde_json::from_value(value.clone())?;
    check_template(&template)?;
    Ok(template)
}

pub fn check_template(template: &FormTemplate) -> Result<(), TemplateError> {
    check_name(&template.entries_field)?;
    check_fields(&template.fields, "the form")?;
    if template.field(&template.entries_field).is_some() {
        return Err(TemplateError::Duplicate {
            name: template.entries_field.clone(),
            scope: "the form",
        });
    }

    let entry = &template.entry;
    check_fields(&entry.fields, "the entry")?;
    if let Some(schedule) = &entry.schedule {
        check_name(&schedule.count_field)?;
        check_name(&schedule.doses_field)?;
        for name in [&schedule.count_field, &schedule.doses_field] {
            if entry.field(name).is_some() {
                return Err(TemplateError::ScheduleCollision { name: name.clone() });
            }
        }
        if schedule.count_field == schedule.doses_field {
            return Err(TemplateError::ScheduleCollision {
                name: schedule.count_field.clone(),
            });
        }
        if schedule.default_count > MAX_DOSE_COUNT {
            return Err(TemplateError::CountLimit {
                count: schedule.default_count,
            });
        }
    }
    Ok(())
}

fn check_fields(fields: &[FieldSpec], scope: &'static str) -> Result<(), TemplateError> {
    let mut seen = HashSet::new();
    for field in fields {
        check_name(&field.name)?;
        if !seen.insert(field.name.as_str()) {
            return Err(TemplateError::Duplicate {
                name: field.name.clone(),
                scope,
            });
        }
    }
    Ok(())
}

fn check_name(name: &str) -> Result<(), TemplateError> {
    if FIELD_NAME.is_match(name) {
        Ok(())
    } else {
        Err(TemplateError::InvalidName {
            name: name.to_string(),
        })
    }
}
