use std::sync::LazyLock;

use regex::Regex;

use crate::domain::FormTemplate;

use super::{dose::DoseField, error::FieldCoercionError};

static DOTTED_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<head>[A-Za-z_]\w*)(?:\[(?P<entry>\d+)\]\.(?P<field>[A-Za-z_]\w*)(?:\[(?P<dose>\d+)\]\.(?P<dose_field>[A-Za-z_]\w*))?)?$",
    )
    .expect("valid path pattern")
});

/// A resolved location inside a form document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    /// Top-level scalar field.
    Field(String),
    /// Scalar or count field of one entry.
    EntryField { entry: usize, field: String },
    /// Field of one dose record.
    DoseField {
        entry: usize,
        dose: usize,
        field: DoseField,
    },
}

impl FieldPath {
    /// Parse `name`, `entries[i].field`, `entries[i].doses[j].field`, or the
    /// JSON pointer equivalents, and check every name against `template`.
    pub fn parse(raw: &str, template: &FormTemplate) -> Result<Self, FieldCoercionError> {
        let segments = split_segments(raw)
            .ok_or_else(|| FieldCoercionError::new(raw, "malformed field path"))?;
        resolve(raw, &segments, template)
    }

    pub fn pointer(&self, template: &FormTemplate) -> String {
        let entries = &template.entries_field;
        match self {
            FieldPath::Field(name) => format!("/{name}"),
            FieldPath::EntryField { entry, field } => format!("/{entries}/{entry}/{field}"),
            FieldPath::DoseField { entry, dose, field } => {
                let doses = template.entry.doses_field().unwrap_or("doses");
                format!("/{entries}/{entry}/{doses}/{dose}/{}", field.name())
            }
        }
    }
}

fn split_segments(raw: &str) -> Option<Vec<String>> {
    let raw = raw.trim();
    if let Some(pointer) = raw.strip_prefix('/') {
        let segments = pointer
            .split('/')
            .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
            .collect::<Vec<_>>();
        if segments.iter().any(String::is_empty) {
            return None;
        }
        return Some(segments);
    }
    let captures = DOTTED_PATH.captures(raw)?;
    Some(
        ["head", "entry", "field", "dose", "dose_field"]
            .into_iter()
            .map_while(|name| captures.name(name))
            .map(|capture| capture.as_str().to_string())
            .collect(),
    )
}

fn resolve(
    raw: &str,
    segments: &[String],
    template: &FormTemplate,
) -> Result<FieldPath, FieldCoercionError> {
    match segments {
        [name] => {
            if template.field(name).is_some() {
                Ok(FieldPath::Field(name.clone()))
            } else if *name == template.entries_field {
                Err(FieldCoercionError::new(
                    raw,
                    "entries are edited through add/remove, not replaced",
                ))
            } else {
                Err(FieldCoercionError::new(raw, format!("unknown field '{name}'")))
            }
        }
        [head, entry, field] => {
            expect_entries(raw, head, template)?;
            let entry = parse_index(raw, entry)?;
            let known =
                template.entry.field(field).is_some() || template.entry.is_count_field(field);
            if !known {
                return Err(FieldCoercionError::new(
                    raw,
                    format!("unknown entry field '{field}'"),
                ));
            }
            Ok(FieldPath::EntryField {
                entry,
                field: field.clone(),
            })
        }
        [head, entry, doses, dose, field] => {
            expect_entries(raw, head, template)?;
            let entry = parse_index(raw, entry)?;
            if template.entry.doses_field() != Some(doses.as_str()) {
                return Err(FieldCoercionError::new(
                    raw,
                    format!("entries have no '{doses}' collection"),
                ));
            }
            let dose = parse_index(raw, dose)?;
            let field = DoseField::from_name(field).ok_or_else(|| {
                FieldCoercionError::new(raw, format!("unknown dose field '{field}'"))
            })?;
            Ok(FieldPath::DoseField { entry, dose, field })
        }
        _ => Err(FieldCoercionError::new(raw, "malformed field path")),
    }
}

fn expect_entries(
    raw: &str,
    head: &str,
    template: &FormTemplate,
) -> Result<(), FieldCoercionError> {
    if head == template.entries_field {
        Ok(())
    } else {
        Err(FieldCoercionError::new(
            raw,
            format!("'{head}' is not a repeatable collection"),
        ))
    }
}

fn parse_index(raw: &str, segment: &str) -> Result<usize, FieldCoercionError> {
    let not_an_index = || FieldCoercionError::new(raw, format!("'{segment}' is not an index"));
    if segment.len() > 1 && segment.starts_with('0') {
        return Err(not_an_index());
    }
    segment.parse::<usize>().map_err(|_| not_an_index())
}
