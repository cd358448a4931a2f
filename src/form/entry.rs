use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::domain::EntryTemplate;

use super::{
    convert::coerce_field,
    dose::{DoseField, DoseRecord, parse_count, resize_doses},
    error::FieldCoercionError,
};

/// One element of the outer repeatable list.
///
/// The count field is not stored separately: it is always the length of
/// `doses`, so the two can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    fields: IndexMap<String, Value>,
    doses: Vec<DoseRecord>,
}

impl Entry {
    pub fn from_template(template: &EntryTemplate) -> Self {
        let fields = template
            .fields
            .iter()
            .map(|spec| (spec.name.clone(), spec.default_value()))
            .collect();
        let count = template
            .schedule
            .as_ref()
            .map_or(0, |schedule| schedule.default_count);
        Self {
            fields,
            doses: resize_doses(Vec::new(), count),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn doses(&self) -> &[DoseRecord] {
        &self.doses
    }

    pub fn dose_count(&self) -> usize {
        self.doses.len()
    }

    /// Resize the dose collection to match a freshly edited count value.
    pub fn set_count(&mut self, raw: &Value) -> bool {
        let target = parse_count(raw);
        if target == self.doses.len() {
            return false;
        }
        let existing = std::mem::take(&mut self.doses);
        self.doses = resize_doses(existing, target);
        true
    }

    pub(crate) fn set_field(
        &mut self,
        template: &EntryTemplate,
        name: &str,
        raw: &Value,
        pointer: &str,
    ) -> Result<bool, FieldCoercionError> {
        if template.is_count_field(name) {
            return Ok(self.set_count(raw));
        }
        let spec = template
            .field(name)
            .ok_or_else(|| FieldCoercionError::new(pointer, format!("unknown field '{name}'")))?;
        let value = coerce_field(raw, spec, pointer)?;
        let slot = self.fields.entry(name.to_string()).or_insert(Value::Null);
        if *slot == value {
            return Ok(false);
        }
        *slot = value;
        Ok(true)
    }

    pub(crate) fn set_dose(
        &mut self,
        dose: usize,
        field: DoseField,
        raw: &Value,
        pointer: &str,
    ) -> Result<bool, FieldCoercionError> {
        match self.doses.get_mut(dose) {
            Some(record) => record.apply(field, raw, pointer),
            None => Ok(false),
        }
    }

    /// Rebuild an entry from a stored record, normalising doses to the count.
    pub(crate) fn from_value(
        template: &EntryTemplate,
        value: &Value,
        pointer: &str,
    ) -> Result<Self, FieldCoercionError> {
        let Some(object) = value.as_object() else {
            return Err(FieldCoercionError::new(pointer, "expected an entry object"));
        };
        let mut entry = Entry::from_template(template);
        for spec in &template.fields {
            if let Some(raw) = object.get(&spec.name) {
                let child = format!("{pointer}/{}", spec.name);
                entry
                    .fields
                    .insert(spec.name.clone(), coerce_field(raw, spec, &child)?);
            }
        }

        if let Some(schedule) = &template.schedule {
            let doses_pointer = format!("{pointer}/{}", schedule.doses_field);
            let doses = match object.get(&schedule.doses_field) {
                Some(Value::Array(items)) => items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| {
                        DoseRecord::from_value(item, &format!("{doses_pointer}/{idx}"))
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                Some(Value::Null) | None => Vec::new(),
                Some(_) => {
                    return Err(FieldCoercionError::new(doses_pointer, "expected an array"));
                }
            };
            let target = object
                .get(&schedule.count_field)
                .map_or(doses.len(), parse_count);
            entry.doses = resize_doses(doses, target);
        }
        Ok(entry)
    }

    pub fn to_value(&self, template: &EntryTemplate) -> Value {
        let mut object = Map::new();
        for (name, value) in &self.fields {
            object.insert(name.clone(), value.clone());
        }
        if let Some(schedule) = &template.schedule {
            object.insert(schedule.count_field.clone(), Value::from(self.doses.len()));
            let doses = self.doses.iter().map(DoseRecord::to_value).collect();
            object.insert(schedule.doses_field.clone(), Value::Array(doses));
        }
        Value::Object(object)
    }
}
