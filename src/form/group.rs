use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::domain::FormTemplate;

use super::{dose::DoseField, entry::Entry, error::FieldCoercionError};

/// The outer repeatable collection of a form.
///
/// Entries have no identity beyond their position. Structural edits never
/// reorder the entries they do not touch.
#[derive(Debug, Clone)]
pub struct GroupList {
    template: Arc<FormTemplate>,
    entries: Vec<Entry>,
}

impl GroupList {
    pub fn new(template: Arc<FormTemplate>) -> Self {
        Self {
            template,
            entries: Vec::new(),
        }
    }

    pub fn with_default_entry(template: Arc<FormTemplate>) -> Self {
        let mut list = Self::new(template);
        list.add_default();
        list
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    pub fn default_entry(&self) -> Entry {
        Entry::from_template(&self.template.entry)
    }

    pub fn add(&mut self, entry: Entry) {
        self.entries.push(entry);
        debug!(entries = self.entries.len(), "entry added");
    }

    pub fn add_default(&mut self) {
        let entry = self.default_entry();
        self.add(entry);
    }

    /// Remove the entry at `index`; later entries shift down by one.
    /// Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            return false;
        }
        self.entries.remove(index);
        debug!(index, entries = self.entries.len(), "entry removed");
        true
    }

    /// Replace one field of one entry. Editing the count field resizes the
    /// entry's doses within the same call.
    pub fn update_at(
        &mut self,
        index: usize,
        field: &str,
        value: &Value,
    ) -> Result<bool, FieldCoercionError> {
        let pointer = format!("/{}/{index}/{field}", self.template.entries_field);
        let template = &self.template.entry;
        let Some(entry) = self.entries.get_mut(index) else {
            return Ok(false);
        };
        let before = entry.dose_count();
        let changed = entry.set_field(template, field, value, &pointer)?;
        if template.is_count_field(field) && changed {
            debug!(index, from = before, to = entry.dose_count(), "doses resized");
        }
        Ok(changed)
    }

    pub fn update_dose_at(
        &mut self,
        index: usize,
        dose: usize,
        field: DoseField,
        value: &Value,
    ) -> Result<bool, FieldCoercionError> {
        let doses_field = self.template.entry.doses_field().unwrap_or("doses");
        let pointer = format!(
            "/{}/{index}/{doses_field}/{dose}/{}",
            self.template.entries_field,
            field.name()
        );
        match self.entries.get_mut(index) {
            Some(entry) => entry.set_dose(dose, field, value, &pointer),
            None => Ok(false),
        }
    }

    /// Replace every entry with records read from `items`.
    pub(crate) fn seed(&mut self, items: &[Value]) -> Result<(), FieldCoercionError> {
        let entries = items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let pointer = format!("/{}/{idx}", self.template.entries_field);
                Entry::from_value(&self.template.entry, item, &pointer)
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.entries = entries;
        Ok(())
    }

    pub fn to_value(&self) -> Value {
        Value::Array(
            self.entries
                .iter()
                .map(|entry| entry.to_value(&self.template.entry))
                .collect(),
        )
    }
}
