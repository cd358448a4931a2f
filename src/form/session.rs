use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::{
    domain::{FormTemplate, Preset, TemplateError, check_template},
    submit::{SubmitEndpoint, SubmitError, SubmitOutcome},
};

use super::{
    convert::coerce_field,
    error::FieldCoercionError,
    group::GroupList,
    options::SessionOptions,
    path::FieldPath,
    status::StatusLine,
    validation::{ValidationOutcome, validate_document},
};

/// Submission guard of a [`FormSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Editable,
    Submitting,
    Locked,
}

/// The editable document behind one entry screen plus its submit-once guard.
///
/// Every mutation is ignored unless the session is [`SubmissionState::Editable`].
/// A successful submit locks the session until [`FormSession::reset`].
#[derive(Debug, Clone)]
pub struct FormSession {
    template: Arc<FormTemplate>,
    options: SessionOptions,
    fields: IndexMap<String, Value>,
    entries: GroupList,
    state: SubmissionState,
    dirty: bool,
    last_error: Option<String>,
    last_response: Option<Value>,
    status: StatusLine,
}

impl FormSession {
    /// Start a session for `template`, rejecting templates whose names
    /// collide in the serialized document.
    pub fn new(template: FormTemplate) -> Result<Self, TemplateError> {
        Self::with_options(template, SessionOptions::default())
    }

    pub fn from_preset(preset: Preset) -> Self {
        Self::build(preset.template(), SessionOptions::default())
    }

    pub fn with_options(
        template: FormTemplate,
        options: SessionOptions,
    ) -> Result<Self, TemplateError> {
        check_template(&template)?;
        Ok(Self::build(template, options))
    }

    /// Built-in presets are checked by the test suite.
    fn build(template: FormTemplate, options: SessionOptions) -> Self {
        let template = Arc::new(template);
        Self {
            fields: default_fields(&template),
            entries: GroupList::with_default_entry(Arc::clone(&template)),
            template,
            options,
            state: SubmissionState::Editable,
            dirty: false,
            last_error: None,
            last_response: None,
            status: StatusLine::new(),
        }
    }

    pub fn template(&self) -> &FormTemplate {
        &self.template
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_editable(&self) -> bool {
        self.state == SubmissionState::Editable
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn entries(&self) -> &GroupList {
        &self.entries
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_response(&self) -> Option<&Value> {
        self.last_response.as_ref()
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    fn require_entry(&self) -> bool {
        self.options
            .require_entry
            .unwrap_or(self.template.require_entry)
    }

    /// Set the field at `path` (`name`, `entries[i].field`,
    /// `entries[i].doses[j].field`, or a JSON pointer).
    ///
    /// Returns `Ok(false)` when nothing changed: the session is not editable,
    /// an index is out of range, or the value is already stored.
    pub fn set_field(&mut self, path: &str, value: Value) -> Result<bool, FieldCoercionError> {
        if !self.is_editable() {
            return Ok(false);
        }
        let path = FieldPath::parse(path, &self.template)?;
        self.set_field_at(&path, value)
    }

    pub fn set_field_at(
        &mut self,
        path: &FieldPath,
        value: Value,
    ) -> Result<bool, FieldCoercionError> {
        if !self.is_editable() {
            return Ok(false);
        }
        let changed = match path {
            FieldPath::Field(name) => {
                let pointer = path.pointer(&self.template);
                let spec = self.template.field(name).ok_or_else(|| {
                    FieldCoercionError::new(&pointer, format!("unknown field '{name}'"))
                })?;
                let value = coerce_field(&value, spec, &pointer)?;
                let slot = self.fields.entry(name.clone()).or_insert(Value::Null);
                if *slot == value {
                    false
                } else {
                    *slot = value;
                    true
                }
            }
            FieldPath::EntryField { entry, field } => {
                self.entries.update_at(*entry, field, &value)?
            }
            FieldPath::DoseField { entry, dose, field } => {
                self.entries.update_dose_at(*entry, *dose, *field, &value)?
            }
        };
        if changed {
            self.dirty = true;
            self.status.value_updated();
        }
        Ok(changed)
    }

    pub fn add_entry(&mut self) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.entries.add_default();
        self.dirty = true;
        self.status.entry_added(self.entries.len());
        true
    }

    /// Remove the entry at `index`. Ignored when out of range, when the
    /// session is not editable, or when it would remove the last entry of a
    /// form that requires one.
    pub fn remove_entry(&mut self, index: usize) -> bool {
        if !self.is_editable() {
            return false;
        }
        if self.require_entry() && self.entries.len() <= 1 {
            debug!(index, "refusing to remove the only entry");
            return false;
        }
        if !self.entries.remove_at(index) {
            return false;
        }
        self.dirty = true;
        self.status.entry_removed(index, self.entries.len());
        true
    }

    /// Load an existing record into the session (the update flow).
    ///
    /// Every entry is normalised so its doses match its count. The session
    /// stays clean: seeding is not a user edit.
    pub fn seed_from_value(&mut self, value: &Value) -> Result<bool, FieldCoercionError> {
        if !self.is_editable() {
            return Ok(false);
        }
        let Some(object) = value.as_object() else {
            return Err(FieldCoercionError::new("", "expected a document object"));
        };

        let mut fields = default_fields(&self.template);
        for spec in &self.template.fields {
            if let Some(raw) = object.get(&spec.name) {
                let pointer = format!("/{}", spec.name);
                fields.insert(spec.name.clone(), coerce_field(raw, spec, &pointer)?);
            }
        }

        let mut entries = GroupList::new(Arc::clone(&self.template));
        match object.get(&self.template.entries_field) {
            Some(Value::Array(items)) => entries.seed(items)?,
            Some(Value::Null) | None => {}
            Some(_) => {
                return Err(FieldCoercionError::new(
                    format!("/{}", self.template.entries_field),
                    "expected an array",
                ));
            }
        }
        if entries.is_empty() && self.require_entry() {
            entries.add_default();
        }

        self.fields = fields;
        self.entries = entries;
        self.dirty = false;
        self.status.ready();
        Ok(true)
    }

    /// Serialize the current values: top-level fields in template order, then
    /// the entries array.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        for (name, value) in &self.fields {
            object.insert(name.clone(), value.clone());
        }
        object.insert(self.template.entries_field.clone(), self.entries.to_value());
        Value::Object(object)
    }

    pub fn validate(&self) -> ValidationOutcome {
        match self.options.validator() {
            Some(validator) => validate_document(&self.to_value(), validator),
            None => ValidationOutcome::Valid,
        }
    }

    /// First half of a submission: move to `Submitting` and hand back the
    /// document to send.
    ///
    /// Returns the outcome to report instead when the guard or validation
    /// stops the submission; the session is then left as it was.
    pub fn begin_submit(&mut self) -> Result<Value, SubmitOutcome> {
        if !self.is_editable() {
            debug!(state = ?self.state, "submit ignored");
            return Err(SubmitOutcome::Skipped);
        }
        let document = self.to_value();
        if let Some(validator) = self.options.validator()
            && let ValidationOutcome::Invalid { issues } = validate_document(&document, validator)
        {
            self.status.issues_remaining(issues.len());
            return Err(SubmitOutcome::Invalid { issues });
        }
        self.state = SubmissionState::Submitting;
        self.last_error = None;
        self.status.submitting();
        info!(form = %self.template.name, entries = self.entries.len(), "submitting");
        Ok(document)
    }

    /// Second half of a submission: apply the endpoint's answer.
    pub fn complete_submit(&mut self, result: Result<Value, SubmitError>) -> SubmitOutcome {
        if self.state != SubmissionState::Submitting {
            return SubmitOutcome::Skipped;
        }
        match result {
            Ok(response) => {
                self.state = SubmissionState::Locked;
                self.last_response = Some(response.clone());
                self.status.saved();
                info!(form = %self.template.name, "submission accepted; session locked");
                SubmitOutcome::Accepted(response)
            }
            Err(err) => {
                self.state = SubmissionState::Editable;
                self.status.failed(&err.message);
                warn!(form = %self.template.name, error = %err, "submission failed");
                self.last_error = Some(err.message.clone());
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Send the document to `endpoint` unless the guard forbids it.
    pub async fn submit<E>(&mut self, endpoint: &E) -> SubmitOutcome
    where
        E: SubmitEndpoint + ?Sized,
    {
        let document = match self.begin_submit() {
            Ok(document) => document,
            Err(outcome) => return outcome,
        };
        let result = endpoint.create_or_update(document).await;
        self.complete_submit(result)
    }

    /// Start a new session after a successful submit.
    pub fn reset(&mut self) -> bool {
        if self.state != SubmissionState::Locked {
            return false;
        }
        self.fields = default_fields(&self.template);
        self.entries = GroupList::with_default_entry(Arc::clone(&self.template));
        self.state = SubmissionState::Editable;
        self.dirty = false;
        self.last_error = None;
        self.last_response = None;
        self.status.ready();
        info!(form = %self.template.name, "session reset");
        true
    }
}

fn default_fields(template: &FormTemplate) -> IndexMap<String, Value> {
    template
        .fields
        .iter()
        .map(|spec| (spec.name.clone(), spec.default_value()))
        .collect()
}
