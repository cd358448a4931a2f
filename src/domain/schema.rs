use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declarative description of one entry screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormTemplate {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Top-level scalar fields, in document order.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    pub entries_field: String,
    pub entry: EntryTemplate,
    /// When set, the last remaining entry cannot be removed.
    #[serde(default)]
    pub require_entry: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryTemplate {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub schedule: Option<DoseSchedule>,
}

/// Names the count field that drives an entry's dose collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoseSchedule {
    pub count_field: String,
    #[serde(default = "default_doses_field")]
    pub doses_field: String,
    #[serde(default)]
    pub default_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub default: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "type", content = "options")]
pub enum FieldKind {
    Text,
    Integer,
    Number,
    Boolean,
    Date,
    Enum(Vec<String>),
}

fn default_doses_field() -> String {
    "doses".to_string()
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn default_value(&self) -> Value {
        self.default.clone().unwrap_or(Value::Null)
    }
}

impl DoseSchedule {
    pub fn new(count_field: impl Into<String>) -> Self {
        Self {
            count_field: count_field.into(),
            doses_field: default_doses_field(),
            default_count: 0,
        }
    }
}

impl EntryTemplate {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn is_count_field(&self, name: &str) -> bool {
        self.schedule
            .as_ref()
            .is_some_and(|schedule| schedule.count_field == name)
    }

    pub fn doses_field(&self) -> Option<&str> {
        self.schedule
            .as_ref()
            .map(|schedule| schedule.doses_field.as_str())
    }
}

impl FormTemplate {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}
