mod parser;
mod presets;
mod schema;

pub use parser::{TemplateError, check_template, parse_form_template};
pub use presets::Preset;
pub use schema::{DoseSchedule, EntryTemplate, FieldKind, FieldSpec, FormTemplate};
