mod actions;
mod convert;
mod dose;
mod entry;
mod error;
mod group;
mod options;
mod path;
mod reducers;
mod session;
mod status;
mod validation;

pub use actions::FormCommand;
pub use dose::{DoseField, DoseRecord, MAX_DOSE_COUNT, parse_count, resize_doses};
pub use entry::Entry;
pub use error::FieldCoercionError;
pub use group::GroupList;
pub use options::{SchemaSetupError, SessionOptions};
pub use path::FieldPath;
pub use reducers::{Dispatched, FormEngine, apply_command};
pub use session::{FormSession, SubmissionState};
pub use status::StatusLine;
pub use validation::{ValidationOutcome, validate_document};
