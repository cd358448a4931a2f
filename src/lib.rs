#![deny(rust_2018_idioms)]

pub mod domain;
pub mod form;
pub mod io;
pub mod submit;


pub use domain::{DoseSchedule, EntryTemplate, FieldKind, FieldSpec, FormTemplate, Preset};
pub use form::{
    DoseRecord, FieldCoercionError, FormCommand, FormEngine, FormSession, SessionOptions,
    SubmissionState,
};
pub use io::{DocumentFormat, OutputDestination, OutputOptions};
pub use submit::{SubmitEndpoint, SubmitError, SubmitOutcome};

pub mod prelude {
    pub use super::{FormSession, Preset, SessionOptions, SubmitEndpoint, SubmitOutcome};
}
