mod format;
mod input;
mod output;

pub use format::DocumentFormat;
pub use input::{parse_document_str, template_from_str, template_schema};
pub use output::{OutputDestination, OutputOptions, emit, render};
