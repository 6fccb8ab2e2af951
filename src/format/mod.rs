//! Number patterns and label templates.

pub mod number_format;
pub mod template;

pub use number_format::{NumberFormatter, NumberPattern};
pub use template::{TemplateFields, format_template, has_placeholder};
