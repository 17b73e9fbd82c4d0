//! Application form model
//!
//! - `schema.rs` - Field identifiers, result payload and the validator
//! - `input.rs` - Single-line text input used by the text fields
//! - `select.rs` - Closed-set select used by the experience bracket

pub mod input;
pub mod schema;
pub mod select;

pub use input::{EditResult, TextInput};
pub use schema::{
    FieldError, FieldId, FormErrors, FormInput, FormValues, PartialFormValues,
    ValidationErrorKind, Validator, DEFAULT_EMAIL_PATTERN, DEFAULT_EXPERIENCE_OPTIONS,
};
pub use select::Select;
