//! Custom request extractors.

mod json_or_form;
mod validated_json;

pub use json_or_form::{FormFields, FromFormFields, JsonOrForm};
pub use validated_json::ValidatedJson;
