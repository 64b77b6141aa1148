//! Input validation shared by the auth and catalog endpoints
//!
//! Request DTOs derive [`validator::Validate`]; [`validate`] turns the crate's
//! error tree into a flat, sorted list of [`FieldError`]s that the gateway
//! returns verbatim in the response body.

use serde::Serialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// One rejected field with a human readable reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "email")]
    pub field: String,
    #[schema(example = "must be a valid email address")]
    pub reason: String,
}

/// Malformed input, carrying field-level detail
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid input ({} field error(s))", .0.len())]
pub struct ValidationError(pub Vec<FieldError>);

impl ValidationError {
    /// Single-field error, for checks done outside a `Validate` derive
    pub fn field(field: &str, reason: impl Into<String>) -> Self {
        Self(vec![FieldError {
            field: field.to_string(),
            reason: reason.into(),
        }])
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }
}

impl From<ValidationErrors> for ValidationError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldError {
                    field: field.to_string(),
                    reason: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field).then(a.reason.cmp(&b.reason)));
        Self(fields)
    }
}

/// Run the derived validation rules of `input`
pub fn validate<T: Validate>(input: &T) -> Result<(), ValidationError> {
    input.validate().map_err(ValidationError::from)
}
