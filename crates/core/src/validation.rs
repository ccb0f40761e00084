use serde::{Deserialize, Serialize};

/// Maximum length of a document title, in characters.
pub const MAX_TITLE_LEN: usize = 255;
/// Maximum length of a document description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 1000;
/// Maximum length of a document type, in characters.
pub const MAX_DOCUMENT_TYPE_LEN: usize = 50;
/// Maximum length of a user name (`createdBy` / `modifiedBy`), in characters.
pub const MAX_USER_LEN: usize = 100;
/// Maximum length of a file path, in characters.
pub const MAX_FILE_PATH_LEN: usize = 500;

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Wire name of the offending field.
    #[cfg_attr(feature = "openapi", schema(example = "title"))]
    pub field: String,
    /// What is wrong with the value.
    #[cfg_attr(feature = "openapi", schema(example = "must not be empty"))]
    pub message: String,
}

/// Validation failures for a request body, one entry per offending field.
///
/// Detected before any store interaction; the API layer renders this as a
/// 400 response with the full field list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ValidationErrors {
    /// The individual field failures.
    pub errors: Vec<FieldError>,
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation failed: {}", self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    /// Record a failure for `field`.
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_owned(),
            message: message.into(),
        });
    }

    /// True when no failures were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert into a `Result`, erring when any failure was recorded.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Check a required text field: present, non-blank, within `max` characters.
pub(crate) fn check_required(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.trim().is_empty() {
        errors.push(field, "must not be empty");
    } else if value.chars().count() > max {
        errors.push(field, format!("must be at most {max} characters"));
    }
}

/// Check an optional text field: within `max` characters when present.
pub(crate) fn check_optional(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
) {
    if let Some(value) = value
        && value.chars().count() > max
    {
        errors.push(field, format!("must be at most {max} characters"));
    }
}
