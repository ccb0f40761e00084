use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{
    MAX_DESCRIPTION_LEN, MAX_DOCUMENT_TYPE_LEN, MAX_FILE_PATH_LEN, MAX_TITLE_LEN, MAX_USER_LEN,
    ValidationErrors, check_optional, check_required,
};

/// A stored document record.
///
/// `id` and `created_date` are assigned by the store at creation and never
/// change afterwards. `is_active` governs default visibility: soft-deleted
/// records keep their row but are excluded from listing and lookups, while
/// remaining addressable by the activation toggle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", schema(example = json!({
    "id": 42,
    "title": "Q3 planning notes",
    "description": null,
    "documentType": "Spec",
    "createdDate": "2025-01-01T00:00:00Z",
    "modifiedDate": null,
    "createdBy": "alice",
    "modifiedBy": null,
    "isActive": true,
    "filePath": "/files/q3-notes.pdf",
    "fileSize": 18234
})))]
pub struct Document {
    /// Store-assigned identifier, unique and never reused.
    pub id: i32,

    /// Display title.
    pub title: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// Free-form category used by the filtered reads.
    pub document_type: String,

    /// When the record was created (UTC). Immutable.
    pub created_date: DateTime<Utc>,

    /// When the record was last updated or deactivated. `None` until the
    /// first mutation.
    pub modified_date: Option<DateTime<Utc>>,

    /// Who created the record.
    pub created_by: String,

    /// Who last modified the record.
    pub modified_by: Option<String>,

    /// Visibility flag. `false` after a soft delete.
    pub is_active: bool,

    /// Optional path of an associated file.
    pub file_path: Option<String>,

    /// Optional size of the associated file, in bytes.
    pub file_size: Option<i64>,
}

/// Input shape for creating a document.
///
/// The store assigns `id`, stamps `created_date`, and sets `is_active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NewDocument {
    /// Display title. Required, at most 255 characters.
    #[cfg_attr(feature = "openapi", schema(example = "Q3 planning notes"))]
    pub title: String,

    /// Optional description, at most 1000 characters.
    pub description: Option<String>,

    /// Category, required, at most 50 characters.
    #[cfg_attr(feature = "openapi", schema(example = "Spec"))]
    pub document_type: String,

    /// Creator, required, at most 100 characters.
    #[cfg_attr(feature = "openapi", schema(example = "alice"))]
    pub created_by: String,

    /// Optional file path, at most 500 characters.
    pub file_path: Option<String>,

    /// Optional file size in bytes.
    pub file_size: Option<i64>,
}

impl NewDocument {
    /// Validate field presence and lengths.
    ///
    /// Returns every offending field at once rather than stopping at the
    /// first failure.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_required(&mut errors, "title", &self.title, MAX_TITLE_LEN);
        check_optional(
            &mut errors,
            "description",
            self.description.as_deref(),
            MAX_DESCRIPTION_LEN,
        );
        check_required(
            &mut errors,
            "documentType",
            &self.document_type,
            MAX_DOCUMENT_TYPE_LEN,
        );
        check_required(&mut errors, "createdBy", &self.created_by, MAX_USER_LEN);
        check_optional(
            &mut errors,
            "filePath",
            self.file_path.as_deref(),
            MAX_FILE_PATH_LEN,
        );
        errors.into_result()
    }
}

/// Input shape for updating a document.
///
/// Updates are a full replace of the mutable fields: an optional field left
/// out of the request becomes `NULL` on the record, it is not merged with
/// the previous value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateDocument {
    /// Display title. Required, at most 255 characters.
    pub title: String,

    /// Optional description, at most 1000 characters.
    pub description: Option<String>,

    /// Category, required, at most 50 characters.
    pub document_type: String,

    /// Who is making the change, required, at most 100 characters.
    #[cfg_attr(feature = "openapi", schema(example = "bob"))]
    pub modified_by: String,

    /// Optional file path, at most 500 characters.
    pub file_path: Option<String>,

    /// Optional file size in bytes.
    pub file_size: Option<i64>,
}

impl UpdateDocument {
    /// Validate field presence and lengths. Same rules as [`NewDocument`],
    /// with `modifiedBy` taking the place of `createdBy`.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_required(&mut errors, "title", &self.title, MAX_TITLE_LEN);
        check_optional(
            &mut errors,
            "description",
            self.description.as_deref(),
            MAX_DESCRIPTION_LEN,
        );
        check_required(
            &mut errors,
            "documentType",
            &self.document_type,
            MAX_DOCUMENT_TYPE_LEN,
        );
        check_required(&mut errors, "modifiedBy", &self.modified_by, MAX_USER_LEN);
        check_optional(
            &mut errors,
            "filePath",
            self.file_path.as_deref(),
            MAX_FILE_PATH_LEN,
        );
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> NewDocument {
        NewDocument {
            title: "Q3 planning notes".into(),
            description: None,
            document_type: "Spec".into(),
            created_by: "alice".into(),
            file_path: None,
            file_size: None,
        }
    }

    #[test]
    fn valid_create_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn blank_title_and_creator_reported_together() {
        let input = NewDocument {
            title: "  ".into(),
            created_by: String::new(),
            ..valid_input()
        };
        let errors = input.validate().unwrap_err();
        let fields: Vec<&str> = errors.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["title", "createdBy"]);
    }

    #[test]
    fn overlong_optional_fields_rejected() {
        let input = NewDocument {
            description: Some("d".repeat(1001)),
            file_path: Some("p".repeat(501)),
            ..valid_input()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.errors.len(), 2);
    }

    #[test]
    fn update_requires_modified_by() {
        let input = UpdateDocument {
            title: "Revised".into(),
            description: None,
            document_type: "Spec".into(),
            modified_by: "   ".into(),
            file_path: None,
            file_size: None,
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.errors[0].field, "modifiedBy");
    }

    #[test]
    fn wire_names_are_camel_case() {
        let doc = Document {
            id: 1,
            title: "A".into(),
            description: None,
            document_type: "Spec".into(),
            created_date: Utc::now(),
            modified_date: None,
            created_by: "alice".into(),
            modified_by: None,
            is_active: true,
            file_path: None,
            file_size: None,
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("documentType").is_some());
        assert!(json.get("createdDate").is_some());
        assert!(json.get("isActive").is_some());
        assert!(json.get("document_type").is_none());
    }
}
