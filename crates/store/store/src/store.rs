use async_trait::async_trait;

use docshelf_core::{Document, NewDocument, UpdateDocument};

use crate::error::StoreError;

/// Data-access contract for the documents table.
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
/// Each method is a single logical transaction; none of them compose
/// multi-statement transactions above the backend.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List all active documents, newest first (`created_date` descending).
    async fn list_active(&self) -> Result<Vec<Document>, StoreError>;

    /// Get an active document by id. Returns `None` when the id is absent
    /// or the record has been soft-deleted.
    async fn get(&self, id: i32) -> Result<Option<Document>, StoreError>;

    /// Create a document. The store assigns the id, stamps `created_date`
    /// with the current UTC time, and sets `is_active = true`. Returns the
    /// fully populated record.
    async fn create(&self, input: NewDocument) -> Result<Document, StoreError>;

    /// Replace the mutable fields of an active document and stamp
    /// `modified_date`. Optional fields absent from `input` become `NULL`.
    /// Returns `None` when the id is absent or inactive.
    async fn update(
        &self,
        id: i32,
        input: UpdateDocument,
    ) -> Result<Option<Document>, StoreError>;

    /// Soft-delete a document: set `is_active = false` and stamp
    /// `modified_date`, regardless of the current flag. Returns `false`
    /// only when the id does not exist.
    async fn soft_delete(&self, id: i32) -> Result<bool, StoreError>;

    /// List documents of a given type via the server-side
    /// `get_documents_by_type` routine. The predicate and ordering belong
    /// to the routine; this layer only maps the returned rows.
    async fn list_by_type(&self, document_type: &str) -> Result<Vec<Document>, StoreError>;

    /// List documents created by a given user via the server-side
    /// `get_documents_by_user` routine.
    async fn list_by_user(&self, user_name: &str) -> Result<Vec<Document>, StoreError>;

    /// Set the active flag via the server-side
    /// `activate_deactivate_document` routine. Returns `true` iff the
    /// routine reports at least one affected row. Works on soft-deleted
    /// records as well as active ones.
    async fn set_active(&self, id: i32, is_active: bool) -> Result<bool, StoreError>;

    /// Mint the next sequential lesson code for a category via the
    /// server-side `get_next_category_code` procedure. The code comes back
    /// through an output parameter, not a result row; when the output
    /// yields no value the result is an empty string, not an error.
    async fn next_lesson_code(&self, category: &str) -> Result<String, StoreError>;
}
