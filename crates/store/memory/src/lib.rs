//! In-memory [`DocumentStore`] backend.
//!
//! Backs the HTTP API tests and local development. Mirrors the semantics of
//! the Postgres backend, including what its server-side routines do: the
//! filtered reads return active rows newest-first, the activation toggle
//! stamps `modified_date`, and lesson codes count per category.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use docshelf_core::{Document, NewDocument, UpdateDocument};
use docshelf_store::{DocumentStore, StoreError};

/// Thread-safe in-memory document store.
pub struct MemoryDocumentStore {
    documents: DashMap<i32, Document>,
    lesson_codes: DashMap<String, u32>,
    next_id: AtomicI32,
}

impl MemoryDocumentStore {
    /// Create an empty store. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
            lesson_codes: DashMap::new(),
            next_id: AtomicI32::new(1),
        }
    }

    /// Collect documents matching `pred`, newest first.
    fn collect_sorted<F>(&self, pred: F) -> Vec<Document>
    where
        F: Fn(&Document) -> bool,
    {
        let mut docs: Vec<Document> = self
            .documents
            .iter()
            .filter(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        docs.sort_by(|a, b| b.created_date.cmp(&a.created_date).then(b.id.cmp(&a.id)));
        docs
    }
}

impl Default for MemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_active(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.collect_sorted(|d| d.is_active))
    }

    async fn get(&self, id: i32) -> Result<Option<Document>, StoreError> {
        Ok(self
            .documents
            .get(&id)
            .filter(|entry| entry.is_active)
            .map(|entry| entry.value().clone()))
    }

    async fn create(&self, input: NewDocument) -> Result<Document, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let doc = Document {
            id,
            title: input.title,
            description: input.description,
            document_type: input.document_type,
            created_date: Utc::now(),
            modified_date: None,
            created_by: input.created_by,
            modified_by: None,
            is_active: true,
            file_path: input.file_path,
            file_size: input.file_size,
        };
        self.documents.insert(id, doc.clone());
        Ok(doc)
    }

    async fn update(
        &self,
        id: i32,
        input: UpdateDocument,
    ) -> Result<Option<Document>, StoreError> {
        let Some(mut entry) = self.documents.get_mut(&id) else {
            return Ok(None);
        };
        if !entry.is_active {
            return Ok(None);
        }

        let doc = entry.value_mut();
        doc.title = input.title;
        doc.description = input.description;
        doc.document_type = input.document_type;
        doc.modified_by = Some(input.modified_by);
        doc.file_path = input.file_path;
        doc.file_size = input.file_size;
        doc.modified_date = Some(Utc::now());
        Ok(Some(doc.clone()))
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, StoreError> {
        let Some(mut entry) = self.documents.get_mut(&id) else {
            return Ok(false);
        };
        let doc = entry.value_mut();
        doc.is_active = false;
        doc.modified_date = Some(Utc::now());
        Ok(true)
    }

    async fn list_by_type(&self, document_type: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self.collect_sorted(|d| d.is_active && d.document_type == document_type))
    }

    async fn list_by_user(&self, user_name: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self.collect_sorted(|d| d.is_active && d.created_by == user_name))
    }

    async fn set_active(&self, id: i32, is_active: bool) -> Result<bool, StoreError> {
        let Some(mut entry) = self.documents.get_mut(&id) else {
            return Ok(false);
        };
        let doc = entry.value_mut();
        doc.is_active = is_active;
        doc.modified_date = Some(Utc::now());
        Ok(true)
    }

    async fn next_lesson_code(&self, category: &str) -> Result<String, StoreError> {
        let mut counter = self.lesson_codes.entry(category.to_owned()).or_insert(0);
        *counter += 1;
        Ok(format!("{category}-{:04}", *counter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docshelf_store::testing::{assert_new_record, run_store_conformance_tests};

    fn input(title: &str) -> NewDocument {
        NewDocument {
            title: title.to_owned(),
            description: None,
            document_type: "Spec".to_owned(),
            created_by: "alice".to_owned(),
            file_path: None,
            file_size: None,
        }
    }

    #[tokio::test]
    async fn store_conformance() {
        let store = MemoryDocumentStore::new();
        run_store_conformance_tests(&store)
            .await
            .expect("conformance tests should pass");
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let store = MemoryDocumentStore::new();
        let first = store.create(input("first")).await.unwrap();
        let second = store.create(input("second")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_new_record(&first, &input("first"));
    }

    #[tokio::test]
    async fn lesson_codes_embed_the_category() {
        let store = MemoryDocumentStore::new();
        assert_eq!(store.next_lesson_code("Math").await.unwrap(), "Math-0001");
        assert_eq!(store.next_lesson_code("Math").await.unwrap(), "Math-0002");
        assert_eq!(store.next_lesson_code("History").await.unwrap(), "History-0001");
    }

    #[tokio::test]
    async fn toggle_stamps_modified_date() {
        let store = MemoryDocumentStore::new();
        let doc = store.create(input("toggled")).await.unwrap();
        assert!(doc.modified_date.is_none());

        store.set_active(doc.id, false).await.unwrap();
        store.set_active(doc.id, true).await.unwrap();
        let restored = store.get(doc.id).await.unwrap().unwrap();
        assert!(restored.modified_date.is_some());
    }
}
