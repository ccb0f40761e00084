use thiserror::Error;

/// Errors surfaced by a [`DocumentStore`](crate::store::DocumentStore) backend.
///
/// "Not found" is not an error: lookups return `Option`/`bool` outcomes and
/// the API layer translates those to 404s. These variants cover genuine
/// backend failures only.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to reach the backend (pool creation, connect, TLS).
    #[error("connection error: {0}")]
    Connection(String),

    /// The backend rejected or failed an operation (SQL error, routine
    /// failure, constraint violation).
    #[error("backend error: {0}")]
    Backend(String),
}
