use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use docshelf_core::{Document, NewDocument, UpdateDocument};
use docshelf_store::error::StoreError;
use docshelf_store::store::DocumentStore;

use crate::config::PostgresConfig;
use crate::migrations;

/// Column list shared by every query that returns document rows.
const COLUMNS: &str = "id, title, description, document_type, created_date, modified_date, \
     created_by, modified_by, is_active, file_path, file_size";

/// Build `PgConnectOptions` from a [`PostgresConfig`], applying SSL settings
/// when configured.
pub(crate) fn build_connect_options(
    config: &PostgresConfig,
) -> Result<sqlx::postgres::PgConnectOptions, StoreError> {
    let mut options: sqlx::postgres::PgConnectOptions = config
        .url
        .parse()
        .map_err(|e: sqlx::Error| StoreError::Connection(e.to_string()))?;

    if let Some(ref mode) = config.ssl_mode {
        let ssl_mode = match mode.as_str() {
            "disable" => sqlx::postgres::PgSslMode::Disable,
            "prefer" => sqlx::postgres::PgSslMode::Prefer,
            "require" => sqlx::postgres::PgSslMode::Require,
            "verify-ca" => sqlx::postgres::PgSslMode::VerifyCa,
            "verify-full" => sqlx::postgres::PgSslMode::VerifyFull,
            other => {
                return Err(StoreError::Connection(format!("unknown ssl_mode: {other}")));
            }
        };
        options = options.ssl_mode(ssl_mode);
    }

    if let Some(ref path) = config.ssl_root_cert {
        options = options.ssl_root_cert(path);
    }

    if let Some(ref path) = config.ssl_cert {
        options = options.ssl_client_cert(path);
    }

    if let Some(ref path) = config.ssl_key {
        options = options.ssl_client_key(path);
    }

    Ok(options)
}

/// Row shape of the documents table and the set-returning routines.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: i32,
    title: String,
    description: Option<String>,
    document_type: String,
    created_date: DateTime<Utc>,
    modified_date: Option<DateTime<Utc>>,
    created_by: String,
    modified_by: Option<String>,
    is_active: bool,
    file_path: Option<String>,
    file_size: Option<i64>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            document_type: row.document_type,
            created_date: row.created_date,
            modified_date: row.modified_date,
            created_by: row.created_by,
            modified_by: row.modified_by,
            is_active: row.is_active,
            file_path: row.file_path,
            file_size: row.file_size,
        }
    }
}

/// PostgreSQL-backed implementation of [`DocumentStore`].
///
/// Plain CRUD goes through inline SQL with bound parameters; the filtered
/// reads, the activation toggle, and the lesson-code generator call the
/// server-side routines created by [`migrations::run_migrations`].
pub struct PostgresDocumentStore {
    pool: PgPool,
    config: Arc<PostgresConfig>,
}

impl PostgresDocumentStore {
    /// Create a new `PostgresDocumentStore` from the provided configuration.
    ///
    /// Connects to `PostgreSQL`, creates the connection pool, and runs
    /// migrations to ensure the table and routines exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if pool creation fails, or
    /// [`StoreError::Backend`] if migrations fail.
    pub async fn new(config: PostgresConfig) -> Result<Self, StoreError> {
        let connect_options = build_connect_options(&config)?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.pool_size)
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        migrations::run_migrations(&pool, &config)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Self {
            pool,
            config: Arc::new(config),
        })
    }

    /// Create a `PostgresDocumentStore` from an existing pool and config.
    /// Runs migrations on creation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] if migrations fail.
    pub async fn from_pool(pool: PgPool, config: PostgresConfig) -> Result<Self, StoreError> {
        migrations::run_migrations(&pool, &config)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(Self {
            pool,
            config: Arc::new(config),
        })
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn list_active(&self) -> Result<Vec<Document>, StoreError> {
        let table = self.config.documents_table();

        let query = format!(
            "SELECT {COLUMNS} FROM {table} WHERE is_active ORDER BY created_date DESC"
        );

        let rows: Vec<DocumentRow> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to list documents");
                StoreError::Backend(e.to_string())
            })?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Document>, StoreError> {
        let table = self.config.documents_table();

        let query = format!("SELECT {COLUMNS} FROM {table} WHERE id = $1 AND is_active");

        let row: Option<DocumentRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, id, "failed to get document");
                StoreError::Backend(e.to_string())
            })?;

        Ok(row.map(Document::from))
    }

    async fn create(&self, input: NewDocument) -> Result<Document, StoreError> {
        let table = self.config.documents_table();

        let query = format!(
            "INSERT INTO {table} \
             (title, description, document_type, created_date, created_by, is_active, file_path, file_size) \
             VALUES ($1, $2, $3, $4, $5, TRUE, $6, $7) \
             RETURNING {COLUMNS}"
        );

        let row: DocumentRow = sqlx::query_as(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.document_type)
            .bind(Utc::now())
            .bind(&input.created_by)
            .bind(&input.file_path)
            .bind(input.file_size)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to create document");
                StoreError::Backend(e.to_string())
            })?;

        Ok(row.into())
    }

    async fn update(
        &self,
        id: i32,
        input: UpdateDocument,
    ) -> Result<Option<Document>, StoreError> {
        let table = self.config.documents_table();

        // Full replace of the mutable fields; unbound optionals become NULL.
        let query = format!(
            "UPDATE {table} \
             SET title = $1, description = $2, document_type = $3, modified_by = $4, \
                 file_path = $5, file_size = $6, modified_date = $7 \
             WHERE id = $8 AND is_active \
             RETURNING {COLUMNS}"
        );

        let row: Option<DocumentRow> = sqlx::query_as(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.document_type)
            .bind(&input.modified_by)
            .bind(&input.file_path)
            .bind(input.file_size)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, id, "failed to update document");
                StoreError::Backend(e.to_string())
            })?;

        Ok(row.map(Document::from))
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, StoreError> {
        let table = self.config.documents_table();

        // No is_active filter: deleting an already-inactive record still
        // succeeds when the id exists.
        let query = format!(
            "UPDATE {table} SET is_active = FALSE, modified_date = $1 WHERE id = $2"
        );

        let result = sqlx::query(&query)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, id, "failed to soft-delete document");
                StoreError::Backend(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_type(&self, document_type: &str) -> Result<Vec<Document>, StoreError> {
        let routine = self.config.routine("get_documents_by_type");

        let query = format!("SELECT {COLUMNS} FROM {routine}($1)");

        let rows: Vec<DocumentRow> = sqlx::query_as(&query)
            .bind(document_type)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, document_type, "failed to list documents by type");
                StoreError::Backend(e.to_string())
            })?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn list_by_user(&self, user_name: &str) -> Result<Vec<Document>, StoreError> {
        let routine = self.config.routine("get_documents_by_user");

        let query = format!("SELECT {COLUMNS} FROM {routine}($1)");

        let rows: Vec<DocumentRow> = sqlx::query_as(&query)
            .bind(user_name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, user_name, "failed to list documents by user");
                StoreError::Backend(e.to_string())
            })?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn set_active(&self, id: i32, is_active: bool) -> Result<bool, StoreError> {
        let routine = self.config.routine("activate_deactivate_document");

        let query = format!("SELECT {routine}($1, $2)");

        let affected: i32 = sqlx::query_scalar(&query)
            .bind(id)
            .bind(is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, id, is_active, "failed to toggle document status");
                StoreError::Backend(e.to_string())
            })?;

        Ok(affected > 0)
    }

    async fn next_lesson_code(&self, category: &str) -> Result<String, StoreError> {
        let routine = self.config.routine("get_next_category_code");

        // The code comes back through the INOUT parameter, which the wire
        // protocol surfaces as the single row produced by CALL. The call
        // runs on its own connection, acquired here and returned to the
        // pool when the guard drops, on success and failure alike.
        let mut conn = self.pool.acquire().await.map_err(|e| {
            tracing::error!(error = %e, category, "failed to acquire connection for lesson code");
            StoreError::Connection(e.to_string())
        })?;

        let call = format!("CALL {routine}($1, NULL)");

        let row: Option<(Option<String>,)> = sqlx::query_as(&call)
            .bind(category)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, category, "failed to generate lesson code");
                StoreError::Backend(e.to_string())
            })?;

        // An absent output parameter is an empty code, not a failure.
        Ok(row.and_then(|(code,)| code).unwrap_or_default())
    }
}

#[cfg(all(test, feature = "integration"))]
mod integration_tests {
    use super::*;

    fn test_config() -> PostgresConfig {
        PostgresConfig {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/docshelf_test".to_string()),
            table_prefix: format!("test_{}_", uuid::Uuid::new_v4().simple()),
            ..PostgresConfig::default()
        }
    }

    #[tokio::test]
    async fn store_conformance() {
        let config = test_config();
        let store = PostgresDocumentStore::new(config)
            .await
            .expect("pool creation should succeed");
        docshelf_store::testing::run_store_conformance_tests(&store)
            .await
            .expect("conformance tests should pass");
    }
}
