use sqlx::PgPool;

use crate::config::PostgresConfig;

/// Run database migrations, creating the documents table, the category
/// codes table, and the four server-side routines if they do not exist.
///
/// All statements are idempotent (`CREATE ... IF NOT EXISTS` /
/// `CREATE OR REPLACE`), so this is safe to run on every startup. Names
/// are derived from the configured schema and table prefix.
///
/// # Errors
///
/// Returns a [`sqlx::Error`] if any DDL statement fails.
pub async fn run_migrations(pool: &PgPool, config: &PostgresConfig) -> Result<(), sqlx::Error> {
    let documents = config.documents_table();
    let codes = config.category_codes_table();

    let create_documents = format!(
        "CREATE TABLE IF NOT EXISTS {documents} (
            id SERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            description VARCHAR(1000),
            document_type VARCHAR(50) NOT NULL,
            created_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            modified_date TIMESTAMPTZ,
            created_by VARCHAR(100) NOT NULL,
            modified_by VARCHAR(100),
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            file_path VARCHAR(500),
            file_size BIGINT
        )"
    );

    let create_codes = format!(
        "CREATE TABLE IF NOT EXISTS {codes} (
            category VARCHAR(100) PRIMARY KEY,
            next_value BIGINT NOT NULL DEFAULT 0
        )"
    );

    // Filtered reads, shaped like the documents table. The store calls
    // these as black boxes; the predicate matches the default listing's
    // visibility rule (active rows, newest first).
    let by_type = config.routine("get_documents_by_type");
    let create_by_type = format!(
        "CREATE OR REPLACE FUNCTION {by_type}(p_document_type TEXT)
         RETURNS SETOF {documents}
         LANGUAGE sql STABLE AS $$
             SELECT * FROM {documents}
             WHERE document_type = p_document_type AND is_active
             ORDER BY created_date DESC
         $$"
    );

    let by_user = config.routine("get_documents_by_user");
    let create_by_user = format!(
        "CREATE OR REPLACE FUNCTION {by_user}(p_user_name TEXT)
         RETURNS SETOF {documents}
         LANGUAGE sql STABLE AS $$
             SELECT * FROM {documents}
             WHERE created_by = p_user_name AND is_active
             ORDER BY created_date DESC
         $$"
    );

    // Activation toggle. Addresses rows regardless of their soft-delete
    // state and reports the affected-row count. Stamps modified_date so
    // both flag writers leave an audit timestamp.
    let toggle = config.routine("activate_deactivate_document");
    let create_toggle = format!(
        "CREATE OR REPLACE FUNCTION {toggle}(p_document_id INTEGER, p_is_active BOOLEAN)
         RETURNS INTEGER
         LANGUAGE plpgsql AS $$
         DECLARE
             affected INTEGER;
         BEGIN
             UPDATE {documents}
             SET is_active = p_is_active, modified_date = NOW()
             WHERE id = p_document_id;
             GET DIAGNOSTICS affected = ROW_COUNT;
             RETURN affected;
         END
         $$"
    );

    // Sequential lesson codes, scoped per category. The code is returned
    // through the INOUT parameter rather than a result set.
    let next_code = config.routine("get_next_category_code");
    let create_next_code = format!(
        "CREATE OR REPLACE PROCEDURE {next_code}(IN p_category TEXT, INOUT p_code TEXT)
         LANGUAGE plpgsql AS $$
         DECLARE
             seq BIGINT;
         BEGIN
             INSERT INTO {codes} AS c (category, next_value)
             VALUES (p_category, 1)
             ON CONFLICT (category) DO UPDATE SET next_value = c.next_value + 1
             RETURNING next_value INTO seq;
             p_code := p_category || '-' || lpad(seq::text, 4, '0');
         END
         $$"
    );

    sqlx::query(&create_documents).execute(pool).await?;
    sqlx::query(&create_codes).execute(pool).await?;
    sqlx::query(&create_by_type).execute(pool).await?;
    sqlx::query(&create_by_user).execute(pool).await?;
    sqlx::query(&create_toggle).execute(pool).await?;
    sqlx::query(&create_next_code).execute(pool).await?;

    Ok(())
}
