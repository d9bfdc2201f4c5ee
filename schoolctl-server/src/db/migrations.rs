//! Schema migrations for the `schools` table

use sqlx::PgPool;

use super::repos::DbError;

/// Create the `schools` table and its index if they do not exist.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running schools migrations...");

    // Rows are never updated, so updated_at only records insert time
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schools (
            id BIGINT GENERATED ALWAYS AS IDENTITY PRIMARY KEY,
            name TEXT NOT NULL CHECK (name <> ''),
            address TEXT NOT NULL CHECK (address <> ''),
            city TEXT NOT NULL CHECK (city <> ''),
            state TEXT NOT NULL CHECK (state <> ''),
            contact VARCHAR(15) NOT NULL CHECK (contact ~ '^[0-9]{10}$'),
            image TEXT,
            email_id VARCHAR(255) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_schools_created ON schools(created_at DESC, id DESC)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Schools migrations complete");
    Ok(())
}
