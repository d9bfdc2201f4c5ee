//! schoolctl-server: HTTP API over the `schools` table
//!
//! - `GET /api/schools`: full listing, newest first
//! - `POST /api/schools`: validate and insert one school
//! - `POST /api/upload`: store an image, return its public path
//! - `GET /uploads/*`: serve stored images

pub mod db;
pub mod http;

pub use db::{create_pool, ensure_database, DbError, SchoolRepo};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};

/// Create the database if needed, connect, and bring the schema up to date.
pub async fn prepare_database(
    database_url: &str,
    max_connections: u32,
) -> Result<sqlx::PgPool, DbError> {
    ensure_database(database_url).await?;
    let pool = db::pool::create_pool_with_options(database_url, max_connections).await?;
    db::migrations::run(&pool).await?;
    Ok(pool)
}
