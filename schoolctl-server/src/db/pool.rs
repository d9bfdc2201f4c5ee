//! Postgres pool for the school API

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Used when `[database].max_connections` is not configured
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// A request fails with a storage error once it has waited this long for a connection.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Connect with [`DEFAULT_MAX_CONNECTIONS`].
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/school_management").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Connect with an explicit connection cap. Fails if the first connection can't be made.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;

    tracing::debug!(max_connections, "database pool ready");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn malformed_url_is_an_error() {
        assert!(create_pool("not a url").await.is_err());
    }

    // DATABASE_URL=postgres://... cargo test -p schoolctl-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn parallel_listings_share_a_small_pool() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool_with_options(&url, 2).await.expect("pool");
        crate::db::migrations::run(&pool).await.expect("migrations");

        // More requests than connections; each waits for a free one
        let handles: Vec<_> = (0..6)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move { crate::db::SchoolRepo::new(&pool).list().await })
            })
            .collect();

        for handle in handles {
            handle.await.expect("task panicked").expect("list failed");
        }
    }
}
