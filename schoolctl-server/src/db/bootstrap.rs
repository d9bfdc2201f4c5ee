//! Create the target database on first run
//!
//! PostgreSQL has no `CREATE DATABASE IF NOT EXISTS`, so this connects to the
//! `postgres` maintenance database, checks `pg_database`, and creates the
//! target only when it is missing.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::{ConnectOptions, Connection};

use super::repos::DbError;

/// Database used for the existence check and `CREATE DATABASE`.
const MAINTENANCE_DB: &str = "postgres";

/// Ensure the database named in `database_url` exists.
///
/// Returns `true` if it had to be created. When the maintenance database
/// can't be reached (for example the role may only connect to its own
/// database) this logs a warning and returns `false`; connecting to the
/// target afterwards reports the real problem if it is missing.
pub async fn ensure_database(database_url: &str) -> Result<bool, DbError> {
    let options = PgConnectOptions::from_str(database_url)?;
    let Some(name) = options.get_database().map(str::to_owned) else {
        // No database in the URL: the server default is used and always exists
        return Ok(false);
    };

    if name == MAINTENANCE_DB {
        return Ok(false);
    }

    let connected: Result<PgConnection, sqlx::Error> = options
        .clone()
        .database(MAINTENANCE_DB)
        .disable_statement_logging()
        .connect()
        .await;
    let mut conn = match connected {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!(
                database = %name,
                error = %e,
                "cannot reach maintenance database, assuming target exists"
            );
            return Ok(false);
        }
    };

    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&name)
            .fetch_one(&mut conn)
            .await?;

    if !exists {
        tracing::info!(database = %name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&name)))
            .execute(&mut conn)
            .await?;
    }

    conn.close().await?;
    Ok(!exists)
}

/// Quote an SQL identifier, doubling embedded quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("school_management"), "\"school_management\"");
        assert_eq!(quote_ident("odd\"name"), "\"odd\"\"name\"");
    }

    #[tokio::test]
    async fn rejects_malformed_url() {
        let err = ensure_database("not a url").await.unwrap_err();
        assert!(matches!(err, DbError::Sqlx(_)));
    }

    #[tokio::test]
    async fn unreachable_maintenance_database_is_skipped() {
        let created = ensure_database("postgres://schoolctl@127.0.0.1:1/school_management")
            .await
            .expect("bootstrap should not abort startup");
        assert!(!created);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn existing_database_is_left_alone() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        ensure_database(&url).await.expect("first call");
        let created = ensure_database(&url).await.expect("second call");
        assert!(!created);
    }
}
