//! School repository
//!
//! - list: every row, newest first, one query
//! - create: INSERT ... RETURNING id

use chrono::{DateTime, Utc};
use schoolctl_core::{NewSchool, School};
use sqlx::{FromRow, PgPool};

/// School record from database
#[derive(Debug, Clone, FromRow)]
struct SchoolRow {
    id: i64,
    name: String,
    address: String,
    city: String,
    state: String,
    contact: String,
    email_id: String,
    image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SchoolRow> for School {
    fn from(r: SchoolRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
            city: r.city,
            state: r.state,
            contact: r.contact,
            email_id: r.email_id,
            image: r.image,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// School repository
pub struct SchoolRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SchoolRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every school, newest first.
    ///
    /// `id` breaks ties between rows inserted in the same instant.
    pub async fn list(&self) -> Result<Vec<School>, DbError> {
        let rows: Vec<SchoolRow> = sqlx::query_as(
            r#"
            SELECT id, name, address, city, state, contact, email_id, image,
                   created_at, updated_at
            FROM schools
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(School::from).collect())
    }

    /// Insert a validated school and return its generated id.
    pub async fn create(&self, school: &NewSchool) -> Result<i64, DbError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO schools (name, address, city, state, contact, email_id, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(school.name())
        .bind(school.address())
        .bind(school.city())
        .bind(school.state())
        .bind(school.contact())
        .bind(school.email_id())
        .bind(school.image())
        .fetch_one(self.pool)
        .await?;

        tracing::debug!(id, name = school.name(), "school inserted");
        Ok(id)
    }
}
