//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink, OwnerId};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, owner_id, original_url, short_code, custom_alias, \
                            created_at, expiration_date, total_clicks";

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    owner_id: i64,
    original_url: String,
    short_code: String,
    custom_alias: Option<String>,
    created_at: DateTime<Utc>,
    expiration_date: Option<DateTime<Utc>>,
    total_clicks: i64,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            owner_id: OwnerId(row.owner_id),
            original_url: row.original_url,
            short_code: row.short_code,
            custom_alias: row.custom_alias,
            created_at: row.created_at,
            expiration_date: row.expiration_date,
            total_clicks: row.total_clicks,
        }
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let sql = format!(
            "INSERT INTO links (owner_id, original_url, short_code, custom_alias, expiration_date) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {LINK_COLUMNS}"
        );

        let row: LinkRow = sqlx::query_as(&sql)
            .bind(new_link.owner_id.0)
            .bind(&new_link.original_url)
            .bind(&new_link.short_code)
            .bind(&new_link.custom_alias)
            .bind(new_link.expiration_date)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let sql = format!("SELECT {LINK_COLUMNS} FROM links WHERE short_code = $1");

        let row: Option<LinkRow> = sqlx::query_as(&sql)
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_owner(&self, owner_id: OwnerId) -> Result<Vec<Link>, AppError> {
        let sql = format!(
            "SELECT {LINK_COLUMNS} FROM links \
             WHERE owner_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );

        let rows: Vec<LinkRow> = sqlx::query_as(&sql)
            .bind(owner_id.0)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
