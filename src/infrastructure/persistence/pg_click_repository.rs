//! PostgreSQL implementation of the click event log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::ClickRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    link_id: i64,
    clicked_at: DateTime<Utc>,
    ip: Option<String>,
    device: Option<String>,
    browser: Option<String>,
    location: Option<String>,
}

impl From<ClickRow> for Click {
    fn from(row: ClickRow) -> Self {
        Click {
            id: row.id,
            link_id: row.link_id,
            timestamp: row.clicked_at,
            ip: row.ip,
            device: row.device,
            browser: row.browser,
            location: row.location,
        }
    }
}

/// PostgreSQL repository for click events.
///
/// Every insert bumps `links.total_clicks` in the same transaction.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut tx = self.pool.begin().await?;

        let row: ClickRow = sqlx::query_as(
            r#"
            INSERT INTO click_events (link_id, clicked_at, ip, device, browser, location)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, link_id, clicked_at, ip, device, browser, location
            "#,
        )
        .bind(new_click.link_id)
        .bind(new_click.timestamp)
        .bind(&new_click.ip)
        .bind(&new_click.device)
        .bind(&new_click.browser)
        .bind(&new_click.location)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE links SET total_clicks = total_clicks + 1 WHERE id = $1")
            .bind(new_click.link_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn find_by_link_ids(&self, link_ids: &[i64]) -> Result<Vec<Click>, AppError> {
        if link_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<ClickRow> = sqlx::query_as(
            r#"
            SELECT id, link_id, clicked_at, ip, device, browser, location
            FROM click_events
            WHERE link_id = ANY($1)
            ORDER BY clicked_at, id
            "#,
        )
        .bind(link_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Click::from).collect())
    }
}
