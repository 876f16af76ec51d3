//! PostgreSQL implementation of owner repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Owner, OwnerId};
use crate::domain::repositories::OwnerRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct OwnerRow {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<OwnerRow> for Owner {
    fn from(row: OwnerRow) -> Self {
        Owner {
            id: OwnerId(row.id),
            name: row.name,
            created_at: row.created_at,
        }
    }
}

pub struct PgOwnerRepository {
    pool: Arc<PgPool>,
}

impl PgOwnerRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OwnerRepository for PgOwnerRepository {
    async fn create(&self, name: &str) -> Result<Owner, AppError> {
        let row: OwnerRow =
            sqlx::query_as("INSERT INTO owners (name) VALUES ($1) RETURNING id, name, created_at")
                .bind(name)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: OwnerId) -> Result<Option<Owner>, AppError> {
        let row: Option<OwnerRow> =
            sqlx::query_as("SELECT id, name, created_at FROM owners WHERE id = $1")
                .bind(id.0)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(Owner::from))
    }

    async fn list(&self) -> Result<Vec<Owner>, AppError> {
        let rows: Vec<OwnerRow> =
            sqlx::query_as("SELECT id, name, created_at FROM owners ORDER BY created_at, id")
                .fetch_all(self.pool.as_ref())
                .await?;

        Ok(rows.into_iter().map(Owner::from).collect())
    }
}
