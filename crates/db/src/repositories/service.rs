use async_trait::async_trait;
use chrono::Utc;
use cleanops_core::models::{service::NewService, Service};
use eyre::Result;

use crate::{models::DbService, repositories::ServiceRepository, DbPool};

pub struct SqliteServiceRepo {
    pool: DbPool,
}

impl SqliteServiceRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for SqliteServiceRepo {
    async fn list_all(&self) -> Result<Vec<Service>> {
        let rows = sqlx::query_as::<_, DbService>("SELECT * FROM services ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Service::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Service>> {
        tracing::debug!("Getting service by id: {}", id);

        let row = sqlx::query_as::<_, DbService>("SELECT * FROM services WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Service::from))
    }

    async fn insert(&self, service: &NewService) -> Result<Service> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DbService>(
            r#"
            INSERT INTO services
                (name, description, base_price, estimated_duration, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.base_price)
        .bind(service.estimated_duration)
        .bind(service.is_active)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("Service created successfully: id={}", row.id);
        Ok(row.into())
    }

    async fn update(&self, service: &Service) -> Result<Service> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DbService>(
            r#"
            UPDATE services
            SET name = ?, description = ?, base_price = ?, estimated_duration = ?,
                is_active = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.base_price)
        .bind(service.estimated_duration)
        .bind(service.is_active)
        .bind(Utc::now())
        .bind(service.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
