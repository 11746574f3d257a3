use async_trait::async_trait;
use chrono::Utc;
use cleanops_core::models::{client::NewClient, Client};
use eyre::Result;

use crate::{models::DbClient, repositories::ClientRepository, DbPool};

pub struct SqliteClientRepo {
    pool: DbPool,
}

impl SqliteClientRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for SqliteClientRepo {
    async fn list_all(&self) -> Result<Vec<Client>> {
        let rows = sqlx::query_as::<_, DbClient>("SELECT * FROM clients ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Client::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Client>> {
        tracing::debug!("Getting client by id: {}", id);

        let row = sqlx::query_as::<_, DbClient>("SELECT * FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Client::from))
    }

    async fn insert(&self, client: &NewClient) -> Result<Client> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DbClient>(
            r#"
            INSERT INTO clients (name, email, phone, address, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("Client created successfully: id={}", row.id);
        Ok(row.into())
    }

    async fn update(&self, client: &Client) -> Result<Client> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DbClient>(
            r#"
            UPDATE clients
            SET name = ?, email = ?, phone = ?, address = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(Utc::now())
        .bind(client.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
