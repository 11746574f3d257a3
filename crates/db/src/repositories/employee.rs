use async_trait::async_trait;
use chrono::Utc;
use cleanops_core::models::{employee::NewEmployee, Employee};
use eyre::Result;

use crate::{models::DbEmployee, repositories::EmployeeRepository, DbPool};

pub struct SqliteEmployeeRepo {
    pool: DbPool,
}

impl SqliteEmployeeRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for SqliteEmployeeRepo {
    async fn list_all(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, DbEmployee>("SELECT * FROM employees ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Employee>> {
        tracing::debug!("Getting employee by id: {}", id);

        let row = sqlx::query_as::<_, DbEmployee>("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Employee::from))
    }

    async fn insert(&self, employee: &NewEmployee) -> Result<Employee> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DbEmployee>(
            r#"
            INSERT INTO employees
                (name, email, phone, position, hourly_rate, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(&employee.position)
        .bind(employee.hourly_rate)
        .bind(employee.is_active)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("Employee created successfully: id={}", row.id);
        Ok(row.into())
    }

    async fn update(&self, employee: &Employee) -> Result<Employee> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DbEmployee>(
            r#"
            UPDATE employees
            SET name = ?, email = ?, phone = ?, position = ?, hourly_rate = ?,
                is_active = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(&employee.position)
        .bind(employee.hourly_rate)
        .bind(employee.is_active)
        .bind(Utc::now())
        .bind(employee.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
