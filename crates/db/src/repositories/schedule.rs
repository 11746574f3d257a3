use async_trait::async_trait;
use chrono::Utc;
use cleanops_core::models::{schedule::NewSchedule, Schedule};
use eyre::Result;

use crate::{models::DbSchedule, repositories::ScheduleRepository, DbPool};

/// The two foreign keys schedules can be listed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFilter {
    Employee(i64),
    Client(i64),
}

impl ScheduleFilter {
    fn column(&self) -> &'static str {
        match self {
            ScheduleFilter::Employee(_) => "employee_id",
            ScheduleFilter::Client(_) => "client_id",
        }
    }

    fn value(&self) -> i64 {
        match self {
            ScheduleFilter::Employee(id) | ScheduleFilter::Client(id) => *id,
        }
    }
}

pub struct SqliteScheduleRepo {
    pool: DbPool,
}

impl SqliteScheduleRepo {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepo {
    async fn list_all(&self) -> Result<Vec<Schedule>> {
        let rows = sqlx::query_as::<_, DbSchedule>("SELECT * FROM schedules ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Schedule::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Schedule>> {
        tracing::debug!("Getting schedule by id: {}", id);

        let row = sqlx::query_as::<_, DbSchedule>("SELECT * FROM schedules WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Schedule::from))
    }

    async fn find_by(&self, filter: ScheduleFilter) -> Result<Vec<Schedule>> {
        tracing::debug!("Listing schedules by {}={}", filter.column(), filter.value());

        let sql = format!(
            "SELECT * FROM schedules WHERE {} = ? ORDER BY id ASC",
            filter.column()
        );
        let rows = sqlx::query_as::<_, DbSchedule>(&sql)
            .bind(filter.value())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Schedule::from).collect())
    }

    async fn insert(&self, schedule: &NewSchedule) -> Result<Schedule> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DbSchedule>(
            r#"
            INSERT INTO schedules (
                client_id, employee_id, service_id, scheduled_date, start_time, end_time,
                status, notes, actual_duration, final_price, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(schedule.client_id)
        .bind(schedule.employee_id)
        .bind(schedule.service_id)
        .bind(schedule.scheduled_date)
        .bind(schedule.start_time)
        .bind(schedule.end_time)
        .bind(&schedule.status)
        .bind(&schedule.notes)
        .bind(schedule.actual_duration)
        .bind(schedule.final_price)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            "Schedule created successfully: id={}, client_id={}, employee_id={}",
            row.id,
            row.client_id,
            row.employee_id
        );
        Ok(row.into())
    }

    async fn update(&self, schedule: &Schedule) -> Result<Schedule> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DbSchedule>(
            r#"
            UPDATE schedules
            SET client_id = ?, employee_id = ?, service_id = ?, scheduled_date = ?,
                start_time = ?, end_time = ?, status = ?, notes = ?, actual_duration = ?,
                final_price = ?, updated_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(schedule.client_id)
        .bind(schedule.employee_id)
        .bind(schedule.service_id)
        .bind(schedule.scheduled_date)
        .bind(schedule.start_time)
        .bind(schedule.end_time)
        .bind(&schedule.status)
        .bind(&schedule.notes)
        .bind(schedule.actual_duration)
        .bind(schedule.final_price)
        .bind(Utc::now())
        .bind(schedule.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM schedules WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
