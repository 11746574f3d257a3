use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use cleanops_core::models::{Client, Employee, Schedule, Service};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClient {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEmployee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub hourly_rate: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub estimated_duration: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: i64,
    pub client_id: i64,
    pub employee_id: i64,
    pub service_id: i64,
    pub scheduled_date: DateTime<FixedOffset>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub notes: Option<String>,
    pub actual_duration: Option<i64>,
    pub final_price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<DbClient> for Client {
    fn from(row: DbClient) -> Self {
        Client {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbEmployee> for Employee {
    fn from(row: DbEmployee) -> Self {
        Employee {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            position: row.position,
            hourly_rate: row.hourly_rate,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbService> for Service {
    fn from(row: DbService) -> Self {
        Service {
            id: row.id,
            name: row.name,
            description: row.description,
            base_price: row.base_price,
            estimated_duration: row.estimated_duration,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbSchedule> for Schedule {
    fn from(row: DbSchedule) -> Self {
        Schedule {
            id: row.id,
            client_id: row.client_id,
            employee_id: row.employee_id,
            service_id: row.service_id,
            scheduled_date: row.scheduled_date,
            start_time: row.start_time,
            end_time: row.end_time,
            status: row.status,
            notes: row.notes,
            actual_duration: row.actual_duration,
            final_price: row.final_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
