//! Persistence gateway.
//!
//! One repository trait per entity, each with a SQLite implementation. Every
//! mutating call runs in its own transaction: it commits on success and is
//! rolled back when the transaction is dropped on any error path.

pub mod client;
pub mod employee;
pub mod schedule;
pub mod service;

use async_trait::async_trait;
use cleanops_core::models::{
    client::NewClient, employee::NewEmployee, schedule::NewSchedule, service::NewService, Client,
    Employee, Schedule, Service,
};
use eyre::Result;
use mockall::automock;

pub use client::SqliteClientRepo;
pub use employee::SqliteEmployeeRepo;
pub use schedule::{ScheduleFilter, SqliteScheduleRepo};
pub use service::SqliteServiceRepo;

#[automock]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Client>>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Client>>;
    async fn insert(&self, client: &NewClient) -> Result<Client>;
    /// Writes every business field of `client` and refreshes `updated_at`.
    async fn update(&self, client: &Client) -> Result<Client>;
    /// Returns `false` when no row had that id.
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[automock]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Employee>>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Employee>>;
    async fn insert(&self, employee: &NewEmployee) -> Result<Employee>;
    async fn update(&self, employee: &Employee) -> Result<Employee>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[automock]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Service>>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Service>>;
    async fn insert(&self, service: &NewService) -> Result<Service>;
    async fn update(&self, service: &Service) -> Result<Service>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[automock]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Schedule>>;
    async fn get_by_id(&self, id: i64) -> Result<Option<Schedule>>;
    async fn find_by(&self, filter: ScheduleFilter) -> Result<Vec<Schedule>>;
    async fn insert(&self, schedule: &NewSchedule) -> Result<Schedule>;
    async fn update(&self, schedule: &Schedule) -> Result<Schedule>;
    async fn delete(&self, id: i64) -> Result<bool>;
}
