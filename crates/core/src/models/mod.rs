pub mod client;
pub mod employee;
pub mod patch;
pub mod schedule;
pub mod service;

pub use client::Client;
pub use employee::Employee;
pub use patch::{Numeric, Patch};
pub use schedule::{Schedule, ScheduleResponse};
pub use service::Service;
