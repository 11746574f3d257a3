pub mod client;
pub mod employee;
pub mod health;
pub mod schedule;
pub mod service;
