//! # Cleanops Core
//!
//! Entity records, request payloads and the validation/serialization contract
//! shared by the persistence and HTTP crates.
//!
//! - **models**: Client, Employee, Service and Schedule plus their create and
//!   partial-update payloads
//! - **validation**: required-field checks and date/time parsing
//! - **serialization**: wire formats for date and time fields
//! - **errors**: the error taxonomy surfaced to callers

pub mod errors;
pub mod models;
pub mod serialization;
pub mod validation;
