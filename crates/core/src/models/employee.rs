use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{OpsError, OpsResult};
use crate::validation::check_required;
use crate::models::patch::{require_f64, Numeric, Patch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Free text; "cleaner", "supervisor" and "manager" are the usual values.
    pub position: String,
    pub hourly_rate: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub hourly_rate: f64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub hourly_rate: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateEmployeeRequest {
    pub name: Patch<String>,
    pub email: Patch<String>,
    pub phone: Patch<String>,
    pub position: Patch<String>,
    pub hourly_rate: Patch<Numeric>,
    pub is_active: Patch<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateEmployeeRequest {
    pub name: Patch<String>,
    pub email: Patch<String>,
    pub phone: Patch<String>,
    pub position: Patch<String>,
    pub hourly_rate: Patch<Numeric>,
    pub is_active: Patch<bool>,
}

fn check_rate(rate: f64) -> OpsResult<f64> {
    if rate < 0.0 {
        return Err(OpsError::Validation(
            "Field hourly_rate must not be negative".to_string(),
        ));
    }
    Ok(rate)
}

impl CreateEmployeeRequest {
    pub fn validate(self) -> OpsResult<NewEmployee> {
        check_required(&[
            ("name", self.name.is_missing()),
            ("email", self.email.is_missing()),
            ("phone", self.phone.is_missing()),
            ("position", self.position.is_missing()),
            ("hourly_rate", self.hourly_rate.is_missing()),
        ])?;

        let name = self.name.require("name")?;
        let email = self.email.require("email")?;
        let phone = self.phone.require("phone")?;
        let position = self.position.require("position")?;
        let hourly_rate = check_rate(require_f64(self.hourly_rate, "hourly_rate")?)?;

        Ok(NewEmployee {
            name,
            email,
            phone,
            position,
            hourly_rate,
            is_active: self.is_active.optional().unwrap_or(true),
        })
    }
}

impl UpdateEmployeeRequest {
    pub fn validate(self) -> OpsResult<EmployeeChanges> {
        let hourly_rate = self
            .hourly_rate
            .update("hourly_rate")?
            .map(|rate| rate.to_f64("hourly_rate").and_then(check_rate))
            .transpose()?;

        Ok(EmployeeChanges {
            name: self.name.update("name")?,
            email: self.email.update("email")?,
            phone: self.phone.update("phone")?,
            position: self.position.update("position")?,
            hourly_rate,
            is_active: self.is_active.update("is_active")?,
        })
    }
}

impl Employee {
    pub fn apply(&mut self, changes: EmployeeChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        if let Some(position) = changes.position {
            self.position = position;
        }
        if let Some(hourly_rate) = changes.hourly_rate {
            self.hourly_rate = hourly_rate;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
    }
}
