use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{OpsError, OpsResult};
use crate::validation::check_required;
use crate::models::patch::{require_f64, require_i64, Numeric, Patch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    /// Minutes.
    pub estimated_duration: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub base_price: f64,
    pub estimated_duration: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub base_price: Option<f64>,
    pub estimated_duration: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateServiceRequest {
    pub name: Patch<String>,
    pub description: Patch<String>,
    pub base_price: Patch<Numeric>,
    pub estimated_duration: Patch<Numeric>,
    pub is_active: Patch<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateServiceRequest {
    pub name: Patch<String>,
    pub description: Patch<String>,
    pub base_price: Patch<Numeric>,
    pub estimated_duration: Patch<Numeric>,
    pub is_active: Patch<bool>,
}

fn check_price(price: f64) -> OpsResult<f64> {
    if price < 0.0 {
        return Err(OpsError::Validation(
            "Field base_price must not be negative".to_string(),
        ));
    }
    Ok(price)
}

fn check_duration(minutes: i64) -> OpsResult<i64> {
    if minutes <= 0 {
        return Err(OpsError::Validation(
            "Field estimated_duration must be positive".to_string(),
        ));
    }
    Ok(minutes)
}

impl CreateServiceRequest {
    pub fn validate(self) -> OpsResult<NewService> {
        check_required(&[
            ("name", self.name.is_missing()),
            ("base_price", self.base_price.is_missing()),
            ("estimated_duration", self.estimated_duration.is_missing()),
        ])?;

        let name = self.name.require("name")?;
        let base_price = check_price(require_f64(self.base_price, "base_price")?)?;
        let estimated_duration =
            check_duration(require_i64(self.estimated_duration, "estimated_duration")?)?;

        Ok(NewService {
            name,
            description: self.description.optional(),
            base_price,
            estimated_duration,
            is_active: self.is_active.optional().unwrap_or(true),
        })
    }
}

impl UpdateServiceRequest {
    pub fn validate(self) -> OpsResult<ServiceChanges> {
        let base_price = self
            .base_price
            .update("base_price")?
            .map(|price| price.to_f64("base_price").and_then(check_price))
            .transpose()?;
        let estimated_duration = self
            .estimated_duration
            .update("estimated_duration")?
            .map(|minutes| minutes.to_i64("estimated_duration").and_then(check_duration))
            .transpose()?;

        Ok(ServiceChanges {
            name: self.name.update("name")?,
            description: self.description.update_nullable(),
            base_price,
            estimated_duration,
            is_active: self.is_active.update("is_active")?,
        })
    }
}

impl Service {
    pub fn apply(&mut self, changes: ServiceChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(base_price) = changes.base_price {
            self.base_price = base_price;
        }
        if let Some(estimated_duration) = changes.estimated_duration {
            self.estimated_duration = estimated_duration;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
    }
}
