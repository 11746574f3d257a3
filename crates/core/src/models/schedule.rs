use chrono::{DateTime, FixedOffset, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{OpsError, OpsResult};
use crate::models::{client::Client, employee::Employee, patch::Numeric, patch::Patch, service::Service};
use crate::serialization::{hh_mm, iso_datetime};
use crate::validation::{check_required, parse_scheduled_date, parse_time_of_day};

pub const DEFAULT_STATUS: &str = "scheduled";

/// Documented status values. Writes are not restricted to this set.
pub const SCHEDULE_STATUSES: [&str; 4] = ["scheduled", "in_progress", "completed", "cancelled"];

pub fn is_known_status(status: &str) -> bool {
    SCHEDULE_STATUSES.contains(&status)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub id: i64,
    pub client_id: i64,
    pub employee_id: i64,
    pub service_id: i64,
    #[serde(serialize_with = "iso_datetime")]
    pub scheduled_date: DateTime<FixedOffset>,
    #[serde(serialize_with = "hh_mm")]
    pub start_time: NaiveTime,
    #[serde(serialize_with = "hh_mm")]
    pub end_time: NaiveTime,
    pub status: String,
    pub notes: Option<String>,
    /// Minutes actually worked, recorded after completion.
    pub actual_duration: Option<i64>,
    pub final_price: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A schedule as returned to callers, with its related records embedded.
///
/// A relation is `None` when the referenced row has since been deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleResponse {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub client: Option<Client>,
    pub employee: Option<Employee>,
    pub service: Option<Service>,
}

impl ScheduleResponse {
    pub fn new(
        schedule: Schedule,
        client: Option<Client>,
        employee: Option<Employee>,
        service: Option<Service>,
    ) -> Self {
        Self {
            schedule,
            client,
            employee,
            service,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSchedule {
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
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScheduleChanges {
    pub client_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub service_id: Option<i64>,
    pub scheduled_date: Option<DateTime<FixedOffset>>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub status: Option<String>,
    pub notes: Option<Option<String>>,
    pub actual_duration: Option<Option<i64>>,
    pub final_price: Option<Option<f64>>,
}

/// Foreign keys of a schedule being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleReferences {
    pub client_id: i64,
    pub employee_id: i64,
    pub service_id: i64,
}

/// Foreign keys supplied in an update; `None` means unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceChanges {
    pub client_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub service_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateScheduleRequest {
    pub client_id: Patch<Numeric>,
    pub employee_id: Patch<Numeric>,
    pub service_id: Patch<Numeric>,
    pub scheduled_date: Patch<String>,
    pub start_time: Patch<String>,
    pub end_time: Patch<String>,
    pub status: Patch<String>,
    pub notes: Patch<String>,
    pub actual_duration: Patch<Numeric>,
    pub final_price: Patch<Numeric>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateScheduleRequest {
    pub client_id: Patch<Numeric>,
    pub employee_id: Patch<Numeric>,
    pub service_id: Patch<Numeric>,
    pub scheduled_date: Patch<String>,
    pub start_time: Patch<String>,
    pub end_time: Patch<String>,
    pub status: Patch<String>,
    pub notes: Patch<String>,
    pub actual_duration: Patch<Numeric>,
    pub final_price: Patch<Numeric>,
}

fn reference(patch: &Patch<Numeric>, field: &'static str) -> OpsResult<Option<i64>> {
    match patch {
        Patch::Absent => Ok(None),
        Patch::Null => Err(OpsError::null_field(field)),
        Patch::Value(value) => value.to_i64(field).map(Some),
    }
}

fn nullable_i64(patch: Patch<Numeric>, field: &'static str) -> OpsResult<Patch<i64>> {
    patch.try_map(|value| value.to_i64(field))
}

fn nullable_f64(patch: Patch<Numeric>, field: &'static str) -> OpsResult<Patch<f64>> {
    patch.try_map(|value| value.to_f64(field))
}

impl CreateScheduleRequest {
    /// Checks every required field is present and resolves the foreign keys.
    pub fn references(&self) -> OpsResult<ScheduleReferences> {
        check_required(&[
            ("client_id", self.client_id.is_missing()),
            ("employee_id", self.employee_id.is_missing()),
            ("service_id", self.service_id.is_missing()),
            ("scheduled_date", self.scheduled_date.is_missing()),
            ("start_time", self.start_time.is_missing()),
            ("end_time", self.end_time.is_missing()),
        ])?;

        Ok(ScheduleReferences {
            client_id: reference(&self.client_id, "client_id")?.ok_or(OpsError::MissingField("client_id"))?,
            employee_id: reference(&self.employee_id, "employee_id")?
                .ok_or(OpsError::MissingField("employee_id"))?,
            service_id: reference(&self.service_id, "service_id")?
                .ok_or(OpsError::MissingField("service_id"))?,
        })
    }

    /// Builds the row to insert. `default_price` is used when `final_price`
    /// was not supplied at all; an explicit `null` is kept.
    pub fn validate(self, default_price: f64) -> OpsResult<NewSchedule> {
        let references = self.references()?;

        let scheduled_date = parse_scheduled_date(&self.scheduled_date.require("scheduled_date")?)?;
        let start_time = parse_time_of_day(&self.start_time.require("start_time")?)?;
        let end_time = parse_time_of_day(&self.end_time.require("end_time")?)?;

        let final_price = match nullable_f64(self.final_price, "final_price")? {
            Patch::Absent => Some(default_price),
            Patch::Null => None,
            Patch::Value(price) => Some(price),
        };

        Ok(NewSchedule {
            client_id: references.client_id,
            employee_id: references.employee_id,
            service_id: references.service_id,
            scheduled_date,
            start_time,
            end_time,
            status: self
                .status
                .optional()
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            notes: self.notes.optional(),
            actual_duration: nullable_i64(self.actual_duration, "actual_duration")?.optional(),
            final_price,
        })
    }
}

impl UpdateScheduleRequest {
    pub fn references(&self) -> OpsResult<ReferenceChanges> {
        Ok(ReferenceChanges {
            client_id: reference(&self.client_id, "client_id")?,
            employee_id: reference(&self.employee_id, "employee_id")?,
            service_id: reference(&self.service_id, "service_id")?,
        })
    }

    pub fn validate(self) -> OpsResult<ScheduleChanges> {
        let references = self.references()?;

        let scheduled_date = self
            .scheduled_date
            .update("scheduled_date")?
            .map(|value| parse_scheduled_date(&value))
            .transpose()?;
        let start_time = self
            .start_time
            .update("start_time")?
            .map(|value| parse_time_of_day(&value))
            .transpose()?;
        let end_time = self
            .end_time
            .update("end_time")?
            .map(|value| parse_time_of_day(&value))
            .transpose()?;

        Ok(ScheduleChanges {
            client_id: references.client_id,
            employee_id: references.employee_id,
            service_id: references.service_id,
            scheduled_date,
            start_time,
            end_time,
            status: self.status.update("status")?,
            notes: self.notes.update_nullable(),
            actual_duration: nullable_i64(self.actual_duration, "actual_duration")?.update_nullable(),
            final_price: nullable_f64(self.final_price, "final_price")?.update_nullable(),
        })
    }
}

impl Schedule {
    pub fn apply(&mut self, changes: ScheduleChanges) {
        if let Some(client_id) = changes.client_id {
            self.client_id = client_id;
        }
        if let Some(employee_id) = changes.employee_id {
            self.employee_id = employee_id;
        }
        if let Some(service_id) = changes.service_id {
            self.service_id = service_id;
        }
        if let Some(scheduled_date) = changes.scheduled_date {
            self.scheduled_date = scheduled_date;
        }
        if let Some(start_time) = changes.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = changes.end_time {
            self.end_time = end_time;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(notes) = changes.notes {
            self.notes = notes;
        }
        if let Some(actual_duration) = changes.actual_duration {
            self.actual_duration = actual_duration;
        }
        if let Some(final_price) = changes.final_price {
            self.final_price = final_price;
        }
    }
}
