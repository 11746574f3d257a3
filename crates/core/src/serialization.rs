//! Wire formats for the date and time fields of serialized records.

use chrono::{DateTime, FixedOffset, NaiveTime};
use serde::Serializer;

use crate::validation::{render_datetime, render_time_of_day};

pub fn iso_datetime<S>(value: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&render_datetime(value))
}

pub fn hh_mm<S>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&render_time_of_day(value))
}
