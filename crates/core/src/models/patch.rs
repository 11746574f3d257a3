use serde::{Deserialize, Deserializer};

use crate::errors::{OpsError, OpsResult};

/// A request field that distinguishes a missing key from an explicit `null`.
///
/// Fields of this type must be annotated with `#[serde(default)]` so that an
/// absent key deserializes to [`Patch::Absent`].
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}

impl<T> Patch<T> {
    /// Absent or `null`.
    pub fn is_missing(&self) -> bool {
        !matches!(self, Patch::Value(_))
    }

    /// A required field on create: absent and `null` both count as missing.
    pub fn require(self, field: &'static str) -> OpsResult<T> {
        match self {
            Patch::Value(value) => Ok(value),
            Patch::Absent | Patch::Null => Err(OpsError::MissingField(field)),
        }
    }

    /// An optional field on create: absent and `null` both mean "not set".
    pub fn optional(self) -> Option<T> {
        match self {
            Patch::Value(value) => Some(value),
            Patch::Absent | Patch::Null => None,
        }
    }

    /// A non-nullable field on update. `None` leaves the stored value alone.
    pub fn update(self, field: &'static str) -> OpsResult<Option<T>> {
        match self {
            Patch::Absent => Ok(None),
            Patch::Null => Err(OpsError::null_field(field)),
            Patch::Value(value) => Ok(Some(value)),
        }
    }

    /// A nullable field on update. The outer `None` leaves the stored value
    /// alone, `Some(None)` clears it.
    pub fn update_nullable(self) -> Option<Option<T>> {
        match self {
            Patch::Absent => None,
            Patch::Null => Some(None),
            Patch::Value(value) => Some(Some(value)),
        }
    }

    pub fn try_map<U>(self, f: impl FnOnce(T) -> OpsResult<U>) -> OpsResult<Patch<U>> {
        Ok(match self {
            Patch::Absent => Patch::Absent,
            Patch::Null => Patch::Null,
            Patch::Value(value) => Patch::Value(f(value)?),
        })
    }
}

/// A numeric input as clients send it: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    pub fn to_f64(&self, field: &'static str) -> OpsResult<f64> {
        let value = match self {
            Numeric::Int(value) => *value as f64,
            Numeric::Float(value) => *value,
            Numeric::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| OpsError::invalid_value(field))?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(OpsError::invalid_value(field))
        }
    }

    pub fn to_i64(&self, field: &'static str) -> OpsResult<i64> {
        match self {
            Numeric::Int(value) => Ok(*value),
            // `i64::MAX as f64` rounds up to 2^63, which is already out of range
            Numeric::Float(value)
                if value.fract() == 0.0 && *value >= i64::MIN as f64 && *value < i64::MAX as f64 =>
            {
                Ok(*value as i64)
            }
            Numeric::Float(_) => Err(OpsError::invalid_value(field)),
            Numeric::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| OpsError::invalid_value(field)),
        }
    }
}

/// Coerces a required numeric create field to `f64`.
pub fn require_f64(patch: Patch<Numeric>, field: &'static str) -> OpsResult<f64> {
    patch.require(field)?.to_f64(field)
}

/// Coerces a required numeric create field to `i64`.
pub fn require_i64(patch: Patch<Numeric>, field: &'static str) -> OpsResult<i64> {
    patch.require(field)?.to_i64(field)
}
