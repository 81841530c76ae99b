//! Record identifiers and loosely typed numeric fields.
//!
//! Ids are plain integers (milliseconds since the epoch at creation time).
//! Older data was written straight from form fields, so ids and day counts
//! may be stored as numbers, numeric strings or `null`. The helpers here
//! decode all of those.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};

pub type EmployeeId = i64;
pub type VacationId = i64;
pub type AbsenceId = i64;

/// Integer from a number or numeric string; `null` and `""` yield `None`.
struct LooseInt {
    what: &'static str,
}

impl LooseInt {
    fn integral<E: de::Error>(&self, v: f64) -> Result<Option<i64>, E> {
        if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            Ok(Some(v as i64))
        } else {
            Err(E::custom(format!("{} must be an integer, got {v}", self.what)))
        }
    }
}

impl<'de> Visitor<'de> for LooseInt {
    type Value = Option<i64>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{} as a number or numeric string", self.what)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(Some)
            .map_err(|_| E::custom(format!("{} out of range: {v}", self.what)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        self.integral(v)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let s = v.trim();
        if s.is_empty() {
            return Ok(None);
        }
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Some(n));
        }
        match s.parse::<f64>() {
            Ok(f) => self.integral(f),
            Err(_) => Err(E::custom(format!("{} must be numeric, got {v:?}", self.what))),
        }
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

/// Accept `17`, `17.0` or `"17"` for an id field. An id is never optional.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer
        .deserialize_any(LooseInt { what: "id" })?
        .ok_or_else(|| de::Error::custom("id is required"))
}

/// Day count from a number or numeric string; `null` and `""` yield `None`.
pub fn lenient_count_opt<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match deserializer.deserialize_any(LooseInt { what: "day count" })? {
        None => Ok(None),
        Some(v) => u32::try_from(v)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("day count out of range: {v}"))),
    }
}

/// Day count where `null` means zero.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_count_opt(deserializer).map(Option::unwrap_or_default)
}
