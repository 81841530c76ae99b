use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::ids::{lenient_count, lenient_count_opt, lenient_id, EmployeeId};

pub const DEFAULT_TOTAL_DAYS: u32 = 22;
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// Job category an employee is filed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Administrativo,
    Condutor,
    #[serde(rename = "Armazém")]
    Armazem,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Administrativo => "Administrativo",
            Role::Condutor => "Condutor",
            Role::Armazem => "Armazém",
        };
        f.write_str(label)
    }
}

/// Employee record with its vacation balance.
///
/// `used` is owned by the vacation store: it is the sum of `work_days` over
/// the employee's booked vacations and never goes below zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(deserialize_with = "lenient_id")]
    pub id: EmployeeId,
    pub name: String,
    pub role: Role,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(rename = "totalDays", default = "default_total_days", deserialize_with = "total_days_or_default")]
    pub total_days: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub used: u32,
}

fn default_total_days() -> u32 {
    DEFAULT_TOTAL_DAYS
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

/// `totalDays` came from `parseInt` on a form field; a failed parse was
/// stored as `null` and falls back to the default allowance.
fn total_days_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    lenient_count_opt(deserializer).map(|days| days.unwrap_or(DEFAULT_TOTAL_DAYS))
}

impl Employee {
    /// The example employee written into an empty store on first read.
    pub fn seed() -> Self {
        Self {
            id: 1,
            name: "Exemplo AAF".into(),
            role: Role::Administrativo,
            color: "#1e3a8a".into(),
            total_days: DEFAULT_TOTAL_DAYS,
            used: 0,
        }
    }

    /// Build a fresh record; any `used` the caller sent is discarded.
    pub fn from_input(id: EmployeeId, input: EmployeeInput) -> Self {
        Self {
            id,
            name: input.name,
            role: input.role,
            color: input.color,
            total_days: input.total_days,
            used: 0,
        }
    }

    /// Shallow overwrite of the fields present in `patch`.
    pub fn apply(&mut self, patch: EmployeePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(total_days) = patch.total_days {
            self.total_days = total_days;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }

    pub fn remaining_days(&self) -> u32 {
        self.total_days.saturating_sub(self.used)
    }
}

/// Fields accepted when creating an employee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub name: String,
    pub role: Role,
    #[serde(rename = "totalDays", default = "default_total_days", deserialize_with = "total_days_or_default")]
    pub total_days: u32,
    /// Accepted for compatibility with existing forms; never stored.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_count_opt")]
    pub used: Option<u32>,
    #[serde(default = "default_color")]
    pub color: String,
}

impl EmployeeInput {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            total_days: DEFAULT_TOTAL_DAYS,
            used: None,
            color: default_color(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("name required".into()));
        }
        Ok(())
    }
}

/// Partial update. `id` and `used` are not patchable; unknown fields are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(
        rename = "totalDays",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_count_opt"
    )]
    pub total_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl EmployeePatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        if matches!(&self.name, Some(n) if n.trim().is_empty()) {
            return Err(ModelError::Validation("name cannot be blank".into()));
        }
        Ok(())
    }
}
