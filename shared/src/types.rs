//! Common types used across the platform

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive date range for list/report filters.
///
/// The UI sends plain `YYYY-MM-DD` values; `to` is interpreted as "up to and
/// including that day", so queries must compare against the start of the
/// following day.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Exclusive upper bound: the day after `to`, if set.
    pub fn to_exclusive(&self) -> Option<NaiveDate> {
        self.to.map(|d| d.succ_opt().unwrap_or(d))
    }
}

/// Entity activation status, shared by clients, suppliers, employees and users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityStatus {
    #[serde(rename = "Activo")]
    Activo,
    #[serde(rename = "Inactivo")]
    Inactivo,
}

impl EntityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::Activo => "Activo",
            EntityStatus::Inactivo => "Inactivo",
        }
    }

    /// Flip between Activo and Inactivo.
    pub fn toggled(self) -> Self {
        match self {
            EntityStatus::Activo => EntityStatus::Inactivo,
            EntityStatus::Inactivo => EntityStatus::Activo,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Activo" => Some(EntityStatus::Activo),
            "Inactivo" => Some(EntityStatus::Inactivo),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_date_range_exclusive_bound() {
        let range = DateRange {
            from: None,
            to: Some(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()),
        };
        assert_eq!(
            range.to_exclusive(),
            Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        );
    }

    #[test]
    fn test_entity_status_toggle() {
        assert_eq!(EntityStatus::Activo.toggled(), EntityStatus::Inactivo);
        assert_eq!(EntityStatus::Inactivo.toggled(), EntityStatus::Activo);
    }

    #[test]
    fn test_entity_status_parse() {
        assert_eq!(EntityStatus::parse("Activo"), Some(EntityStatus::Activo));
        assert_eq!(EntityStatus::parse("Inactivo"), Some(EntityStatus::Inactivo));
        assert_eq!(EntityStatus::parse("activo"), None);
    }
}
