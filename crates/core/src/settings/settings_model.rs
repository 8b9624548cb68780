use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::{DEFAULT_WINDOW_MONTHS_BACK, DEFAULT_WINDOW_MONTHS_FORWARD};
use crate::errors::Error;

/// Bounds of the display window relative to the reference date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WindowSettings {
    pub months_back: u32,
    pub months_forward: u32,
    /// Fixed lower bound. When set it replaces `months_back`.
    #[serde(default)]
    pub history_floor: Option<NaiveDate>,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            months_back: DEFAULT_WINDOW_MONTHS_BACK,
            months_forward: DEFAULT_WINDOW_MONTHS_FORWARD,
            history_floor: None,
        }
    }
}

/// How the upstream `expected` / `best` / `worst` arrays are read.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ProjectionBasis {
    /// Cumulative index levels; projections are ratios against the anchor level.
    #[default]
    CumulativeLevel,
    /// Per-period returns compounded from the anchor value.
    PeriodReturn,
}

impl FromStr for ProjectionBasis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "level" | "cumulative" | "cumulative_level" => Ok(Self::CumulativeLevel),
            "return" | "period_return" | "returns" => Ok(Self::PeriodReturn),
            other => Err(Error::InvalidConfigValue(format!(
                "unknown projection basis '{}'",
                other
            ))),
        }
    }
}

/// Label style for period dates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum LabelFormat {
    /// dd/mm/yyyy
    #[default]
    DayMonthYear,
    /// Mon yyyy
    MonthYear,
}

impl FromStr for LabelFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "day_month_year" => Ok(Self::DayMonthYear),
            "month" | "month_year" => Ok(Self::MonthYear),
            other => Err(Error::InvalidConfigValue(format!(
                "unknown label format '{}'",
                other
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSettings {
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub projection_basis: ProjectionBasis,
    #[serde(default)]
    pub label_format: LabelFormat,
}
