use chrono::NaiveDateTime;
use serde::Deserialize;

/// Format of the `Timestamp` column, e.g. `20240131_174502`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// One row of `report.csv` / `master_report.csv`: the outcome of a single automation run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunReport {
    #[serde(rename = "RunID")]
    pub run_id: String,
    /// Raw timestamp text. Only the historical chart needs it parsed, see `parsed_timestamp`.
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "ConnectionsMade")]
    pub connections_made: u64,
    #[serde(rename = "TotalConnectButtonsFound")]
    pub total_connect_buttons_found: u64,
    #[serde(rename = "TotalProfilesScanned")]
    pub total_profiles_scanned: u64,
}

impl RunReport {
    pub fn parsed_timestamp(&self) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(self.timestamp.trim(), TIMESTAMP_FORMAT)
    }
}

/// Bar categories of the per-run chart, in plotting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Successful,
    Unsuccessful,
    WithoutButton,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Successful => "Successful Connects",
            Category::Unsuccessful => "Unsuccessful/Skipped Connects",
            Category::WithoutButton => "Profiles without Connect Button",
        }
    }
}

/// A non-zero bar of the per-run chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub category: Category,
    pub value: u64,
}

/// One point of each historical series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendPoint {
    pub timestamp: NaiveDateTime,
    pub connections_made: u64,
    /// Profiles scanned minus connections made, clamped at zero.
    pub other_interactions: u64,
}
