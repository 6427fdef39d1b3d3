//! GridArea - Metering Grid Area Data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Price area a grid area belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceAreaCode {
    #[serde(rename = "DK1")]
    Dk1,
    #[serde(rename = "DK2")]
    Dk2,
}

impl PriceAreaCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceAreaCode::Dk1 => "DK1",
            PriceAreaCode::Dk2 => "DK2",
        }
    }
}

/// A grid area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridArea {
    pub id: String,
    /// Three-digit grid area code
    pub code: String,
    pub name: String,
    pub price_area_code: PriceAreaCode,
    pub valid_from: DateTime<Utc>,
    #[serde(default)]
    pub valid_to: Option<DateTime<Utc>>,
}

impl GridArea {
    /// Whether the grid area is in effect at `at`
    pub fn is_valid_at(&self, at: DateTime<Utc>) -> bool {
        self.valid_from <= at && self.valid_to.is_none_or(|to| at < to)
    }
}
