use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};

/// One short term forecast entry, derived from a single 3-hour sample
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecastEntry {
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub timestamp: DateTime<Utc>,
    pub temperature: i32,
    pub icon_id: String,
    pub description: String,
}

/// Day level summary over all samples sharing one UTC calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub date: String,
    pub temp_min: i32,
    pub temp_max: i32,
    pub icon_id: String,
    pub description: String,
}

/// The normalized forecast as consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastView {
    pub city_name: String,
    pub hourly: Vec<HourlyForecastEntry>,
    pub daily: Vec<DailyForecastEntry>,
}
