use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PRECIPITATION_MM: f64 = 0.0;
pub const DEFAULT_WIND_SPEED_KPH: f64 = 0.0;
pub const DEFAULT_HUMIDITY_PERCENT: f64 = 50.0;
pub const DEFAULT_UV_INDEX: f64 = 5.0;

/// One forecast day with every optional provider field already resolved to a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub average_temperature_c: f64,
    pub total_precipitation_mm: f64,
    pub max_wind_speed_kph: f64,
    pub average_humidity_percent: f64,
    pub uv_index: f64,
    pub condition_text: String,
}

impl DailyObservation {
    /// Observation with the documented defaults for precipitation, wind, humidity and UV.
    pub fn new(date: NaiveDate, average_temperature_c: f64, condition_text: impl Into<String>) -> Self {
        Self {
            date,
            average_temperature_c,
            total_precipitation_mm: DEFAULT_PRECIPITATION_MM,
            max_wind_speed_kph: DEFAULT_WIND_SPEED_KPH,
            average_humidity_percent: DEFAULT_HUMIDITY_PERCENT,
            uv_index: DEFAULT_UV_INDEX,
            condition_text: condition_text.into(),
        }
    }
}

/// A ranked 3-day travel window, shaped the way the front end renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "dateRange")]
    pub date_range_label: String,
    #[serde(rename = "condition")]
    pub representative_condition: String,
    #[serde(rename = "temperature")]
    pub average_temperature_c: i32,
    pub score: u8,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSuggestionResponse {
    pub destination: String,
    pub duration: u32,
    pub recommendations: Vec<Recommendation>,
    pub generated: DateTime<Utc>,
    pub source: RecommendationSource,
}
