//! Forecast provider integration (WeatherAPI.com `forecast.json`).
//!
//! The provider payload is converted into [`DailyObservation`] values here, with every
//! optional field resolved to its documented default, before anything is scored.
//! When the provider cannot be reached the caller gets a static set of recommendations
//! tagged as fallback data instead of an error.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::AppConfig;
use crate::models::weather::{
    DailyObservation, Recommendation, RecommendationSource, WeatherSuggestionResponse,
    DEFAULT_HUMIDITY_PERCENT, DEFAULT_PRECIPITATION_MM, DEFAULT_UV_INDEX, DEFAULT_WIND_SPEED_KPH,
};
use crate::services::weather_window::WeatherWindowScorer;

const UNKNOWN_CONDITION: &str = "Variable";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("WEATHER_API_KEY not configured")]
    MissingApiKey,
    #[error("Invalid weather API URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Weather API returned status {0}")]
    Status(u16),
    #[error("Invalid forecast payload: {0}")]
    InvalidPayload(String),
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    forecast: ForecastBlock,
}

#[derive(Debug, Deserialize)]
struct ForecastBlock {
    forecastday: Vec<RawForecastDay>,
}

#[derive(Debug, Deserialize)]
struct RawForecastDay {
    date: String,
    day: RawDay,
}

#[derive(Debug, Deserialize)]
struct RawDay {
    avgtemp_c: Option<f64>,
    totalprecip_mm: Option<f64>,
    maxwind_kph: Option<f64>,
    avghumidity: Option<f64>,
    uv: Option<f64>,
    condition: Option<RawCondition>,
}

#[derive(Debug, Deserialize)]
struct RawCondition {
    text: Option<String>,
}

impl TryFrom<RawForecastDay> for DailyObservation {
    type Error = WeatherError;

    fn try_from(raw: RawForecastDay) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d")
            .map_err(|e| WeatherError::InvalidPayload(format!("bad date '{}': {}", raw.date, e)))?;
        let average_temperature_c = raw.day.avgtemp_c.ok_or_else(|| {
            WeatherError::InvalidPayload(format!("missing avgtemp_c for {}", raw.date))
        })?;

        Ok(DailyObservation {
            date,
            average_temperature_c,
            total_precipitation_mm: raw.day.totalprecip_mm.unwrap_or(DEFAULT_PRECIPITATION_MM),
            max_wind_speed_kph: raw.day.maxwind_kph.unwrap_or(DEFAULT_WIND_SPEED_KPH),
            average_humidity_percent: raw.day.avghumidity.unwrap_or(DEFAULT_HUMIDITY_PERCENT),
            uv_index: raw.day.uv.unwrap_or(DEFAULT_UV_INDEX),
            condition_text: raw
                .day
                .condition
                .and_then(|c| c.text)
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_CONDITION.to_string()),
        })
    }
}

/// Parse a raw `forecast.json` body into a typed forecast.
pub fn parse_forecast(body: &str) -> Result<Vec<DailyObservation>, WeatherError> {
    let response: ForecastResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::InvalidPayload(e.to_string()))?;

    response
        .forecast
        .forecastday
        .into_iter()
        .map(DailyObservation::try_from)
        .collect()
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, WeatherError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// Daily forecast for `location`, one observation per day, oldest first.
    pub async fn fetch_forecast(
        &self,
        location: &str,
        days: u32,
    ) -> Result<Vec<DailyObservation>, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        let mut url = Url::parse(&format!(
            "{}/forecast.json",
            self.base_url.trim_end_matches('/')
        ))?;
        url.query_pairs_mut()
            .append_pair("key", api_key)
            .append_pair("q", location)
            .append_pair("days", &days.to_string())
            .append_pair("aqi", "no")
            .append_pair("alerts", "no");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_forecast(&body)
    }
}

/// Hand-authored recommendations served when live forecast data is unavailable.
pub fn fallback_recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation {
            date_range_label: "Sep 15-17".to_string(),
            representative_condition: "Mostly Sunny".to_string(),
            average_temperature_c: 24,
            score: 95,
            description: "Perfect weather conditions for outdoor activities".to_string(),
        },
        Recommendation {
            date_range_label: "Sep 20-22".to_string(),
            representative_condition: "Partly Cloudy".to_string(),
            average_temperature_c: 22,
            score: 85,
            description: "Good weather with occasional clouds".to_string(),
        },
        Recommendation {
            date_range_label: "Sep 25-27".to_string(),
            representative_condition: "Light Rain".to_string(),
            average_temperature_c: 19,
            score: 65,
            description: "Some rain expected, better for indoor activities".to_string(),
        },
    ]
}

#[derive(Debug, Clone)]
pub struct WeatherService {
    client: WeatherClient,
    forecast_days: u32,
}

impl WeatherService {
    pub fn new(client: WeatherClient, forecast_days: u32) -> Self {
        Self {
            client,
            forecast_days,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, WeatherError> {
        let client = WeatherClient::new(&config.weather_api_url, config.weather_api_key.clone())?;
        Ok(Self::new(client, config.weather_forecast_days))
    }

    /// Best travel windows for a destination. Provider failures are logged and
    /// answered with the fallback set; they never reach the caller.
    pub async fn best_dates(&self, destination: &str, duration: u32) -> WeatherSuggestionResponse {
        let (recommendations, source) = match self
            .client
            .fetch_forecast(destination, self.forecast_days)
            .await
        {
            Ok(forecast) => {
                log::info!(
                    "Scoring {} forecast days for {}",
                    forecast.len(),
                    destination
                );
                (
                    WeatherWindowScorer::score_windows(&forecast),
                    RecommendationSource::Live,
                )
            }
            Err(err) => {
                log::warn!(
                    "Forecast unavailable for {}: {}. Serving fallback recommendations.",
                    destination,
                    err
                );
                (fallback_recommendations(), RecommendationSource::Fallback)
            }
        };

        WeatherSuggestionResponse {
            destination: destination.to_string(),
            duration,
            recommendations,
            generated: Utc::now(),
            source,
        }
    }
}
