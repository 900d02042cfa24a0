use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::AppConfig;
use crate::models::location::DestinationSuggestion;

pub const USER_AGENT: &str = "TripCraft-AI-Planner/1.0";
pub const MIN_QUERY_LENGTH: usize = 2;
const RESULT_LIMIT: &str = "5";
const DEFAULT_PLACE_TYPE: &str = "city";

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Invalid geocoding URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Geocoding service unavailable (status {0})")]
    Status(u16),
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    #[serde(default)]
    display_name: String,
    lat: String,
    lon: String,
    #[serde(rename = "type")]
    place_type: Option<String>,
    #[serde(default)]
    address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    country: Option<String>,
}

impl NominatimPlace {
    fn into_suggestion(self) -> Option<DestinationSuggestion> {
        let locality = self
            .address
            .city
            .or(self.address.town)
            .or(self.address.village)
            .filter(|name| !name.trim().is_empty());

        let name = match locality {
            Some(locality) => match self.address.country {
                Some(country) if !country.trim().is_empty() => format!("{}, {}", locality, country),
                _ => locality,
            },
            None => self
                .display_name
                .split(',')
                .map(str::trim)
                .take(2)
                .collect::<Vec<_>>()
                .join(", "),
        };

        if name.trim().is_empty() {
            return None;
        }

        Some(DestinationSuggestion {
            name,
            full_name: self.display_name,
            lat: self.lat.trim().parse().ok()?,
            lon: self.lon.trim().parse().ok()?,
            place_type: self
                .place_type
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_PLACE_TYPE.to_string()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct GeocodingService {
    http_client: reqwest::Client,
    base_url: String,
}

impl GeocodingService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GeocodeError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        Self::new(&config.nominatim_url)
    }

    /// Destination autocomplete. Falls back to a fixed list of popular cities on upstream failure.
    pub async fn search(&self, query: &str) -> Vec<DestinationSuggestion> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LENGTH {
            return Vec::new();
        }

        match self.lookup(query).await {
            Ok(suggestions) => suggestions,
            Err(err) => {
                log::error!("Geocoding API error: {}", err);
                fallback_suggestions(query)
            }
        }
    }

    pub async fn lookup(&self, query: &str) -> Result<Vec<DestinationSuggestion>, GeocodeError> {
        let mut url = Url::parse(&format!("{}/search", self.base_url.trim_end_matches('/')))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("limit", RESULT_LIMIT)
            .append_pair("addressdetails", "1")
            .append_pair("featureType", "city");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let places: Vec<NominatimPlace> = response.json().await?;
        Ok(places
            .into_iter()
            .filter_map(NominatimPlace::into_suggestion)
            .collect())
    }
}

fn suggestion(name: &str, full_name: &str, lat: f64, lon: f64) -> DestinationSuggestion {
    DestinationSuggestion {
        name: name.to_string(),
        full_name: full_name.to_string(),
        lat,
        lon,
        place_type: DEFAULT_PLACE_TYPE.to_string(),
    }
}

/// Popular cities whose name contains `query`, ignoring case.
pub fn fallback_suggestions(query: &str) -> Vec<DestinationSuggestion> {
    let needle = query.to_lowercase();
    [
        suggestion("Paris, France", "Paris, Île-de-France, France", 48.8566, 2.3522),
        suggestion("Tokyo, Japan", "Tokyo, Japan", 35.6762, 139.6503),
        suggestion("New York, USA", "New York, New York, United States", 40.7128, -74.0060),
        suggestion("London, England", "London, England, United Kingdom", 51.5074, -0.1278),
        suggestion("Rome, Italy", "Rome, Lazio, Italy", 41.9028, 12.4964),
        suggestion("Barcelona, Spain", "Barcelona, Catalonia, Spain", 41.3851, 2.1734),
        suggestion("Mumbai, India", "Mumbai, Maharashtra, India", 19.0760, 72.8777),
        suggestion("Sydney, Australia", "Sydney, New South Wales, Australia", -33.8688, 151.2093),
    ]
    .into_iter()
    .filter(|s| s.name.to_lowercase().contains(&needle))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn place(value: serde_json::Value) -> NominatimPlace {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_name_prefers_locality_and_country() {
        let suggestion = place(json!({
            "display_name": "Kyoto, Kyoto Prefecture, Japan",
            "lat": "35.0116",
            "lon": "135.7681",
            "type": "administrative",
            "address": { "city": "Kyoto", "country": "Japan" }
        }))
        .into_suggestion()
        .unwrap();

        assert_eq!(suggestion.name, "Kyoto, Japan");
        assert_eq!(suggestion.full_name, "Kyoto, Kyoto Prefecture, Japan");
        assert_eq!(suggestion.lat, 35.0116);
        assert_eq!(suggestion.place_type, "administrative");
    }

    #[test]
    fn test_name_falls_back_to_display_name() {
        let suggestion = place(json!({
            "display_name": "Lake Como, Lombardy, Italy",
            "lat": "46.0",
            "lon": "9.26"
        }))
        .into_suggestion()
        .unwrap();

        assert_eq!(suggestion.name, "Lake Como, Lombardy");
        assert_eq!(suggestion.place_type, "city");
    }

    #[test]
    fn test_village_without_country() {
        let suggestion = place(json!({
            "display_name": "Hallstatt, Austria",
            "lat": "47.56",
            "lon": "13.64",
            "address": { "village": "Hallstatt" }
        }))
        .into_suggestion()
        .unwrap();
        assert_eq!(suggestion.name, "Hallstatt");
    }

    #[test]
    fn test_empty_names_are_dropped() {
        let result = place(json!({ "display_name": "", "lat": "0", "lon": "0" })).into_suggestion();
        assert!(result.is_none());
    }

    #[test]
    fn test_fallback_filters_case_insensitively() {
        let names: Vec<String> = fallback_suggestions("PAR")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Paris, France"]);

        assert_eq!(fallback_suggestions("an").len(), 3);
        assert!(fallback_suggestions("Atlantis").is_empty());
    }

    #[actix_rt::test]
    async fn test_short_query_returns_nothing() {
        let service = GeocodingService::new("http://127.0.0.1:9").unwrap();
        assert!(service.search("a").await.is_empty());
        assert!(service.search("  ").await.is_empty());
    }

    #[actix_rt::test]
    async fn test_unreachable_upstream_uses_fallback() {
        let service = GeocodingService::new("http://127.0.0.1:9").unwrap();
        let suggestions = service.search("tok").await;
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].name, "Tokyo, Japan");
    }
}
