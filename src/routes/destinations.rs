use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::errors::ApiError;
use crate::models::location::DestinationSearchResponse;
use crate::services::geocoding_service::GeocodingService;
use crate::services::weather_service::WeatherService;

const DEFAULT_TRIP_DURATION: u32 = 7;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BestDatesQuery {
    pub duration: Option<u32>,
}

/*
    /api/destinations/search?query=...
*/
pub async fn search(
    query: web::Query<SearchQuery>,
    geocoder: web::Data<GeocodingService>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner().query.unwrap_or_default();
    let suggestions = geocoder.search(&query).await;

    Ok(HttpResponse::Ok().json(DestinationSearchResponse { suggestions }))
}

/*
    /api/destinations/{destination}/best-dates?duration=N
*/
pub async fn best_dates(
    path: web::Path<String>,
    query: web::Query<BestDatesQuery>,
    weather: web::Data<WeatherService>,
) -> Result<HttpResponse, ApiError> {
    let destination = path.into_inner();
    let destination = destination.trim();
    if destination.is_empty() {
        return Err(ApiError::BadRequest("Destination is required".to_string()));
    }

    let duration = query.duration.unwrap_or(DEFAULT_TRIP_DURATION);
    if duration == 0 {
        return Err(ApiError::BadRequest(
            "Duration must be at least one day".to_string(),
        ));
    }

    let response = weather.best_dates(destination, duration).await;
    Ok(HttpResponse::Ok().json(response))
}
