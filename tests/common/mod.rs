#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use chrono::Duration;
use std::sync::Arc;

use tripcraft_api::db::mongo::build_mongo_client;
use tripcraft_api::middleware::auth::issue_token;
use tripcraft_api::routes;
use tripcraft_api::services::ai_service::{GeminiClient, TripPlanner};
use tripcraft_api::services::geocoding_service::GeocodingService;
use tripcraft_api::services::trip_store::TripStore;
use tripcraft_api::services::weather_service::{WeatherClient, WeatherService};

pub const TEST_JWT_SECRET: &str = "test_secret";
pub const TEST_DATABASE: &str = "TripCraftTest";

// Port 9 (discard) refuses connections, so upstream calls fail fast and fallbacks kick in.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

/// Upstream endpoints and keys used to build the services under test.
pub struct Upstreams {
    pub weather_url: String,
    pub weather_key: Option<String>,
    pub gemini_url: String,
    pub gemini_key: Option<String>,
    pub nominatim_url: String,
}

impl Default for Upstreams {
    fn default() -> Self {
        Self {
            weather_url: UNREACHABLE_URL.to_string(),
            weather_key: None,
            gemini_url: UNREACHABLE_URL.to_string(),
            gemini_key: None,
            nominatim_url: UNREACHABLE_URL.to_string(),
        }
    }
}

pub struct TestApp {
    pub client: Arc<mongodb::Client>,
    pub store: TripStore,
    pub weather: WeatherService,
    pub geocoder: GeocodingService,
    pub planner: TripPlanner,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_upstreams(Upstreams::default()).await
    }

    pub async fn with_upstreams(upstreams: Upstreams) -> Self {
        let mongo_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = build_mongo_client(&mongo_uri).await.unwrap();

        let weather = WeatherService::new(
            WeatherClient::new(upstreams.weather_url, upstreams.weather_key).unwrap(),
            7,
        );
        let geocoder = GeocodingService::new(upstreams.nominatim_url).unwrap();
        let planner = TripPlanner::new(
            GeminiClient::new(upstreams.gemini_url, upstreams.gemini_key).unwrap(),
        );

        Self {
            store: TripStore::new(client.clone(), TEST_DATABASE),
            client,
            weather,
            geocoder,
            planner,
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(self.store.clone()))
            .app_data(web::Data::new(self.weather.clone()))
            .app_data(web::Data::new(self.geocoder.clone()))
            .app_data(web::Data::new(self.planner.clone()))
            .configure(|cfg| routes::configure(cfg, TEST_JWT_SECRET))
    }
}

pub fn get_test_user_id() -> String {
    "test_user_123".to_string()
}

pub fn get_test_email() -> String {
    "test@example.com".to_string()
}

pub fn bearer_for(user_id: &str) -> (&'static str, String) {
    let token = issue_token(TEST_JWT_SECRET, user_id, &get_test_email(), Duration::hours(1))
        .unwrap();
    ("Authorization", format!("Bearer {}", token))
}

pub fn bearer() -> (&'static str, String) {
    bearer_for(&get_test_user_id())
}

pub async fn cleanup_test_data(client: &mongodb::Client) {
    let _ = client.database(TEST_DATABASE).drop().await;
}
