use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use tripcraft_api::config::AppConfig;
use tripcraft_api::db::mongo::create_mongo_client;
use tripcraft_api::routes;
use tripcraft_api::services::ai_service::TripPlanner;
use tripcraft_api::services::geocoding_service::GeocodingService;
use tripcraft_api::services::trip_store::TripStore;
use tripcraft_api::services::weather_service::WeatherService;

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    log::error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    log::info!("Application starting...");

    let config = AppConfig::from_env().map_err(|e| startup_error("MONGODB_URI must be set", e))?;

    let client = create_mongo_client(&config.mongo_uri, &config.mongo_database)
        .await
        .map_err(|e| startup_error("Failed to create MongoDB client", e))?;
    let store = TripStore::new(client, config.mongo_database.clone());

    let weather = WeatherService::from_config(&config)
        .map_err(|e| startup_error("Failed to build weather client", e))?;
    let geocoder = GeocodingService::from_config(&config)
        .map_err(|e| startup_error("Failed to build geocoding client", e))?;
    let planner = TripPlanner::from_config(&config)
        .map_err(|e| startup_error("Failed to build Gemini client", e))?;

    if config.weather_api_key.is_none() {
        log::warn!("WEATHER_API_KEY not set, best-dates will serve fallback data");
    }
    if config.gemini_api_key.is_none() {
        log::warn!("GOOGLE_AI_API_KEY not set, AI planning will serve fallback data");
    }

    let store = web::Data::new(store);
    let weather = web::Data::new(weather);
    let geocoder = web::Data::new(geocoder);
    let planner = web::Data::new(planner);
    let jwt_secret = config.jwt_secret.clone();

    log::info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(store.clone())
            .app_data(weather.clone())
            .app_data(geocoder.clone())
            .app_data(planner.clone())
            .configure(|cfg| routes::configure(cfg, &jwt_secret))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
