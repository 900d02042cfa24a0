use actix_web::{error, web};

use crate::errors::ApiError;
use crate::middleware::auth::AuthMiddleware;

pub mod activities;
pub mod bookings;
pub mod budget;
pub mod destinations;
pub mod health;
pub mod trips;

/// Register every route. Callers provide the service handles as `web::Data`.
pub fn configure(cfg: &mut web::ServiceConfig, jwt_secret: &str) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        error::Error::from(ApiError::BadRequest(err.to_string()))
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _| {
        error::Error::from(ApiError::BadRequest(err.to_string()))
    }))
    .route("/health", web::get().to(health::health_check))
    .service(
        web::scope("/api")
            // Public routes
            .route(
                "/destinations/search",
                web::get().to(destinations::search),
            )
            .route(
                "/destinations/{destination}/best-dates",
                web::get().to(destinations::best_dates),
            )
            .route("/activities/plan-b", web::post().to(activities::plan_b))
            .route("/budget/estimate", web::post().to(budget::estimate))
            // Protected routes
            .service(
                web::scope("/trips")
                    .wrap(AuthMiddleware::new(jwt_secret))
                    .route("", web::post().to(trips::create))
                    .route("", web::get().to(trips::list))
                    .route("/{id}", web::get().to(trips::get_by_id))
                    .route("/{id}/itineraries", web::get().to(trips::itineraries))
                    .route(
                        "/{id}/generate-itinerary",
                        web::post().to(trips::generate_itinerary),
                    )
                    .route("/{id}/bookings", web::post().to(trips::create_booking))
                    .route("/{id}/bookings", web::get().to(trips::bookings)),
            )
            .service(
                web::scope("/bookings")
                    .wrap(AuthMiddleware::new(jwt_secret))
                    .route("/{id}/status", web::patch().to(bookings::update_status)),
            ),
    );
}
