use actix_web::{web, HttpResponse};
use mongodb::bson::oid::ObjectId;

use crate::errors::ApiError;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::bookings::BookingInput;
use crate::models::itinerary::{GenerationResult, Itinerary};
use crate::models::trip::{NewTrip, Trip, TripPreferences};
use crate::services::ai_service::TripPlanner;
use crate::services::trip_store::TripStore;

async fn owned_trip(
    store: &TripStore,
    id: &str,
    user: &AuthenticatedUser,
) -> Result<(ObjectId, Trip), ApiError> {
    let id = TripStore::parse_id(id)?;
    let trip = store
        .user_trip(id, &user.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".to_string()))?;
    Ok((id, trip))
}

/*
    POST /api/trips
*/
pub async fn create(
    user: AuthenticatedUser,
    input: web::Json<NewTrip>,
    store: web::Data<TripStore>,
) -> Result<HttpResponse, ApiError> {
    let input = input.into_inner();
    input.validate().map_err(ApiError::BadRequest)?;

    let trip = store.create_trip(input.into_trip(&user.user_id)).await?;
    Ok(HttpResponse::Ok().json(trip))
}

/*
    GET /api/trips
*/
pub async fn list(
    user: AuthenticatedUser,
    store: web::Data<TripStore>,
) -> Result<HttpResponse, ApiError> {
    let trips = store.trips_by_user(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(trips))
}

/*
    GET /api/trips/{id}
*/
pub async fn get_by_id(
    user: AuthenticatedUser,
    path: web::Path<String>,
    store: web::Data<TripStore>,
) -> Result<HttpResponse, ApiError> {
    let (_, trip) = owned_trip(&store, &path, &user).await?;
    Ok(HttpResponse::Ok().json(trip))
}

/*
    GET /api/trips/{id}/itineraries
*/
pub async fn itineraries(
    user: AuthenticatedUser,
    path: web::Path<String>,
    store: web::Data<TripStore>,
) -> Result<HttpResponse, ApiError> {
    let (id, _) = owned_trip(&store, &path, &user).await?;
    let itineraries = store.trip_itineraries(id).await?;
    Ok(HttpResponse::Ok().json(itineraries))
}

/*
    POST /api/trips/{id}/generate-itinerary
*/
pub async fn generate_itinerary(
    user: AuthenticatedUser,
    path: web::Path<String>,
    store: web::Data<TripStore>,
    planner: web::Data<TripPlanner>,
) -> Result<HttpResponse, ApiError> {
    let (id, trip) = owned_trip(&store, &path, &user).await?;

    let generated = planner
        .generate_itinerary(&TripPreferences::from(&trip))
        .await;

    let mut itineraries = Vec::with_capacity(generated.days.len());
    for day in &generated.days {
        let itinerary = store.create_itinerary(Itinerary::from_day(id, day)).await?;
        itineraries.push(itinerary);
    }

    let trip = store
        .update_trip_budget(id, generated.total_budget)
        .await?
        .ok_or_else(|| ApiError::NotFound("Trip not found".to_string()))?;

    log::info!(
        "Stored {} itinerary days for trip {}",
        itineraries.len(),
        id
    );

    Ok(HttpResponse::Ok().json(GenerationResult {
        trip,
        itineraries,
        ai_generated: true,
        weather_optimized: generated.weather_optimized,
        mood_matched: generated.mood_matched,
    }))
}

/*
    POST /api/trips/{id}/bookings
*/
pub async fn create_booking(
    user: AuthenticatedUser,
    path: web::Path<String>,
    input: web::Json<BookingInput>,
    store: web::Data<TripStore>,
) -> Result<HttpResponse, ApiError> {
    let (id, _) = owned_trip(&store, &path, &user).await?;
    let booking = input
        .into_inner()
        .into_booking(id)
        .map_err(ApiError::BadRequest)?;

    let booking = store.create_booking(booking).await?;
    Ok(HttpResponse::Ok().json(booking))
}

/*
    GET /api/trips/{id}/bookings
*/
pub async fn bookings(
    user: AuthenticatedUser,
    path: web::Path<String>,
    store: web::Data<TripStore>,
) -> Result<HttpResponse, ApiError> {
    let (id, _) = owned_trip(&store, &path, &user).await?;
    let bookings = store.trip_bookings(id).await?;
    Ok(HttpResponse::Ok().json(bookings))
}
