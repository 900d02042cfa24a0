use actix_web::{web, HttpResponse};

use crate::errors::ApiError;
use crate::middleware::auth_context::AuthenticatedUser;
use crate::models::bookings::{BookingStatus, BookingStatusUpdate};
use crate::services::trip_store::TripStore;

/*
    PATCH /api/bookings/{id}/status
*/
pub async fn update_status(
    user: AuthenticatedUser,
    path: web::Path<String>,
    input: web::Json<BookingStatusUpdate>,
    store: web::Data<TripStore>,
) -> Result<HttpResponse, ApiError> {
    let status: BookingStatus = match input.into_inner().status {
        Some(status) if !status.trim().is_empty() => {
            status.parse().map_err(ApiError::BadRequest)?
        }
        _ => return Err(ApiError::BadRequest("Status is required".to_string())),
    };

    let id = TripStore::parse_id(&path)?;
    let not_found = || ApiError::NotFound("Booking not found".to_string());

    let booking = store.get_booking(id).await?.ok_or_else(not_found)?;
    if store
        .user_trip(booking.trip_id, &user.user_id)
        .await?
        .is_none()
    {
        return Err(not_found());
    }

    let booking = store
        .update_booking_status(id, status)
        .await?
        .ok_or_else(not_found)?;
    Ok(HttpResponse::Ok().json(booking))
}
