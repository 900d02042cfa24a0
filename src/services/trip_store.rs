use bson::doc;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::oid::ObjectId,
    options::ReturnDocument,
    Client, Collection,
};
use std::sync::Arc;
use thiserror::Error;

use crate::models::bookings::{Booking, BookingStatus};
use crate::models::itinerary::Itinerary;
use crate::models::trip::Trip;

const TRIPS: &str = "Trips";
const ITINERARIES: &str = "Itineraries";
const BOOKINGS: &str = "Bookings";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    InvalidId(String),
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

/// Trips, their per-day itineraries and bookings, kept in one MongoDB database.
#[derive(Debug, Clone)]
pub struct TripStore {
    client: Arc<Client>,
    database: String,
}

impl TripStore {
    pub fn new(client: Arc<Client>, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
        }
    }

    pub fn parse_id(id: &str) -> Result<ObjectId, StoreError> {
        ObjectId::parse_str(id.trim()).map_err(|_| StoreError::InvalidId(id.to_string()))
    }

    fn trips(&self) -> Collection<Trip> {
        self.client.database(&self.database).collection(TRIPS)
    }

    fn itineraries(&self) -> Collection<Itinerary> {
        self.client.database(&self.database).collection(ITINERARIES)
    }

    fn bookings(&self) -> Collection<Booking> {
        self.client.database(&self.database).collection(BOOKINGS)
    }

    pub async fn create_trip(&self, mut trip: Trip) -> Result<Trip, StoreError> {
        let result = self.trips().insert_one(&trip).await?;
        trip.id = result.inserted_id.as_object_id();
        log::info!("Created trip {:?} for user {}", trip.id, trip.user_id);
        Ok(trip)
    }

    pub async fn get_trip(&self, id: ObjectId) -> Result<Option<Trip>, StoreError> {
        Ok(self.trips().find_one(doc! { "_id": id }).await?)
    }

    /// The trip, only if it belongs to `user_id`.
    pub async fn user_trip(&self, id: ObjectId, user_id: &str) -> Result<Option<Trip>, StoreError> {
        Ok(self
            .trips()
            .find_one(doc! { "_id": id, "userId": user_id })
            .await?)
    }

    /// Newest first.
    pub async fn trips_by_user(&self, user_id: &str) -> Result<Vec<Trip>, StoreError> {
        let cursor = self
            .trips()
            .find(doc! { "userId": user_id })
            .sort(doc! { "createdAt": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn update_trip_budget(
        &self,
        id: ObjectId,
        budget: f64,
    ) -> Result<Option<Trip>, StoreError> {
        let update = doc! {
            "$set": {
                "budget": budget,
                "updatedAt": Utc::now().to_rfc3339(),
            }
        };
        Ok(self
            .trips()
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?)
    }

    pub async fn create_itinerary(&self, mut itinerary: Itinerary) -> Result<Itinerary, StoreError> {
        let result = self.itineraries().insert_one(&itinerary).await?;
        itinerary.id = result.inserted_id.as_object_id();
        Ok(itinerary)
    }

    /// Ordered by day.
    pub async fn trip_itineraries(&self, trip_id: ObjectId) -> Result<Vec<Itinerary>, StoreError> {
        let cursor = self
            .itineraries()
            .find(doc! { "tripId": trip_id })
            .sort(doc! { "day": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn create_booking(&self, mut booking: Booking) -> Result<Booking, StoreError> {
        let result = self.bookings().insert_one(&booking).await?;
        booking.id = result.inserted_id.as_object_id();
        log::info!("Created booking {:?} for trip {}", booking.id, booking.trip_id);
        Ok(booking)
    }

    pub async fn get_booking(&self, id: ObjectId) -> Result<Option<Booking>, StoreError> {
        Ok(self.bookings().find_one(doc! { "_id": id }).await?)
    }

    pub async fn trip_bookings(&self, trip_id: ObjectId) -> Result<Vec<Booking>, StoreError> {
        let cursor = self
            .bookings()
            .find(doc! { "tripId": trip_id })
            .sort(doc! { "bookedAt": -1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn update_booking_status(
        &self,
        id: ObjectId,
        status: BookingStatus,
    ) -> Result<Option<Booking>, StoreError> {
        let update = doc! { "$set": { "status": status.as_str() } };
        Ok(self
            .bookings()
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?)
    }
}
