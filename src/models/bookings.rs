use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::activity::deserialize_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("Unknown booking status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub trip_id: ObjectId,
    pub stripe_payment_intent_id: Option<String>,
    pub amount: f64,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
}

/// Body of `POST /api/trips/{id}/bookings`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    pub stripe_payment_intent_id: Option<String>,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    pub status: Option<BookingStatus>,
}

impl BookingInput {
    pub fn into_booking(self, trip_id: ObjectId) -> Result<Booking, String> {
        if self.amount < 0.0 {
            return Err("Amount cannot be negative".to_string());
        }
        Ok(Booking {
            id: None,
            trip_id,
            stripe_payment_intent_id: self.stripe_payment_intent_id,
            amount: self.amount,
            status: self.status.unwrap_or_default(),
            booked_at: Utc::now(),
        })
    }
}

/// Body of `PATCH /api/bookings/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct BookingStatusUpdate {
    pub status: Option<String>,
}
