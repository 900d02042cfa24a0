use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::activity::deserialize_optional_amount;
use crate::models::location::DestinationSuggestion;

pub const DEFAULT_TRIP_STATUS: &str = "planned";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    pub destination: String,
    pub destination_details: Option<DestinationSuggestion>,
    pub description: Option<String>,
    pub duration: u32,
    pub moods: Vec<String>,
    pub travel_mode: Option<String>,
    pub trip_type: Option<String>,
    pub budget: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/trips`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrip {
    pub destination: String,
    pub destination_details: Option<DestinationSuggestion>,
    pub description: Option<String>,
    pub duration: u32,
    #[serde(default)]
    pub moods: Vec<String>,
    pub travel_mode: Option<String>,
    pub trip_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub budget: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

impl NewTrip {
    pub fn validate(&self) -> Result<(), String> {
        if self.destination.trim().is_empty() {
            return Err("Destination is required".to_string());
        }
        if self.duration == 0 {
            return Err("Duration must be at least one day".to_string());
        }
        if matches!(self.budget, Some(budget) if budget < 0.0) {
            return Err("Budget cannot be negative".to_string());
        }
        Ok(())
    }

    pub fn into_trip(self, user_id: &str) -> Trip {
        let now = Utc::now();
        Trip {
            id: None,
            user_id: user_id.to_string(),
            destination: self.destination.trim().to_string(),
            destination_details: self.destination_details,
            description: self.description,
            duration: self.duration,
            moods: self.moods,
            travel_mode: self.travel_mode,
            trip_type: self.trip_type,
            budget: self.budget,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self
                .status
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TRIP_STATUS.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// What the AI planner needs to know about a trip.
#[derive(Debug, Clone, Default)]
pub struct TripPreferences {
    pub destination: String,
    pub duration: u32,
    pub moods: Vec<String>,
    pub travel_mode: Option<String>,
    pub budget: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub trip_type: Option<String>,
}

impl From<&Trip> for TripPreferences {
    fn from(trip: &Trip) -> Self {
        Self {
            destination: trip.destination.clone(),
            duration: trip.duration,
            moods: trip.moods.clone(),
            travel_mode: trip.travel_mode.clone(),
            budget: trip.budget,
            start_date: trip.start_date.clone(),
            end_date: trip.end_date.clone(),
            trip_type: trip.trip_type.clone(),
        }
    }
}
