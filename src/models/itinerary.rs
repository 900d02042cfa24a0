use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::activity::{deserialize_amount, Activity};
use crate::models::trip::Trip;

/// One persisted day of a trip's itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub trip_id: ObjectId,
    pub day: u32,
    pub date: String,
    pub activities: Vec<Activity>,
    pub total_cost: f64,
    pub created_at: DateTime<Utc>,
}

impl Itinerary {
    pub fn from_day(trip_id: ObjectId, day: &ItineraryDay) -> Self {
        Self {
            id: None,
            trip_id,
            day: day.day,
            date: day.date.clone(),
            activities: day.activities.clone(),
            total_cost: day.total_cost,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day: u32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub total_cost: f64,
}

/// Itinerary as produced by the planner, before it is split into per-day documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedItinerary {
    #[serde(default)]
    pub destination: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub total_budget: f64,
    pub days: Vec<ItineraryDay>,
    #[serde(default)]
    pub weather_optimized: bool,
    #[serde(default)]
    pub mood_matched: Vec<String>,
}

impl GeneratedItinerary {
    /// Give every activity without an id a positional one, `day{d}_activity{a}`.
    pub fn fill_missing_activity_ids(&mut self) {
        for (day_index, day) in self.days.iter_mut().enumerate() {
            for (activity_index, activity) in day.activities.iter_mut().enumerate() {
                if activity.id.trim().is_empty() {
                    activity.id = format!("day{}_activity{}", day_index + 1, activity_index + 1);
                }
            }
        }
    }
}

/// Response of `POST /api/trips/{id}/generate-itinerary`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub trip: Trip,
    pub itineraries: Vec<Itinerary>,
    pub ai_generated: bool,
    pub weather_optimized: bool,
    pub mood_matched: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fill_missing_activity_ids() {
        let mut itinerary: GeneratedItinerary = serde_json::from_value(json!({
            "destination": "Jaipur",
            "totalBudget": 120,
            "days": [
                {
                    "day": 1,
                    "date": "Day 1",
                    "activities": [
                        { "id": "fort", "time": "9:00 AM", "title": "Amber Fort", "location": "Amer",
                          "duration": "3 hours", "cost": 20, "type": "Culture", "description": "" },
                        { "time": "1:00 PM", "title": "Lunch", "location": "MI Road",
                          "duration": "1 hour", "cost": 10, "type": "Food", "description": "" }
                    ],
                    "totalCost": 30
                },
                {
                    "day": 2,
                    "date": "Day 2",
                    "activities": [
                        { "id": "  ", "time": "9:00 AM", "title": "Hawa Mahal", "location": "Old City",
                          "duration": "2 hours", "cost": 5, "type": "Culture", "description": "" }
                    ],
                    "totalCost": 5
                }
            ]
        }))
        .unwrap();

        itinerary.fill_missing_activity_ids();
        assert_eq!(itinerary.days[0].activities[0].id, "fort");
        assert_eq!(itinerary.days[0].activities[1].id, "day1_activity2");
        assert_eq!(itinerary.days[1].activities[0].id, "day2_activity1");
        assert!(!itinerary.weather_optimized);
    }

    #[test]
    fn test_generated_itinerary_requires_days() {
        let result = serde_json::from_value::<GeneratedItinerary>(json!({
            "destination": "Jaipur",
            "totalBudget": 100
        }));
        assert!(result.is_err());
    }
}
