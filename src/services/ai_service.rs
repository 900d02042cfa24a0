//! Trip planning through Gemini `generateContent`.
//!
//! Every call asks the model for a JSON reply and decodes it into our own types. When the
//! model is unreachable, unconfigured, or answers with something we cannot decode, each
//! operation falls back to a locally built answer so the caller always gets a usable result.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::AppConfig;
use crate::models::activity::Activity;
use crate::models::budget::{
    BudgetBreakdown, BudgetCategory, BudgetEstimation, BudgetRequest, CustomBudget, Mood,
};
use crate::models::itinerary::{GeneratedItinerary, ItineraryDay};
use crate::models::trip::TripPreferences;

pub const ITINERARY_MODEL: &str = "gemini-2.5-pro";
pub const FAST_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("GOOGLE_AI_API_KEY not configured")]
    MissingApiKey,
    #[error("Invalid Gemini API URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gemini API returned status {0}")]
    Status(u16),
    #[error("Empty response from AI model")]
    EmptyResponse,
    #[error("Invalid JSON from AI model: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Invalid itinerary structure returned from AI")]
    InvalidItinerary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Remove a surrounding Markdown code fence, if the model added one.
pub fn strip_code_fence(text: &str) -> &str {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    let fence = FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```(?:json|JSON)?\s*(.*?)\s*```\s*$").expect("valid fence regex")
    });

    match fence.captures(text).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => text.trim(),
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, AiError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            api_key,
        })
    }

    /// Ask `model` for a JSON answer and return the raw JSON text.
    pub async fn generate_json(
        &self,
        model: &str,
        system_instruction: Option<&str>,
        prompt: &str,
    ) -> Result<String, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;

        let mut url = Url::parse(&format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        ))?;
        url.query_pairs_mut().append_pair("key", api_key);

        let request = GenerateContentRequest {
            system_instruction: system_instruction.map(|text| Content {
                role: None,
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }),
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        };

        let response = self.http_client.post(url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AiError::Status(status.as_u16()));
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text: String = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        let json = strip_code_fence(&text);
        if json.is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(json.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct TripPlanner {
    gemini: GeminiClient,
}

impl TripPlanner {
    pub fn new(gemini: GeminiClient) -> Self {
        Self { gemini }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AiError> {
        let gemini = GeminiClient::new(&config.gemini_api_url, config.gemini_api_key.clone())?;
        Ok(Self::new(gemini))
    }

    /// Day-by-day itinerary for the trip, or a generic one if the model fails.
    pub async fn generate_itinerary(&self, preferences: &TripPreferences) -> GeneratedItinerary {
        match self.try_generate_itinerary(preferences).await {
            Ok(itinerary) => {
                log::info!(
                    "Generated {}-day itinerary for {}",
                    itinerary.days.len(),
                    preferences.destination
                );
                itinerary
            }
            Err(err) => {
                log::error!("Failed to generate itinerary: {}", err);
                fallback_itinerary(preferences)
            }
        }
    }

    pub async fn try_generate_itinerary(
        &self,
        preferences: &TripPreferences,
    ) -> Result<GeneratedItinerary, AiError> {
        let raw = self
            .gemini
            .generate_json(
                ITINERARY_MODEL,
                Some(&itinerary_system_prompt(preferences)),
                &itinerary_prompt(preferences),
            )
            .await?;
        parse_itinerary(&raw)
    }

    pub async fn estimate_budget(&self, request: &BudgetRequest) -> BudgetEstimation {
        let result = match self
            .gemini
            .generate_json(FAST_MODEL, Some(BUDGET_SYSTEM_PROMPT), &budget_prompt(request))
            .await
        {
            Ok(raw) => serde_json::from_str::<BudgetEstimation>(&raw).map_err(AiError::from),
            Err(err) => Err(err),
        };

        result.unwrap_or_else(|err| {
            log::error!("Failed to estimate budget: {}", err);
            fallback_budget()
        })
    }

    /// Three nearby alternatives for an activity that cannot go ahead; empty on failure.
    pub async fn plan_b_suggestions(&self, activity: &Activity, reason: &str) -> Vec<Activity> {
        let result = match self
            .gemini
            .generate_json(FAST_MODEL, Some(PLAN_B_SYSTEM_PROMPT), &plan_b_prompt(activity, reason))
            .await
        {
            Ok(raw) => serde_json::from_str::<Vec<Activity>>(&raw).map_err(AiError::from),
            Err(err) => Err(err),
        };

        match result {
            Ok(mut suggestions) => {
                for (index, suggestion) in suggestions.iter_mut().enumerate() {
                    if suggestion.id.trim().is_empty() {
                        suggestion.id = format!("alt_{}", index + 1);
                    }
                }
                suggestions
            }
            Err(err) => {
                log::error!("Failed to generate Plan B suggestions: {}", err);
                Vec::new()
            }
        }
    }
}

pub fn parse_itinerary(raw: &str) -> Result<GeneratedItinerary, AiError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if !value.get("days").map(|d| d.is_array()).unwrap_or(false) {
        return Err(AiError::InvalidItinerary);
    }
    let mut itinerary: GeneratedItinerary = serde_json::from_value(value)?;
    itinerary.fill_missing_activity_ids();
    Ok(itinerary)
}

fn mood_descriptions(moods: &[String]) -> String {
    moods
        .iter()
        .filter_map(|mood| Mood::parse(mood))
        .map(|mood| mood.description())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn itinerary_system_prompt(preferences: &TripPreferences) -> String {
    format!(
        "You are an expert travel planner. Build detailed, personalized itineraries from traveler preferences, \
favouring authentic experiences, sensible timing and budget awareness.\n\
\n\
Requirements:\n\
- Realistic activities with accurate times and costs\n\
- Activities that fit these moods: {moods}\n\
- A mix of culture, food and activities every day\n\
- Specific locations and descriptions\n\
- Activities ordered logically by time and place, with realistic travel time between them\n\
- Places that suit the travel mode: {mode}\n\
- Indoor and outdoor activities balanced for typical weather",
        moods = mood_descriptions(&preferences.moods),
        mode = preferences.travel_mode.as_deref().unwrap_or("flexible"),
    )
}

pub fn itinerary_prompt(preferences: &TripPreferences) -> String {
    let mode = preferences.travel_mode.as_deref().unwrap_or("flexible");
    let budget = preferences
        .budget
        .map(|b| format!("₹{}", b))
        .unwrap_or_else(|| "moderate budget".to_string());
    let dates = match (&preferences.start_date, &preferences.end_date) {
        (Some(start), Some(end)) => format!("{} to {}", start, end),
        (Some(start), None) => start.clone(),
        _ => "flexible dates".to_string(),
    };

    format!(
        r#"Plan a {duration}-day trip to {destination} travelling by {mode}.

Preferences:
- Duration: {duration} days
- Moods: {moods}
- Travel mode: {mode}
- Trip type: {trip_type}
- Budget: {budget}
- Dates: {dates}

For every day give a timed schedule with activity names, locations, descriptions, durations,
costs, activity types (Culture, Adventure, Food, Relaxation, ...) and the day's total cost.

Reply with JSON only, shaped like:
{{
  "destination": "{destination}",
  "totalBudget": number,
  "days": [
    {{
      "day": 1,
      "date": "Date string",
      "activities": [
        {{
          "id": "unique_id",
          "time": "9:00 AM",
          "title": "Activity Name",
          "location": "Specific Location",
          "duration": "2 hours",
          "cost": 25,
          "type": "Culture",
          "description": "Detailed description"
        }}
      ],
      "totalCost": number
    }}
  ],
  "weatherOptimized": true,
  "moodMatched": ["mood1", "mood2"]
}}"#,
        duration = preferences.duration,
        destination = preferences.destination,
        mode = mode,
        moods = preferences.moods.join(", "),
        trip_type = preferences.trip_type.as_deref().unwrap_or("solo"),
        budget = budget,
        dates = dates,
    )
}

const BUDGET_SYSTEM_PROMPT: &str = "You are a travel cost estimator for trips within India. \
Estimate realistic daily budgets in Indian Rupees.\n\
\n\
Consider mood (relax, adventure, culture, discovery), trip length, solo or group travel, and travel mode \
(own car, public bus, train, flight, own bike, cab).\n\
\n\
For each of \"budget\", \"moderate\" and \"luxury\" give \"total\" (INR per day), a \"breakdown\" with \
accommodation, food, transport, localTransport, activities, trips, fees, simcard, insurance and emergency, \
and 2-3 short \"notes\". Add \"custom\" with \"min\", \"max\", a breakdown and notes tailored to the request.\n\
Solo travel costs more per person. Relax leans on resorts and spas, adventure on gear and guides, culture on \
museums and tours, discovery on varied transport. Bus and train are cheapest, own vehicles add fuel and parking, \
cabs are mid to high, flights are highest.\n\
Output strictly JSON.";

pub fn budget_prompt(request: &BudgetRequest) -> String {
    format!(
        r#"Estimate the daily budget for this trip.
Destination: {destination}
Mood: {mood}
Trip days: {days}
Trip type: {trip_type}
Travel mode: {travel_mode}

Reply with JSON shaped like:
{{
  "budget": {{
    "total": number,
    "breakdown": {{
      "accommodation": number, "food": number, "transport": number, "localTransport": number,
      "activities": number, "trips": number, "fees": number, "simcard": number,
      "insurance": number, "emergency": number
    }},
    "notes": [string, string]
  }},
  "moderate": {{ ...same shape... }},
  "luxury": {{ ...same shape... }},
  "custom": {{ "min": number, "max": number, "breakdown": {{ ... }}, "notes": [string, string] }}
}}"#,
        destination = request.destination,
        mood = request.mood,
        days = request.days,
        trip_type = request.trip_type,
        travel_mode = request.travel_mode,
    )
}

const PLAN_B_SYSTEM_PROMPT: &str = "You are a travel assistant. When an activity cannot go ahead \
because of weather, closures or delays, suggest three nearby alternatives.";

pub fn plan_b_prompt(activity: &Activity, reason: &str) -> String {
    format!(
        r#"The activity "{title}" at {location} cannot go ahead because: {reason}

Suggest 3 alternatives in the same area with a similar duration and cost.
Keep the time of day ({time}) and the activity type ({activity_type}) in mind.

Reply with a JSON array:
[
  {{
    "id": "alt_1",
    "time": "{time}",
    "title": "Alternative Activity Name",
    "location": "Nearby Location",
    "duration": "{duration}",
    "cost": {cost},
    "type": "{activity_type}",
    "description": "Why this is a good alternative"
  }}
]"#,
        title = activity.title,
        location = activity.location,
        reason = reason,
        time = activity.time,
        activity_type = activity.activity_type,
        duration = activity.duration,
        cost = activity.cost,
    )
}

/// Two generic activities per day, used when the model cannot produce an itinerary.
pub fn fallback_itinerary(preferences: &TripPreferences) -> GeneratedItinerary {
    let destination = &preferences.destination;
    let first_mood = preferences
        .moods
        .first()
        .cloned()
        .unwrap_or_else(|| "Culture".to_string());

    let days: Vec<ItineraryDay> = (1..=preferences.duration)
        .map(|day| {
            let activities = vec![
                Activity {
                    id: format!("day{}_morning", day),
                    time: "9:00 AM".to_string(),
                    title: format!("{} Exploration", destination),
                    location: destination.clone(),
                    duration: "3 hours".to_string(),
                    cost: 50.0,
                    activity_type: first_mood.clone(),
                    description: format!(
                        "Discover the highlights of {} with a focus on {} experiences.",
                        destination,
                        preferences.moods.join(" and ")
                    ),
                },
                Activity {
                    id: format!("day{}_afternoon", day),
                    time: "2:00 PM".to_string(),
                    title: "Local Cuisine Experience".to_string(),
                    location: format!("Traditional Restaurant in {}", destination),
                    duration: "1.5 hours".to_string(),
                    cost: 35.0,
                    activity_type: "Food".to_string(),
                    description: "Enjoy authentic local dishes and regional specialties."
                        .to_string(),
                },
            ];
            let total_cost = activities.iter().map(|a| a.cost).sum();

            ItineraryDay {
                day,
                date: format!("Day {}", day),
                activities,
                total_cost,
            }
        })
        .collect();

    GeneratedItinerary {
        destination: destination.clone(),
        total_budget: days.iter().map(|d| d.total_cost).sum(),
        days,
        weather_optimized: false,
        mood_matched: preferences.moods.clone(),
    }
}

fn breakdown(values: [f64; 10]) -> BudgetBreakdown {
    let [accommodation, food, transport, local_transport, activities, trips, fees, simcard, insurance, emergency] =
        values;
    BudgetBreakdown {
        accommodation,
        food,
        transport,
        local_transport,
        activities,
        trips,
        fees,
        simcard,
        insurance,
        emergency,
    }
}

fn notes(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Rough static estimate used when the model is unavailable.
pub fn fallback_budget() -> BudgetEstimation {
    BudgetEstimation {
        budget: BudgetCategory {
            total: 1500.0,
            breakdown: breakdown([500.0, 300.0, 200.0, 100.0, 200.0, 50.0, 50.0, 50.0, 30.0, 20.0]),
            notes: notes(&["Basic hostel stay", "Street food", "Public transport only"]),
        },
        moderate: BudgetCategory {
            total: 4000.0,
            breakdown: breakdown([1500.0, 800.0, 500.0, 300.0, 400.0, 200.0, 100.0, 50.0, 80.0, 70.0]),
            notes: notes(&["3-star hotel", "Mix of dining", "Train/Bus + cabs"]),
        },
        luxury: BudgetCategory {
            total: 10000.0,
            breakdown: breakdown([5000.0, 2000.0, 1000.0, 600.0, 800.0, 300.0, 100.0, 50.0, 100.0, 50.0]),
            notes: notes(&["5-star resort", "Private guides", "Flights + taxis"]),
        },
        custom: CustomBudget {
            min: 1000.0,
            max: 12000.0,
            breakdown: breakdown([2000.0, 1000.0, 800.0, 400.0, 500.0, 200.0, 100.0, 50.0, 100.0, 50.0]),
            notes: notes(&["Tailored to trip style", "Adjust based on destination"]),
        },
    }
}
