use serde::{Deserialize, Deserializer, Serialize};

/// A single scheduled stop in an itinerary day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub id: String,
    pub time: String,
    pub title: String,
    pub location: String,
    pub duration: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub cost: f64,
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default)]
    pub description: String,
}

/// Body of `POST /api/activities/plan-b`.
#[derive(Debug, Deserialize)]
pub struct PlanBRequest {
    pub activity: Activity,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct PlanBResponse {
    pub suggestions: Vec<Activity>,
}

// LLM replies and form posts send money either as a JSON number or a decimal string
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: serde_json::Value = serde_json::Value::deserialize(deserializer)?;
    amount_from_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {}", value)))
}

pub fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(v) => amount_from_value(&v)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {}", v))),
    }
}

fn amount_from_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|amount| amount.is_finite())
}
