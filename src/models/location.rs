use serde::{Deserialize, Serialize};

/// A place the traveler can pick from the destination autocomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationSuggestion {
    pub name: String,
    pub full_name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub place_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DestinationSearchResponse {
    pub suggestions: Vec<DestinationSuggestion>,
}
