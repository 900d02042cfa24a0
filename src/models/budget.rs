use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Relax,
    Adventure,
    Culture,
    Discovery,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Relax => "relax",
            Mood::Adventure => "adventure",
            Mood::Culture => "culture",
            Mood::Discovery => "discovery",
        }
    }

    /// Kinds of experiences the planner should favour for this mood.
    pub fn description(&self) -> &'static str {
        match self {
            Mood::Relax => "peaceful, spa treatments, wellness activities, slow-paced experiences, nature walks, meditation",
            Mood::Adventure => "thrilling activities, outdoor sports, hiking, trekking, adrenaline-pumping experiences",
            Mood::Culture => "historical sites, museums, local traditions, authentic food experiences, art galleries, cultural tours",
            Mood::Discovery => "hidden gems, off-the-beaten-path locations, local experiences, unique attractions, secret spots",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "relax" => Some(Mood::Relax),
            "adventure" => Some(Mood::Adventure),
            "culture" => Some(Mood::Culture),
            "discovery" => Some(Mood::Discovery),
            _ => None,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    Solo,
    Group,
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripType::Solo => f.write_str("solo"),
            TripType::Group => f.write_str("group"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelMode {
    #[serde(rename = "own car")]
    OwnCar,
    #[serde(rename = "public bus")]
    PublicBus,
    #[serde(rename = "train")]
    Train,
    #[serde(rename = "flight")]
    Flight,
    #[serde(rename = "own bike")]
    OwnBike,
    #[serde(rename = "cab")]
    Cab,
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TravelMode::OwnCar => "own car",
            TravelMode::PublicBus => "public bus",
            TravelMode::Train => "train",
            TravelMode::Flight => "flight",
            TravelMode::OwnBike => "own bike",
            TravelMode::Cab => "cab",
        };
        f.write_str(label)
    }
}

/// Body of `POST /api/budget/estimate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRequest {
    pub destination: String,
    pub mood: Mood,
    pub days: u32,
    pub trip_type: TripType,
    pub travel_mode: TravelMode,
}

/// Per-day costs in INR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub accommodation: f64,
    pub food: f64,
    pub transport: f64,
    pub local_transport: f64,
    pub activities: f64,
    pub trips: f64,
    pub fees: f64,
    pub simcard: f64,
    pub insurance: f64,
    pub emergency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategory {
    pub total: f64,
    pub breakdown: BudgetBreakdown,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomBudget {
    pub min: f64,
    pub max: f64,
    pub breakdown: BudgetBreakdown,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEstimation {
    pub budget: BudgetCategory,
    pub moderate: BudgetCategory,
    pub luxury: BudgetCategory,
    pub custom: CustomBudget,
}
