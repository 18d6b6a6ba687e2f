use serde::{Deserialize, Serialize};
use crate::models::domain::{AnimalCandidate, UserWithTraits};

/// Response for the match endpoint
///
/// `matched_animals` carries bare candidates: scores are internal to the
/// matcher and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub message: String,
    #[serde(rename = "matchedAnimals")]
    pub matched_animals: Vec<AnimalCandidate>,
    #[serde(rename = "userWithTraits")]
    pub user_with_traits: UserWithTraits,
}

/// Response for pet list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetsResponse {
    pub pets: Vec<AnimalCandidate>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
