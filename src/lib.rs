//! PawMatch Algo - matching service for the PawMatch pet-adoption app
//!
//! This library provides the preference-matching and geo-scoped candidate
//! selection used by the scrolling feed: shelters within a radius feed the
//! candidate pool, and each candidate is scored against the user's trait
//! preferences.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::{calculate_bounding_box, haversine_distance},
    select_candidates, Matcher,
};
pub use models::{AnimalCandidate, AnimalTrait, GeoPoint, MatchRequest, MatchResponse, Shelter, UserTrait, UserWithTraits};
