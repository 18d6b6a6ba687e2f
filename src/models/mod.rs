// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AnimalCandidate, AnimalTrait, BoundingBox, GeoPoint, Shelter, UserTrait, UserWithTraits};
pub use requests::MatchRequest;
pub use responses::{ErrorResponse, HealthResponse, MatchResponse, PetsResponse};
