use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to match a user against nearby shelter animals
///
/// `range` is the search radius in meters around the given point. The
/// validator rules also reject NaN coordinates, since NaN fails every
/// range comparison.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub range: f64,
}
