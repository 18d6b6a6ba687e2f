// Core algorithm exports
pub mod distance;
pub mod matcher;
pub mod scoring;
pub mod selector;

pub use distance::{calculate_bounding_box, haversine_distance, is_within_bounding_box};
pub use matcher::Matcher;
pub use scoring::{score_candidate, TraitScore, BORDER_FRACTION};
pub use selector::select_candidates;
