use crate::models::{AnimalTrait, UserTrait};

/// Fraction of the base penalty a candidate must earn back through matched
/// preference traits to stay in the result set.
pub const BORDER_FRACTION: f64 = 0.4;

/// Raw scoring outcome for a single candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitScore {
    /// Final signed score: base penalty plus doubled rewards
    pub score: i64,
    /// Unscaled sum of matched-trait priorities, only used for the
    /// validity check
    pub added_points: i64,
}

impl TraitScore {
    /// Whether the candidate clears the validity threshold
    ///
    /// `border_value` is 40% of the base penalty magnitude, i.e. the score
    /// accrued before any rewards. The comparison is done in f64 so the
    /// fractional border is not truncated against the integer points.
    pub fn is_valid(&self, base_penalty: i64) -> bool {
        let border_value = base_penalty.unsigned_abs() as f64 * BORDER_FRACTION;
        self.added_points as f64 >= border_value
    }
}

/// Score one animal's trait list against a user's preference set
///
/// Scoring per candidate:
/// 1. Every trait the animal exhibits subtracts its priority (base penalty),
///    whether the user wants it or not.
/// 2. Every animal trait referenced by one of the user's preference traits
///    that the animal actually exhibits adds back twice its priority, and
///    its unscaled priority accumulates into `added_points`.
///
/// Returns the score pair plus the step-1 base penalty, which the caller
/// needs for the validity threshold.
pub fn score_candidate(user_traits: &[UserTrait], animal_traits: &[AnimalTrait]) -> (TraitScore, i64) {
    let mut score: i64 = 0;

    for animal_trait in animal_traits {
        score -= animal_trait.priority;
    }

    let base_penalty = score;
    let mut added_points: i64 = 0;

    for user_trait in user_traits {
        for wanted_id in &user_trait.animal_traits {
            // Linear search is fine at catalog scale (tens of traits per
            // animal); switch to a HashSet keyed by trait id if that grows.
            let matched = animal_traits.iter().find(|t| t.id == *wanted_id);

            if let Some(animal_trait) = matched {
                score += 2 * animal_trait.priority;
                added_points += animal_trait.priority;
            }
        }
    }

    (TraitScore { score, added_points }, base_penalty)
}
