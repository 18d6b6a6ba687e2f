use crate::core::scoring::score_candidate;
use crate::models::{AnimalCandidate, UserWithTraits};

/// Immutable scoring intermediate
///
/// Candidates are mapped into this shape, filtered, then projected back to
/// bare `AnimalCandidate`s. The score never leaves the matcher.
#[derive(Debug, Clone)]
struct ScoredCandidate {
    animal: AnimalCandidate,
    score: i64,
    is_valid: bool,
}

/// Preference matcher
///
/// Scores each candidate against the user's trait preferences, drops the
/// candidates below the validity threshold, and returns the rest sorted by
/// descending score.
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher;

impl Matcher {
    pub fn new() -> Self {
        Self
    }

    /// Rank candidates for a user
    ///
    /// The output is a sub-multiset of `candidates`: nothing is invented
    /// or duplicated, and ties keep input order (stable sort).
    pub fn match_candidates(
        &self,
        user: &UserWithTraits,
        candidates: Vec<AnimalCandidate>,
    ) -> Vec<AnimalCandidate> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|animal| {
                let (trait_score, base_penalty) = score_candidate(&user.traits, &animal.traits);
                ScoredCandidate {
                    animal,
                    score: trait_score.score,
                    is_valid: trait_score.is_valid(base_penalty),
                }
            })
            .filter(|candidate| candidate.is_valid)
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));

        scored.into_iter().map(|candidate| candidate.animal).collect()
    }
}
