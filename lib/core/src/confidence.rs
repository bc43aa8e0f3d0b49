//! Confidence calibration.
//!
//! ```text
//! base     = min(0.7 * vote_share + 0.3 * 1 / (1 + mean_distance), 0.99)
//! adjusted = min(base * (0.7 + 0.3 * matched / max(supplied, 1)), 0.99)
//! ```

/// Upper bound on every reported confidence
pub const CONFIDENCE_CAP: f64 = 0.99;

const VOTE_WEIGHT: f64 = 0.7;
const DISTANCE_WEIGHT: f64 = 0.3;

const MATCH_FLOOR: f64 = 0.7;
const MATCH_WEIGHT: f64 = 0.3;

/// `1 / (1 + mean_distance)`; 1.0 when every neighbor is an exact match
#[inline]
pub fn distance_factor(mean_distance: f64) -> f64 {
    1.0 / (1.0 + mean_distance)
}

/// Blend neighbor agreement with neighbor proximity
#[inline]
pub fn base_confidence(vote_share: f64, mean_distance: f64) -> f64 {
    let blended = vote_share * VOTE_WEIGHT + distance_factor(mean_distance) * DISTANCE_WEIGHT;
    blended.min(CONFIDENCE_CAP)
}

/// Fraction of supplied symptoms that matched a canonical column
#[inline]
pub fn match_ratio(matched: usize, supplied: usize) -> f64 {
    matched as f64 / supplied.max(1) as f64
}

/// Scale a base confidence by input-match quality
#[inline]
pub fn blend_with_match_ratio(confidence: f64, matched: usize, supplied: usize) -> f64 {
    let adjusted = confidence * (MATCH_FLOOR + MATCH_WEIGHT * match_ratio(matched, supplied));
    adjusted.min(CONFIDENCE_CAP)
}
