use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::HintPolicy;

/// Payload asking how close candidate links are to the target article.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct HintRequest {
    /// Candidate link titles to score.
    #[validate(length(min = 1, message = "links must not be empty"))]
    pub links: Vec<String>,
    /// Title of the target article.
    #[validate(length(min = 1, message = "target must not be empty"))]
    pub target: String,
}

/// Coarse closeness bucket derived from a similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Closeness {
    /// Score above the high threshold.
    High,
    /// Score above the medium threshold.
    Medium,
    /// Everything else.
    Low,
}

impl Closeness {
    /// Bucket a similarity score using the configured thresholds.
    ///
    /// Both bounds are exclusive: a score exactly on a threshold falls into
    /// the lower bucket.
    pub fn bucket(score: f32, policy: &HintPolicy) -> Self {
        if score > policy.high_threshold {
            Closeness::High
        } else if score > policy.medium_threshold {
            Closeness::Medium
        } else {
            Closeness::Low
        }
    }
}

/// Ranked similarity of one candidate link against the target.
#[derive(Debug, Serialize, ToSchema)]
pub struct LinkSimilarity {
    /// Candidate link title.
    pub link: String,
    /// Cosine similarity against the target, in `[-1, 1]`.
    pub similarity: f32,
    /// Coarse closeness bucket for the score.
    pub closeness: Closeness,
}

/// Response carrying one entry per scored candidate.
#[derive(Debug, Serialize, ToSchema)]
pub struct HintResponse {
    /// Scored candidates; no particular order is guaranteed.
    pub similarities: Vec<LinkSimilarity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_use_exclusive_threshold_bounds() {
        let policy = HintPolicy::default();

        assert_eq!(Closeness::bucket(0.9, &policy), Closeness::High);
        assert_eq!(Closeness::bucket(0.76, &policy), Closeness::High);
        assert_eq!(Closeness::bucket(0.75, &policy), Closeness::Medium);
        assert_eq!(Closeness::bucket(0.6, &policy), Closeness::Medium);
        assert_eq!(Closeness::bucket(0.5, &policy), Closeness::Low);
        assert_eq!(Closeness::bucket(0.1, &policy), Closeness::Low);
        assert_eq!(Closeness::bucket(-0.4, &policy), Closeness::Low);
    }

    #[test]
    fn closeness_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Closeness::High).unwrap(),
            serde_json::json!("high")
        );
        assert_eq!(
            serde_json::to_value(Closeness::Low).unwrap(),
            serde_json::json!("low")
        );
    }
}
