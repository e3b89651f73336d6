//! Recommendation scoring
//!
//! Ranks candidate content for "viewers of X also engaged with" surfaces:
//! `score = similarity(reference, candidate) × candidate performance`.

use serde::Serialize;
use thiserror::Error;

use super::similarity::SimilarityMatrix;

/// Scoring failure, surfaced to the caller as a typed error rather than a
/// panic or an empty list that would read as "no recommendations"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    #[error("no candidate content to score")]
    EmptyCandidates,

    #[error("content {0} is not in the candidate set")]
    UnknownContent(i64),
}

/// One scored recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub content_id: i64,
    pub similarity: f64,
    pub performance: f64,
    pub score: f64,
}

/// Score candidates against a reference content id, best first
///
/// `candidates` pairs each content id with its performance metric value
/// (from the aggregation engine). The reference must itself be a member of
/// the candidate set and is excluded from the output.
pub fn recommend(
    reference: i64,
    candidates: &[(i64, f64)],
    similarity: &SimilarityMatrix,
    limit: usize,
) -> Result<Vec<Recommendation>, RecommendError> {
    if candidates.is_empty() {
        return Err(RecommendError::EmptyCandidates);
    }
    if !candidates.iter().any(|&(id, _)| id == reference) {
        return Err(RecommendError::UnknownContent(reference));
    }

    let mut scored: Vec<Recommendation> = candidates
        .iter()
        .filter(|&&(id, _)| id != reference)
        .map(|&(content_id, performance)| {
            let sim = similarity.get(reference, content_id);
            Recommendation {
                content_id,
                similarity: sim,
                performance,
                score: sim * performance,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.content_id.cmp(&b.content_id))
    });

    scored.truncate(limit);
    Ok(scored)
}
