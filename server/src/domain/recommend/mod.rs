//! Content recommendation scoring
//!
//! Tag-similarity weighting over aggregated performance values.

mod scoring;
mod similarity;

pub use scoring::{Recommendation, RecommendError, recommend};
pub use similarity::{SimilarityMatrix, jaccard};
