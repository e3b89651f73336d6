//! Tag-based content similarity
//!
//! A precomputed pairwise similarity matrix over the content registry.
//! Jaccard over tag sets is deliberately simple; the scoring layer only
//! needs a [0,1] signal to weight performance by.

use std::collections::{HashMap, HashSet};

use crate::data::types::ContentRow;

/// Jaccard similarity between two tag lists
pub fn jaccard(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let set_a: HashSet<&str> = a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.iter().map(String::as_str).collect();
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Symmetric pairwise similarity matrix keyed by content id
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    scores: HashMap<(i64, i64), f64>,
}

impl SimilarityMatrix {
    /// Build the matrix from content registry tags
    pub fn from_content(content: &[ContentRow]) -> Self {
        let mut scores = HashMap::new();
        for (i, a) in content.iter().enumerate() {
            for b in content.iter().skip(i + 1) {
                let score = jaccard(&a.tags, &b.tags);
                if score > 0.0 {
                    scores.insert(Self::key(a.id, b.id), score);
                }
            }
        }
        Self { scores }
    }

    /// Similarity between two content ids; identical ids score 1.0,
    /// unknown pairs 0.0
    pub fn get(&self, a: i64, b: i64) -> f64 {
        if a == b {
            return 1.0;
        }
        self.scores.get(&Self::key(a, b)).copied().unwrap_or(0.0)
    }

    fn key(a: i64, b: i64) -> (i64, i64) {
        if a <= b { (a, b) } else { (b, a) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn entry(id: i64, content_tags: &[&str]) -> ContentRow {
        ContentRow {
            id,
            title: format!("Content {}", id),
            content_type: "blog_post".to_string(),
            tags: tags(content_tags),
        }
    }

    const EPS: f64 = 1e-9;

    #[test]
    fn test_jaccard_identical_sets() {
        let a = tags(&["rust", "analytics"]);
        assert!((jaccard(&a, &a) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_jaccard_disjoint_sets() {
        assert_eq!(jaccard(&tags(&["a"]), &tags(&["b"])), 0.0);
    }

    #[test]
    fn test_jaccard_partial_overlap() {
        // {a,b} vs {b,c}: intersection 1, union 3
        let score = jaccard(&tags(&["a", "b"]), &tags(&["b", "c"]));
        assert!((score - 1.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn test_jaccard_empty_sets() {
        assert_eq!(jaccard(&[], &[]), 0.0);
        assert_eq!(jaccard(&tags(&["a"]), &[]), 0.0);
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let content = vec![entry(1, &["a", "b"]), entry(2, &["b", "c"])];
        let matrix = SimilarityMatrix::from_content(&content);
        assert!((matrix.get(1, 2) - matrix.get(2, 1)).abs() < EPS);
        assert!(matrix.get(1, 2) > 0.0);
    }

    #[test]
    fn test_matrix_self_similarity() {
        let matrix = SimilarityMatrix::from_content(&[entry(1, &["a"])]);
        assert_eq!(matrix.get(1, 1), 1.0);
    }

    #[test]
    fn test_matrix_unknown_pair() {
        let matrix = SimilarityMatrix::from_content(&[entry(1, &["a"])]);
        assert_eq!(matrix.get(1, 99), 0.0);
    }
}
