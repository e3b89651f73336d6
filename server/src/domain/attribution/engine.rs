//! Multi-touch attribution engine
//!
//! Pure computation: a batch of conversion paths plus a model goes in, a
//! per-content fractional credit report comes out. No I/O happens here;
//! paths are loaded by the caller.
//!
//! Credit invariant: a path with usable touch data distributes exactly 1.0
//! conversion-share and its full conversion value across the content it
//! touched, whatever the model. Paths missing the denormalized first/last
//! touch field under a single-touch model distribute nothing but still count
//! toward the batch totals.

use std::collections::HashMap;

use serde::Serialize;

use super::model::AttributionModel;
use crate::data::types::AttributionPathRow;

/// Fractional credit accumulated by one content id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentCredit {
    pub content_id: i64,
    /// Sum of per-path conversion shares (1.0 split across a path)
    pub attributed_conversions: f64,
    /// Attributed monetary credit in major units (dollars)
    pub attributed_value: f64,
}

/// Attribution report for a batch of paths
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributionReport {
    pub model: AttributionModel,
    /// Number of paths in the batch; each path counts once regardless of
    /// how its fractional credit was split
    pub total_conversions: u64,
    /// Sum of all paths' conversion values in major units, independent of
    /// the split
    pub total_value: f64,
    /// Per-content credit, attributed value descending
    pub content: Vec<ContentCredit>,
}

/// Compute per-content credit for a batch of attribution paths
///
/// `content_filter` scopes the batch to paths that touch the given content
/// anywhere in their history; the surviving paths still credit every content
/// they touched.
pub fn attribute(
    paths: &[AttributionPathRow],
    model: AttributionModel,
    content_filter: Option<i64>,
) -> AttributionReport {
    // content_id -> (conversion share, value share in cents)
    let mut credit: HashMap<i64, (f64, f64)> = HashMap::new();
    let mut total_conversions = 0u64;
    let mut total_value_cents = 0i64;

    for path in paths {
        if let Some(wanted) = content_filter
            && !path.path.iter().any(|t| t.content_id == wanted)
        {
            continue;
        }

        total_conversions += 1;
        total_value_cents += path.conversion_value_cents;

        for (content_id, share) in path_shares(path, model) {
            let entry = credit.entry(content_id).or_insert((0.0, 0.0));
            entry.0 += share;
            entry.1 += share * path.conversion_value_cents as f64;
        }
    }

    let mut content: Vec<ContentCredit> = credit
        .into_iter()
        .map(|(content_id, (conversions, value_cents))| ContentCredit {
            content_id,
            attributed_conversions: conversions,
            attributed_value: value_cents / 100.0,
        })
        .collect();

    // Value descending; content_id ascending keeps ties reproducible
    content.sort_by(|a, b| {
        b.attributed_value
            .partial_cmp(&a.attributed_value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.content_id.cmp(&b.content_id))
    });

    AttributionReport {
        model,
        total_conversions,
        total_value: total_value_cents as f64 / 100.0,
        content,
    }
}

/// Fractional shares one path assigns to its touchpoints' content
///
/// Shares for a usable path sum to exactly 1.0. Repeat visits to the same
/// content are credited per occurrence and accumulate.
fn path_shares(path: &AttributionPathRow, model: AttributionModel) -> Vec<(i64, f64)> {
    let touchpoints = &path.path;
    if touchpoints.is_empty() {
        tracing::warn!(path_id = path.id, "Attribution path has no touchpoints");
        return Vec::new();
    }
    let n = touchpoints.len();

    match model {
        AttributionModel::FirstTouch => match path.first_touch_content_id {
            Some(id) => vec![(id, 1.0)],
            None => Vec::new(),
        },
        AttributionModel::LastTouch => match path.last_touch_content_id {
            Some(id) => vec![(id, 1.0)],
            None => Vec::new(),
        },
        AttributionModel::Linear => {
            let share = 1.0 / n as f64;
            touchpoints.iter().map(|t| (t.content_id, share)).collect()
        }
        AttributionModel::PositionBased => {
            // Two or fewer touchpoints leave no middle bucket; degrade to an
            // equal split, identical to linear
            if n <= 2 {
                let share = 1.0 / n as f64;
                return touchpoints.iter().map(|t| (t.content_id, share)).collect();
            }
            let middle_share = 0.2 / (n - 2) as f64;
            touchpoints
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let share = if i == 0 || i == n - 1 {
                        0.4
                    } else {
                        middle_share
                    };
                    (t.content_id, share)
                })
                .collect()
        }
    }
}
