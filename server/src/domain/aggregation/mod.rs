//! Metric aggregation
//!
//! Sums, unweighted rate means, time-bucketed series, rankings, and
//! side-by-side comparisons over filtered metric records.

mod bucket;
mod engine;

pub use bucket::{GroupBy, bucket_start};
pub use engine::{
    ComparisonResult, MetricsSummary, RankMetric, RankedContent, SummaryOutput, TimeBucket,
    compare, rank_top, summarize,
};
