//! Metric aggregation engine
//!
//! Pure computation over filtered metric records: flat summaries,
//! time-bucketed series, top-content rankings, and per-content comparisons.
//!
//! Rate fields are aggregated as the unweighted mean of the per-record
//! values, not a traffic-weighted average. Downstream dashboards were built
//! against the unweighted figure, so this is preserved as-is (known
//! limitation).

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use super::bucket::{GroupBy, bucket_start};
use crate::data::types::MetricRecordRow;

/// Aggregated totals for a set of metric records
///
/// Counters are sums; `avg_*` fields are unweighted means; `revenue` is in
/// major units, converted from cents exactly once when this struct is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub views: i64,
    pub unique_visitors: i64,
    pub likes: i64,
    pub shares: i64,
    pub comments: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub leads_generated: i64,
    /// likes + shares + comments
    pub engagement: i64,

    pub avg_click_through_rate: f64,
    pub avg_bounce_rate: f64,
    pub avg_conversion_rate: f64,
    pub avg_scroll_depth: f64,

    /// Major currency units (dollars)
    pub revenue: f64,

    /// Distinct content ids in the aggregated set
    pub content_count: i64,
    /// Number of records aggregated
    pub record_count: i64,
}

/// One bucket of a grouped summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeBucket {
    pub bucket: NaiveDate,
    pub summary: MetricsSummary,
}

/// Flat or time-bucketed summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SummaryOutput {
    Totals(MetricsSummary),
    Series(Vec<TimeBucket>),
}

/// Summarize records, optionally grouped into time buckets
///
/// An empty input yields an all-zero summary (or an empty series), never an
/// error; reporting callers render that as "no data for this period".
pub fn summarize(records: &[MetricRecordRow], group_by: Option<GroupBy>) -> SummaryOutput {
    match group_by {
        None => SummaryOutput::Totals(summarize_records(records.iter())),
        Some(group_by) => {
            let mut buckets: BTreeMap<NaiveDate, Vec<&MetricRecordRow>> = BTreeMap::new();
            for record in records {
                buckets
                    .entry(bucket_start(record.date, group_by))
                    .or_default()
                    .push(record);
            }
            let series = buckets
                .into_iter()
                .map(|(bucket, rows)| TimeBucket {
                    bucket,
                    summary: summarize_records(rows.into_iter()),
                })
                .collect();
            SummaryOutput::Series(series)
        }
    }
}

fn summarize_records<'a>(records: impl Iterator<Item = &'a MetricRecordRow>) -> MetricsSummary {
    let mut summary = MetricsSummary::default();
    let mut content_ids: HashSet<i64> = HashSet::new();
    let mut revenue_cents = 0i64;
    let mut ctr_sum = 0.0;
    let mut bounce_sum = 0.0;
    let mut conv_rate_sum = 0.0;
    let mut scroll_sum = 0.0;

    for record in records {
        summary.views += record.views;
        summary.unique_visitors += record.unique_visitors;
        summary.likes += record.likes;
        summary.shares += record.shares;
        summary.comments += record.comments;
        summary.clicks += record.clicks;
        summary.conversions += record.conversions;
        summary.leads_generated += record.leads_generated;
        revenue_cents += record.revenue_cents;
        ctr_sum += record.click_through_rate;
        bounce_sum += record.bounce_rate;
        conv_rate_sum += record.conversion_rate;
        scroll_sum += record.scroll_depth;
        content_ids.insert(record.content_id);
        summary.record_count += 1;
    }

    summary.engagement = summary.likes + summary.shares + summary.comments;
    summary.content_count = content_ids.len() as i64;
    summary.revenue = revenue_cents as f64 / 100.0;

    if summary.record_count > 0 {
        let n = summary.record_count as f64;
        summary.avg_click_through_rate = ctr_sum / n;
        summary.avg_bounce_rate = bounce_sum / n;
        summary.avg_conversion_rate = conv_rate_sum / n;
        summary.avg_scroll_depth = scroll_sum / n;
    }

    summary
}

// ============================================================================
// Top-content ranking
// ============================================================================

/// Metric a top-content query can rank by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    Views,
    UniqueVisitors,
    Likes,
    Shares,
    Comments,
    Clicks,
    Conversions,
    LeadsGenerated,
    Engagement,
    Revenue,
    ClickThroughRate,
    BounceRate,
    ConversionRate,
    ScrollDepth,
}

impl RankMetric {
    /// Parse a caller-supplied metric name; None for unknown input
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "views" => Some(Self::Views),
            "unique_visitors" => Some(Self::UniqueVisitors),
            "likes" => Some(Self::Likes),
            "shares" => Some(Self::Shares),
            "comments" => Some(Self::Comments),
            "clicks" => Some(Self::Clicks),
            "conversions" => Some(Self::Conversions),
            "leads_generated" => Some(Self::LeadsGenerated),
            "engagement" => Some(Self::Engagement),
            "revenue" => Some(Self::Revenue),
            "click_through_rate" => Some(Self::ClickThroughRate),
            "bounce_rate" => Some(Self::BounceRate),
            "conversion_rate" => Some(Self::ConversionRate),
            "scroll_depth" => Some(Self::ScrollDepth),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::UniqueVisitors => "unique_visitors",
            Self::Likes => "likes",
            Self::Shares => "shares",
            Self::Comments => "comments",
            Self::Clicks => "clicks",
            Self::Conversions => "conversions",
            Self::LeadsGenerated => "leads_generated",
            Self::Engagement => "engagement",
            Self::Revenue => "revenue",
            Self::ClickThroughRate => "click_through_rate",
            Self::BounceRate => "bounce_rate",
            Self::ConversionRate => "conversion_rate",
            Self::ScrollDepth => "scroll_depth",
        }
    }

    /// Lower bounce rates are better; everything else ranks descending
    pub const fn sorts_ascending(&self) -> bool {
        matches!(self, Self::BounceRate)
    }

    fn value_for(&self, summary: &MetricsSummary) -> f64 {
        match self {
            Self::Views => summary.views as f64,
            Self::UniqueVisitors => summary.unique_visitors as f64,
            Self::Likes => summary.likes as f64,
            Self::Shares => summary.shares as f64,
            Self::Comments => summary.comments as f64,
            Self::Clicks => summary.clicks as f64,
            Self::Conversions => summary.conversions as f64,
            Self::LeadsGenerated => summary.leads_generated as f64,
            Self::Engagement => summary.engagement as f64,
            Self::Revenue => summary.revenue,
            Self::ClickThroughRate => summary.avg_click_through_rate,
            Self::BounceRate => summary.avg_bounce_rate,
            Self::ConversionRate => summary.avg_conversion_rate,
            Self::ScrollDepth => summary.avg_scroll_depth,
        }
    }
}

/// One entry in a top-content ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedContent {
    pub content_id: i64,
    pub metric: RankMetric,
    pub value: f64,
}

/// Rank content by a metric, best first
///
/// Count-like metrics rank by their sum, rate-like metrics by their
/// unweighted mean. Ties keep the store's return order (stable sort, no
/// secondary key) so pagination stays consistent between runs.
pub fn rank_top(records: &[MetricRecordRow], metric: RankMetric, limit: usize) -> Vec<RankedContent> {
    // Group per content, preserving first-seen order from the store
    let mut order: Vec<i64> = Vec::new();
    let mut grouped: BTreeMap<i64, Vec<&MetricRecordRow>> = BTreeMap::new();
    for record in records {
        if !grouped.contains_key(&record.content_id) {
            order.push(record.content_id);
        }
        grouped.entry(record.content_id).or_default().push(record);
    }

    let mut ranked: Vec<RankedContent> = order
        .into_iter()
        .map(|content_id| {
            let rows = &grouped[&content_id];
            let summary = summarize_records(rows.iter().copied());
            RankedContent {
                content_id,
                metric,
                value: metric.value_for(&summary),
            }
        })
        .collect();

    if metric.sorts_ascending() {
        ranked.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal));
    } else {
        ranked.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    }

    ranked.truncate(limit);
    ranked
}

// ============================================================================
// Per-content comparison
// ============================================================================

/// Per-content metric values, keyed by metric name
pub type ComparisonResult = BTreeMap<i64, BTreeMap<&'static str, f64>>;

/// Compare content side by side
///
/// Computes the same aggregation as `summarize` scoped to each content id,
/// then intersects the output with the caller's metric allow-list (None =
/// all metrics). Requested ids with no records still appear, all-zero.
pub fn compare(
    records: &[MetricRecordRow],
    content_ids: &[i64],
    metrics: Option<&[String]>,
) -> ComparisonResult {
    let mut result = ComparisonResult::new();

    for &content_id in content_ids {
        let summary = summarize_records(records.iter().filter(|r| r.content_id == content_id));
        let mut values = summary_metric_map(&summary);

        if let Some(allowed) = metrics {
            let allowed: HashSet<&str> = allowed.iter().map(String::as_str).collect();
            values.retain(|name, _| allowed.contains(name));
        }

        result.insert(content_id, values);
    }

    result
}

fn summary_metric_map(summary: &MetricsSummary) -> BTreeMap<&'static str, f64> {
    BTreeMap::from([
        ("views", summary.views as f64),
        ("unique_visitors", summary.unique_visitors as f64),
        ("likes", summary.likes as f64),
        ("shares", summary.shares as f64),
        ("comments", summary.comments as f64),
        ("clicks", summary.clicks as f64),
        ("conversions", summary.conversions as f64),
        ("leads_generated", summary.leads_generated as f64),
        ("engagement", summary.engagement as f64),
        ("click_through_rate", summary.avg_click_through_rate),
        ("bounce_rate", summary.avg_bounce_rate),
        ("conversion_rate", summary.avg_conversion_rate),
        ("scroll_depth", summary.avg_scroll_depth),
        ("revenue", summary.revenue),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn record(content_id: i64, d: u32, views: i64) -> MetricRecordRow {
        MetricRecordRow {
            content_id,
            date: day(d),
            platform: "website".to_string(),
            views,
            unique_visitors: 0,
            likes: 0,
            shares: 0,
            comments: 0,
            clicks: 0,
            conversions: 0,
            leads_generated: 0,
            click_through_rate: 0.0,
            bounce_rate: 0.0,
            conversion_rate: 0.0,
            scroll_depth: 0.0,
            revenue_cents: 0,
            demographics: None,
            sources: None,
            devices: None,
        }
    }

    const EPS: f64 = 1e-9;

    #[test]
    fn test_empty_set_contract() {
        let output = summarize(&[], None);
        let SummaryOutput::Totals(summary) = output else {
            panic!("expected totals");
        };
        assert_eq!(summary, MetricsSummary::default());
        assert_eq!(summary.content_count, 0);
        assert_eq!(summary.views, 0);
        assert_eq!(summary.revenue, 0.0);
    }

    #[test]
    fn test_counters_sum_and_rates_average() {
        let mut a = record(1, 1, 100);
        a.likes = 4;
        a.shares = 2;
        a.comments = 1;
        a.click_through_rate = 0.2;
        let mut b = record(2, 1, 50);
        b.click_through_rate = 0.4;

        let SummaryOutput::Totals(summary) = summarize(&[a, b], None) else {
            panic!("expected totals");
        };
        assert_eq!(summary.views, 150);
        assert_eq!(summary.engagement, 7);
        assert_eq!(summary.content_count, 2);
        assert_eq!(summary.record_count, 2);
        // Unweighted mean, deliberately not traffic-weighted
        assert!((summary.avg_click_through_rate - 0.3).abs() < EPS);
    }

    #[test]
    fn test_revenue_divided_exactly_once() {
        let mut a = record(1, 1, 0);
        a.revenue_cents = 5000;
        let SummaryOutput::Totals(summary) = summarize(&[a], None) else {
            panic!("expected totals");
        };
        assert!((summary.revenue - 50.0).abs() < EPS);
    }

    #[test]
    fn test_daily_series_no_cross_day_leakage() {
        let records = vec![record(1, 1, 100), record(1, 2, 150), record(1, 3, 200)];
        let SummaryOutput::Series(series) = summarize(&records, Some(GroupBy::Daily)) else {
            panic!("expected series");
        };
        assert_eq!(series.len(), 3);
        let views: Vec<i64> = series.iter().map(|b| b.summary.views).collect();
        assert_eq!(views, vec![100, 150, 200]);
        let buckets: Vec<NaiveDate> = series.iter().map(|b| b.bucket).collect();
        assert_eq!(buckets, vec![day(1), day(2), day(3)]);
    }

    #[test]
    fn test_weekly_series_groups_by_iso_week() {
        // 2025-03-03 is a Monday; 03-09 Sunday; 03-10 next Monday
        let records = vec![record(1, 3, 10), record(1, 9, 20), record(1, 10, 40)];
        let SummaryOutput::Series(series) = summarize(&records, Some(GroupBy::Weekly)) else {
            panic!("expected series");
        };
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].bucket, day(3));
        assert_eq!(series[0].summary.views, 30);
        assert_eq!(series[1].bucket, day(10));
        assert_eq!(series[1].summary.views, 40);
    }

    #[test]
    fn test_monthly_series_spans_months() {
        let mut records = vec![record(1, 5, 10), record(1, 20, 20)];
        records.push(MetricRecordRow {
            date: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            ..record(1, 1, 5)
        });
        let SummaryOutput::Series(series) = summarize(&records, Some(GroupBy::Monthly)) else {
            panic!("expected series");
        };
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].bucket, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(series[0].summary.views, 30);
        assert_eq!(series[1].summary.views, 5);
    }

    #[test]
    fn test_rank_top_descending_by_default() {
        let records = vec![record(1, 1, 100), record(2, 1, 300), record(3, 1, 200)];
        let ranked = rank_top(&records, RankMetric::Views, 10);
        let ids: Vec<i64> = ranked.iter().map(|r| r.content_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_rank_top_bounce_rate_inversion() {
        let mut a = record(1, 1, 0);
        a.bounce_rate = 0.5;
        let mut b = record(2, 1, 0);
        b.bounce_rate = 0.1;
        let mut c = record(3, 1, 0);
        c.bounce_rate = 0.9;

        let ranked = rank_top(&[a, b, c], RankMetric::BounceRate, 10);
        let ids: Vec<i64> = ranked.iter().map(|r| r.content_id).collect();
        // Lower bounce rate is better, so ascending
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_rank_top_sums_across_records() {
        let records = vec![record(1, 1, 100), record(1, 2, 100), record(2, 1, 150)];
        let ranked = rank_top(&records, RankMetric::Views, 10);
        assert_eq!(ranked[0].content_id, 1);
        assert!((ranked[0].value - 200.0).abs() < EPS);
    }

    #[test]
    fn test_rank_top_engagement_metric() {
        let mut a = record(1, 1, 0);
        a.likes = 5;
        a.shares = 3;
        a.comments = 2;
        let mut b = record(2, 1, 0);
        b.likes = 20;

        let ranked = rank_top(&[a, b], RankMetric::Engagement, 10);
        assert_eq!(ranked[0].content_id, 2);
        assert!((ranked[0].value - 20.0).abs() < EPS);
        assert!((ranked[1].value - 10.0).abs() < EPS);
    }

    #[test]
    fn test_rank_top_rate_uses_mean() {
        let mut a1 = record(1, 1, 0);
        a1.conversion_rate = 0.2;
        let mut a2 = record(1, 2, 0);
        a2.conversion_rate = 0.4;
        let mut b = record(2, 1, 0);
        b.conversion_rate = 0.25;

        let ranked = rank_top(&[a1, a2, b], RankMetric::ConversionRate, 10);
        assert_eq!(ranked[0].content_id, 1);
        assert!((ranked[0].value - 0.3).abs() < EPS);
    }

    #[test]
    fn test_rank_top_ties_keep_store_order() {
        let records = vec![record(5, 1, 100), record(3, 1, 100), record(9, 1, 100)];
        let ranked = rank_top(&records, RankMetric::Views, 10);
        let ids: Vec<i64> = ranked.iter().map(|r| r.content_id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }

    #[test]
    fn test_rank_top_limit() {
        let records = vec![record(1, 1, 1), record(2, 1, 2), record(3, 1, 3)];
        let ranked = rank_top(&records, RankMetric::Views, 2);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_compare_scopes_per_content() {
        let mut a = record(1, 1, 100);
        a.revenue_cents = 5000;
        let b = record(2, 1, 40);

        let result = compare(&[a, b], &[1, 2], None);
        assert!((result[&1]["views"] - 100.0).abs() < EPS);
        assert!((result[&1]["revenue"] - 50.0).abs() < EPS);
        assert!((result[&2]["views"] - 40.0).abs() < EPS);
    }

    #[test]
    fn test_compare_allow_list_intersection() {
        let records = vec![record(1, 1, 100)];
        let allowed = vec!["views".to_string(), "bogus_metric".to_string()];
        let result = compare(&records, &[1], Some(&allowed));

        let metrics = &result[&1];
        assert_eq!(metrics.len(), 1);
        assert!(metrics.contains_key("views"));
    }

    #[test]
    fn test_compare_missing_content_all_zero() {
        let records = vec![record(1, 1, 100)];
        let result = compare(&records, &[1, 42], None);
        assert!((result[&42]["views"]).abs() < EPS);
        assert!((result[&42]["revenue"]).abs() < EPS);
    }

    #[test]
    fn test_rank_metric_parse() {
        assert_eq!(RankMetric::parse("views"), Some(RankMetric::Views));
        assert_eq!(RankMetric::parse("engagement"), Some(RankMetric::Engagement));
        assert_eq!(RankMetric::parse("bounce_rate"), Some(RankMetric::BounceRate));
        assert_eq!(RankMetric::parse("nonsense"), None);
    }
}
