//! Analytics API response DTOs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::aggregation::{
    ComparisonResult, MetricsSummary, RankedContent, SummaryOutput, TimeBucket,
};
use crate::domain::attribution::{AttributionReport, ContentCredit};
use crate::domain::recommend::Recommendation;

// ============================================================================
// Attribution
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct AttributionDto {
    pub model: String,
    pub total_conversions: u64,
    pub total_value: f64,
    pub content: Vec<ContentCreditDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContentCreditDto {
    pub content_id: i64,
    pub attributed_conversions: f64,
    pub attributed_value: f64,
}

impl From<AttributionReport> for AttributionDto {
    fn from(report: AttributionReport) -> Self {
        Self {
            model: report.model.as_str().to_string(),
            total_conversions: report.total_conversions,
            total_value: report.total_value,
            content: report.content.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ContentCredit> for ContentCreditDto {
    fn from(credit: ContentCredit) -> Self {
        Self {
            content_id: credit.content_id,
            attributed_conversions: credit.attributed_conversions,
            attributed_value: credit.attributed_value,
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SummaryDto {
    pub views: i64,
    pub unique_visitors: i64,
    pub likes: i64,
    pub shares: i64,
    pub comments: i64,
    pub clicks: i64,
    pub conversions: i64,
    pub leads_generated: i64,
    pub engagement: i64,
    pub avg_click_through_rate: f64,
    pub avg_bounce_rate: f64,
    pub avg_conversion_rate: f64,
    pub avg_scroll_depth: f64,
    pub revenue: f64,
    pub content_count: i64,
    pub record_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TimeBucketDto {
    pub bucket: NaiveDate,
    pub summary: SummaryDto,
}

/// Flat totals or a bucketed series, depending on `group_by`
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SummaryResponseDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totals: Option<SummaryDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<TimeBucketDto>>,
}

impl From<MetricsSummary> for SummaryDto {
    fn from(summary: MetricsSummary) -> Self {
        Self {
            views: summary.views,
            unique_visitors: summary.unique_visitors,
            likes: summary.likes,
            shares: summary.shares,
            comments: summary.comments,
            clicks: summary.clicks,
            conversions: summary.conversions,
            leads_generated: summary.leads_generated,
            engagement: summary.engagement,
            avg_click_through_rate: summary.avg_click_through_rate,
            avg_bounce_rate: summary.avg_bounce_rate,
            avg_conversion_rate: summary.avg_conversion_rate,
            avg_scroll_depth: summary.avg_scroll_depth,
            revenue: summary.revenue,
            content_count: summary.content_count,
            record_count: summary.record_count,
        }
    }
}

impl From<TimeBucket> for TimeBucketDto {
    fn from(bucket: TimeBucket) -> Self {
        Self {
            bucket: bucket.bucket,
            summary: bucket.summary.into(),
        }
    }
}

impl SummaryResponseDto {
    pub fn from_output(output: SummaryOutput, group_by: Option<&str>) -> Self {
        match output {
            SummaryOutput::Totals(summary) => Self {
                group_by: None,
                totals: Some(summary.into()),
                series: None,
            },
            SummaryOutput::Series(series) => Self {
                group_by: group_by.map(str::to_string),
                totals: None,
                series: Some(series.into_iter().map(Into::into).collect()),
            },
        }
    }
}

// ============================================================================
// Top content
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct RankedContentDto {
    pub content_id: i64,
    pub metric: String,
    pub value: f64,
}

impl From<RankedContent> for RankedContentDto {
    fn from(ranked: RankedContent) -> Self {
        Self {
            content_id: ranked.content_id,
            metric: ranked.metric.as_str().to_string(),
            value: ranked.value,
        }
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// Per-content metric values keyed by content id
#[derive(Debug, Serialize, ToSchema)]
pub struct ComparisonDto {
    pub content: BTreeMap<String, BTreeMap<String, f64>>,
}

impl From<ComparisonResult> for ComparisonDto {
    fn from(result: ComparisonResult) -> Self {
        let content = result
            .into_iter()
            .map(|(content_id, metrics)| {
                (
                    content_id.to_string(),
                    metrics
                        .into_iter()
                        .map(|(name, value)| (name.to_string(), value))
                        .collect(),
                )
            })
            .collect();
        Self { content }
    }
}

// ============================================================================
// Recommendations
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationDto {
    pub content_id: i64,
    pub similarity: f64,
    pub performance: f64,
    pub score: f64,
}

impl From<Recommendation> for RecommendationDto {
    fn from(rec: Recommendation) -> Self {
        Self {
            content_id: rec.content_id,
            similarity: rec.similarity,
            performance: rec.performance,
            score: rec.score,
        }
    }
}
