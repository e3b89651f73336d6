//! Metric record repository for SQLite operations

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use chrono::NaiveDate;

use crate::data::sqlite::SqliteError;
use crate::data::types::{MetricQuery, MetricRecordRow, MetricUpsert};
use crate::utils::time::{date_to_epoch, epoch_to_date};

/// Upsert one metric record with field-level merge semantics
///
/// A single atomic `INSERT .. ON CONFLICT DO UPDATE` per the
/// (content_id, date, platform) natural key: the first ingestion creates the
/// row with defaults for absent fields, later ingestions overwrite only the
/// fields present in `upsert`. Returns the merged row.
pub async fn upsert_metrics(
    pool: &SqlitePool,
    content_id: i64,
    date: NaiveDate,
    platform: &str,
    upsert: &MetricUpsert,
) -> Result<MetricRecordRow, SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let date_epoch = date_to_epoch(date);

    // Column/assignment lists for the provided fields only
    let mut set_clauses: Vec<&'static str> = Vec::new();
    macro_rules! track {
        ($field:ident, $clause:literal) => {
            if upsert.$field.is_some() {
                set_clauses.push($clause);
            }
        };
    }
    track!(views, "views = excluded.views");
    track!(unique_visitors, "unique_visitors = excluded.unique_visitors");
    track!(likes, "likes = excluded.likes");
    track!(shares, "shares = excluded.shares");
    track!(comments, "comments = excluded.comments");
    track!(clicks, "clicks = excluded.clicks");
    track!(conversions, "conversions = excluded.conversions");
    track!(leads_generated, "leads_generated = excluded.leads_generated");
    track!(
        click_through_rate,
        "click_through_rate = excluded.click_through_rate"
    );
    track!(bounce_rate, "bounce_rate = excluded.bounce_rate");
    track!(conversion_rate, "conversion_rate = excluded.conversion_rate");
    track!(scroll_depth, "scroll_depth = excluded.scroll_depth");
    track!(revenue_cents, "revenue_cents = excluded.revenue_cents");
    track!(demographics, "demographics = excluded.demographics");
    track!(sources, "sources = excluded.sources");
    track!(devices, "devices = excluded.devices");
    set_clauses.push("updated_at = excluded.updated_at");

    let sql = format!(
        r#"
        INSERT INTO content_metrics (
            content_id, date, platform,
            views, unique_visitors, likes, shares, comments, clicks, conversions, leads_generated,
            click_through_rate, bounce_rate, conversion_rate, scroll_depth,
            revenue_cents, demographics, sources, devices,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(content_id, date, platform) DO UPDATE SET {}
        "#,
        set_clauses.join(", ")
    );

    sqlx::query(&sql)
        .bind(content_id)
        .bind(date_epoch)
        .bind(platform)
        .bind(upsert.views.unwrap_or(0))
        .bind(upsert.unique_visitors.unwrap_or(0))
        .bind(upsert.likes.unwrap_or(0))
        .bind(upsert.shares.unwrap_or(0))
        .bind(upsert.comments.unwrap_or(0))
        .bind(upsert.clicks.unwrap_or(0))
        .bind(upsert.conversions.unwrap_or(0))
        .bind(upsert.leads_generated.unwrap_or(0))
        .bind(upsert.click_through_rate.unwrap_or(0.0))
        .bind(upsert.bounce_rate.unwrap_or(0.0))
        .bind(upsert.conversion_rate.unwrap_or(0.0))
        .bind(upsert.scroll_depth.unwrap_or(0.0))
        .bind(upsert.revenue_cents.unwrap_or(0))
        .bind(upsert.demographics.as_ref().map(|v| v.to_string()))
        .bind(upsert.sources.as_ref().map(|v| v.to_string()))
        .bind(upsert.devices.as_ref().map(|v| v.to_string()))
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

    let row = sqlx::query(
        "SELECT * FROM content_metrics WHERE content_id = ? AND date = ? AND platform = ?",
    )
    .bind(content_id)
    .bind(date_epoch)
    .bind(platform)
    .fetch_one(pool)
    .await?;

    row_to_metric(&row)
}

/// Query metric records by content/date/platform predicate
///
/// Rows come back in (date, content_id, platform) order so downstream
/// ranking sees a stable store order.
pub async fn query_metrics(
    pool: &SqlitePool,
    query: &MetricQuery,
) -> Result<Vec<MetricRecordRow>, SqliteError> {
    let mut conditions: Vec<String> = Vec::new();

    if let Some(ids) = &query.content_ids {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders: String = ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
        conditions.push(format!("content_id IN ({})", placeholders));
    }
    if query.start_date.is_some() {
        conditions.push("date >= ?".to_string());
    }
    if query.end_date.is_some() {
        conditions.push("date <= ?".to_string());
    }
    if query.platform.is_some() {
        conditions.push("platform = ?".to_string());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT * FROM content_metrics {} ORDER BY date ASC, content_id ASC, platform ASC",
        where_clause
    );

    let mut q = sqlx::query(&sql);
    if let Some(ids) = &query.content_ids {
        for id in ids {
            q = q.bind(id);
        }
    }
    if let Some(start) = query.start_date {
        q = q.bind(date_to_epoch(start));
    }
    if let Some(end) = query.end_date {
        q = q.bind(date_to_epoch(end));
    }
    if let Some(platform) = &query.platform {
        q = q.bind(platform);
    }

    let rows = q.fetch_all(pool).await?;
    rows.iter().map(row_to_metric).collect()
}

fn row_to_metric(row: &SqliteRow) -> Result<MetricRecordRow, SqliteError> {
    let parse_json = |column: &str| -> Option<serde_json::Value> {
        let raw: Option<String> = row.get(column);
        raw.and_then(|s| serde_json::from_str(&s).ok())
    };

    Ok(MetricRecordRow {
        content_id: row.get("content_id"),
        date: epoch_to_date(row.get("date")),
        platform: row.get("platform"),
        views: row.get("views"),
        unique_visitors: row.get("unique_visitors"),
        likes: row.get("likes"),
        shares: row.get("shares"),
        comments: row.get("comments"),
        clicks: row.get("clicks"),
        conversions: row.get("conversions"),
        leads_generated: row.get("leads_generated"),
        click_through_rate: row.get("click_through_rate"),
        bounce_rate: row.get("bounce_rate"),
        conversion_rate: row.get("conversion_rate"),
        scroll_depth: row.get("scroll_depth"),
        revenue_cents: row.get("revenue_cents"),
        demographics: parse_json("demographics"),
        sources: parse_json("sources"),
        devices: parse_json("devices"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[tokio::test]
    async fn test_upsert_creates_row_with_defaults() {
        let pool = setup_test_pool().await;

        let upsert = MetricUpsert {
            views: Some(100),
            ..Default::default()
        };
        let row = upsert_metrics(&pool, 1, day(1), "website", &upsert)
            .await
            .unwrap();

        assert_eq!(row.views, 100);
        assert_eq!(row.clicks, 0);
        assert_eq!(row.revenue_cents, 0);
        assert_eq!(row.date, day(1));
        assert!(row.demographics.is_none());
    }

    #[tokio::test]
    async fn test_upsert_merges_only_provided_fields() {
        let pool = setup_test_pool().await;

        let first = MetricUpsert {
            views: Some(100),
            clicks: Some(10),
            revenue_cents: Some(5000),
            ..Default::default()
        };
        upsert_metrics(&pool, 1, day(1), "website", &first)
            .await
            .unwrap();

        // Second ingestion for the same triple only provides likes
        let second = MetricUpsert {
            likes: Some(7),
            ..Default::default()
        };
        let merged = upsert_metrics(&pool, 1, day(1), "website", &second)
            .await
            .unwrap();

        assert_eq!(merged.views, 100);
        assert_eq!(merged.clicks, 10);
        assert_eq!(merged.revenue_cents, 5000);
        assert_eq!(merged.likes, 7);

        // Still one row for the natural key
        let all = query_metrics(&pool, &MetricQuery::default()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_distinct_platforms_are_distinct_rows() {
        let pool = setup_test_pool().await;

        let upsert = MetricUpsert {
            views: Some(1),
            ..Default::default()
        };
        upsert_metrics(&pool, 1, day(1), "website", &upsert)
            .await
            .unwrap();
        upsert_metrics(&pool, 1, day(1), "facebook", &upsert)
            .await
            .unwrap();

        let all = query_metrics(&pool, &MetricQuery::default()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_query_date_range_inclusive() {
        let pool = setup_test_pool().await;

        for d in 1..=4 {
            let upsert = MetricUpsert {
                views: Some(d as i64 * 100),
                ..Default::default()
            };
            upsert_metrics(&pool, 1, day(d), "website", &upsert)
                .await
                .unwrap();
        }

        let query = MetricQuery {
            start_date: Some(day(2)),
            end_date: Some(day(3)),
            ..Default::default()
        };
        let rows = query_metrics(&pool, &query).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, day(2));
        assert_eq!(rows[1].date, day(3));
    }

    #[tokio::test]
    async fn test_query_content_id_filter() {
        let pool = setup_test_pool().await;

        let upsert = MetricUpsert {
            views: Some(1),
            ..Default::default()
        };
        upsert_metrics(&pool, 1, day(1), "website", &upsert)
            .await
            .unwrap();
        upsert_metrics(&pool, 2, day(1), "website", &upsert)
            .await
            .unwrap();
        upsert_metrics(&pool, 3, day(1), "website", &upsert)
            .await
            .unwrap();

        let query = MetricQuery {
            content_ids: Some(vec![1, 3]),
            ..Default::default()
        };
        let rows = query_metrics(&pool, &query).await.unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.content_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_query_platform_filter() {
        let pool = setup_test_pool().await;

        let upsert = MetricUpsert {
            views: Some(1),
            ..Default::default()
        };
        upsert_metrics(&pool, 1, day(1), "website", &upsert)
            .await
            .unwrap();
        upsert_metrics(&pool, 1, day(1), "facebook", &upsert)
            .await
            .unwrap();

        let query = MetricQuery {
            platform: Some("facebook".to_string()),
            ..Default::default()
        };
        let rows = query_metrics(&pool, &query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].platform, "facebook");
    }

    #[tokio::test]
    async fn test_query_empty_content_ids_returns_nothing() {
        let pool = setup_test_pool().await;

        let query = MetricQuery {
            content_ids: Some(vec![]),
            ..Default::default()
        };
        let rows = query_metrics(&pool, &query).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_json_breakdowns_round_trip() {
        let pool = setup_test_pool().await;

        let upsert = MetricUpsert {
            demographics: Some(serde_json::json!({"18-24": 0.4, "25-34": 0.6})),
            ..Default::default()
        };
        let row = upsert_metrics(&pool, 1, day(1), "website", &upsert)
            .await
            .unwrap();

        assert_eq!(
            row.demographics,
            Some(serde_json::json!({"18-24": 0.4, "25-34": 0.6}))
        );
        assert!(row.sources.is_none());
    }
}
