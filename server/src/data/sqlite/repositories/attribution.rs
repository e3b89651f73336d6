//! Attribution path repository for SQLite operations

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::data::sqlite::SqliteError;
use crate::data::types::{AttributionPathRow, NewAttributionPath, PathQuery, TouchpointRecord};
use crate::utils::time::epoch_to_datetime;

/// Insert one conversion event
///
/// The first/last-touch denormalizations are derived here, at write time,
/// from the caller-supplied touchpoint order. Rows are immutable afterwards.
pub async fn insert_path(
    pool: &SqlitePool,
    new_path: &NewAttributionPath,
) -> Result<i64, SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let path_json = serde_json::to_string(&new_path.path)
        .map_err(|e| SqliteError::decode("attribution_paths", e.to_string()))?;

    let first_touch = new_path.path.first().map(|t| t.content_id);
    let last_touch = new_path.path.last().map(|t| t.content_id);

    let result = sqlx::query(
        r#"
        INSERT INTO attribution_paths (
            user_identifier, conversion_id, conversion_type, conversion_value_cents,
            path, first_touch_content_id, last_touch_content_id, conversion_date, created_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&new_path.user_identifier)
    .bind(&new_path.conversion_id)
    .bind(&new_path.conversion_type)
    .bind(new_path.conversion_value_cents)
    .bind(&path_json)
    .bind(first_touch)
    .bind(last_touch)
    .bind(new_path.conversion_date.timestamp())
    .bind(now)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Query attribution paths by user/date predicate
///
/// Rows whose serialized `path` fails to decode are dropped with a warning
/// rather than failing the batch; a single corrupt conversion must not take
/// down a whole attribution report.
pub async fn query_paths(
    pool: &SqlitePool,
    query: &PathQuery,
) -> Result<Vec<AttributionPathRow>, SqliteError> {
    let mut conditions: Vec<&'static str> = Vec::new();

    if query.user_identifier.is_some() {
        conditions.push("user_identifier = ?");
    }
    if query.start.is_some() {
        conditions.push("conversion_date >= ?");
    }
    if query.end.is_some() {
        conditions.push("conversion_date <= ?");
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT * FROM attribution_paths {} ORDER BY conversion_date ASC, id ASC",
        where_clause
    );

    let mut q = sqlx::query(&sql);
    if let Some(user) = &query.user_identifier {
        q = q.bind(user);
    }
    if let Some(start) = query.start {
        q = q.bind(start.timestamp());
    }
    if let Some(end) = query.end {
        q = q.bind(end.timestamp());
    }

    let rows = q.fetch_all(pool).await?;

    let mut paths = Vec::with_capacity(rows.len());
    for row in &rows {
        match row_to_path(row) {
            Ok(path) => paths.push(path),
            Err(e) => {
                let id: i64 = row.get("id");
                tracing::warn!(path_id = id, error = %e, "Skipping undecodable attribution path");
            }
        }
    }
    Ok(paths)
}

fn row_to_path(row: &SqliteRow) -> Result<AttributionPathRow, SqliteError> {
    let path_json: String = row.get("path");
    let path: Vec<TouchpointRecord> = serde_json::from_str(&path_json)
        .map_err(|e| SqliteError::decode("attribution_paths", e.to_string()))?;

    Ok(AttributionPathRow {
        id: row.get("id"),
        user_identifier: row.get("user_identifier"),
        conversion_id: row.get("conversion_id"),
        conversion_type: row.get("conversion_type"),
        conversion_value_cents: row.get("conversion_value_cents"),
        path,
        first_touch_content_id: row.get("first_touch_content_id"),
        last_touch_content_id: row.get("last_touch_content_id"),
        conversion_date: epoch_to_datetime(row.get("conversion_date")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    fn touch(content_id: i64, hour: u32) -> TouchpointRecord {
        TouchpointRecord {
            content_id,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap(),
            platform: "website".to_string(),
        }
    }

    fn new_path(touchpoints: Vec<TouchpointRecord>) -> NewAttributionPath {
        NewAttributionPath {
            user_identifier: "user-1".to_string(),
            conversion_id: "conv-1".to_string(),
            conversion_type: "purchase".to_string(),
            conversion_value_cents: 10_000,
            path: touchpoints,
            conversion_date: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_derives_first_and_last_touch() {
        let pool = setup_test_pool().await;

        insert_path(&pool, &new_path(vec![touch(1, 8), touch(2, 9), touch(3, 10)]))
            .await
            .unwrap();

        let paths = query_paths(&pool, &PathQuery::default()).await.unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].first_touch_content_id, Some(1));
        assert_eq!(paths[0].last_touch_content_id, Some(3));
        assert_eq!(paths[0].path.len(), 3);
    }

    #[tokio::test]
    async fn test_query_date_window_inclusive() {
        let pool = setup_test_pool().await;

        let mut early = new_path(vec![touch(1, 8)]);
        early.conversion_date = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        insert_path(&pool, &early).await.unwrap();

        let mut late = new_path(vec![touch(2, 8)]);
        late.conversion_date = Utc.with_ymd_and_hms(2025, 3, 5, 0, 0, 0).unwrap();
        insert_path(&pool, &late).await.unwrap();

        let query = PathQuery {
            start: Some(Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()),
            end: Some(Utc.with_ymd_and_hms(2025, 3, 1, 23, 59, 59).unwrap()),
            ..Default::default()
        };
        let paths = query_paths(&pool, &query).await.unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].first_touch_content_id, Some(1));
    }

    #[tokio::test]
    async fn test_query_user_filter() {
        let pool = setup_test_pool().await;

        insert_path(&pool, &new_path(vec![touch(1, 8)])).await.unwrap();

        let mut other = new_path(vec![touch(2, 8)]);
        other.user_identifier = "user-2".to_string();
        insert_path(&pool, &other).await.unwrap();

        let query = PathQuery {
            user_identifier: Some("user-2".to_string()),
            ..Default::default()
        };
        let paths = query_paths(&pool, &query).await.unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].user_identifier, "user-2");
    }

    #[tokio::test]
    async fn test_corrupt_path_json_is_skipped() {
        let pool = setup_test_pool().await;

        insert_path(&pool, &new_path(vec![touch(1, 8)])).await.unwrap();

        // Simulate upstream corruption of the serialized path
        sqlx::query(
            r#"
            INSERT INTO attribution_paths (
                user_identifier, conversion_id, conversion_type, conversion_value_cents,
                path, conversion_date, created_at
            )
            VALUES ('user-x', 'conv-x', 'purchase', 0, 'not json', 0, 0)
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        let paths = query_paths(&pool, &PathQuery::default()).await.unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].conversion_id, "conv-1");
    }

    #[tokio::test]
    async fn test_duplicate_conversion_ids_both_kept() {
        let pool = setup_test_pool().await;

        insert_path(&pool, &new_path(vec![touch(1, 8)])).await.unwrap();
        insert_path(&pool, &new_path(vec![touch(1, 9)])).await.unwrap();

        let paths = query_paths(&pool, &PathQuery::default()).await.unwrap();
        assert_eq!(paths.len(), 2);
    }
}
