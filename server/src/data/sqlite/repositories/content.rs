//! Content registry repository for SQLite operations

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::data::sqlite::SqliteError;
use crate::data::types::ContentRow;

/// Upsert a content registry entry
pub async fn upsert_content(pool: &SqlitePool, content: &ContentRow) -> Result<(), SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let tags_json = serde_json::to_string(&content.tags)
        .map_err(|e| SqliteError::decode("content", e.to_string()))?;

    sqlx::query(
        r#"
        INSERT INTO content (id, title, content_type, tags, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            content_type = excluded.content_type,
            tags = excluded.tags,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(content.id)
    .bind(&content.title)
    .bind(&content.content_type)
    .bind(&tags_json)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch content entries by id (missing ids are silently absent)
pub async fn get_content(pool: &SqlitePool, ids: &[i64]) -> Result<Vec<ContentRow>, SqliteError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders: String = ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
    let sql = format!(
        "SELECT id, title, content_type, tags FROM content WHERE id IN ({}) ORDER BY id ASC",
        placeholders
    );

    let mut q = sqlx::query(&sql);
    for id in ids {
        q = q.bind(id);
    }

    let rows = q.fetch_all(pool).await?;
    rows.iter().map(row_to_content).collect()
}

/// All content entries (for similarity scoring)
pub async fn list_content(pool: &SqlitePool) -> Result<Vec<ContentRow>, SqliteError> {
    let rows = sqlx::query("SELECT id, title, content_type, tags FROM content ORDER BY id ASC")
        .fetch_all(pool)
        .await?;
    rows.iter().map(row_to_content).collect()
}

/// Content ids carrying the given type tag
pub async fn list_content_ids_by_type(
    pool: &SqlitePool,
    content_type: &str,
) -> Result<Vec<i64>, SqliteError> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT id FROM content WHERE content_type = ? ORDER BY id ASC")
            .bind(content_type)
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

fn row_to_content(row: &SqliteRow) -> Result<ContentRow, SqliteError> {
    let tags_json: String = row.get("tags");
    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .map_err(|e| SqliteError::decode("content", e.to_string()))?;

    Ok(ContentRow {
        id: row.get("id"),
        title: row.get("title"),
        content_type: row.get("content_type"),
        tags,
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

    fn entry(id: i64, content_type: &str, tags: &[&str]) -> ContentRow {
        ContentRow {
            id,
            title: format!("Content {}", id),
            content_type: content_type.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_get_round_trip() {
        let pool = setup_test_pool().await;

        upsert_content(&pool, &entry(1, "blog_post", &["rust", "analytics"]))
            .await
            .unwrap();

        let rows = get_content(&pool, &[1]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content_type, "blog_post");
        assert_eq!(rows[0].tags, vec!["rust", "analytics"]);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let pool = setup_test_pool().await;

        upsert_content(&pool, &entry(1, "blog_post", &[])).await.unwrap();
        upsert_content(&pool, &entry(1, "video", &["launch"]))
            .await
            .unwrap();

        let rows = get_content(&pool, &[1]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].content_type, "video");
        assert_eq!(rows[0].tags, vec!["launch"]);
    }

    #[tokio::test]
    async fn test_list_ids_by_type() {
        let pool = setup_test_pool().await;

        upsert_content(&pool, &entry(1, "blog_post", &[])).await.unwrap();
        upsert_content(&pool, &entry(2, "video", &[])).await.unwrap();
        upsert_content(&pool, &entry(3, "blog_post", &[])).await.unwrap();

        let ids = list_content_ids_by_type(&pool, "blog_post").await.unwrap();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_get_content_empty_ids() {
        let pool = setup_test_pool().await;
        let rows = get_content(&pool, &[]).await.unwrap();
        assert!(rows.is_empty());
    }
}
