//! OpenAPI specification and Swagger UI

use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{analytics, health, ingest};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Beacon API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Content Marketing Analytics"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "attribution", description = "Multi-touch attribution reports"),
        (name = "summary", description = "Performance summaries and time series"),
        (name = "top-content", description = "Top-performing content rankings"),
        (name = "comparison", description = "Side-by-side content comparison"),
        (name = "recommendations", description = "Similar-content recommendations"),
        (name = "ingest", description = "Metric, conversion, and content ingestion")
    ),
    paths(
        health::health,
        analytics::attribution::get_attribution,
        analytics::summary::get_summary,
        analytics::top_content::get_top_content,
        analytics::comparison::get_comparison,
        analytics::recommendations::get_recommendations,
        ingest::ingest_metrics,
        ingest::ingest_conversion,
        ingest::register_content,
    )
)]
struct ApiDoc;

/// Serve the OpenAPI spec as JSON
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Serve a minimal Swagger UI page pointed at the spec
pub async fn swagger_ui_html() -> impl IntoResponse {
    Html(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Beacon API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      SwaggerUIBundle({ url: "/api/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>"##,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();
        let paths = json["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/v1/analytics/attribution"));
        assert!(paths.contains_key("/api/v1/analytics/summary"));
        assert!(paths.contains_key("/api/v1/metrics"));
    }
}
