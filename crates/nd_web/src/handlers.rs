use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use nd_core::{Article, Error};
use nd_related::{effective_limit, RetrievalStrategy};
use tracing::error;
use crate::AppState;

const LIST_LIMIT: usize = 50;

/// Raw query parameters; limit stays a string so malformed values degrade
/// to the default instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct RelatedQuery {
    pub limit: Option<String>,
    pub strategy: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RelatedResponse {
    pub articles: Vec<Article>,
    pub strategy: String,
    pub total: usize,
}

pub async fn list_articles(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.list_recent(LIST_LIMIT).await {
        Ok(articles) => Json(articles).into_response(),
        Err(e) => {
            error!("Failed to list articles: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to list articles" })),
            )
                .into_response()
        }
    }
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.store.get_article(&id).await {
        Ok(Some(article)) => Json(article).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Article not found" })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to fetch article {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch article" })),
            )
                .into_response()
        }
    }
}

pub async fn get_related_articles(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<RelatedQuery>,
) -> impl IntoResponse {
    let strategy = params
        .strategy
        .as_deref()
        .map(RetrievalStrategy::parse)
        .unwrap_or_default();
    let limit = effective_limit(params.limit.as_deref());

    match state.finder.find_related(&id, strategy, limit).await {
        Ok(articles) => Json(RelatedResponse {
            total: articles.len(),
            articles,
            strategy: strategy.as_str().to_string(),
        })
        .into_response(),
        Err(Error::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Article not found" })),
        )
            .into_response(),
        Err(e) => {
            // Detail stays server-side; clients get a generic body
            error!("Failed to fetch related articles for {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch related articles" })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use nd_core::ArticleStore;
    use nd_storage::MemoryStorage;
    use serde_json::Value;
    use tower::ServiceExt;

    fn make_article(id: &str, category: Option<&str>) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Article {}", id),
            url: format!("http://test.com/{}", id),
            content: "content".to_string(),
            summary: None,
            category: category.map(|c| c.to_string()),
            keywords: vec![],
            sentiment: None,
            source: "wire-a".to_string(),
            country: "us".to_string(),
            published_at: Utc::now(),
        }
    }

    async fn app_with(articles: Vec<Article>) -> axum::Router {
        let storage = MemoryStorage::new().await.unwrap();
        for article in &articles {
            storage.store_article(article).await.unwrap();
        }
        crate::create_app(AppState::new(Arc::new(storage))).await
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_related_success_shape() {
        let app = app_with(vec![
            make_article("src", Some("tech")),
            make_article("c1", Some("tech")),
        ])
        .await;

        let (status, body) = get_json(app, "/article/src/related?strategy=category").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["strategy"], "category");
        assert_eq!(body["total"], 1);
        assert_eq!(body["articles"][0]["id"], "c1");
    }

    #[tokio::test]
    async fn test_related_missing_article_is_404() {
        let app = app_with(vec![]).await;
        let (status, body) = get_json(app, "/article/ghost/related").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Article not found");
    }

    #[tokio::test]
    async fn test_related_invalid_limit_defaults_to_five() {
        let mut articles = vec![make_article("src", Some("tech"))];
        for i in 0..8 {
            articles.push(make_article(&format!("c{}", i), Some("tech")));
        }
        let app = app_with(articles).await;

        let (status, body) = get_json(app, "/article/src/related?limit=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 5);
    }

    #[tokio::test]
    async fn test_related_unknown_strategy_reports_combined() {
        let app = app_with(vec![make_article("src", None)]).await;
        let (status, body) = get_json(app, "/article/src/related?strategy=bogus").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["strategy"], "combined");
    }

    #[tokio::test]
    async fn test_related_empty_result_is_200() {
        // Nothing shares any attribute with the source; still a success
        let mut lonely = make_article("src", None);
        lonely.source = "wire-z".to_string();
        lonely.country = "jp".to_string();
        let app = app_with(vec![lonely, make_article("far", None)]).await;

        let (status, body) = get_json(app, "/article/src/related?strategy=sentiment").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
        assert_eq!(body["articles"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_get_article() {
        let app = app_with(vec![make_article("a1", None)]).await;
        let (status, body) = get_json(app.clone(), "/article/a1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "a1");

        let (status, body) = get_json(app, "/article/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Article not found");
    }

    #[tokio::test]
    async fn test_list_articles() {
        let app = app_with(vec![make_article("a1", None), make_article("a2", None)]).await;
        let (status, body) = get_json(app, "/articles").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }
}
