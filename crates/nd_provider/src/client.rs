use std::fmt;
use std::sync::Arc;
use chrono::{NaiveDateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use nd_core::{Article, Error, Result};
use tracing::warn;

const DEFAULT_BASE_URL: &str = "https://newsdata.io/api/1";

#[derive(Deserialize)]
struct ProviderResponse {
    status: String,
    #[serde(default)]
    results: Vec<ProviderArticle>,
}

/// One row as the provider serves it; list-valued fields carry multiple
/// labels of which we keep the first.
#[derive(Debug, Deserialize)]
pub(crate) struct ProviderArticle {
    article_id: String,
    title: String,
    link: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    keywords: Option<Vec<String>>,
    #[serde(default)]
    category: Option<Vec<String>>,
    #[serde(default)]
    country: Option<Vec<String>>,
    #[serde(default)]
    source_id: Option<String>,
    #[serde(default, rename = "pubDate")]
    pub_date: Option<String>,
    #[serde(default)]
    sentiment: Option<String>,
}

impl ProviderArticle {
    pub(crate) fn into_article(self) -> Result<Article> {
        let published_at = match self.pub_date.as_deref() {
            Some(raw) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .map_err(|e| Error::Provider(format!("Bad pubDate {:?}: {}", raw, e)))?
                .and_utc(),
            None => Utc::now(),
        };

        Ok(Article {
            id: self.article_id,
            title: self.title,
            url: self.link,
            content: self
                .content
                .or(self.description)
                .unwrap_or_default(),
            summary: None,
            category: self.category.and_then(|mut c| {
                if c.is_empty() { None } else { Some(c.remove(0)) }
            }),
            keywords: self.keywords.unwrap_or_default(),
            sentiment: self.sentiment,
            source: self.source_id.unwrap_or_else(|| "unknown".to_string()),
            country: self
                .country
                .and_then(|mut c| if c.is_empty() { None } else { Some(c.remove(0)) })
                .unwrap_or_default(),
            published_at,
        })
    }
}

pub struct ProviderClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl ProviderClient {
    /// The client is injected rather than constructed here, so one process
    /// holds exactly one connection pool shared across components.
    pub fn new(client: Arc<Client>, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Fetch the latest articles, optionally restricted to a category.
    /// Rows that fail to map are skipped, not fatal for the batch.
    pub async fn fetch_latest(&self, category: Option<&str>) -> Result<Vec<Article>> {
        let mut request = self
            .client
            .get(format!("{}/latest", self.base_url))
            .query(&[("apikey", self.api_key.as_str())]);
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }

        let response = request.send().await?.json::<ProviderResponse>().await?;
        if response.status != "success" {
            return Err(Error::Provider(format!(
                "Provider returned status {}",
                response.status
            )));
        }

        Ok(response
            .results
            .into_iter()
            .filter_map(|raw| match raw.into_article() {
                Ok(article) => Some(article),
                Err(e) => {
                    warn!("⚠️ Skipping malformed provider row: {}", e);
                    None
                }
            })
            .collect())
    }
}

impl fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_ROW: &str = r#"{
        "article_id": "abc123",
        "title": "Chipmaker posts record quarter",
        "link": "https://example.com/chips",
        "description": "Short teaser",
        "content": "Full body text",
        "keywords": ["chips", "earnings"],
        "category": ["technology", "business"],
        "country": ["us", "tw"],
        "source_id": "example-wire",
        "pubDate": "2025-06-01 09:30:00",
        "sentiment": "positive"
    }"#;

    #[test]
    fn test_map_full_row() {
        let raw: ProviderArticle = serde_json::from_str(SAMPLE_ROW).unwrap();
        let article = raw.into_article().unwrap();

        assert_eq!(article.id, "abc123");
        assert_eq!(article.category.as_deref(), Some("technology"));
        assert_eq!(article.country, "us");
        assert_eq!(article.source, "example-wire");
        assert_eq!(article.keywords, vec!["chips", "earnings"]);
        assert_eq!(article.content, "Full body text");
        assert_eq!(article.published_at.to_rfc3339(), "2025-06-01T09:30:00+00:00");
    }

    #[test]
    fn test_map_sparse_row() {
        let raw: ProviderArticle = serde_json::from_str(
            r#"{"article_id": "x1", "title": "Untitled", "link": "https://example.com/x1"}"#,
        )
        .unwrap();
        let article = raw.into_article().unwrap();

        assert_eq!(article.category, None);
        assert!(article.keywords.is_empty());
        assert_eq!(article.source, "unknown");
        assert_eq!(article.country, "");
    }

    #[test]
    fn test_bad_pub_date_is_an_error() {
        let raw: ProviderArticle = serde_json::from_str(
            r#"{"article_id": "x1", "title": "T", "link": "https://example.com/x1", "pubDate": "yesterday"}"#,
        )
        .unwrap();
        assert!(raw.into_article().is_err());
    }

    #[test]
    fn test_description_backfills_content() {
        let raw: ProviderArticle = serde_json::from_str(
            r#"{"article_id": "x1", "title": "T", "link": "https://example.com/x1", "description": "Teaser only"}"#,
        )
        .unwrap();
        assert_eq!(raw.into_article().unwrap().content, "Teaser only");
    }
}
