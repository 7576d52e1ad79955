use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub url: String,
    pub content: String,
    pub summary: Option<String>,
    pub category: Option<String>,
    pub keywords: Vec<String>,
    pub sentiment: Option<String>,
    pub source: String,
    pub country: String,
    pub published_at: DateTime<Utc>,
}

/// Query filter for `ArticleStore::find_articles`. Fields set to `Some`
/// (or a non-empty keyword list) are AND-combined; `keywords_any` matches
/// articles whose keyword set intersects any of the given keywords.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub exclude_id: Option<String>,
    pub category: Option<String>,
    pub keywords_any: Vec<String>,
    pub sentiment: Option<String>,
    pub source: Option<String>,
    pub country: Option<String>,
}

impl ArticleFilter {
    pub fn matches(&self, article: &Article) -> bool {
        if let Some(id) = &self.exclude_id {
            if &article.id == id {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if article.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if !self.keywords_any.is_empty()
            && !article.keywords.iter().any(|k| self.keywords_any.contains(k))
        {
            return false;
        }
        if let Some(sentiment) = &self.sentiment {
            if article.sentiment.as_deref() != Some(sentiment.as_str()) {
                return false;
            }
        }
        if let Some(source) = &self.source {
            if &article.source != source {
                return false;
            }
        }
        if let Some(country) = &self.country {
            if &article.country != country {
                return false;
            }
        }
        true
    }
}
