use async_trait::async_trait;
use std::fmt;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait EnrichmentModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Summarize an entire article
    async fn summarize(&self, article: &Article) -> Result<String>;

    /// Classify article sentiment as "positive", "neutral" or "negative"
    async fn analyze_sentiment(&self, article: &Article) -> Result<String>;

    /// Extract topical keywords from an article
    async fn extract_keywords(&self, article: &Article) -> Result<Vec<String>>;
}
