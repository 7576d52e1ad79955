use std::sync::Arc;
use nd_core::{Article, ArticleStore, EnrichmentModel, Result};
use tracing::info;
use crate::ProviderClient;

pub struct IngestManager {
    store: Arc<dyn ArticleStore>,
    enrichment: Arc<dyn EnrichmentModel>,
    provider: ProviderClient,
}

impl IngestManager {
    pub fn new(
        store: Arc<dyn ArticleStore>,
        enrichment: Arc<dyn EnrichmentModel>,
        provider: ProviderClient,
    ) -> Self {
        Self {
            store,
            enrichment,
            provider,
        }
    }

    /// Fetch a provider batch, fill in missing enrichment fields and store it.
    pub async fn ingest(&self, category: Option<&str>) -> Result<usize> {
        info!(
            "📡 Fetching latest articles ({})",
            category.unwrap_or("all categories")
        );
        let articles = self.provider.fetch_latest(category).await?;
        info!("📰 Provider returned {} articles", articles.len());
        self.enrich_and_store(articles).await
    }

    /// Provider fields win when present; enrichment only fills the gaps.
    pub async fn enrich_and_store(&self, articles: Vec<Article>) -> Result<usize> {
        let mut stored = 0;
        for mut article in articles {
            if article.summary.is_none() {
                article.summary = Some(self.enrichment.summarize(&article).await?);
            }
            if article.sentiment.is_none() {
                article.sentiment = Some(self.enrichment.analyze_sentiment(&article).await?);
            }
            if article.keywords.is_empty() {
                article.keywords = self.enrichment.extract_keywords(&article).await?;
            }

            self.store.store_article(&article).await?;
            stored += 1;
        }

        info!("✨ Stored {} enriched articles", stored);
        Ok(stored)
    }
}
