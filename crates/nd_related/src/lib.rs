use nd_core::{Article, ArticleFilter, ArticleStore, Error, Result};
use std::sync::Arc;
use tracing::debug;

pub mod scoring;

pub use scoring::{recency_boost, relevance_score};

pub const DEFAULT_LIMIT: usize = 5;
pub const MAX_LIMIT: usize = 50;

/// Minimum candidate count before the source/country fallback passes kick in.
const MIN_CANDIDATES: usize = 3;

/// Keyword retrieval queries on the first two source keywords only.
const KEYWORD_QUERY_CAP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetrievalStrategy {
    Category,
    Keywords,
    Sentiment,
    #[default]
    Combined,
}

impl RetrievalStrategy {
    /// Unrecognized strategy names fall back to `Combined`.
    pub fn parse(s: &str) -> Self {
        match s {
            "category" => Self::Category,
            "keywords" => Self::Keywords,
            "sentiment" => Self::Sentiment,
            _ => Self::Combined,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Keywords => "keywords",
            Self::Sentiment => "sentiment",
            Self::Combined => "combined",
        }
    }
}

/// Coerce a raw limit parameter: invalid or non-positive values fall back to
/// the default, anything above the hard cap is clamped to it.
pub fn effective_limit(raw: Option<&str>) -> usize {
    let parsed = raw.and_then(|s| s.trim().parse::<i64>().ok()).unwrap_or(0);
    if parsed <= 0 {
        DEFAULT_LIMIT
    } else {
        (parsed as usize).min(MAX_LIMIT)
    }
}

pub struct RelatedArticleFinder {
    store: Arc<dyn ArticleStore>,
}

impl RelatedArticleFinder {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }

    /// Gather candidates for the requested strategy, top up thin result sets
    /// from same-source and same-country articles, then rank by relevance.
    pub async fn find_related(
        &self,
        article_id: &str,
        strategy: RetrievalStrategy,
        limit: usize,
    ) -> Result<Vec<Article>> {
        let source = self
            .store
            .get_article(article_id)
            .await?
            .ok_or_else(|| Error::NotFound(article_id.to_string()))?;

        let mut candidates: Vec<Article> = Vec::new();

        if matches!(strategy, RetrievalStrategy::Category | RetrievalStrategy::Combined) {
            if let Some(category) = &source.category {
                let filter = ArticleFilter {
                    exclude_id: Some(source.id.clone()),
                    category: Some(category.clone()),
                    ..Default::default()
                };
                push_unique(&mut candidates, self.store.find_articles(&filter, limit).await?);
            }
        }

        if matches!(strategy, RetrievalStrategy::Keywords | RetrievalStrategy::Combined)
            && !source.keywords.is_empty()
        {
            let filter = ArticleFilter {
                exclude_id: Some(source.id.clone()),
                keywords_any: source.keywords.iter().take(KEYWORD_QUERY_CAP).cloned().collect(),
                ..Default::default()
            };
            push_unique(&mut candidates, self.store.find_articles(&filter, limit).await?);
        }

        if matches!(strategy, RetrievalStrategy::Sentiment | RetrievalStrategy::Combined) {
            if let Some(sentiment) = &source.sentiment {
                let filter = ArticleFilter {
                    exclude_id: Some(source.id.clone()),
                    sentiment: Some(sentiment.clone()),
                    ..Default::default()
                };
                push_unique(&mut candidates, self.store.find_articles(&filter, limit).await?);
            }
        }

        // Best-effort top-up for thin strategies; runs for every strategy.
        if candidates.len() < MIN_CANDIDATES {
            let filter = ArticleFilter {
                exclude_id: Some(source.id.clone()),
                source: Some(source.source.clone()),
                ..Default::default()
            };
            push_unique(&mut candidates, self.store.find_articles(&filter, limit).await?);
        }
        if candidates.len() < MIN_CANDIDATES {
            let filter = ArticleFilter {
                exclude_id: Some(source.id.clone()),
                country: Some(source.country.clone()),
                ..Default::default()
            };
            push_unique(&mut candidates, self.store.find_articles(&filter, limit).await?);
        }

        debug!(
            "🔍 Gathered {} candidates for article {} ({})",
            candidates.len(),
            source.id,
            strategy.as_str()
        );

        let now = chrono::Utc::now();
        let mut scored: Vec<(f64, Article)> = candidates
            .into_iter()
            .map(|candidate| (scoring::relevance_score(&source, &candidate, now), candidate))
            .collect();
        // Stable sort: ties keep accumulation order
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(limit);

        Ok(scored.into_iter().map(|(_, article)| article).collect())
    }
}

fn push_unique(candidates: &mut Vec<Article>, batch: Vec<Article>) {
    for article in batch {
        if !candidates.iter().any(|c| c.id == article.id) {
            candidates.push(article);
        }
    }
}
