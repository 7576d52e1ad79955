use chrono::{DateTime, Utc};
use nd_core::Article;
use std::collections::HashSet;

const CATEGORY_WEIGHT: f64 = 5.0;
const KEYWORD_WEIGHT: f64 = 2.0;
const SENTIMENT_WEIGHT: f64 = 3.0;
const SOURCE_WEIGHT: f64 = 2.0;
const COUNTRY_WEIGHT: f64 = 1.0;
const RECENCY_WINDOW_DAYS: f64 = 30.0;

/// Additive relevance of `candidate` with respect to `source`. Unbounded
/// above; only meaningful for ranking candidates within one request.
pub fn relevance_score(source: &Article, candidate: &Article, now: DateTime<Utc>) -> f64 {
    let mut score = 0.0;

    // Label bonuses require both sides to carry the label; two articles
    // missing a category or sentiment are not considered a match.
    if let (Some(a), Some(b)) = (&source.category, &candidate.category) {
        if a == b {
            score += CATEGORY_WEIGHT;
        }
    }

    let source_keywords: HashSet<&str> = source.keywords.iter().map(String::as_str).collect();
    let candidate_keywords: HashSet<&str> = candidate.keywords.iter().map(String::as_str).collect();
    let shared = candidate_keywords.intersection(&source_keywords).count();
    score += KEYWORD_WEIGHT * shared as f64;

    if let (Some(a), Some(b)) = (&source.sentiment, &candidate.sentiment) {
        if a == b {
            score += SENTIMENT_WEIGHT;
        }
    }

    if source.source == candidate.source {
        score += SOURCE_WEIGHT;
    }
    if source.country == candidate.country {
        score += COUNTRY_WEIGHT;
    }

    score + recency_boost(candidate.published_at, now)
}

/// Linear freshness bonus: 1.0 for an article published right now, decaying
/// to 0.0 at thirty days, never negative.
pub fn recency_boost(published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_days = (now - published_at).num_seconds().abs() as f64 / 86_400.0;
    (1.0 - age_days / RECENCY_WINDOW_DAYS).max(0.0)
}
