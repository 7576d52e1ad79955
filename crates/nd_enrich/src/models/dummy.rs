use std::collections::HashMap;
use std::fmt;
use nd_core::{Article, EnrichmentModel, Result};
use crate::Config;

const POSITIVE_WORDS: &[&str] = &[
    "growth", "record", "win", "success", "breakthrough", "surge", "gain", "boost",
];
const NEGATIVE_WORDS: &[&str] = &[
    "crisis", "loss", "crash", "decline", "failure", "scandal", "drop", "fear",
];
const STOP_WORDS: &[&str] = &[
    "about", "after", "against", "because", "before", "between", "their", "there",
    "these", "those", "which", "while", "would", "could", "should", "where",
];

pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub async fn new(_config: Option<Config>) -> Result<Self> {
        Ok(Self)
    }
}

#[async_trait::async_trait]
impl EnrichmentModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn summarize(&self, article: &Article) -> Result<String> {
        // Take first 20 words and join them
        let words: Vec<&str> = article.content.split_whitespace().take(20).collect();
        Ok(words.join(" "))
    }

    async fn analyze_sentiment(&self, article: &Article) -> Result<String> {
        let text = format!("{} {}", article.title, article.content).to_lowercase();
        let positive = POSITIVE_WORDS.iter().filter(|w| text.contains(*w)).count();
        let negative = NEGATIVE_WORDS.iter().filter(|w| text.contains(*w)).count();

        Ok(match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => "positive",
            std::cmp::Ordering::Less => "negative",
            std::cmp::Ordering::Equal => "neutral",
        }
        .to_string())
    }

    async fn extract_keywords(&self, article: &Article) -> Result<Vec<String>> {
        // Most frequent longer words, minus a small stop list
        let mut frequencies: HashMap<String, usize> = HashMap::new();
        for word in article.content.split_whitespace() {
            let word: String = word
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if word.len() > 4 && !STOP_WORDS.contains(&word.as_str()) {
                *frequencies.entry(word).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = frequencies.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(ranked.into_iter().take(5).map(|(word, _)| word).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_article(title: &str, content: &str) -> Article {
        Article {
            id: "a1".to_string(),
            title: title.to_string(),
            url: "http://test.com/a1".to_string(),
            content: content.to_string(),
            summary: None,
            category: None,
            keywords: vec![],
            sentiment: None,
            source: "test".to_string(),
            country: "us".to_string(),
            published_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_summarize_truncates() {
        let model = DummyModel::new(None).await.unwrap();
        let content = (0..40).map(|i| format!("word{}", i)).collect::<Vec<_>>().join(" ");
        let article = make_article("Title", &content);

        let summary = model.summarize(&article).await.unwrap();
        assert_eq!(summary.split_whitespace().count(), 20);
        assert!(summary.starts_with("word0"));
    }

    #[tokio::test]
    async fn test_sentiment_labels() {
        let model = DummyModel::new(None).await.unwrap();

        let upbeat = make_article("Record growth", "A surge in profits and a breakthrough.");
        assert_eq!(model.analyze_sentiment(&upbeat).await.unwrap(), "positive");

        let grim = make_article("Market crash", "The crisis deepened as losses mounted, stoking fear.");
        assert_eq!(model.analyze_sentiment(&grim).await.unwrap(), "negative");

        let flat = make_article("Weather today", "Cloudy with a chance of rain.");
        assert_eq!(model.analyze_sentiment(&flat).await.unwrap(), "neutral");
    }

    #[tokio::test]
    async fn test_keywords_favor_frequency() {
        let model = DummyModel::new(None).await.unwrap();
        let article = make_article(
            "Chips",
            "Semiconductors everywhere. Semiconductors in phones, semiconductors in cars, and a factory.",
        );

        let keywords = model.extract_keywords(&article).await.unwrap();
        assert_eq!(keywords.first().map(String::as_str), Some("semiconductors"));
        assert!(keywords.len() <= 5);
    }
}
