use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use nd_core::{Article, EnrichmentModel, Error, Result};
use crate::Config;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

pub struct OpenAiModel {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiModel {
    /// The client is injected rather than constructed here, so one process
    /// holds exactly one connection pool shared across components.
    pub fn new(client: Arc<Client>, config: Config) -> Result<Self> {
        Ok(Self {
            client,
            api_key: config.api_key.unwrap_or_default(),
            base_url: config.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    async fn chat(&self, prompt: String) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .json::<ChatResponse>()
            .await?;

        response
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| Error::Enrichment("Empty completion response".to_string()))
    }
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl EnrichmentModel for OpenAiModel {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn summarize(&self, article: &Article) -> Result<String> {
        let prompt = format!(
            "Please summarize the following article in two sentences:\n\nTitle: {}\n\nContent: {}\n\nSummary:",
            article.title, article.content
        );
        self.chat(prompt).await
    }

    async fn analyze_sentiment(&self, article: &Article) -> Result<String> {
        let prompt = format!(
            "Classify the sentiment of this article as exactly one word, positive, neutral or negative:\n\nTitle: {}\n\nContent: {}\n\nSentiment:",
            article.title, article.content
        );
        let label = self.chat(prompt).await?.to_lowercase();

        // Anything the model mangles falls back to neutral
        Ok(match label.as_str() {
            "positive" | "negative" | "neutral" => label,
            _ => "neutral".to_string(),
        })
    }

    async fn extract_keywords(&self, article: &Article) -> Result<Vec<String>> {
        let prompt = format!(
            "List up to five topical keywords for this article, comma separated, lowercase:\n\nTitle: {}\n\nContent: {}\n\nKeywords:",
            article.title, article.content
        );
        let raw = self.chat(prompt).await?;

        Ok(raw
            .split(',')
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .take(5)
            .collect())
    }
}
