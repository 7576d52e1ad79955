use async_trait::async_trait;
use nd_core::{Article, ArticleFilter, ArticleStore, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use crate::StorageBackend;

pub struct MemoryStore {
    articles: Vec<Article>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { articles: Vec::new() }
    }

    pub fn store_article(&mut self, article: &Article) {
        if let Some(existing) = self.articles.iter_mut().find(|a| a.id == article.id) {
            *existing = article.clone();
        } else {
            self.articles.push(article.clone());
        }
    }

    pub fn get_article(&self, id: &str) -> Option<Article> {
        self.articles.iter().find(|a| a.id == id).cloned()
    }

    pub fn find_articles(&self, filter: &ArticleFilter, limit: usize) -> Vec<Article> {
        let mut articles = self
            .articles
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect::<Vec<_>>();
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        articles.truncate(limit);
        articles
    }

    pub fn list_recent(&self, limit: usize) -> Vec<Article> {
        let mut articles = self.articles.clone();
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        articles.truncate(limit);
        articles
    }

    pub fn delete_article(&mut self, id: &str) {
        self.articles.retain(|a| a.id != id);
    }
}

pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub async fn new() -> Result<Self> {
        Ok(Self {
            store: Arc::new(RwLock::new(MemoryStore::new())),
        })
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    fn get_error_message() -> &'static str {
        "Memory storage should be available"
    }

    async fn new() -> Result<Self>
    where
        Self: Sized,
    {
        Self::new().await
    }
}

#[async_trait]
impl ArticleStore for MemoryStorage {
    async fn store_article(&self, article: &Article) -> Result<()> {
        let mut store = self.store.write().await;
        store.store_article(article);
        Ok(())
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        let store = self.store.read().await;
        Ok(store.get_article(id))
    }

    async fn find_articles(&self, filter: &ArticleFilter, limit: usize) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(store.find_articles(filter, limit))
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(store.list_recent(limit))
    }

    async fn delete_article(&self, id: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.delete_article(id);
        Ok(())
    }
}
