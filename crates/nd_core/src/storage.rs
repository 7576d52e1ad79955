use async_trait::async_trait;
use crate::types::{Article, ArticleFilter};
use crate::Result;

#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Store an article, replacing any existing article with the same id
    async fn store_article(&self, article: &Article) -> Result<()>;

    /// Fetch a single article by id
    async fn get_article(&self, id: &str) -> Result<Option<Article>>;

    /// Fetch articles matching the filter, newest first, up to `limit`
    async fn find_articles(&self, filter: &ArticleFilter, limit: usize) -> Result<Vec<Article>>;

    /// Fetch the most recent articles, up to `limit`
    async fn list_recent(&self, limit: usize) -> Result<Vec<Article>>;

    /// Remove an article by id
    async fn delete_article(&self, id: &str) -> Result<()>;
}
