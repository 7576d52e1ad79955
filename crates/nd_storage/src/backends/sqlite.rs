use async_trait::async_trait;
use nd_core::{Article, ArticleFilter, ArticleStore, Result};
use sqlx::{sqlite::SqlitePool, Row};
use std::path::PathBuf;
use std::sync::Arc;
use crate::StorageBackend;

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        url TEXT NOT NULL,
        content TEXT NOT NULL,
        summary TEXT,
        category TEXT,
        keywords TEXT NOT NULL,
        sentiment TEXT,
        source TEXT NOT NULL,
        country TEXT NOT NULL,
        published_at TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

pub struct SqliteStorage {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

#[async_trait]
impl StorageBackend for SqliteStorage {
    fn get_error_message() -> &'static str {
        "SQLite database should be available at ./articles.db"
    }

    async fn new() -> Result<Self> {
        let db_path = PathBuf::from("articles.db");
        Self::new_with_path(&db_path).await
    }
}

impl SqliteStorage {
    pub async fn new_with_path(db_path: &PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                nd_core::Error::Storage(format!("Failed to create database directory: {}", e))
            })?;
        }

        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path.display()))
            .await
            .map_err(|e| nd_core::Error::Storage(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| nd_core::Error::Storage(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self {
            pool: Arc::new(pool),
            db_path: db_path.clone(),
        })
    }

    pub fn get_db_path(&self) -> &PathBuf {
        &self.db_path
    }

    fn article_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Article> {
        let keywords: String = row.get("keywords");
        let keywords: Vec<String> = serde_json::from_str(&keywords)?;

        Ok(Article {
            id: row.get("id"),
            title: row.get("title"),
            url: row.get("url"),
            content: row.get("content"),
            summary: row.get::<Option<String>, _>("summary"),
            category: row.get::<Option<String>, _>("category"),
            keywords,
            sentiment: row.get::<Option<String>, _>("sentiment"),
            source: row.get("source"),
            country: row.get("country"),
            published_at: chrono::DateTime::parse_from_rfc3339(row.get::<String, _>("published_at").as_str())
                .map_err(|e| nd_core::Error::Storage(format!("Failed to parse date: {}", e)))?
                .with_timezone(&chrono::Utc),
        })
    }
}

#[async_trait]
impl ArticleStore for SqliteStorage {
    async fn store_article(&self, article: &Article) -> Result<()> {
        let keywords = serde_json::to_string(&article.keywords)?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO articles
            (id, title, url, content, summary, category, keywords, sentiment, source, country, published_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&article.id)
        .bind(&article.title)
        .bind(&article.url)
        .bind(&article.content)
        .bind(article.summary.as_deref())
        .bind(article.category.as_deref())
        .bind(keywords)
        .bind(article.sentiment.as_deref())
        .bind(&article.source)
        .bind(&article.country)
        .bind(article.published_at.to_rfc3339())
        .execute(&*self.pool)
        .await
        .map_err(|e| nd_core::Error::Storage(format!("Failed to store article: {}", e)))?;

        Ok(())
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM articles WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| nd_core::Error::Storage(format!("Failed to get article: {}", e)))?;

        row.map(|r| Self::article_from_row(&r)).transpose()
    }

    async fn find_articles(&self, filter: &ArticleFilter, limit: usize) -> Result<Vec<Article>> {
        let mut sql = String::from("SELECT * FROM articles WHERE 1=1");
        let mut binds: Vec<String> = Vec::new();

        if let Some(id) = &filter.exclude_id {
            sql.push_str(" AND id != ?");
            binds.push(id.clone());
        }
        if let Some(category) = &filter.category {
            sql.push_str(" AND category = ?");
            binds.push(category.clone());
        }
        if !filter.keywords_any.is_empty() {
            let placeholders = vec!["?"; filter.keywords_any.len()].join(", ");
            sql.push_str(&format!(
                " AND EXISTS (SELECT 1 FROM json_each(articles.keywords) WHERE json_each.value IN ({}))",
                placeholders
            ));
            binds.extend(filter.keywords_any.iter().cloned());
        }
        if let Some(sentiment) = &filter.sentiment {
            sql.push_str(" AND sentiment = ?");
            binds.push(sentiment.clone());
        }
        if let Some(source) = &filter.source {
            sql.push_str(" AND source = ?");
            binds.push(source.clone());
        }
        if let Some(country) = &filter.country {
            sql.push_str(" AND country = ?");
            binds.push(country.clone());
        }
        sql.push_str(" ORDER BY published_at DESC LIMIT ?");

        let mut query = sqlx::query(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        query = query.bind(limit as i64);

        let rows = query
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| nd_core::Error::Storage(format!("Failed to find articles: {}", e)))?;

        rows.iter().map(Self::article_from_row).collect()
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Article>> {
        let rows = sqlx::query("SELECT * FROM articles ORDER BY published_at DESC LIMIT ?")
            .bind(limit as i64)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| nd_core::Error::Storage(format!("Failed to list articles: {}", e)))?;

        rows.iter().map(Self::article_from_row).collect()
    }

    async fn delete_article(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(|e| nd_core::Error::Storage(format!("Failed to delete article: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn make_article(id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: "Test Article".to_string(),
            url: format!("http://example.com/{}", id),
            content: "Test content".to_string(),
            summary: None,
            category: Some("technology".to_string()),
            keywords: vec!["ai".to_string(), "chips".to_string()],
            sentiment: Some("positive".to_string()),
            source: "example".to_string(),
            country: "us".to_string(),
            published_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_sqlite_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let storage = SqliteStorage::new_with_path(&db_path).await.unwrap();
        let article = make_article("a1");
        storage.store_article(&article).await.unwrap();

        let fetched = storage.get_article("a1").await.unwrap().unwrap();
        assert_eq!(fetched.keywords, article.keywords);
        assert_eq!(fetched.category.as_deref(), Some("technology"));

        // Test database is cleaned up when temp_dir is dropped
    }

    #[tokio::test]
    async fn test_sqlite_find_by_keywords() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let storage = SqliteStorage::new_with_path(&db_path).await.unwrap();
        storage.store_article(&make_article("a1")).await.unwrap();
        let mut other = make_article("a2");
        other.keywords = vec!["football".to_string()];
        storage.store_article(&other).await.unwrap();

        let filter = ArticleFilter {
            keywords_any: vec!["chips".to_string()],
            ..Default::default()
        };
        let found = storage.find_articles(&filter, 10).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a1");
    }
}
