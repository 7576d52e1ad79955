pub mod error;
pub mod models;
pub mod storage;
pub mod types;

pub use error::Error;
pub use models::EnrichmentModel;
pub use storage::ArticleStore;
pub use types::{Article, ArticleFilter};

pub type Result<T> = std::result::Result<T, Error>;
