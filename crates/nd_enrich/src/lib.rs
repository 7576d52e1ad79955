pub mod models;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
}

pub use models::create_model;

pub mod prelude {
    pub use super::models::create_model;
    pub use super::Config;
    pub use nd_core::{Article, EnrichmentModel, Error, Result};
}
