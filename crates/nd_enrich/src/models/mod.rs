use nd_core::{EnrichmentModel, Error, Result};
use std::sync::Arc;
use crate::Config;

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;

/// Build an enrichment model from its CLI name. The reqwest client is
/// constructed here once and handed to the model, never held as a global.
pub async fn create_model(config: Option<Config>) -> Result<Arc<dyn EnrichmentModel>> {
    let config = config.unwrap_or_default();
    let model_name = config.model_name.clone().unwrap_or_else(|| "dummy".to_string());
    match model_name.as_str() {
        "dummy" => Ok(Arc::new(DummyModel::new(None).await?)),
        "openai" => {
            let client = Arc::new(reqwest::Client::new());
            Ok(Arc::new(OpenAiModel::new(client, config)?))
        }
        other => Err(Error::Enrichment(format!("Unknown enrichment model: {}", other))),
    }
}
