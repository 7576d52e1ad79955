use clap::Parser;
use nd_core::Result;
use nd_provider::{IngestManager, ProviderClient};
use nd_web::AppState;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                match c {
                    's' => total_seconds += num,
                    'm' => total_seconds += num * 60,
                    'h' => total_seconds += num * 3600,
                    'd' => total_seconds += num * 86400,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                }
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number is taken as seconds
        if !current_number.is_empty() {
            if let Ok(num) = current_number.parse::<u64>() {
                total_seconds += num;
                has_unit = true;
            } else {
                return Err("Invalid number in duration".to_string());
            }
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(long, default_value = "memory", help = "Storage backend: memory or sqlite")]
    storage: String,
    #[arg(long, default_value = "dummy", help = "Enrichment model: dummy or openai")]
    model: String,
    #[arg(long, help = "News provider API key")]
    provider_key: Option<String>,
    #[arg(long, help = "Enrichment model API key")]
    model_key: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: String,
    },
    /// Fetch a batch of articles from the news provider
    Fetch {
        /// Restrict the fetch to one provider category (e.g. technology)
        #[arg(long)]
        category: Option<String>,
        /// Run in periodic mode with the specified interval (e.g. 1h, 30m, 1h15m30s)
        #[arg(long)]
        interval: Option<HumanDuration>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store = nd_storage::create_storage(cli.storage.as_str()).await?;
    info!("🏦 Storage backend initialized successfully (using {})", cli.storage);

    match cli.command {
        Commands::Serve { bind } => {
            let state = AppState::new(store);
            nd_web::serve(state, &bind).await?;
        }
        Commands::Fetch { category, interval } => {
            let enrichment = nd_enrich::create_model(Some(nd_enrich::Config {
                api_key: cli.model_key,
                model_name: Some(cli.model.clone()),
                base_url: None,
            }))
            .await?;
            info!("🧠 Enrichment model initialized successfully (using {})", enrichment.name());

            let client = Arc::new(reqwest::Client::new());
            let provider = ProviderClient::new(client, cli.provider_key.unwrap_or_default());
            let manager = IngestManager::new(store, enrichment, provider);

            if let Some(interval) = interval {
                info!("Running in periodic mode with {}s interval", interval.0.as_secs());
                loop {
                    info!("Starting fetch cycle");
                    match manager.ingest(category.as_deref()).await {
                        Ok(count) => info!("Fetch cycle stored {} articles", count),
                        Err(e) => eprintln!("Error during fetch: {}", e),
                    }
                    info!("Waiting {}s before next fetch", interval.0.as_secs());
                    tokio::time::sleep(interval.0).await;
                }
            } else {
                let count = manager.ingest(category.as_deref()).await?;
                info!("Stored {} articles", count);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration_parsing() {
        assert_eq!("90".parse::<HumanDuration>().unwrap().0.as_secs(), 90);
        assert_eq!("2m".parse::<HumanDuration>().unwrap().0.as_secs(), 120);
        assert_eq!("1h15m30s".parse::<HumanDuration>().unwrap().0.as_secs(), 4530);
        assert!("fast".parse::<HumanDuration>().is_err());
        assert!("".parse::<HumanDuration>().is_err());
    }
}
