pub mod client;
pub mod ingest;

pub use client::ProviderClient;
pub use ingest::IngestManager;
