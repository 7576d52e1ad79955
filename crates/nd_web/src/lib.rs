use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use nd_core::Result;
use tracing::info;

pub mod handlers;
pub mod state;

pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/articles", get(handlers::list_articles))
        .route("/article/:id", get(handlers::get_article))
        .route("/article/:id/related", get(handlers::get_related_articles))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .map_err(|e| nd_core::Error::Io(e))?;
    Ok(())
}

pub mod prelude {
    pub use crate::AppState;
    pub use nd_core::{Article, Error, Result};
}
