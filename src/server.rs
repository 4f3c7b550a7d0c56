//! HTTP file server for the package folder.

use crate::config::Config;
use crate::error::Result;
use axum::Router;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

/// Build the router serving every file below `folder`.
pub fn router(folder: &Path) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(folder))
        .layer(TraceLayer::new_for_http())
}

/// Bind to the configured address and serve until the server fails.
pub async fn serve(config: &Config) -> Result<()> {
    let listener = TcpListener::bind(&config.listen).await?;
    info!(
        "Serving {} on http://{}",
        config.folder.display(),
        listener.local_addr()?
    );

    axum::serve(listener, router(&config.folder)).await?;

    Ok(())
}
