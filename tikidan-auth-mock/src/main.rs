//! Mock HR backend binary
//!
//! Serves the mock API for local development of the dashboard shell.

use std::sync::Arc;
use tikidan_auth_mock::{router, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,tikidan_auth_mock=debug"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000);

    let state = Arc::new(AppState::default());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("mock HR backend listening on port {}", port);
    axum::serve(listener, app).await
}
