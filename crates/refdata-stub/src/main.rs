//! RefData backend stub: standalone development server.
//!
//! Storage is in-memory with no persistence; data is lost on restart.

use std::net::SocketAddr;

use anyhow::Context;
use refdata_stub::{AppState, LogFormat, StubConfig};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StubConfig::from_env();
    init_tracing(config.log_format);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("refdata-stub listening on {addr}");

    refdata_stub::serve(listener, AppState::new())
        .await
        .context("server error")
}
