//! # refdata-stub: In-Memory RefData Backend
//!
//! Serves the `/api` routes that `refdata-client` calls, backed by DashMaps.
//! Data is lost on restart. Used for local development and by the
//! end-to-end tests, which bind it to an ephemeral port.

pub mod config;
pub mod error;
pub mod jobs;
pub mod routes;
pub mod store;

pub use config::{LogFormat, StubConfig};
pub use error::ApiError;
pub use store::AppState;

/// Serve the stub on an already-bound listener until the task is dropped.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, routes::router(state).into_make_service()).await
}
