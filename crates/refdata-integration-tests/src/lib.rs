//! Harness for the end-to-end tests: a `refdata-stub` server on an ephemeral
//! port, shut down when the handle is dropped.

use refdata_client::{ClientConfig, RefDataClient};
use refdata_stub::AppState;
use tokio::sync::oneshot;

/// A running stub server.
pub struct StubServer {
    port: u16,
    state: AppState,
    shutdown: Option<oneshot::Sender<()>>,
}

impl StubServer {
    /// Bind `127.0.0.1:0` and serve the stub router on it.
    ///
    /// The listener is bound before this returns, so requests issued right
    /// away are queued rather than refused.
    pub async fn start() -> std::io::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        let state = AppState::new();
        let app = refdata_stub::routes::router(state.clone());

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app.into_make_service())
                .with_graceful_shutdown(async {
                    rx.await.ok();
                })
                .await
                .ok();
        });

        Ok(Self {
            port,
            state,
            shutdown: Some(tx),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Direct access to the server's store, for seeding.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn api_url(&self) -> String {
        format!("http://127.0.0.1:{}/api/", self.port)
    }

    /// A client pointed at this server.
    pub fn client(&self) -> Result<RefDataClient, refdata_client::ClientError> {
        RefDataClient::new(ClientConfig::local(self.port)?)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
    }
}
