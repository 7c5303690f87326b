//! HTTP endpoint exposing the response router
//!
//! A single `POST /chat` route accepts `{"message": "..."}` and answers with
//! the response envelope as JSON. Malformed requests get a 400 JSON error and
//! handler panics a 500 JSON error; no other failure reaches the client.

mod error;
mod handlers;

pub use error::ServerError;
pub use handlers::ChatRequest;

use axum::Router;
use axum::routing::post;
use medibot_application::ResponseRouter;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// State shared by every request
#[derive(Clone)]
struct ServerState {
    router: Arc<ResponseRouter>,
}

/// axum server for the chat endpoint
pub struct ChatServer {
    router: Arc<ResponseRouter>,
}

impl ChatServer {
    pub fn new(router: Arc<ResponseRouter>) -> Self {
        Self { router }
    }

    /// The routed application with all middleware applied
    pub fn app(&self) -> Router {
        Router::new()
            .route("/chat", post(handlers::handle_chat))
            .layer(CatchPanicLayer::custom(handlers::handle_panic))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(ServerState {
                router: self.router.clone(),
            })
    }

    /// Bind `addr` and serve until `shutdown` is cancelled
    pub async fn run(self, addr: &str, shutdown: CancellationToken) -> Result<(), ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` is cancelled
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: CancellationToken,
    ) -> Result<(), ServerError> {
        info!(
            "Listening on http://{} (provider: {})",
            listener.local_addr()?,
            self.router.provider_name()
        );

        axum::serve(listener, self.app())
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        info!("Server stopped");
        Ok(())
    }
}
