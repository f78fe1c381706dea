use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::handlers;
use crate::upstream::{gemini::GeminiClient, telegram::TelegramClient};

/// Axum application state. Shared, read-only; requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gemini: Arc<GeminiClient>,
    pub telegram: Arc<TelegramClient>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            gemini: Arc::new(GeminiClient::new()),
            telegram: Arc::new(TelegramClient::new()),
        }
    }
}

/// Permissive CORS: any origin, the supported verbs, and `Content-Type`.
/// The layer answers real preflights with 200 and no body.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Bare `OPTIONS` requests (no preflight headers) bypass the CORS layer's
/// short-circuit, so the routes answer them explicitly. The allow-origin
/// header is appended by the layer on the way out.
async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Build the application router. Free function so integration tests can
/// drive it directly without binding a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/generate-text",
            post(handlers::text::generate_text)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/generate-images",
            post(handlers::images::generate_images)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/send-message",
            post(handlers::contact::send_message)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/test",
            get(handlers::health::health_check)
                .post(handlers::health::health_check)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

/// Running server instance. Dropping the handle does not stop the accept
/// loop; call [`ApiServer::stop`].
pub struct ApiServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    /// Bind the configured address and start serving.
    pub async fn start(
        config: AppConfig,
    ) -> anyhow::Result<(Self, tokio::task::JoinHandle<()>)> {
        let addr = format!("{}:{}", config.host, config.port);
        let app = router(AppState::new(config));

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind address {}", addr))?;

        info!("Portfolio API listening on http://{}", addr);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            use hyper::server::conn::http1;
            use hyper_util::rt::TokioIo;
            use hyper_util::service::TowerToHyperService;

            loop {
                tokio::select! {
                    res = listener.accept() => {
                        match res {
                            Ok((stream, _)) => {
                                let io = TokioIo::new(stream);
                                let service = TowerToHyperService::new(app.clone());

                                tokio::task::spawn(async move {
                                    if let Err(err) = http1::Builder::new()
                                        .serve_connection(io, service)
                                        .await
                                    {
                                        debug!("Connection handling finished or errored: {:?}", err);
                                    }
                                });
                            }
                            Err(e) => {
                                error!("Failed to accept connection: {:?}", e);
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        info!("Server stopped listening");
                        break;
                    }
                }
            }
        });

        Ok((Self { shutdown_tx: Some(shutdown_tx) }, handle))
    }

    /// Stop accepting connections.
    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
