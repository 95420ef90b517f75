//! Application startup and lifecycle management.

use crate::config::RelayConfig;
use crate::handlers::{
    generate::generate_handler,
    health::{health_check, readiness_check},
    metrics::metrics,
};
use crate::services::providers::gemini::GeminiProvider;
use crate::services::providers::GenerationProvider;
use crate::services::RelaySettings;
use axum::{
    http::{header, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use secrecy::Secret;
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn GenerationProvider>,
    pub api_key: Option<Secret<String>>,
    pub settings: RelaySettings,
}

/// Build the HTTP router.
///
/// When `static_dir` is set, unmatched paths are served from it with
/// `index.html` as the single-page fallback.
pub fn build_router(state: AppState, static_dir: Option<&str>) -> Router {
    let router = Router::new()
        .route("/api/generate", post(generate_handler))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => {
            let index = Path::new(dir).join("index.html");
            router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        None => router,
    };

    router
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri().path(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let provider: Arc<dyn GenerationProvider> =
            Arc::new(GeminiProvider::new(config.upstream.base_url.clone()));

        let settings = config.relay_settings();
        tracing::info!(
            base_url = %config.upstream.base_url,
            text_model = %settings.text_model,
            image_model = ?settings.image_model,
            "Initialized generation provider"
        );

        let state = AppState {
            provider,
            api_key: config.upstream.api_key.clone(),
            settings,
        };

        Self::with_state(state, &config).await
    }

    /// Build the application around an existing state (e.g., a mock provider).
    pub async fn with_state(state: AppState, config: &RelayConfig) -> Result<Self, AppError> {
        let router = build_router(state, config.common.static_dir.as_deref());

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("creamlab-relay listening on port {}", port);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
