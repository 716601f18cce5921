use crate::auth::require_auth;
use crate::core::{Config, ServerState};
use axum::{Router, middleware};
use parking_lot::RwLock;
use shared::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Service;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;

pub type OneshotResult =
    Result<http::Response<axum::body::Body>, Box<dyn std::error::Error + Send + Sync>>;

/// Access log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = std::time::Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        "{} {} {} {}ms",
        method,
        uri,
        response.status(),
        started.elapsed().as_millis()
    );

    response
}

/// Requests running longer than `ms` are answered with 408
fn request_timeout(ms: u64) -> TimeoutLayer {
    TimeoutLayer::with_status_code(http::StatusCode::REQUEST_TIMEOUT, Duration::from_millis(ms))
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        // Core
        .merge(crate::api::health::router())
        .merge(crate::api::auth::router())
        .merge(crate::api::upload::router())
        // Public flows
        .merge(crate::api::registration::router())
        .merge(crate::api::verification::router())
        // Staff
        .merge(crate::api::usage_logs::router())
        .merge(crate::api::dashboard::router())
        .merge(crate::api::members::router())
        .merge(crate::api::clubs::router())
        .merge(crate::api::partners::router())
}

#[derive(Clone, Debug)]
pub struct HttpsService {
    config: Config,
    router: Arc<RwLock<Option<Router>>>,
}

impl HttpsService {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            router: Arc::new(RwLock::new(None)),
        }
    }

    /// Bind the router to a fully built state
    pub fn initialize(&self, state: ServerState) {
        let app = build_app()
            // require_auth lets public routes through on its own
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state)
            .layer(request_timeout(self.config.request_timeout_ms))
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new())
            .layer(middleware::from_fn(log_request));

        *self.router.write() = Some(app);
    }

    pub fn router(&self) -> Option<Router> {
        self.router.read().clone()
    }

    /// Run one request through the router without a listener
    pub async fn oneshot(&self, request: http::Request<axum::body::Body>) -> OneshotResult {
        let Some(mut service) = self.router() else {
            return Err(AppError::internal("HttpsService not initialized").into());
        };
        match service.call(request).await {
            Ok(response) => Ok(response),
            Err(_) => Err(AppError::internal("Oneshot call failed").into()),
        }
    }

    pub async fn start_server<F>(&self, shutdown_signal: F) -> Result<(), AppError>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let app = self
            .router()
            .ok_or_else(|| AppError::internal("HttpsService not initialized with router"))?;

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Starting HTTP server on {}", addr);

        let handle = axum_server::Handle::new();
        let grace = Duration::from_millis(self.config.shutdown_timeout_ms);

        let handle_clone = handle.clone();
        tokio::spawn(async move {
            shutdown_signal.await;
            tracing::info!("Shutdown signal received, draining connections");
            handle_clone.graceful_shutdown(Some(grace));
        });

        axum_server::bind(addr)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}
