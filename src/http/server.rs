//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, CORS, panics)
//! - Bind server to listener and serve until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::handlers::{health_check, process_data};
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::http::response::handle_panic;
use crate::observability::metrics;
use crate::processing::{Transform, UppercaseTransform};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub transform: Arc<dyn Transform>,
    pub max_input_chars: usize,
}

/// HTTP server for the processing API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a server using the uppercase transform from `config`.
    pub fn new(config: ServiceConfig) -> Self {
        let transform = Arc::new(UppercaseTransform::new(config.processing.max_output_chars));
        Self::with_transform(config, transform)
    }

    /// Create a server with a caller-supplied transform.
    pub fn with_transform(config: ServiceConfig, transform: Arc<dyn Transform>) -> Self {
        let state = AppState {
            transform,
            max_input_chars: config.limits.max_input_chars,
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let api = Router::new()
            .route("/process", post(process_data))
            .route("/health", get(health_check));
        let api = instrument(api).with_state(state);

        let mut router = Router::new()
            .nest("/api", api)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        if let Some(cors) = cors_layer(&config.cors.allowed_origin) {
            router = router.layer(cors);
        }

        router
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

/// Per-route panic backstop wrapped by request metrics, so 500s produced
/// from a caught panic are still counted.
fn instrument<S>(routes: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    routes
        .route_layer(CatchPanicLayer::custom(handle_panic))
        .route_layer(middleware::from_fn(metrics::track_requests))
}

/// CORS policy admitting exactly one origin. `None` when no origin is set.
fn cors_layer(origin: &str) -> Option<CorsLayer> {
    if origin.is_empty() {
        return None;
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => Some(
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(value))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        ),
        Err(e) => {
            tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
            None
        }
    }
}
