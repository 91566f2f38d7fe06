use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers;
use crate::middleware::error_envelope;
use crate::services::DemoStore;

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn DemoStore>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn DemoStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Versioned API
        .nest("/v1", v1_routes())
        .fallback(handlers::fallback)
        .layer(middleware::from_fn_with_state(state.clone(), error_envelope));

    if let Some(cors) = cors_layer(&state.config.security) {
        router = router.layer(cors);
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn v1_routes() -> Router<AppState> {
    use handlers::demo;

    Router::new()
        .route("/demo", get(demo::demo_list).post(demo::demo_create))
        .route(
            "/demo/:id",
            get(demo::demo_show)
                .put(demo::demo_update)
                .delete(demo::demo_delete),
        )
}

fn cors_layer(security: &SecurityConfig) -> Option<CorsLayer> {
    if !security.enable_cors {
        return None;
    }
    if security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
