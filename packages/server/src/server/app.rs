//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::middleware::require_auth;
use crate::server::routes::{
    create_note_handler, delete_note_handler, health_handler, login_handler, my_notes_handler,
    send_otp_handler, verify_otp_handler,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

impl AppState {
    pub fn new(deps: ServerDeps) -> Self {
        Self {
            deps: Arc::new(deps),
        }
    }
}

/// CORS policy. An empty origin list allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the Axum application router
///
/// Auth endpoints and the health check are public. Everything under `/notes`
/// goes through `require_auth` first.
pub fn build_app(deps: ServerDeps, allowed_origins: &[String]) -> Router {
    let state = AppState::new(deps);

    let protected = Router::new()
        .route("/notes/me", get(my_notes_handler))
        .route("/notes", post(create_note_handler))
        .route("/notes/:id", delete(delete_note_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health_handler))
        .route("/send-otp", post(send_otp_handler))
        .route("/verify-otp", post(verify_otp_handler))
        .route("/login", post(login_handler))
        .merge(protected)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
