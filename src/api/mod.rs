//! HTTP API
//!
//! ## Endpoints
//! - `GET /v1/serverproperties` - filtered, sorted list of properties
//! - `GET /v1/serverproperties/{key}` - one property by exact name
//! - `GET /v1/serverproperties/meta` - constants for interpreting records
//!
//! Query parameters: `contains`, `types`, `upcoming`, `sort`, `lang`.
//! Without `lang`, the best `Accept-Language` entry selects the translation.

pub mod error;
pub mod handlers;
pub mod negotiate;

use axum::{middleware, routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::core::properties::PropertyService;

pub use error::{ApiError, Problem};

/// Base path of the API.
pub const BASE_PATH: &str = "/v1/serverproperties";

/// Shared state of the handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: PropertyService,
}

impl AppState {
    pub fn new(service: PropertyService) -> Self {
        Self { service }
    }
}

/// Builds the API router. `gzip` enables response compression.
pub fn router(state: AppState, gzip: bool) -> Router {
    let router = Router::new()
        .route(
            BASE_PATH,
            get(handlers::list_properties).fallback(handlers::method_not_allowed),
        )
        .route(
            &format!("{BASE_PATH}/meta"),
            get(handlers::metadata).fallback(handlers::method_not_allowed),
        )
        .route(
            &format!("{BASE_PATH}/:key"),
            get(handlers::get_property).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(negotiate::require_acceptable))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if gzip {
        router.layer(CompressionLayer::new())
    } else {
        router
    }
}
