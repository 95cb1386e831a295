use tower_http::cors::{Any, CorsLayer};

/// Build the CORS layer
///
/// The API has no authentication, so any origin, method and header is
/// allowed. Credentials are never allowed alongside the wildcard origin.
pub fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
