// # contacts-api
//
// Stateless HTTP layer over a ContactStore.
//
// ## Routes
//
// Mounted under the configured prefix (default `/api`):
//
// | Method | Path              | Store operation | Success              |
// |--------|-------------------|-----------------|----------------------|
// | GET    | `/contacts?q=..`  | list            | 200, array           |
// | POST   | `/contacts`       | insert          | 201, created record  |
// | PUT    | `/contacts/{id}`  | update + get    | 200, record or null  |
// | DELETE | `/contacts/{id}`  | delete          | 200, `{success:true}`|
//
// Every failure is `400 {"error": "<message>"}` with the store's message
// passed through unchanged.
//
// ## Architecture
//
// One store call per request (plus the re-fetch after update). No state is
// kept between requests; the store is shared through `AppState`.

pub mod cors;
pub mod dto;
pub mod error;
pub mod handlers;

use axum::Router;
use axum::routing::get;
use contacts_core::ContactStore;
use contacts_core::config::ServerConfig;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// Backing contact store
    pub store: Arc<dyn ContactStore>,
}

impl AppState {
    /// Create handler state over a store
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }
}

/// Routes relative to the API prefix
fn contact_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contacts",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route(
            "/contacts/{id}",
            axum::routing::put(handlers::update_contact).delete(handlers::delete_contact),
        )
}

/// Build the full application router
///
/// Routes are nested under `config.api_prefix`, CORS is open and every
/// request is traced.
pub fn router(store: Arc<dyn ContactStore>, config: &ServerConfig) -> Router {
    Router::new()
        .nest(&config.api_prefix, contact_routes())
        .layer(cors::build_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(store))
}

/// Serve `app` on `listener` until `shutdown` resolves
///
/// In-flight requests are allowed to finish once shutdown starts.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Contact API listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
