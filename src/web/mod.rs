//! HTTP layer: application state, router assembly and handlers.

pub mod api;
pub mod error;
pub mod html;
pub mod middleware;
pub mod pages;

use crate::config::Config;
use crate::i18n::{LocaleRegistry, MessageLoader};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use middleware::locale_routing;

/// Shared, read-only application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<LocaleRegistry>,
    pub loader: Arc<MessageLoader>,
}

impl AppState {
    pub fn new(config: Config, registry: LocaleRegistry, loader: MessageLoader) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            loader: Arc::new(loader),
        }
    }
}

/// Build the application router.
///
/// The locale middleware wraps the whole route table rather than being
/// layered onto it, so a rewritten URI is matched against the routes.
pub fn build_app(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(api::health))
        .route("/api/locale", post(api::set_locale))
        .route("/api/theme", post(api::set_theme))
        .route("/api/i18n/metrics", get(api::metrics))
        .route("/dashboard", get(pages::dashboard))
        .route("/dashboard/analytics", get(pages::analytics))
        .route("/admin", get(pages::admin))
        .route("/:locale", get(pages::home))
        .route("/:locale/about", get(pages::about))
        .route("/:locale/contact", get(pages::contact).post(pages::submit_contact))
        .fallback(api::not_found)
        .with_state(state.clone());

    Router::new()
        .fallback_service(routes)
        .layer(axum::middleware::from_fn_with_state(state, locale_routing))
        .layer(TraceLayer::new_for_http())
}
