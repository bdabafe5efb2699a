//! Locale routing middleware.
//!
//! Runs in front of the router so rewrites are visible to route matching.
//! Excluded paths (API, non-routed sections, static files) pass straight
//! through; everything else is redirected, rewritten or continued according
//! to [`route`], and the resolved locale is attached to the request.

use crate::i18n::{is_excluded, read_cookie, route, set_locale_cookie, I18nMetrics, RouteAction};
use crate::web::AppState;
use axum::extract::{Request, State};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::http::{StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::{debug, warn};

pub async fn locale_routing(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if is_excluded(&path) {
        return next.run(request).await;
    }

    let registry = &state.registry;
    let headers = request.headers();
    let cookie = read_cookie(headers, registry.cookie_name()).map(str::to_string);
    let accept_language = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let outcome = route(
        &path,
        request.uri().query(),
        cookie.as_deref(),
        accept_language.as_deref(),
        registry,
    );
    I18nMetrics::global().record_resolution(outcome.locale.provenance);

    let locale = outcome.locale;
    let mut response = match outcome.action {
        RouteAction::Redirect(target) => {
            debug!("Redirecting {} to {} ({})", path, target, locale.provenance);
            Redirect::temporary(&target).into_response()
        }
        RouteAction::Rewrite(target) => match target.parse::<Uri>() {
            Ok(uri) => {
                debug!("Rewriting {} to {}", path, uri);
                *request.uri_mut() = uri;
                request.extensions_mut().insert(locale.clone());
                next.run(request).await
            }
            Err(e) => {
                warn!("Cannot rewrite {} to {}: {}", path, target, e);
                return StatusCode::BAD_REQUEST.into_response();
            }
        },
        RouteAction::Continue => {
            request.extensions_mut().insert(locale.clone());
            next.run(request).await
        }
    };

    // Keep the cookie in step with what the URL or header resolved to
    if cookie.as_deref().map(str::trim) != Some(locale.locale.as_str()) {
        set_locale_cookie(response.headers_mut(), registry, &locale.locale);
    }

    response
}
