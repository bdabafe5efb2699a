//! Preference endpoints, health and metrics.

use crate::i18n::{
    first_segment, is_excluded, public_path, set_locale_cookie, strip_first_segment, I18nMetrics,
    LocaleRegistry, MetricsReport,
};
use crate::theme::set_theme_cookie;
use crate::web::error::AppError;
use crate::web::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LocaleForm {
    pub locale: String,
    pub redirect: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeForm {
    pub theme: String,
    pub redirect: Option<String>,
}

/// Local path to send the browser back to; anything else falls back to `/`.
fn safe_redirect(redirect: Option<&str>) -> &str {
    match redirect {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path,
        _ => "/",
    }
}

/// Where to land after switching to `locale`.
///
/// Routed paths are re-prefixed for the new locale so the next page load
/// does not bounce through another redirect.
pub fn switch_target(registry: &LocaleRegistry, locale: &str, redirect: Option<&str>) -> String {
    let mut path = safe_redirect(redirect);
    // A prefixed path would pin the old locale
    if registry.is_supported(first_segment(path)) {
        path = strip_first_segment(path);
    }

    match registry.get(locale) {
        Some(locale) if !is_excluded(path) => public_path(registry, locale, path),
        _ => path.to_string(),
    }
}

/// Persist a locale choice and redirect back.
pub async fn set_locale(State(state): State<AppState>, Form(form): Form<LocaleForm>) -> Response {
    let mut headers = HeaderMap::new();
    set_locale_cookie(&mut headers, &state.registry, &form.locale);

    let target = switch_target(&state.registry, &form.locale, form.redirect.as_deref());
    (headers, Redirect::to(&target)).into_response()
}

/// Persist a theme choice and redirect back.
pub async fn set_theme(Form(form): Form<ThemeForm>) -> Response {
    let mut headers = HeaderMap::new();
    set_theme_cookie(&mut headers, &form.theme);

    let target = safe_redirect(form.redirect.as_deref()).to_string();
    (headers, Redirect::to(&target)).into_response()
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub locales: Vec<String>,
    pub default_locale: String,
    pub prefix_policy: &'static str,
    pub cached_bundles: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        locales: state.registry.locales().to_vec(),
        default_locale: state.registry.default_locale().to_string(),
        prefix_policy: state.registry.prefix_policy().as_str(),
        cached_bundles: state.loader.cached_locales(),
    })
}

pub async fn metrics() -> Json<MetricsReport> {
    Json(I18nMetrics::global().report())
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::PrefixPolicy;

    #[test]
    fn test_safe_redirect() {
        assert_eq!(safe_redirect(Some("/about")), "/about");
        assert_eq!(safe_redirect(Some("//evil.com")), "/");
        assert_eq!(safe_redirect(Some("https://evil.com")), "/");
        assert_eq!(safe_redirect(Some("/\\evil.com")), "/");
        assert_eq!(safe_redirect(None), "/");
    }

    #[test]
    fn test_switch_target_reprefixes_routed_paths() {
        let registry = LocaleRegistry::demo();
        assert_eq!(switch_target(&registry, "ar-AE", Some("/about")), "/ar-AE/about");
        assert_eq!(switch_target(&registry, "en-US", Some("/about")), "/about");
        assert_eq!(switch_target(&registry, "ar-AE", None), "/ar-AE");
        assert_eq!(switch_target(&registry, "en-US", Some("/ar-AE/contact")), "/contact");
    }

    #[test]
    fn test_switch_target_keeps_non_routed_paths() {
        let registry = LocaleRegistry::demo();
        assert_eq!(switch_target(&registry, "ar-AE", Some("/dashboard")), "/dashboard");
        assert_eq!(
            switch_target(&registry, "ar-AE", Some("/dashboard/analytics")),
            "/dashboard/analytics"
        );
    }

    #[test]
    fn test_switch_target_unsupported_locale() {
        let registry = LocaleRegistry::demo();
        assert_eq!(switch_target(&registry, "fr-FR", Some("/about")), "/about");
    }

    #[test]
    fn test_switch_target_always_prefix() {
        let registry = LocaleRegistry::demo().with_prefix_policy(PrefixPolicy::Always);
        assert_eq!(switch_target(&registry, "en-US", Some("/contact")), "/en-US/contact");
    }
}
