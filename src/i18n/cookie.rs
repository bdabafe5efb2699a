//! Locale cookie persistence.
//!
//! The same cookie is read by the routed middleware and by non-routed pages,
//! so a locale chosen anywhere sticks everywhere. Writes go to the response
//! header map; there is no other state.

use crate::i18n::metrics::I18nMetrics;
use crate::i18n::registry::LocaleRegistry;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use tracing::{debug, warn};

/// Cookie lifetime: 30 days.
pub const COOKIE_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 30;

/// `Set-Cookie` value with the attributes shared by all preference cookies.
pub fn preference_cookie(name: &str, value: &str) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        name, value, COOKIE_MAX_AGE_SECS
    )
}

/// Append a preference cookie to `headers`.
///
/// Returns `false` if the value cannot be encoded as a header.
pub fn append_preference_cookie(headers: &mut HeaderMap, name: &str, value: &str) -> bool {
    match HeaderValue::from_str(&preference_cookie(name, value)) {
        Ok(header) => {
            headers.append(SET_COOKIE, header);
            true
        }
        Err(e) => {
            warn!("Refusing to write cookie {}: {}", name, e);
            false
        }
    }
}

/// Persist the user's locale choice.
///
/// Unsupported locales are ignored with a warning; nothing is written.
pub fn set_locale_cookie(headers: &mut HeaderMap, registry: &LocaleRegistry, locale: &str) {
    let metrics = I18nMetrics::global();

    let Some(locale) = registry.get(locale) else {
        warn!("Ignoring locale cookie write for unsupported locale '{}'", locale);
        metrics.record_cookie_rejection();
        return;
    };

    if append_preference_cookie(headers, registry.cookie_name(), locale) {
        debug!("Set {} cookie to {}", registry.cookie_name(), locale);
        metrics.record_cookie_write();
    }
}

/// Value of cookie `name` from the request's `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"'))
}
