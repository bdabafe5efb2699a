//! Locale detection shared by the routed and non-routed resolvers.
//!
//! Priority order (first valid signal wins):
//! 1. Locale segment from the URL path (routed pages only)
//! 2. The locale cookie
//! 3. The `Accept-Language` header
//! 4. The registry default
//!
//! Header matching is deliberately simple: for each supported locale in
//! registry order, the primary language subtag (text before the first `-`) is
//! searched for anywhere in the raw header. Quality weights and header order
//! are ignored, so ties go to registry order.

use crate::i18n::locale::{Provenance, ResolvedLocale};
use crate::i18n::registry::LocaleRegistry;

/// Inputs available to the detector for one request.
///
/// Callers pass the current cookie and header values explicitly; the
/// detector never reads ambient state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocaleSignals<'a> {
    pub path_segment: Option<&'a str>,
    pub cookie: Option<&'a str>,
    pub accept_language: Option<&'a str>,
}

impl<'a> LocaleSignals<'a> {
    /// Signals for a page outside the locale-prefixed route tree.
    pub fn unrouted(cookie: Option<&'a str>, accept_language: Option<&'a str>) -> Self {
        Self {
            path_segment: None,
            cookie,
            accept_language,
        }
    }

    pub fn with_path_segment(mut self, segment: Option<&'a str>) -> Self {
        self.path_segment = segment;
        self
    }
}

/// Resolve the effective locale.
///
/// Pure function of its inputs. Unsupported path or cookie values are
/// treated as absent and never produce an error.
pub fn resolve(signals: &LocaleSignals<'_>, registry: &LocaleRegistry) -> ResolvedLocale {
    let (locale, provenance) = detect(signals, registry);

    ResolvedLocale {
        locale: locale.to_string(),
        direction: registry.direction(locale),
        provenance,
    }
}

fn detect<'r>(signals: &LocaleSignals<'_>, registry: &'r LocaleRegistry) -> (&'r str, Provenance) {
    if let Some(locale) = signals.path_segment.and_then(|s| registry.get(s)) {
        return (locale, Provenance::PathSegment);
    }

    if let Some(locale) = signals.cookie.and_then(|c| registry.get(c.trim())) {
        return (locale, Provenance::Cookie);
    }

    if let Some(locale) = signals
        .accept_language
        .and_then(|header| match_accept_language(header, registry))
    {
        return (locale, Provenance::Header);
    }

    (registry.default_locale(), Provenance::Default)
}

/// First supported locale whose primary subtag occurs in the header.
pub fn match_accept_language<'r>(header: &str, registry: &'r LocaleRegistry) -> Option<&'r str> {
    let header = header.trim();
    if header.is_empty() {
        return None;
    }

    registry
        .locales()
        .iter()
        .map(String::as_str)
        .find(|locale| {
            let subtag = primary_subtag(locale);
            !subtag.is_empty() && header.contains(subtag)
        })
}

/// The portion of a locale identifier before the first hyphen.
pub fn primary_subtag(locale: &str) -> &str {
    locale.split('-').next().unwrap_or(locale)
}
