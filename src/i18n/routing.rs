//! Routed-locale resolution: locale-prefixed URLs and the prefix policy.
//!
//! [`route`] is a pure function. It runs the shared detector with the first
//! path segment as the path candidate, then decides whether the request can
//! continue as-is, must be redirected to its canonical URL, or should be
//! rewritten internally to the `/{locale}/...` route tree.

use crate::i18n::detector::{resolve, LocaleSignals};
use crate::i18n::locale::{Provenance, ResolvedLocale};
use crate::i18n::registry::{LocaleRegistry, PrefixPolicy};

/// Top-level path segments the locale router never touches.
pub const EXCLUDED_PREFIXES: &[&str] = &[
    "api", "trpc", "_next", "_vercel", "dashboard", "admin", "health",
];

/// What the router should do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// The URL already carries its canonical locale prefix.
    Continue,
    /// Send the client to this path (query string included).
    Redirect(String),
    /// Serve this internal path without changing the visible URL.
    Rewrite(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOutcome {
    pub locale: ResolvedLocale,
    pub action: RouteAction,
}

/// Whether `path` bypasses locale routing (API routes, non-routed sections,
/// and anything that looks like a static file).
pub fn is_excluded(path: &str) -> bool {
    let trimmed = path.trim_start_matches('/');
    let first = trimmed.split('/').next().unwrap_or("");
    if EXCLUDED_PREFIXES.contains(&first) {
        return true;
    }

    trimmed
        .rsplit('/')
        .next()
        .is_some_and(|last| last.contains('.'))
}

/// First path segment (`"/ar-AE/about"` → `"ar-AE"`); empty for `/`.
pub fn first_segment(path: &str) -> &str {
    path.trim_start_matches('/').split('/').next().unwrap_or("")
}

/// Path with its first segment removed (`"/ar-AE/about"` → `"/about"`,
/// `"/ar-AE"` → `"/"`).
pub fn strip_first_segment(path: &str) -> &str {
    let trimmed = path.trim_start_matches('/');
    match trimmed.find('/') {
        Some(idx) => &trimmed[idx..],
        None => "/",
    }
}

/// `/{locale}{path}`, without a trailing slash for the root.
pub fn localized_path(locale: &str, path: &str) -> String {
    if path.is_empty() || path == "/" {
        format!("/{}", locale)
    } else if path.starts_with('/') {
        format!("/{}{}", locale, path)
    } else {
        format!("/{}/{}", locale, path)
    }
}

/// Public URL for `path` in `locale` under the registry's prefix policy.
///
/// Used for links and post-switch redirects so they land on the canonical
/// URL without an extra redirect hop.
pub fn public_path(registry: &LocaleRegistry, locale: &str, path: &str) -> String {
    let path = if path.is_empty() { "/" } else { path };
    match registry.prefix_policy() {
        PrefixPolicy::Always => localized_path(locale, path),
        PrefixPolicy::AsNeeded if registry.is_default(locale) => path.to_string(),
        PrefixPolicy::AsNeeded => localized_path(locale, path),
        PrefixPolicy::Never => path.to_string(),
    }
}

fn with_query(path: String, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{}?{}", path, q),
        _ => path,
    }
}

/// Decide how to serve `path` under the registry's prefix policy.
pub fn route(
    path: &str,
    query: Option<&str>,
    cookie: Option<&str>,
    accept_language: Option<&str>,
    registry: &LocaleRegistry,
) -> RouteOutcome {
    let segment = first_segment(path);
    let signals = LocaleSignals::unrouted(cookie, accept_language)
        .with_path_segment(Some(segment).filter(|s| !s.is_empty()));
    let locale = resolve(&signals, registry);
    let is_default = registry.is_default(&locale.locale);

    let action = if locale.provenance == Provenance::PathSegment {
        let unprefixed = strip_first_segment(path).to_string();
        match registry.prefix_policy() {
            PrefixPolicy::Always => RouteAction::Continue,
            PrefixPolicy::AsNeeded if is_default => {
                RouteAction::Redirect(with_query(unprefixed, query))
            }
            PrefixPolicy::AsNeeded => RouteAction::Continue,
            PrefixPolicy::Never => RouteAction::Redirect(with_query(unprefixed, query)),
        }
    } else {
        let prefixed = with_query(localized_path(&locale.locale, path), query);
        match registry.prefix_policy() {
            PrefixPolicy::Always => RouteAction::Redirect(prefixed),
            PrefixPolicy::AsNeeded if is_default => RouteAction::Rewrite(prefixed),
            PrefixPolicy::AsNeeded => RouteAction::Redirect(prefixed),
            PrefixPolicy::Never => RouteAction::Rewrite(prefixed),
        }
    };

    RouteOutcome { locale, action }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(policy: PrefixPolicy) -> LocaleRegistry {
        LocaleRegistry::demo().with_prefix_policy(policy)
    }

    fn action(path: &str, cookie: Option<&str>, policy: PrefixPolicy) -> RouteAction {
        route(path, None, cookie, None, &registry(policy)).action
    }

    // ==================== Path Helper Tests ====================

    #[test]
    fn test_first_segment() {
        assert_eq!(first_segment("/ar-AE/about"), "ar-AE");
        assert_eq!(first_segment("/ar-AE"), "ar-AE");
        assert_eq!(first_segment("/"), "");
        assert_eq!(first_segment(""), "");
    }

    #[test]
    fn test_strip_first_segment() {
        assert_eq!(strip_first_segment("/ar-AE/about"), "/about");
        assert_eq!(strip_first_segment("/ar-AE/a/b"), "/a/b");
        assert_eq!(strip_first_segment("/ar-AE"), "/");
        assert_eq!(strip_first_segment("/ar-AE/"), "/");
    }

    #[test]
    fn test_localized_path() {
        assert_eq!(localized_path("en-US", "/"), "/en-US");
        assert_eq!(localized_path("en-US", ""), "/en-US");
        assert_eq!(localized_path("ar-AE", "/contact"), "/ar-AE/contact");
    }

    #[test]
    fn test_excluded_paths() {
        assert!(is_excluded("/api/locale"));
        assert!(is_excluded("/dashboard"));
        assert!(is_excluded("/dashboard/analytics"));
        assert!(is_excluded("/admin"));
        assert!(is_excluded("/favicon.ico"));
        assert!(is_excluded("/images/logo.svg"));
        assert!(!is_excluded("/"));
        assert!(!is_excluded("/about"));
        assert!(!is_excluded("/ar-AE/contact"));
        assert!(!is_excluded("/administrator"));
    }

    #[test]
    fn test_excluded_prefixes_are_segment_bounded() {
        assert!(is_excluded("/trpc/user.get"));
        assert!(is_excluded("/_vercel/insights"));
        assert!(is_excluded("/_next/static/chunk"));
        assert!(is_excluded("/health"));
        assert!(!is_excluded("/apiary"));
        assert!(!is_excluded("/v1.2/about"));
    }

    #[test]
    fn test_public_path() {
        let as_needed = registry(PrefixPolicy::AsNeeded);
        assert_eq!(public_path(&as_needed, "en-US", "/about"), "/about");
        assert_eq!(public_path(&as_needed, "ar-AE", "/about"), "/ar-AE/about");
        assert_eq!(public_path(&as_needed, "ar-AE", "/"), "/ar-AE");
        assert_eq!(public_path(&as_needed, "en-US", ""), "/");

        let always = registry(PrefixPolicy::Always);
        assert_eq!(public_path(&always, "en-US", "/"), "/en-US");

        let never = registry(PrefixPolicy::Never);
        assert_eq!(public_path(&never, "ar-AE", "/contact"), "/contact");
    }

    // ==================== As-Needed Policy Tests ====================

    #[test]
    fn test_as_needed_default_prefix_redirects_to_unprefixed() {
        assert_eq!(
            action("/en-US/about", None, PrefixPolicy::AsNeeded),
            RouteAction::Redirect("/about".to_string())
        );
        assert_eq!(
            action("/en-US", None, PrefixPolicy::AsNeeded),
            RouteAction::Redirect("/".to_string())
        );
    }

    #[test]
    fn test_as_needed_non_default_prefix_continues() {
        let outcome = route("/ar-AE/about", None, None, None, &registry(PrefixPolicy::AsNeeded));
        assert_eq!(outcome.action, RouteAction::Continue);
        assert_eq!(outcome.locale.locale, "ar-AE");
        assert_eq!(outcome.locale.provenance, Provenance::PathSegment);
    }

    #[test]
    fn test_as_needed_unprefixed_default_rewrites() {
        assert_eq!(
            action("/about", None, PrefixPolicy::AsNeeded),
            RouteAction::Rewrite("/en-US/about".to_string())
        );
        assert_eq!(
            action("/", None, PrefixPolicy::AsNeeded),
            RouteAction::Rewrite("/en-US".to_string())
        );
    }

    #[test]
    fn test_as_needed_unprefixed_cookie_locale_redirects() {
        assert_eq!(
            action("/about", Some("ar-AE"), PrefixPolicy::AsNeeded),
            RouteAction::Redirect("/ar-AE/about".to_string())
        );
    }

    #[test]
    fn test_header_locale_redirects() {
        let outcome = route(
            "/contact",
            None,
            None,
            Some("ar-AE,ar;q=0.9"),
            &registry(PrefixPolicy::AsNeeded),
        );
        assert_eq!(outcome.locale.provenance, Provenance::Header);
        assert_eq!(outcome.action, RouteAction::Redirect("/ar-AE/contact".to_string()));
    }

    #[test]
    fn test_path_segment_beats_cookie() {
        let outcome = route(
            "/ar-AE/about",
            None,
            Some("en-US"),
            None,
            &registry(PrefixPolicy::AsNeeded),
        );
        assert_eq!(outcome.locale.locale, "ar-AE");
        assert_eq!(outcome.action, RouteAction::Continue);
    }

    #[test]
    fn test_unknown_segment_is_prefixed() {
        assert_eq!(
            action("/fr-FR/about", None, PrefixPolicy::AsNeeded),
            RouteAction::Rewrite("/en-US/fr-FR/about".to_string())
        );
    }

    #[test]
    fn test_query_string_preserved() {
        let outcome = route(
            "/en-US/contact",
            Some("success=true"),
            None,
            None,
            &registry(PrefixPolicy::AsNeeded),
        );
        assert_eq!(
            outcome.action,
            RouteAction::Redirect("/contact?success=true".to_string())
        );

        let outcome = route("/contact", Some("a=1"), None, None, &registry(PrefixPolicy::AsNeeded));
        assert_eq!(outcome.action, RouteAction::Rewrite("/en-US/contact?a=1".to_string()));
    }

    // ==================== Always Policy Tests ====================

    #[test]
    fn test_always_prefixed_continues() {
        assert_eq!(
            action("/en-US/about", None, PrefixPolicy::Always),
            RouteAction::Continue
        );
    }

    #[test]
    fn test_always_unprefixed_redirects() {
        assert_eq!(
            action("/about", None, PrefixPolicy::Always),
            RouteAction::Redirect("/en-US/about".to_string())
        );
        assert_eq!(
            action("/", Some("ar-AE"), PrefixPolicy::Always),
            RouteAction::Redirect("/ar-AE".to_string())
        );
    }

    // ==================== Never Policy Tests ====================

    #[test]
    fn test_never_prefixed_redirects_to_unprefixed() {
        let outcome = route("/ar-AE/about", None, None, None, &registry(PrefixPolicy::Never));
        assert_eq!(outcome.locale.locale, "ar-AE");
        assert_eq!(outcome.action, RouteAction::Redirect("/about".to_string()));
    }

    #[test]
    fn test_never_unprefixed_rewrites_with_cookie_locale() {
        assert_eq!(
            action("/about", Some("ar-AE"), PrefixPolicy::Never),
            RouteAction::Rewrite("/ar-AE/about".to_string())
        );
    }
}
