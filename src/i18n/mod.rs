//! Internationalization (i18n) module.
//!
//! All locale detection, message loading and translation lookup lives here.
//! The web layer only passes request data in and renders what comes out.
//!
//! # Architecture
//!
//! - `registry`: Supported locales, default locale, cookie name, prefix policy
//! - `locale`: The resolved locale, its text direction and provenance
//! - `detector`: Shared path → cookie → header → default resolution
//! - `loader`: Message bundle sources and the per-locale cache
//! - `messages`: Message trees and dot-path lookup with fallback-to-key
//! - `cookie`: Reading and writing the locale cookie
//! - `routing`: Prefix-policy decisions for locale-prefixed URLs
//! - `global`: Locale context for pages outside the prefixed routes
//! - `validator`: Cross-locale bundle consistency checks
//! - `metrics`: Resolution and loading counters
//!
//! # Example
//!
//! ```rust,ignore
//! use locale_routing::i18n::{resolve, lookup, LocaleRegistry, LocaleSignals};
//!
//! let registry = LocaleRegistry::demo();
//! let resolved = resolve(&LocaleSignals::unrouted(Some("ar-AE"), None), &registry);
//! assert_eq!(resolved.locale, "ar-AE");
//!
//! let title = lookup(&tree, "Dashboard.title");
//! ```

mod cookie;
mod detector;
mod global;
mod loader;
mod locale;
mod messages;
mod metrics;
mod registry;
mod routing;
mod validator;

pub use cookie::{
    append_preference_cookie, preference_cookie, read_cookie, set_locale_cookie,
    COOKIE_MAX_AGE_SECS,
};
pub use detector::{match_accept_language, primary_subtag, resolve, LocaleSignals};
pub use global::GlobalI18nConfig;
pub use loader::{BundleError, DirectorySource, MessageLoader, MessageSource, StaticSource};
pub use locale::{Direction, Provenance, ResolvedLocale};
pub use messages::{interpolate, lookup, lookup_with, MessageTree, Translator};
pub use metrics::{I18nMetrics, MetricsReport, ResolutionCounts};
pub use registry::{LocaleRegistry, PrefixPolicy, RegistryError, DEFAULT_COOKIE_NAME};
pub use routing::{
    first_segment, is_excluded, localized_path, public_path, route, strip_first_segment, RouteAction,
    RouteOutcome, EXCLUDED_PREFIXES,
};
pub use validator::{BundleValidator, ValidationReport};
