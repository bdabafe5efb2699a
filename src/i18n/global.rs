//! I18n for pages outside the locale-prefixed route tree.
//!
//! `/dashboard`, `/admin` and similar sections have no locale in their URL.
//! They read the same cookie and `Accept-Language` header as the routed
//! middleware, run the same detector, and get a translator over the loaded
//! bundle.

use crate::i18n::detector::{resolve, LocaleSignals};
use crate::i18n::loader::{BundleError, MessageLoader};
use crate::i18n::locale::{Direction, ResolvedLocale};
use crate::i18n::messages::{lookup, lookup_with, MessageTree, Translator};
use crate::i18n::metrics::I18nMetrics;
use crate::i18n::registry::LocaleRegistry;
use std::sync::Arc;

/// Locale context for one non-routed page render.
#[derive(Debug, Clone)]
pub struct GlobalI18nConfig {
    pub locale: ResolvedLocale,
    pub messages: Arc<MessageTree>,
    pub supported_locales: Vec<String>,
    pub default_locale: String,
    pub cookie_name: String,
}

impl GlobalI18nConfig {
    /// Resolve from the request's cookie and header and load the bundle.
    ///
    /// A missing bundle is returned as an error; the page must not render
    /// with some other locale's messages.
    pub fn resolve(
        registry: &LocaleRegistry,
        loader: &MessageLoader,
        cookie: Option<&str>,
        accept_language: Option<&str>,
    ) -> Result<Self, BundleError> {
        let locale = resolve(&LocaleSignals::unrouted(cookie, accept_language), registry);
        I18nMetrics::global().record_resolution(locale.provenance);
        Self::for_locale(registry, loader, locale)
    }

    /// Build the context for an already-resolved locale.
    pub fn for_locale(
        registry: &LocaleRegistry,
        loader: &MessageLoader,
        locale: ResolvedLocale,
    ) -> Result<Self, BundleError> {
        let messages = loader.load(&locale.locale)?;

        Ok(Self {
            locale,
            messages,
            supported_locales: registry.locales().to_vec(),
            default_locale: registry.default_locale().to_string(),
            cookie_name: registry.cookie_name().to_string(),
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale.locale
    }

    pub fn direction(&self) -> Direction {
        self.locale.direction
    }

    pub fn is_rtl(&self) -> bool {
        self.locale.is_rtl()
    }

    /// Look up a full key path.
    pub fn t(&self, key: &str) -> String {
        lookup(&self.messages, key)
    }

    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        lookup_with(&self.messages, key, args)
    }

    /// Translator scoped to `namespace`.
    pub fn translator<'a>(&'a self, namespace: Option<&'a str>) -> Translator<'a> {
        Translator::new(&self.messages, namespace)
    }
}
