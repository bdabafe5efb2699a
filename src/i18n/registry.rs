//! Locale registry: Single source of truth for all supported locales.
//!
//! The registry is built once at startup (usually from [`crate::config::Config`]),
//! validated, and then shared read-only behind an `Arc` for the lifetime of the
//! process. Every resolver receives it explicitly; there is no ambient global.

use crate::i18n::locale::Direction;
use std::collections::HashSet;
use thiserror::Error;

/// Cookie name used when none is configured.
pub const DEFAULT_COOKIE_NAME: &str = "locale";

/// Errors raised when a registry configuration violates its invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("at least one supported locale is required")]
    Empty,

    #[error("locale '{0}' is listed more than once")]
    Duplicate(String),

    #[error("default locale '{0}' is not a supported locale")]
    UnknownDefault(String),

    #[error("right-to-left locale '{0}' is not a supported locale")]
    UnknownRtl(String),

    #[error("locale cookie name must not be empty")]
    EmptyCookieName,

    #[error("unknown locale prefix policy '{0}' (expected always, as-needed or never)")]
    UnknownPrefixPolicy(String),
}

/// Whether routed URLs carry a locale segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefixPolicy {
    /// Every routed URL starts with `/{locale}`.
    Always,
    /// Only non-default locales are prefixed.
    #[default]
    AsNeeded,
    /// URLs never carry a locale segment; the locale lives in the cookie.
    Never,
}

impl PrefixPolicy {
    pub fn parse(value: &str) -> Result<Self, RegistryError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(PrefixPolicy::Always),
            "as-needed" | "as_needed" => Ok(PrefixPolicy::AsNeeded),
            "never" => Ok(PrefixPolicy::Never),
            other => Err(RegistryError::UnknownPrefixPolicy(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixPolicy::Always => "always",
            PrefixPolicy::AsNeeded => "as-needed",
            PrefixPolicy::Never => "never",
        }
    }
}

/// Immutable locale configuration.
///
/// Invariants (checked by [`LocaleRegistry::new`]):
/// - `locales` is non-empty and has no duplicates
/// - `default_locale` is one of `locales`
/// - every right-to-left locale is one of `locales`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRegistry {
    locales: Vec<String>,
    default_locale: String,
    cookie_name: String,
    prefix_policy: PrefixPolicy,
    rtl_locales: Vec<String>,
}

impl LocaleRegistry {
    /// Build a registry with the default cookie name, `as-needed` prefixing,
    /// and `ar-AE` as the only right-to-left locale (when it is supported).
    pub fn new<I, S>(locales: I, default_locale: &str) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let locales: Vec<String> = locales.into_iter().map(Into::into).collect();
        let rtl_locales = locales
            .iter()
            .filter(|locale| locale.as_str() == "ar-AE")
            .cloned()
            .collect();

        let registry = Self {
            locales,
            default_locale: default_locale.to_string(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            prefix_policy: PrefixPolicy::default(),
            rtl_locales,
        };
        registry.validate()?;
        Ok(registry)
    }

    /// The demo configuration: `en-US` (default) and `ar-AE`.
    pub fn demo() -> Self {
        Self {
            locales: vec!["en-US".to_string(), "ar-AE".to_string()],
            default_locale: "en-US".to_string(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            prefix_policy: PrefixPolicy::AsNeeded,
            rtl_locales: vec!["ar-AE".to_string()],
        }
    }

    pub fn with_cookie_name(mut self, name: &str) -> Result<Self, RegistryError> {
        self.cookie_name = name.trim().to_string();
        self.validate()?;
        Ok(self)
    }

    pub fn with_prefix_policy(mut self, policy: PrefixPolicy) -> Self {
        self.prefix_policy = policy;
        self
    }

    /// Replace the right-to-left set.
    pub fn with_rtl_locales<I, S>(mut self, rtl: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rtl_locales = rtl.into_iter().map(Into::into).collect();
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if self.locales.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for locale in &self.locales {
            if !seen.insert(locale.as_str()) {
                return Err(RegistryError::Duplicate(locale.clone()));
            }
        }

        if !self.is_supported(&self.default_locale) {
            return Err(RegistryError::UnknownDefault(self.default_locale.clone()));
        }

        if let Some(rtl) = self.rtl_locales.iter().find(|l| !self.is_supported(l)) {
            return Err(RegistryError::UnknownRtl(rtl.clone()));
        }

        if self.cookie_name.is_empty() {
            return Err(RegistryError::EmptyCookieName);
        }

        Ok(())
    }

    /// Supported locales in registry order.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn prefix_policy(&self) -> PrefixPolicy {
        self.prefix_policy
    }

    /// Check if a locale identifier is supported (exact match).
    pub fn is_supported(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    pub fn is_default(&self, locale: &str) -> bool {
        self.default_locale == locale
    }

    /// Return the registry's own copy of `locale`, if supported.
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.locales
            .iter()
            .find(|l| l.as_str() == locale)
            .map(String::as_str)
    }

    /// Text direction for a locale.
    pub fn direction(&self, locale: &str) -> Direction {
        if self.rtl_locales.iter().any(|l| l == locale) {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::demo()
    }
}
