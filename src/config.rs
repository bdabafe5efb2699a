use crate::i18n::{LocaleRegistry, PrefixPolicy};
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Message bundles
    pub messages_dir: String,

    // Locales
    pub supported_locales: Vec<String>,
    pub default_locale: String,
    pub locale_cookie_name: String,
    pub locale_prefix: PrefixPolicy,
    pub rtl_locales: Vec<String>,

    // SEO
    pub site_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),

            messages_dir: std::env::var("MESSAGES_DIR").unwrap_or_else(|_| "messages".to_string()),

            supported_locales: parse_list(
                &std::env::var("SUPPORTED_LOCALES").unwrap_or_else(|_| "en-US,ar-AE".to_string()),
            ),
            default_locale: std::env::var("DEFAULT_LOCALE")
                .unwrap_or_else(|_| "en-US".to_string()),
            locale_cookie_name: std::env::var("LOCALE_COOKIE_NAME")
                .unwrap_or_else(|_| "locale".to_string()),
            locale_prefix: match std::env::var("LOCALE_PREFIX") {
                Ok(value) => PrefixPolicy::parse(&value).context("Invalid LOCALE_PREFIX")?,
                Err(_) => PrefixPolicy::AsNeeded,
            },
            rtl_locales: parse_list(
                &std::env::var("RTL_LOCALES").unwrap_or_else(|_| "ar-AE".to_string()),
            ),

            site_url: std::env::var("SITE_URL")
                .unwrap_or_else(|_| "https://yourdomain.com".to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    /// Build and validate the locale registry described by this config.
    pub fn registry(&self) -> Result<LocaleRegistry> {
        let rtl: Vec<&String> = self
            .rtl_locales
            .iter()
            .filter(|l| self.supported_locales.contains(l))
            .collect();

        let registry = LocaleRegistry::new(self.supported_locales.iter().cloned(), &self.default_locale)
            .context("Invalid locale configuration")?
            .with_cookie_name(&self.locale_cookie_name)
            .context("Invalid LOCALE_COOKIE_NAME")?
            .with_prefix_policy(self.locale_prefix)
            .with_rtl_locales(rtl.into_iter().cloned())
            .context("Invalid RTL_LOCALES")?;

        Ok(registry)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            messages_dir: "messages".to_string(),
            supported_locales: vec!["en-US".to_string(), "ar-AE".to_string()],
            default_locale: "en-US".to_string(),
            locale_cookie_name: "locale".to_string(),
            locale_prefix: PrefixPolicy::AsNeeded,
            rtl_locales: vec!["ar-AE".to_string()],
            site_url: "https://yourdomain.com".to_string(),
        }
    }
}

/// Split a comma-separated list, dropping blanks.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
