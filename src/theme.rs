//! Theme preference (system / light / dark), persisted in a cookie next to
//! the locale cookie.

use crate::i18n::{append_preference_cookie, read_cookie};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

pub const THEME_COOKIE_NAME: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::System, Theme::Light, Theme::Dark];

    pub fn parse(value: &str) -> Option<Theme> {
        match value.trim().to_ascii_lowercase().as_str() {
            "system" => Some(Theme::System),
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Message key for the theme's label under `Common`.
    pub fn label_key(&self) -> &'static str {
        match self {
            Theme::System => "themeSystem",
            Theme::Light => "themeLight",
            Theme::Dark => "themeDark",
        }
    }

    /// Class for the `<html>` element; only an explicit dark choice forces it.
    pub fn html_class(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light | Theme::System => "",
        }
    }

    /// Theme from the request cookie; unknown or missing values mean `System`.
    pub fn from_headers(headers: &HeaderMap) -> Theme {
        read_cookie(headers, THEME_COOKIE_NAME)
            .and_then(Theme::parse)
            .unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persist a theme choice given as free text. Unknown values are ignored.
pub fn set_theme_cookie(headers: &mut HeaderMap, value: &str) -> Option<Theme> {
    let Some(theme) = Theme::parse(value) else {
        warn!("Ignoring unknown theme '{}'", value);
        return None;
    };
    append_preference_cookie(headers, THEME_COOKIE_NAME, theme.as_str()).then_some(theme)
}
