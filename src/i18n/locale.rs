//! Resolved locale: the output of detection.

use serde::Serialize;
use std::fmt;

/// Text direction of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Value for the HTML `dir` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Direction::Rtl)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which detection rule produced a [`ResolvedLocale`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    PathSegment,
    Cookie,
    Header,
    Default,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::PathSegment => "path-segment",
            Provenance::Cookie => "cookie",
            Provenance::Header => "header",
            Provenance::Default => "default",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A locale chosen for one request or page render.
///
/// Always a member of the registry it was resolved against. Computed fresh
/// per request and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLocale {
    pub locale: String,
    pub direction: Direction,
    pub provenance: Provenance,
}

impl ResolvedLocale {
    pub fn as_str(&self) -> &str {
        &self.locale
    }

    pub fn is_rtl(&self) -> bool {
        self.direction.is_rtl()
    }
}

impl fmt::Display for ResolvedLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_strings() {
        assert_eq!(Direction::Rtl.as_str(), "rtl");
        assert_eq!(Direction::Ltr.to_string(), "ltr");
        assert!(Direction::Rtl.is_rtl());
        assert!(!Direction::Ltr.is_rtl());
    }

    #[test]
    fn test_provenance_strings() {
        assert_eq!(Provenance::PathSegment.as_str(), "path-segment");
        assert_eq!(Provenance::Cookie.to_string(), "cookie");
        assert_eq!(Provenance::Header.as_str(), "header");
        assert_eq!(Provenance::Default.as_str(), "default");
    }

    #[test]
    fn test_resolved_locale_serializes() {
        let resolved = ResolvedLocale {
            locale: "ar-AE".to_string(),
            direction: Direction::Rtl,
            provenance: Provenance::PathSegment,
        };
        let json = serde_json::to_value(&resolved).expect("Should serialize");
        assert_eq!(json["locale"], "ar-AE");
        assert_eq!(json["direction"], "rtl");
        assert_eq!(json["provenance"], "path-segment");
    }
}
