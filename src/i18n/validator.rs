//! Message bundle consistency validation.
//!
//! Every locale's bundle should mirror the default locale's: same key paths,
//! same leaf/node shape, and the same `{placeholder}` names in each string.
//! Missing keys would render as raw key paths, so they are reported as
//! errors; extra keys and placeholder drift are warnings.

use crate::i18n::loader::{BundleError, MessageLoader};
use crate::i18n::messages::MessageTree;
use crate::i18n::registry::LocaleRegistry;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::warn;

/// Validation report containing errors and warnings about a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that will show up as untranslated keys
    pub errors: Vec<String>,

    /// Non-critical drift between bundles
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for bundle consistency.
pub struct BundleValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl BundleValidator {
    /// Compare `candidate` against the `reference` bundle.
    pub fn validate(reference: &MessageTree, candidate: &MessageTree) -> ValidationReport {
        let mut report = ValidationReport::new();
        Self::compare(reference, candidate, "", &mut report);
        report
    }

    /// Validate every non-default locale against the default locale's bundle.
    ///
    /// Problems are logged and returned; loading failures are propagated.
    pub fn validate_registry(
        registry: &LocaleRegistry,
        loader: &MessageLoader,
    ) -> Result<Vec<(String, ValidationReport)>, BundleError> {
        let reference = loader.load(registry.default_locale())?;
        let mut reports = Vec::new();

        for locale in registry.locales() {
            if registry.is_default(locale) {
                continue;
            }

            let candidate = loader.load(locale)?;
            let report = Self::validate(&reference, &candidate);
            if report.has_errors() {
                warn!("Bundle validation errors for {}: {:?}", locale, report.errors);
            }
            if report.has_warnings() {
                warn!(
                    "Bundle validation warnings for {}: {:?}",
                    locale, report.warnings
                );
            }
            reports.push((locale.clone(), report));
        }

        Ok(reports)
    }

    fn compare(
        reference: &MessageTree,
        candidate: &MessageTree,
        path: &str,
        report: &mut ValidationReport,
    ) {
        match (reference, candidate) {
            (MessageTree::Leaf(expected), MessageTree::Leaf(actual)) => {
                if actual.trim().is_empty() && !expected.trim().is_empty() {
                    report.warnings.push(format!("Empty translation at '{}'", path));
                }

                let expected_vars = Self::extract_placeholders(expected);
                let actual_vars = Self::extract_placeholders(actual);
                if expected_vars != actual_vars {
                    report.warnings.push(format!(
                        "Placeholder mismatch at '{}': expected {:?}, found {:?}",
                        path, expected_vars, actual_vars
                    ));
                }
            }
            (MessageTree::Node(expected), MessageTree::Node(actual)) => {
                for (key, child) in expected {
                    let child_path = join(path, key);
                    match actual.get(key) {
                        Some(other) => Self::compare(child, other, &child_path, report),
                        None => report.errors.push(format!("Missing key '{}'", child_path)),
                    }
                }

                for key in actual.keys().filter(|k| !expected.contains_key(*k)) {
                    report
                        .warnings
                        .push(format!("Extra key '{}'", join(path, key)));
                }
            }
            (MessageTree::Leaf(_), MessageTree::Node(_)) => report.errors.push(format!(
                "Shape mismatch at '{}': expected a string, found a group",
                path
            )),
            (MessageTree::Node(_), MessageTree::Leaf(_)) => report.errors.push(format!(
                "Shape mismatch at '{}': expected a group, found a string",
                path
            )),
        }
    }

    /// Placeholder names (`{name}`) used in a message.
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("valid placeholder regex"));

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::loader::StaticSource;

    fn tree(json: &str) -> MessageTree {
        MessageTree::from_json(json).expect("Should parse")
    }

    // ==================== Placeholder Extraction Tests ====================

    #[test]
    fn test_extract_placeholders() {
        let vars = BundleValidator::extract_placeholders("Hi {name}, you have {count} items");
        assert_eq!(
            vars.into_iter().collect::<Vec<_>>(),
            vec!["count".to_string(), "name".to_string()]
        );
    }

    #[test]
    fn test_extract_placeholders_none() {
        assert!(BundleValidator::extract_placeholders("No variables { here }").is_empty());
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_validate_matching_bundles() {
        let en = tree(r#"{"Common": {"hello": "Hello {name}"}, "title": "Home"}"#);
        let ar = tree(r#"{"Common": {"hello": "مرحبا {name}"}, "title": "الرئيسية"}"#);
        assert!(BundleValidator::validate(&en, &ar).is_clean());
    }

    #[test]
    fn test_validate_missing_key() {
        let en = tree(r#"{"Common": {"a": "A", "b": "B"}}"#);
        let ar = tree(r#"{"Common": {"a": "أ"}}"#);

        let report = BundleValidator::validate(&en, &ar);
        assert_eq!(report.errors, vec!["Missing key 'Common.b'".to_string()]);
    }

    #[test]
    fn test_validate_extra_key() {
        let en = tree(r#"{"a": "A"}"#);
        let ar = tree(r#"{"a": "أ", "z": "ز"}"#);

        let report = BundleValidator::validate(&en, &ar);
        assert!(!report.has_errors());
        assert_eq!(report.warnings, vec!["Extra key 'z'".to_string()]);
    }

    #[test]
    fn test_validate_shape_mismatch() {
        let en = tree(r#"{"stats": {"users": "Users"}}"#);
        let ar = tree(r#"{"stats": "الإحصائيات"}"#);

        let report = BundleValidator::validate(&en, &ar);
        assert!(report.errors[0].contains("Shape mismatch at 'stats'"));
    }

    #[test]
    fn test_validate_placeholder_mismatch() {
        let en = tree(r#"{"greeting": "Hello {name}"}"#);
        let ar = tree(r#"{"greeting": "مرحبا {user}"}"#);

        let report = BundleValidator::validate(&en, &ar);
        assert!(report.warnings[0].contains("Placeholder mismatch at 'greeting'"));
    }

    #[test]
    fn test_validate_empty_translation() {
        let en = tree(r#"{"title": "Home"}"#);
        let ar = tree(r#"{"title": ""}"#);

        let report = BundleValidator::validate(&en, &ar);
        assert!(report.warnings[0].contains("Empty translation"));
    }

    #[test]
    fn test_validate_registry() {
        let loader = MessageLoader::new(
            StaticSource::new()
                .with_bundle("en-US", r#"{"a": "A", "b": "B"}"#)
                .with_bundle("ar-AE", r#"{"a": "أ"}"#),
        );

        let reports = BundleValidator::validate_registry(&LocaleRegistry::demo(), &loader)
            .expect("Should load");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].0, "ar-AE");
        assert!(reports[0].1.has_errors());
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_validation_report_new() {
        let report = ValidationReport::new();
        assert!(report.is_clean());
        assert!(!report.has_errors());
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_validation_report_with_warning() {
        let mut report = ValidationReport::new();
        report.warnings.push("Test warning".to_string());

        assert!(!report.is_clean());
        assert!(report.has_warnings());
    }
}
