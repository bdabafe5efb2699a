//! Message trees and dot-path translation lookup.
//!
//! A bundle is a JSON document whose values are either strings or nested
//! objects:
//!
//! ```json
//! { "Dashboard": { "title": "Dashboard", "stats": { "users": "Users" } } }
//! ```
//!
//! Lookups never fail. A key path that does not resolve to a string comes
//! back unchanged, so a missing translation shows up on the page as its key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Translation data for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageTree {
    Leaf(String),
    Node(BTreeMap<String, MessageTree>),
}

impl MessageTree {
    /// An empty node.
    pub fn empty() -> Self {
        MessageTree::Node(BTreeMap::new())
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Walk `key_path` and return the leaf it addresses, if any.
    pub fn get(&self, key_path: &str) -> Option<&str> {
        if key_path.is_empty() {
            return None;
        }

        let mut current = self;
        for segment in key_path.split('.') {
            match current {
                MessageTree::Node(children) => current = children.get(segment)?,
                MessageTree::Leaf(_) => return None,
            }
        }

        match current {
            MessageTree::Leaf(value) => Some(value),
            MessageTree::Node(_) => None,
        }
    }

    /// Child node at `key_path`, used for namespaced views.
    pub fn subtree(&self, key_path: &str) -> Option<&MessageTree> {
        key_path
            .split('.')
            .try_fold(self, |current, segment| match current {
                MessageTree::Node(children) => children.get(segment),
                MessageTree::Leaf(_) => None,
            })
    }

    /// All leaf key paths, in sorted order.
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_leaf_paths(self, String::new(), &mut paths);
        paths
    }

    pub fn is_empty(&self) -> bool {
        match self {
            MessageTree::Leaf(_) => false,
            MessageTree::Node(children) => children.is_empty(),
        }
    }
}

fn collect_leaf_paths(tree: &MessageTree, prefix: String, out: &mut Vec<String>) {
    match tree {
        MessageTree::Leaf(_) => out.push(prefix),
        MessageTree::Node(children) => {
            for (key, child) in children {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect_leaf_paths(child, path, out);
            }
        }
    }
}

/// Resolve a dot-separated key path against a tree.
///
/// Returns the leaf string when every segment resolves and the final value
/// is a string; otherwise returns `key_path` unchanged.
pub fn lookup(tree: &MessageTree, key_path: &str) -> String {
    tree.get(key_path).unwrap_or(key_path).to_string()
}

/// [`lookup`] followed by `{name}` placeholder substitution.
///
/// Placeholders are only substituted in found translations; a fallback key
/// is returned as-is.
pub fn lookup_with(tree: &MessageTree, key_path: &str, args: &[(&str, &str)]) -> String {
    match tree.get(key_path) {
        Some(template) => interpolate(template, args),
        None => key_path.to_string(),
    }
}

/// Replace each `{name}` in `template` with its value from `args`.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{}}}", name), value)
    })
}

/// Translation helper bound to one tree and an optional namespace.
///
/// `Translator::new(&tree, Some("Dashboard")).t("stats.users")` looks up
/// `Dashboard.stats.users`. Missing keys come back fully qualified.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    tree: &'a MessageTree,
    namespace: Option<&'a str>,
}

impl<'a> Translator<'a> {
    pub fn new(tree: &'a MessageTree, namespace: Option<&'a str>) -> Self {
        Self {
            tree,
            namespace: namespace.filter(|ns| !ns.is_empty()),
        }
    }

    fn qualify(&self, key: &str) -> String {
        match self.namespace {
            Some(ns) if !key.is_empty() => format!("{}.{}", ns, key),
            Some(ns) => ns.to_string(),
            None => key.to_string(),
        }
    }

    pub fn t(&self, key: &str) -> String {
        lookup(self.tree, &self.qualify(key))
    }

    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        lookup_with(self.tree, &self.qualify(key), args)
    }

    /// Whether `key` resolves to a translation.
    pub fn has(&self, key: &str) -> bool {
        self.tree.get(&self.qualify(key)).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> MessageTree {
        MessageTree::from_json(
            r#"{
                "A": { "B": "hello" },
                "Dashboard": {
                    "title": "Dashboard",
                    "stats": { "users": "Users", "greeting": "Welcome back, {name}!" }
                },
                "flat": "top level"
            }"#,
        )
        .expect("Should parse")
    }

    // ==================== lookup Tests ====================

    #[test]
    fn test_lookup_nested_leaf() {
        let tree = sample();
        assert_eq!(lookup(&tree, "A.B"), "hello");
        assert_eq!(lookup(&tree, "Dashboard.stats.users"), "Users");
        assert_eq!(lookup(&tree, "flat"), "top level");
    }

    #[test]
    fn test_lookup_missing_returns_key() {
        let tree = sample();
        assert_eq!(lookup(&tree, "A.C"), "A.C");
        assert_eq!(lookup(&tree, "Nope"), "Nope");
        assert_eq!(lookup(&tree, "Dashboard.stats.users.extra"), "Dashboard.stats.users.extra");
    }

    #[test]
    fn test_lookup_empty_key_returns_empty() {
        assert_eq!(lookup(&sample(), ""), "");
    }

    #[test]
    fn test_lookup_node_returns_key() {
        let tree = sample();
        assert_eq!(lookup(&tree, "Dashboard.stats"), "Dashboard.stats");
        assert_eq!(lookup(&tree, "A"), "A");
    }

    #[test]
    fn test_lookup_empty_tree() {
        let tree = MessageTree::empty();
        assert!(tree.is_empty());
        assert_eq!(lookup(&tree, "A.B"), "A.B");
    }

    #[test]
    fn test_lookup_leaf_root() {
        let tree = MessageTree::Leaf("root".to_string());
        assert_eq!(lookup(&tree, "A"), "A");
    }

    #[test]
    fn test_lookup_trailing_and_double_dots() {
        let tree = sample();
        assert_eq!(lookup(&tree, "A.B."), "A.B.");
        assert_eq!(lookup(&tree, "A..B"), "A..B");
        assert_eq!(lookup(&tree, ".A.B"), ".A.B");
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let tree = sample();
        assert_eq!(lookup(&tree, "A.B"), lookup(&tree, "A.B"));
        assert_eq!(lookup(&tree, "A.C"), lookup(&tree, "A.C"));
    }

    // ==================== Parsing Tests ====================

    #[test]
    fn test_non_string_values_rejected() {
        assert!(MessageTree::from_json(r#"{"count": 3}"#).is_err());
        assert!(MessageTree::from_json(r#"{"list": ["a"]}"#).is_err());
    }

    #[test]
    fn test_leaf_paths_sorted() {
        let tree = MessageTree::from_json(r#"{"b": {"y": "1", "x": "2"}, "a": "3"}"#).unwrap();
        assert_eq!(tree.leaf_paths(), vec!["a", "b.x", "b.y"]);
    }

    #[test]
    fn test_subtree() {
        let tree = sample();
        assert!(tree.subtree("Dashboard.stats").is_some());
        assert!(tree.subtree("Dashboard.missing").is_none());
        assert!(tree.subtree("A.B.C").is_none());
    }

    // ==================== Interpolation Tests ====================

    #[test]
    fn test_lookup_with_substitutes() {
        let tree = sample();
        assert_eq!(
            lookup_with(&tree, "Dashboard.stats.greeting", &[("name", "Layla")]),
            "Welcome back, Layla!"
        );
    }

    #[test]
    fn test_lookup_with_missing_key_is_unsubstituted() {
        let tree = sample();
        assert_eq!(lookup_with(&tree, "Missing.{name}", &[("name", "x")]), "Missing.{name}");
    }

    #[test]
    fn test_interpolate_leaves_unknown_placeholders() {
        assert_eq!(interpolate("{a} and {b}", &[("a", "1")]), "1 and {b}");
    }

    // ==================== Translator Tests ====================

    #[test]
    fn test_translator_namespace() {
        let tree = sample();
        let t = Translator::new(&tree, Some("Dashboard"));
        assert_eq!(t.t("title"), "Dashboard");
        assert_eq!(t.t("stats.users"), "Users");
        assert_eq!(t.t("missing"), "Dashboard.missing");
        assert!(t.has("stats.users"));
        assert!(!t.has("stats"));
    }

    #[test]
    fn test_translator_without_namespace() {
        let tree = sample();
        let t = Translator::new(&tree, None);
        assert_eq!(t.t("A.B"), "hello");
        assert_eq!(Translator::new(&tree, Some("")).t("A.B"), "hello");
    }

    #[test]
    fn test_translator_t_with() {
        let tree = sample();
        let t = Translator::new(&tree, Some("Dashboard.stats"));
        assert_eq!(t.t_with("greeting", &[("name", "Sam")]), "Welcome back, Sam!");
    }

    // ==================== Property Tests ====================

    proptest! {
        #[test]
        fn prop_missing_keys_round_trip(key in "[A-Za-z.]{0,24}") {
            let tree = MessageTree::empty();
            prop_assert_eq!(lookup(&tree, &key), key);
        }

        #[test]
        fn prop_lookup_never_empty_for_nonempty_key(key in "[A-Za-z.]{1,24}") {
            prop_assert!(!lookup(&sample(), &key).is_empty());
        }
    }
}
