//! Message bundle loading and per-locale caching.
//!
//! Bundles are looked up by locale identifier (`{locale}.json` for the
//! directory source). A missing bundle for a supported locale is a packaging
//! defect: it is reported as [`BundleError::Missing`] and never papered over
//! with another locale's messages.

use crate::i18n::messages::MessageTree;
use crate::i18n::metrics::I18nMetrics;
use crate::i18n::registry::LocaleRegistry;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("no message bundle registered for locale '{locale}'")]
    Missing { locale: String },

    #[error("message bundle for locale '{locale}' is malformed: {source}")]
    Malformed {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read message bundle for locale '{locale}': {source}")]
    Io {
        locale: String,
        #[source]
        source: io::Error,
    },
}

impl BundleError {
    pub fn locale(&self) -> &str {
        match self {
            BundleError::Missing { locale }
            | BundleError::Malformed { locale, .. }
            | BundleError::Io { locale, .. } => locale,
        }
    }
}

/// Where raw bundle documents come from.
pub trait MessageSource: Send + Sync {
    /// Raw JSON for `locale`, or `None` when no bundle exists.
    fn read(&self, locale: &str) -> Result<Option<String>, BundleError>;
}

/// Reads `{dir}/{locale}.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, locale: &str) -> Option<PathBuf> {
        // Locale ids name files directly; refuse anything that could escape the directory
        if locale.is_empty() || locale.contains(['/', '\\']) || locale.starts_with('.') {
            return None;
        }
        Some(self.dir.join(format!("{}.json", locale)))
    }
}

impl MessageSource for DirectorySource {
    fn read(&self, locale: &str) -> Result<Option<String>, BundleError> {
        let Some(path) = self.path_for(locale) else {
            return Ok(None);
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(BundleError::Io {
                locale: locale.to_string(),
                source,
            }),
        }
    }
}

/// In-memory bundles keyed by locale.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    bundles: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundle(mut self, locale: &str, json: impl Into<String>) -> Self {
        self.bundles.insert(locale.to_string(), json.into());
        self
    }
}

impl MessageSource for StaticSource {
    fn read(&self, locale: &str) -> Result<Option<String>, BundleError> {
        Ok(self.bundles.get(locale).cloned())
    }
}

/// Loads message trees and memoizes them per locale.
///
/// Safe to share across request tasks. Each locale is parsed at most once in
/// the common case; if two tasks race on a cold locale, the first insert wins
/// and both observe the same tree.
pub struct MessageLoader {
    source: Box<dyn MessageSource>,
    cache: RwLock<HashMap<String, Arc<MessageTree>>>,
}

impl MessageLoader {
    pub fn new(source: impl MessageSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Message tree for `locale`.
    ///
    /// The caller is responsible for passing a supported locale; an
    /// unsupported one simply has no bundle.
    pub fn load(&self, locale: &str) -> Result<Arc<MessageTree>, BundleError> {
        let metrics = I18nMetrics::global();

        if let Some(tree) = self.cached(locale) {
            metrics.record_cache_hit();
            return Ok(tree);
        }
        metrics.record_cache_miss();

        let tree = match self.read_tree(locale) {
            Ok(tree) => Arc::new(tree),
            Err(e) => {
                metrics.record_load_failure();
                error!("Failed to load message bundle: {}", e);
                return Err(e);
            }
        };

        let mut cache = self
            .cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let tree = Arc::clone(cache.entry(locale.to_string()).or_insert(tree));
        debug!("Cached message bundle for {}", locale);
        Ok(tree)
    }

    fn cached(&self, locale: &str) -> Option<Arc<MessageTree>> {
        self.cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(locale)
            .cloned()
    }

    fn read_tree(&self, locale: &str) -> Result<MessageTree, BundleError> {
        let json = self.source.read(locale)?.ok_or_else(|| BundleError::Missing {
            locale: locale.to_string(),
        })?;

        MessageTree::from_json(&json).map_err(|source| BundleError::Malformed {
            locale: locale.to_string(),
            source,
        })
    }

    /// Load every supported locale so packaging defects surface at startup.
    pub fn preload(&self, registry: &LocaleRegistry) -> Result<(), BundleError> {
        for locale in registry.locales() {
            let tree = self.load(locale)?;
            info!(
                "Loaded message bundle for {} ({} keys)",
                locale,
                tree.leaf_paths().len()
            );
        }
        Ok(())
    }

    /// Number of locales currently cached.
    pub fn cached_locales(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl std::fmt::Debug for MessageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageLoader")
            .field("cached_locales", &self.cached_locales())
            .finish()
    }
}
