//! I18n metrics and observability module.
//!
//! Tracks message bundle cache behaviour, which detection rule resolved each
//! request, and locale cookie writes. Exposed as JSON at `/api/i18n/metrics`.

use crate::i18n::locale::Provenance;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Counters for locale resolution and bundle loading.
#[derive(Debug, Default)]
pub struct I18nMetrics {
    /// Bundle found in the loader cache
    cache_hits: AtomicUsize,

    /// Bundle had to be read from its source
    cache_misses: AtomicUsize,

    /// Bundle read or parse failed
    load_failures: AtomicUsize,

    resolved_by_path: AtomicUsize,
    resolved_by_cookie: AtomicUsize,
    resolved_by_header: AtomicUsize,
    resolved_by_default: AtomicUsize,

    /// Locale cookies written
    cookie_writes: AtomicUsize,

    /// Cookie writes refused because the locale was unsupported
    cookie_rejections: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<I18nMetrics> = OnceLock::new();

impl I18nMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the global metrics instance.
    pub fn global() -> &'static I18nMetrics {
        METRICS.get_or_init(I18nMetrics::new)
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record which rule resolved a request's locale.
    pub fn record_resolution(&self, provenance: Provenance) {
        let counter = match provenance {
            Provenance::PathSegment => &self.resolved_by_path,
            Provenance::Cookie => &self.resolved_by_cookie,
            Provenance::Header => &self.resolved_by_header,
            Provenance::Default => &self.resolved_by_default,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cookie_write(&self) {
        self.cookie_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cookie_rejection(&self) {
        self.cookie_rejections.fetch_add(1, Ordering::Relaxed);
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let total_cache_queries = hits + misses;
        let cache_hit_rate = if total_cache_queries > 0 {
            (hits as f64 / total_cache_queries as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            load_failures: self.load_failures.load(Ordering::Relaxed),
            resolutions: ResolutionCounts {
                path_segment: self.resolved_by_path.load(Ordering::Relaxed),
                cookie: self.resolved_by_cookie.load(Ordering::Relaxed),
                header: self.resolved_by_header.load(Ordering::Relaxed),
                default: self.resolved_by_default.load(Ordering::Relaxed),
            },
            cookie_writes: self.cookie_writes.load(Ordering::Relaxed),
            cookie_rejections: self.cookie_rejections.load(Ordering::Relaxed),
        }
    }
}

/// Metrics report containing current i18n statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    pub load_failures: usize,
    pub resolutions: ResolutionCounts,
    pub cookie_writes: usize,
    pub cookie_rejections: usize,
}

/// How many requests each detection rule resolved.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResolutionCounts {
    pub path_segment: usize,
    pub cookie: usize,
    pub header: usize,
    pub default: usize,
}
