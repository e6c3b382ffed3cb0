//! Fetch statistics tracking.
//!
//! This module provides thread-safe counters for fetches, attempts, successes
//! and failures by category, shared between the fetcher and the `/status`
//! endpoint.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ErrorCategory;

/// Thread-safe fetch statistics tracker.
///
/// All counters use atomics, so a single instance can be shared across
/// concurrent fetches through an `Arc`. Every [`ErrorCategory`] is initialized
/// to zero on creation.
pub struct FetchStats {
    fetches: AtomicUsize,
    attempts: AtomicUsize,
    retries: AtomicUsize,
    successes: AtomicUsize,
    failures: HashMap<ErrorCategory, AtomicUsize>,
}

impl FetchStats {
    pub fn new() -> Self {
        let mut failures = HashMap::new();
        for category in ErrorCategory::iter() {
            failures.insert(category, AtomicUsize::new(0));
        }

        FetchStats {
            fetches: AtomicUsize::new(0),
            attempts: AtomicUsize::new(0),
            retries: AtomicUsize::new(0),
            successes: AtomicUsize::new(0),
            failures,
        }
    }

    pub fn record_fetch(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_attempt(&self) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the failure counter for a category.
    pub fn record_failure(&self, category: ErrorCategory) {
        if let Some(counter) = self.failures.get(&category) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment failure counter for {:?} which is not in the map. \
                 This indicates a bug in FetchStats initialization.",
                category
            );
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn retries(&self) -> usize {
        self.retries.load(Ordering::SeqCst)
    }

    pub fn successes(&self) -> usize {
        self.successes.load(Ordering::SeqCst)
    }

    /// Get the failure count for a category.
    ///
    /// Returns 0 if the category is not in the map (should never happen if properly initialized).
    pub fn failure_count(&self, category: ErrorCategory) -> usize {
        self.failures
            .get(&category)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    pub fn total_failures(&self) -> usize {
        self.failures.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }
}

impl Default for FetchStats {
    fn default() -> Self {
        Self::new()
    }
}
