//! Metrics collection module
//!
//! Tracks suggestion traffic, template cache efficiency and backend health.

use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Number of backend response times kept for the rolling average
const RESPONSE_TIME_WINDOW: usize = 100;

/// Suggestion service metrics
pub struct SuggestMetrics {
    requests: AtomicU64,
    validation_failures: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    execution_errors: AtomicU64,
    query_building_errors: AtomicU64,
    /// Backend response times in ms
    response_times: Mutex<VecDeque<u64>>,
}

impl SuggestMetrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            requests: AtomicU64::new(0),
            validation_failures: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            execution_errors: AtomicU64::new(0),
            query_building_errors: AtomicU64::new(0),
            response_times: Mutex::new(VecDeque::with_capacity(RESPONSE_TIME_WINDOW)),
        }
    }

    pub fn inc_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_validation_failure(&self) {
        self.validation_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_execution_error(&self) {
        self.execution_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_query_building_error(&self) {
        self.query_building_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record backend response time
    pub fn record_response_time(&self, time_ms: u64) {
        let mut times = self
            .response_times
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if times.len() >= RESPONSE_TIME_WINDOW {
            times.pop_front();
        }
        times.push_back(time_ms);
    }

    /// Average backend response time
    pub fn avg_response_time(&self) -> Option<u64> {
        let times = self
            .response_times
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if times.is_empty() {
            None
        } else {
            Some(times.iter().sum::<u64>() / times.len() as u64)
        }
    }

    /// Share of template lookups answered from the cache, in percent
    pub fn cache_hit_rate(&self) -> f64 {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let total = hits + self.cache_misses.load(Ordering::Relaxed);
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            validation_failures: self.validation_failures.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            cache_hit_rate: self.cache_hit_rate(),
            execution_errors: self.execution_errors.load(Ordering::Relaxed),
            query_building_errors: self.query_building_errors.load(Ordering::Relaxed),
            avg_response_time_ms: self.avg_response_time(),
        }
    }
}

impl Default for SuggestMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable metrics view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub validation_failures: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub cache_hit_rate: f64,
    pub execution_errors: u64,
    pub query_building_errors: u64,
    pub avg_response_time_ms: Option<u64>,
}
