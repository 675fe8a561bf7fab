//! Prometheus metrics for the directory endpoints.
//!
//! This module provides metrics for:
//! - Search latency and result sizes
//! - Served and rejected search requests
//! - Page renders

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Search latency metric name.
pub const METRIC_SEARCH_LATENCY: &str = "search_latency_ms";
/// Search result size metric name.
pub const METRIC_SEARCH_RESULTS: &str = "search_results";
/// Searches served counter metric name.
pub const METRIC_SEARCHES_SERVED: &str = "searches_served_total";
/// Searches rejected counter metric name.
pub const METRIC_SEARCHES_REJECTED: &str = "searches_rejected_total";
/// Page renders counter metric name.
pub const METRIC_PAGE_RENDERS: &str = "page_renders_total";

/// Install the global Prometheus recorder and describe all metrics.
///
/// Call this once at startup; the returned handle renders the scrape output.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_histogram!(METRIC_SEARCH_LATENCY, "Search handling latency in milliseconds");
    describe_histogram!(
        METRIC_SEARCH_RESULTS,
        "Number of providers returned per search"
    );

    describe_counter!(METRIC_SEARCHES_SERVED, "Total number of searches answered");
    describe_counter!(
        METRIC_SEARCHES_REJECTED,
        "Total number of searches rejected as invalid input"
    );
    describe_counter!(METRIC_PAGE_RENDERS, "Total number of directory page renders");

    debug!("Metrics initialized");
}

/// Record a completed search.
pub fn record_search(start: Instant, results: usize) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_SEARCH_LATENCY).record(latency_ms);
    histogram!(METRIC_SEARCH_RESULTS).record(results as f64);
    counter!(METRIC_SEARCHES_SERVED).increment(1);
}

/// Increment searches rejected counter.
pub fn inc_searches_rejected(reason: &'static str) {
    counter!(METRIC_SEARCHES_REJECTED, "reason" => reason).increment(1);
}

/// Increment page renders counter.
pub fn inc_page_renders() {
    counter!(METRIC_PAGE_RENDERS).increment(1);
}
