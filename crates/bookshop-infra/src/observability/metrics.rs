//! Prometheus request counters and latency histograms.

use std::time::Duration;

use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, exponential_buckets};

use super::observer::{Observed, Observer, Outcome};

const LABELS: &[&str] = &["service", "method", "error"];

/// The metric families shared by every decorated service.
///
/// Registered on a caller-owned [`Registry`]; clones share the same
/// underlying series.
#[derive(Clone)]
pub struct ServiceMetrics {
    requests: IntCounterVec,
    latency: HistogramVec,
}

impl ServiceMetrics {
    pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
        let requests = IntCounterVec::new(
            Opts::new("bookshop_requests_total", "Number of service calls"),
            LABELS,
        )?;
        let latency = HistogramVec::new(
            HistogramOpts::new(
                "bookshop_request_duration_seconds",
                "Total duration of service calls in seconds",
            )
            .buckets(exponential_buckets(0.0005, 2.0, 16)?),
            LABELS,
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(latency.clone()))?;

        Ok(Self { requests, latency })
    }

    /// Observer recording calls of `service` into these families.
    pub fn observer(&self, service: &'static str) -> CallMetrics {
        CallMetrics {
            service,
            metrics: self.clone(),
        }
    }

    /// Calls counted so far for one label set.
    pub fn request_count(&self, service: &str, method: &str, error: bool) -> u64 {
        self.requests
            .with_label_values(&[service, method, error_label(error)])
            .get()
    }

    /// Sum of observed latencies, in seconds, for one label set.
    pub fn latency_sum(&self, service: &str, method: &str, error: bool) -> f64 {
        self.latency
            .with_label_values(&[service, method, error_label(error)])
            .get_sample_sum()
    }
}

fn error_label(error: bool) -> &'static str {
    if error { "true" } else { "false" }
}

/// Counts each call and records its latency under
/// `{service, method, error}`.
#[derive(Clone)]
pub struct CallMetrics {
    service: &'static str,
    metrics: ServiceMetrics,
}

impl Observer for CallMetrics {
    fn record(&self, method: &'static str, outcome: &Outcome, elapsed: Duration) {
        let labels = [self.service, method, error_label(outcome.is_error())];
        self.metrics.requests.with_label_values(&labels).inc();
        self.metrics
            .latency
            .with_label_values(&labels)
            .observe(elapsed.as_secs_f64());
    }
}

/// A service wrapped with request metrics.
pub type Metrics<S> = Observed<S, CallMetrics>;

#[cfg(test)]
mod tests {
    use prometheus::{Encoder, TextEncoder};

    use super::*;

    #[test]
    fn test_record_counts_by_error_label() {
        let registry = Registry::new();
        let metrics = ServiceMetrics::register(&registry).unwrap();
        let observer = metrics.observer("catalog");

        observer.record("search", &Outcome::Success, Duration::from_millis(3));
        observer.record(
            "search",
            &Outcome::Failure("boom".into()),
            Duration::from_millis(1),
        );
        observer.record("search", &Outcome::Cancelled, Duration::from_millis(1));

        assert_eq!(metrics.request_count("catalog", "search", false), 1);
        assert_eq!(metrics.request_count("catalog", "search", true), 2);
        assert!((metrics.latency_sum("catalog", "search", false) - 0.003).abs() < 1e-9);
    }

    #[test]
    fn test_families_are_exported() {
        let registry = Registry::new();
        let metrics = ServiceMetrics::register(&registry).unwrap();
        metrics
            .observer("users")
            .record("get", &Outcome::Success, Duration::from_millis(2));

        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&registry.gather(), &mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("bookshop_requests_total"));
        assert!(text.contains("bookshop_request_duration_seconds_bucket"));
        assert!(text.contains(r#"service="users""#));
    }

    #[test]
    fn test_double_registration_fails() {
        let registry = Registry::new();
        ServiceMetrics::register(&registry).unwrap();
        assert!(ServiceMetrics::register(&registry).is_err());
    }
}
