//! Composition of the standard decorator chain.

use tower::ServiceBuilder;

use super::logging::{CallLogger, Logging};
use super::metrics::{Metrics, ServiceMetrics};
use super::observer::ObserveLayer;

/// A service decorated with the standard chain: `metrics(logging(base))`.
pub type Decorated<S> = Metrics<Logging<S>>;

/// Builds decorated services that share one set of metric families.
///
/// Metrics sits outermost so its timer includes the logging overhead,
/// while logging only times the base call.
#[derive(Clone)]
pub struct Pipeline {
    metrics: ServiceMetrics,
}

impl Pipeline {
    pub fn new(metrics: ServiceMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.metrics
    }

    /// Wrap `base`. The result implements the same service trait.
    pub fn wrap<S>(&self, service: &'static str, base: S) -> Decorated<S> {
        ServiceBuilder::new()
            .layer(ObserveLayer::new(self.metrics.observer(service)))
            .layer(ObserveLayer::new(CallLogger::new(service)))
            .service(base)
    }
}
