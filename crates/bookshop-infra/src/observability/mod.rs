//! Service observability: a generic wrapper that forwards every service
//! method through an [`Observer`], and the logging and metrics observers
//! composed by [`Pipeline`].

mod logging;
mod metrics;
mod observer;
mod pipeline;
mod services;

pub use logging::{CallLogger, Logging};
pub use metrics::{CallMetrics, Metrics, ServiceMetrics};
pub use observer::{ObserveLayer, Observed, Observer, Outcome};
pub use pipeline::{Decorated, Pipeline};
