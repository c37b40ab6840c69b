//! Structured call logging.

use std::time::Duration;

use super::observer::{Observed, Observer, Outcome};

/// Emits one `tracing` event per completed call.
#[derive(Debug, Clone, Copy)]
pub struct CallLogger {
    service: &'static str,
}

impl CallLogger {
    pub fn new(service: &'static str) -> Self {
        Self { service }
    }
}

impl Observer for CallLogger {
    fn record(&self, method: &'static str, outcome: &Outcome, elapsed: Duration) {
        let took_secs = elapsed.as_secs_f64();
        match outcome.error() {
            None => tracing::info!(service = self.service, method, took_secs, "call completed"),
            Some(error) => {
                tracing::info!(service = self.service, method, error, took_secs, "call completed")
            }
        }
    }
}

/// A service wrapped with call logging.
pub type Logging<S> = Observed<S, CallLogger>;
