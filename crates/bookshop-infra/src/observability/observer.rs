//! The generic wrapper every service decorator is built from.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// How a wrapped call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(String),
    /// The future was dropped before completing.
    Cancelled,
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        !matches!(self, Outcome::Success)
    }

    /// Error text for log fields, `None` on success.
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success => None,
            Outcome::Failure(e) => Some(e),
            Outcome::Cancelled => Some("cancelled"),
        }
    }
}

/// Cross-cutting behavior applied around a service call.
///
/// Implementors only provide [`Observer::record`]; [`Observer::observe`]
/// times the call and guarantees `record` runs exactly once, whether the
/// call returns `Ok`, returns `Err` or is dropped mid-flight. The result
/// passes through untouched.
pub trait Observer: Send + Sync {
    fn record(&self, method: &'static str, outcome: &Outcome, elapsed: Duration);

    fn observe<'a, F, T, E>(
        &'a self,
        method: &'static str,
        call: F,
    ) -> impl Future<Output = Result<T, E>> + Send + 'a
    where
        F: Future<Output = Result<T, E>> + Send + 'a,
        T: Send + 'a,
        E: Display + Send + 'a,
    {
        async move {
            let mut completion = Completion {
                observer: self,
                method,
                started: Instant::now(),
                outcome: Outcome::Cancelled,
            };

            let result = call.await;
            completion.outcome = match &result {
                Ok(_) => Outcome::Success,
                Err(e) => Outcome::Failure(e.to_string()),
            };
            result
        }
    }
}

/// Completion hook: reports to the observer when dropped.
struct Completion<'a, O: Observer + ?Sized> {
    observer: &'a O,
    method: &'static str,
    started: Instant,
    outcome: Outcome,
}

impl<O: Observer + ?Sized> Drop for Completion<'_, O> {
    fn drop(&mut self) {
        self.observer
            .record(self.method, &self.outcome, self.started.elapsed());
    }
}

/// A service wrapped by an observer. Implements every service trait the
/// inner service implements, forwarding each method through
/// [`Observer::observe`].
#[derive(Debug, Clone)]
pub struct Observed<S, O> {
    pub(crate) inner: S,
    pub(crate) observer: O,
}

impl<S, O> Observed<S, O> {
    pub fn new(inner: S, observer: O) -> Self {
        Self { inner, observer }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }
}

/// `tower` layer producing [`Observed`] wrappers, so decorators compose
/// with `ServiceBuilder`.
#[derive(Debug, Clone)]
pub struct ObserveLayer<O> {
    observer: O,
}

impl<O> ObserveLayer<O> {
    pub fn new(observer: O) -> Self {
        Self { observer }
    }
}

impl<S, O: Clone> tower::Layer<S> for ObserveLayer<O> {
    type Service = Observed<S, O>;

    fn layer(&self, inner: S) -> Self::Service {
        Observed::new(inner, self.observer.clone())
    }
}
