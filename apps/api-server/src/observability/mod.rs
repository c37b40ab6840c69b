//! Observability module - request ids and per-request context.

mod request_id;

pub use request_id::{CallContext, RequestIdMiddleware};
