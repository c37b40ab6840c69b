//! # Bookshop Core
//!
//! The domain layer of the bookshop backend.
//! Accounts, claims, catalog and orders, the ports that infrastructure must
//! implement, and the services that orchestrate them.

pub mod context;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use context::RequestContext;
pub use error::{DomainError, RepoError};
