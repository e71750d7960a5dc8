//! HTTP transport for the geodetic monument registry.
//!
//! # Responsibility
//! - Map registry and ledger use-cases onto JSON endpoints.
//! - Wrap every outcome, success or failure, in one response envelope.
//!
//! # Invariants
//! - Each request owns exactly one storage session, opened on a blocking
//!   worker and dropped when the request finishes.
//! - Failures never escape as bare transport errors.

pub mod config;
pub mod envelope;
pub mod server;

pub use config::{ApiConfig, ConfigError};
pub use envelope::{ApiError, ErrorKind, NetworkResponse, ResponseStatus};
pub use server::state::AppState;
pub use server::{create_app, run_server};
