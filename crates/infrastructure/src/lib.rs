//! Infrastructure layer - adapters for the portal backend and local storage
//!
//! Implements the ports defined in the application layer, loads
//! configuration and sets up logging.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, SessionConfig};
pub use persistence::FileSessionStore;
pub use telemetry::{TelemetryConfig, TelemetryError, init_logging, log_filter_from_verbosity};
