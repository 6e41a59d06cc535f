//! Tracing subscriber setup
//!
//! Console logging through `tracing-subscriber`, human-readable or JSON.

mod logging;

pub use logging::{TelemetryConfig, TelemetryError, init_logging, log_filter_from_verbosity};
