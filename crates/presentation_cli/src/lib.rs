//! Alumni portal command-line client
//!
//! Argument parsing, wiring of the application services and plain-text
//! rendering of their outcomes.

pub mod app;
pub mod cli;
pub mod render;

pub use app::{App, Report};
pub use cli::{Cli, Commands};
