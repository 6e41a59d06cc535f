//! Application layer - portal use cases
//!
//! Each service turns a page action into an [`Outcome`]: the notices to show
//! and where to navigate next. Backend access and session storage sit behind
//! the ports in [`ports`].

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, Rejection};
pub use ports::*;
pub use services::*;
