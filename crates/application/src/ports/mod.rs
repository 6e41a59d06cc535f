//! Port definitions for application layer
//!
//! Adapters in the infrastructure layer implement these ports.

mod portal_port;
mod session_port;

#[cfg(test)]
pub use portal_port::MockPortalPort;
pub use portal_port::PortalPort;
#[cfg(test)]
pub use session_port::MockSessionPort;
pub use session_port::SessionPort;
