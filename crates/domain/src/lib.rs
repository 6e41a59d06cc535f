//! Domain layer for the alumni portal client
//!
//! Value objects, backend payloads, admin statistics shaping, client-side
//! routes and user notices. Pure data and rules; no I/O.

pub mod countdown;
pub mod entities;
pub mod errors;
pub mod navigation;
pub mod notice;
mod validation;
pub mod value_objects;

pub use countdown::Countdown;
pub use entities::*;
pub use errors::DomainError;
pub use navigation::{Route, RouteGuard};
pub use notice::{Notice, NoticeLevel};
pub use value_objects::*;
