//! Adapters implementing the application ports

mod portal_adapter;
mod session_adapter;

pub use portal_adapter::{PortalAdapter, map_api_error, query_keys};
pub use session_adapter::SessionAdapter;
