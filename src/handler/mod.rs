//! Request handler module
//!
//! Responsible for request entry, the SPA fallback policy and dispatch into
//! the bundled asset tree.

pub mod router;
pub mod spa;

// Re-export main entry point
pub use router::handle_request;
pub use spa::SpaHandler;
