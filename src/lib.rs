//! Single-page application server
//!
//! Serves a frontend build embedded at compile time, falling back to the
//! application shell for client-side routes, with gzip compression and
//! baseline security headers on every response.

pub mod app;
pub mod assets;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod middleware;
pub mod server;
