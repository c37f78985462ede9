//! Helpers for web request/response plumbing: cookie lookup, construction and
//! removal, cache and redirect headers, JSON bodies, and logging listeners for
//! context and session attributes.

pub mod config;
pub mod context;
pub mod cookies;
pub mod errors;
pub mod listener;
pub mod net;

pub use errors::WebError;
