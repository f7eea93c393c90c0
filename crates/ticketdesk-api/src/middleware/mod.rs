//! Middleware for cross-origin access and request tracing

pub mod cors;
pub mod logging;
