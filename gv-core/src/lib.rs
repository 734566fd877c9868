//! gvoice core - foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the other gvoice crates:
//! - Application configuration (credentials, forwarding phone, service URLs)
//! - Global error type covering every failure the client can raise
//! - Structured logging with tracing
//! - Platform directories
//! - Service endpoints and other constants

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod platform;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use constants::Endpoints;
pub use error::{GvError, GvResult};
pub use logging::init_logging;
pub use platform::Platform;
