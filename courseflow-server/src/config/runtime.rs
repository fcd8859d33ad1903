//! Runtime configuration re-exports.
//!
//! The validated config types live in `courseflow_core::config` so the
//! background processors can share them.

pub use courseflow_core::config::{AdminConfig, CheckoutConfig, ServerConfig, SharedConfig};
