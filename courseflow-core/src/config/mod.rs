//! Configuration types for Courseflow.
//!
//! These types represent the validated runtime configuration used by the server
//! and can be shared across crates. The actual config loading/parsing is handled
//! by the server crate.

mod admin;
mod checkout;

pub use admin::AdminConfig;
pub use checkout::CheckoutConfig;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Where the HTTP API listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
}

/// Shared configuration state with separate locks for each section.
///
/// This allows independent access to different configuration sections
/// without blocking other readers/writers.
#[derive(Clone)]
pub struct SharedConfig {
    /// Server configuration (listen address, etc.).
    pub server: Arc<RwLock<ServerConfig>>,
    /// Admin configuration (authentication).
    pub admin: Arc<RwLock<AdminConfig>>,
    /// Checkout session lifetime.
    pub checkout: Arc<RwLock<CheckoutConfig>>,
}

impl SharedConfig {
    /// Create a new SharedConfig from individual configuration parts.
    pub fn new(server: ServerConfig, admin: AdminConfig, checkout: CheckoutConfig) -> Self {
        Self {
            server: Arc::new(RwLock::new(server)),
            admin: Arc::new(RwLock::new(admin)),
            checkout: Arc::new(RwLock::new(checkout)),
        }
    }

    /// Update all configuration sections at once.
    pub async fn update_all(
        &self,
        server: ServerConfig,
        admin: AdminConfig,
        checkout: CheckoutConfig,
    ) {
        // Update in sequence to avoid potential deadlocks
        *self.server.write().await = server;
        *self.admin.write().await = admin;
        *self.checkout.write().await = checkout;
    }
}
