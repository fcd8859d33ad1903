//! Checkout session configuration.

use std::time::Duration;

/// How long checkout sessions live in memory and how often they are swept.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Sessions idle for this long are dropped by the sweeper.
    pub session_ttl: Duration,
    /// Interval between sweeps.
    pub sweep_interval: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(60 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}
