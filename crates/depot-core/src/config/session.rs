//! Session lifetime and sweep configuration.

use serde::{Deserialize, Serialize};

/// Session management configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Absolute session lifetime in hours. The expiry instant is fixed at
    /// login; there is no sliding renewal.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
    /// Interval for the expired-session sweep in minutes.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_minutes: u64,
}

impl SessionConfig {
    /// Session lifetime expressed in whole seconds (cookie `Max-Age`).
    pub fn ttl_seconds(&self) -> i64 {
        (self.ttl_hours * 3600) as i64
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            sweep_interval_minutes: default_sweep_interval(),
        }
    }
}

fn default_ttl_hours() -> u64 {
    24
}

fn default_sweep_interval() -> u64 {
    60
}
