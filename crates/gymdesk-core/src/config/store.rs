//! Schedule cache configuration.

use serde::{Deserialize, Serialize};

/// Schedule cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// How long a fetched schedule snapshot stays fresh, in seconds.
    /// Push events and mutations invalidate it sooner.
    #[serde(default = "default_freshness")]
    pub freshness_seconds: u64,
    /// TTL for the eligible-member roster cache, in seconds.
    #[serde(default = "default_roster_ttl")]
    pub roster_ttl_seconds: u64,
    /// Maximum number of trainer rosters kept in memory.
    #[serde(default = "default_roster_capacity")]
    pub roster_max_capacity: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            freshness_seconds: default_freshness(),
            roster_ttl_seconds: default_roster_ttl(),
            roster_max_capacity: default_roster_capacity(),
        }
    }
}

fn default_freshness() -> u64 {
    180
}

fn default_roster_ttl() -> u64 {
    120
}

fn default_roster_capacity() -> u64 {
    1024
}
