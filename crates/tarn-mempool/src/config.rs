//! Pool configuration.
//!
//! Plain struct with defaults, deserializable so a node config file can
//! embed a `[mempool]` section. Construct programmatically or via serde.

use serde::Deserialize;

use tarn_core::constants::DUST_LIMIT;

/// Configuration for a pool instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MempoolConfig {
    /// Dust threshold for the default replacement policy, in tarns.
    pub dust_limit: u64,
}

impl Default for MempoolConfig {
    fn default() -> Self {
        Self { dust_limit: DUST_LIMIT }
    }
}
