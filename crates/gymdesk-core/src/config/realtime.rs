//! Push-event transport configuration.

use serde::{Deserialize, Serialize};

/// Push-event (WebSocket) transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// WebSocket URL of the push-event stream.
    #[serde(default = "default_url")]
    pub url: String,
    /// Internal channel buffer size for delivered frames.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Initial reconnect backoff in milliseconds.
    #[serde(default = "default_reconnect_initial")]
    pub reconnect_initial_ms: u64,
    /// Maximum reconnect backoff in milliseconds.
    #[serde(default = "default_reconnect_max")]
    pub reconnect_max_ms: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            channel_buffer_size: default_channel_buffer(),
            reconnect_initial_ms: default_reconnect_initial(),
            reconnect_max_ms: default_reconnect_max(),
        }
    }
}

fn default_url() -> String {
    "ws://localhost:8080/ws/schedule".to_string()
}

fn default_channel_buffer() -> usize {
    256
}

fn default_reconnect_initial() -> u64 {
    500
}

fn default_reconnect_max() -> u64 {
    30_000
}
