//! Backend gateway configuration.

use serde::{Deserialize, Serialize};

/// REST backend gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the backend API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token presented on every request, if any.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Per-request timeout in seconds. A stalled mutation is treated as a
    /// failure once this elapses, never as a success.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    10
}
