//! HTTP listener configuration.

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    3000
}

fn default_app_url() -> String {
    String::from("http://localhost:3000")
}

/// Default cap on multipart upload size (25 MiB).
const fn default_max_upload_bytes() -> usize {
    25 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Public URL of the web app; used for invite links and billing redirects.
    #[serde(default = "default_app_url")]
    pub app_url: String,

    /// Maximum accepted request body for document uploads.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            app_url: default_app_url(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.app_url, "http://localhost:3000");
        assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);
    }
}
