//! Workflow engine (document analysis webhook) configuration.

use serde::{Deserialize, Serialize};

/// Analysis runs an LLM pipeline; allow it time.
const fn default_timeout_secs() -> u64 {
    120
}

/// Inline text cap for plain-text uploads, in characters.
const fn default_max_text_chars() -> usize {
    50_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Webhook URL that receives documents for analysis.
    #[serde(default)]
    pub webhook_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            timeout_secs: default_timeout_secs(),
            max_text_chars: default_max_text_chars(),
        }
    }
}

impl WorkflowConfig {
    pub fn is_configured(&self) -> bool {
        !self.webhook_url.is_empty()
    }
}
