//! Inference endpoint configuration from TOML (`[provider]` section)

use serde::{Deserialize, Serialize};

/// OpenRouter-compatible endpoint settings
///
/// # Example
///
/// ```toml
/// [provider]
/// api_key_env = "OPENROUTER_API_KEY"
/// base_url = "https://openrouter.ai/api/v1"
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable name for the API key
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead)
    pub api_key: Option<String>,
    /// Base URL of the chat completions API
    pub base_url: String,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENROUTER_API_KEY".to_string(),
            api_key: None,
            base_url: "https://openrouter.ai/api/v1".to_string(),
            timeout_secs: 120,
        }
    }
}

impl FileProviderConfig {
    /// Direct key if set, otherwise the value of `api_key_env`
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .as_ref()
            .filter(|k| !k.trim().is_empty())
            .cloned()
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }
}
