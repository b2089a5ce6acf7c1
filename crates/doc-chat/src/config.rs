//! Configuration for the chat service

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::generation::ContextBudget;

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Completion API configuration
    pub llm: LlmConfig,
    /// Context assembly configuration
    pub context: ContextConfig,
    /// Upload spooling configuration
    pub uploads: UploadConfig,
    /// Context store backend
    pub store: StoreConfig,
}

impl ChatConfig {
    /// Load configuration from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from TOML text; missing sections take their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::Config(format!("Invalid configuration: {}", e)))
    }

    /// Apply environment overrides using the given lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("OPENAI_API_KEY").filter(|k| !k.is_empty()) {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = lookup("OPENAI_BASE_URL").filter(|u| !u.is_empty()) {
            self.llm.base_url = url;
        }
        if let Some(model) = lookup("DOC_CHAT_MODEL").filter(|m| !m.is_empty()) {
            self.llm.model = model;
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Origin allowed by CORS ("*" allows any)
    pub allowed_origin: String,
    /// Maximum upload size in bytes (default: 25MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5001,
            allowed_origin: "http://localhost:3000".to_string(),
            max_upload_size: 25 * 1024 * 1024, // 25MB
        }
    }
}

/// Completion API configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Bearer token; usually supplied through OPENAI_API_KEY
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model identifier sent with every request
    pub model: String,
    /// System instruction sent as the first turn
    pub system_prompt: String,
    /// Request timeout in seconds; no timeout when unset
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-5-mini".to_string(),
            system_prompt: default_system_prompt(),
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_system_prompt() -> String {
    "You are an intelligent AI assistant.".to_string()
}

/// Context assembly configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// How much stored context is sent with each question
    pub budget: ContextBudget,
}

/// Upload spooling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory that holds uploads while their text is extracted
    pub dir: PathBuf,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: std::env::temp_dir().join("doc-chat-uploads"),
        }
    }
}

/// Context store backend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Process-lifetime, in-memory lists
    #[default]
    Memory,
    /// In-memory lists mirrored to a JSON file after every append
    JsonFile {
        /// File holding the store
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ChatConfig::default();
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.llm.model, "gpt-5-mini");
        assert_eq!(config.llm.system_prompt, "You are an intelligent AI assistant.");
        assert!(config.llm.timeout_secs.is_none());
        assert_eq!(config.context.budget, ContextBudget::Unbounded);
        assert_eq!(config.store, StoreConfig::Memory);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ChatConfig::from_toml_str(
            r#"
            [server]
            port = 8080

            [context.budget]
            strategy = "recent_exchanges"
            max_exchanges = 5

            [store]
            backend = "json_file"
            path = "/var/lib/doc-chat/store.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(
            config.context.budget,
            ContextBudget::RecentExchanges { max_exchanges: 5 }
        );
        assert_eq!(
            config.store,
            StoreConfig::JsonFile {
                path: PathBuf::from("/var/lib/doc-chat/store.json")
            }
        );
        assert_eq!(config.llm.model, "gpt-5-mini");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = ChatConfig::from_toml_str("[server]\nport = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("OPENAI_API_KEY", "sk-test"),
            ("DOC_CHAT_MODEL", "gpt-4o-mini"),
            ("OPENAI_BASE_URL", ""),
        ]
        .into_iter()
        .collect();

        let mut config = ChatConfig::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_api_key_is_redacted() {
        let mut config = LlmConfig::default();
        config.api_key = Some("sk-secret".to_string());
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
