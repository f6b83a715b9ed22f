//! HabitForge Configuration Management
//!
//! Handles configuration from environment variables and TOML config files
//! with sensible defaults for development.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// External language services
    pub services: ServiceConfig,

    /// Extraction engine settings
    pub extraction: ExtractionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Server
        if let Ok(host) = std::env::var("API_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("API_PORT") {
            config.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "API_PORT".to_string(),
                value: port,
            })?;
        }

        // CORS origins from environment variable (comma-separated)
        if let Ok(origins) = std::env::var("CORS_ORIGINS") {
            config.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Language services
        if let Ok(url) = std::env::var("ANNOTATION_URL") {
            config.services.annotation_url = url;
        }
        if let Ok(url) = std::env::var("NER_URL") {
            config.services.ner_url = url;
        }
        if let Ok(url) = std::env::var("LANGID_URL") {
            config.services.langid_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if let Ok(secs) = std::env::var("NLP_TIMEOUT_SECS") {
            config.services.timeout_secs =
                secs.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "NLP_TIMEOUT_SECS".to_string(),
                    value: secs,
                })?;
        }

        // Extraction
        if let Ok(language) = std::env::var("DEFAULT_LANGUAGE") {
            config.extraction.default_language = language.to_lowercase();
        }

        // Logging
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = std::env::var("LOG_JSON") {
            config.logging.json_format = matches!(json.as_str(), "1" | "true" | "yes");
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Merge with environment variables (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        let env_config = Self::from_env()?;
        let defaults = Self::default();

        // Only override if env values differ from defaults
        if env_config.server.host != defaults.server.host {
            self.server.host = env_config.server.host;
        }
        if env_config.server.port != defaults.server.port {
            self.server.port = env_config.server.port;
        }
        if !env_config.server.cors_origins.is_empty() {
            self.server.cors_origins = env_config.server.cors_origins;
        }
        if env_config.services.annotation_url != defaults.services.annotation_url {
            self.services.annotation_url = env_config.services.annotation_url;
        }
        if env_config.services.ner_url != defaults.services.ner_url {
            self.services.ner_url = env_config.services.ner_url;
        }
        if env_config.services.langid_url.is_some() {
            self.services.langid_url = env_config.services.langid_url;
        }
        if env_config.services.timeout_secs != defaults.services.timeout_secs {
            self.services.timeout_secs = env_config.services.timeout_secs;
        }
        if env_config.extraction.default_language != defaults.extraction.default_language {
            self.extraction.default_language = env_config.extraction.default_language;
        }
        if env_config.logging.level != defaults.logging.level {
            self.logging.level = env_config.logging.level;
        }
        if env_config.logging.json_format {
            self.logging.json_format = true;
        }

        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.services.annotation_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired("services.annotation_url".to_string()));
        }
        if self.services.ner_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired("services.ner_url".to_string()));
        }
        if self.extraction.default_language.len() != 2 {
            return Err(ConfigError::InvalidValue {
                key: "extraction.default_language".to_string(),
                value: self.extraction.default_language.clone(),
            });
        }
        Ok(())
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Enable CORS
    pub cors_enabled: bool,

    /// Allowed origins for CORS
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_secs: 30,
            cors_enabled: true,
            // Empty by default - set via CORS_ORIGINS env var
            cors_origins: vec![],
        }
    }
}

/// External language service endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the linguistic annotation service
    pub annotation_url: String,

    /// Base URL of the NER service
    pub ner_url: String,

    /// Base URL of the language identification service (none = fixed default language)
    pub langid_url: Option<String>,

    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            annotation_url: "http://localhost:5001".to_string(),
            ner_url: "http://localhost:5001".to_string(),
            langid_url: None,
            timeout_secs: 10,
        }
    }
}

/// Extraction engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Language assumed when identification fails
    pub default_language: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
