//! HabitForge Core - Domain models, traits, and shared types
//!
//! This crate defines the core abstractions used throughout HabitForge:
//! - Annotated sentence models (tokens, entities, wire shapes)
//! - Habit record and intermediate extraction results
//! - Common error types
//! - Traits for the external language services
//! - Configuration management

pub mod annotation;
pub mod config;
pub mod record;

pub use annotation::{DepRole, Entity, EntityKind, PosTag, RawEntity, RawToken, Sentence, Token};
pub use config::{
    AppConfig, ConfigError, ExtractionConfig, LoggingConfig, ServerConfig, ServiceConfig,
};
pub use record::{
    ActionCandidate, Frequency, FrequencyResult, HabitRecord, QuantityCandidate, QuantityCategory,
};

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for HabitForge operations
#[derive(Error, Debug)]
pub enum HabitError {
    #[error("Input text is empty")]
    EmptyInput,

    #[error("Annotation unavailable: {0}")]
    AnnotationUnavailable(String),

    #[error("Language detection failed: {0}")]
    LanguageDetection(String),

    #[error("Invalid annotation: {0}")]
    InvalidAnnotation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, HabitError>;

// ============================================================================
// Traits
// ============================================================================

/// Language identification service
#[async_trait::async_trait]
pub trait LanguageIdentifier: Send + Sync {
    /// Identify the language of `text`, returning an ISO language code
    async fn identify(&self, text: &str) -> Result<String>;
}

/// Linguistic annotation service (tokens, POS, lemma, dependencies)
#[async_trait::async_trait]
pub trait Annotator: Send + Sync {
    /// Annotate `text`, returning tokens in surface order
    async fn annotate(&self, text: &str, language: &str) -> Result<Vec<RawToken>>;

    /// Service name for logging
    fn name(&self) -> &str;
}

/// Named-entity recognition service
#[async_trait::async_trait]
pub trait EntityRecognizer: Send + Sync {
    /// Recognize entities in `text`
    async fn recognize(&self, text: &str, language: &str) -> Result<Vec<RawEntity>>;

    /// Service name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================
