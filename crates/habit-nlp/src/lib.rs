//! HabitForge NLP - Language service clients
//!
//! HTTP/JSON implementations of the `habit-core` service traits and the
//! factory that wires them into a ready-to-use [`HabitPipeline`].
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;
use std::time::Duration;

use habit_core::{AppConfig, Result};
use habit_extractor::{AnnotationAdapter, HabitExtractor, HabitPipeline};
use tracing::info;

pub mod client;
pub mod services;

pub use client::ServiceClient;
pub use services::{FixedLanguage, HttpAnnotator, HttpEntityRecognizer, HttpLanguageIdentifier};

// ============================================================================
// Factory functions
// ============================================================================

/// Create an annotation adapter backed by the configured HTTP services
///
/// Without a `langid_url` every request is treated as the configured
/// default language.
pub fn create_adapter(config: &AppConfig) -> Result<AnnotationAdapter> {
    let services = &config.services;
    let timeout = Duration::from_secs(services.timeout_secs);
    let default_language = config.extraction.default_language.clone();

    let annotator = HttpAnnotator::new(ServiceClient::new(&services.annotation_url, timeout)?);
    let recognizer = HttpEntityRecognizer::new(ServiceClient::new(&services.ner_url, timeout)?);

    let adapter = AnnotationAdapter::new(Arc::new(annotator), Arc::new(recognizer));
    let adapter = match &services.langid_url {
        Some(url) => adapter.with_identifier(Arc::new(HttpLanguageIdentifier::new(
            ServiceClient::new(url, timeout)?,
        ))),
        None => adapter.with_identifier(Arc::new(FixedLanguage::new(default_language.clone()))),
    };

    info!(
        annotation_url = %services.annotation_url,
        ner_url = %services.ner_url,
        langid_url = ?services.langid_url,
        timeout_secs = services.timeout_secs,
        "language services configured"
    );

    Ok(adapter.with_default_language(default_language))
}

/// Create the full extraction pipeline from config
pub fn create_pipeline(config: &AppConfig) -> Result<HabitPipeline> {
    let adapter = create_adapter(config)?;
    Ok(HabitPipeline::new(adapter, Arc::new(HabitExtractor::new())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_adapter_without_langid() {
        let mut config = AppConfig::default();
        config.extraction.default_language = "it".to_string();

        let adapter = create_adapter(&config).unwrap();
        assert_eq!(adapter.default_language(), "it");

        let detected = tokio_test::block_on(adapter.detect_language("Corro ogni giorno"));
        assert_eq!(detected, "it");
    }

    #[test]
    fn test_create_pipeline_with_langid() {
        let mut config = AppConfig::default();
        config.services.langid_url = Some("http://localhost:5002".to_string());

        let pipeline = create_pipeline(&config).unwrap();
        assert_eq!(pipeline.adapter().default_language(), "en");
    }
}
