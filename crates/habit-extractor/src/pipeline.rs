//! Extraction pipeline: raw text in, habit record out
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;

use habit_core::{HabitError, HabitRecord, Result};
use tracing::{info, instrument};

use crate::adapter::AnnotationAdapter;
use crate::engine::HabitExtractor;

/// Composes the annotation adapter with the extraction engine
pub struct HabitPipeline {
    adapter: AnnotationAdapter,
    extractor: Arc<HabitExtractor>,
}

impl HabitPipeline {
    pub fn new(adapter: AnnotationAdapter, extractor: Arc<HabitExtractor>) -> Self {
        Self { adapter, extractor }
    }

    pub fn adapter(&self) -> &AnnotationAdapter {
        &self.adapter
    }

    pub fn extractor(&self) -> &HabitExtractor {
        &self.extractor
    }

    /// Extract a habit record from `text`
    ///
    /// Only empty input is rejected; service failures degrade to a record
    /// with absent fields.
    pub async fn extract(&self, text: &str) -> Result<HabitRecord> {
        self.extract_with_language(text, None).await
    }

    /// Extract with an explicit language, skipping identification
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn extract_with_language(
        &self,
        text: &str,
        language: Option<&str>,
    ) -> Result<HabitRecord> {
        if text.trim().is_empty() {
            return Err(HabitError::EmptyInput);
        }

        let sentence = self.adapter.annotate(text, language).await;
        let record = self.extractor.extract(&sentence);

        info!(
            language = %record.language,
            action = ?record.action,
            frequency_count = ?record.frequency_count,
            confidence = record.overall_confidence,
            "habit extracted"
        );
        Ok(record)
    }
}
