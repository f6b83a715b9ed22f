//! Habit extraction engine
//!
//! [`HabitExtractor`] is the aggregator: it picks the language tables for a
//! sentence, runs the individual extractors over it and merges their output
//! into a [`HabitRecord`].

use habit_core::{HabitRecord, Sentence};
use tracing::debug;

use crate::action::select_action;
use crate::frequency::resolve_frequency;
use crate::quantity::extract_quantities;
use crate::tables::TableSet;
use crate::target::resolve_target;

/// Deterministic extraction over one annotated sentence
///
/// Holds only immutable lookup tables, so a single instance can be shared
/// across any number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct HabitExtractor {
    tables: TableSet,
}

impl HabitExtractor {
    /// Create an extractor with the built-in English and Italian tables
    pub fn new() -> Self {
        Self {
            tables: TableSet::new(),
        }
    }

    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    /// Extract a habit record from an annotated sentence
    pub fn extract(&self, sentence: &Sentence) -> HabitRecord {
        let mut record = HabitRecord::empty(&sentence.text, &sentence.language);
        record.entities_detected = sentence.entities.clone();

        if !sentence.has_tokens() {
            debug!(language = %sentence.language, "no tokens, nothing to extract");
            return record;
        }

        if !self.tables.supports(&sentence.language) {
            debug!(language = %sentence.language, "unsupported language, using English tables");
        }
        let tables = self.tables.for_language(&sentence.language);

        let quantities = extract_quantities(sentence, tables);
        let frequency = resolve_frequency(sentence, tables);
        let action = select_action(sentence, tables);
        let target = resolve_target(sentence, tables);

        record.action_confidence = action.as_ref().map_or(0.0, |a| a.score);
        record.action = action.map(|a| a.verb_lemma);
        record.main_quantity = quantities.first().cloned();
        record.quantities = quantities;
        record.target = target;
        record.frequency_count = frequency.count();
        record.frequency_period = frequency.period();
        record.frequency_confidence = frequency.confidence;
        record.overall_confidence = (record.action_confidence + record.frequency_confidence) / 2.0;

        record
    }
}
