//! Frequency resolution
//!
//! Two tiers, first match wins:
//! 1. Regex tier - the ordered [`FrequencyRule`](crate::tables::FrequencyRule)
//!    list is applied to the sentence surface.
//! 2. Lexicon tier - single keywords (`daily`, `settimanalmente`, ...).

use habit_core::{Frequency, FrequencyResult, Sentence};
use tracing::debug;

use crate::tables::{LanguageTables, KEYWORD_CONFIDENCE};

/// Which tier produced a frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyTier {
    Pattern(&'static str),
    Keyword,
}

/// Resolve the repetition count and period of a sentence
pub fn resolve_frequency(sentence: &Sentence, tables: &LanguageTables) -> FrequencyResult {
    match resolve_with_tier(sentence, tables) {
        Some((frequency, confidence, tier)) => {
            debug!(
                count = frequency.count,
                period_days = frequency.period_days,
                ?tier,
                "frequency resolved"
            );
            FrequencyResult::found(frequency, confidence)
        }
        None => FrequencyResult::none(),
    }
}

/// Same as [`resolve_frequency`] but reports the tier that matched
pub fn resolve_with_tier(
    sentence: &Sentence,
    tables: &LanguageTables,
) -> Option<(Frequency, f32, FrequencyTier)> {
    if !sentence.has_tokens() {
        return None;
    }

    match_patterns(sentence, tables).or_else(|| match_keywords(sentence, tables))
}

fn match_patterns(
    sentence: &Sentence,
    tables: &LanguageTables,
) -> Option<(Frequency, f32, FrequencyTier)> {
    let surface = sentence.surface();
    tables.frequency_rules.iter().find_map(|rule| {
        rule.apply(&surface, tables)
            .map(|frequency| (frequency, rule.confidence, FrequencyTier::Pattern(rule.name)))
    })
}

fn match_keywords(
    sentence: &Sentence,
    tables: &LanguageTables,
) -> Option<(Frequency, f32, FrequencyTier)> {
    sentence.tokens.iter().find_map(|token| {
        tables
            .keyword_frequency(&token.lower())
            .map(|frequency| (frequency, KEYWORD_CONFIDENCE, FrequencyTier::Keyword))
    })
}
