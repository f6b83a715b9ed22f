//! Habit record and intermediate extraction results

use serde::{Deserialize, Serialize};

use crate::annotation::Entity;

// ============================================================================
// Quantities
// ============================================================================

/// Semantic category of a quantity's unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityCategory {
    PhysicalMeasure,
    TimeOrQuantity,
    Money,
    General,
    Unknown,
}

impl QuantityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhysicalMeasure => "physical_measure",
            Self::TimeOrQuantity => "time_or_quantity",
            Self::Money => "money",
            Self::General => "general",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for QuantityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A number found in the sentence together with its unit, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityCandidate {
    pub number: String,
    pub unit: Option<String>,
    pub category: QuantityCategory,
}

// ============================================================================
// Frequency
// ============================================================================

/// Repetition count over a period, always set together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frequency {
    pub count: u32,
    /// Period length in days (week = 7, month = 30)
    pub period_days: u32,
}

impl Frequency {
    /// Build a frequency; both values must be positive
    pub fn new(count: u32, period_days: u32) -> Option<Self> {
        (count > 0 && period_days > 0).then_some(Self { count, period_days })
    }
}

/// Outcome of frequency resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyResult {
    pub frequency: Option<Frequency>,
    pub confidence: f32,
}

impl FrequencyResult {
    pub fn none() -> Self {
        Self {
            frequency: None,
            confidence: 0.0,
        }
    }

    pub fn found(frequency: Frequency, confidence: f32) -> Self {
        Self {
            frequency: Some(frequency),
            confidence,
        }
    }

    pub fn count(&self) -> Option<u32> {
        self.frequency.map(|f| f.count)
    }

    pub fn period(&self) -> Option<u32> {
        self.frequency.map(|f| f.period_days)
    }
}

impl Default for FrequencyResult {
    fn default() -> Self {
        Self::none()
    }
}

// ============================================================================
// Action
// ============================================================================

/// A scored verb candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionCandidate {
    pub verb_lemma: String,
    /// Token index of the verb
    pub index: usize,
    /// Non-negative, unnormalized score
    pub score: f32,
}

// ============================================================================
// Habit Record
// ============================================================================

/// Final structured extraction result for one sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub source_text: String,
    pub language: String,
    pub action: Option<String>,
    pub action_confidence: f32,
    pub quantities: Vec<QuantityCandidate>,
    pub main_quantity: Option<QuantityCandidate>,
    pub target: Option<String>,
    pub frequency_count: Option<u32>,
    pub frequency_period: Option<u32>,
    pub frequency_confidence: f32,
    pub entities_detected: Vec<Entity>,
    pub overall_confidence: f32,
}

impl HabitRecord {
    /// Record with nothing extracted
    pub fn empty(source_text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            language: language.into(),
            action: None,
            action_confidence: 0.0,
            quantities: Vec::new(),
            main_quantity: None,
            target: None,
            frequency_count: None,
            frequency_period: None,
            frequency_confidence: 0.0,
            entities_detected: Vec::new(),
            overall_confidence: 0.0,
        }
    }

    /// Whether any habit field was extracted
    pub fn is_empty(&self) -> bool {
        self.action.is_none()
            && self.quantities.is_empty()
            && self.target.is_none()
            && self.frequency_count.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_requires_positive_values() {
        assert!(Frequency::new(3, 7).is_some());
        assert!(Frequency::new(0, 7).is_none());
        assert!(Frequency::new(1, 0).is_none());
    }

    #[test]
    fn test_frequency_result_pair() {
        let none = FrequencyResult::none();
        assert_eq!(none.count(), None);
        assert_eq!(none.period(), None);
        assert_eq!(none.confidence, 0.0);

        let weekly = FrequencyResult::found(Frequency::new(1, 7).unwrap(), 0.8);
        assert_eq!(weekly.count(), Some(1));
        assert_eq!(weekly.period(), Some(7));
    }

    #[test]
    fn test_quantity_category_serialization() {
        let json = serde_json::to_string(&QuantityCategory::TimeOrQuantity).unwrap();
        assert_eq!(json, "\"time_or_quantity\"");
        assert_eq!(QuantityCategory::PhysicalMeasure.to_string(), "physical_measure");
    }

    #[test]
    fn test_empty_record() {
        let record = HabitRecord::empty("text", "en");
        assert!(record.is_empty());
        assert_eq!(record.overall_confidence, 0.0);

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["action"].is_null());
        assert!(json["quantities"].as_array().unwrap().is_empty());
    }
}
