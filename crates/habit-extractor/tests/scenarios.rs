//! End-to-end extraction scenarios
//!
//! The language services are replaced by stubs that replay spaCy-style
//! annotations for known sentences.
//!
//! Author: hephaex@gmail.com

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use habit_core::{
    Annotator, EntityRecognizer, HabitError, LanguageIdentifier, QuantityCategory, RawEntity,
    RawToken, Result,
};
use habit_extractor::{AnnotationAdapter, HabitExtractor, HabitPipeline};

fn t(text: &str, lemma: &str, pos: &str, dep: &str, head: usize) -> RawToken {
    RawToken {
        text: text.to_string(),
        lemma: lemma.to_string(),
        pos: pos.to_string(),
        dep: dep.to_string(),
        head,
        idx: 0,
    }
}

const MEDITATE: &str = "I plan to meditate every morning for 10 minutes.";
const EXERCISE: &str = "Desidero fare esercizio fisico tre volte alla settimana.";
const WATER: &str = "Intendo bere 2 litri d'acqua ogni giorno.";
const GYM: &str = "I want to go to the gym three times a week.";
const VOLUNTEER: &str = "Volunteer at the Red Cross monthly.";

fn annotations() -> HashMap<&'static str, Vec<RawToken>> {
    let mut map = HashMap::new();
    map.insert(
        MEDITATE,
        vec![
            t("I", "I", "PRON", "nsubj", 1),
            t("plan", "plan", "VERB", "ROOT", 1),
            t("to", "to", "PART", "aux", 3),
            t("meditate", "meditate", "VERB", "xcomp", 1),
            t("every", "every", "DET", "det", 5),
            t("morning", "morning", "NOUN", "npadvmod", 3),
            t("for", "for", "ADP", "prep", 3),
            t("10", "10", "NUM", "nummod", 8),
            t("minutes", "minute", "NOUN", "pobj", 6),
            t(".", ".", "PUNCT", "punct", 1),
        ],
    );
    map.insert(
        EXERCISE,
        vec![
            t("Desidero", "desiderare", "VERB", "ROOT", 0),
            t("fare", "fare", "VERB", "xcomp", 0),
            t("esercizio", "esercizio", "NOUN", "obj", 1),
            t("fisico", "fisico", "ADJ", "amod", 2),
            t("tre", "tre", "NUM", "nummod", 5),
            t("volte", "volta", "NOUN", "obl", 1),
            t("alla", "a il", "ADP", "case", 7),
            t("settimana", "settimana", "NOUN", "nmod", 5),
            t(".", ".", "PUNCT", "punct", 0),
        ],
    );
    map.insert(
        WATER,
        vec![
            t("Intendo", "intendere", "VERB", "ROOT", 0),
            t("bere", "bere", "VERB", "xcomp", 0),
            t("2", "2", "NUM", "nummod", 3),
            t("litri", "litro", "NOUN", "obj", 1),
            t("d'", "di", "ADP", "case", 5),
            t("acqua", "acqua", "NOUN", "nmod", 3),
            t("ogni", "ogni", "DET", "det", 7),
            t("giorno", "giorno", "NOUN", "obl", 1),
            t(".", ".", "PUNCT", "punct", 0),
        ],
    );
    map.insert(
        GYM,
        vec![
            t("I", "I", "PRON", "nsubj", 1),
            t("want", "want", "VERB", "ROOT", 1),
            t("to", "to", "PART", "aux", 3),
            t("go", "go", "VERB", "xcomp", 1),
            t("to", "to", "ADP", "prep", 3),
            t("the", "the", "DET", "det", 6),
            t("gym", "gym", "NOUN", "pobj", 4),
            t("three", "three", "NUM", "nummod", 8),
            t("times", "time", "NOUN", "npadvmod", 3),
            t("a", "a", "DET", "det", 10),
            t("week", "week", "NOUN", "npadvmod", 8),
            t(".", ".", "PUNCT", "punct", 1),
        ],
    );
    map.insert(
        VOLUNTEER,
        vec![
            t("Volunteer", "volunteer", "VERB", "ROOT", 0),
            t("at", "at", "ADP", "prep", 0),
            t("the", "the", "DET", "det", 4),
            t("Red", "Red", "PROPN", "compound", 4),
            t("Cross", "Cross", "PROPN", "pobj", 1),
            t("monthly", "monthly", "ADV", "advmod", 0),
            t(".", ".", "PUNCT", "punct", 0),
        ],
    );
    map
}

/// Replays canned annotations; unknown sentences fail like an offline service
struct StubAnnotator {
    sentences: HashMap<&'static str, Vec<RawToken>>,
}

#[async_trait]
impl Annotator for StubAnnotator {
    async fn annotate(&self, text: &str, _language: &str) -> Result<Vec<RawToken>> {
        self.sentences
            .get(text)
            .cloned()
            .ok_or_else(|| HabitError::AnnotationUnavailable("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "stub-annotator"
    }
}

struct StubRecognizer {
    fail: bool,
}

#[async_trait]
impl EntityRecognizer for StubRecognizer {
    async fn recognize(&self, text: &str, _language: &str) -> Result<Vec<RawEntity>> {
        if self.fail {
            return Err(HabitError::AnnotationUnavailable("ner offline".to_string()));
        }
        if text == MEDITATE {
            return Ok(vec![RawEntity {
                label: "TIME".to_string(),
                text: "every morning".to_string(),
                score: Some(0.85),
                start_char: 19,
                end_char: 32,
            }]);
        }
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "stub-ner"
    }
}

/// Italian when the sentence contains an Italian marker word
struct StubIdentifier;

#[async_trait]
impl LanguageIdentifier for StubIdentifier {
    async fn identify(&self, text: &str) -> Result<String> {
        let italian = ["desidero", "intendo", "voglio"]
            .iter()
            .any(|w| text.to_lowercase().contains(w));
        Ok(if italian { "it" } else { "en" }.to_string())
    }
}

fn pipeline_with(ner_fails: bool) -> HabitPipeline {
    let adapter = AnnotationAdapter::new(
        Arc::new(StubAnnotator {
            sentences: annotations(),
        }),
        Arc::new(StubRecognizer { fail: ner_fails }),
    )
    .with_identifier(Arc::new(StubIdentifier));

    HabitPipeline::new(adapter, Arc::new(HabitExtractor::new()))
}

fn pipeline() -> HabitPipeline {
    pipeline_with(false)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

#[tokio::test]
async fn test_meditate_every_morning() {
    let record = pipeline().extract(MEDITATE).await.unwrap();

    assert_eq!(record.language, "en");
    assert_eq!(record.action.as_deref(), Some("meditate"));
    assert!(approx(record.action_confidence, 0.6));

    let quantity = record.main_quantity.clone().unwrap();
    assert_eq!(quantity.number, "10");
    assert_eq!(quantity.unit.as_deref(), Some("minutes"));
    assert_eq!(quantity.category, QuantityCategory::TimeOrQuantity);

    // "every morning" is neither a phrase pattern nor a keyword
    assert_eq!(record.frequency_count, None);
    assert_eq!(record.frequency_period, None);
    assert_eq!(record.frequency_confidence, 0.0);

    // TIME entities are reported but never used as a target
    assert_eq!(record.entities_detected.len(), 1);
    assert_eq!(record.target, None);
    assert!(approx(record.overall_confidence, 0.3));
}

#[tokio::test]
async fn test_italian_times_per_week() {
    let record = pipeline().extract(EXERCISE).await.unwrap();

    assert_eq!(record.language, "it");
    assert_eq!(record.frequency_count, Some(3));
    assert_eq!(record.frequency_period, Some(7));
    assert!(approx(record.frequency_confidence, 0.9));
    assert_eq!(record.action.as_deref(), Some("fare"));
    assert_eq!(record.target.as_deref(), Some("esercizio"));
}

#[tokio::test]
async fn test_italian_daily_water() {
    let record = pipeline().extract(WATER).await.unwrap();

    let quantity = record.main_quantity.clone().unwrap();
    assert_eq!(quantity.number, "2");
    assert_eq!(quantity.unit.as_deref(), Some("litri"));
    assert_eq!(quantity.category, QuantityCategory::PhysicalMeasure);

    assert_eq!(record.frequency_count, Some(7));
    assert_eq!(record.frequency_period, Some(7));
    assert!(approx(record.frequency_confidence, 0.8));
    assert_eq!(record.action.as_deref(), Some("bere"));
}

#[tokio::test]
async fn test_english_gym_three_times_a_week() {
    let record = pipeline().extract(GYM).await.unwrap();

    assert_eq!(record.action.as_deref(), Some("go"));
    assert_eq!(record.target.as_deref(), Some("gym"));
    assert_eq!(record.frequency_count, Some(3));
    assert_eq!(record.frequency_period, Some(7));
    assert!(approx(record.frequency_confidence, 0.9));
    assert_eq!(record.quantities[0].number, "three");
    assert_eq!(record.quantities[0].category, QuantityCategory::TimeOrQuantity);
}

#[tokio::test]
async fn test_prepositional_target_and_monthly() {
    let record = pipeline().extract(VOLUNTEER).await.unwrap();

    assert_eq!(record.action.as_deref(), Some("volunteer"));
    assert_eq!(record.target.as_deref(), Some("Cross"));
    assert_eq!(record.frequency_count, Some(1));
    assert_eq!(record.frequency_period, Some(30));
}

#[tokio::test]
async fn test_annotation_failure_yields_empty_record() {
    let record = pipeline()
        .extract("This sentence is unknown to the annotator.")
        .await
        .unwrap();

    assert_eq!(record.action, None);
    assert_eq!(record.action_confidence, 0.0);
    assert!(record.quantities.is_empty());
    assert_eq!(record.main_quantity, None);
    assert_eq!(record.target, None);
    assert_eq!(record.frequency_count, None);
    assert_eq!(record.frequency_period, None);
    assert_eq!(record.frequency_confidence, 0.0);
    assert!(record.entities_detected.is_empty());
    assert_eq!(record.overall_confidence, 0.0);
}

#[tokio::test]
async fn test_ner_failure_does_not_block_syntax() {
    let record = pipeline_with(true).extract(MEDITATE).await.unwrap();

    assert_eq!(record.action.as_deref(), Some("meditate"));
    assert!(record.entities_detected.is_empty());
}

#[tokio::test]
async fn test_empty_input_rejected() {
    let err = pipeline().extract("   ").await.unwrap_err();
    assert!(matches!(err, HabitError::EmptyInput));
}

#[tokio::test]
async fn test_language_override() {
    // Forced to English tables: "ogni giorno" is no longer a daily phrase
    let record = pipeline()
        .extract_with_language(WATER, Some("en"))
        .await
        .unwrap();

    assert_eq!(record.language, "en");
    assert_eq!(record.frequency_count, None);
    // Italian modals are excluded even with English tables
    assert_eq!(record.action.as_deref(), Some("bere"));
    assert!(approx(record.action_confidence, 0.8));
}

#[tokio::test]
async fn test_source_text_is_kept_verbatim() {
    let padded = "  Run daily \n";
    let record = pipeline().extract(padded).await.unwrap();

    assert_eq!(record.source_text, padded);
}

#[tokio::test]
async fn test_extract_is_idempotent() {
    let pipeline = pipeline();
    for text in [MEDITATE, EXERCISE, WATER, GYM, VOLUNTEER] {
        let first = pipeline.extract(text).await.unwrap();
        let second = pipeline.extract(text).await.unwrap();
        assert_eq!(first, second);
    }
}

#[tokio::test]
async fn test_concurrent_requests_share_pipeline() {
    let pipeline = Arc::new(pipeline());

    let handles: Vec<_> = [MEDITATE, EXERCISE, WATER, GYM]
        .into_iter()
        .map(|text| {
            let pipeline = pipeline.clone();
            tokio::spawn(async move { pipeline.extract(text).await })
        })
        .collect();

    for handle in handles {
        let record = handle.await.unwrap().unwrap();
        assert!(record.action.is_some());
    }
}
