//! Annotation adapter
//!
//! Calls the external language services and normalizes their output into a
//! [`Sentence`]. A failing or malformed service result never aborts the
//! request: it is logged and replaced by an empty token or entity list.
//!
//! Author: hephaex@gmail.com

use std::sync::Arc;

use habit_core::{
    Annotator, DepRole, Entity, EntityKind, EntityRecognizer, HabitError, LanguageIdentifier,
    PosTag, RawEntity, RawToken, Result, Sentence, Token,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Builds annotated sentences from raw text
pub struct AnnotationAdapter {
    identifier: Option<Arc<dyn LanguageIdentifier>>,
    annotator: Arc<dyn Annotator>,
    recognizer: Arc<dyn EntityRecognizer>,
    default_language: String,
}

impl AnnotationAdapter {
    /// Create an adapter without language identification (default language is `en`)
    pub fn new(annotator: Arc<dyn Annotator>, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            identifier: None,
            annotator,
            recognizer,
            default_language: "en".to_string(),
        }
    }

    /// Enable language identification
    pub fn with_identifier(mut self, identifier: Arc<dyn LanguageIdentifier>) -> Self {
        self.identifier = Some(identifier);
        self
    }

    /// Language used when identification is unavailable or fails
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = normalize_language(&language.into(), "en");
        self
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Identify the language of `text`, falling back to the default code
    pub async fn detect_language(&self, text: &str) -> String {
        let Some(identifier) = &self.identifier else {
            return self.default_language.clone();
        };

        match identifier.identify(text).await {
            Ok(code) => normalize_language(&code, &self.default_language),
            Err(e) => {
                warn!(error = %e, "language identification failed, using default");
                self.default_language.clone()
            }
        }
    }

    /// Annotate `text`; a language hint skips identification
    pub async fn annotate(&self, text: &str, language_hint: Option<&str>) -> Sentence {
        let language = match language_hint {
            Some(hint) => normalize_language(hint, &self.default_language),
            None => self.detect_language(text).await,
        };

        let (tokens, entities) = tokio::join!(
            self.annotator.annotate(text, &language),
            self.recognizer.recognize(text, &language)
        );

        if let Err(e) = &tokens {
            warn!(service = self.annotator.name(), error = %e, "annotation unavailable");
        }
        if let Err(e) = &entities {
            warn!(service = self.recognizer.name(), error = %e, "entity recognition unavailable");
        }

        build_sentence(text, &language, tokens, entities)
    }
}

/// Assemble a sentence from raw service results, substituting empty
/// sequences for failed or malformed ones
pub fn build_sentence(
    text: &str,
    language: &str,
    tokens: Result<Vec<RawToken>>,
    entities: Result<Vec<RawEntity>>,
) -> Sentence {
    let tokens = tokens.and_then(normalize_tokens).unwrap_or_else(|e| {
        debug!(error = %e, "dropping token annotations");
        Vec::new()
    });
    let entities = entities.and_then(normalize_entities).unwrap_or_else(|e| {
        debug!(error = %e, "dropping entity annotations");
        Vec::new()
    });

    Sentence::new(text, language, tokens, entities)
}

/// A sentence annotated ahead of time, in the services' wire shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    pub text: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub tokens: Vec<RawToken>,
    #[serde(default)]
    pub entities: Vec<RawEntity>,
}

fn default_language() -> String {
    "en".to_string()
}

impl AnnotatedDocument {
    /// Normalize into a sentence with the same recovery rules as live annotation
    pub fn into_sentence(self) -> Sentence {
        let language = normalize_language(&self.language, "en");
        build_sentence(&self.text, &language, Ok(self.tokens), Ok(self.entities))
    }
}

/// Normalize raw tokens; a dangling head index or a ROOT token that does not
/// head itself rejects the whole list
pub fn normalize_tokens(raw: Vec<RawToken>) -> Result<Vec<Token>> {
    let len = raw.len();

    raw.into_iter()
        .enumerate()
        .map(|(index, t)| {
            let dep = DepRole::from_label(&t.dep);
            let head = t.head;
            if head >= len {
                return Err(HabitError::InvalidAnnotation(format!(
                    "token {index} ({}) has head {head} outside sentence of {len} tokens",
                    t.text
                )));
            }
            if dep == DepRole::Root && head != index {
                return Err(HabitError::InvalidAnnotation(format!(
                    "ROOT token {index} ({}) has head {head}",
                    t.text
                )));
            }

            Ok(Token {
                pos: PosTag::from_tag(&t.pos),
                dep,
                head,
                index,
                offset: t.idx,
                text: t.text,
                lemma: t.lemma,
            })
        })
        .collect()
}

/// Normalize raw entities; an empty span or out-of-range score rejects the whole list
pub fn normalize_entities(raw: Vec<RawEntity>) -> Result<Vec<Entity>> {
    raw.into_iter()
        .map(|e| {
            let score = e.score.unwrap_or(1.0);
            if !(0.0..=1.0).contains(&score) {
                return Err(HabitError::InvalidAnnotation(format!(
                    "entity '{}' has score {score} outside [0, 1]",
                    e.text
                )));
            }
            if e.start_char >= e.end_char {
                return Err(HabitError::InvalidAnnotation(format!(
                    "entity '{}' has empty span {}..{}",
                    e.text, e.start_char, e.end_char
                )));
            }

            Ok(Entity {
                kind: EntityKind::from_label(&e.label),
                text: e.text,
                score,
                start: e.start_char,
                end: e.end_char,
            })
        })
        .collect()
}

/// Reduce a language tag to a two-letter code (`it-IT` -> `it`)
pub fn normalize_language(code: &str, default: &str) -> String {
    let primary = code
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase();

    if primary.len() == 2 && primary.chars().all(|c| c.is_ascii_alphabetic()) {
        primary
    } else {
        default.to_string()
    }
}
