//! HTTP implementations of the language service traits
//!
//! Author: hephaex@gmail.com

use async_trait::async_trait;
use habit_core::{
    Annotator, EntityRecognizer, HabitError, LanguageIdentifier, RawEntity, RawToken, Result,
};
use serde::{Deserialize, Serialize};

use crate::client::ServiceClient;

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    lang: &'a str,
}

#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct AnnotateResponse {
    #[serde(default)]
    pub tokens: Vec<RawToken>,
}

#[derive(Debug, Deserialize)]
pub struct NerResponse {
    #[serde(default)]
    pub entities: Vec<RawEntity>,
}

#[derive(Debug, Deserialize)]
pub struct DetectResponse {
    #[serde(alias = "lang")]
    pub language: String,
}

// ============================================================================
// Annotation
// ============================================================================

/// Tokenization, lemmas, POS tags and dependencies over `POST /annotate`
pub struct HttpAnnotator {
    client: ServiceClient,
}

impl HttpAnnotator {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Annotator for HttpAnnotator {
    async fn annotate(&self, text: &str, language: &str) -> Result<Vec<RawToken>> {
        let response: AnnotateResponse = self
            .client
            .post_json(
                "annotate",
                &AnalyzeRequest {
                    text,
                    lang: language,
                },
                HabitError::AnnotationUnavailable,
            )
            .await?;
        Ok(response.tokens)
    }

    fn name(&self) -> &str {
        "annotation"
    }
}

// ============================================================================
// Named entities
// ============================================================================

/// Named-entity recognition over `POST /ner`
pub struct HttpEntityRecognizer {
    client: ServiceClient,
}

impl HttpEntityRecognizer {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EntityRecognizer for HttpEntityRecognizer {
    async fn recognize(&self, text: &str, language: &str) -> Result<Vec<RawEntity>> {
        let response: NerResponse = self
            .client
            .post_json(
                "ner",
                &AnalyzeRequest {
                    text,
                    lang: language,
                },
                HabitError::AnnotationUnavailable,
            )
            .await?;
        Ok(response.entities)
    }

    fn name(&self) -> &str {
        "ner"
    }
}

// ============================================================================
// Language identification
// ============================================================================

/// Language identification over `POST /detect`
pub struct HttpLanguageIdentifier {
    client: ServiceClient,
}

impl HttpLanguageIdentifier {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LanguageIdentifier for HttpLanguageIdentifier {
    async fn identify(&self, text: &str) -> Result<String> {
        let response: DetectResponse = self
            .client
            .post_json("detect", &DetectRequest { text }, HabitError::LanguageDetection)
            .await?;

        if response.language.trim().is_empty() {
            return Err(HabitError::LanguageDetection(
                "service returned an empty language code".to_string(),
            ));
        }
        Ok(response.language)
    }
}

/// Always reports the same language
#[derive(Debug, Clone)]
pub struct FixedLanguage {
    code: String,
}

impl FixedLanguage {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

#[async_trait]
impl LanguageIdentifier for FixedLanguage {
    async fn identify(&self, _text: &str) -> Result<String> {
        Ok(self.code.clone())
    }
}
