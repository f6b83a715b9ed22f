//! Annotated sentence model
//!
//! `RawToken` and `RawEntity` mirror what the external annotation and NER
//! services send over the wire. `Sentence`, `Token` and `Entity` are the
//! normalized, read-only representation the extraction engine works on.

use serde::{Deserialize, Serialize};

// ============================================================================
// Tag sets
// ============================================================================

/// Part-of-speech tags the engine distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Verb,
    Noun,
    Propn,
    Num,
    Sym,
    Other,
}

impl PosTag {
    /// Map a Universal POS tag string; unknown tags (AUX, ADP, ...) become `Other`
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "VERB" => Self::Verb,
            "NOUN" => Self::Noun,
            "PROPN" => Self::Propn,
            "NUM" => Self::Num,
            "SYM" => Self::Sym,
            _ => Self::Other,
        }
    }

    /// Nouns and proper nouns
    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Noun | Self::Propn)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verb => "VERB",
            Self::Noun => "NOUN",
            Self::Propn => "PROPN",
            Self::Num => "NUM",
            Self::Sym => "SYM",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dependency roles the engine distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepRole {
    #[serde(rename = "ROOT")]
    Root,
    #[serde(rename = "xcomp")]
    Xcomp,
    #[serde(rename = "ccomp")]
    Ccomp,
    #[serde(rename = "acl")]
    Acl,
    #[serde(rename = "relcl")]
    Relcl,
    #[serde(rename = "dobj")]
    Dobj,
    #[serde(rename = "pobj")]
    Pobj,
    #[serde(rename = "other")]
    Other,
}

impl DepRole {
    /// Map a dependency label (spaCy or Universal Dependencies flavour)
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "root" => Self::Root,
            "xcomp" => Self::Xcomp,
            "ccomp" => Self::Ccomp,
            "acl" => Self::Acl,
            "relcl" | "acl:relcl" => Self::Relcl,
            "dobj" | "obj" => Self::Dobj,
            "pobj" => Self::Pobj,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::Xcomp => "xcomp",
            Self::Ccomp => "ccomp",
            Self::Acl => "acl",
            Self::Relcl => "relcl",
            Self::Dobj => "dobj",
            Self::Pobj => "pobj",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for DepRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named-entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityKind {
    Person,
    Org,
    Loc,
    Misc,
    Date,
    Time,
}

impl EntityKind {
    /// Map an NER label; labels outside the fixed set fall into `Misc`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "PERSON" | "PER" => Self::Person,
            "ORG" => Self::Org,
            "LOC" | "GPE" | "FAC" => Self::Loc,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            _ => Self::Misc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Org => "ORG",
            Self::Loc => "LOC",
            Self::Misc => "MISC",
            Self::Date => "DATE",
            Self::Time => "TIME",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Wire shapes
// ============================================================================

/// Token as returned by the annotation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawToken {
    pub text: String,
    #[serde(default)]
    pub lemma: String,
    pub pos: String,
    pub dep: String,
    /// Index of the syntactic head within the sentence
    pub head: usize,
    /// Character offset of the token start
    #[serde(default)]
    pub idx: usize,
}

/// Entity span as returned by the NER service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    pub label: String,
    pub text: String,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(alias = "start")]
    pub start_char: usize,
    #[serde(alias = "end")]
    pub end_char: usize,
}

// ============================================================================
// Normalized model
// ============================================================================

/// A single annotated token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PosTag,
    pub dep: DepRole,
    /// Index of the syntactic head (equals `index` for ROOT)
    pub head: usize,
    /// Position in the sentence, zero-based
    pub index: usize,
    /// Character offset into the source text
    pub offset: usize,
}

impl Token {
    /// Lowercased surface text
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Lowercased lemma, falling back to the surface text when no lemma was supplied
    pub fn lower_lemma(&self) -> String {
        if self.lemma.is_empty() {
            self.lower()
        } else {
            self.lemma.to_lowercase()
        }
    }
}

/// A recognized named entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub text: String,
    pub score: f32,
    pub start: usize,
    pub end: usize,
}

/// One annotated input sentence, built once per request and never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    /// Source text as submitted
    pub text: String,
    /// Two-letter language code
    pub language: String,
    pub tokens: Vec<Token>,
    pub entities: Vec<Entity>,
}

impl Sentence {
    pub fn new(
        text: impl Into<String>,
        language: impl Into<String>,
        tokens: Vec<Token>,
        entities: Vec<Entity>,
    ) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            tokens,
            entities,
        }
    }

    /// Sentence with no annotations at all
    pub fn empty(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self::new(text, language, Vec::new(), Vec::new())
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Tokens whose head is `index` (excluding a ROOT pointing at itself)
    pub fn dependents(&self, index: usize) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(move |t| t.head == index && t.index != index)
    }

    /// Lowercased token texts joined by single spaces
    pub fn surface(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.lower())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_empty()
    }
}
