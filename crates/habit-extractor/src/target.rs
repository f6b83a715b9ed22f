//! Target resolution
//!
//! Locates the object of the habit: a nominal direct object, then a nominal
//! prepositional object under a target preposition, then a recognized
//! organization or location.

use habit_core::{DepRole, EntityKind, Sentence, Token};
use tracing::debug;

use crate::tables::LanguageTables;

/// Where a target was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSource {
    DirectObject,
    PrepositionalObject,
    Entity(EntityKind),
}

/// Resolve the target text of the habit, if any
pub fn resolve_target(sentence: &Sentence, tables: &LanguageTables) -> Option<String> {
    let (text, source) = resolve_with_source(sentence, tables)?;
    debug!(target = %text, ?source, "target resolved");
    Some(text)
}

/// Same as [`resolve_target`] but reports which rule matched
pub fn resolve_with_source(
    sentence: &Sentence,
    tables: &LanguageTables,
) -> Option<(String, TargetSource)> {
    direct_object(sentence)
        .map(|t| (t.text.clone(), TargetSource::DirectObject))
        .or_else(|| {
            prepositional_object(sentence, tables)
                .map(|t| (t.text.clone(), TargetSource::PrepositionalObject))
        })
        .or_else(|| entity_of(sentence, EntityKind::Org))
        .or_else(|| entity_of(sentence, EntityKind::Loc))
}

fn direct_object(sentence: &Sentence) -> Option<&Token> {
    sentence
        .tokens
        .iter()
        .find(|t| t.dep == DepRole::Dobj && t.pos.is_nominal())
}

fn prepositional_object<'s>(sentence: &'s Sentence, tables: &LanguageTables) -> Option<&'s Token> {
    sentence.tokens.iter().find(|t| {
        t.dep == DepRole::Pobj
            && t.pos.is_nominal()
            && sentence
                .token(t.head)
                .is_some_and(|head| tables.is_target_preposition(&head.lower()))
    })
}

fn entity_of(sentence: &Sentence, kind: EntityKind) -> Option<(String, TargetSource)> {
    sentence
        .entities
        .iter()
        .find(|e| e.kind == kind)
        .map(|e| (e.text.clone(), TargetSource::Entity(kind)))
}
