//! Action selection
//!
//! Every VERB token is scored by its dependency role, by whether its lemma
//! is a modal/auxiliary, and by whether it governs a direct object. The best
//! candidate under (score desc, index asc) is the habit's action.

use std::cmp::Ordering;

use habit_core::{ActionCandidate, DepRole, PosTag, Sentence, Token};
use tracing::debug;

use crate::tables::LanguageTables;

// Weights in tenths, so equal sums compare equal
const ROOT_WEIGHT: u32 = 4;
const COMPLEMENT_WEIGHT: u32 = 3;
const CLAUSE_WEIGHT: u32 = 2;
const CONTENT_VERB_WEIGHT: u32 = 3;
const DIRECT_OBJECT_WEIGHT: u32 = 2;

/// Score every verb in the sentence, in token order
pub fn score_candidates(sentence: &Sentence, tables: &LanguageTables) -> Vec<ActionCandidate> {
    sentence
        .tokens
        .iter()
        .filter(|t| t.pos == PosTag::Verb)
        .map(|verb| ActionCandidate {
            verb_lemma: verb.lower_lemma(),
            index: verb.index,
            score: points(sentence, verb, tables) as f32 / 10.0,
        })
        .collect()
}

/// Pick the highest-scoring verb; ties go to the earliest token
pub fn select_action(sentence: &Sentence, tables: &LanguageTables) -> Option<ActionCandidate> {
    let best = score_candidates(sentence, tables)
        .into_iter()
        .min_by(rank)?;

    debug!(
        action = %best.verb_lemma,
        index = best.index,
        score = best.score,
        "action selected"
    );
    Some(best)
}

/// Total order over candidates: higher score first, then lower index
pub fn rank(a: &ActionCandidate, b: &ActionCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.index.cmp(&b.index))
}

fn points(sentence: &Sentence, verb: &Token, tables: &LanguageTables) -> u32 {
    let role = match verb.dep {
        DepRole::Root => ROOT_WEIGHT,
        DepRole::Xcomp | DepRole::Ccomp => COMPLEMENT_WEIGHT,
        DepRole::Acl | DepRole::Relcl => CLAUSE_WEIGHT,
        _ => 0,
    };

    let content = if tables.is_modal(&verb.lower_lemma()) {
        0
    } else {
        CONTENT_VERB_WEIGHT
    };

    let object = if sentence
        .dependents(verb.index)
        .any(|t| t.dep == DepRole::Dobj)
    {
        DIRECT_OBJECT_WEIGHT
    } else {
        0
    };

    role + content + object
}
