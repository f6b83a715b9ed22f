//! Quantity extraction
//!
//! Finds numeral-like tokens and classifies the unit that follows them.

use habit_core::{PosTag, QuantityCandidate, QuantityCategory, Sentence, Token};

use crate::tables::LanguageTables;

/// How many tokens after a number are searched for its unit
pub const UNIT_WINDOW: usize = 3;

/// Extract quantity candidates in token order
pub fn extract_quantities(sentence: &Sentence, tables: &LanguageTables) -> Vec<QuantityCandidate> {
    sentence
        .tokens
        .iter()
        .filter_map(|token| quantity_at(sentence, token, tables))
        .collect()
}

fn quantity_at(
    sentence: &Sentence,
    token: &Token,
    tables: &LanguageTables,
) -> Option<QuantityCandidate> {
    if let Some((number, unit)) = split_glued(&token.text) {
        let unit = unit.to_lowercase();
        return Some(QuantityCandidate {
            number: number.to_string(),
            category: tables.unit_category(&unit),
            unit: Some(unit),
        });
    }

    if !is_numeral(token, tables) {
        return None;
    }

    let unit = sentence
        .tokens
        .iter()
        .skip(token.index + 1)
        .take(UNIT_WINDOW)
        .find(|t| matches!(t.pos, PosTag::Noun | PosTag::Propn | PosTag::Sym))
        .map(Token::lower);

    let category = match &unit {
        Some(unit) => tables.unit_category(unit),
        None => QuantityCategory::Unknown,
    };

    Some(QuantityCandidate {
        number: token.text.clone(),
        unit,
        category,
    })
}

/// Split a number glued to its unit, e.g. `5km` or `10min`
fn split_glued(text: &str) -> Option<(&str, &str)> {
    let split = text.find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))?;
    let (number, unit) = text.split_at(split);

    let number_ok = number.starts_with(|c: char| c.is_ascii_digit())
        && number.ends_with(|c: char| c.is_ascii_digit());
    let unit_ok = !unit
        .chars()
        .any(|c| c.is_ascii_digit() || c.is_whitespace() || c == '.' || c == ',');

    (number_ok && unit_ok).then_some((number, unit))
}

/// NUM tag, numeric text, or a spelled-out number from the language table
fn is_numeral(token: &Token, tables: &LanguageTables) -> bool {
    token.pos == PosTag::Num
        || token.text.replace(',', ".").parse::<f64>().is_ok_and(f64::is_finite)
        || tables.parse_count(&token.lower()).is_some()
}
