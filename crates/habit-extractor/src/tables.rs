//! Language tables
//!
//! Per-language lexicons and frequency patterns consumed by the extractors.
//! Tables are built once by [`TableSet::new`] and only read afterwards.

use std::collections::{HashMap, HashSet};

use regex::{Captures, Regex};

use habit_core::{Frequency, QuantityCategory};

/// Confidence of an "N times per period" match
pub const COUNTED_CONFIDENCE: f32 = 0.9;
/// Confidence of a fixed daily/weekly/monthly phrase
pub const PHRASE_CONFIDENCE: f32 = 0.8;
/// Confidence of a single-keyword lexicon hit
pub const KEYWORD_CONFIDENCE: f32 = 0.7;

pub const DAYS_PER_WEEK: u32 = 7;
pub const DAYS_PER_MONTH: u32 = 30;

/// Modal lemmas present in every language table
pub const SHARED_MODALS: &[&str] = &[
    "want", "wish", "plan", "hope", "intend", "volere", "dovere", "potere",
];

/// Prepositions that introduce a target in every language
pub const SHARED_PREPOSITIONS: &[&str] = &["in", "a", "al", "alla", "to", "at", "of", "di"];

// ============================================================================
// Frequency rules
// ============================================================================

/// How a matched frequency pattern turns into a count/period pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Count taken from the first non-empty capture group
    Counted { period_days: u32 },
    /// Fixed count and period
    Fixed(Frequency),
}

/// One entry of the ordered regex tier
#[derive(Debug, Clone)]
pub struct FrequencyRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub resolution: Resolution,
    pub confidence: f32,
}

impl FrequencyRule {
    /// Try this rule against a lowercased surface string
    pub fn apply(&self, surface: &str, tables: &LanguageTables) -> Option<Frequency> {
        let captures = self.pattern.captures(surface)?;
        match self.resolution {
            Resolution::Fixed(frequency) => Some(frequency),
            Resolution::Counted { period_days } => {
                let count = first_group(&captures).and_then(|n| tables.parse_count(n))?;
                Frequency::new(count, period_days)
            }
        }
    }
}

fn first_group<'t>(captures: &Captures<'t>) -> Option<&'t str> {
    captures.iter().skip(1).flatten().next().map(|m| m.as_str())
}

// ============================================================================
// Language tables
// ============================================================================

/// Lexicons and patterns for one language
#[derive(Debug, Clone)]
pub struct LanguageTables {
    pub code: &'static str,
    /// Regex tier, in priority order
    pub frequency_rules: Vec<FrequencyRule>,
    /// Lexicon tier (lowercased keyword -> frequency)
    pub frequency_keywords: HashMap<String, Frequency>,
    /// Unit lexicon (lowercased unit -> category)
    pub units: HashMap<String, QuantityCategory>,
    /// Modal / auxiliary verb lemmas that are never the habit itself
    pub modals: HashSet<String>,
    /// Prepositions that introduce a target (`go to the gym`)
    pub prepositions: HashSet<String>,
    /// Spelled-out numbers usable in frequency phrases
    pub number_words: HashMap<String, u32>,
}

impl LanguageTables {
    fn empty(code: &'static str) -> Self {
        let mut tables = Self {
            code,
            frequency_rules: Vec::new(),
            frequency_keywords: HashMap::new(),
            units: HashMap::new(),
            modals: HashSet::new(),
            prepositions: HashSet::new(),
            number_words: HashMap::new(),
        };
        tables.add_words(Lexicon::Modals, SHARED_MODALS);
        tables.add_words(Lexicon::Prepositions, SHARED_PREPOSITIONS);
        tables
    }

    /// English tables
    pub fn english() -> Self {
        let mut t = Self::empty("en");

        t.add_numbers(&[
            ("one", 1),
            ("two", 2),
            ("three", 3),
            ("four", 4),
            ("five", 5),
            ("six", 6),
            ("seven", 7),
            ("eight", 8),
            ("nine", 9),
            ("ten", 10),
            ("eleven", 11),
            ("twelve", 12),
            ("fifteen", 15),
            ("twenty", 20),
            ("thirty", 30),
            ("once", 1),
            ("twice", 2),
            ("thrice", 3),
        ]);

        let n = t.number_alternation(&["once", "twice", "thrice"]);
        let per = r"(?:per|a|an|each|every)";
        t.add_counted(
            "times_per_week",
            &format!(r"\b(?:({n})\s+times?|(once|twice|thrice))\s+{per}\s+week\b"),
            DAYS_PER_WEEK,
        );
        t.add_counted(
            "times_per_month",
            &format!(r"\b(?:({n})\s+times?|(once|twice|thrice))\s+{per}\s+month\b"),
            DAYS_PER_MONTH,
        );
        t.add_fixed(
            "daily",
            r"\b(?:daily|every\s*day|each\s+day|per\s+day|a\s+day)\b",
            7,
            DAYS_PER_WEEK,
        );
        t.add_fixed(
            "weekly",
            r"\b(?:weekly|every\s+week|each\s+week|per\s+week|a\s+week)\b",
            1,
            DAYS_PER_WEEK,
        );
        t.add_fixed(
            "monthly",
            r"\b(?:monthly|every\s+month|each\s+month|per\s+month|a\s+month)\b",
            1,
            DAYS_PER_MONTH,
        );

        t.add_keywords(&[
            ("daily", 7, 7),
            ("everyday", 7, 7),
            ("nightly", 7, 7),
            ("weekly", 1, 7),
            ("fortnightly", 1, 14),
            ("monthly", 1, 30),
        ]);

        t.add_units(
            QuantityCategory::PhysicalMeasure,
            &[
                "km", "kms", "kilometer", "kilometers", "kilometre", "kilometres", "mi", "mile",
                "miles", "m", "meter", "meters", "metre", "metres", "kg", "kilo", "kilos",
                "kilogram", "kilograms", "g", "gram", "grams", "lb", "lbs", "l", "liter",
                "liters", "litre", "litres", "ml", "glass", "glasses", "cup", "cups", "bottle",
                "bottles",
            ],
        );
        t.add_units(
            QuantityCategory::TimeOrQuantity,
            &[
                "min", "mins", "minute", "minutes", "h", "hr", "hrs", "hour", "hours", "sec",
                "secs", "second", "seconds", "day", "days", "week", "weeks", "time", "times",
                "page", "pages", "chapter", "chapters", "book", "books", "rep", "reps",
                "repetition", "repetitions", "set", "sets", "step", "steps", "pushups", "push-ups",
                "lap", "laps", "session", "sessions",
            ],
        );
        t.add_units(
            QuantityCategory::Money,
            &[
                "$", "€", "£", "usd", "eur", "euro", "euros", "dollar", "dollars", "cent", "cents",
                "pound", "pounds",
            ],
        );

        t.add_words(
            Lexicon::Modals,
            &[
                "would", "should", "must", "can", "could", "will", "need", "like", "try",
                "decide", "aim",
            ],
        );

        t
    }

    /// Italian tables
    pub fn italian() -> Self {
        let mut t = Self::empty("it");

        t.add_numbers(&[
            ("un", 1),
            ("uno", 1),
            ("una", 1),
            ("due", 2),
            ("tre", 3),
            ("quattro", 4),
            ("cinque", 5),
            ("sei", 6),
            ("sette", 7),
            ("otto", 8),
            ("nove", 9),
            ("dieci", 10),
            ("undici", 11),
            ("dodici", 12),
            ("quindici", 15),
            ("venti", 20),
            ("trenta", 30),
        ]);

        let n = t.number_alternation(&[]);
        t.add_counted(
            "volte_a_settimana",
            &format!(r"\b({n})\s+volt[ae]\s+(?:a|alla|la|per|ogni|in)\s+settimana\b"),
            DAYS_PER_WEEK,
        );
        t.add_counted(
            "volte_al_mese",
            &format!(r"\b({n})\s+volt[ae]\s+(?:al|il|a|per|ogni|in)\s+mese\b"),
            DAYS_PER_MONTH,
        );
        t.add_fixed(
            "ogni_giorno",
            r"\b(?:ogni\s+giorno|tutti\s+i\s+giorni|quotidianamente|giornalmente|al\s+giorno|ogni\s+dì)\b",
            7,
            DAYS_PER_WEEK,
        );
        t.add_fixed(
            "ogni_settimana",
            r"\b(?:ogni\s+settimana|settimanalmente|tutte\s+le\s+settimane|alla\s+settimana|a\s+settimana|per\s+settimana)\b",
            1,
            DAYS_PER_WEEK,
        );
        t.add_fixed(
            "ogni_mese",
            r"\b(?:ogni\s+mese|mensilmente|tutti\s+i\s+mesi|al\s+mese|per\s+mese)\b",
            1,
            DAYS_PER_MONTH,
        );

        t.add_keywords(&[
            ("quotidianamente", 7, 7),
            ("giornalmente", 7, 7),
            ("settimanalmente", 1, 7),
            ("mensilmente", 1, 30),
        ]);

        t.add_units(
            QuantityCategory::PhysicalMeasure,
            &[
                "km", "chilometro", "chilometri", "m", "metro", "metri", "kg", "chilo", "chili",
                "g", "grammo", "grammi", "l", "litro", "litri", "ml", "bicchiere", "bicchieri",
                "bottiglia", "bottiglie", "tazza", "tazze",
            ],
        );
        t.add_units(
            QuantityCategory::TimeOrQuantity,
            &[
                "min", "minuto", "minuti", "ora", "ore", "secondo", "secondi", "giorno", "giorni",
                "settimana", "settimane", "volta", "volte", "pagina", "pagine", "capitolo",
                "capitoli", "libro", "libri", "ripetizione", "ripetizioni", "serie", "passo",
                "passi", "flessioni", "giro", "giri", "sessione", "sessioni",
            ],
        );
        t.add_units(
            QuantityCategory::Money,
            &["€", "$", "euro", "dollaro", "dollari", "centesimo", "centesimi"],
        );

        t.add_words(
            Lexicon::Modals,
            &[
                "desiderare", "intendere", "sperare", "pianificare", "decidere", "provare",
                "cercare",
            ],
        );

        t
    }

    /// Category for a lowercased unit; unknown units are `General`
    pub fn unit_category(&self, unit: &str) -> QuantityCategory {
        self.units
            .get(unit)
            .copied()
            .unwrap_or(QuantityCategory::General)
    }

    pub fn is_modal(&self, lemma: &str) -> bool {
        self.modals.contains(lemma)
    }

    pub fn is_target_preposition(&self, word: &str) -> bool {
        self.prepositions.contains(word)
    }

    pub fn keyword_frequency(&self, word: &str) -> Option<Frequency> {
        self.frequency_keywords.get(word).copied()
    }

    /// Parse a digit string or a spelled-out number
    pub fn parse_count(&self, word: &str) -> Option<u32> {
        word.parse::<u32>()
            .ok()
            .or_else(|| self.number_words.get(word).copied())
    }

    fn number_alternation(&self, exclude: &[&str]) -> String {
        let mut words: Vec<&str> = self
            .number_words
            .keys()
            .map(String::as_str)
            .filter(|w| !exclude.contains(w))
            .collect();
        // Longest first so "quattro" is not shadowed by a shorter prefix
        words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));

        let mut alternation = String::from(r"\d+");
        for word in words {
            alternation.push('|');
            alternation.push_str(&regex::escape(word));
        }
        alternation
    }

    fn add_counted(&mut self, name: &'static str, pattern: &str, period_days: u32) {
        self.add_rule(
            name,
            pattern,
            Resolution::Counted { period_days },
            COUNTED_CONFIDENCE,
        );
    }

    fn add_fixed(&mut self, name: &'static str, pattern: &str, count: u32, period_days: u32) {
        if let Some(frequency) = Frequency::new(count, period_days) {
            self.add_rule(
                name,
                pattern,
                Resolution::Fixed(frequency),
                PHRASE_CONFIDENCE,
            );
        }
    }

    fn add_rule(
        &mut self,
        name: &'static str,
        pattern: &str,
        resolution: Resolution,
        confidence: f32,
    ) {
        if let Ok(pattern) = Regex::new(pattern) {
            self.frequency_rules.push(FrequencyRule {
                name,
                pattern,
                resolution,
                confidence,
            });
        }
    }

    fn add_keywords(&mut self, entries: &[(&str, u32, u32)]) {
        for (word, count, period) in entries {
            if let Some(frequency) = Frequency::new(*count, *period) {
                self.frequency_keywords.insert(word.to_string(), frequency);
            }
        }
    }

    fn add_units(&mut self, category: QuantityCategory, units: &[&str]) {
        for unit in units {
            self.units.insert(unit.to_string(), category);
        }
    }

    fn add_numbers(&mut self, entries: &[(&str, u32)]) {
        for (word, value) in entries {
            self.number_words.insert(word.to_string(), *value);
        }
    }

    fn add_words(&mut self, lexicon: Lexicon, words: &[&str]) {
        let target = match lexicon {
            Lexicon::Modals => &mut self.modals,
            Lexicon::Prepositions => &mut self.prepositions,
        };
        target.extend(words.iter().map(|w| w.to_string()));
    }
}

enum Lexicon {
    Modals,
    Prepositions,
}

// ============================================================================
// Table set
// ============================================================================

/// All supported languages; anything else resolves to English
#[derive(Debug, Clone)]
pub struct TableSet {
    english: LanguageTables,
    italian: LanguageTables,
}

impl TableSet {
    pub fn new() -> Self {
        Self {
            english: LanguageTables::english(),
            italian: LanguageTables::italian(),
        }
    }

    pub fn for_language(&self, code: &str) -> &LanguageTables {
        match code {
            "it" => &self.italian,
            _ => &self.english,
        }
    }

    pub fn supports(&self, code: &str) -> bool {
        matches!(code, "en" | "it")
    }
}

impl Default for TableSet {
    fn default() -> Self {
        Self::new()
    }
}
