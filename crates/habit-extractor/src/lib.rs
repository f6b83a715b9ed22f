//! HabitForge Extractor - Habit extraction engine
//!
//! Turns one annotated sentence into a structured, confidence-scored
//! [`HabitRecord`](habit_core::HabitRecord):
//! - `adapter`: normalizes language-service output into a `Sentence`
//! - `quantity`, `frequency`, `action`, `target`: independent extractors
//! - `engine`: the aggregator that merges their results
//! - `tables`: per-language lexicons and frequency patterns

pub mod action;
pub mod adapter;
pub mod engine;
pub mod frequency;
pub mod pipeline;
pub mod quantity;
pub mod tables;
pub mod target;

pub use adapter::AnnotationAdapter;
pub use engine::HabitExtractor;
pub use pipeline::HabitPipeline;
pub use tables::{LanguageTables, TableSet};
