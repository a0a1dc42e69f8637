//! Rule-based extraction of time-of-day expressions from Hungarian prose.
//!
//! The crate takes plain text (already stripped of markup), finds every
//! substring that names a clock time ("14:05", "fél hat", "öt perccel négy óra
//! előtt", "este hat órakor"), and reports it as a minute-of-day value. When a
//! 12-hour reading cannot be settled from nearby daypart words ("reggel",
//! "este", ...) both readings are reported instead of guessing.
//!
//! ```
//! use orakor::{RuleSet, extract};
//!
//! let rules = RuleSet::builtin();
//! let hits: Vec<_> = extract("este hat órakor jöttem", rules).collect();
//! assert_eq!(hits[0].reading.minute(), Some(18 * 60));
//! ```

#[macro_use]
mod macros;
mod api;
pub mod document;
mod engine;
mod error;
mod rules;

pub use api::{DEFAULT_CONTEXT_RADIUS, DEFAULT_DAYPART_RADIUS, Extraction, Options, Reading, extract, extract_with};
pub use engine::{
    CueMask, DaypartIndex, DaypartToken, Extractor, RuleStats, RunStats, Tally, classify_cues, emit, format_hhmm,
    minute_of_day, resolve_hour_candidates, resolve_hour_candidates_with,
};
pub use error::{ConfigError, DocumentError};
pub use rules::{CompiledRule, CueVocabulary, NumeralWords, RuleSet, Semantics, normalize_word, parse_number_word};

/// A half-open `[start, end)` span of **character** (not byte) offsets into
/// the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    /// Start character index (inclusive).
    pub start: usize,
    /// End character index (exclusive).
    pub end: usize,
}
