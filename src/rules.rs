//! Rule registry.
//!
//! Everything the extractor knows about Hungarian lives in a declarative rule
//! document rather than in code:
//!
//! ```text
//! default_rules.json5 ──┐
//!   (or --rules <path>) │  config::parse_document   strip `//` comments, serde
//!                       └──────────┬────────────
//!                                  v
//!                      RuleSet::compile (registry.rs)
//!                        - regexes built once (case-insensitive, Unicode)
//!                        - hour words / numerals / cues normalized
//!                        - capture-group layout validated per semantics
//!                                  │
//!                                  v
//!                       immutable RuleSet (Send + Sync)
//! ```
//!
//! - `config.rs`: the raw serde schema and the comment stripper.
//! - `registry.rs`: `RuleSet`, `CompiledRule`, `Semantics`, `CueVocabulary`.
//! - `numeral.rs`: word normalization and the number-word resolver.

#[path = "rules/config.rs"]
mod config;
#[path = "rules/numeral.rs"]
mod numeral;
#[cfg(test)]
#[path = "rules/numeral_tests.rs"]
mod numeral_tests;
#[path = "rules/registry.rs"]
mod registry;

pub use numeral::{NumeralWords, normalize_word, parse_number_word};
pub use registry::{CompiledRule, CueVocabulary, RuleSet, Semantics};
