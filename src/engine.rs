//! Extraction engine.
//!
//! The engine is split into small submodules under `src/engine/`, one per
//! stage of a run:
//!
//! ```text
//! text ── CharIndex::new ─────────────── char offsets (chars.rs)
//!   │
//!   ├── DaypartIndex::locate ─────────── daypart tokens, once per text (daypart.rs)
//!   │
//!   └── Extractor (extractor.rs)  for each emitting rule, for each match:
//!         - drop if followed by "múlva"
//!         - nearby dayparts
//!         - resolve_match (dispatch.rs)
//!             └─ resolve_hour_candidates (disambiguate.rs)
//!         - emit (emit.rs) ──▶ Extraction
//! ```
//!
//! ## Responsibilities by module
//!
//! - `chars.rs`: byte ↔ character offset mapping. Regex matches come back in
//!   bytes; every radius and span the crate exposes is in characters.
//! - `daypart.rs`: the per-text daypart index and the `nearby` query.
//! - `disambiguate.rs`: raw hour + context words → 24-hour candidates.
//! - `dispatch.rs`: the per-`Semantics` strategies.
//! - `emit.rs`: minute-of-day arithmetic and record construction.
//! - `extractor.rs`: the lazy iterator tying the stages together.
//! - `metrics.rs`: per-run counters and the cross-document `Tally`.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=orakor=trace` to see every dropped match and why.

#[path = "engine/chars.rs"]
mod chars;
#[path = "engine/daypart.rs"]
mod daypart;
#[path = "engine/disambiguate.rs"]
mod disambiguate;
#[path = "engine/dispatch.rs"]
mod dispatch;
#[path = "engine/emit.rs"]
mod emit;
#[cfg(test)]
#[path = "engine/extract_tests.rs"]
mod extract_tests;
#[path = "engine/extractor.rs"]
mod extractor;
#[path = "engine/metrics.rs"]
mod metrics;

pub use daypart::{DaypartIndex, DaypartToken};
pub use disambiguate::{CueMask, classify_cues, resolve_hour_candidates, resolve_hour_candidates_with};
pub use emit::{emit, format_hhmm, minute_of_day};
pub use extractor::Extractor;
pub use metrics::{RuleStats, RunStats, Tally};
