//! Extraction run metrics.
//!
//! Counters are collected as a side effect of iterating an
//! [`Extractor`](crate::Extractor); they cost a few integer increments per
//! match and never change what is emitted.
//!
//! - `RuleStats` counts what happened to the matches of one rule.
//! - `RunStats` aggregates one text.
//! - `Tally` aggregates a whole driver run across documents.

use std::collections::BTreeMap;
use std::ops::AddAssign;
use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

/// What happened to the matches of a single rule.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RuleStats {
    /// Raw regex matches.
    pub matches: usize,
    /// Matches dropped because "múlva" follows them.
    pub future_skipped: usize,
    /// Matches the rule's strategy could not resolve.
    pub unresolved: usize,
    /// Records produced.
    pub emitted: usize,
    /// Records produced with more than one candidate.
    pub ambiguous: usize,
}

impl AddAssign for RuleStats {
    fn add_assign(&mut self, rhs: Self) {
        self.matches += rhs.matches;
        self.future_skipped += rhs.future_skipped;
        self.unresolved += rhs.unresolved;
        self.emitted += rhs.emitted;
        self.ambiguous += rhs.ambiguous;
    }
}

/// Counters for one extraction run over one text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Daypart tokens located in the text.
    pub dayparts: usize,
    /// Per-rule counters, keyed by rule id. Rules without matches are absent.
    pub per_rule: BTreeMap<String, RuleStats>,
}

impl RunStats {
    /// Add the counters of one rule. Empty counters are not recorded.
    pub fn absorb_rule(&mut self, id: &str, stats: RuleStats) {
        if stats == RuleStats::default() {
            return;
        }
        *self.per_rule.entry(id.to_string()).or_default() += stats;
    }

    pub fn merge(&mut self, other: &RunStats) {
        self.dayparts += other.dayparts;
        for (id, stats) in &other.per_rule {
            self.absorb_rule(id, *stats);
        }
    }

    /// Sum over all rules.
    pub fn total(&self) -> RuleStats {
        self.per_rule.values().fold(RuleStats::default(), |mut acc, s| {
            acc += *s;
            acc
        })
    }

    pub fn emitted(&self) -> usize {
        self.total().emitted
    }
}

/// Driver-level totals across documents.
#[derive(Debug, Default, Clone)]
pub struct Tally {
    /// Documents read and scanned.
    pub documents: usize,
    /// Documents that could not be read.
    pub failed: usize,
    /// Wall time spent reading and extracting.
    pub elapsed: Duration,
    pub stats: RunStats,
}

impl Tally {
    pub fn record(&mut self, stats: &RunStats, elapsed: Duration) {
        self.documents += 1;
        self.elapsed += elapsed;
        self.stats.merge(stats);
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
    }
}
