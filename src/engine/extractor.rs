//! The lazy extraction iterator.
//!
//! An [`Extractor`] walks the rule set in document order and, for each
//! emitting rule, the rule's matches in scan order. Nothing is computed ahead
//! of the consumer except the daypart index, which is built once on
//! construction. Each `Extractor` is single-use: once it returns `None` it
//! stays exhausted.

use super::chars::CharIndex;
use super::daypart::DaypartIndex;
use super::dispatch::resolve_match;
use super::emit::emit_indexed;
use super::metrics::{RuleStats, RunStats};
use crate::api::{Extraction, Options};
use crate::rules::{CompiledRule, RuleSet};
use regex::{CaptureMatches, Captures};
use std::iter::FusedIterator;

/// How far past a match to look for a "múlva" marker, in characters.
const FUTURE_LOOKAHEAD: usize = 10;

/// Lazy iterator over the records of one text.
pub struct Extractor<'a> {
    chars: CharIndex<'a>,
    rules: &'a RuleSet,
    options: Options,
    dayparts: DaypartIndex,
    next_rule: usize,
    current: Option<(&'a CompiledRule, CaptureMatches<'a, 'a>)>,
    current_stats: RuleStats,
    stats: RunStats,
}

impl<'a> Extractor<'a> {
    pub fn new(text: &'a str, rules: &'a RuleSet, options: Options) -> Self {
        let chars = CharIndex::new(text);
        let dayparts = DaypartIndex::locate_indexed(&chars, rules);
        tracing::debug!(chars = chars.char_len(), dayparts = dayparts.len(), "starting extraction");

        let stats = RunStats { dayparts: dayparts.len(), ..RunStats::default() };
        Extractor {
            chars,
            rules,
            options,
            dayparts,
            next_rule: 0,
            current: None,
            current_stats: RuleStats::default(),
            stats,
        }
    }

    /// The daypart tokens located in this text.
    pub fn dayparts(&self) -> &DaypartIndex {
        &self.dayparts
    }

    /// Counters so far. Complete only once the iterator is exhausted.
    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Drain the remaining records and return the final counters.
    pub fn into_stats(mut self) -> RunStats {
        for _ in self.by_ref() {}
        self.stats
    }

    /// True when "múlva" follows `end` with only whitespace or punctuation in
    /// between.
    fn followed_by_future_marker(&self, end: usize) -> bool {
        let window = self.chars.slice(end, end.saturating_add(FUTURE_LOOKAHEAD));
        regex!(r"^[\s.,;:!?-]*múlva\b").is_match(window)
    }

    fn handle(&mut self, rule: &'a CompiledRule, caps: &Captures<'a>) -> Option<Extraction> {
        let whole = caps.get(0)?;
        self.current_stats.matches += 1;
        let span = self.chars.span(&whole);

        if self.followed_by_future_marker(span.end) {
            self.current_stats.future_skipped += 1;
            tracing::trace!(rule = rule.id(), matched = whole.as_str(), "skipped: future reference");
            return None;
        }

        let context = self.dayparts.nearby(span.start, span.end, self.options.daypart_radius);
        let Some(resolution) = resolve_match(rule, caps, &context, self.rules) else {
            self.current_stats.unresolved += 1;
            tracing::trace!(rule = rule.id(), matched = whole.as_str(), "skipped: unresolved");
            return None;
        };

        let hit = emit_indexed(
            rule.id(),
            whole.as_str(),
            span,
            &self.chars,
            &resolution.hours,
            resolution.minute,
            self.options.context_radius,
        );
        match &hit {
            Some(hit) => {
                self.current_stats.emitted += 1;
                if hit.reading.is_ambiguous() {
                    self.current_stats.ambiguous += 1;
                }
            }
            None => self.current_stats.unresolved += 1,
        }
        hit
    }
}

impl<'a> Iterator for Extractor<'a> {
    type Item = Extraction;

    fn next(&mut self) -> Option<Extraction> {
        loop {
            if self.current.is_none() {
                let rule = self.rules.rules().get(self.next_rule)?;
                self.next_rule += 1;
                if rule.semantics().emits() {
                    self.current = Some((rule, rule.regex().captures_iter(self.chars.text())));
                }
                continue;
            }

            let (rule, matches) = self.current.as_mut()?;
            let rule: &'a CompiledRule = *rule;
            match matches.next() {
                Some(caps) => {
                    if let Some(hit) = self.handle(rule, &caps) {
                        return Some(hit);
                    }
                }
                None => {
                    let finished = std::mem::take(&mut self.current_stats);
                    self.stats.absorb_rule(rule.id(), finished);
                    self.current = None;
                }
            }
        }
    }
}

impl FusedIterator for Extractor<'_> {}
