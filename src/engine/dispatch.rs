//! Per-semantics extraction strategies.
//!
//! Each strategy reads the captures of one match and produces the hour
//! candidates plus the minute. `None` means the match cannot be resolved
//! (unmapped word, minute word above 59, missing group); the caller drops it
//! and keeps scanning.
//!
//! | semantics                  | hours                             | minute            |
//! |----------------------------|-----------------------------------|-------------------|
//! | `clock_hh_mm`              | digits, as written                | digits            |
//! | `clock_words_maybe_digits` | hour word, disambiguated          | digits or word    |
//! | `oclock_h`                 | digits, as written                | 0                 |
//! | `*_next_hour`              | target disambiguated, then −1     | 15 / 30 / 45      |
//! | `after_minutes`            | hour, as written                  | y                 |
//! | `before_minutes`           | hour − 1                          | 60 − y            |
//! | `oclock_word_needs_daypart`| hour word, disambiguated          | 0                 |

use super::disambiguate::resolve_hour_candidates_with;
use crate::rules::{CompiledRule, RuleSet, Semantics};
use regex::Captures;

/// Hour candidates (24-hour, not yet wrapped) and a minute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolution {
    pub hours: Vec<u32>,
    pub minute: u32,
}

impl Resolution {
    fn fixed(hour: u32, minute: u32) -> Self {
        Resolution { hours: vec![hour], minute }
    }
}

/// Resolve one match of `rule`. `context` holds the surfaces of nearby
/// daypart tokens.
pub(crate) fn resolve_match(
    rule: &CompiledRule,
    caps: &Captures<'_>,
    context: &[&str],
    rules: &RuleSet,
) -> Option<Resolution> {
    let group = |name: &str, index: usize| slot(rule, caps, name, index);
    let disambiguate = |hour: u32| resolve_hour_candidates_with(hour, context, rules.cues());

    match rule.semantics() {
        Semantics::DaypartForBias => None,

        Semantics::ClockHhMm => {
            let hour = digits(group("hour", 1)?)?;
            let minute = digits(group("minute", 2)?)?;
            Some(Resolution::fixed(hour, minute))
        }

        Semantics::ClockWordsMaybeDigits => {
            let hour = rules.word_to_hour(group("hour_word", 1)?)?;
            let minute = match (group("min_digits", 2), group("min_word", 3)) {
                (Some(d), _) => digits(d)?,
                (None, Some(w)) => rules.numerals().parse(w)?,
                (None, None) => return None,
            };
            Some(Resolution { hours: disambiguate(hour), minute })
        }

        Semantics::OclockH => Some(Resolution::fixed(digits(group("hour", 1)?)?, 0)),

        kind @ (Semantics::HalfNextHour | Semantics::QuarterNextHour | Semantics::ThreequarterNextHour) => {
            let minute = kind.next_hour_minute()?;
            let target = hour_value(group("target", 1)?, rules)?;
            let hours = disambiguate(target).into_iter().map(previous_hour).collect();
            Some(Resolution { hours, minute })
        }

        Semantics::AfterMinutes => {
            let (hour, minutes) = minute_offset(rule, caps, rules)?;
            Some(Resolution::fixed(hour, minutes))
        }

        Semantics::BeforeMinutes => {
            let (hour, minutes) = minute_offset(rule, caps, rules)?;
            Some(Resolution::fixed(previous_hour(hour), (60 - minutes) % 60))
        }

        Semantics::OclockWordNeedsDaypart => {
            let hour = rules.word_to_hour(group("hour_word", 1)?)?;
            Some(Resolution { hours: disambiguate(hour), minute: 0 })
        }
    }
}

/// Hour and minute count for the two word orders of `after_minutes` /
/// `before_minutes`: "Y perccel X óra után" and "X óra után Y perccel".
///
/// Whichever alternate slot matched is used. The minute count must be at
/// most 59.
fn minute_offset(rule: &CompiledRule, caps: &Captures<'_>, rules: &RuleSet) -> Option<(u32, u32)> {
    let group = |name: &str, index: usize| slot(rule, caps, name, index);

    let hour_text = group("hour", 3).or_else(|| group("hour_alt", 4))?;
    let hour = hour_value(hour_text, rules)?;

    let minute_digits = group("min_digits", 1).or_else(|| group("min_digits_alt", 5));
    let minute_word = group("min_word", 2).or_else(|| group("min_word_alt", 6));
    let minutes = match (minute_digits, minute_word) {
        (Some(d), _) => digits(d)?,
        (None, Some(w)) => rules.numerals().parse(w)?,
        (None, None) => return None,
    };

    (minutes <= 59).then_some((hour, minutes))
}

/// A capture by name for named-group rules, by position otherwise. Empty
/// captures count as absent.
fn slot<'h>(rule: &CompiledRule, caps: &Captures<'h>, name: &str, index: usize) -> Option<&'h str> {
    let m = if rule.uses_named_groups() { caps.name(name) } else { caps.get(index) };
    m.map(|m| m.as_str()).filter(|s| !s.is_empty())
}

/// ASCII digits only; values that overflow `u32` are unresolvable.
fn digits(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// An hour written in digits or as a word.
fn hour_value(text: &str, rules: &RuleSet) -> Option<u32> {
    digits(text).or_else(|| rules.word_to_hour(text))
}

fn previous_hour(hour: u32) -> u32 {
    (hour % 24 + 23) % 24
}
