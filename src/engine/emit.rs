//! Record construction.

use super::chars::CharIndex;
use crate::api::{Extraction, Reading};
use crate::Range;
use chrono::NaiveTime;

/// Minutes since midnight, with both parts wrapped into range first.
pub fn minute_of_day(hour: u32, minute: u32) -> u32 {
    (hour % 24) * 60 + (minute % 60)
}

/// `HH:MM` for a minute-of-day value (wrapped modulo one day).
pub fn format_hhmm(minute_of_day: u32) -> String {
    let minute_of_day = minute_of_day % 1440;
    NaiveTime::from_hms_opt(minute_of_day / 60, minute_of_day % 60, 0)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Build a record for a resolved match.
///
/// `span` is in characters; the context window reaches `context_radius`
/// characters to each side, clipped to the text and trimmed. Returns `None`
/// only for an empty candidate list.
pub fn emit(
    rule_id: &str,
    matched: &str,
    span: Range,
    text: &str,
    hour_candidates: &[u32],
    minute: u32,
    context_radius: usize,
) -> Option<Extraction> {
    emit_indexed(rule_id, matched, span, &CharIndex::new(text), hour_candidates, minute, context_radius)
}

pub(crate) fn emit_indexed(
    rule_id: &str,
    matched: &str,
    span: Range,
    chars: &CharIndex<'_>,
    hour_candidates: &[u32],
    minute: u32,
    context_radius: usize,
) -> Option<Extraction> {
    let reading = match hour_candidates {
        [] => return None,
        [hour] => Reading::Exact { minute: minute_of_day(*hour, minute) },
        hours => {
            let mut candidates: Vec<u32> = hours.iter().map(|&h| minute_of_day(h, minute)).collect();
            candidates.sort_unstable();
            candidates.dedup();
            match candidates.as_slice() {
                [single] => Reading::Exact { minute: *single },
                _ => Reading::Ambiguous { candidates },
            }
        }
    };

    let context =
        chars.slice(span.start.saturating_sub(context_radius), span.end.saturating_add(context_radius)).trim();

    Some(Extraction {
        rule_id: rule_id.to_string(),
        matched: matched.to_string(),
        reading,
        context: context.to_string(),
        span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minute_of_day_wraps_both_parts() {
        assert_eq!(minute_of_day(14, 5), 845);
        assert_eq!(minute_of_day(24, 0), 0);
        assert_eq!(minute_of_day(25, 75), 75);
        assert_eq!(minute_of_day(23, 59), 1439);
    }

    #[test]
    fn formats_hhmm() {
        assert_eq!(format_hhmm(845), "14:05");
        assert_eq!(format_hhmm(0), "00:00");
        assert_eq!(format_hhmm(1439), "23:59");
        assert_eq!(format_hhmm(1440 + 61), "01:01");
    }

    #[test]
    fn single_candidate_is_exact() {
        let text = "pontban 14:05 volt";
        let span = Range { start: 8, end: 13 };
        let hit = emit("hh", "14:05", span, text, &[14], 5, 60).unwrap();
        assert_eq!(hit.reading, Reading::Exact { minute: 845 });
        assert_eq!(hit.context, text);
    }

    #[test]
    fn several_candidates_are_sorted() {
        let hit = emit("half", "fél egy", Range { start: 0, end: 7 }, "fél egy", &[12, 0], 30, 60).unwrap();
        assert_eq!(hit.reading, Reading::Ambiguous { candidates: vec![30, 750] });
    }

    #[test]
    fn context_window_is_clipped_and_trimmed() {
        let text = format!("{} 14:05 {}", "é".repeat(100), "b".repeat(100));
        let span = Range { start: 101, end: 106 };
        let hit = emit("hh", "14:05", span, &text, &[14], 5, 60).unwrap();
        assert_eq!(hit.context, format!("{} 14:05 {}", "é".repeat(59), "b".repeat(59)));

        let hit = emit("hh", "14:05", span, &text, &[14], 5, 3).unwrap();
        assert_eq!(hit.context, "éé 14:05 bb");
    }

    #[test]
    fn empty_candidates_emit_nothing() {
        assert!(emit("x", "x", Range { start: 0, end: 1 }, "x", &[], 0, 60).is_none());
    }
}
