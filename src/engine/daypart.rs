//! Daypart index.
//!
//! Daypart words ("reggel", "este", "délután", ...) are never emitted. They are
//! located once per text by the rule set's `daypart_for_bias` rule and then
//! queried by every candidate match, so all disambiguation decisions in one
//! run see the same index.

use super::chars::CharIndex;
use crate::RuleSet;

/// A located daypart word. Offsets are characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaypartToken {
    pub start: usize,
    pub end: usize,
    pub surface: String,
}

/// All daypart tokens of one text, in text order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaypartIndex {
    tokens: Vec<DaypartToken>,
}

impl DaypartIndex {
    /// Run the `daypart_for_bias` rule over `text`.
    ///
    /// A rule set without such a rule yields an empty index.
    pub fn locate(text: &str, rules: &RuleSet) -> Self {
        Self::locate_indexed(&CharIndex::new(text), rules)
    }

    pub(crate) fn locate_indexed(chars: &CharIndex<'_>, rules: &RuleSet) -> Self {
        let Some(rule) = rules.daypart_rule() else {
            return DaypartIndex::default();
        };

        let tokens = rule
            .regex()
            .find_iter(chars.text())
            .map(|m| {
                let span = chars.span(&m);
                DaypartToken { start: span.start, end: span.end, surface: m.as_str().to_string() }
            })
            .collect();

        DaypartIndex { tokens }
    }

    pub fn tokens(&self) -> &[DaypartToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Surfaces of the tokens within `radius` characters of `[start, end)`.
    ///
    /// A token is nearby unless it ends more than `radius` characters before
    /// `start` or begins more than `radius` characters after `end`. Overlaps
    /// count.
    pub fn nearby(&self, start: usize, end: usize, radius: usize) -> Vec<&str> {
        // Tokens come from leftmost-first, non-overlapping matching, so both
        // starts and ends are sorted.
        let lo = self.tokens.partition_point(|t| t.end.saturating_add(radius) < start);
        let hi = self.tokens.partition_point(|t| t.start <= end.saturating_add(radius));

        self.tokens.get(lo..hi).unwrap_or_default().iter().map(|t| t.surface.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(start: usize, end: usize, surface: &str) -> DaypartToken {
        DaypartToken { start, end, surface: surface.to_string() }
    }

    #[test]
    fn locates_with_char_offsets() {
        let text = "Délután, de nem este.";
        let idx = DaypartIndex::locate(text, RuleSet::builtin());
        assert_eq!(idx.tokens(), &[token(0, 7, "Délután"), token(16, 20, "este")]);
    }

    #[test]
    fn nearby_respects_radius_on_both_sides() {
        let idx = DaypartIndex { tokens: vec![token(0, 4, "este"), token(50, 56, "reggel"), token(200, 203, "dél")] };

        // match at 60..65: "reggel" overlaps the radius, "este" ends 56 chars before.
        assert_eq!(idx.nearby(60, 65, 40), vec!["reggel"]);
        // exactly `radius` away on the left is still nearby
        assert_eq!(idx.nearby(44, 46, 40), vec!["este", "reggel"]);
        // one past the radius is not
        assert_eq!(idx.nearby(45, 46, 40), vec!["reggel"]);
        // right side: token starts exactly `radius` after the end
        assert_eq!(idx.nearby(150, 160, 40), vec!["dél"]);
        assert_eq!(idx.nearby(150, 159, 40), Vec::<&str>::new());
        // overlap
        assert_eq!(idx.nearby(1, 3, 0), vec!["este"]);
    }

    #[test]
    fn huge_radius_reaches_every_token() {
        let idx = DaypartIndex { tokens: vec![token(0, 4, "este"), token(200, 203, "dél")] };
        assert_eq!(idx.nearby(100, 105, usize::MAX), vec!["este", "dél"]);
        assert_eq!(idx.nearby(usize::MAX - 1, usize::MAX, usize::MAX), vec!["este", "dél"]);
    }

    #[test]
    fn empty_without_daypart_rule() {
        let rules = RuleSet::load(r#"{"rules": []}"#).unwrap();
        assert!(DaypartIndex::locate("este hatkor", &rules).is_empty());
    }
}
