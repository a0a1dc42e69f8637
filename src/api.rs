use crate::engine::{Extractor, format_hhmm};
use crate::{Range, RuleSet};
use chrono::NaiveTime;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Default distance, in characters, within which a daypart word influences a
/// match.
pub const DEFAULT_DAYPART_RADIUS: usize = 40;

/// Default number of characters kept on each side of a match in the context
/// window.
pub const DEFAULT_CONTEXT_RADIUS: usize = 60;

/// Options that affect extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum gap between a match and a daypart word that still counts as
    /// "nearby".
    pub daypart_radius: usize,
    /// Characters of surrounding text copied into each record.
    pub context_radius: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { daypart_radius: DEFAULT_DAYPART_RADIUS, context_radius: DEFAULT_CONTEXT_RADIUS }
    }
}

/// The time a record denotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reading {
    /// A single minute of the day, `0..=1439`.
    Exact { minute: u32 },
    /// Both 12-hour readings survived; sorted ascending, at least two.
    Ambiguous { candidates: Vec<u32> },
}

impl Reading {
    /// The minute of the day, if the reading is unambiguous.
    pub fn minute(&self) -> Option<u32> {
        match self {
            Reading::Exact { minute } => Some(*minute),
            Reading::Ambiguous { .. } => None,
        }
    }

    /// Every minute of the day this reading allows.
    pub fn candidates(&self) -> &[u32] {
        match self {
            Reading::Exact { minute } => std::slice::from_ref(minute),
            Reading::Ambiguous { candidates } => candidates,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Reading::Ambiguous { .. })
    }

    /// `HH:MM` for an exact reading.
    pub fn norm_time(&self) -> Option<String> {
        self.minute().map(format_hhmm)
    }
}

/// One extracted time expression.
///
/// Serializes to the JSON-lines record shape:
///
/// ```text
/// {"rule_id": "...", "match": "...", "norm_time": "14:05", "minute": 845, "context": "..."}
/// {"rule_id": "...", "match": "...", "minute": null, "minute_candidates": [360, 1080],
///  "ambiguous_12h": true, "context": "..."}
/// ```
///
/// `span` is kept for in-process callers and is not serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Id of the rule that matched.
    pub rule_id: String,
    /// The matched surface text.
    pub matched: String,
    pub reading: Reading,
    /// Trimmed excerpt around the match.
    pub context: String,
    /// Character span of the match in the input text.
    pub span: Range,
}

impl Extraction {
    /// The candidate minutes as wall-clock times.
    pub fn times(&self) -> Vec<NaiveTime> {
        self.reading
            .candidates()
            .iter()
            .filter_map(|&m| NaiveTime::from_hms_opt((m / 60) % 24, m % 60, 0))
            .collect()
    }
}

impl Serialize for Extraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("rule_id", &self.rule_id)?;
        map.serialize_entry("match", &self.matched)?;
        match &self.reading {
            Reading::Exact { minute } => {
                map.serialize_entry("norm_time", &format_hhmm(*minute))?;
                map.serialize_entry("minute", minute)?;
            }
            Reading::Ambiguous { candidates } => {
                map.serialize_entry("minute", &Option::<u32>::None)?;
                map.serialize_entry("minute_candidates", candidates)?;
                map.serialize_entry("ambiguous_12h", &true)?;
            }
        }
        map.serialize_entry("context", &self.context)?;
        map.end()
    }
}

/// Extract time expressions from `text` with default [`Options`].
///
/// # Example
/// ```
/// use orakor::{RuleSet, extract};
///
/// let hits: Vec<_> = extract("A vonat 14:05-kor indult.", RuleSet::builtin()).collect();
/// assert_eq!(hits[0].reading.norm_time().as_deref(), Some("14:05"));
/// ```
pub fn extract<'a>(text: &'a str, rules: &'a RuleSet) -> Extractor<'a> {
    extract_with(text, rules, &Options::default())
}

/// Extract time expressions from `text` with explicit [`Options`].
pub fn extract_with<'a>(text: &'a str, rules: &'a RuleSet, options: &Options) -> Extractor<'a> {
    Extractor::new(text, rules, *options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(reading: Reading) -> Extraction {
        Extraction {
            rule_id: "r".to_string(),
            matched: "m".to_string(),
            reading,
            context: "c".to_string(),
            span: Range { start: 0, end: 1 },
        }
    }

    #[test]
    fn exact_record_shape() {
        let value = serde_json::to_value(record(Reading::Exact { minute: 845 })).unwrap();
        assert_eq!(value, json!({"rule_id": "r", "match": "m", "norm_time": "14:05", "minute": 845, "context": "c"}));
    }

    #[test]
    fn ambiguous_record_shape() {
        let value = serde_json::to_value(record(Reading::Ambiguous { candidates: vec![360, 1080] })).unwrap();
        assert_eq!(
            value,
            json!({
                "rule_id": "r",
                "match": "m",
                "minute": null,
                "minute_candidates": [360, 1080],
                "ambiguous_12h": true,
                "context": "c"
            })
        );
        assert!(value.get("norm_time").is_none());
    }

    #[test]
    fn key_order_follows_record_layout() {
        let line = serde_json::to_string(&record(Reading::Exact { minute: 0 })).unwrap();
        assert_eq!(line, r#"{"rule_id":"r","match":"m","norm_time":"00:00","minute":0,"context":"c"}"#);
    }

    #[test]
    fn reading_accessors() {
        let exact = Reading::Exact { minute: 75 };
        assert_eq!(exact.minute(), Some(75));
        assert_eq!(exact.candidates(), &[75]);
        assert_eq!(exact.norm_time().as_deref(), Some("01:15"));
        assert!(!exact.is_ambiguous());

        let both = Reading::Ambiguous { candidates: vec![30, 750] };
        assert_eq!(both.minute(), None);
        assert_eq!(both.norm_time(), None);
        assert!(both.is_ambiguous());
        let times = record(both).times();
        assert_eq!(times, vec![NaiveTime::from_hms_opt(0, 30, 0).unwrap(), NaiveTime::from_hms_opt(12, 30, 0).unwrap()]);
    }

    #[test]
    fn default_options() {
        let options = Options::default();
        assert_eq!(options.daypart_radius, 40);
        assert_eq!(options.context_radius, 60);
    }
}
