//! Compiled, immutable rule set.
//!
//! `RuleSet::compile` is a pure construction step: it reads a
//! `RawRuleDocument` and returns a new value, it never patches the document in
//! place. The result has no interior mutability and can be shared across
//! threads by reference.
//!
//! ## Capture-group layout
//!
//! A rule's pattern may address its captures by name or by position. If the
//! pattern declares *any* named group, names are used exclusively; otherwise
//! the positional layout below applies.
//!
//! ```text
//! semantics                  positional groups                     names
//! clock_hh_mm                1 hour, 2 minute                      hour, minute
//! clock_words_maybe_digits   1 hour word, 2 digits, 3 word         hour_word, min_digits, min_word
//! oclock_h                   1 hour                                hour
//! *_next_hour                1 target hour (digits or word)        target
//! after/before_minutes       1 min digits, 2 min word, 3 hour,     min_digits, min_word, hour,
//!                            4 hour (alt), 5 digits (alt),         hour_alt, min_digits_alt,
//!                            6 word (alt)                          min_word_alt
//! oclock_word_needs_daypart  1 hour word                           hour_word
//! ```

use super::config::{RawRuleDocument, parse_document};
use super::numeral::{MAX_MINUTE, NumeralWords, normalize_word};
use crate::error::ConfigError;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Source of the built-in Hungarian rule set.
const DEFAULT_RULES: &str = include_str!("default_rules.json5");

static BUILTIN: Lazy<RuleSet> =
    Lazy::new(|| RuleSet::load(DEFAULT_RULES).expect("built-in rule document must compile"));

const DEFAULT_AM_CUES: &[&str] = &["de.", "reggel", "délelőtt", "hajnal", "dél"];
const DEFAULT_PM_CUES: &[&str] = &["du.", "délután", "este", "éjjel", "éjszaka"];

/// The closed set of extraction strategies a rule can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Semantics {
    /// Locates daypart words for disambiguation. Never emitted.
    DaypartForBias,
    /// `14:05`
    ClockHhMm,
    /// `hat óra tíz perc`, `hat óra 10 perc`
    ClockWordsMaybeDigits,
    /// `17 órakor`, `5-kor`
    OclockH,
    /// `fél hat` = 5:30
    HalfNextHour,
    /// `negyed hat` = 5:15
    QuarterNextHour,
    /// `háromnegyed hat` = 5:45
    ThreequarterNextHour,
    /// `tíz perccel öt óra után` = 5:10
    AfterMinutes,
    /// `öt perccel négy óra előtt` = 3:55
    BeforeMinutes,
    /// `hat órakor`, `hatkor`
    OclockWordNeedsDaypart,
}

impl Semantics {
    pub const ALL: [Semantics; 10] = [
        Semantics::DaypartForBias,
        Semantics::ClockHhMm,
        Semantics::ClockWordsMaybeDigits,
        Semantics::OclockH,
        Semantics::HalfNextHour,
        Semantics::QuarterNextHour,
        Semantics::ThreequarterNextHour,
        Semantics::AfterMinutes,
        Semantics::BeforeMinutes,
        Semantics::OclockWordNeedsDaypart,
    ];

    /// The tag used in rule documents.
    pub fn tag(self) -> &'static str {
        match self {
            Semantics::DaypartForBias => "daypart_for_bias",
            Semantics::ClockHhMm => "clock_hh_mm",
            Semantics::ClockWordsMaybeDigits => "clock_words_maybe_digits",
            Semantics::OclockH => "oclock_h",
            Semantics::HalfNextHour => "half_next_hour",
            Semantics::QuarterNextHour => "quarter_next_hour",
            Semantics::ThreequarterNextHour => "threequarter_next_hour",
            Semantics::AfterMinutes => "after_minutes",
            Semantics::BeforeMinutes => "before_minutes",
            Semantics::OclockWordNeedsDaypart => "oclock_word_needs_daypart",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.tag() == tag)
    }

    /// Whether matches of this kind become records.
    pub fn emits(self) -> bool {
        !matches!(self, Semantics::DaypartForBias)
    }

    /// Minute past the *previous* hour for the "next hour" kinds.
    pub fn next_hour_minute(self) -> Option<u32> {
        match self {
            Semantics::QuarterNextHour => Some(15),
            Semantics::HalfNextHour => Some(30),
            Semantics::ThreequarterNextHour => Some(45),
            _ => None,
        }
    }

    /// Number of positional groups the dispatcher reads.
    fn positional_arity(self) -> usize {
        match self {
            Semantics::DaypartForBias => 0,
            Semantics::OclockH
            | Semantics::HalfNextHour
            | Semantics::QuarterNextHour
            | Semantics::ThreequarterNextHour
            | Semantics::OclockWordNeedsDaypart => 1,
            Semantics::ClockHhMm => 2,
            Semantics::ClockWordsMaybeDigits => 3,
            Semantics::AfterMinutes | Semantics::BeforeMinutes => 6,
        }
    }

    /// Named groups a named-capture rule must declare; each inner slice needs
    /// at least one member present.
    fn required_names(self) -> &'static [&'static [&'static str]] {
        match self {
            Semantics::DaypartForBias => &[],
            Semantics::ClockHhMm => &[&["hour"], &["minute"]],
            Semantics::ClockWordsMaybeDigits => &[&["hour_word"], &["min_digits", "min_word"]],
            Semantics::OclockH => &[&["hour"]],
            Semantics::HalfNextHour | Semantics::QuarterNextHour | Semantics::ThreequarterNextHour => &[&["target"]],
            Semantics::AfterMinutes | Semantics::BeforeMinutes => &[
                &["hour", "hour_alt"],
                &["min_digits", "min_word", "min_digits_alt", "min_word_alt"],
            ],
            Semantics::OclockWordNeedsDaypart => &[&["hour_word"]],
        }
    }
}

/// A rule with its pattern compiled.
#[derive(Debug)]
pub struct CompiledRule {
    id: String,
    regex: Regex,
    semantics: Semantics,
    named: bool,
}

impl CompiledRule {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn semantics(&self) -> Semantics {
        self.semantics
    }

    /// True when captures are addressed by name instead of position.
    pub fn uses_named_groups(&self) -> bool {
        self.named
    }
}

/// AM/PM cue words, stored normalized.
#[derive(Debug, Clone)]
pub struct CueVocabulary {
    am: HashSet<String>,
    pm: HashSet<String>,
}

impl Default for CueVocabulary {
    fn default() -> Self {
        Self::hungarian()
    }
}

impl CueVocabulary {
    pub fn hungarian() -> Self {
        Self::new(DEFAULT_AM_CUES.iter().copied(), DEFAULT_PM_CUES.iter().copied())
    }

    pub fn new<'w>(am: impl IntoIterator<Item = &'w str>, pm: impl IntoIterator<Item = &'w str>) -> Self {
        CueVocabulary {
            am: am.into_iter().map(normalize_word).collect(),
            pm: pm.into_iter().map(normalize_word).collect(),
        }
    }

    /// `word` must already be normalized.
    pub fn is_am(&self, word: &str) -> bool {
        self.am.contains(word)
    }

    /// `word` must already be normalized.
    pub fn is_pm(&self, word: &str) -> bool {
        self.pm.contains(word)
    }
}

/// The full, immutable rule set: compiled rules plus the lookup tables their
/// strategies need.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
    daypart: Option<usize>,
    word_to_hour: HashMap<String, u32>,
    numerals: NumeralWords,
    cues: CueVocabulary,
}

impl RuleSet {
    /// Parse and compile a rule document.
    pub fn load(source: &str) -> Result<Self, ConfigError> {
        let raw = parse_document(source)?;
        Self::compile(&raw)
    }

    /// Read, parse and compile a rule document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::load(&source)
    }

    /// The built-in Hungarian rule set, compiled on first use.
    pub fn builtin() -> &'static RuleSet {
        &BUILTIN
    }

    pub(crate) fn compile(raw: &RawRuleDocument) -> Result<Self, ConfigError> {
        let mut seen_ids: HashSet<&str> = HashSet::new();
        let mut rules = Vec::with_capacity(raw.rules.len());
        let mut daypart = None;

        for raw_rule in &raw.rules {
            if !seen_ids.insert(raw_rule.id.as_str()) {
                return Err(ConfigError::DuplicateRule(raw_rule.id.clone()));
            }

            let semantics = Semantics::from_tag(&raw_rule.semantics).ok_or_else(|| ConfigError::UnknownSemantics {
                id: raw_rule.id.clone(),
                semantics: raw_rule.semantics.clone(),
            })?;

            let regex = RegexBuilder::new(&raw_rule.pattern)
                .case_insensitive(true)
                .unicode(true)
                .build()
                .map_err(|source| ConfigError::Pattern { id: raw_rule.id.clone(), source })?;

            let named = regex.capture_names().flatten().next().is_some();
            check_groups(&raw_rule.id, semantics, &regex, named)?;

            if semantics == Semantics::DaypartForBias {
                if daypart.is_some() {
                    return Err(ConfigError::Invalid(format!(
                        "rule '{}' is a second daypart_for_bias rule; only one is allowed",
                        raw_rule.id
                    )));
                }
                daypart = Some(rules.len());
            }

            rules.push(CompiledRule { id: raw_rule.id.clone(), regex, semantics, named });
        }

        if daypart.is_none() {
            tracing::warn!("rule set has no daypart_for_bias rule; 12-hour readings will stay ambiguous");
        }

        let mut word_to_hour = HashMap::with_capacity(raw.word_to_hour.len());
        for (word, &hour) in &raw.word_to_hour {
            if hour > 23 {
                return Err(ConfigError::HourOutOfRange { word: word.clone(), hour });
            }
            word_to_hour.insert(normalize_word(word), hour);
        }

        let words = &raw.number_words;
        let tables = [&words.ones, &words.tens, &words.tens_prefixes];
        for (word, &value) in tables.into_iter().flatten().flatten() {
            if value > MAX_MINUTE {
                return Err(ConfigError::NumberOutOfRange { word: word.clone(), value });
            }
        }
        let numerals =
            NumeralWords::from_tables(words.ones.as_ref(), words.tens.as_ref(), words.tens_prefixes.as_ref());

        let cue_words = |list: Option<&Vec<String>>, default: &'static [&'static str]| -> Vec<String> {
            match list {
                Some(words) => words.clone(),
                None => default.iter().map(|w| w.to_string()).collect(),
            }
        };
        let am = cue_words(raw.cues.am.as_ref(), DEFAULT_AM_CUES);
        let pm = cue_words(raw.cues.pm.as_ref(), DEFAULT_PM_CUES);
        let cues = CueVocabulary::new(am.iter().map(String::as_str), pm.iter().map(String::as_str));

        tracing::debug!(rules = rules.len(), hour_words = word_to_hour.len(), "compiled rule set");

        Ok(RuleSet { rules, daypart, word_to_hour, numerals, cues })
    }

    /// All rules, in document order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// The single `daypart_for_bias` rule, if the document has one.
    pub fn daypart_rule(&self) -> Option<&CompiledRule> {
        self.daypart.map(|idx| &self.rules[idx])
    }

    /// Map an hour word to `0..=23`. `None` means the match cannot be resolved.
    pub fn word_to_hour(&self, word: &str) -> Option<u32> {
        self.word_to_hour.get(&normalize_word(word.trim())).copied()
    }

    pub fn numerals(&self) -> &NumeralWords {
        &self.numerals
    }

    pub fn cues(&self) -> &CueVocabulary {
        &self.cues
    }
}

fn check_groups(id: &str, semantics: Semantics, regex: &Regex, named: bool) -> Result<(), ConfigError> {
    if named {
        let names: HashSet<&str> = regex.capture_names().flatten().collect();
        for alternatives in semantics.required_names() {
            if !alternatives.iter().any(|n| names.contains(n)) {
                return Err(ConfigError::Invalid(format!(
                    "rule '{}' ({}) needs a named group {}",
                    id,
                    semantics.tag(),
                    alternatives.join(" or ")
                )));
            }
        }
    } else {
        let groups = regex.captures_len() - 1;
        if groups < semantics.positional_arity() {
            return Err(ConfigError::Invalid(format!(
                "rule '{}' ({}) has {} capture groups, needs {}",
                id,
                semantics.tag(),
                groups,
                semantics.positional_arity()
            )));
        }
    }
    Ok(())
}
