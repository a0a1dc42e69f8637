//! Hungarian number words for minute counts (0..=59).
//!
//! Resolution is a dictionary lookup on the normalized word, then a single
//! tens-prefix split for compounds:
//!
//! ```text
//! "huszonöt" ── normalize ──▶ "huszonot"
//!                             ├─ ones["huszonot"]?          no
//!                             ├─ tens["huszonot"]?          no
//!                             └─ prefix "huszon" (20) + ones["ot"] (5) = 25
//! ```

use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Largest value a minute word may resolve to.
pub(crate) const MAX_MINUTE: u32 = 59;

static HUNGARIAN: Lazy<NumeralWords> = Lazy::new(NumeralWords::hungarian);

/// Words for 0..=19. Accent-less spellings collapse onto these after
/// normalization, so only the canonical forms are listed.
const ONES: &[(&str, u32)] = &[
    ("nulla", 0),
    ("zéró", 0),
    ("egy", 1),
    ("kettő", 2),
    ("két", 2),
    ("három", 3),
    ("négy", 4),
    ("öt", 5),
    ("hat", 6),
    ("hét", 7),
    ("nyolc", 8),
    ("kilenc", 9),
    ("tíz", 10),
    ("tizenegy", 11),
    ("tizenkettő", 12),
    ("tizenkét", 12),
    ("tizenhárom", 13),
    ("tizennégy", 14),
    ("tizenöt", 15),
    ("tizenhat", 16),
    ("tizenhét", 17),
    ("tizennyolc", 18),
    ("tizenkilenc", 19),
];

/// Round tens that stand alone.
const TENS: &[(&str, u32)] = &[("húsz", 20), ("harminc", 30), ("negyven", 40), ("ötven", 50)];

/// Prefixes that combine with a ones word (1..=9).
const TENS_PREFIXES: &[(&str, u32)] = &[("tizen", 10), ("huszon", 20), ("harminc", 30), ("negyven", 40), ("ötven", 50)];

/// Lowercase, decompose (NFKD) and drop combining marks.
///
/// `"Négy"`, `"negy"` and `"NÉGY"` all become `"negy"`; `"kettő"` becomes
/// `"ketto"`.
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase().nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Resolve a Hungarian number word with the built-in dictionary.
pub fn parse_number_word(token: &str) -> Option<u32> {
    HUNGARIAN.parse(token)
}

/// A normalized numeral dictionary.
#[derive(Debug, Clone)]
pub struct NumeralWords {
    ones: HashMap<String, u32>,
    tens: HashMap<String, u32>,
    /// Sorted longest first so a shorter prefix never shadows a longer one.
    tens_prefixes: Vec<(String, u32)>,
}

impl Default for NumeralWords {
    fn default() -> Self {
        Self::hungarian()
    }
}

impl NumeralWords {
    /// The built-in Hungarian dictionary.
    pub fn hungarian() -> Self {
        Self::from_entries(ONES.iter().copied(), TENS.iter().copied(), TENS_PREFIXES.iter().copied())
    }

    /// Build a dictionary from raw (unnormalized) entries.
    pub fn from_entries<'w>(
        ones: impl IntoIterator<Item = (&'w str, u32)>,
        tens: impl IntoIterator<Item = (&'w str, u32)>,
        tens_prefixes: impl IntoIterator<Item = (&'w str, u32)>,
    ) -> Self {
        let ones = ones.into_iter().map(|(w, v)| (normalize_word(w), v)).collect();
        let tens = tens.into_iter().map(|(w, v)| (normalize_word(w), v)).collect();

        let mut tens_prefixes: Vec<(String, u32)> =
            tens_prefixes.into_iter().map(|(w, v)| (normalize_word(w), v)).filter(|(w, _)| !w.is_empty()).collect();
        tens_prefixes.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        tens_prefixes.dedup_by(|a, b| a.0 == b.0);

        NumeralWords { ones, tens, tens_prefixes }
    }

    /// Build from optional document tables; a missing table keeps the
    /// built-in Hungarian entries.
    pub(crate) fn from_tables(
        ones: Option<&BTreeMap<String, u32>>,
        tens: Option<&BTreeMap<String, u32>>,
        tens_prefixes: Option<&BTreeMap<String, u32>>,
    ) -> Self {
        fn entries<'a>(table: Option<&'a BTreeMap<String, u32>>, default: &[(&'static str, u32)]) -> Vec<(&'a str, u32)> {
            match table {
                Some(table) => table.iter().map(|(w, v)| (w.as_str(), *v)).collect(),
                None => default.to_vec(),
            }
        }

        Self::from_entries(entries(ones, ONES), entries(tens, TENS), entries(tens_prefixes, TENS_PREFIXES))
    }

    /// Resolve `token` to a value in `0..=59`.
    ///
    /// Returns `None` when no decomposition matches; callers skip the
    /// candidate rather than reading it as zero.
    pub fn parse(&self, token: &str) -> Option<u32> {
        let word = normalize_word(token.trim());
        if word.is_empty() {
            return None;
        }

        let value = self.ones.get(&word).or_else(|| self.tens.get(&word)).copied().or_else(|| {
            self.tens_prefixes.iter().find_map(|(prefix, base)| {
                let rest = word.strip_prefix(prefix.as_str())?;
                let unit = self.ones.get(rest).copied().filter(|u| (1..=9).contains(u))?;
                base.checked_add(unit)
            })
        })?;

        (value <= MAX_MINUTE).then_some(value)
    }
}
