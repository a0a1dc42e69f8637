//! Raw rule-document schema.
//!
//! The document is JSON with `//` line comments allowed. Unknown top-level
//! keys are ignored; the strict checks happen in `RuleSet::compile`.

use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawRuleDocument {
    pub rules: Vec<RawRule>,
    #[serde(default, alias = "word2hour")]
    pub word_to_hour: BTreeMap<String, u32>,
    #[serde(default)]
    pub number_words: RawNumberWords,
    #[serde(default)]
    pub cues: RawCues,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawRule {
    pub id: String,
    pub pattern: String,
    /// Kept as text so an unknown tag can be reported with its rule id.
    pub semantics: String,
}

/// Numeral dictionary. A missing table falls back to the built-in Hungarian one.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawNumberWords {
    pub ones: Option<BTreeMap<String, u32>>,
    pub tens: Option<BTreeMap<String, u32>>,
    pub tens_prefixes: Option<BTreeMap<String, u32>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawCues {
    pub am: Option<Vec<String>>,
    pub pm: Option<Vec<String>>,
}

/// Parse a rule document, stripping `//` comments first.
pub(crate) fn parse_document(source: &str) -> Result<RawRuleDocument, ConfigError> {
    let json = strip_line_comments(source);
    Ok(serde_json::from_str(&json)?)
}

/// Remove `//` comments that start outside of string literals.
///
/// Newlines are kept so `serde_json` error positions still point at the right
/// line of the rule file.
pub(crate) fn strip_line_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            _ => out.push(c),
        }
    }

    out
}
