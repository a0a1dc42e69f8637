//! Error types.
//!
//! Only two failures ever leave the crate: a rule document that cannot be
//! turned into a [`RuleSet`](crate::RuleSet) and a document that cannot be
//! read. A regex match that cannot be resolved to a time is not an error; the
//! extractor drops it and counts it in [`RunStats`](crate::RunStats).

use std::path::PathBuf;
use thiserror::Error;

/// Problems with a rule document. Fatal: raised before any extraction starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read rule file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("rule '{id}' has an invalid pattern: {source}")]
    Pattern {
        id: String,
        #[source]
        source: regex::Error,
    },

    #[error("rule '{id}' has unknown semantics '{semantics}'")]
    UnknownSemantics { id: String, semantics: String },

    #[error("duplicate rule id '{0}'")]
    DuplicateRule(String),

    #[error("hour word '{word}' maps to {hour}, expected 0..=23")]
    HourOutOfRange { word: String, hour: u32 },

    #[error("number word '{word}' maps to {value}, expected 0..=59")]
    NumberOutOfRange { word: String, value: u32 },

    #[error("invalid rule document: {0}")]
    Invalid(String),
}

/// A single input document could not be loaded. Scoped to that document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("read_failed: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not found: {0}")]
    NotFound(PathBuf),
}

impl DocumentError {
    /// Path of the document that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            DocumentError::Read { path, .. } | DocumentError::NotFound(path) => path,
        }
    }
}
