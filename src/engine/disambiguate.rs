//! Hour disambiguation.
//!
//! ```text
//! raw hour ── mod 24 ──┬─ outside 1..=12 ───────────────▶ [h]
//!                      └─ 1..=12 ── cues in context? ─┬─ AM ──▶ [h, or 0 for 12]
//!                                                     ├─ PM ──▶ [h + 12, or 12 for 12]
//!                                                     └─ none ▶ [AM, PM]
//! ```
//!
//! The two-candidate case is the point: when nothing nearby says morning or
//! evening, both readings go to the output.

use crate::rules::{CueVocabulary, normalize_word};
use once_cell::sync::Lazy;

static HUNGARIAN_CUES: Lazy<CueVocabulary> = Lazy::new(CueVocabulary::hungarian);

bitflags::bitflags! {
    /// Which halves of the day the context words point at.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CueMask: u8 {
        const AM = 1 << 0;
        const PM = 1 << 1;
    }
}

/// Classify context words against a cue vocabulary.
pub fn classify_cues<S: AsRef<str>>(context: &[S], cues: &CueVocabulary) -> CueMask {
    context.iter().map(|word| normalize_word(word.as_ref())).fold(CueMask::empty(), |mut mask, word| {
        if cues.is_am(&word) {
            mask |= CueMask::AM;
        }
        if cues.is_pm(&word) {
            mask |= CueMask::PM;
        }
        mask
    })
}

/// 24-hour candidates for `raw_hour` using the built-in Hungarian cues.
pub fn resolve_hour_candidates<S: AsRef<str>>(raw_hour: u32, context: &[S]) -> Vec<u32> {
    resolve_hour_candidates_with(raw_hour, context, &HUNGARIAN_CUES)
}

/// 24-hour candidates for `raw_hour` given nearby context words.
///
/// Never empty. AM wins when both kinds of cue are present.
pub fn resolve_hour_candidates_with<S: AsRef<str>>(raw_hour: u32, context: &[S], cues: &CueVocabulary) -> Vec<u32> {
    let hour = raw_hour % 24;
    if !(1..=12).contains(&hour) {
        return vec![hour];
    }

    let am = if hour == 12 { 0 } else { hour };
    let pm = if hour == 12 { 12 } else { hour + 12 };

    let mask = classify_cues(context, cues);
    if mask.contains(CueMask::AM) {
        vec![am]
    } else if mask.contains(CueMask::PM) {
        vec![pm]
    } else {
        vec![am, pm]
    }
}
