use crate::{Extraction, Options, Range, Reading, RuleSet, RuleStats, extract, extract_with};

fn hits(text: &str) -> Vec<Extraction> {
    extract(text, RuleSet::builtin()).collect()
}

fn only(text: &str) -> Extraction {
    let mut all = hits(text);
    assert_eq!(all.len(), 1, "expected exactly one record for '{}', got {:?}", text, all);
    all.remove(0)
}

fn exact(minute: u32) -> Reading {
    Reading::Exact { minute }
}

fn ambiguous(candidates: &[u32]) -> Reading {
    Reading::Ambiguous { candidates: candidates.to_vec() }
}

#[test]
fn single_record_cases() {
    // (rule id, expected reading, input)
    let cases: Vec<(&str, Reading, &str)> = vec![
        ("hh_colon_mm", exact(845), "Pontban 14:05 volt."),
        ("hh_dot_mm_kor", exact(630), "10.30-kor kezdődik"),
        ("hh_ora_mm_perc", exact(17 * 60 + 5), "17 óra 5 perc"),
        ("hh_orakor", exact(17 * 60), "17 órakor"),
        ("hour_word_minutes", ambiguous(&[370, 1090]), "hat óra tíz perc"),
        ("hour_word_minutes", ambiguous(&[370, 1090]), "hat óra 10 perc"),
        ("hour_word_minutes", exact(920), "délután három óra húsz perc"),
        ("hour_word_minutes", exact(7 * 60 + 45), "reggel hét óra negyvenöt perc"),
        ("hour_word_orakor", ambiguous(&[360, 1080]), "hat órakor jöttem"),
        ("hour_word_orakor", exact(1080), "este hat órakor jöttem"),
        ("hour_word_kor", exact(9 * 60), "reggel kilenckor"),
        ("hour_word_kor", ambiguous(&[120, 840]), "kétkor"),
        ("hour_word_kor", ambiguous(&[0, 720]), "tizenkétkor"),
        ("half_next", ambiguous(&[330, 1050]), "fél hat"),
        ("half_next", ambiguous(&[30, 750]), "fél egy"),
        ("half_next", exact(17 * 60 + 30), "fél 18"),
        ("quarter_next", ambiguous(&[435, 1155]), "negyed 8"),
        ("threequarter_next", ambiguous(&[585, 1305]), "háromnegyed tíz"),
        ("minutes_after", exact(310), "tíz perccel öt óra után"),
        ("minutes_after", exact(320), "5 óra után 20 perccel"),
        ("minutes_before", exact(235), "öt perccel négy óra előtt"),
        ("minutes_before", exact(23 * 60 + 50), "tíz perccel 0 óra előtt"),
    ];

    for (rule_id, expected, text) in cases {
        let hit = only(text);
        assert_eq!(hit.rule_id, rule_id, "rule for '{}'", text);
        assert_eq!(hit.reading, expected, "reading for '{}'", text);
    }
}

#[test]
fn norm_time_for_exact_records() {
    assert_eq!(only("öt perccel négy óra előtt").reading.norm_time().as_deref(), Some("03:55"));
    assert_eq!(only("Pontban 14:05 volt.").reading.norm_time().as_deref(), Some("14:05"));
}

#[test]
fn daypart_words_alone_emit_nothing() {
    let rules = RuleSet::builtin();
    let mut extractor = extract("reggel és este, de. és du.", rules);
    assert_eq!(extractor.dayparts().len(), 4);
    assert!(extractor.next().is_none());
}

#[test]
fn future_marker_suppresses_match() {
    assert!(hits("öt perc múlva").is_empty());
    assert!(hits("fél hat múlva").is_empty());

    let text = "hat óra tíz perc múlva indul a vonat";
    assert!(hits(text).is_empty());

    let stats = extract(text, RuleSet::builtin()).into_stats();
    assert_eq!(
        stats.per_rule["hour_word_minutes"],
        RuleStats { matches: 1, future_skipped: 1, ..RuleStats::default() }
    );
    assert_eq!(stats.emitted(), 0);
}

#[test]
fn future_marker_allows_punctuation_but_needs_whole_word() {
    assert!(hits("14:05, múlva").is_empty());
    assert!(hits("14:05 - Múlva").is_empty());
    assert_eq!(hits("14:05 múlvaként").len(), 1);
    // beyond the lookahead window
    assert_eq!(hits("14:05          múlva").len(), 1);
}

#[test]
fn unresolved_matches_are_counted_not_emitted() {
    let text = "hat óra kutya perc";
    assert!(hits(text).is_empty());

    let stats = extract(text, RuleSet::builtin()).into_stats();
    assert_eq!(stats.per_rule["hour_word_minutes"].unresolved, 1);
}

#[test]
fn am_cue_wins_when_both_are_nearby() {
    assert_eq!(only("reggel vagy este, hat órakor").reading, exact(360));
}

#[test]
fn daypart_radius_is_configurable() {
    let text = format!("este {} hat órakor", "x".repeat(50));
    let rules = RuleSet::builtin();

    let default: Vec<_> = extract(&text, rules).collect();
    assert_eq!(default[0].reading, ambiguous(&[360, 1080]));

    let wide = Options { daypart_radius: 60, ..Options::default() };
    let wide: Vec<_> = extract_with(&text, rules, &wide).collect();
    assert_eq!(wide[0].reading, exact(1080));

    let unbounded = Options { daypart_radius: usize::MAX, context_radius: usize::MAX };
    let unbounded: Vec<_> = extract_with(&text, rules, &unbounded).collect();
    assert_eq!(unbounded[0].reading, exact(1080));
    assert_eq!(unbounded[0].context, text);
}

#[test]
fn context_window_and_span_are_in_characters() {
    let text = "Délután fél öt volt már.";
    let options = Options { context_radius: 4, ..Options::default() };
    let hits: Vec<_> = extract_with(text, RuleSet::builtin(), &options).collect();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].matched, "fél öt");
    assert_eq!(hits[0].span, Range { start: 8, end: 14 });
    assert_eq!(hits[0].context, "tán fél öt vol");
    assert_eq!(hits[0].reading, exact(16 * 60 + 30));
}

#[test]
fn overlapping_rules_each_report() {
    // "nyolckor" is both the tail of "fél nyolckor" and an hour word on its own.
    let hits = hits("reggel fél nyolckor");
    let ids: Vec<&str> = hits.iter().map(|h| h.rule_id.as_str()).collect();
    assert_eq!(ids, vec!["half_next", "hour_word_kor"]);
    assert_eq!(hits[0].reading, exact(7 * 60 + 30));
    assert_eq!(hits[1].reading, exact(8 * 60));
}

#[test]
fn egykor_is_not_a_time() {
    assert!(hits("egykor itt állt egy ház").is_empty());
}

#[test]
fn named_groups_are_used_when_declared() {
    let rules = RuleSet::load(
        r#"{"rules": [{"id": "h_m", "pattern": "(?P<hour>\\d{1,2})h(?P<minute>\\d{2})", "semantics": "clock_hh_mm"}]}"#,
    )
    .unwrap();
    let hits: Vec<_> = extract("7h45 és 19h05", &rules).collect();
    let readings: Vec<_> = hits.iter().map(|h| h.reading.clone()).collect();
    assert_eq!(readings, vec![exact(465), exact(19 * 60 + 5)]);
}

#[test]
fn out_of_range_values_wrap() {
    let rules =
        RuleSet::load(r#"{"rules": [{"id": "loose", "pattern": "(\\d+):(\\d+)", "semantics": "clock_hh_mm"}]}"#).unwrap();
    let hits: Vec<_> = extract("25:75", &rules).collect();
    assert_eq!(hits[0].reading, exact(75));
}

#[test]
fn extraction_is_idempotent() {
    let text = "Este fél hatkor, majd tíz perccel öt óra után, végül 14:05-kor.";
    assert_eq!(hits(text), hits(text));
}

#[test]
fn stats_match_emitted_records() {
    let text = "fél hat, negyed 8 és 14:05";
    let rules = RuleSet::builtin();
    let mut extractor = extract(text, rules);
    let emitted = extractor.by_ref().count();
    let stats = extractor.stats();

    assert_eq!(emitted, 3);
    assert_eq!(stats.emitted(), 3);
    assert_eq!(stats.total().ambiguous, 2);
    assert_eq!(stats.per_rule.len(), 3);
}
