use crate::rules::{NumeralWords, normalize_word, parse_number_word};

/// Canonical spelling of every value 0..=59.
fn canonical_words() -> Vec<(u32, String)> {
    let ones = [
        "nulla",
        "egy",
        "kettő",
        "három",
        "négy",
        "öt",
        "hat",
        "hét",
        "nyolc",
        "kilenc",
        "tíz",
        "tizenegy",
        "tizenkettő",
        "tizenhárom",
        "tizennégy",
        "tizenöt",
        "tizenhat",
        "tizenhét",
        "tizennyolc",
        "tizenkilenc",
    ];
    let tens = [(20, "húsz", "huszon"), (30, "harminc", "harminc"), (40, "negyven", "negyven"), (50, "ötven", "ötven")];

    let mut words: Vec<(u32, String)> = ones.iter().enumerate().map(|(v, w)| (v as u32, w.to_string())).collect();
    for (base, exact, prefix) in tens {
        words.push((base, exact.to_string()));
        for unit in 1..=9 {
            words.push((base + unit, format!("{prefix}{}", ones[unit as usize])));
        }
    }
    words
}

#[test]
fn every_canonical_word_resolves() {
    let words = canonical_words();
    assert_eq!(words.len(), 60);

    for (expected, word) in words {
        assert_eq!(parse_number_word(&word), Some(expected), "canonical word '{}' should resolve to {}", word, expected);
    }
}

#[test]
fn accentless_and_uppercase_variants_match_canonical() {
    for (expected, word) in canonical_words() {
        let stripped = normalize_word(&word);
        let shouted = word.to_uppercase();
        assert_eq!(parse_number_word(&stripped), Some(expected), "accent-less '{}' should resolve", stripped);
        assert_eq!(parse_number_word(&shouted), Some(expected), "uppercase '{}' should resolve", shouted);
    }
}

#[test]
fn alternate_spellings() {
    let cases: Vec<(u32, &str)> = vec![
        (2, "két"),
        (2, "ket"),
        (2, "ketto"),
        (12, "tizenkét"),
        (22, "huszonkét"),
        (22, "huszonketto"),
        (0, "zéró"),
        (0, "zero"),
        (45, " negyvenöt "),
    ];

    for (expected, input) in cases {
        assert_eq!(parse_number_word(input), Some(expected), "'{}' should resolve to {}", input, expected);
    }
}

#[test]
fn unresolvable_words_are_none_not_zero() {
    for input in ["", "   ", "hatvan", "huszon", "harmincnulla", "huszontíz", "kutya", "negyvenegyedik", "12"] {
        assert_eq!(parse_number_word(input), None, "'{}' should not resolve", input);
    }
}

#[test]
fn custom_dictionary_is_normalized_and_capped() {
    let words = NumeralWords::from_entries([("Egy", 1), ("Kettő", 2), ("sok", 99)], [("Húsz", 20)], [("Huszon", 20)]);

    assert_eq!(words.parse("egy"), Some(1));
    assert_eq!(words.parse("huszonketto"), Some(22));
    assert_eq!(words.parse("husz"), Some(20));
    assert_eq!(words.parse("sok"), None);
    assert_eq!(words.parse("három"), None);
}
