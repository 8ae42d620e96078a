//! Proptest strategies for translation inputs.

use proptest::prelude::*;

/// Arbitrary text: printable ASCII, accented Latin, CJK and whitespace.
pub fn any_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ -~áéíóúñü\u{4e00}-\u{4e20}\t\n]{0,120}")
        .expect("text regex is valid")
}

/// Word-like text made of a small vocabulary, so repeats are likely.
pub fn repetitive_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!["el", "gato", "come", "pescado", "y", "duerme"]),
        0..40,
    )
    .prop_map(|words| words.join(" "))
}

/// One of the supported target languages.
pub fn target_lang() -> impl Strategy<Value = String> {
    prop::sample::select(translation_benchmark_domain::language::SUPPORTED_LANGUAGES.to_vec())
        .prop_map(str::to_string)
}

/// A metric weight, zero included.
pub fn weight() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), 0.01f64..5.0]
}

/// A raw metric score, possibly outside `[0, 100]`.
pub fn raw_score() -> impl Strategy<Value = f64> {
    -50.0f64..150.0
}
