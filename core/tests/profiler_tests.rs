use gramdex_core::profile;

#[test]
fn values_sum_to_one() {
    let p = profile("the quick brown fox jumps over the lazy dog", 3);
    let sum: f64 = p.values().sum();
    assert!((sum - 1.0).abs() < 1e-9, "profile sums to {sum}");
    assert!(p.values().all(|&v| v > 0.0 && v <= 1.0));
}

#[test]
fn windows_span_all_sizes_and_share_one_total() {
    // "a b" with max_n = 2 generates three windows: "a", "b", "a b".
    let p = profile("a b", 2);
    assert_eq!(p.len(), 3);
    for key in ["a", "b", "a b"] {
        assert!((p[key] - 1.0 / 3.0).abs() < 1e-9);
    }
}

#[test]
fn repeated_words_accumulate() {
    let p = profile("cat cat dog", 1);
    assert!((p["cat"] - 2.0 / 3.0).abs() < 1e-9);
    assert!((p["dog"] - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn deterministic_for_identical_input() {
    let text = "Some text, with punctuation! And Repeats. some text";
    assert_eq!(profile(text, 3), profile(text, 3));
}

#[test]
fn trigram_keys_join_trimmed_tokens_with_single_spaces() {
    let p = profile("The cat, sat.", 3);
    assert!(p.contains_key("the cat sat"));
    assert!(p.contains_key("the cat"));
    assert!(p.contains_key("cat sat"));
    assert!(p.contains_key("cat"));
}

#[test]
fn all_punctuation_token_trims_to_an_empty_component() {
    // A lone "-" trims to the empty string and still forms a key.
    let p = profile("- -", 1);
    assert_eq!(p.len(), 1);
    assert!((p[""] - 1.0).abs() < 1e-9);
}

#[test]
fn interior_punctuation_survives() {
    // Trimming only strips the ends of each token.
    let p = profile("don't half-baked", 1);
    assert!(p.contains_key("don't"));
    assert!(p.contains_key("half-baked"));
}

#[test]
fn whitespace_only_text_is_empty() {
    assert!(profile(" \n\t ", 3).is_empty());
}
