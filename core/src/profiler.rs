use std::collections::HashMap;

/// Characters trimmed from both ends of every token before it joins an ngram key.
const TRIM_CHARS: &[char] = &['.', ',', '!', '?', '/', '\\', '\'', '"', '-'];

/// Largest ngram window generated when none is configured.
pub const DEFAULT_MAX_NGRAM: usize = 3;

/// Compute a normalized ngram frequency profile for `text`.
///
/// The text is lowercased and split on whitespace. For every window size `n`
/// in `1..=max_n`, each contiguous run of `n` tokens becomes a key: tokens are
/// trimmed of leading and trailing punctuation and joined with single spaces.
/// Every window, at every size, counts toward one cumulative total, and each
/// key's count is divided by that total, so the values sum to 1.0.
///
/// Empty or whitespace-only text yields an empty profile.
pub fn profile(text: &str, max_n: usize) -> HashMap<String, f64> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();

    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut windows_total = 0u32;
    for n in 1..=max_n {
        for window in words.windows(n) {
            windows_total += 1;
            let ngram = window
                .iter()
                .map(|word| word.trim_matches(TRIM_CHARS))
                .collect::<Vec<_>>()
                .join(" ");
            *counts.entry(ngram).or_insert(0) += 1;
        }
    }

    if windows_total == 0 {
        return HashMap::new();
    }
    let total = f64::from(windows_total);
    counts
        .into_iter()
        .map(|(ngram, count)| (ngram, f64::from(count) / total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unigrams_split_evenly() {
        let p = profile("the cat sat", 1);
        assert_eq!(p.len(), 3);
        for key in ["the", "cat", "sat"] {
            assert!((p[key] - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn trims_punctuation_and_lowercases() {
        let p = profile("Hello, World!", 1);
        assert!(p.contains_key("hello"));
        assert!(p.contains_key("world"));
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn empty_text_yields_empty_profile() {
        assert!(profile("", 3).is_empty());
        assert!(profile("   \t\n", 3).is_empty());
    }
}
