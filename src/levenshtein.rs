//! Levenshtein edit distance.
//!
//! Used by the similar-path and parent-folder rules to rank candidate
//! replacement paths against a broken reference.

use crate::error::{RepairError, RepairResult};

/// Edit distance for inputs that may be absent.
///
/// Listings deserialized from external systems carry optional path fields;
/// an absent side is rejected rather than treated as empty.
pub fn calculate(source: Option<&str>, target: Option<&str>) -> RepairResult<usize> {
    match (source, target) {
        (Some(s), Some(t)) => Ok(distance(s, t)),
        _ => Err(RepairError::NullInput),
    }
}

/// Compute the Levenshtein edit distance between two strings.
///
/// Returns the minimum number of single-character edits (insertions,
/// deletions, substitutions) required to transform `a` into `b`. Comparison
/// is case-sensitive and works on Unicode scalar values, not bytes.
pub fn distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Use two rows instead of full matrix for O(n) space.
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(distance("hello", "hello"), 0);
        assert_eq!(distance("", ""), 0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(distance("", "hello"), 5);
        assert_eq!(distance("abc", ""), 3);
    }

    #[test]
    fn test_single_edit() {
        assert_eq!(distance("kitten", "sitten"), 1); // substitution
        assert_eq!(distance("cat", "cats"), 1); // insertion
        assert_eq!(distance("cats", "cat"), 1); // deletion
    }

    #[test]
    fn test_classic() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("flaw", "lawn"), 2);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(distance("Hello", "hello"), 1);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [("saturday", "sunday"), ("", "abc"), ("en-US", "fr-FR")];
        for (a, b) in pairs {
            assert_eq!(distance(a, b), distance(b, a), "{a} / {b}");
        }
    }

    #[test]
    fn test_unicode_code_points() {
        assert_eq!(distance("café", "cafe"), 1);
        assert_eq!(distance("日本語", "日本"), 1);
    }

    #[test]
    fn test_very_different_lengths_are_exact() {
        assert_eq!(distance("a", "abcdefghij"), 9);
        assert_eq!(distance("missing", "a"), 7);
    }

    #[test]
    fn test_long_strings() {
        let a = "a".repeat(150);
        let b = format!("{}b", "a".repeat(149));
        assert_eq!(distance(&a, &b), 1);
        assert_eq!(distance(&a, &"b".repeat(100)), 150);
    }

    #[test]
    fn test_calculate_rejects_absent_inputs() {
        for (s, t) in [(None, Some("a")), (Some("a"), None), (None, None)] {
            let err = calculate(s, t).expect_err("absent input must fail");
            assert_eq!(err.to_string(), "Strings cannot be null");
        }
        assert_eq!(calculate(Some(""), Some("hello")).expect("valid"), 5);
    }
}
