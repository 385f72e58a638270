//! Token-based similarity scoring for the approximate stage.
//!
//! Both scorers reduce to the normalized Indel similarity of two strings
//! (`rapidfuzz::fuzz::ratio`) after reshaping the token sequences:
//!
//! - token-sort compares the two sorted token sequences.
//! - token-set compares the shared tokens against each side's leftovers and
//!   keeps the best of the three pairings, so an extra word on one side does
//!   not drag the score down.
//!
//! Scores are reported on a 0-100 scale, rounded to whole points.

use std::collections::BTreeSet;

use rapidfuzz::fuzz;
use supplier_model::Scorer;

/// Scores two cleaned names with the chosen scorer.
pub fn score(scorer: Scorer, left: &str, right: &str) -> f64 {
    match scorer {
        Scorer::TokenSet => token_set_ratio(left, right),
        Scorer::TokenSort => token_sort_ratio(left, right),
    }
}

/// Plain Indel similarity on a 0-100 scale, unrounded.
///
/// Returns 0 when either side is empty.
pub fn ratio(left: &str, right: &str) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    fuzz::ratio(left.chars(), right.chars()) * 100.0
}

pub fn token_sort_ratio(left: &str, right: &str) -> f64 {
    let left_sorted = sorted_tokens(left);
    let right_sorted = sorted_tokens(right);
    if left_sorted.is_empty() || right_sorted.is_empty() {
        return 0.0;
    }
    round_score(ratio(&left_sorted, &right_sorted))
}

pub fn token_set_ratio(left: &str, right: &str) -> f64 {
    let left_tokens: BTreeSet<&str> = left.split_whitespace().collect();
    let right_tokens: BTreeSet<&str> = right.split_whitespace().collect();
    if left_tokens.is_empty() || right_tokens.is_empty() {
        return 0.0;
    }

    let shared = join_tokens(left_tokens.intersection(&right_tokens));
    let left_only = join_tokens(left_tokens.difference(&right_tokens));
    let right_only = join_tokens(right_tokens.difference(&left_tokens));

    let left_combined = append_tokens(&shared, &left_only);
    let right_combined = append_tokens(&shared, &right_only);

    let best = ratio(&shared, &left_combined)
        .max(ratio(&shared, &right_combined))
        .max(ratio(&left_combined, &right_combined));
    round_score(best)
}

fn sorted_tokens(value: &str) -> String {
    let mut tokens: Vec<&str> = value.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn join_tokens<'a>(tokens: impl Iterator<Item = &'a &'a str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

fn append_tokens(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (false, true) => head.to_string(),
        (false, false) => format!("{head} {tail}"),
    }
}

// Whole points, ties to even.
fn round_score(score: f64) -> f64 {
    score.round_ties_even()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identical_names_score_100() {
        assert_eq!(token_set_ratio("abc sdn bhd", "abc sdn bhd"), 100.0);
        assert_eq!(token_sort_ratio("abc sdn bhd", "abc sdn bhd"), 100.0);
    }

    #[test]
    fn word_order_is_ignored() {
        assert_eq!(token_sort_ratio("trading xyz", "xyz trading"), 100.0);
        assert_eq!(token_set_ratio("trading xyz", "xyz trading"), 100.0);
    }

    #[test]
    fn token_set_tolerates_extra_words() {
        // Every token of the shorter name is shared.
        assert_eq!(token_set_ratio("dg solution enterprise", "dg solution"), 100.0);
        assert_eq!(token_sort_ratio("dg solution enterprise", "dg solution"), 67.0);
    }

    #[test]
    fn near_misses_round_to_whole_points() {
        assert_eq!(
            token_set_ratio("action point technology", "action point technologies"),
            92.0
        );
        assert_eq!(
            token_set_ratio(
                "delcol water solutions m sdn bhd",
                "delcol water solution sdn bhd"
            ),
            95.0
        );
        assert_eq!(
            token_set_ratio("dna computer sdn bhd", "dna computer service centre"),
            75.0
        );
    }

    #[test]
    fn unrelated_names_score_low() {
        assert_eq!(token_set_ratio("unknown corp", "abc sdn bhd"), 26.0);
        assert_eq!(token_set_ratio("unknown corp", "xyz trading"), 17.0);
    }

    #[test]
    fn empty_sides_score_zero() {
        assert_eq!(token_set_ratio("", "abc"), 0.0);
        assert_eq!(token_sort_ratio("abc", "   "), 0.0);
        assert_eq!(ratio("", ""), 0.0);
    }

    #[test]
    fn dispatch_follows_scorer() {
        assert_eq!(score(Scorer::TokenSet, "dg solution enterprise", "dg solution"), 100.0);
        assert_eq!(score(Scorer::TokenSort, "dg solution enterprise", "dg solution"), 67.0);
    }

    proptest! {
        #[test]
        fn scores_are_bounded_and_symmetric(
            left in "[a-z]{1,6}( [a-z]{1,6}){0,4}",
            right in "[a-z]{1,6}( [a-z]{1,6}){0,4}",
        ) {
            for scorer in Scorer::ALL {
                let forward = score(scorer, &left, &right);
                prop_assert!((0.0..=100.0).contains(&forward));
                prop_assert_eq!(forward, score(scorer, &right, &left));
            }
        }

        #[test]
        fn token_set_scores_supersets_as_identical(
            base in "[a-z]{1,6}( [a-z]{1,6}){0,3}",
            extra in "[a-z]{1,6}( [a-z]{1,6}){0,2}",
        ) {
            let extended = format!("{extra} {base}");
            prop_assert_eq!(token_set_ratio(&base, &extended), 100.0);
        }
    }
}
