#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Normalized string similarity for matching planted variety labels
//! against reference cultivar names.
//!
//! The score is `1 - levenshtein / max_len` over lowercased, trimmed
//! inputs, with two short-circuits: identical inputs score `1.0` and an
//! input contained in the other scores a flat [`SUBSTRING_SCORE`]. The
//! substring rule wins even when the edit distance alone would have scored
//! higher.

/// Score assigned when one normalized input contains the other.
pub const SUBSTRING_SCORE: f64 = 0.8;

/// Lowercases and trims an input before comparison.
#[must_use]
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Computes the similarity of `a` and `b` in `[0.0, 1.0]`.
///
/// 1. Both inputs are lowercased and trimmed.
/// 2. Equal inputs score `1.0`.
/// 3. An empty input scores `0.0`.
/// 4. If either contains the other, the score is [`SUBSTRING_SCORE`].
/// 5. Otherwise the Levenshtein distance `d` (unit cost insert, delete,
///    substitute, counted in characters) gives `1 - d / max(len_a, len_b)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);

    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a.contains(&b) || b.contains(&a) {
        return SUBSTRING_SCORE;
    }

    let distance = strsim::levenshtein(&a, &b);
    let max_len = a.chars().count().max(b.chars().count());

    1.0 - distance as f64 / max_len as f64
}

/// Scores every item against `query` and keeps those at or above
/// `threshold`, best first.
///
/// Items whose key is `None` are skipped. Ties keep their input order.
pub fn rank_by_similarity<'a, T, I, F>(
    query: &str,
    items: I,
    key: F,
    threshold: f64,
) -> Vec<(&'a T, f64)>
where
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> Option<&str>,
    T: 'a,
{
    let mut scored: Vec<(&T, f64)> = items
        .into_iter()
        .filter_map(|item| {
            let score = similarity(query, key(item)?);
            (score >= threshold).then_some((item, score))
        })
        .collect();

    // `sort_by` is stable, so equal scores stay in input order.
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn identical_inputs_score_one() {
        for s in ["Sarah Bernhardt", "a", "Kansas", "  Coral Charm  "] {
            assert!(approx_eq(similarity(s, s), 1.0));
        }
    }

    #[test]
    fn comparison_ignores_case_and_outer_whitespace() {
        assert!(approx_eq(similarity("  SARAH bernhardt", "Sarah Bernhardt "), 1.0));
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert!(approx_eq(similarity("rose", ""), 0.0));
        assert!(approx_eq(similarity("", "rose"), 0.0));
        assert!(approx_eq(similarity("   ", "rose"), 0.0));
    }

    #[test]
    fn both_empty_are_equal() {
        // Normalized equality is checked before emptiness.
        assert!(approx_eq(similarity("", ""), 1.0));
        assert!(approx_eq(similarity(" ", ""), 1.0));
    }

    #[test]
    fn substring_short_circuits() {
        assert!(approx_eq(similarity("rose", "roses"), SUBSTRING_SCORE));
        assert!(approx_eq(similarity("roses", "rose"), SUBSTRING_SCORE));
        // Edit distance alone would give 1 - 1/20 = 0.95.
        assert!(approx_eq(
            similarity("Duchesse de Nemours", "Duchesse de Nemours."),
            SUBSTRING_SCORE
        ));
    }

    #[test]
    fn edit_distance_score() {
        assert!(approx_eq(similarity("kitten", "sitting"), 1.0 - 3.0 / 7.0));
    }

    #[test]
    fn is_symmetric() {
        let pairs = [
            ("kitten", "sitting"),
            ("Sarah Bernhardt", "Sara Bernhard"),
            ("Bowl of Beauty", "Bowl of Cream"),
            ("Festiva Maxima", "festiva"),
        ];
        for (a, b) in pairs {
            assert!(approx_eq(similarity(a, b), similarity(b, a)), "{a} / {b}");
        }
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let pairs = [("abc", "xyz"), ("a", "bcdefgh"), ("Red Charm", "Coral Supreme")];
        for (a, b) in pairs {
            let score = similarity(a, b);
            assert!((0.0..=1.0).contains(&score), "{a} / {b}: {score}");
        }
    }

    #[test]
    fn counts_characters_not_bytes() {
        // One substitution over five characters.
        assert!(approx_eq(similarity("pivoé", "pivoe"), 0.8));
        assert!(approx_eq(similarity("Bécassine", "Becassine"), 1.0 - 1.0 / 9.0));
    }

    #[test]
    fn ranks_best_first_and_keeps_ties_in_order() {
        let names = ["Kansas", "Sarah Bernhardt", "Sara Bernhardt", "Bernhardt", "Sarah"];
        let ranked = rank_by_similarity("sarah bernhardt", names.iter(), |s| Some(*s), 0.7);
        let ordered: Vec<&str> = ranked.iter().map(|(s, _)| **s).collect();
        assert_eq!(
            ordered,
            vec!["Sarah Bernhardt", "Sara Bernhardt", "Bernhardt", "Sarah"]
        );
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn ranking_skips_missing_keys() {
        let names = [Some("Kansas"), None, Some("kansas")];
        let ranked = rank_by_similarity("Kansas", names.iter(), |s| *s, 0.5);
        assert_eq!(ranked.len(), 2);
    }
}
