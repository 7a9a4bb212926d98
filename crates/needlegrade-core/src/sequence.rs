//! Answer-set key ordering and value-sequence construction.
//!
//! The ordering policy is all-or-nothing: if every key parses as a
//! non-negative integer the whole set sorts numerically, otherwise the whole
//! set sorts lexicographically. Mixed per-key ordering is never produced; a
//! single bad key silently changes the order of the entire set, which is why
//! the policy lives in one function with its own tests.

use crate::model::{AnswerSet, Scalar};

/// Sort keys by the all-or-nothing policy: numeric ascending when every key
/// parses as a non-negative integer, lexicographic ascending otherwise.
pub fn sort_keys(keys: &[String]) -> Vec<String> {
    let parsed: Option<Vec<u64>> = keys.iter().map(|k| k.parse::<u64>().ok()).collect();

    let mut sorted: Vec<String> = keys.to_vec();
    match parsed {
        Some(numeric) => {
            let mut pairs: Vec<(u64, String)> = numeric.into_iter().zip(sorted).collect();
            pairs.sort_by_key(|(n, _)| *n);
            pairs.into_iter().map(|(_, k)| k).collect()
        }
        None => {
            sorted.sort();
            sorted
        }
    }
}

/// Build the ordered key and value sequences of an answer set.
///
/// The value sequence discards key identity; it exists only for edit-distance
/// scoring. Empty sets yield empty sequences. Never fails.
pub fn build_sequence(set: &AnswerSet) -> (Vec<String>, Vec<Scalar>) {
    let keys: Vec<String> = set.0.keys().cloned().collect();
    let ordered = sort_keys(&keys);
    let values = ordered
        .iter()
        .map(|k| set.0[k].clone())
        .collect();
    (ordered, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Side;

    fn keys(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn numeric_keys_sort_numerically() {
        assert_eq!(
            sort_keys(&keys(&["10", "2", "0"])),
            keys(&["0", "2", "10"])
        );
    }

    #[test]
    fn one_bad_key_forces_lexicographic_for_all() {
        // "10" < "2" lexicographically; the single non-numeric key flips
        // the ordering of every other key too.
        assert_eq!(
            sort_keys(&keys(&["10", "2", "abc"])),
            keys(&["10", "2", "abc"])
        );
    }

    #[test]
    fn negative_key_is_not_numeric() {
        assert_eq!(
            sort_keys(&keys(&["-1", "10", "2"])),
            keys(&["-1", "10", "2"])
        );
    }

    #[test]
    fn empty_keys_yield_empty() {
        assert!(sort_keys(&[]).is_empty());
    }

    #[test]
    fn build_sequence_orders_values_by_key() {
        let set = AnswerSet::from_json(
            serde_json::json!({"2": "C", "0": "A", "1": "B"}),
            Side::Standard,
        )
        .unwrap();
        let (keys, values) = build_sequence(&set);
        assert_eq!(keys, vec!["0", "1", "2"]);
        assert_eq!(
            values,
            vec![
                Scalar::Text("A".into()),
                Scalar::Text("B".into()),
                Scalar::Text("C".into())
            ]
        );
    }

    #[test]
    fn build_sequence_empty_set() {
        let (keys, values) = build_sequence(&AnswerSet::default());
        assert!(keys.is_empty());
        assert!(values.is_empty());
    }
}
