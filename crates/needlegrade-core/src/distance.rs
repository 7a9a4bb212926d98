//! Edit-distance scoring between value sequences.

/// Edit distance between two sequences by the classical DP recurrence.
///
/// With `allow_transposition`, adjacent transpositions cost 1 (Damerau).
/// The flag defaults to off everywhere in this crate; enabling it changes
/// scores for swapped answers. See `GradingConfig::allow_transposition`.
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T], allow_transposition: bool) -> usize {
    let m = a.len();
    let n = b.len();
    let mut dp = vec![vec![0usize; n + 1]; m + 1];

    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);

            if allow_transposition
                && i > 1
                && j > 1
                && a[i - 1] == b[j - 2]
                && a[i - 2] == b[j - 1]
            {
                best = best.min(dp[i - 2][j - 2] + 1);
            }

            dp[i][j] = best;
        }
    }

    dp[m][n]
}

/// Accuracy percentage in `[0, 100]` for a (standard, response) pair.
///
/// `(1 - distance/max_len) * 100`; when both sequences are empty the score
/// is 0.0 by convention, not 100.0.
pub fn accuracy<T: PartialEq>(standard: &[T], response: &[T], allow_transposition: bool) -> f64 {
    let max_len = standard.len().max(response.len());
    if max_len == 0 {
        return 0.0;
    }
    let distance = edit_distance(standard, response, allow_transposition);
    (1.0 - distance as f64 / max_len as f64) * 100.0
}
