//! Longest-common-subsequence alignment.
//!
//! One shared implementation serves both consumers: the index view feeds
//! position-accuracy counting, the anchor-key view feeds error
//! classification.

/// Indices into `a` of elements belonging to a longest common subsequence
/// of `a` and `b`. Strictly increasing.
///
/// Backtrace ties (`dp[i-1][j] == dp[i][j-1]`) resolve by decrementing the
/// row index `i`. Several equal-length LCS solutions can exist; this
/// tie-break pins which one is reported and must not change, since
/// downstream frequency tables depend on it.
pub fn lcs_indices<T: PartialEq>(a: &[T], b: &[T]) -> Vec<usize> {
    let m = a.len();
    let n = b.len();
    let mut dp = vec![vec![0usize; n + 1]; m + 1];

    for i in 1..=m {
        for j in 1..=n {
            if a[i - 1] == b[j - 1] {
                dp[i][j] = dp[i - 1][j - 1] + 1;
            } else {
                dp[i][j] = dp[i - 1][j].max(dp[i][j - 1]);
            }
        }
    }

    let mut indices = Vec::with_capacity(dp[m][n]);
    let mut i = m;
    let mut j = n;
    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            indices.push(i - 1);
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] >= dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    indices.reverse();
    indices
}

/// Anchor keys: the elements of `standard_keys` that form an LCS with
/// `correct_model_keys`, i.e. the maximal in-order-correct subsequence.
pub fn anchor_keys(standard_keys: &[u32], correct_model_keys: &[u32]) -> Vec<u32> {
    lcs_indices(standard_keys, correct_model_keys)
        .into_iter()
        .map(|i| standard_keys[i])
        .collect()
}
