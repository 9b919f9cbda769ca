//! Key derivation for lagged columns.
//!
//! Lag construction calls a key function `(key, lag_order) -> U` once per
//! output column, with lag order `0` meaning the unshifted column. The
//! helpers here are the two common choices; any pure closure works.
use std::fmt::Display;

/// `"a"` for lag 0, `"lag{j}(a)"` for lag `j`.
pub fn lagged_string_key<K: Display + ?Sized>(key: &K, lag: usize) -> String {
    if lag == 0 { key.to_string() } else { format!("lag{lag}({key})") }
}

/// `(key, lag)` pairs, keeping the original key type.
pub fn lagged_pair_key<K: Clone>(key: &K, lag: usize) -> (K, usize) {
    (key.clone(), lag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify the string and pair forms for lag orders 0..=2.
    //
    // Expect
    // ------
    // - `["a", "lag1(a)", "lag2(a)"]` and `[("a", 0), ("a", 1), ("a", 2)]`.
    fn lagged_keys_encode_lag_order() {
        let strings: Vec<String> = (0..=2).map(|j| lagged_string_key("a", j)).collect();
        let pairs: Vec<(char, usize)> = (0..=2).map(|j| lagged_pair_key(&'a', j)).collect();

        assert_eq!(strings, vec!["a", "lag1(a)", "lag2(a)"]);
        assert_eq!(pairs, vec![('a', 0), ('a', 1), ('a', 2)]);
    }
}
