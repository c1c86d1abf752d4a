// One-hot encoding of categorical values.
//
// Every distinct category gets a single set bit. The first category seen
// takes the rightmost position, the next one the position to its left, and
// so on; repeated categories reuse the bits assigned the first time.

use std::collections::HashMap;

use anyhow::Result;

/// An encoded row: the original category and its one-hot bits.
pub type EncodedRow = (String, Vec<u8>);

/// Encode `categories` in input order.
///
/// The vector width equals the number of distinct categories. Fails when
/// called with no categories at all.
pub fn fit_transform<S: AsRef<str>>(categories: &[S]) -> Result<Vec<EncodedRow>> {
    if categories.is_empty() {
        anyhow::bail!("expected at least 1 arguments, got 0");
    }

    let mut positions: HashMap<&str, usize> = HashMap::new();
    for category in categories {
        let next = positions.len();
        positions.entry(category.as_ref()).or_insert(next);
    }
    let width = positions.len();

    let rows = categories
        .iter()
        .map(|category| {
            let category = category.as_ref();
            let mut bits = vec![0u8; width];
            bits[width - 1 - positions[category]] = 1;
            (category.to_string(), bits)
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_category_reuses_bits() {
        let rows = fit_transform(&["Moscow", "New York", "Moscow", "London"]).unwrap();
        assert_eq!(
            rows,
            vec![
                ("Moscow".to_string(), vec![0, 0, 1]),
                ("New York".to_string(), vec![0, 1, 0]),
                ("Moscow".to_string(), vec![0, 0, 1]),
                ("London".to_string(), vec![1, 0, 0]),
            ]
        );
    }

    #[test]
    fn empty_input_fails() {
        let empty: [&str; 0] = [];
        let err = fit_transform(&empty).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }
}
