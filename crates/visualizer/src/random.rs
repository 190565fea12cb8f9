//! Random tree generation

use std::collections::HashSet;
use std::ops::{Range, RangeInclusive};

use bst_tree::Bst;
use log::debug;
use rand::Rng;

/// How many values a random tree holds
pub const NODE_COUNT: RangeInclusive<usize> = 4..=10;

/// Range the random values are drawn from
pub const VALUE_RANGE: Range<i64> = 0..100;

/// Draw between 4 and 10 distinct values in `[0, 100)`.
///
/// Values come back in the order they were first drawn, which is also the
/// order they are inserted in.
pub fn random_values<R: Rng + ?Sized>(rng: &mut R) -> Vec<i64> {
    let size = rng.gen_range(NODE_COUNT);
    let mut seen = HashSet::with_capacity(size);
    let mut values = Vec::with_capacity(size);

    while values.len() < size {
        let value = rng.gen_range(VALUE_RANGE);
        if seen.insert(value) {
            values.push(value);
        }
    }
    values
}

/// Build a fresh tree from [`random_values`]
pub fn random_tree<R: Rng + ?Sized>(rng: &mut R) -> Bst {
    let values = random_values(rng);
    debug!("random tree from {values:?}");
    Bst::from_values(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_values_are_unique_and_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let values = random_values(&mut rng);
            assert!(NODE_COUNT.contains(&values.len()));
            assert!(values.iter().all(|v| VALUE_RANGE.contains(v)));

            let unique: HashSet<_> = values.iter().collect();
            assert_eq!(unique.len(), values.len());
        }
    }

    #[test]
    fn test_tree_holds_every_value() {
        let mut rng = StdRng::seed_from_u64(7);
        let tree = random_tree(&mut rng);
        assert!(NODE_COUNT.contains(&tree.len()));
        assert!(tree.is_valid_bst());
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = random_values(&mut StdRng::seed_from_u64(1));
        let b = random_values(&mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }
}
