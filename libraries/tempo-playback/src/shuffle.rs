//! Seeded shuffle permutations
//!
//! A shuffled collection plays its items through a permutation of linear
//! indices. The permutation is fully determined by the item count and a
//! seed, so replaying the same command feed reproduces the same order.

use crate::resolver;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Play order over the linear items of a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Linear order `[0, 1, .., n-1]`
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// Deterministic Fisher-Yates shuffle of `len` indices
    pub fn seeded(len: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut rng);
        Self(order)
    }

    /// Wrap an explicit order, rejecting anything that is not a permutation
    pub fn from_indices(indices: Vec<usize>) -> Option<Self> {
        let mut seen = vec![false; indices.len()];
        for &index in &indices {
            let slot = seen.get_mut(index)?;
            if *slot {
                return None;
            }
            *slot = true;
        }
        Some(Self(indices))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.0.iter().enumerate().all(|(i, &item)| i == item)
    }

    /// Play-order slot holding linear item `item`
    pub fn position_of(&self, item: usize) -> Option<usize> {
        self.0.iter().position(|&i| i == item)
    }
}

/// Re-anchor a virtual position when the play order changes
///
/// The current item and the time elapsed inside it are preserved; only the
/// offset of the item within the order moves. Returns `None` when the
/// position does not resolve (zero total duration).
pub fn reanchor(durations: &[u64], from: &Permutation, to: &Permutation, position: u64) -> Option<u64> {
    let current = resolver::resolve(durations, from.as_slice(), position)?;
    let slot = to.position_of(current.item_index)?;

    Some(resolver::played_duration_before(durations, to.as_slice(), slot) + current.elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_linear() {
        let order = Permutation::identity(4);
        assert_eq!(order.as_slice(), &[0, 1, 2, 3]);
        assert!(order.is_identity());
    }

    #[test]
    fn same_seed_same_order() {
        let a = Permutation::seeded(20, 42);
        let b = Permutation::seeded(20, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_order_is_a_permutation() {
        let order = Permutation::seeded(50, 7);
        let mut sorted = order.as_slice().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn from_indices_rejects_duplicates_and_gaps() {
        assert!(Permutation::from_indices(vec![1, 0, 2]).is_some());
        assert!(Permutation::from_indices(vec![0, 0]).is_none());
        assert!(Permutation::from_indices(vec![0, 2]).is_none());
    }

    #[test]
    fn reanchor_keeps_item_and_elapsed() {
        // B is 50s in; under [B, A] it starts at 0
        let linear = Permutation::identity(2);
        let swapped = Permutation::from_indices(vec![1, 0]).unwrap();

        assert_eq!(reanchor(&[100, 100], &linear, &swapped, 150), Some(50));
        assert_eq!(reanchor(&[100, 100], &swapped, &linear, 50), Some(150));
    }

    #[test]
    fn reanchor_on_empty_source_fails() {
        let order = Permutation::identity(0);
        assert_eq!(reanchor(&[], &order, &order, 0), None);
    }
}
