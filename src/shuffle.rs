//! Seedable Fisher-Yates shuffling.

use rand::Rng;

/// Shuffles `items` in place with an explicit random source.
///
/// Walks from the back, swapping each element with a uniformly chosen one at
/// or before it, so every permutation is equally likely.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let k = rng.random_range(0..=i);
        items.swap(i, k);
    }
}

/// Returns a shuffled copy of `items`.
pub fn shuffled<T: Clone, R: Rng>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut copy = items.to_vec();
    shuffle(&mut copy, rng);
    copy
}
