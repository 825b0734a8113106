// Randomness Source
// Every probabilistic rule draws through this trait so callers can inject a seeded generator.

use rand::seq::{index, IndexedRandom};
use rand::Rng;

pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `[0, n)`. Returns 0 when `n == 0`.
    fn below(&mut self, n: usize) -> usize;

    /// Weighted coin flip. A probability of zero never fires.
    fn chance(&mut self, probability: f64) -> bool {
        probability > 0.0 && self.next_f64() < probability
    }

    /// Uniform integer in the inclusive range `[lo, hi]`; collapses to `lo` when `hi <= lo`.
    fn between(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        lo + self.below(hi - lo + 1)
    }

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>;

    /// `k` distinct indices from `0..n`, in draw order. `k` is capped at `n`.
    fn sample_indices(&mut self, n: usize, k: usize) -> Vec<usize>;
}

impl<R: Rng> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.random_range(0..n)
    }

    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        IndexedRandom::choose(items, self)
    }

    fn sample_indices(&mut self, n: usize, k: usize) -> Vec<usize> {
        index::sample(self, n, k.min(n)).into_vec()
    }
}
