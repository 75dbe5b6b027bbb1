//! Injectable source of random choices.
//!
//! Every random decision in mockdown goes through [`ChoiceSource`]. Any
//! `rand::RngCore` implements it, so a `StdRng` seeded with
//! [`seeded`] reproduces a batch exactly.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::HashSet;

/// Minimal random-choice interface used by the registry and generators.
///
/// Implementors supply two primitives; every other helper is derived from
/// them so that a scripted source only needs to answer `below` and `unit`.
pub trait ChoiceSource {
    /// Uniform integer in `0..upper`. Returns 0 when `upper` is 0.
    fn below(&mut self, upper: usize) -> usize;

    /// Uniform float in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Uniform integer in `lo..=hi`. Returns `lo` when `hi <= lo`.
    fn between(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        lo + self.below(hi - lo + 1)
    }

    /// Bernoulli trial. Probabilities at or above 1.0 always succeed.
    fn chance(&mut self, probability: f64) -> bool {
        if probability >= 1.0 {
            return true;
        }
        if probability <= 0.0 {
            return false;
        }
        self.unit() < probability
    }

    /// Pick one element uniformly, or `None` for an empty slice.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        items.get(self.below(items.len()))
    }

    /// Draw `k` distinct indices from `0..len` (all of them if `k >= len`),
    /// in random order.
    ///
    /// Floyd's algorithm picks the subset in time proportional to `k`; a
    /// Fisher-Yates pass then shuffles it, since Floyd's output favours
    /// late indices at the end.
    fn sample_indices(&mut self, len: usize, k: usize) -> Vec<usize>
    where
        Self: Sized,
    {
        let k = k.min(len);
        let mut seen = HashSet::with_capacity(k);
        let mut out = Vec::with_capacity(k);
        for j in (len - k)..len {
            let t = self.below(j + 1);
            let chosen = if seen.contains(&t) { j } else { t };
            seen.insert(chosen);
            out.push(chosen);
        }
        for i in (1..out.len()).rev() {
            out.swap(i, self.below(i + 1));
        }
        out
    }
}

impl<R: RngCore> ChoiceSource for R {
    fn below(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.random_range(0..upper)
    }

    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Build a `StdRng` from an explicit seed, or from OS entropy when absent.
pub fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            log::debug!("using explicit seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    }
}
