//! Weighted random choice.
//!
//! [`Sampler`] keeps an ordered list of `(choice, weight)` pairs and picks one
//! by inverse-CDF lookup: the unit interval is partitioned into contiguous
//! buckets proportional to each weight, in insertion order, and a uniform draw
//! selects the bucket it lands in. Additions are incremental -- each one
//! recomputes the cumulative boundaries -- and chainable.

use rand::Rng;

use crate::error::Error;

/// A reusable weighted chooser over an ordered set of alternatives.
#[derive(Debug, Clone)]
pub struct Sampler<T> {
    choices: Vec<T>,
    weights: Vec<f64>,
    /// Cumulative normalized weights; `markers[i]` is the upper bound of
    /// choice `i`'s bucket in [0,1).
    markers: Vec<f64>,
}

impl<T> Sampler<T> {
    /// Create a sampler with no choices.
    pub fn new() -> Self {
        Self {
            choices: Vec::new(),
            weights: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Add a choice with the default weight of 1.
    pub fn add(&mut self, choice: T) -> &mut Self {
        self.add_weighted(choice, 1.0)
    }

    /// Add a choice with an explicit weight. Weights must be positive.
    pub fn add_weighted(&mut self, choice: T, weight: f64) -> &mut Self {
        debug_assert!(weight > 0.0, "sampler weights must be positive");
        self.choices.push(choice);
        self.weights.push(weight);
        self.recompute_markers();
        self
    }

    /// Number of registered choices.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Whether no choices have been registered.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Draw one choice, with probability proportional to its weight.
    ///
    /// Returns [`Error::EmptySampler`] when no choices are registered.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T, Error> {
        if self.choices.is_empty() {
            return Err(Error::EmptySampler);
        }
        let n = rng.gen_range(0.0..1.0);
        for (choice, marker) in self.choices.iter().zip(&self.markers) {
            if n < *marker {
                return Ok(choice);
            }
        }
        // Cumulative rounding can leave the final marker fractionally
        // below 1.0; the draw then belongs to the last bucket.
        self.choices.last().ok_or(Error::EmptySampler)
    }

    fn recompute_markers(&mut self) {
        let total: f64 = self.weights.iter().sum();
        self.markers.clear();
        let mut cumulative = 0.0;
        for weight in &self.weights {
            cumulative += weight;
            self.markers.push(cumulative / total);
        }
    }
}

impl<T> Default for Sampler<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
