//! Non-repeating canned-scenario selection.
//!
//! Each field owns a `ShuffledBag`: an arena of catalog indices with a consumed
//! bitset. Draws are uniform over unconsumed indices. When every index has been
//! drawn the bag refills instead of failing, and the refill skips the index that
//! was just served so a title never appears twice in a row.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::assessment::field_profiles::canonical_field;
use crate::fallback::scenario_catalog::catalog_for;
use crate::models::assessment::ScenarioVariant;

#[derive(Debug, Clone)]
pub struct ShuffledBag {
    consumed: Vec<bool>,
    last: Option<usize>,
}

impl ShuffledBag {
    pub fn new(len: usize) -> Self {
        Self {
            consumed: vec![false; len],
            last: None,
        }
    }

    pub fn remaining(&self) -> usize {
        self.consumed.iter().filter(|c| !**c).count()
    }

    /// Draws an unconsumed index. `None` only for an empty bag.
    pub fn draw(&mut self, rng: &mut StdRng) -> Option<usize> {
        if self.consumed.is_empty() {
            return None;
        }

        if self.remaining() == 0 {
            self.consumed.iter_mut().for_each(|c| *c = false);
            if let (Some(last), true) = (self.last, self.consumed.len() > 1) {
                self.consumed[last] = true;
            }
        }

        let available: Vec<usize> = (0..self.consumed.len())
            .filter(|&i| !self.consumed[i])
            .collect();
        let pick = *available.choose(rng)?;
        self.consumed[pick] = true;
        self.last = Some(pick);
        Some(pick)
    }
}

/// Per-session canned-scenario state: one bag per canonical field.
#[derive(Debug)]
pub struct ScenarioTracker {
    bags: HashMap<&'static str, ShuffledBag>,
    rng: StdRng,
}

impl ScenarioTracker {
    pub fn new(rng: StdRng) -> Self {
        Self {
            bags: HashMap::new(),
            rng,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Serves the next canned scenario for `field`, never failing.
    pub fn next_scenario(&mut self, field: &str) -> ScenarioVariant {
        let key = canonical_field(field);
        let catalog = catalog_for(key);
        let bag = self
            .bags
            .entry(key)
            .or_insert_with(|| ShuffledBag::new(catalog.len()));

        let index = bag.draw(&mut self.rng).unwrap_or(0);
        debug!(
            "Serving canned scenario {} for field '{}' ({} left in bag)",
            index,
            key,
            bag.remaining()
        );
        catalog[index].to_variant()
    }

    /// Forgets every previous pick for every field.
    pub fn reset(&mut self) {
        self.bags.clear();
    }

    /// Unconsumed entries for `field`; a field never drawn from has its full catalog.
    #[cfg(test)]
    pub fn remaining(&self, field: &str) -> usize {
        let key = canonical_field(field);
        self.bags
            .get(key)
            .map(ShuffledBag::remaining)
            .unwrap_or_else(|| catalog_for(key).len())
    }
}
