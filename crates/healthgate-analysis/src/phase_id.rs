//! Short random identifiers for extracted phases
//!
//! Phase names are not guaranteed to be unique within an encounter, so every
//! extracted phase gets an identifier that is unique within one extraction.
//! Identifiers are not stable across extractions.

use std::collections::HashSet;

use rand::{Rng, SeedableRng as _, distr::Alphanumeric};
use rand_pcg::Pcg32;
use serde::Serialize;

/// Identifier of an extracted phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(transparent)]
pub struct PhaseId(String);

impl PhaseId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Issues [`PhaseId`]s that never repeat within one generator.
#[derive(Debug, Clone)]
pub struct PhaseIdGenerator {
    rng: Pcg32,
    issued: HashSet<String>,
}

impl Default for PhaseIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseIdGenerator {
    pub const ID_LEN: usize = 8;

    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but deterministic for a given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            issued: HashSet::new(),
        }
    }

    pub fn next_id(&mut self) -> PhaseId {
        loop {
            let id = (&mut self.rng)
                .sample_iter(Alphanumeric)
                .take(Self::ID_LEN)
                .map(char::from)
                .collect::<String>();
            if self.issued.insert(id.clone()) {
                return PhaseId(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_alphanumeric() {
        let mut ids = PhaseIdGenerator::new();
        let id = ids.next_id();
        assert_eq!(id.as_str().len(), PhaseIdGenerator::ID_LEN);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids = PhaseIdGenerator::with_seed(7);
        let issued = (0..1000).map(|_| ids.next_id()).collect::<HashSet<_>>();
        assert_eq!(issued.len(), 1000);
    }

    #[test]
    fn test_same_seed_same_ids() {
        let mut a = PhaseIdGenerator::with_seed(42);
        let mut b = PhaseIdGenerator::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.next_id(), b.next_id());
        }
    }

    #[test]
    fn test_serializes_as_string() {
        let id = PhaseIdGenerator::with_seed(1).next_id();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
