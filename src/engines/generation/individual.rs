use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A candidate string and its cached fitness.
///
/// Individuals are never modified after construction; reproduction always
/// builds a new one from the parents' DNA.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    dna: Vec<char>,
    fitness: f64,
}

impl Individual {
    pub fn new(dna: Vec<char>, fitness: f64) -> Self {
        Self { dna, fitness }
    }

    pub fn dna(&self) -> &[char] {
        &self.dna
    }

    pub fn dna_string(&self) -> String {
        self.dna.iter().collect()
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn len(&self) -> usize {
        self.dna.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dna.is_empty()
    }
}

/// Orders two individuals by fitness, lowest first.
pub fn compare_fitness(a: &Individual, b: &Individual) -> Ordering {
    a.fitness
        .partial_cmp(&b.fitness)
        .unwrap_or(Ordering::Equal)
}
