use super::traits::ConfigSection;
use crate::engines::generation::alphabet::Alphabet;
use crate::engines::generation::fitness::{FitnessFunction, FitnessPolicy};
use crate::engines::generation::operators::MutationPolicy;
use crate::error::WordfinderError;
use serde::{Deserialize, Serialize};

/// Parameters of a single simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub target: String,
    pub population_size: usize,
    /// Per-character mutation probability in `[0, 1]`.
    pub mutation_rate: f64,
    pub fitness: FitnessPolicy,
    pub mutation: MutationPolicy,
    pub alphabet: Alphabet,
    /// Stop after this many generations even without a perfect match.
    pub max_generations: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            target: "unicorn".to_string(),
            population_size: 100,
            mutation_rate: 0.05,
            fitness: FitnessPolicy::Exponential,
            mutation: MutationPolicy::Replace,
            alphabet: Alphabet::printable_ascii(),
            max_generations: None,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Scoring function for this target, alphabet and policy.
    pub fn fitness_function(&self) -> Result<FitnessFunction, WordfinderError> {
        FitnessFunction::new(self.fitness, &self.target, self.alphabet.clone())
    }
}

impl ConfigSection for SimulationConfig {
    fn section_name() -> &'static str {
        "simulation"
    }

    fn validate(&self) -> Result<(), WordfinderError> {
        if self.target.is_empty() {
            return Err(WordfinderError::Configuration(
                "Target must not be empty".to_string(),
            ));
        }
        if self.population_size < 2 {
            return Err(WordfinderError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(WordfinderError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        if let MutationPolicy::Drift { max_offset } = self.mutation {
            if max_offset == 0 || max_offset >= self.alphabet.len() {
                return Err(WordfinderError::Configuration(format!(
                    "Mutation range must be between 1 and {} for an alphabet of {} symbols",
                    self.alphabet.len().saturating_sub(1),
                    self.alphabet.len()
                )));
            }
        }
        if self.max_generations == Some(0) {
            return Err(WordfinderError::Configuration(
                "Generation cap must be at least 1".to_string(),
            ));
        }
        self.fitness_function().map(|_| ())
    }
}
