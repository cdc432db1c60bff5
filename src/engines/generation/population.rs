use crate::config::traits::ConfigSection;
use crate::config::SimulationConfig;
use crate::engines::generation::alphabet::Alphabet;
use crate::engines::generation::fitness::FitnessFunction;
use crate::engines::generation::individual::{compare_fitness, Individual};
use crate::engines::generation::operators::{
    crossover, mutate, random_dna, MutationPolicy, ParentSelector,
};
use crate::error::WordfinderError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fitness statistics of one evaluated generation.
///
/// Produced fresh by every evaluation and handed to reproduction, so no
/// running totals survive between generations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub generation: usize,
    pub size: usize,
    /// Saturates to infinity for long exponential targets; selection never reads it.
    pub total_fitness: f64,
    pub best_fitness: f64,
    pub best_index: usize,
    pub nonzero_count: usize,
}

impl GenerationSummary {
    pub fn evaluate(members: &[Individual], generation: usize) -> Self {
        let (best_index, best_fitness) = members
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| compare_fitness(a, b))
            .map(|(i, ind)| (i, ind.fitness()))
            .unwrap_or((0, 0.0));

        Self {
            generation,
            size: members.len(),
            total_fitness: members.iter().map(Individual::fitness).sum(),
            best_fitness,
            best_index,
            nonzero_count: members.iter().filter(|ind| ind.fitness() > 0.0).count(),
        }
    }
}

/// Fixed-size set of candidate strings evolving toward one target.
#[derive(Debug, Clone)]
pub struct Population {
    fitness: FitnessFunction,
    mutation_rate: f64,
    mutation_policy: MutationPolicy,
    size: usize,
    members: Vec<Individual>,
    generation: usize,
}

impl Population {
    /// Validate `config` and seed `population_size` random individuals.
    pub fn initialize<R: Rng>(
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Result<Self, WordfinderError> {
        config.validate()?;
        let fitness = config.fitness_function()?;

        let mut population = Self {
            fitness,
            mutation_rate: config.mutation_rate,
            mutation_policy: config.mutation,
            size: config.population_size,
            members: Vec::with_capacity(config.population_size),
            generation: 1,
        };

        let length = population.fitness.target().len();
        population.members = (0..population.size)
            .map(|_| {
                let dna = random_dna(length, population.fitness.alphabet(), rng);
                population.score(dna)
            })
            .collect();

        Ok(population)
    }

    /// Score a candidate against the target.
    pub fn fitness(&self, dna: &[char]) -> f64 {
        self.fitness.score(dna)
    }

    pub fn evaluate(&self) -> GenerationSummary {
        GenerationSummary::evaluate(&self.members, self.generation)
    }

    pub fn select_parents<R: Rng>(
        &self,
        summary: &GenerationSummary,
        rng: &mut R,
    ) -> Result<(usize, usize), WordfinderError> {
        let selector = self.selector(summary)?;
        Ok(selector.select(rng))
    }

    pub fn crossover<R: Rng>(
        &self,
        parent_a: &Individual,
        parent_b: &Individual,
        rng: &mut R,
    ) -> Vec<char> {
        crossover(parent_a, parent_b, rng)
    }

    pub fn mutate<R: Rng>(&self, dna: &[char], rng: &mut R) -> Vec<char> {
        mutate(
            dna,
            self.mutation_rate,
            self.mutation_policy,
            self.fitness.alphabet(),
            rng,
        )
    }

    /// Replace every member with a child of two fitness-selected parents.
    pub fn advance_generation<R: Rng>(
        &mut self,
        summary: &GenerationSummary,
        rng: &mut R,
    ) -> Result<(), WordfinderError> {
        let selector = self.selector(summary)?;

        let next_generation: Vec<Individual> = (0..self.size)
            .map(|_| {
                let (a, b) = selector.select(rng);
                let child = self.crossover(&self.members[a], &self.members[b], rng);
                let child = self.mutate(&child, rng);
                self.score(child)
            })
            .collect();

        debug_assert_eq!(next_generation.len(), self.size);
        self.members = next_generation;
        self.generation += 1;
        Ok(())
    }

    fn selector(&self, summary: &GenerationSummary) -> Result<ParentSelector, WordfinderError> {
        if summary.generation != self.generation {
            return Err(WordfinderError::Selection(format!(
                "Summary is for generation {} but the population is at generation {}",
                summary.generation, self.generation
            )));
        }
        let scores: Vec<f64> = self.members.iter().map(Individual::fitness).collect();
        ParentSelector::new(summary, &scores)
    }

    fn score(&self, dna: Vec<char>) -> Individual {
        let fitness = self.fitness.score(&dna);
        Individual::new(dna, fitness)
    }

    pub fn best(&self) -> Option<&Individual> {
        self.members.iter().max_by(|a, b| compare_fitness(a, b))
    }

    pub fn members(&self) -> &[Individual] {
        &self.members
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn target(&self) -> String {
        self.fitness.target().iter().collect()
    }

    pub fn alphabet(&self) -> &Alphabet {
        self.fitness.alphabet()
    }

    pub fn max_fitness(&self) -> f64 {
        self.fitness.max_score()
    }

    pub fn is_solved(&self, summary: &GenerationSummary) -> bool {
        self.fitness.is_perfect(summary.best_fitness)
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }
}
