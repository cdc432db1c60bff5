use crate::engines::generation::alphabet::Alphabet;
use crate::engines::generation::individual::Individual;
use crate::engines::generation::population::GenerationSummary;
use crate::error::WordfinderError;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound on roulette redraws when both draws hit the same parent.
pub const MAX_SELECTION_RETRIES: usize = 64;

/// How a character changes when it mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MutationPolicy {
    /// Replace with a uniformly drawn alphabet symbol.
    #[default]
    Replace,
    /// Shift by a non-zero offset of at most `max_offset` steps around the alphabet.
    Drift { max_offset: usize },
}

/// Fitness-proportional parent picker for one generation.
///
/// Built once from the generation summary and reused for every child.
#[derive(Debug, Clone)]
pub enum ParentSelector {
    /// No individual has any fitness.
    Uniform { size: usize },
    /// A single individual holds all of the fitness.
    Alpha { alpha: usize, size: usize },
    Roulette { weights: WeightedIndex<f64>, size: usize },
}

impl ParentSelector {
    pub fn new(summary: &GenerationSummary, scores: &[f64]) -> Result<Self, WordfinderError> {
        let size = scores.len();
        if size < 2 {
            return Err(WordfinderError::Selection(format!(
                "Need at least two individuals to pick distinct parents, got {}",
                size
            )));
        }
        if summary.size != size {
            return Err(WordfinderError::Selection(format!(
                "Summary covers {} individuals but {} scores were given",
                summary.size, size
            )));
        }

        if summary.nonzero_count == 0 {
            return Ok(ParentSelector::Uniform { size });
        }

        if summary.nonzero_count == 1 {
            return Ok(ParentSelector::Alpha {
                alpha: summary.best_index,
                size,
            });
        }

        // Relative to the best score, so the weight total stays finite for huge exponential scores
        let best = summary.best_fitness;
        let weights = WeightedIndex::new(scores.iter().map(|s| (s / best).max(0.0)))
            .map_err(|e| WordfinderError::Selection(format!("Invalid fitness weights: {}", e)))?;

        Ok(ParentSelector::Roulette { weights, size })
    }

    /// Two distinct indices into the population.
    pub fn select<R: Rng>(&self, rng: &mut R) -> (usize, usize) {
        match self {
            ParentSelector::Uniform { size } => {
                let picked = rand::seq::index::sample(rng, *size, 2);
                (picked.index(0), picked.index(1))
            }
            ParentSelector::Alpha { alpha, size } => (*alpha, uniform_other(*alpha, *size, rng)),
            ParentSelector::Roulette { weights, size } => {
                let a = weights.sample(rng);
                for _ in 0..MAX_SELECTION_RETRIES {
                    let b = weights.sample(rng);
                    if b != a {
                        return (a, b);
                    }
                }
                log::warn!(
                    "Roulette drew parent {} {} times in a row, picking its mate uniformly",
                    a,
                    MAX_SELECTION_RETRIES + 1
                );
                (a, uniform_other(a, *size, rng))
            }
        }
    }
}

/// Uniform index in `0..size` that is never `excluded`.
fn uniform_other<R: Rng>(excluded: usize, size: usize, rng: &mut R) -> usize {
    let index = rng.gen_range(0..size - 1);
    if index >= excluded {
        index + 1
    } else {
        index
    }
}

/// Convenience wrapper: summarise `population` and pick one couple.
pub fn select_parents<R: Rng>(
    population: &[Individual],
    rng: &mut R,
) -> Result<(usize, usize), WordfinderError> {
    let summary = GenerationSummary::evaluate(population, 0);
    let scores: Vec<f64> = population.iter().map(Individual::fitness).collect();
    let selector = ParentSelector::new(&summary, &scores)?;
    Ok(selector.select(rng))
}

/// Fitness-weighted uniform crossover.
///
/// Each position comes from the fitter parent with probability
/// `fitter / (a + b)`; with no fitness on either side the choice is a coin flip.
pub fn crossover<R: Rng>(parent_a: &Individual, parent_b: &Individual, rng: &mut R) -> Vec<char> {
    let scale = parent_a.fitness().max(parent_b.fitness());
    let prob_a = if scale > 0.0 {
        let (a, b) = (parent_a.fitness() / scale, parent_b.fitness() / scale);
        (a / (a + b)).clamp(0.0, 1.0)
    } else {
        0.5
    };

    parent_a
        .dna()
        .iter()
        .zip(parent_b.dna())
        .map(|(&a, &b)| if rng.gen_bool(prob_a) { a } else { b })
        .collect()
}

/// Per-character mutation.
pub fn mutate<R: Rng>(
    dna: &[char],
    mutation_rate: f64,
    policy: MutationPolicy,
    alphabet: &Alphabet,
    rng: &mut R,
) -> Vec<char> {
    dna.iter()
        .map(|&c| {
            if rng.gen::<f64>() < mutation_rate {
                mutate_char(c, policy, alphabet, rng)
            } else {
                c
            }
        })
        .collect()
}

fn mutate_char<R: Rng>(c: char, policy: MutationPolicy, alphabet: &Alphabet, rng: &mut R) -> char {
    match policy {
        MutationPolicy::Replace => alphabet.random_symbol(rng),
        MutationPolicy::Drift { max_offset } => {
            let max_offset = max_offset.max(1) as i64;
            // Draw from 2k values and skip zero: [-k, -1] and [1, k]
            let variation = rng.gen_range(1 - max_offset..=max_offset);
            let offset = if variation < 1 { variation - 1 } else { variation };
            alphabet.shift(c, offset)
        }
    }
}

/// Generate random DNA
pub fn random_dna<R: Rng>(length: usize, alphabet: &Alphabet, rng: &mut R) -> Vec<char> {
    (0..length).map(|_| alphabet.random_symbol(rng)).collect()
}
