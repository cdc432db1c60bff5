use crate::config::SimulationConfig;
use crate::engines::generation::population::{GenerationSummary, Population};
use crate::error::WordfinderError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Snapshot of one evaluated generation, handed to progress callbacks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: usize,
    pub best_dna: String,
    pub best_fitness: f64,
    pub max_fitness: f64,
    pub total_fitness: f64,
}

/// Result of a finished simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    pub target: String,
    /// Generations evaluated, counting the seeded population as the first.
    pub generations: usize,
    pub converged: bool,
    pub best_dna: String,
    pub best_fitness: f64,
    pub max_fitness: f64,
    pub population_size: usize,
    pub mutation_rate: f64,
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, report: &GenerationReport);
    fn on_finished(&mut self, outcome: &RunOutcome);
}

pub struct EvolutionEngine {
    config: SimulationConfig,
    population: Population,
    rng: StdRng,
}

impl EvolutionEngine {
    pub fn new(config: SimulationConfig) -> Result<Self, WordfinderError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let population = Population::initialize(&config, &mut rng)?;

        Ok(Self {
            config,
            population,
            rng,
        })
    }

    /// Evolve until a perfect match appears or the generation cap is hit.
    pub fn run<C: ProgressCallback>(
        &mut self,
        mut callback: C,
    ) -> Result<RunOutcome, WordfinderError> {
        let max_fitness = self.population.max_fitness();
        log::debug!(
            "Evolving '{}' with {} individuals at mutation rate {}",
            self.population.target(),
            self.population.size(),
            self.config.mutation_rate
        );

        loop {
            callback.on_generation_start(self.population.generation());

            let summary = self.population.evaluate();
            let report = self.report(&summary);
            log::trace!(
                "Generation {}: best '{}' ({}/{})",
                report.generation,
                report.best_dna,
                report.best_fitness,
                max_fitness
            );
            callback.on_generation_complete(&report);

            if self.population.is_solved(&summary) {
                let outcome = self.outcome(&report, true);
                log::debug!(
                    "Found '{}' after {} generations",
                    outcome.target,
                    outcome.generations
                );
                callback.on_finished(&outcome);
                return Ok(outcome);
            }

            if let Some(cap) = self.config.max_generations {
                if summary.generation >= cap {
                    let outcome = self.outcome(&report, false);
                    log::debug!(
                        "Generation cap {} reached without finding '{}' (best '{}')",
                        cap,
                        outcome.target,
                        outcome.best_dna
                    );
                    callback.on_finished(&outcome);
                    return Ok(outcome);
                }
            }

            self.population.advance_generation(&summary, &mut self.rng)?;
        }
    }

    /// Run without any progress output.
    pub fn run_silent(&mut self) -> Result<RunOutcome, WordfinderError> {
        self.run(super::progress::SilentProgressCallback)
    }

    fn report(&self, summary: &GenerationSummary) -> GenerationReport {
        let best_dna = self
            .population
            .members()
            .get(summary.best_index)
            .map(|ind| ind.dna_string())
            .unwrap_or_default();

        GenerationReport {
            generation: summary.generation,
            best_dna,
            best_fitness: summary.best_fitness,
            max_fitness: self.population.max_fitness(),
            total_fitness: summary.total_fitness,
        }
    }

    fn outcome(&self, report: &GenerationReport, converged: bool) -> RunOutcome {
        RunOutcome {
            target: self.population.target(),
            generations: report.generation,
            converged,
            best_dna: report.best_dna.clone(),
            best_fitness: report.best_fitness,
            max_fitness: report.max_fitness,
            population_size: self.population.size(),
            mutation_rate: self.population.mutation_rate(),
        }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
