use crate::config::{ConfigSection, SimulationConfig, SweepConfig};
use crate::engines::generation::EvolutionEngine;
use crate::engines::sweep::grid::SweepGrid;
use crate::error::WordfinderError;
use crate::utils::format_percent;
use rayon::prelude::*;
use std::time::Instant;

/// One (population size, mutation rate) combination of the grid.
#[derive(Debug, Clone, Copy)]
struct Cell {
    index: usize,
    row: usize,
    column: usize,
    population_size: usize,
    mutation_rate: f64,
}

/// Runs many independent simulations over a population/mutation-rate grid.
pub struct SweepDriver {
    template: SimulationConfig,
    sweep: SweepConfig,
}

impl SweepDriver {
    /// `template` supplies the target, alphabet and policies shared by every cell.
    pub fn new(template: SimulationConfig, sweep: SweepConfig) -> Result<Self, WordfinderError> {
        sweep.validate()?;
        // Check the shared settings once with the smallest population of the grid
        let probe = SimulationConfig {
            population_size: sweep.min_population,
            mutation_rate: sweep.min_mutation_rate,
            max_generations: sweep.max_generations,
            ..template.clone()
        };
        probe.validate()?;
        Ok(Self { template, sweep })
    }

    pub fn config(&self) -> &SweepConfig {
        &self.sweep
    }

    /// Simulate every cell in parallel and collect the means.
    pub fn run(&self) -> Result<SweepGrid, WordfinderError> {
        let population_sizes = self.sweep.population_sizes();
        let mutation_rates = self.sweep.mutation_rates();

        let cells: Vec<Cell> = population_sizes
            .iter()
            .enumerate()
            .flat_map(|(row, &population_size)| {
                mutation_rates
                    .iter()
                    .enumerate()
                    .map(move |(column, &rate)| (row, column, population_size, rate))
            })
            .enumerate()
            .map(|(index, (row, column, population_size, mutation_rate))| Cell {
                index,
                row,
                column,
                population_size,
                mutation_rate,
            })
            .collect();

        log::info!(
            "Sweeping '{}' over {} cells ({} simulations each)",
            self.template.target,
            cells.len(),
            self.sweep.iterations
        );

        let results: Vec<(Cell, f64)> = cells
            .par_iter()
            .map(|cell| self.simulate_cell(*cell).map(|mean| (*cell, mean)))
            .collect::<Result<Vec<_>, WordfinderError>>()?;

        let mut means = vec![vec![0.0; mutation_rates.len()]; population_sizes.len()];
        for (cell, mean) in results {
            means[cell.row][cell.column] = mean;
        }

        SweepGrid::new(population_sizes, mutation_rates, means)
    }

    /// Run the sweep and write the grid to the configured output file.
    pub fn run_and_write(&self) -> Result<SweepGrid, WordfinderError> {
        let start = Instant::now();
        let grid = self.run()?;

        let output = &self.sweep.output;
        if let Err(e) = grid.write_to(output, self.sweep.delimiter) {
            log::error!("Failed to write sweep grid to {}: {}", output.display(), e);
            return Err(e);
        }

        log::info!(
            "Mapped '{}' from {} to {} individuals with {}% to {}% mutation chance \
             on {} iterations in {:.2}s -> {}",
            self.template.target,
            self.sweep.min_population,
            self.sweep.max_population,
            format_percent(self.sweep.min_mutation_rate),
            format_percent(self.sweep.max_mutation_rate),
            self.sweep.iterations,
            start.elapsed().as_secs_f64(),
            output.display()
        );

        Ok(grid)
    }

    fn simulate_cell(&self, cell: Cell) -> Result<f64, WordfinderError> {
        let mut total_generations = 0usize;

        for iteration in 0..self.sweep.iterations {
            let config = SimulationConfig {
                population_size: cell.population_size,
                mutation_rate: cell.mutation_rate,
                max_generations: self.sweep.max_generations,
                seed: self.simulation_seed(cell.index, iteration),
                ..self.template.clone()
            };
            let outcome = EvolutionEngine::new(config)?.run_silent()?;
            total_generations += outcome.generations;
        }

        let mean = total_generations as f64 / self.sweep.iterations as f64;
        log::info!(
            "population {} / mutation {}%: {:.2} generations",
            cell.population_size,
            format_percent(cell.mutation_rate),
            mean
        );
        Ok(mean)
    }

    /// Per-simulation seed derived from the sweep seed, independent of scheduling.
    fn simulation_seed(&self, cell_index: usize, iteration: usize) -> Option<u64> {
        self.sweep.seed.map(|seed| {
            let offset = (cell_index * self.sweep.iterations + iteration) as u64;
            scramble_seed(seed).wrapping_add(offset)
        })
    }
}

/// SplitMix64 finaliser: neighbouring sweep seeds land far apart before offsets are added.
fn scramble_seed(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::{Alphabet, FitnessPolicy};

    fn tiny_sweep() -> (SimulationConfig, SweepConfig) {
        let template = SimulationConfig {
            target: "ok".to_string(),
            alphabet: Alphabet::new("kmo").unwrap(),
            fitness: FitnessPolicy::Linear,
            ..SimulationConfig::default()
        };
        let sweep = SweepConfig {
            min_population: 4,
            max_population: 8,
            population_step: 4,
            min_mutation_rate: 0.1,
            max_mutation_rate: 0.2,
            mutation_rate_step: 0.1,
            iterations: 3,
            max_generations: Some(50),
            seed: Some(99),
            ..SweepConfig::default()
        };
        (template, sweep)
    }

    #[test]
    fn test_grid_shape_and_bounds() {
        let (template, sweep) = tiny_sweep();
        let grid = SweepDriver::new(template, sweep).unwrap().run().unwrap();

        assert_eq!(grid.population_sizes(), &[4, 8]);
        assert_eq!(grid.mutation_rates(), &[0.1, 0.2]);
        for row in grid.rows() {
            for mean in row {
                assert!(*mean >= 1.0 && *mean <= 50.0);
            }
        }
    }

    #[test]
    fn test_seeded_sweep_is_reproducible() {
        let (template, sweep) = tiny_sweep();
        let first = SweepDriver::new(template.clone(), sweep.clone()).unwrap().run().unwrap();
        let second = SweepDriver::new(template, sweep).unwrap().run().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_neighbouring_sweep_seeds_do_not_share_streams() {
        let (template, sweep) = tiny_sweep();
        let seeds_for = |seed: u64| -> Vec<u64> {
            let driver = SweepDriver::new(
                template.clone(),
                SweepConfig {
                    seed: Some(seed),
                    ..sweep.clone()
                },
            )
            .unwrap();
            (0..4)
                .flat_map(|cell| (0..3).map(move |iteration| (cell, iteration)))
                .filter_map(|(cell, iteration)| driver.simulation_seed(cell, iteration))
                .collect()
        };

        let first = seeds_for(99);
        let second = seeds_for(100);
        assert_eq!(first.len(), 12);
        assert!(first.iter().all(|seed| !second.contains(seed)));
    }

    #[test]
    fn test_invalid_template_rejected() {
        let (mut template, sweep) = tiny_sweep();
        template.target = "no".to_string();
        assert!(SweepDriver::new(template, sweep).is_err());
    }
}
