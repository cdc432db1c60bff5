use super::traits::ConfigSection;
use crate::error::WordfinderError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest number of rows or columns a sweep grid may have.
pub const MAX_GRID_AXIS_LEN: usize = 10_000;

/// Grid of population sizes and mutation rates to map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub min_population: usize,
    pub max_population: usize,
    pub population_step: usize,
    pub min_mutation_rate: f64,
    pub max_mutation_rate: f64,
    pub mutation_rate_step: f64,
    /// Simulations averaged per grid cell.
    pub iterations: usize,
    pub max_generations: Option<usize>,
    pub output: PathBuf,
    pub delimiter: char,
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_population: 30,
            max_population: 100,
            population_step: 5,
            min_mutation_rate: 0.01,
            max_mutation_rate: 0.10,
            mutation_rate_step: 0.01,
            iterations: 4,
            max_generations: Some(200),
            output: PathBuf::from("data.csv"),
            delimiter: ';',
            seed: None,
        }
    }
}

impl SweepConfig {
    /// Row labels: `min_population..=max_population` in `population_step` increments.
    pub fn population_sizes(&self) -> Vec<usize> {
        (self.min_population..=self.max_population)
            .step_by(self.population_step.max(1))
            .collect()
    }

    /// Column labels, enumerated by step count so float error never adds or drops a column.
    pub fn mutation_rates(&self) -> Vec<f64> {
        if self.mutation_rate_step <= 0.0 {
            return vec![self.min_mutation_rate];
        }
        (0..=self.mutation_rate_steps())
            .map(|i| {
                let rate = self.min_mutation_rate + i as f64 * self.mutation_rate_step;
                (rate * 1e9).round() / 1e9
            })
            .collect()
    }

    fn mutation_rate_steps(&self) -> usize {
        let span = self.max_mutation_rate - self.min_mutation_rate;
        (span / self.mutation_rate_step + 1e-9).floor() as usize
    }
}

impl ConfigSection for SweepConfig {
    fn section_name() -> &'static str {
        "sweep"
    }

    fn validate(&self) -> Result<(), WordfinderError> {
        if self.min_population < 2 {
            return Err(WordfinderError::Configuration(
                "Sweep population sizes must be at least 2".to_string(),
            ));
        }
        if self.min_population > self.max_population {
            return Err(WordfinderError::Configuration(format!(
                "Sweep population range {}..={} is empty",
                self.min_population, self.max_population
            )));
        }
        if self.population_step == 0 {
            return Err(WordfinderError::Configuration(
                "Sweep population step must be positive".to_string(),
            ));
        }
        for rate in [self.min_mutation_rate, self.max_mutation_rate] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(WordfinderError::Configuration(
                    "Sweep mutation rates must be between 0 and 1".to_string(),
                ));
            }
        }
        if self.min_mutation_rate > self.max_mutation_rate {
            return Err(WordfinderError::Configuration(format!(
                "Sweep mutation rate range {}..={} is empty",
                self.min_mutation_rate, self.max_mutation_rate
            )));
        }
        if self.mutation_rate_step.is_nan() || self.mutation_rate_step <= 0.0 {
            return Err(WordfinderError::Configuration(
                "Sweep mutation rate step must be positive".to_string(),
            ));
        }
        let rows = (self.max_population - self.min_population) / self.population_step + 1;
        let columns = self.mutation_rate_steps().saturating_add(1);
        if rows > MAX_GRID_AXIS_LEN || columns > MAX_GRID_AXIS_LEN {
            return Err(WordfinderError::Configuration(format!(
                "Sweep grid of {} x {} exceeds {} entries per axis",
                rows, columns, MAX_GRID_AXIS_LEN
            )));
        }
        if self.iterations == 0 {
            return Err(WordfinderError::Configuration(
                "Sweep needs at least one iteration per cell".to_string(),
            ));
        }
        if self.max_generations == Some(0) {
            return Err(WordfinderError::Configuration(
                "Generation cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_axes() {
        let config = SweepConfig::default();
        assert!(config.validate().is_ok());

        let sizes = config.population_sizes();
        assert_eq!(sizes.first(), Some(&30));
        assert_eq!(sizes.last(), Some(&100));
        assert_eq!(sizes.len(), 15);

        let rates = config.mutation_rates();
        assert_eq!(rates.len(), 10);
        assert_eq!(rates[0], 0.01);
        assert_eq!(rates[2], 0.03);
        assert_eq!(rates[9], 0.1);
    }

    #[test]
    fn test_single_cell_grid() {
        let config = SweepConfig {
            min_population: 10,
            max_population: 10,
            min_mutation_rate: 0.2,
            max_mutation_rate: 0.2,
            ..SweepConfig::default()
        };
        assert_eq!(config.population_sizes(), vec![10]);
        assert_eq!(config.mutation_rates(), vec![0.2]);
    }

    #[test]
    fn test_axis_length_limit() {
        let config = SweepConfig {
            min_mutation_rate: 0.0,
            max_mutation_rate: 1.0,
            mutation_rate_step: 1.0 / (MAX_GRID_AXIS_LEN - 1) as f64,
            ..SweepConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.mutation_rates().len(), MAX_GRID_AXIS_LEN);

        let finer = SweepConfig {
            mutation_rate_step: 1.0 / MAX_GRID_AXIS_LEN as f64,
            ..config
        };
        assert!(finer.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let base = SweepConfig::default();
        let cases = vec![
            SweepConfig { min_population: 1, ..base.clone() },
            SweepConfig { min_population: 50, max_population: 40, ..base.clone() },
            SweepConfig { population_step: 0, ..base.clone() },
            SweepConfig { max_mutation_rate: 1.5, ..base.clone() },
            SweepConfig { min_mutation_rate: 0.5, max_mutation_rate: 0.1, ..base.clone() },
            SweepConfig { mutation_rate_step: 0.0, ..base.clone() },
            SweepConfig { mutation_rate_step: 1e-15, ..base.clone() },
            SweepConfig { max_population: usize::MAX, population_step: 1, ..base.clone() },
            SweepConfig { iterations: 0, ..base.clone() },
            SweepConfig { max_generations: Some(0), ..base.clone() },
        ];
        for config in cases {
            assert!(config.validate().is_err(), "expected error for {:?}", config);
        }
    }
}
