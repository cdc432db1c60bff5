use crate::error::WordfinderError;
use crate::utils::{format_mean, format_percent};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Mean generations-to-convergence, one row per population size and one
/// column per mutation rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid {
    population_sizes: Vec<usize>,
    mutation_rates: Vec<f64>,
    means: Vec<Vec<f64>>,
}

impl SweepGrid {
    pub fn new(
        population_sizes: Vec<usize>,
        mutation_rates: Vec<f64>,
        means: Vec<Vec<f64>>,
    ) -> Result<Self, WordfinderError> {
        if means.len() != population_sizes.len()
            || means.iter().any(|row| row.len() != mutation_rates.len())
        {
            return Err(WordfinderError::Sweep(format!(
                "Grid of {} population sizes x {} mutation rates got mismatched cells",
                population_sizes.len(),
                mutation_rates.len()
            )));
        }
        Ok(Self {
            population_sizes,
            mutation_rates,
            means,
        })
    }

    pub fn population_sizes(&self) -> &[usize] {
        &self.population_sizes
    }

    pub fn mutation_rates(&self) -> &[f64] {
        &self.mutation_rates
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.means
    }

    pub fn mean(&self, population_size: usize, mutation_rate: f64) -> Option<f64> {
        let row = self
            .population_sizes
            .iter()
            .position(|&p| p == population_size)?;
        let column = self
            .mutation_rates
            .iter()
            .position(|&r| (r - mutation_rate).abs() < 1e-9)?;
        Some(self.means[row][column])
    }

    /// Delimited text: a header of mutation-rate percentages after an empty
    /// corner cell, then one row per population size. Every cell, the last
    /// one included, is followed by the delimiter.
    pub fn render(&self, delimiter: char) -> String {
        let mut out = String::new();

        out.push(delimiter);
        for rate in &self.mutation_rates {
            out.push_str(&format_percent(*rate));
            out.push('%');
            out.push(delimiter);
        }
        out.push('\n');

        for (population, row) in self.population_sizes.iter().zip(&self.means) {
            out.push_str(&population.to_string());
            out.push(delimiter);
            for mean in row {
                out.push_str(&format_mean(*mean));
                out.push(delimiter);
            }
            out.push('\n');
        }

        out
    }

    pub fn write_to<P: AsRef<Path>>(
        &self,
        path: P,
        delimiter: char,
    ) -> Result<(), WordfinderError> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        writer.write_all(self.render(delimiter).as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> SweepGrid {
        SweepGrid::new(
            vec![30, 35],
            vec![0.01, 0.02],
            vec![vec![12.4, 10.2], vec![9.0, 8.25]],
        )
        .unwrap()
    }

    #[test]
    fn test_render_layout() {
        let text = sample_grid().render(';');
        assert_eq!(text, ";1%;2%;\n30;12.40;10.20;\n35;9.00;8.25;\n");
    }

    #[test]
    fn test_render_custom_delimiter() {
        let text = sample_grid().render(',');
        assert!(text.starts_with(",1%,2%,\n"));
    }

    #[test]
    fn test_lookup_by_axis_values() {
        let grid = sample_grid();
        assert_eq!(grid.mean(35, 0.02), Some(8.25));
        assert_eq!(grid.mean(40, 0.02), None);
    }

    #[test]
    fn test_mismatched_cells_rejected() {
        assert!(SweepGrid::new(vec![30], vec![0.01, 0.02], vec![vec![1.0]]).is_err());
        assert!(SweepGrid::new(vec![30, 35], vec![0.01], vec![vec![1.0]]).is_err());
    }
}
