use crate::utils::format_percent;
use super::evolution_engine::{GenerationReport, ProgressCallback, RunOutcome};

/// Prints the generation table to stdout.
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        if generation == 1 {
            println!();
            println!("\tGeneration\tBest\t\t Score");
            println!("\t---------------------------------------------------");
        }
    }

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        println!(
            "\t{}\t\t{}\t\t {}/{}",
            report.generation, report.best_dna, report.best_fitness, report.max_fitness
        );
    }

    fn on_finished(&mut self, outcome: &RunOutcome) {
        println!();
        if outcome.converged {
            println!(
                "\tFound '{}' after {} generations.",
                outcome.target, outcome.generations
            );
        } else {
            println!(
                "\tStopped after {} generations without finding '{}' (best: '{}').",
                outcome.generations, outcome.target, outcome.best_dna
            );
        }
        println!(
            "\tMutation Rate: {}% chance.\n\tPopulation: {} individuals.",
            format_percent(outcome.mutation_rate),
            outcome.population_size
        );
        println!();
    }
}

pub struct SilentProgressCallback;

impl ProgressCallback for SilentProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _report: &GenerationReport) {}

    fn on_finished(&mut self, _outcome: &RunOutcome) {}
}

/// Records the best score of every generation.
pub struct HistoryProgressCallback<'a> {
    best_scores: &'a mut Vec<f64>,
}

impl<'a> HistoryProgressCallback<'a> {
    pub fn new(best_scores: &'a mut Vec<f64>) -> Self {
        Self { best_scores }
    }
}

impl ProgressCallback for HistoryProgressCallback<'_> {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        self.best_scores.push(report.best_fitness);
    }

    fn on_finished(&mut self, _outcome: &RunOutcome) {}
}
