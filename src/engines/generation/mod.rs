pub mod alphabet;
pub mod individual;
pub mod fitness;
pub mod operators;
pub mod population;
pub mod evolution_engine;
pub mod progress;

pub use alphabet::Alphabet;
pub use individual::{compare_fitness, Individual};
pub use fitness::{FitnessFunction, FitnessPolicy};
pub use operators::{crossover, mutate, random_dna, select_parents, MutationPolicy, ParentSelector};
pub use population::{GenerationSummary, Population};
pub use evolution_engine::{EvolutionEngine, GenerationReport, ProgressCallback, RunOutcome};
pub use progress::{ConsoleProgressCallback, HistoryProgressCallback, SilentProgressCallback};
