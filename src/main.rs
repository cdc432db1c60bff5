//! WordFinder CLI - evolve strings toward a target and map convergence time.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use wordfinder::config::{AppConfig, ConfigManager};
use wordfinder::engines::generation::{
    Alphabet, ConsoleProgressCallback, EvolutionEngine, FitnessPolicy, MutationPolicy,
    SilentProgressCallback,
};
use wordfinder::engines::sweep::SweepDriver;

/// WordFinder - genetic algorithm string search
#[derive(Parser, Debug)]
#[command(name = "wordfinder")]
#[command(author, version, about = "Genetic algorithm string search", long_about = None)]
struct Cli {
    /// TOML or JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evolve a population until it finds the target
    Run {
        #[command(flatten)]
        simulation: SimulationArgs,

        /// Random seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print only the final summary
        #[arg(short, long)]
        quiet: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Map mean generations over population sizes and mutation rates
    Sweep {
        #[command(flatten)]
        simulation: SimulationArgs,

        /// Output grid file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Simulations averaged per cell
        #[arg(short, long)]
        iterations: Option<usize>,

        /// Smallest population size
        #[arg(long)]
        min_population: Option<usize>,

        /// Largest population size
        #[arg(long)]
        max_population: Option<usize>,

        /// Population size increment
        #[arg(long)]
        population_step: Option<usize>,

        /// Smallest mutation rate (0-1)
        #[arg(long)]
        min_mutation_rate: Option<f64>,

        /// Largest mutation rate (0-1)
        #[arg(long)]
        max_mutation_rate: Option<f64>,

        /// Mutation rate increment
        #[arg(long)]
        mutation_rate_step: Option<f64>,

        /// Sweep seed; every simulation derives its own seed from it
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Write the configuration to this file instead of printing it
        #[arg(short, long)]
        write: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct SimulationArgs {
    /// Target string
    #[arg(short, long)]
    target: Option<String>,

    /// Population size
    #[arg(short = 'n', long)]
    population: Option<usize>,

    /// Per-character mutation probability (0-1)
    #[arg(short, long)]
    mutation_rate: Option<f64>,

    /// Fitness policy
    #[arg(long, value_enum)]
    fitness: Option<FitnessArg>,

    /// Mutation policy
    #[arg(long, value_enum)]
    mutation: Option<MutationArg>,

    /// Largest drift offset (implies --mutation drift)
    #[arg(long)]
    mutation_range: Option<usize>,

    /// Alphabet symbols, e.g. "abcdefghijklmnopqrstuvwxyz "
    #[arg(long)]
    alphabet: Option<String>,

    /// Stop after this many generations
    #[arg(short = 'g', long)]
    max_generations: Option<usize>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FitnessArg {
    Exponential,
    Linear,
    Closeness,
}

impl From<FitnessArg> for FitnessPolicy {
    fn from(arg: FitnessArg) -> Self {
        match arg {
            FitnessArg::Exponential => FitnessPolicy::Exponential,
            FitnessArg::Linear => FitnessPolicy::Linear,
            FitnessArg::Closeness => FitnessPolicy::Closeness,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MutationArg {
    Replace,
    Drift,
}

const DEFAULT_MUTATION_RANGE: usize = 3;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let manager = ConfigManager::new();
    manager
        .load(cli.config.as_ref())
        .context("Failed to load configuration")?;

    match cli.command {
        Commands::Run {
            simulation,
            seed,
            quiet,
            json,
        } => {
            let alphabet = parse_alphabet(&simulation)?;
            manager.update(|c| {
                apply_simulation_args(c, &simulation, alphabet);
                if seed.is_some() {
                    c.simulation.seed = seed;
                }
            })?;
            run_simulation(manager.get(), quiet || json, json)
        }
        Commands::Sweep {
            simulation,
            output,
            iterations,
            min_population,
            max_population,
            population_step,
            min_mutation_rate,
            max_mutation_rate,
            mutation_rate_step,
            seed,
        } => {
            let alphabet = parse_alphabet(&simulation)?;
            manager.update(|c| {
                apply_simulation_args(c, &simulation, alphabet);
                let sweep = &mut c.sweep;
                if let Some(output) = output {
                    sweep.output = output;
                }
                if let Some(v) = iterations {
                    sweep.iterations = v;
                }
                if let Some(v) = min_population {
                    sweep.min_population = v;
                }
                if let Some(v) = max_population {
                    sweep.max_population = v;
                }
                if let Some(v) = population_step {
                    sweep.population_step = v;
                }
                if let Some(v) = min_mutation_rate {
                    sweep.min_mutation_rate = v;
                }
                if let Some(v) = max_mutation_rate {
                    sweep.max_mutation_rate = v;
                }
                if let Some(v) = mutation_rate_step {
                    sweep.mutation_rate_step = v;
                }
                if let Some(v) = simulation.max_generations {
                    sweep.max_generations = Some(v);
                }
                if seed.is_some() {
                    sweep.seed = seed;
                }
            })?;
            run_sweep(manager.get())
        }
        Commands::Config { write } => match write {
            Some(path) => {
                manager
                    .save_to_file(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                log::info!("Configuration written to {}", path.display());
                Ok(())
            }
            None => {
                print!("{}", manager.get().to_toml()?);
                Ok(())
            }
        },
    }
}

fn apply_simulation_args(
    config: &mut AppConfig,
    args: &SimulationArgs,
    alphabet: Option<Alphabet>,
) {
    let simulation = &mut config.simulation;
    if let Some(alphabet) = alphabet {
        simulation.alphabet = alphabet;
    }
    if let Some(target) = &args.target {
        simulation.target = target.clone();
    }
    if let Some(population) = args.population {
        simulation.population_size = population;
    }
    if let Some(rate) = args.mutation_rate {
        simulation.mutation_rate = rate;
    }
    if let Some(fitness) = args.fitness {
        simulation.fitness = fitness.into();
    }
    match (args.mutation, args.mutation_range) {
        (Some(MutationArg::Replace), _) => simulation.mutation = MutationPolicy::Replace,
        (Some(MutationArg::Drift), range) | (None, range @ Some(_)) => {
            simulation.mutation = MutationPolicy::Drift {
                max_offset: range.unwrap_or(DEFAULT_MUTATION_RANGE),
            }
        }
        (None, None) => {}
    }
    if let Some(cap) = args.max_generations {
        simulation.max_generations = Some(cap);
    }
}

/// Alphabets are parsed up front so a bad symbol list surfaces as its own error.
fn parse_alphabet(args: &SimulationArgs) -> Result<Option<Alphabet>> {
    args.alphabet
        .as_deref()
        .map(|symbols| Alphabet::new(symbols).context("Invalid --alphabet"))
        .transpose()
}

fn run_simulation(config: AppConfig, quiet: bool, json: bool) -> Result<()> {
    let mut engine = EvolutionEngine::new(config.simulation)?;
    let outcome = if quiet {
        engine.run(SilentProgressCallback)?
    } else {
        engine.run(ConsoleProgressCallback)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if quiet {
        println!(
            "{} '{}' after {} generations (best '{}', {}/{})",
            if outcome.converged { "Found" } else { "Gave up on" },
            outcome.target,
            outcome.generations,
            outcome.best_dna,
            outcome.best_fitness,
            outcome.max_fitness
        );
    }
    Ok(())
}

fn run_sweep(config: AppConfig) -> Result<()> {
    let driver = SweepDriver::new(config.simulation, config.sweep)?;
    let grid = driver.run_and_write().context("Sweep failed")?;
    println!(
        "Wrote {} x {} grid to {}",
        grid.population_sizes().len(),
        grid.mutation_rates().len(),
        driver.config().output.display()
    );
    Ok(())
}
