//! Genetic algorithm that evolves random strings toward a target word.
//!
//! [`engines::generation`] holds the reproduction core (fitness, selection,
//! crossover, mutation and the generational loop); [`engines::sweep`] maps
//! convergence time over a grid of population sizes and mutation rates.

pub mod config;
pub mod engines;
pub mod error;
pub mod utils;

pub use error::{Result, WordfinderError};
