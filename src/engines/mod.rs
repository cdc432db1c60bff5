pub mod generation;
pub mod sweep;
