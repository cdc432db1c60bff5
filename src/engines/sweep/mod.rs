pub mod grid;
pub mod driver;

pub use grid::SweepGrid;
pub use driver::SweepDriver;
