pub mod traits;
pub mod simulation;
pub mod sweep;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use simulation::SimulationConfig;
pub use sweep::SweepConfig;
pub use traits::ConfigSection;
