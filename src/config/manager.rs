use super::{simulation::SimulationConfig, sweep::SweepConfig, traits::ConfigSection};
use crate::error::WordfinderError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Prefix of environment variables that override file settings,
/// e.g. `WORDFINDER__SIMULATION__POPULATION_SIZE=250`.
pub const ENV_PREFIX: &str = "WORDFINDER";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub sweep: SweepConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), WordfinderError> {
        self.simulation.validate()?;
        self.sweep.validate()?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, WordfinderError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Layer defaults, an optional TOML/JSON file and `WORDFINDER__*` variables.
    pub fn load<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), WordfinderError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            let path = path.as_ref();
            if !path.exists() {
                return Err(WordfinderError::Configuration(format!(
                    "Config file {} does not exist",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        log::debug!("Loaded configuration: {:?}", config);
        self.replace(config);
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WordfinderError> {
        self.load(Some(path))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WordfinderError> {
        let toml_str = self.get().to_toml()?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        match self.config.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Apply `f` to a copy and keep it only if the result validates.
    pub fn update<F>(&self, f: F) -> Result<(), WordfinderError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        candidate.validate()?;
        self.replace(candidate);
        Ok(())
    }

    fn replace(&self, config: AppConfig) {
        match self.config.write() {
            Ok(mut guard) => *guard = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }
}
