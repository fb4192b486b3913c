use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Smallest population the roulette wheel can always draw two distinct parents from.
pub const MIN_POPULATION_SIZE: usize = 3;

/// Top level configuration, one table per concern.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ga: GaConfig,
    pub runs: RunConfig,
    pub report: ReportConfig,
}

/// Parameters of the genetic algorithm itself.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GaConfig {
    /// Number of individuals kept in every generation
    pub population_size: usize,
    /// Chance, in percent, that two selected parents are crossed over instead of copied
    pub crossover_rate: u32,
    /// Chance, in percent, that each child gets one bit flipped
    pub mutation_rate: u32,
    /// Hard cap on the number of generations of a single run
    pub max_generations: u32,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            crossover_rate: 80,
            mutation_rate: 3,
            max_generations: 1000,
        }
    }
}

/// How many independent runs to perform and how to seed them.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub count: usize,
    /// Base seed. Run `i` is seeded with `seed + i`; when absent every run draws its seed from the OS.
    pub seed: Option<u64>,
    /// Execute runs on the rayon pool. Each run still owns its population and generator.
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            count: 50,
            seed: None,
            parallel: false,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// How many of the best final individuals get printed with their board
    pub top_champions: usize,
    /// Where to write the JSON export, nothing is written when unset
    pub export_path: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_champions: 5,
            export_path: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Rejects parameter combinations the engine cannot run with.
    ///
    /// # Returns
    /// * `Result<(), ConfigError>` - `ConfigError::Invalid` naming the first offending field
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ga.validate()?;

        if self.runs.count == 0 {
            return Err(ConfigError::Invalid(
                "runs.count must be at least 1".to_string(),
            ));
        }
        if self.report.top_champions == 0 {
            return Err(ConfigError::Invalid(
                "report.top_champions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl GaConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // With two members, a second member of fitness 1 leaves only index 0 reachable on
        // the roulette wheel. Three members of fitness >= 1 always yield two distinct parents.
        if self.population_size < MIN_POPULATION_SIZE {
            return Err(ConfigError::Invalid(format!(
                "ga.population_size must be at least {}, got {}",
                MIN_POPULATION_SIZE,
                self.population_size
            )));
        }
        if self.crossover_rate > 100 {
            return Err(ConfigError::Invalid(format!(
                "ga.crossover_rate is a percentage, got {}",
                self.crossover_rate
            )));
        }
        if self.mutation_rate > 100 {
            return Err(ConfigError::Invalid(format!(
                "ga.mutation_rate is a percentage, got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}
