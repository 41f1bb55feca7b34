//! Configuration System
//!
//! Loads tuning parameters from `tuning.toml` so runs can be adjusted without
//! recompiling. Every table is optional and falls back to the values of the
//! reference run.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use house_events::{HousePart, Material, MaterialBag};

use crate::components::genome::{Genome, GenomeError};

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub simulation: SimulationConfig,
    pub market: MarketConfig,
    pub construction: ConstructionConfig,
    pub genetics: GeneticsConfig,
    pub output: OutputConfig,
    /// Initial population, in starting order
    pub roster: Vec<AgentSpec>,
}

/// Run length, seed and phase schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub days: u32,
    pub seed: u64,
    pub restock_interval: u32,
    pub trading_interval: u32,
    pub mutation_interval: u32,
    pub genetic_interval: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 50,
            seed: 42,
            restock_interval: 9,
            trading_interval: 5,
            mutation_interval: 6,
            genetic_interval: 15,
        }
    }
}

/// Unit prices and warehouse capacity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub prices: MaterialBag,
    pub capacity: MaterialBag,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            prices: MaterialBag::from_pairs(&[
                (Material::Door, 2_500),
                (Material::OutsideDoor, 8_500),
                (Material::Window, 3_450),
                (Material::WallModule, 75_000),
                (Material::ToiletSeat, 2_995),
                (Material::Tab, 2_350),
                (Material::ShowerCabin, 8_300),
            ]),
            // 80% of what four builders need for two houses each, times three
            capacity: MaterialBag::from_pairs(&[
                (Material::Door, 51 * 3),
                (Material::OutsideDoor, 6 * 3),
                (Material::Window, 96 * 3),
                (Material::WallModule, 57 * 3),
                (Material::ToiletSeat, 12 * 3),
                (Material::Tab, 12 * 3),
                (Material::ShowerCabin, 12 * 3),
            ]),
        }
    }
}

/// Purchasing and sale parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstructionConfig {
    /// Chance per material of a forced extra purchase
    pub forced_buy_chance: f64,
    pub forced_buy_amount: u32,
    /// Credit received for each completed house
    pub house_sale_price: u64,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            forced_buy_chance: 0.2,
            forced_buy_amount: 1,
            house_sale_price: 900_000,
        }
    }
}

/// Genetic algorithm parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticsConfig {
    pub mutation_rate: f64,
    /// Agents drawn by roulette wheel each genetic day
    pub selection_size: usize,
    pub min_price: u8,
    pub max_price: u8,
    /// Money divisor in the fitness formula
    pub fitness_money_scale: f64,
}

impl Default for GeneticsConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.1,
            selection_size: 4,
            min_price: 1,
            max_price: 8,
            fitness_money_scale: 1_000_000.0,
        }
    }
}

/// Statistics sink locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub csv_path: PathBuf,
    pub jsonl_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("agent_stats.csv"),
            jsonl_path: PathBuf::from("agent_stats.jsonl"),
        }
    }
}

/// Starting genome and wallet for one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub priority_houses: u8,
    pub build_order: Vec<HousePart>,
    pub buyprice: u8,
    pub sellprice: u8,
    pub money: u64,
}

impl AgentSpec {
    /// Validates the strategy fields against the configured price range.
    pub fn genome(&self, genetics: &GeneticsConfig) -> Result<Genome, GenomeError> {
        Genome::new(
            &self.build_order,
            self.priority_houses,
            self.buyprice,
            self.sellprice,
            genetics.min_price..=genetics.max_price,
        )
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_TUNING_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_TUNING_PATH, e);
            Self::reference()
        })
    }

    /// Defaults plus the twelve-agent reference roster
    pub fn reference() -> Self {
        Self {
            roster: crate::setup::default_roster(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        for (name, interval) in [
            ("restock_interval", sim.restock_interval),
            ("trading_interval", sim.trading_interval),
            ("mutation_interval", sim.mutation_interval),
            ("genetic_interval", sim.genetic_interval),
        ] {
            if interval == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be at least 1")));
            }
        }

        for material in Material::ALL {
            if self.market.prices[material] == 0 {
                return Err(ConfigError::Invalid(format!("price of {material} must be positive")));
            }
            if self.market.capacity[material] == 0 {
                return Err(ConfigError::Invalid(format!("capacity of {material} must be positive")));
            }
        }

        for (name, p) in [
            ("forced_buy_chance", self.construction.forced_buy_chance),
            ("mutation_rate", self.genetics.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!("{name} must lie in [0, 1], got {p}")));
            }
        }

        let genetics = &self.genetics;
        if genetics.min_price < 1 || genetics.min_price > genetics.max_price || genetics.max_price > 8 {
            return Err(ConfigError::Invalid(format!(
                "price range {}..={} must lie within 1..=8",
                genetics.min_price, genetics.max_price
            )));
        }
        if genetics.fitness_money_scale <= 0.0 {
            return Err(ConfigError::Invalid("fitness_money_scale must be positive".into()));
        }

        if self.roster.is_empty() {
            return Err(ConfigError::Invalid("roster must contain at least one agent".into()));
        }
        let mut names = HashSet::new();
        for spec in &self.roster {
            if !names.insert(spec.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate agent name {:?}", spec.name)));
            }
            spec.genome(genetics).map_err(|source| ConfigError::Genome {
                agent: spec.name.clone(),
                source,
            })?;
        }

        Ok(())
    }
}

impl FromStr for SimConfig {
    type Err = ConfigError;

    /// Parse and validate configuration from a TOML string
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let mut config: SimConfig = toml::from_str(content)?;
        if config.roster.is_empty() {
            config.roster = crate::setup::default_roster();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error("Invalid genome for {agent}: {source}")]
    Genome { agent: String, source: GenomeError },
}
