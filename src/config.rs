use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ai::evaluator::MAX_TIE_BREAK;
use crate::ai::{AgentConfig, Strategy};
use crate::error::ConfigError;
use crate::game::{GridState, DEFAULT_COLS, DEFAULT_ROWS};
use crate::search::SearchConfig;

/// Shape and fill of randomly generated boards.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub min_active: usize,
    pub max_active: usize,
    pub max_value: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            min_active: 5,
            max_active: 15,
            max_value: 9,
        }
    }
}

impl GridConfig {
    /// Draw a random board with these settings.
    pub fn random_state(&self, rng: &mut StdRng) -> Result<GridState, ConfigError> {
        GridState::random(
            self.rows,
            self.cols,
            self.min_active,
            self.max_active,
            self.max_value,
            rng,
        )
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fixed RNG seed; the OS seeds the RNG when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub grid: GridConfig,
    pub agent: AgentConfig,
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(ConfigError::Validation(
                "grid.rows and grid.cols must be > 0".into(),
            ));
        }
        if self.grid.min_active > self.grid.max_active {
            return Err(ConfigError::Validation(
                "grid.min_active must be <= grid.max_active".into(),
            ));
        }
        if self.grid.max_value == 0 {
            return Err(ConfigError::Validation("grid.max_value must be > 0".into()));
        }

        self.agent
            .strategy
            .parse::<Strategy>()
            .map_err(|e| ConfigError::Validation(format!("agent.strategy: {e}")))?;
        if !(0.0..MAX_TIE_BREAK).contains(&self.agent.tie_break) {
            return Err(ConfigError::Validation(format!(
                "agent.tie_break must be in [0, {MAX_TIE_BREAK})"
            )));
        }
        if self.agent.mc_simulations == 0 {
            return Err(ConfigError::Validation(
                "agent.mc_simulations must be >= 1".into(),
            ));
        }
        if self.agent.hybrid_simulations == 0 {
            return Err(ConfigError::Validation(
                "agent.hybrid_simulations must be >= 1".into(),
            ));
        }

        self.search
            .algorithm()
            .map_err(|e| ConfigError::Validation(format!("search.algorithm: {e}")))?;

        Ok(())
    }

    /// RNG for this run: seeded when `seed` is set, OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
