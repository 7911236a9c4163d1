use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};

/// Environment variable naming a TOML file to load the config from.
pub const CONFIG_ENV_VAR: &str = "SNAKE3D_CONFIG";
/// Fallback location checked when the env var is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config/snake3d.toml";

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the playing field; the half-extent is `grid_size / 2`
    pub grid_size: u32,

    // Level progression
    /// Tick interval at level 1 (seconds)
    pub base_tick_interval: f64,
    /// Interval reduction per level (seconds)
    pub tick_interval_step: f64,
    /// Floor for the tick interval (seconds)
    pub min_tick_interval: f64,
    pub obstacles_per_level: u32,
    pub max_obstacles: u32,
    pub max_bridges: u32,
    /// Bridge footprint width along x (cells)
    pub bridge_width: u32,
    /// Crossing a multiple of this score advances the level
    pub level_up_score: u32,

    // Special food and boost
    /// Special food lifetime (seconds)
    pub special_food_lifetime: f64,
    /// Probability of spawning special food after eating ordinary food
    pub special_food_chance: f64,
    pub special_food_score: u32,
    /// Boost duration (seconds)
    pub boost_duration: f64,
    /// Multiplier applied to the tick interval while boosted
    pub boost_interval_factor: f64,

    /// Seconds between food kind rotations
    pub food_rotation_interval: f64,
    /// Rejection-sampling attempts before falling back to a full scan
    pub max_spawn_attempts: u32,
    /// Seed for the game RNG; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            base_tick_interval: 0.1,
            tick_interval_step: 0.01,
            min_tick_interval: 0.04,
            obstacles_per_level: 3,
            max_obstacles: 30,
            max_bridges: 5,
            bridge_width: 3,
            level_up_score: 50,
            special_food_lifetime: 10.0,
            special_food_chance: 0.2,
            special_food_score: 30,
            boost_duration: 5.0,
            boost_interval_factor: 0.5,
            food_rotation_interval: 2.0,
            max_spawn_attempts: 512,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: u32) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Same config with a fixed RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Read a TOML config file. Missing keys take their default values.
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| GameError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `$SNAKE3D_CONFIG`, then `config/snake3d.toml`, falling back
    /// to defaults.
    pub fn load_or_default() -> Self {
        let candidates = std::env::var(CONFIG_ENV_VAR)
            .ok()
            .into_iter()
            .chain(std::iter::once(DEFAULT_CONFIG_PATH.to_string()));

        for path in candidates {
            if !Path::new(&path).exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => {
                    tracing::info!(%path, "loaded game config");
                    return config;
                }
                Err(err) => tracing::warn!(%path, error = %err, "ignoring unusable config file"),
            }
        }
        Self::default()
    }

    /// Check that all parameters are in usable ranges
    pub fn validate(&self) -> GameResult<()> {
        if self.grid_size < 2 {
            return Err(GameError::InvalidConfig(format!(
                "grid_size must be at least 2, got {}",
                self.grid_size
            )));
        }
        if self.min_tick_interval <= 0.0 || self.base_tick_interval < self.min_tick_interval {
            return Err(GameError::InvalidConfig(format!(
                "tick intervals must satisfy 0 < min ({}) <= base ({})",
                self.min_tick_interval, self.base_tick_interval
            )));
        }
        if self.tick_interval_step < 0.0 {
            return Err(GameError::InvalidConfig(
                "tick_interval_step must not be negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.special_food_chance) {
            return Err(GameError::InvalidConfig(format!(
                "special_food_chance must be between 0.0 and 1.0, got {}",
                self.special_food_chance
            )));
        }
        if self.boost_interval_factor <= 0.0 || self.boost_interval_factor > 1.0 {
            return Err(GameError::InvalidConfig(format!(
                "boost_interval_factor must be in (0.0, 1.0], got {}",
                self.boost_interval_factor
            )));
        }
        if self.level_up_score == 0 {
            return Err(GameError::InvalidConfig(
                "level_up_score must be positive".to_string(),
            ));
        }
        if self.food_rotation_interval <= 0.0 {
            return Err(GameError::InvalidConfig(
                "food_rotation_interval must be positive".to_string(),
            ));
        }
        if self.bridge_width == 0 || self.bridge_width % 2 == 0 {
            return Err(GameError::InvalidConfig(format!(
                "bridge_width must be odd and positive, got {}",
                self.bridge_width
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 20);
        assert_eq!(config.level_up_score, 50);
        assert_eq!(config.bridge_width, 3);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(16).with_seed(7);
        assert_eq!(config.grid_size, 16);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GameConfig = toml::from_str("grid_size = 12\nseed = 99\n").unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.special_food_score, 30);
        assert_eq!(config.base_tick_interval, 0.1);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.special_food_chance = 1.5;
        assert!(matches!(config.validate(), Err(GameError::InvalidConfig(_))));

        let mut config = GameConfig::default();
        config.bridge_width = 4;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.min_tick_interval = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, GameError::ConfigIo { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("snake3d-config-{}.toml", std::process::id()));
        std::fs::write(&path, "grid_size = 14\nmax_bridges = 2\n").unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.grid_size, 14);
        assert_eq!(config.max_bridges, 2);

        std::fs::remove_file(&path).ok();
    }
}
