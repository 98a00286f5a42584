use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the game
///
/// Every field has a default, so a TOML file only needs the values it
/// wants to change:
///
/// ```toml
/// arena_size = 15.0
/// max_obstacles = 25
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Half-extent of the square arena; walls sit at +/- this value on X and Z
    pub arena_size: f32,
    /// Number of obstacle slots filled at game start
    pub max_obstacles: usize,
    /// Placement tries per obstacle slot before the slot is skipped
    pub obstacle_attempts: u32,
    /// Radius around the origin kept free of obstacles
    pub obstacle_clearance: f32,
    /// Placement tries for an apple before the last candidate is taken as-is
    pub apple_attempts: u32,
    /// Points awarded per apple
    pub apple_score: u32,

    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Where the head starts (the snake extends along -X behind it)
    pub start_position: [f32; 3],
    /// Interpolation speed of the head in units per second
    pub move_speed: f32,

    /// Seconds between grid steps at the start of a game
    pub move_interval: f32,
    /// Fastest allowed step interval
    pub min_move_interval: f32,
    /// Interval reduction per segment grown
    pub interval_step: f32,

    /// Frame rate of the render loop
    pub target_fps: u32,
    /// Fixed RNG seed; random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_size: 20.0,
            max_obstacles: 15,
            obstacle_attempts: 20,
            obstacle_clearance: 4.0,
            apple_attempts: 50,
            apple_score: 10,
            initial_snake_length: 3,
            start_position: [0.0, 0.5, 0.0],
            move_speed: 5.0,
            move_interval: 0.2,
            min_move_interval: 0.08,
            interval_step: 0.005,
            target_fps: 60,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom arena size
    pub fn new(arena_size: f32) -> Self {
        Self {
            arena_size,
            ..Default::default()
        }
    }

    /// Small arena without obstacles, for tests
    pub fn small() -> Self {
        Self {
            arena_size: 10.0,
            max_obstacles: 0,
            seed: Some(7),
            ..Default::default()
        }
    }

    /// Load a configuration from a TOML file and validate it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse a configuration from TOML text and validate it
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn start(&self) -> Vec3 {
        Vec3::from_array(self.start_position)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.arena_size.is_finite() || self.arena_size < 2.0 {
            return Err(ConfigError::Invalid(format!(
                "arena_size must be at least 2, got {}",
                self.arena_size
            )));
        }

        // NaN slips through every range comparison below
        let floats = [
            ("move_speed", self.move_speed),
            ("move_interval", self.move_interval),
            ("min_move_interval", self.min_move_interval),
            ("interval_step", self.interval_step),
            ("obstacle_clearance", self.obstacle_clearance),
            ("start_position.x", self.start_position[0]),
            ("start_position.y", self.start_position[1]),
            ("start_position.z", self.start_position[2]),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }

        let [x, _, z] = self.start_position;
        if x.abs() > self.arena_size || z.abs() > self.arena_size {
            return Err(ConfigError::Invalid(format!(
                "start_position ({}, {}) lies outside the arena [-{}, {}]",
                x, z, self.arena_size, self.arena_size
            )));
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::Invalid(
                "initial_snake_length must be at least 1".to_string(),
            ));
        }

        if self.move_speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "move_speed must be positive, got {}",
                self.move_speed
            )));
        }

        if self.min_move_interval <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_move_interval must be positive, got {}",
                self.min_move_interval
            )));
        }

        if self.move_interval < self.min_move_interval {
            return Err(ConfigError::Invalid(format!(
                "move_interval ({}) cannot be below min_move_interval ({})",
                self.move_interval, self.min_move_interval
            )));
        }

        if self.interval_step < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "interval_step must be non-negative, got {}",
                self.interval_step
            )));
        }

        if self.apple_attempts == 0 {
            return Err(ConfigError::Invalid(
                "apple_attempts must be at least 1".to_string(),
            ));
        }

        if !(1..=240).contains(&self.target_fps) {
            return Err(ConfigError::Invalid(format!(
                "target_fps must be in [1, 240], got {}",
                self.target_fps
            )));
        }

        Ok(())
    }
}
