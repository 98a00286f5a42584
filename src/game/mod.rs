//! Core game logic for the 3D snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The frame loop feeds it elapsed time and steering input; everything else
//! (camera, drawing, terminal handling) lives outside.

pub mod action;
pub mod config;
pub mod engine;
pub mod obstacle;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, GameConfig};
pub use engine::{FrameOutcome, GameEngine};
pub use obstacle::{Obstacle, ObstacleKind};
pub use snake::Snake;
pub use state::{CollisionType, GamePhase, GameState};
