//! Snake 3D - a snake game on a 3D arena, drawn in the terminal
//!
//! This library provides:
//! - Core game logic: grid movement with smooth interpolation, obstacles,
//!   apples and collisions (game module)
//! - Chase camera and braille-canvas rendering (render module)
//! - Keyboard mapping (input module)
//! - Session statistics (metrics module)
//! - The interactive frame loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
