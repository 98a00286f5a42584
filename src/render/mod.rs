//! Terminal rendering of the 3D scene
//!
//! The world is projected through a chase camera onto a braille canvas.

pub mod camera;
pub mod projector;
pub mod renderer;
pub mod scenery;

pub use camera::{Camera3D, CameraController};
pub use projector::{Projector, ScreenPoint};
pub use renderer::Renderer;
