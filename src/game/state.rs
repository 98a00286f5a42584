use glam::Vec3;

use super::obstacle::{Obstacle, ObstacleKind};
use super::snake::Snake;

/// Whether the game is running or waiting for a restart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the arena
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake ran into a tree or a rock
    Obstacle(ObstacleKind),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Vec3,
    pub obstacles: Vec<Obstacle>,
    pub arena_size: f32,
    pub score: u32,
    /// Seconds accumulated toward the next grid step
    pub move_timer: f32,
    /// Current seconds between grid steps
    pub move_interval: f32,
    /// Grid steps taken this game
    pub moves: u32,
    pub phase: GamePhase,
}

impl GameState {
    /// Create a new game state
    pub fn new(
        snake: Snake,
        apple: Vec3,
        obstacles: Vec<Obstacle>,
        arena_size: f32,
        move_interval: f32,
    ) -> Self {
        Self {
            snake,
            apple,
            obstacles,
            arena_size,
            score: 0,
            move_timer: 0.0,
            move_interval,
            moves: 0,
            phase: GamePhase::Playing,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Check if a position is within the walls (inclusive)
    pub fn in_arena(&self, pos: Vec3) -> bool {
        pos.x >= -self.arena_size
            && pos.x <= self.arena_size
            && pos.z >= -self.arena_size
            && pos.z <= self.arena_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(
            Snake::new(Vec3::new(0.0, 0.5, 0.0), 3, 5.0),
            Vec3::new(5.0, 0.5, 5.0),
            Vec::new(),
            20.0,
            0.2,
        )
    }

    #[test]
    fn test_new_state() {
        let state = state();
        assert!(state.is_playing());
        assert_eq!(state.score, 0);
        assert_eq!(state.moves, 0);
        assert_eq!(state.move_timer, 0.0);
    }

    #[test]
    fn test_bounds_checking() {
        let state = state();

        assert!(state.in_arena(Vec3::new(0.0, 0.5, 0.0)));
        assert!(state.in_arena(Vec3::new(20.0, 0.5, -20.0)));
        assert!(!state.in_arena(Vec3::new(20.5, 0.5, 0.0)));
        assert!(!state.in_arena(Vec3::new(0.0, 0.5, -21.0)));
        // Height is irrelevant
        assert!(state.in_arena(Vec3::new(0.0, 100.0, 0.0)));
    }
}
