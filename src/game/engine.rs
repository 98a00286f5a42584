use glam::Vec3;
use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    action::Direction,
    config::GameConfig,
    obstacle::generate_obstacles,
    snake::Snake,
    state::{CollisionType, GamePhase, GameState},
};

/// Height at which apples float above the ground
const APPLE_HEIGHT: f32 = 0.5;

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Whether the snake took a grid step this frame
    pub advanced: bool,
    /// Whether the snake ate the apple this frame
    pub ate_apple: bool,
    /// Collision that ended the game, if any
    pub collision: Option<CollisionType>,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Start a fresh game with a new obstacle layout
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(
            self.config.start(),
            self.config.initial_snake_length,
            self.config.move_speed,
        );
        let obstacles = generate_obstacles(&mut self.rng, &self.config);

        let mut state = GameState::new(
            snake,
            Vec3::ZERO,
            obstacles,
            self.config.arena_size,
            self.config.move_interval,
        );
        self.spawn_apple(&mut state);

        info!(
            "new game: arena {}, {} obstacles",
            state.arena_size,
            state.obstacles.len()
        );
        state
    }

    /// Restart after a game over. Keeps the obstacle layout.
    ///
    /// Returns false (and changes nothing) while the game is still running.
    pub fn restart(&mut self, state: &mut GameState) -> bool {
        if state.is_playing() {
            return false;
        }

        state.snake.reset(self.config.start());
        self.spawn_apple(state);
        state.move_interval = self.config.move_interval;
        state.score = 0;
        state.moves = 0;
        state.phase = GamePhase::Playing;

        info!("game restarted");
        true
    }

    /// Queue a turn for the snake. Ignored after game over.
    pub fn steer(&self, state: &mut GameState, direction: Direction) {
        if state.is_playing() {
            state.snake.set_direction(direction);
        }
    }

    /// Advance the game by `dt` seconds
    pub fn update(&mut self, state: &mut GameState, dt: f32) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        if !state.is_playing() {
            return outcome;
        }

        state.snake.update(dt);

        state.move_timer += dt;
        if state.move_timer >= state.move_interval {
            outcome.advanced = state.snake.advance();
            if outcome.advanced {
                state.moves += 1;
            }
            // The timer restarts even if the head was still sliding
            state.move_timer = 0.0;

            if self.eat_apple(state) {
                outcome.ate_apple = true;
            } else if let Some(collision) = self.check_collision(state) {
                state.phase = GamePhase::GameOver;
                outcome.collision = Some(collision);
                info!(
                    "game over: {:?} with score {} and length {}",
                    collision,
                    state.score,
                    state.snake.len()
                );
            }
        }

        outcome
    }

    /// Eat the apple if the head touches it. Grows the snake, respawns the
    /// apple and shortens the step interval.
    pub fn eat_apple(&mut self, state: &mut GameState) -> bool {
        if state.snake.head().distance(state.apple) >= 1.0 {
            return false;
        }

        state.snake.grow();
        self.spawn_apple(state);
        state.score += self.config.apple_score;

        let speedup = state.snake.extra_len() as f32 * self.config.interval_step;
        state.move_interval = (self.config.move_interval - speedup).max(self.config.min_move_interval);

        debug!(
            "apple eaten: score {}, interval {:.3}s",
            state.score, state.move_interval
        );
        true
    }

    /// Check the visual head position against walls, body and obstacles
    pub fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        let head = state.snake.head();

        if !state.in_arena(head) {
            return Some(CollisionType::Wall);
        }

        if state.snake.segments()[1..]
            .iter()
            .any(|segment| head.distance(*segment) < 0.5)
        {
            return Some(CollisionType::SelfCollision);
        }

        state
            .obstacles
            .iter()
            .find(|obs| obs.hits(head))
            .map(|obs| CollisionType::Obstacle(obs.kind))
    }

    /// Move the apple to a random free grid spot.
    ///
    /// If no free spot turns up within the attempt budget the last candidate
    /// is used as-is.
    pub fn spawn_apple(&mut self, state: &mut GameState) {
        let mut candidate = self.random_apple_spot(state.arena_size);

        for _ in 0..self.config.apple_attempts {
            if Self::is_apple_spot_free(state, candidate) {
                state.apple = candidate;
                debug!("apple spawned at ({}, {})", candidate.x, candidate.z);
                return;
            }
            candidate = self.random_apple_spot(state.arena_size);
        }

        warn!(
            "no free apple spot after {} attempts, using ({}, {})",
            self.config.apple_attempts, candidate.x, candidate.z
        );
        state.apple = candidate;
    }

    fn random_apple_spot(&mut self, arena: f32) -> Vec3 {
        let span = ((arena * 2.0) as i32).max(1);
        let x = self.rng.gen_range(0..span) as f32 - arena;
        let z = self.rng.gen_range(0..span) as f32 - arena;
        Vec3::new(x, APPLE_HEIGHT, z)
    }

    fn is_apple_spot_free(state: &GameState, spot: Vec3) -> bool {
        if state
            .snake
            .segments()
            .iter()
            .any(|segment| spot.distance(*segment) < 1.0)
        {
            return false;
        }

        !state
            .obstacles
            .iter()
            .any(|obs| spot.distance(obs.position) < obs.kind.clearance_radius() + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::obstacle::{Obstacle, ObstacleKind};

    const FRAME: f32 = 1.0 / 60.0;
    const FAR_AWAY: Vec3 = Vec3::new(-8.0, 0.5, -8.0);

    fn run_until_over(
        engine: &mut GameEngine,
        state: &mut GameState,
        frames: usize,
    ) -> Option<CollisionType> {
        for _ in 0..frames {
            if let Some(collision) = engine.update(state, FRAME).collision {
                return Some(collision);
            }
        }
        None
    }

    fn settle(snake: &mut Snake) {
        for _ in 0..200 {
            snake.update(FRAME);
        }
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::new(GameConfig::small());
        let state = engine.reset();

        assert!(state.is_playing());
        assert_eq!(state.score, 0);
        assert_eq!(state.moves, 0);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.move_interval, 0.2);
        assert!(state.obstacles.is_empty());
        assert!(state.in_arena(state.apple));
    }

    #[test]
    fn test_reset_generates_obstacles() {
        let config = GameConfig {
            seed: Some(11),
            ..GameConfig::default()
        };
        let mut engine = GameEngine::new(config);
        let state = engine.reset();
        assert!(!state.obstacles.is_empty());
    }

    #[test]
    fn test_timer_gates_grid_steps() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.apple = FAR_AWAY;

        let outcome = engine.update(&mut state, 0.1);
        assert!(!outcome.advanced);
        assert!((state.move_timer - 0.1).abs() < 1e-6);

        let outcome = engine.update(&mut state, 0.1);
        assert!(outcome.advanced);
        assert_eq!(state.move_timer, 0.0);
        assert_eq!(state.moves, 1);
        assert_eq!(state.snake.targets()[0], Vec3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_snake_glides_between_steps() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.apple = FAR_AWAY;

        engine.update(&mut state, 0.2);
        engine.update(&mut state, 0.1);

        let head = state.snake.head();
        assert!(head.x > 0.0 && head.x < 1.0);
        assert!(state.is_playing());
    }

    #[test]
    fn test_apple_consumption() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.apple = state.snake.head();

        let outcome = engine.update(&mut state, 0.2);

        assert!(outcome.ate_apple);
        assert_eq!(outcome.collision, None);
        assert_eq!(state.score, 10);
        assert_ne!(state.apple, state.snake.head());
        assert_eq!(state.move_interval, 0.2);

        // Growth shows up with the next grid step
        assert_eq!(state.snake.len(), 3);
        settle(&mut state.snake);
        state.apple = FAR_AWAY;
        engine.update(&mut state, 0.2);
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_refused_step_still_resets_timer() {
        let config = GameConfig {
            move_speed: 1.0,
            ..GameConfig::small()
        };
        let mut engine = GameEngine::new(config);
        let mut state = engine.reset();
        state.apple = FAR_AWAY;

        let first = engine.update(&mut state, 0.2);
        assert!(first.advanced);

        // At speed 1 the head is still a fifth of the way into its step
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Rock, Vec3::new(0.2, 0.0, 0.0), 1.0, 0.0));
        let second = engine.update(&mut state, 0.2);

        assert!(!second.advanced);
        assert_eq!(state.move_timer, 0.0);
        assert_eq!(state.moves, 1);
        assert_eq!(
            second.collision,
            Some(CollisionType::Obstacle(ObstacleKind::Rock))
        );
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_apple_takes_priority_over_collision() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.apple = state.snake.head();
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Rock, Vec3::ZERO, 1.0, 0.0));

        let outcome = engine.update(&mut state, 0.2);

        assert!(outcome.ate_apple);
        assert_eq!(outcome.collision, None);
        assert_eq!(state.phase, GamePhase::Playing);
        // The rock is still under the head; only the apple was handled
        assert_eq!(
            engine.check_collision(&state),
            Some(CollisionType::Obstacle(ObstacleKind::Rock))
        );
    }

    #[test]
    fn test_interval_shrinks_with_length() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        for _ in 0..2 {
            state.snake.grow();
            state.snake.advance();
            settle(&mut state.snake);
        }
        assert_eq!(state.snake.len(), 5);

        state.apple = state.snake.head();
        assert!(engine.eat_apple(&mut state));
        assert!((state.move_interval - 0.19).abs() < 1e-6);
    }

    #[test]
    fn test_interval_floor() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        for _ in 0..40 {
            state.snake.grow();
            state.snake.advance();
            settle(&mut state.snake);
        }

        state.apple = state.snake.head();
        assert!(engine.eat_apple(&mut state));
        assert_eq!(state.move_interval, 0.08);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = GameState::new(
            Snake::new(Vec3::new(10.0, 0.5, 0.0), 3, 5.0),
            FAR_AWAY,
            Vec::new(),
            10.0,
            0.2,
        );

        let collision = run_until_over(&mut engine, &mut state, 120);

        assert_eq!(collision, Some(CollisionType::Wall));
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_self_collision() {
        let engine = GameEngine::new(GameConfig::small());
        // Body: (5,0) (4,0) (3,0) (2,0) (1,0) on the z = 0 row
        let mut state = GameState::new(
            Snake::new(Vec3::new(5.0, 0.5, 0.0), 5, 5.0),
            FAR_AWAY,
            Vec::new(),
            10.0,
            0.2,
        );

        for dir in [
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ] {
            assert_eq!(engine.check_collision(&state), None);
            state.snake.set_direction(dir);
            state.snake.advance();
            settle(&mut state.snake);
        }

        assert_eq!(
            engine.check_collision(&state),
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_obstacle_collision() {
        let mut engine = GameEngine::new(GameConfig::small());
        let rock = Obstacle::new(ObstacleKind::Rock, Vec3::new(2.0, 0.0, 0.0), 1.0, 0.0);
        let mut state = GameState::new(
            Snake::new(Vec3::new(0.0, 0.5, 0.0), 3, 5.0),
            FAR_AWAY,
            vec![rock],
            10.0,
            0.2,
        );

        let collision = run_until_over(&mut engine, &mut state, 120);

        assert_eq!(collision, Some(CollisionType::Obstacle(ObstacleKind::Rock)));
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = engine.reset();
        state.phase = GamePhase::GameOver;
        let before = state.clone();

        let outcome = engine.update(&mut state, 1.0);
        engine.steer(&mut state, Direction::Up);

        assert_eq!(outcome, FrameOutcome::default());
        assert_eq!(state, before);
    }

    #[test]
    fn test_restart() {
        let config = GameConfig {
            seed: Some(5),
            ..GameConfig::default()
        };
        let mut engine = GameEngine::new(config);
        let mut state = engine.reset();
        let obstacles = state.obstacles.clone();

        assert!(!engine.restart(&mut state));

        state.score = 30;
        state.move_interval = 0.1;
        state.snake.grow();
        state.snake.advance();
        state.phase = GamePhase::GameOver;

        assert!(engine.restart(&mut state));
        assert!(state.is_playing());
        assert_eq!(state.score, 0);
        assert_eq!(state.move_interval, 0.2);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(state.obstacles, obstacles);
    }

    #[test]
    fn test_apple_avoids_snake_and_obstacles() {
        let config = GameConfig {
            seed: Some(21),
            ..GameConfig::default()
        };
        let mut engine = GameEngine::new(config);
        let mut state = engine.reset();

        for _ in 0..100 {
            engine.spawn_apple(&mut state);
            let apple = state.apple;

            assert_eq!(apple.y, APPLE_HEIGHT);
            assert_eq!(apple.x.fract(), 0.0);
            assert!(apple.x >= -20.0 && apple.x < 20.0);
            assert!(apple.z >= -20.0 && apple.z < 20.0);
            assert!(GameEngine::is_apple_spot_free(&state, apple));
        }
    }

    #[test]
    fn test_apple_fallback_when_arena_full() {
        let config = GameConfig {
            arena_size: 2.0,
            apple_attempts: 5,
            ..GameConfig::small()
        };
        let mut engine = GameEngine::new(config);
        let mut state = engine.reset();

        // A rock on every spot an apple could take
        state.obstacles = (-2..2)
            .flat_map(|x| (-2..2).map(move |z| (x, z)))
            .map(|(x, z)| {
                Obstacle::new(
                    ObstacleKind::Rock,
                    Vec3::new(x as f32, 0.0, z as f32),
                    1.0,
                    0.0,
                )
            })
            .collect();

        engine.spawn_apple(&mut state);

        assert!(!GameEngine::is_apple_spot_free(&state, state.apple));
        assert!(state.in_arena(state.apple));
    }
}
