use glam::Vec3;
use log::debug;
use rand::Rng;

use super::config::GameConfig;

/// Kind of static obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Tree,
    Rock,
}

impl ObstacleKind {
    /// Radius used when spacing obstacles apart and away from the walls
    pub fn placement_radius(&self) -> f32 {
        match self {
            ObstacleKind::Tree => 1.0,
            ObstacleKind::Rock => 0.8,
        }
    }

    /// Radius an apple has to keep clear of (plus one unit)
    pub fn clearance_radius(&self) -> f32 {
        match self {
            ObstacleKind::Tree => 0.7,
            ObstacleKind::Rock => 0.8,
        }
    }
}

/// A static obstacle standing on the ground
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    /// Base position, always at ground level (y = 0)
    pub position: Vec3,
    pub scale: f32,
    /// Yaw in degrees, visual only
    pub rotation: f32,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, position: Vec3, scale: f32, rotation: f32) -> Self {
        Self {
            kind,
            position,
            scale,
            rotation,
        }
    }

    /// Whether a snake head at `head` touches this obstacle.
    ///
    /// Trees only block at the trunk, measured on the ground plane.
    /// Rocks block as a sphere around their base.
    pub fn hits(&self, head: Vec3) -> bool {
        match self.kind {
            ObstacleKind::Tree => {
                let dx = head.x - self.position.x;
                let dz = head.z - self.position.z;
                (dx * dx + dz * dz).sqrt() < 0.3 * self.scale
            }
            ObstacleKind::Rock => head.distance(self.position) < 0.7 * self.scale,
        }
    }
}

/// Scatter obstacles over the arena by rejection sampling.
///
/// Slots that run out of attempts are skipped, so the result may hold fewer
/// than `max_obstacles` entries.
pub fn generate_obstacles<R: Rng>(rng: &mut R, config: &GameConfig) -> Vec<Obstacle> {
    let arena = config.arena_size;
    let span = ((arena * 1.8) as i32).max(1);
    let mut obstacles: Vec<Obstacle> = Vec::with_capacity(config.max_obstacles);

    for slot in 0..config.max_obstacles {
        let kind = if rng.gen_bool(0.5) {
            ObstacleKind::Tree
        } else {
            ObstacleKind::Rock
        };

        let mut placed = None;
        for _ in 0..config.obstacle_attempts {
            let x = rng.gen_range(0..span) as f32 - arena * 0.9;
            let z = rng.gen_range(0..span) as f32 - arena * 0.9;
            let position = Vec3::new(x, 0.0, z);

            if position.length() < config.obstacle_clearance {
                continue;
            }

            let rotation = rng.gen_range(0..360) as f32;
            let scale = 0.8 + rng.gen_range(0..50) as f32 / 100.0;

            if is_position_free(position, kind.placement_radius(), &obstacles, arena) {
                placed = Some(Obstacle::new(kind, position, scale, rotation));
                break;
            }
        }

        match placed {
            Some(obstacle) => obstacles.push(obstacle),
            None => debug!("obstacle slot {} skipped after {} attempts", slot, config.obstacle_attempts),
        }
    }

    debug!("placed {} of {} obstacles", obstacles.len(), config.max_obstacles);
    obstacles
}

/// A spot is free when it keeps `2 * radius` from every placed obstacle and
/// `1.2 * radius` from every wall.
pub fn is_position_free(position: Vec3, radius: f32, placed: &[Obstacle], arena: f32) -> bool {
    if placed
        .iter()
        .any(|obs| position.distance(obs.position) < radius * 2.0)
    {
        return false;
    }

    let margin = radius * 1.2;
    !(position.x > arena - margin
        || position.x < -arena + margin
        || position.z > arena - margin
        || position.z < -arena + margin)
}
