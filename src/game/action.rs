use glam::Vec3;

/// Direction the snake can move on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// One grid step in this direction. Up is -Z, Right is +X.
    pub fn offset(&self) -> Vec3 {
        match self {
            Direction::Up => Vec3::new(0.0, 0.0, -1.0),
            Direction::Down => Vec3::new(0.0, 0.0, 1.0),
            Direction::Left => Vec3::new(-1.0, 0.0, 0.0),
            Direction::Right => Vec3::new(1.0, 0.0, 0.0),
        }
    }
}
