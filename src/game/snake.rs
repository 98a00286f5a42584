use glam::Vec3;

use super::action::Direction;

/// The snake, with a logical grid body and a smoothed visual body.
///
/// `targets` holds the grid positions the game reasons about, `segments`
/// holds where each segment is currently drawn. [`Snake::advance`] moves the
/// targets one cell, [`Snake::update`] slides the segments after them.
/// Both vectors always have the same length, head at index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: Vec<Vec3>,
    targets: Vec<Vec3>,
    direction: Direction,
    next_direction: Direction,
    should_grow: bool,
    is_moving: bool,
    move_speed: f32,
    base_len: usize,
}

#[allow(clippy::len_without_is_empty)]
impl Snake {
    /// Create a snake heading right, with its body trailing along -X
    pub fn new(start: Vec3, length: usize, move_speed: f32) -> Self {
        let length = length.max(1);
        let mut snake = Self {
            segments: Vec::with_capacity(length),
            targets: Vec::with_capacity(length),
            direction: Direction::Right,
            next_direction: Direction::Right,
            should_grow: false,
            is_moving: false,
            move_speed,
            base_len: length,
        };
        snake.reset(start);
        snake
    }

    /// Put the snake back to its starting length at `start`
    pub fn reset(&mut self, start: Vec3) {
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.should_grow = false;
        self.is_moving = false;

        let back = -Direction::Right.offset();
        self.segments.clear();
        self.segments
            .extend((0..self.base_len).map(|i| start + back * i as f32));
        self.targets = self.segments.clone();
    }

    /// Queue a direction for the next grid step.
    ///
    /// Reversing onto the current heading is ignored. The check is against
    /// the direction actually being travelled, not the queued one.
    pub fn set_direction(&mut self, dir: Direction) {
        if self.direction.is_opposite(dir) {
            return;
        }
        self.next_direction = dir;
    }

    /// Take one grid step. Returns false while the head is still sliding
    /// toward its previous target.
    pub fn advance(&mut self) -> bool {
        if self.is_moving {
            return false;
        }

        self.direction = self.next_direction;

        let tail = self.targets[self.targets.len() - 1];
        for i in (1..self.targets.len()).rev() {
            self.targets[i] = self.targets[i - 1];
        }
        self.targets[0] += self.direction.offset();

        if self.should_grow {
            self.targets.push(tail);
            self.segments.push(tail);
            self.should_grow = false;
        }

        self.is_moving = true;
        true
    }

    /// Slide the visual segments toward their targets
    pub fn update(&mut self, dt: f32) {
        if !self.is_moving {
            return;
        }

        let base_speed = self.base_speed();

        let head_step = base_speed * dt;
        if self.segments[0].distance(self.targets[0]) < head_step {
            self.segments[0] = self.targets[0];
            self.is_moving = false;
        } else {
            self.segments[0] = step_toward(self.segments[0], self.targets[0], head_step);
        }

        // Trailing segments catch up slightly faster than the head
        for i in 1..self.segments.len() {
            let step = base_speed * (1.0 + 0.1 * i as f32) * dt;
            if self.segments[i].distance(self.targets[i]) < step {
                self.segments[i] = self.targets[i];
            } else {
                self.segments[i] = step_toward(self.segments[i], self.targets[i], step);
            }
        }
    }

    /// Grow by one segment on the next grid step
    pub fn grow(&mut self) {
        self.should_grow = true;
    }

    fn base_speed(&self) -> f32 {
        let boosted = self.move_speed * (1.0 + self.extra_len() as f32 * 0.05);
        boosted.min(self.move_speed * 3.0)
    }

    /// Segments gained since the snake was created
    pub fn extra_len(&self) -> usize {
        self.segments.len().saturating_sub(self.base_len)
    }

    pub fn head(&self) -> Vec3 {
        self.segments[0]
    }

    pub fn segments(&self) -> &[Vec3] {
        &self.segments
    }

    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

fn step_toward(from: Vec3, to: Vec3, distance: f32) -> Vec3 {
    from + (to - from).normalize_or_zero() * distance
}
