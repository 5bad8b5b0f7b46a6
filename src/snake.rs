//! The snake and its movement over the grid.

use glam::Vec2;

use crate::math::Aabb;

/// Axis-aligned direction a segment can travel in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards negative X.
    Left,
    /// Towards positive X.
    Right,
    /// Towards negative Y, the top of the screen.
    Up,
    /// Towards positive Y, the bottom of the screen.
    Down,
}

impl Direction {
    /// Unit vector pointing in this direction.
    #[inline]
    #[must_use]
    pub const fn vector(self) -> Vec2 {
        match self {
            Self::Left => Vec2::NEG_X,
            Self::Right => Vec2::X,
            Self::Up => Vec2::NEG_Y,
            Self::Down => Vec2::Y,
        }
    }
}

/// Single grid cell of the snake body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Top-left corner in buffer pixels.
    pub position: Vec2,
    /// Direction of travel, zero when standing still.
    pub direction: Vec2,
}

impl Segment {
    /// Create a segment.
    #[inline]
    #[must_use]
    pub const fn new(position: Vec2, direction: Vec2) -> Self {
        Self {
            position,
            direction,
        }
    }
}

/// Player controlled snake.
///
/// The first segment is the head, every other segment follows the one in front of it.
#[derive(Debug, Clone)]
pub struct Snake {
    /// Size of every segment, equal to a grid cell.
    size: Vec2,
    /// All segments, the head at index zero.
    ///
    /// Never empty and never longer than `capacity`.
    body: Vec<Segment>,
    /// Maximum amount of segments.
    capacity: usize,
}

impl Snake {
    /// Spawn a standing still snake with only a head.
    ///
    /// # Arguments
    ///
    /// * `position` - Top-left corner of the head.
    /// * `cell_size` - Size of a single grid cell, used for the size of every segment.
    /// * `capacity` - Maximum amount of segments, clamped to at least the head.
    #[must_use]
    pub fn new(position: Vec2, cell_size: f32, capacity: usize) -> Self {
        let capacity = capacity.max(1);

        let mut body = Vec::with_capacity(capacity);
        body.push(Segment::new(position, Vec2::ZERO));

        Self {
            size: Vec2::splat(cell_size),
            body,
            capacity,
        }
    }

    /// First segment.
    #[inline]
    #[must_use]
    pub fn head(&self) -> &Segment {
        &self.body[0]
    }

    /// All segments starting with the head.
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.body
    }

    /// Amount of segments including the head.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always `false`, the head can't be removed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Maximum amount of segments.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Size of a single segment.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Bounding box of the head.
    #[inline]
    #[must_use]
    pub fn head_bounds(&self) -> Aabb {
        Aabb::new(self.head().position, self.size)
    }

    /// Point the head in a new direction, overwriting the previous one.
    ///
    /// Reversing into the body is allowed.
    #[inline]
    pub fn steer(&mut self, direction: Direction) {
        self.body[0].direction = direction.vector();
    }

    /// Move the snake a single grid cell.
    ///
    /// Every segment takes the position and direction its predecessor had before this step, the head jumps a cell in its own direction.
    pub fn advance(&mut self) {
        // Walk from the tail to the head so every segment reads the old state of the one in front
        for index in (1..self.body.len()).rev() {
            self.body[index] = self.body[index - 1];
        }

        let head = &mut self.body[0];
        head.position += head.direction * self.size;
    }

    /// Append a segment right behind the head.
    ///
    /// The segment gets the head direction and sits a cell behind it.
    ///
    /// # Returns
    ///
    /// - `false` when the snake already fills the whole grid, nothing is appended.
    pub fn grow(&mut self) -> bool {
        if self.body.len() >= self.capacity {
            log::debug!("Snake reached maximum length of {}", self.capacity);

            return false;
        }

        let head = *self.head();
        self.body.push(Segment::new(
            head.position - head.direction * self.size,
            head.direction,
        ));

        log::debug!("Snake grew to {} segments", self.body.len());

        true
    }
}
