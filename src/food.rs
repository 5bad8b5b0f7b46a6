//! Food the snake can eat.

use glam::Vec2;

use crate::math::Aabb;

/// Single piece of food somewhere on the grid.
///
/// Only one exists, it jumps to a new cell every time it's eaten.
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    /// Top-left corner in buffer pixels, always on a grid cell.
    position: Vec2,
    /// Size, equal to a grid cell.
    size: Vec2,
}

impl Food {
    /// Place the food.
    #[inline]
    #[must_use]
    pub fn new(position: Vec2, cell_size: f32) -> Self {
        Self {
            position,
            size: Vec2::splat(cell_size),
        }
    }

    /// Top-left corner in buffer pixels.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Size of the food.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Bounding box for collisions.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.size)
    }

    /// Move the food to a uniformly chosen random grid cell.
    ///
    /// # Arguments
    ///
    /// * `rng` - Random generator, seed it for a reproducible sequence.
    /// * `columns` - Amount of cells on a row.
    /// * `rows` - Amount of cells on a column.
    pub fn respawn(&mut self, rng: &mut fastrand::Rng, columns: u32, rows: u32) {
        let column = rng.u32(0..columns.max(1));
        let row = rng.u32(0..rows.max(1));

        self.position = Vec2::new(column as f32, row as f32) * self.size;

        log::trace!("Food respawned at cell ({column}, {row})");
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::Food;

    #[test]
    fn respawn_stays_on_grid() {
        let mut rng = fastrand::Rng::with_seed(1234);
        let mut food = Food::new(Vec2::new(10.0, 10.0), 10.0);

        for _ in 0..10_000 {
            food.respawn(&mut rng, 36, 36);

            let position = food.position();
            assert!((0.0..360.0).contains(&position.x));
            assert!((0.0..360.0).contains(&position.y));
            assert!((position.x % 10.0).abs() < f32::EPSILON);
            assert!((position.y % 10.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn respawn_reaches_every_edge() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut food = Food::new(Vec2::ZERO, 20.0);

        let mut min = Vec2::splat(f32::MAX);
        let mut max = Vec2::splat(f32::MIN);
        for _ in 0..1000 {
            food.respawn(&mut rng, 4, 3);
            min = min.min(food.position());
            max = max.max(food.position());
        }

        assert_eq!(min, Vec2::ZERO);
        assert_eq!(max, Vec2::new(60.0, 40.0));
    }

    #[test]
    fn respawn_keeps_size() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut food = Food::new(Vec2::ZERO, 10.0);

        food.respawn(&mut rng, 36, 36);

        assert_eq!(food.size(), Vec2::splat(10.0));
        assert_eq!(food.bounds().size, Vec2::splat(10.0));
    }
}
