//! Simple math types.

use glam::Vec2;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner.
    pub position: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Aabb {
    /// Construct from the top-left corner and the size.
    #[inline]
    #[must_use]
    pub const fn new(position: Vec2, size: Vec2) -> Self {
        Self { position, size }
    }

    /// Bottom-right corner.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.position + self.size
    }

    /// Whether both boxes share any area.
    ///
    /// Boxes that only touch at their edges don't overlap.
    ///
    /// # Arguments
    ///
    /// * `other` - Box to check against.
    ///
    /// # Returns
    ///
    /// - `true` when the boxes overlap.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let max = self.max();
        let other_max = other.max();

        self.position.x < other_max.x
            && max.x > other.position.x
            && self.position.y < other_max.y
            && max.y > other.position.y
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::Aabb;

    #[test]
    fn overlaps() {
        let cell = Vec2::splat(10.0);
        let a = Aabb::new(Vec2::new(10.0, 10.0), cell);

        assert!(a.overlaps(&a));
        assert!(a.overlaps(&Aabb::new(Vec2::new(15.0, 5.0), cell)));
        assert!(Aabb::new(Vec2::new(15.0, 5.0), cell).overlaps(&a));
    }

    #[test]
    fn touching_edges_dont_overlap() {
        let cell = Vec2::splat(10.0);
        let a = Aabb::new(Vec2::new(10.0, 10.0), cell);

        assert!(!a.overlaps(&Aabb::new(Vec2::new(20.0, 10.0), cell)));
        assert!(!a.overlaps(&Aabb::new(Vec2::new(0.0, 10.0), cell)));
        assert!(!a.overlaps(&Aabb::new(Vec2::new(10.0, 20.0), cell)));
        assert!(!a.overlaps(&Aabb::new(Vec2::new(10.0, 0.0), cell)));
    }
}
