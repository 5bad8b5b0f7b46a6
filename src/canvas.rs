//! Immediate-mode list of shapes drawn on the buffer each frame.

use glam::Vec2;

/// Rectangle with rounded corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    /// Top-left corner in buffer pixels.
    pub position: Vec2,
    /// Width and height in buffer pixels.
    pub size: Vec2,
    /// How round the corners are, `0.0` is square, `1.0` makes the shortest side a half circle.
    pub roundness: f32,
    /// ARGB color.
    pub color: u32,
}

impl RoundedRect {
    /// Radius of the corners in buffer pixels.
    #[inline]
    #[must_use]
    pub fn corner_radius(&self) -> f32 {
        self.roundness.clamp(0.0, 1.0) * self.size.min_element() / 2.0
    }
}

/// Everything that should be drawn on the buffer this frame.
///
/// Is filled by the game and consumed by the GPU renderer.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// Size of the buffer in pixels.
    size: Vec2,
    /// Color the buffer is filled with before drawing the shapes.
    clear_color: u32,
    /// Shapes in drawing order.
    shapes: Vec<RoundedRect>,
}

impl Canvas {
    /// Create an empty canvas.
    #[inline]
    #[must_use]
    pub const fn new(size: Vec2) -> Self {
        Self {
            size,
            clear_color: 0xFF_00_00_00,
            shapes: Vec::new(),
        }
    }

    /// Remove all shapes and fill the buffer with a single color.
    #[inline]
    pub fn fill(&mut self, color: u32) {
        self.clear_color = color;
        self.shapes.clear();
    }

    /// Draw a rectangle with rounded corners on top of everything drawn before.
    #[inline]
    pub fn draw_rounded_rect(&mut self, position: Vec2, size: Vec2, roundness: f32, color: u32) {
        self.shapes.push(RoundedRect {
            position,
            size,
            roundness,
            color,
        });
    }

    /// Color to clear the buffer with.
    #[inline]
    #[must_use]
    pub const fn clear_color(&self) -> u32 {
        self.clear_color
    }

    /// All shapes in drawing order.
    #[inline]
    #[must_use]
    pub fn shapes(&self) -> &[RoundedRect] {
        &self.shapes
    }

    /// Size in pixels.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::Canvas;

    #[test]
    fn fill_removes_shapes() {
        let mut canvas = Canvas::new(Vec2::new(360.0, 360.0));
        canvas.draw_rounded_rect(Vec2::ZERO, Vec2::splat(10.0), 0.4, 0xFF_00_00_00);
        assert_eq!(canvas.shapes().len(), 1);

        canvas.fill(0xFF_AE_CC_61);
        assert!(canvas.shapes().is_empty());
        assert_eq!(canvas.clear_color(), 0xFF_AE_CC_61);
    }

    #[test]
    fn corner_radius() {
        let mut canvas = Canvas::new(Vec2::new(360.0, 360.0));
        canvas.draw_rounded_rect(Vec2::ZERO, Vec2::splat(10.0), 0.4, 0);
        canvas.draw_rounded_rect(Vec2::ZERO, Vec2::new(20.0, 10.0), 1.0, 0);
        canvas.draw_rounded_rect(Vec2::ZERO, Vec2::splat(10.0), 0.0, 0);

        let radii: Vec<f32> = canvas
            .shapes()
            .iter()
            .map(super::RoundedRect::corner_radius)
            .collect();
        assert!((radii[0] - 2.0).abs() < 1e-6);
        assert!((radii[1] - 5.0).abs() < 1e-6);
        assert!(radii[2].abs() < f32::EPSILON);
    }
}
