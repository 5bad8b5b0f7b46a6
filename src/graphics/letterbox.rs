//! Fit the buffer inside the window while keeping its aspect ratio.

use glam::Vec2;

/// Area of the window the scaled buffer is drawn in.
///
/// Everything outside of it is filled with the viewport color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Letterbox {
    /// Top-left corner in window pixels.
    pub(crate) offset: Vec2,
    /// Size of the scaled buffer in window pixels.
    pub(crate) size: Vec2,
    /// Uniform factor the buffer is scaled with.
    pub(crate) scale: f32,
}

impl Letterbox {
    /// Scale the buffer as big as possible inside the screen and center it.
    ///
    /// The scale isn't restricted to integers, so the buffer always touches two sides of the window.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - Size of the buffer in pixels, must not be zero.
    /// * `screen_size` - Size of the window in physical pixels.
    pub(crate) fn fit(buffer_size: Vec2, screen_size: Vec2) -> Self {
        let scale = (screen_size / buffer_size).min_element();

        // Rounding can make the scaled size a fraction bigger than the screen
        let size = (buffer_size * scale).min(screen_size);
        let offset = (screen_size - size) / 2.0;

        Self {
            offset,
            size,
            scale,
        }
    }

    /// Whether the buffer covers the whole screen.
    pub(crate) fn fills(&self, screen_size: Vec2) -> bool {
        self.offset == Vec2::ZERO && self.size == screen_size
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::Letterbox;

    #[test]
    fn integer_multiple_fills_screen() {
        let buffer = Vec2::new(360.0, 360.0);

        for k in 1..=8 {
            let screen = buffer * k as f32;
            let letterbox = Letterbox::fit(buffer, screen);

            assert!((letterbox.scale - k as f32).abs() < f32::EPSILON);
            assert!(letterbox.fills(screen));
        }

        let buffer = Vec2::new(320.0, 180.0);
        let letterbox = Letterbox::fit(buffer, buffer * 3.0);
        assert!((letterbox.scale - 3.0).abs() < f32::EPSILON);
        assert_eq!(letterbox.offset, Vec2::ZERO);
    }

    #[test]
    fn wide_window_has_side_bars() {
        let letterbox = Letterbox::fit(Vec2::new(360.0, 360.0), Vec2::new(1280.0, 720.0));

        assert!((letterbox.scale - 2.0).abs() < f32::EPSILON);
        assert_eq!(letterbox.size, Vec2::new(720.0, 720.0));
        assert_eq!(letterbox.offset, Vec2::new(280.0, 0.0));
    }

    #[test]
    fn tall_window_has_top_and_bottom_bars() {
        let letterbox = Letterbox::fit(Vec2::new(360.0, 360.0), Vec2::new(540.0, 900.0));

        assert!((letterbox.scale - 1.5).abs() < f32::EPSILON);
        assert_eq!(letterbox.size, Vec2::new(540.0, 540.0));
        assert_eq!(letterbox.offset, Vec2::new(0.0, 180.0));
    }

    #[test]
    fn smaller_than_buffer() {
        let letterbox = Letterbox::fit(Vec2::new(360.0, 360.0), Vec2::new(180.0, 90.0));

        assert!((letterbox.scale - 0.25).abs() < f32::EPSILON);
        assert_eq!(letterbox.size, Vec2::new(90.0, 90.0));
        assert_eq!(letterbox.offset, Vec2::new(45.0, 0.0));
    }

    #[test]
    fn tiny_window() {
        // Windows may be resized to a single pixel
        let letterbox = Letterbox::fit(Vec2::new(360.0, 360.0), Vec2::new(1.0, 1.0));

        assert!(letterbox.size.abs_diff_eq(Vec2::ONE, 1e-6));
        assert!(letterbox.offset.abs_diff_eq(Vec2::ZERO, 1e-6));
        assert!(letterbox.size.cmple(Vec2::ONE).all());
    }
}
