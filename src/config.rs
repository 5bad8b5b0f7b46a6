//! Game configuration.

use miette::{bail, Result};

/// Biggest buffer dimension, the lowest texture size limit a GPU is guaranteed to support.
const MAX_BUFFER_SIZE: f32 = 2048.0;

/// Initial game configuration passed to [`crate::run`].
///
/// There's two ways to initialize the config:
///
/// # Example
///
/// ```rust
/// # use snake::Config;
/// Config {
///   title: "My Snake".to_owned(),
///   ..Default::default()
/// };
/// ```
///
/// # Example
///
/// ```rust
/// # use snake::Config;
/// Config::default().with_title("My Snake");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Amount of horizontal pixels for the buffer the game is drawn on.
    ///
    /// Must fit at least a single cell and be at most `2048.0`.
    ///
    /// Defaults to `360.0`.
    pub buffer_width: f32,
    /// Amount of vertical pixels for the buffer the game is drawn on.
    ///
    /// Must fit at least a single cell and be at most `2048.0`.
    ///
    /// Defaults to `360.0`.
    pub buffer_height: f32,
    /// Size of a single square grid cell in buffer pixels.
    ///
    /// Snake segments and food are exactly this big, and the snake moves a single cell per step.
    /// Must be bigger than zero.
    ///
    /// Defaults to `10.0`.
    pub cell_size: f32,
    /// Factor applied to the buffer size for the requested window size.
    ///
    /// Defaults to `2.0`.
    pub scaling: f32,
    /// Name in the title bar.
    ///
    /// Defaults to `"Snake"`.
    pub title: String,
    /// Seconds between two snake movement steps.
    ///
    /// Defaults to `0.1`.
    pub step_delta_time: f32,
    /// Amount of frames to render each second.
    ///
    /// Defaults to `60`.
    pub target_frames_per_second: u32,
    /// Wait for the vertical refresh of the monitor when presenting a frame.
    ///
    /// Defaults to `true`.
    pub vsync: bool,
    /// Color of the viewport.
    ///
    /// The viewport is the area outside of the buffer when inside a bigger window.
    ///
    /// Defaults to `0xFFE62937` (red).
    pub viewport_color: u32,
    /// Color of the background of the buffer.
    ///
    /// Defaults to `0xFFAECC61` (pale green).
    pub background_color: u32,
    /// Color of every snake segment.
    ///
    /// Defaults to `0xFF2D341B` (dark green).
    pub snake_color: u32,
    /// Color of the food.
    ///
    /// Defaults to `0xFFE62937` (red).
    pub food_color: u32,
    /// How round the corners of the segments and the food are.
    ///
    /// `0.0` is a square, `1.0` makes the shortest side a full half circle.
    ///
    /// Defaults to `0.4`.
    pub roundness: f32,
}

impl Config {
    /// Set the amount of pixels for the buffer.
    #[inline]
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_width: f32, buffer_height: f32) -> Self {
        self.buffer_width = buffer_width;
        self.buffer_height = buffer_height;

        self
    }

    /// Set the size of a single grid cell in buffer pixels.
    #[inline]
    #[must_use]
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;

        self
    }

    /// Set the factor applied to the buffer size for the requested window size.
    #[inline]
    #[must_use]
    pub fn with_scaling(mut self, scaling: f32) -> Self {
        self.scaling = scaling;

        self
    }

    /// Set the name in the title bar.
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();

        self
    }

    /// Set the seconds between two snake movement steps.
    #[inline]
    #[must_use]
    pub fn with_step_delta_time(mut self, step_delta_time: f32) -> Self {
        self.step_delta_time = step_delta_time;

        self
    }

    /// Set the amount of frames to render each second.
    #[inline]
    #[must_use]
    pub fn with_target_frames_per_second(mut self, target_frames_per_second: u32) -> Self {
        self.target_frames_per_second = target_frames_per_second;

        self
    }

    /// Set whether to wait for the vertical refresh of the monitor.
    #[inline]
    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;

        self
    }

    /// Set the color of the viewport.
    ///
    /// The viewport is the area outside of the buffer when inside a bigger window.
    #[inline]
    #[must_use]
    pub fn with_viewport_color(mut self, viewport_color: u32) -> Self {
        self.viewport_color = viewport_color;

        self
    }

    /// Set the color of the background of the buffer.
    #[inline]
    #[must_use]
    pub fn with_background_color(mut self, background_color: u32) -> Self {
        self.background_color = background_color;

        self
    }

    /// Set the color of the snake.
    #[inline]
    #[must_use]
    pub fn with_snake_color(mut self, snake_color: u32) -> Self {
        self.snake_color = snake_color;

        self
    }

    /// Set the color of the food.
    #[inline]
    #[must_use]
    pub fn with_food_color(mut self, food_color: u32) -> Self {
        self.food_color = food_color;

        self
    }

    /// Set how round the corners of all shapes are.
    #[inline]
    #[must_use]
    pub fn with_roundness(mut self, roundness: f32) -> Self {
        self.roundness = roundness;

        self
    }

    /// Amount of grid cells on a single row.
    #[inline]
    #[must_use]
    pub fn columns(&self) -> u32 {
        (self.buffer_width / self.cell_size) as u32
    }

    /// Amount of grid cells on a single column.
    #[inline]
    #[must_use]
    pub fn rows(&self) -> u32 {
        (self.buffer_height / self.cell_size) as u32
    }

    /// Maximum amount of segments the snake can have, every cell on the grid occupied.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.columns() as usize * self.rows() as usize
    }

    /// Check whether the game can be played with this configuration.
    ///
    /// # Errors
    ///
    /// - When the cell size is not a positive number.
    /// - When the buffer can't hold a single cell.
    /// - When the buffer is too big to be used as a GPU texture.
    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            bail!(
                "Cell size must be a positive number, got {}",
                self.cell_size
            );
        }

        if !(self.buffer_width >= self.cell_size && self.buffer_height >= self.cell_size) {
            bail!(
                "Buffer of ({}x{}) can't hold a single cell of {}",
                self.buffer_width,
                self.buffer_height,
                self.cell_size
            );
        }

        if self.buffer_width > MAX_BUFFER_SIZE || self.buffer_height > MAX_BUFFER_SIZE {
            bail!(
                "Buffer of ({}x{}) is bigger than the maximum of {MAX_BUFFER_SIZE} pixels",
                self.buffer_width,
                self.buffer_height
            );
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_width: 360.0,
            buffer_height: 360.0,
            cell_size: 10.0,
            scaling: 2.0,
            title: "Snake".to_owned(),
            step_delta_time: 0.1,
            target_frames_per_second: 60,
            vsync: true,
            viewport_color: 0xFF_E6_29_37,
            background_color: 0xFF_AE_CC_61,
            snake_color: 0xFF_2D_34_1B,
            food_color: 0xFF_E6_29_37,
            roundness: 0.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn default_grid() {
        let config = Config::default();

        assert_eq!(config.columns(), 36);
        assert_eq!(config.rows(), 36);
        assert_eq!(config.capacity(), 36 * 36);
    }

    #[test]
    fn non_square_grid() {
        let config = Config::default()
            .with_buffer_size(320.0, 180.0)
            .with_cell_size(20.0);

        assert_eq!(config.columns(), 16);
        assert_eq!(config.rows(), 9);
        assert_eq!(config.capacity(), 144);
    }

    #[test]
    fn default_is_valid() {
        assert!(Config::default().validate().is_ok());
        assert!(Config::default()
            .with_buffer_size(10.0, 10.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_unplayable_grids() {
        for config in [
            Config::default().with_cell_size(0.0),
            Config::default().with_cell_size(-10.0),
            Config::default().with_cell_size(f32::NAN),
            Config::default().with_buffer_size(0.0, 360.0),
            Config::default().with_buffer_size(360.0, 5.0),
            Config::default().with_buffer_size(4096.0, 360.0),
        ] {
            assert!(config.validate().is_err(), "{config:?} should be rejected");
        }
    }
}
