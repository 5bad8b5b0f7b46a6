//! Game state and the per-frame update and render logic.

use glam::Vec2;
use winit::keyboard::KeyCode;

use crate::{
    canvas::Canvas,
    config::Config,
    food::Food,
    input::Input,
    snake::{Direction, Snake},
    timer::StepTimer,
};

/// Keys steering the snake.
///
/// Checked in this order, when multiple are pressed in the same frame the last one wins.
const KEY_BINDINGS: [(KeyCode, Direction); 4] = [
    (KeyCode::ArrowLeft, Direction::Left),
    (KeyCode::ArrowRight, Direction::Right),
    (KeyCode::ArrowUp, Direction::Up),
    (KeyCode::ArrowDown, Direction::Down),
];

/// Everything that happened during a single frame update.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameEvents {
    /// The snake moved a cell.
    pub stepped: bool,
    /// The head touched the food.
    pub ate: bool,
    /// A segment was appended, `false` when the grid is already full.
    pub grew: bool,
}

/// Object holding all game state.
#[derive(Debug)]
pub struct Game {
    /// Grid, timing and color settings.
    config: Config,
    /// Player.
    snake: Snake,
    /// The single piece of food.
    food: Food,
    /// Decides when the snake moves.
    step_timer: StepTimer,
    /// Source for food placement.
    rng: fastrand::Rng,
}

impl Game {
    /// Setup a new game with the snake in the center of the buffer.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, fastrand::Rng::new())
    }

    /// Setup a new game with a deterministic food sequence.
    #[must_use]
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_rng(config, fastrand::Rng::with_seed(seed))
    }

    /// Setup a new game from a random generator.
    fn with_rng(config: Config, rng: fastrand::Rng) -> Self {
        // Center cell, so the head shares the grid with the food
        let center_cell = Vec2::new((config.columns() / 2) as f32, (config.rows() / 2) as f32);
        let snake = Snake::new(
            center_cell * config.cell_size,
            config.cell_size,
            config.capacity(),
        );
        let food = Food::new(Vec2::splat(config.cell_size), config.cell_size);
        let step_timer = StepTimer::new(config.step_delta_time);

        log::debug!(
            "Starting game on a {}x{} grid",
            config.columns(),
            config.rows()
        );

        Self {
            config,
            snake,
            food,
            step_timer,
            rng,
        }
    }

    /// A single frame of the game.
    ///
    /// Handles input, moves the snake when the step timer fires and checks whether the food is eaten.
    ///
    /// # Arguments
    ///
    /// * `input` - Keyboard state, must be updated after this call.
    /// * `frame_time` - Seconds since the previous frame.
    pub fn update(&mut self, input: &Input, frame_time: f32) -> FrameEvents {
        profiling::scope!("Update");

        self.handle_input(input);

        let stepped = self.step_timer.tick(frame_time);
        if stepped {
            self.snake.advance();
        }

        let (ate, grew) = self.handle_food_collision();

        FrameEvents { stepped, ate, grew }
    }

    /// Steer the snake with freshly pressed arrow keys.
    pub fn handle_input(&mut self, input: &Input) {
        for (key, direction) in KEY_BINDINGS {
            if input.key_pressed(key) {
                self.snake.steer(direction);
            }
        }
    }

    /// Eat the food when the head overlaps it.
    ///
    /// The food moves to a random cell and the snake grows by a segment.
    ///
    /// # Returns
    ///
    /// - (`ate`, `grew`): whether the food was eaten and whether the snake could grow.
    pub fn handle_food_collision(&mut self) -> (bool, bool) {
        if !self.snake.head_bounds().overlaps(&self.food.bounds()) {
            return (false, false);
        }

        self.food
            .respawn(&mut self.rng, self.config.columns(), self.config.rows());
        let grew = self.snake.grow();

        (true, grew)
    }

    /// Draw the game on the buffer.
    pub fn render(&self, canvas: &mut Canvas) {
        profiling::scope!("Render");

        canvas.fill(self.config.background_color);

        for segment in self.snake.segments() {
            canvas.draw_rounded_rect(
                segment.position,
                self.snake.size(),
                self.config.roundness,
                self.config.snake_color,
            );
        }

        canvas.draw_rounded_rect(
            self.food.position(),
            self.food.size(),
            self.config.roundness,
            self.config.food_color,
        );
    }

    /// The player.
    #[inline]
    #[must_use]
    pub const fn snake(&self) -> &Snake {
        &self.snake
    }

    /// The food.
    #[inline]
    #[must_use]
    pub const fn food(&self) -> &Food {
        &self.food
    }

    /// Game settings.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use winit::keyboard::KeyCode;

    use super::Game;
    use crate::{canvas::Canvas, config::Config, food::Food, input::Input};

    fn press(input: &mut Input, key: KeyCode) {
        input.handle_key(key, true);
    }

    #[test]
    fn starts_in_center() {
        let game = Game::with_seed(Config::default(), 0);

        assert_eq!(game.snake().len(), 1);
        assert_eq!(game.snake().head().position, Vec2::new(180.0, 180.0));
        assert_eq!(game.snake().head().direction, Vec2::ZERO);
        assert_eq!(game.food().position(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn spawns_on_grid() {
        for config in [
            Config::default().with_buffer_size(30.0, 30.0),
            Config::default().with_buffer_size(50.0, 70.0),
            Config::default().with_cell_size(40.0),
            Config::default().with_cell_size(7.0),
        ] {
            let cell_size = config.cell_size;
            let game = Game::with_seed(config, 0);

            let head = game.snake().head().position;
            assert_eq!(head % cell_size, Vec2::ZERO, "head {head} isn't on the grid");
        }

        // The center cell of the 3x3 grid
        let game = Game::with_seed(Config::default().with_buffer_size(30.0, 30.0), 0);
        assert_eq!(game.snake().head().position, Vec2::new(10.0, 10.0));

        // 360 / 40 = 9 columns, center column 4
        let game = Game::with_seed(Config::default().with_cell_size(40.0), 0);
        assert_eq!(game.snake().head().position, Vec2::new(160.0, 160.0));
    }

    #[test]
    fn head_never_half_overlaps_food() {
        // 5x5 grid, head in cell (2, 2), food in cell (1, 1)
        let config = Config::default().with_buffer_size(50.0, 50.0);
        let mut game = Game::with_seed(config, 0);
        let input = Input::new();

        let events = game.update(&input, 0.0);
        assert!(!events.ate);
        assert_eq!(game.snake().len(), 1);
        assert_eq!(game.food().position(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn last_pressed_key_wins() {
        let mut game = Game::with_seed(Config::default(), 0);
        let mut input = Input::new();

        press(&mut input, KeyCode::ArrowLeft);
        press(&mut input, KeyCode::ArrowDown);
        game.handle_input(&input);

        assert_eq!(game.snake().head().direction, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn held_key_doesnt_steer_again() {
        let mut game = Game::with_seed(Config::default(), 0);
        let mut input = Input::new();

        press(&mut input, KeyCode::ArrowRight);
        game.update(&input, 0.0);
        input.update();

        press(&mut input, KeyCode::ArrowUp);
        game.update(&input, 0.0);
        input.update();
        assert_eq!(game.snake().head().direction, Vec2::new(0.0, -1.0));

        // Right is still held but was pressed frames ago
        game.update(&input, 0.0);
        assert_eq!(game.snake().head().direction, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn moves_only_when_timer_fires() {
        let mut game = Game::with_seed(Config::default(), 0);
        let mut input = Input::new();
        press(&mut input, KeyCode::ArrowRight);

        let events = game.update(&input, 0.05);
        input.update();
        assert!(!events.stepped);
        assert_eq!(game.snake().head().position, Vec2::new(180.0, 180.0));

        let events = game.update(&input, 0.05);
        assert!(events.stepped);
        assert_eq!(game.snake().head().position, Vec2::new(190.0, 180.0));

        // A huge frame still only moves a single cell
        let events = game.update(&input, 5.0);
        assert!(events.stepped);
        assert_eq!(game.snake().head().position, Vec2::new(200.0, 180.0));
    }

    #[test]
    fn eating_grows_and_moves_food() {
        // Put the head right next to the food
        let config = Config::default().with_buffer_size(40.0, 40.0);
        let mut game = Game::with_seed(config, 3);
        let mut input = Input::new();
        assert_eq!(game.snake().head().position, Vec2::new(20.0, 20.0));

        press(&mut input, KeyCode::ArrowUp);
        game.update(&input, 0.1);
        input.update();
        assert_eq!(game.snake().head().position, Vec2::new(20.0, 10.0));

        press(&mut input, KeyCode::ArrowLeft);
        let events = game.update(&input, 0.1);
        assert_eq!(game.snake().head().position, Vec2::new(10.0, 10.0));
        assert!(events.ate);
        assert!(events.grew);
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.snake().segments()[1].position, Vec2::new(20.0, 10.0));

        let food = game.food().position();
        assert!((0.0..40.0).contains(&food.x) && (0.0..40.0).contains(&food.y));
    }

    #[test]
    fn length_never_exceeds_capacity() {
        let config = Config::default().with_buffer_size(30.0, 30.0);
        let capacity = config.capacity();
        let mut game = Game::with_seed(config, 99);

        for _ in 0..capacity * 2 {
            // Force a collision by placing the food under the head
            game.food = Food::new(game.snake().head().position, 10.0);

            let (ate, _grew) = game.handle_food_collision();
            assert!(ate);
            assert!(game.snake().len() <= capacity);
        }

        assert_eq!(game.snake().len(), capacity);
        game.food = Food::new(game.snake().head().position, 10.0);
        assert_eq!(game.handle_food_collision(), (true, false));
    }

    #[test]
    fn full_grid_still_moves_food() {
        // A single cell grid is full from the start
        let config = Config::default().with_buffer_size(10.0, 10.0);
        let mut game = Game::with_seed(config, 5);
        assert_eq!(game.snake().head().position, Vec2::ZERO);
        game.food = Food::new(Vec2::ZERO, 10.0);

        let (ate, grew) = game.handle_food_collision();
        assert!(ate);
        assert!(!grew);
        assert_eq!(game.snake().len(), 1);
        assert_eq!(game.food().position(), Vec2::ZERO);
    }

    #[test]
    fn render_draws_every_segment_and_food() {
        let config = Config::default();
        let mut game = Game::with_seed(config.clone(), 0);
        game.snake.steer(crate::snake::Direction::Right);
        game.snake.grow();
        game.snake.grow();

        let mut canvas = Canvas::new(Vec2::new(config.buffer_width, config.buffer_height));
        game.render(&mut canvas);

        assert_eq!(canvas.clear_color(), config.background_color);
        assert_eq!(canvas.shapes().len(), 4);

        let (food, segments) = canvas.shapes().split_last().unwrap();
        assert!(segments.iter().all(|shape| shape.color == config.snake_color));
        assert_eq!(food.color, config.food_color);
        assert_eq!(food.position, Vec2::new(10.0, 10.0));
        assert_eq!(segments[0].position, Vec2::new(180.0, 180.0));
    }
}
