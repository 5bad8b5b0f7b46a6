#![forbid(unsafe_code)]

//! AGPL licensed tiny snake game drawn on a letterboxed pixel buffer.
//!
//! # Features
//!
//! - Grid based movement, the snake advances a single cell every step.
//! - Step timer independent from the frame rate.
//! - Rounded rectangles drawn with a single instanced draw call.
//! - Pixel buffer scaled to fit the window while keeping its aspect ratio, with bars in a separate color.
//!
//! # Non-Goals
//!
//! - A score, a game-over screen or menus, the snake can't die.
//! - Collisions with the walls or the snake itself, the snake can leave the screen.
//! - Audio.
//!
//! # Usage
//!
//! The binary opens a window with the default configuration.
//! Use the arrow keys to steer, 'Escape' closes the window.
//!
//! ```no_run
//! use snake::Config;
//!
//! # fn try_main() -> miette::Result<()> {
//! snake::run(Config::default().with_step_delta_time(0.05))?;
//! # Ok(())
//! # }
//! ```
//!
//! The game itself doesn't need a window, which makes it possible to drive it manually:
//!
//! ```
//! use glam::Vec2;
//! use snake::{canvas::Canvas, input::Input, Config, Game};
//!
//! let config = Config::default();
//! let mut canvas = Canvas::new(Vec2::new(config.buffer_width, config.buffer_height));
//! let mut game = Game::with_seed(config, 42);
//! let input = Input::new();
//!
//! // Move a single step
//! let events = game.update(&input, 0.1);
//! assert!(events.stepped);
//!
//! // Background color, a single segment and the food
//! game.render(&mut canvas);
//! assert_eq!(canvas.shapes().len(), 2);
//! ```

pub mod canvas;
pub mod config;
pub mod food;
pub mod game;
mod graphics;
pub mod input;
pub mod math;
pub mod snake;
pub mod timer;
mod window;

pub use config::Config;
pub use game::Game;
pub use window::run;
