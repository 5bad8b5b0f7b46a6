//! Handle keyboard input events.

use hashbrown::HashMap;
use winit::{
    event::{ElementState, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Any button state.
#[derive(Debug, Default)]
pub(crate) struct ButtonState {
    /// Whether the button is being held down this frame.
    is_down: bool,
    /// Whether the button was being held down the previous frame.
    was_down_previous_tick: bool,
}

impl ButtonState {
    /// Create a new state.
    pub(crate) const fn new(is_down: bool) -> Self {
        let was_down_previous_tick = false;

        Self {
            is_down,
            was_down_previous_tick,
        }
    }

    /// Handle the state if the button is currently pressed.
    pub(crate) fn handle_event(&mut self, pressed: bool) {
        self.is_down = pressed;
    }

    /// Handle the state changes using the frame to respond to changes.
    pub(crate) fn update(&mut self) {
        self.was_down_previous_tick = self.is_down;
    }

    /// Whether the button is being pressed now.
    pub(crate) const fn held(&self) -> bool {
        self.is_down
    }

    /// Whether the button goes from released to pressed.
    pub(crate) const fn pressed(&self) -> bool {
        !self.was_down_previous_tick && self.is_down
    }
}

/// Manager for handling keyboard events.
#[derive(Debug, Default)]
pub struct Input {
    /// All keyboard buttons that have been touched at least once.
    keys: HashMap<KeyCode, ButtonState>,
}

impl Input {
    /// Setup the input.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a winit window event.
    ///
    /// Events that are not keyboard events are ignored.
    #[inline]
    pub fn handle_event(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = event {
            if let PhysicalKey::Code(keycode) = event.physical_key {
                self.handle_key(keycode, event.state == ElementState::Pressed);
            }
        }
    }

    /// Register the state of a single key.
    ///
    /// OS key repeats arrive as extra "down" events, they don't change the state.
    #[inline]
    pub fn handle_key(&mut self, keycode: KeyCode, is_down: bool) {
        if let Some(state) = self.keys.get_mut(&keycode) {
            // Key already registered, update the state
            state.handle_event(is_down);
        } else {
            // Key not found, register it
            self.keys.insert(keycode, ButtonState::new(is_down));
        }
    }

    /// Update all registered buttons.
    ///
    /// Only allowed to be called once per frame, after the game has been updated.
    #[inline]
    pub fn update(&mut self) {
        // Update all button states, needed to handle "pressed"
        self.keys.iter_mut().for_each(|(_, state)| state.update());
    }

    /// Whether the key went from released to pressed since the previous frame.
    #[inline]
    #[must_use]
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        let Some(key_button_state) = self.keys.get(&key) else {
            return false;
        };

        key_button_state.pressed()
    }

    /// Whether the key is being held down.
    #[inline]
    #[must_use]
    pub fn key_held(&self, key: KeyCode) -> bool {
        let Some(key_button_state) = self.keys.get(&key) else {
            return false;
        };

        key_button_state.held()
    }
}
