//! Input state tracking for pointer and keyboard events.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// The action modifier: Ctrl, or Cmd on macOS hosts reporting meta.
    pub fn action(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event for unified mouse/touch handling. Positions are in screen
/// coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Scroll {
        position: Point,
        delta: Vec2,
    },
    /// Pointer left the drawing surface; treated like a pointer-up so no
    /// gesture can get stuck mid-drag.
    Leave,
}

/// Keyboard event carrying a host key name ("Escape", "Delete", "a", ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Double-click detection constants. The window matches the select tool's
/// text-edit delegation threshold.
const DOUBLE_CLICK_TIME_MS: u128 = 300;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tracks pointer position, pressed buttons/keys, and double-clicks.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Pointer position before the last move, for delta calculations.
    pub previous_pointer_position: Point,
    pressed_buttons: HashSet<MouseButton>,
    pub modifiers: Modifiers,
    pressed_keys: HashSet<String>,
    last_click_time: Option<Instant>,
    last_click_position: Option<Point>,
    double_click_detected: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_position: Point::ZERO,
            previous_pointer_position: Point::ZERO,
            pressed_buttons: HashSet::new(),
            modifiers: Modifiers::default(),
            pressed_keys: HashSet::new(),
            last_click_time: None,
            last_click_position: None,
            double_click_detected: false,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = *position;
                self.pressed_buttons.insert(*button);

                if *button == MouseButton::Left {
                    let now = Instant::now();
                    self.double_click_detected = false;
                    if let (Some(last_time), Some(last_pos)) =
                        (self.last_click_time, self.last_click_position)
                    {
                        let elapsed = now.duration_since(last_time).as_millis();
                        let distance = (*position - last_pos).hypot();
                        if elapsed < DOUBLE_CLICK_TIME_MS && distance < DOUBLE_CLICK_DISTANCE {
                            self.double_click_detected = true;
                            // Prevent a triple-click counting as another double
                            self.last_click_time = None;
                            self.last_click_position = None;
                            return;
                        }
                    }
                    self.last_click_time = Some(now);
                    self.last_click_position = Some(*position);
                }
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = *position;
                self.pressed_buttons.remove(button);
            }
            PointerEvent::Move { position } => {
                self.previous_pointer_position = self.pointer_position;
                self.pointer_position = *position;
            }
            PointerEvent::Scroll { position, .. } => {
                self.pointer_position = *position;
            }
            PointerEvent::Leave => {
                self.pressed_buttons.clear();
            }
        }
    }

    /// Process a key event.
    pub fn handle_key_event(&mut self, event: &KeyEvent) {
        match event {
            KeyEvent::Pressed(key) => {
                self.pressed_keys.insert(key.clone());
            }
            KeyEvent::Released(key) => {
                self.pressed_keys.remove(key);
            }
        }
    }

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    /// Whether the most recent left-button press was a double-click.
    pub fn is_double_click(&self) -> bool {
        self.double_click_detected
    }

    /// Pointer movement since the previous move event.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_position - self.previous_pointer_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_tracking() {
        let mut input = InputState::new();
        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Middle,
        });
        assert!(input.is_button_pressed(MouseButton::Middle));
        assert!(!input.is_button_pressed(MouseButton::Left));

        input.handle_pointer_event(&PointerEvent::Up {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Middle,
        });
        assert!(!input.is_button_pressed(MouseButton::Middle));
    }

    #[test]
    fn test_leave_clears_buttons() {
        let mut input = InputState::new();
        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::ZERO,
            button: MouseButton::Left,
        });
        input.handle_pointer_event(&PointerEvent::Leave);
        assert!(!input.is_button_pressed(MouseButton::Left));
    }

    #[test]
    fn test_pointer_delta() {
        let mut input = InputState::new();
        input.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(100.0, 100.0),
        });
        input.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(130.0, 90.0),
        });
        let delta = input.pointer_delta();
        assert!((delta.x - 30.0).abs() < f64::EPSILON);
        assert!((delta.y - -10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_key_tracking() {
        let mut input = InputState::new();
        input.handle_key_event(&KeyEvent::Pressed("Space".to_string()));
        assert!(input.is_key_pressed("Space"));
        input.handle_key_event(&KeyEvent::Released("Space".to_string()));
        assert!(!input.is_key_pressed("Space"));
    }

    #[test]
    fn test_double_click_same_spot() {
        let mut input = InputState::new();
        let pos = Point::new(50.0, 50.0);
        input.handle_pointer_event(&PointerEvent::Down {
            position: pos,
            button: MouseButton::Left,
        });
        assert!(!input.is_double_click());
        input.handle_pointer_event(&PointerEvent::Up {
            position: pos,
            button: MouseButton::Left,
        });
        input.handle_pointer_event(&PointerEvent::Down {
            position: pos,
            button: MouseButton::Left,
        });
        assert!(input.is_double_click());
    }

    #[test]
    fn test_double_click_too_far() {
        let mut input = InputState::new();
        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        input.handle_pointer_event(&PointerEvent::Down {
            position: Point::new(200.0, 200.0),
            button: MouseButton::Left,
        });
        assert!(!input.is_double_click());
    }

    #[test]
    fn test_action_modifier() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        let meta = Modifiers {
            meta: true,
            ..Modifiers::default()
        };
        assert!(ctrl.action());
        assert!(meta.action());
        assert!(!Modifiers::default().action());
    }
}
