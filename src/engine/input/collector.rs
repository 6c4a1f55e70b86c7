// Keyboard state collected between physics ticks

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::action::Action;
use crate::game::player::InputSnapshot;

/// Turns key events into one `InputSnapshot` per tick
#[derive(Debug, Default)]
pub struct InputCollector {
    /// Actions that are currently pressed
    pressed: HashSet<Action>,

    /// Actions pressed since the last tick (press events)
    just_pressed: HashSet<Action>,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a winit keyboard event
    ///
    /// Returns the action the key is bound to, if any, so the host can react
    /// to meta actions.
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> Option<Action> {
        // Only process physical key presses
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return None;
        };
        self.handle_key(key_code, event.state, event.repeat)
    }

    /// Apply a key transition
    pub fn handle_key(&mut self, key: KeyCode, state: ElementState, repeat: bool) -> Option<Action> {
        let action = Action::from_key(key)?;
        match state {
            ElementState::Pressed => {
                // Key repeats are not taps
                if !repeat {
                    self.press(action);
                }
            }
            ElementState::Released => self.release(action),
        }
        Some(action)
    }

    /// Register an action press
    pub(crate) fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub(crate) fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Input record for the upcoming tick
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            tap_right: self.just_pressed(Action::Right),
            tap_left: self.just_pressed(Action::Left),
            tap_up: self.just_pressed(Action::Up),
            tap_down: self.just_pressed(Action::Down),
            held_right: self.is_pressed(Action::Right),
            held_left: self.is_pressed(Action::Left),
            held_up: self.is_pressed(Action::Up),
            held_down: self.is_pressed(Action::Down),
            jump_tapped: self.just_pressed(Action::Jump),
            jump_held: self.is_pressed(Action::Jump),
            fire_tapped: self.just_pressed(Action::Fire),
            damage_tapped: self.just_pressed(Action::Damage),
        }
    }

    /// Clear press edges once a tick has consumed them
    pub fn end_tick(&mut self) {
        self.just_pressed.clear();
    }

    /// Drop all state, e.g. when the window loses focus
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_tap_then_hold() {
        let mut input = InputCollector::new();
        input.handle_key(KeyCode::KeyZ, ElementState::Pressed, false);
        let snapshot = input.snapshot();
        assert!(snapshot.jump_tapped);
        assert!(snapshot.jump_held);

        input.end_tick();
        let snapshot = input.snapshot();
        assert!(!snapshot.jump_tapped);
        assert!(snapshot.jump_held);
    }

    #[test]
    fn test_repeat_is_not_a_tap() {
        let mut input = InputCollector::new();
        input.handle_key(KeyCode::KeyX, ElementState::Pressed, false);
        input.end_tick();
        input.handle_key(KeyCode::KeyX, ElementState::Pressed, true);
        assert!(!input.snapshot().fire_tapped);
    }

    #[test]
    fn test_tap_survives_release_before_tick() {
        let mut input = InputCollector::new();
        input.handle_key(KeyCode::Space, ElementState::Pressed, false);
        input.handle_key(KeyCode::Space, ElementState::Released, false);
        assert!(input.snapshot().damage_tapped);
        assert!(!input.is_pressed(Action::Damage));
    }

    #[test]
    fn test_directions() {
        let mut input = InputCollector::new();
        input.handle_key(KeyCode::ArrowLeft, ElementState::Pressed, false);
        input.handle_key(KeyCode::ArrowUp, ElementState::Pressed, false);
        let snapshot = input.snapshot();
        assert_eq!(snapshot.held_x(), -1);
        assert_eq!(snapshot.held_y(), -1);
        assert_eq!(snapshot.tap_y(), -1);
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut input = InputCollector::new();
        assert_eq!(input.handle_key(KeyCode::KeyQ, ElementState::Pressed, false), None);
        assert_eq!(input.snapshot(), InputSnapshot::neutral());
    }

    #[test]
    fn test_reset() {
        let mut input = InputCollector::new();
        input.press(Action::Right);
        input.reset();
        assert_eq!(input.snapshot(), InputSnapshot::neutral());
    }
}
