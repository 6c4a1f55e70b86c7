// Per-tick input record consumed by the state machine

use crate::core::math::axis;

/// Immutable snapshot of the controls for one tick
///
/// "Tapped" fields are edges (true only on the tick the button went down),
/// "held" fields are levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub tap_right: bool,
    pub tap_left: bool,
    pub tap_up: bool,
    pub tap_down: bool,
    pub held_right: bool,
    pub held_left: bool,
    pub held_up: bool,
    pub held_down: bool,
    pub jump_tapped: bool,
    pub jump_held: bool,
    pub fire_tapped: bool,
    pub damage_tapped: bool,
}

impl InputSnapshot {
    /// Held horizontal direction: -1 left, 0 none/both, 1 right
    pub fn held_x(&self) -> i8 {
        axis(self.held_right, self.held_left)
    }

    /// Held vertical direction in screen space: -1 up, 1 down
    pub fn held_y(&self) -> i8 {
        axis(self.held_down, self.held_up)
    }

    /// Tapped horizontal direction: -1 left, 1 right
    pub fn tap_x(&self) -> i8 {
        axis(self.tap_right, self.tap_left)
    }

    /// Tapped vertical direction in screen space: -1 up, 1 down
    pub fn tap_y(&self) -> i8 {
        axis(self.tap_down, self.tap_up)
    }

    /// Snapshot with nothing pressed
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Hold left or right (`dir` < 0 is left)
    pub fn holding_x(mut self, dir: i8) -> Self {
        self.held_left = dir < 0;
        self.held_right = dir > 0;
        self
    }

    /// Hold up or down (`dir` < 0 is up)
    pub fn holding_y(mut self, dir: i8) -> Self {
        self.held_up = dir < 0;
        self.held_down = dir > 0;
        self
    }

    /// Press jump this tick (tap and hold)
    pub fn jumping(mut self) -> Self {
        self.jump_tapped = true;
        self.jump_held = true;
        self
    }

    pub fn firing(mut self) -> Self {
        self.fire_tapped = true;
        self
    }

    pub fn damaged(mut self) -> Self {
        self.damage_tapped = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_axes() {
        let input = InputSnapshot::neutral();
        assert_eq!(input.held_x(), 0);
        assert_eq!(input.held_y(), 0);
        assert_eq!(input.tap_x(), 0);
        assert_eq!(input.tap_y(), 0);
    }

    #[test]
    fn test_opposing_directions_cancel() {
        let input = InputSnapshot {
            held_left: true,
            held_right: true,
            ..Default::default()
        };
        assert_eq!(input.held_x(), 0);
    }

    #[test]
    fn test_vertical_axis_is_screen_space() {
        assert_eq!(InputSnapshot::neutral().holding_y(-1).held_y(), -1);
        assert!(InputSnapshot::neutral().holding_y(-1).held_up);
        assert_eq!(InputSnapshot::neutral().holding_y(1).held_y(), 1);
    }

    #[test]
    fn test_jumping_sets_tap_and_hold() {
        let input = InputSnapshot::neutral().jumping();
        assert!(input.jump_tapped);
        assert!(input.jump_held);
    }
}
