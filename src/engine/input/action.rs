// Controller actions and the fixed key table

use winit::keyboard::KeyCode;

/// Represents every button the player controller reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Directions
    Left,
    Right,
    Up,
    Down,

    // Buttons
    Jump,
    Fire,
    /// Debug hit, stands in for an enemy touching the player
    Damage,

    // Meta actions
    /// Leave the level
    TeleportOut,
    Pause,
}

impl Action {
    /// Look up the action bound to `key`
    pub fn from_key(key: KeyCode) -> Option<Self> {
        DEFAULT_BINDINGS
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, action)| *action)
    }

    /// Meta actions are handled by the host, not fed to the controller
    pub fn is_meta(&self) -> bool {
        matches!(self, Self::TeleportOut | Self::Pause)
    }
}

/// Keyboard layout
pub const DEFAULT_BINDINGS: &[(KeyCode, Action)] = &[
    (KeyCode::ArrowLeft, Action::Left),
    (KeyCode::ArrowRight, Action::Right),
    (KeyCode::ArrowUp, Action::Up),
    (KeyCode::ArrowDown, Action::Down),
    (KeyCode::KeyZ, Action::Jump),
    (KeyCode::KeyX, Action::Fire),
    (KeyCode::Space, Action::Damage),
    (KeyCode::KeyT, Action::TeleportOut),
    (KeyCode::KeyP, Action::Pause),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_map_to_directions() {
        assert_eq!(Action::from_key(KeyCode::ArrowLeft), Some(Action::Left));
        assert_eq!(Action::from_key(KeyCode::ArrowDown), Some(Action::Down));
    }

    #[test]
    fn test_buttons() {
        assert_eq!(Action::from_key(KeyCode::KeyZ), Some(Action::Jump));
        assert_eq!(Action::from_key(KeyCode::KeyX), Some(Action::Fire));
        assert_eq!(Action::from_key(KeyCode::Space), Some(Action::Damage));
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(Action::from_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_each_key_bound_once() {
        for (i, (key, _)) in DEFAULT_BINDINGS.iter().enumerate() {
            assert!(
                DEFAULT_BINDINGS[i + 1..].iter().all(|(other, _)| other != key),
                "{:?} bound twice",
                key
            );
        }
    }

    #[test]
    fn test_meta_actions() {
        assert!(Action::Pause.is_meta());
        assert!(Action::TeleportOut.is_meta());
        assert!(!Action::Jump.is_meta());
    }
}
