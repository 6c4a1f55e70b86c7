// Player movement states

/// Represents the current movement state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    /// Sprite dropping in from above the screen at level start
    TeleportIn,
    /// Landing flash after the teleport drop
    Appear,
    /// Leaving the level
    TeleportOut,
    /// Standing still on ground
    Idle,
    /// The short step taken before breaking into a run
    Step,
    /// Running on ground
    Run,
    /// Airborne, rising or falling
    Jump,
    /// Sliding along the floor under the standing hitbox height
    Slide,
    /// Holding on to a ladder shaft
    Climb,
    /// Pulling up over (or lowering from) the top of a ladder
    ClimbTop,
    /// Damage flinch
    Hurt,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::TeleportIn
    }
}

impl PlayerState {
    /// Every state, in declaration order
    pub const ALL: [PlayerState; 11] = [
        Self::TeleportIn,
        Self::Appear,
        Self::TeleportOut,
        Self::Idle,
        Self::Step,
        Self::Run,
        Self::Jump,
        Self::Slide,
        Self::Climb,
        Self::ClimbTop,
        Self::Hurt,
    ];

    /// Level entry/exit states, during which the player has no control
    pub fn is_teleporting(&self) -> bool {
        matches!(self, Self::TeleportIn | Self::Appear | Self::TeleportOut)
    }

    /// Check if the player is on a ladder
    pub fn is_climbing(&self) -> bool {
        matches!(self, Self::Climb | Self::ClimbTop)
    }

    /// States where held horizontal input turns the player around immediately
    pub fn is_free_moving(&self) -> bool {
        matches!(
            self,
            Self::Idle | Self::Step | Self::Run | Self::Jump | Self::Slide
        )
    }

    /// Check if gravity applies in this state
    pub fn has_gravity(&self) -> bool {
        !self.is_teleporting() && !self.is_climbing()
    }

    /// Check if held horizontal input drives the run speed in this state
    pub fn has_run_control(&self) -> bool {
        !self.is_teleporting()
            && !self.is_climbing()
            && !matches!(self, Self::Slide | Self::Hurt)
    }

    /// Check if taking damage is possible
    pub fn can_be_hurt(&self) -> bool {
        !self.is_teleporting()
    }

    /// Check if the weapon can be fired
    pub fn can_fire(&self) -> bool {
        !self.is_teleporting() && !matches!(self, Self::Slide | Self::Hurt)
    }

    /// Get the animation clip for this state
    pub fn clip_name(&self) -> &'static str {
        match self {
            Self::TeleportIn => "teleport",
            Self::Appear => "teleport-in",
            Self::TeleportOut => "teleport-out",
            Self::Idle => "idle",
            Self::Step => "step",
            Self::Run => "run",
            Self::Jump => "jump",
            Self::Slide => "slide",
            Self::Climb => "climb",
            Self::ClimbTop => "climb-top",
            Self::Hurt => "hurt",
        }
    }
}

/// Sprite texture variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureVariant {
    #[default]
    Normal,
    /// Arm-cannon pose, swapped in without restarting the running clip
    Shoot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        assert_eq!(PlayerState::default(), PlayerState::TeleportIn);
    }

    #[test]
    fn test_gravity_states() {
        assert!(PlayerState::Idle.has_gravity());
        assert!(PlayerState::Jump.has_gravity());
        assert!(PlayerState::Slide.has_gravity());
        assert!(PlayerState::Hurt.has_gravity());
        assert!(!PlayerState::TeleportIn.has_gravity());
        assert!(!PlayerState::Appear.has_gravity());
        assert!(!PlayerState::Climb.has_gravity());
        assert!(!PlayerState::ClimbTop.has_gravity());
    }

    #[test]
    fn test_run_control_states() {
        assert!(PlayerState::Idle.has_run_control());
        assert!(PlayerState::Step.has_run_control());
        assert!(PlayerState::Run.has_run_control());
        assert!(PlayerState::Jump.has_run_control());
        assert!(!PlayerState::Slide.has_run_control());
        assert!(!PlayerState::Hurt.has_run_control());
        assert!(!PlayerState::Climb.has_run_control());
    }

    #[test]
    fn test_fire_disallowed_while_sliding_or_hurt() {
        assert!(PlayerState::Climb.can_fire());
        assert!(!PlayerState::Slide.can_fire());
        assert!(!PlayerState::Hurt.can_fire());
        assert!(!PlayerState::Appear.can_fire());
    }

    #[test]
    fn test_clip_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for state in PlayerState::ALL {
            assert!(seen.insert(state.clip_name()), "duplicate clip for {:?}", state);
        }
    }
}
