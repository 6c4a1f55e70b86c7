// Movement tuning for the player
//
// Values are in pixels and ticks, screen coordinates (y grows downward).

use super::ConfigError;

/// Tunable movement constants
#[derive(Debug, Clone, PartialEq)]
pub struct MovementStats {
    // Movement
    /// Horizontal running speed (px/second)
    pub run_speed: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_speed: f32,
    /// Gravity acceleration (px/second²)
    pub gravity: f32,
    /// Length of one physics tick in seconds
    pub fixed_delta: f32,
    /// Jumps available while airborne
    pub max_air_jumps: u8,
    /// Gravity divisor while overlapping a liquid tile
    pub liquid_gravity_scale: f32,
    /// Horizontal speed of the damage knockback
    pub knockback_speed: f32,

    // Timers (ticks)
    /// Slide cooldown set when a slide starts
    pub slide_duration: u32,
    /// Cooldown value at which a slide may end
    pub slide_end: u32,
    /// Hurt timer set when damage is taken
    pub hurt_duration: u32,
    /// Hurt timer value at which control returns
    pub hurt_release: u32,
    /// Ticks the shooting texture stays up
    pub fire_pose_duration: u32,

    // Ladders
    /// Distance below a ladder-top tile's origin separating Climb from ClimbTop
    pub ladder_top_offset: f32,
    /// How far the player drops when grabbing a ladder from above
    pub ladder_top_drop: f32,

    // Teleport
    /// Starting sprite offset for the teleport drop
    pub teleport_start_offset: f32,
    /// Sprite offset change per tick during the teleport drop
    pub teleport_drop_speed: f32,

    // World
    /// Right edge of the playfield
    pub world_width: f32,
}

/// Stock tuning, matching the NES-era feel
pub const BASE_STATS: MovementStats = MovementStats {
    run_speed: 82.5,
    jump_speed: -310.0,
    gravity: 900.0,
    fixed_delta: 1.0 / 60.0,
    max_air_jumps: 1,
    liquid_gravity_scale: 3.0,
    knockback_speed: 50.0,

    slide_duration: 24,
    slide_end: 4,
    hurt_duration: 96,
    hurt_release: 72,
    fire_pose_duration: 25,

    ladder_top_offset: 6.0,
    ladder_top_drop: 8.0,

    teleport_start_offset: -240.0,
    teleport_drop_speed: 8.0,

    world_width: 512.0,
};

impl Default for MovementStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl MovementStats {
    pub fn with_run_speed(mut self, run_speed: f32) -> Self {
        self.run_speed = run_speed;
        self
    }

    pub fn with_jump_speed(mut self, jump_speed: f32) -> Self {
        self.jump_speed = jump_speed;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_fixed_delta(mut self, fixed_delta: f32) -> Self {
        self.fixed_delta = fixed_delta;
        self
    }

    pub fn with_max_air_jumps(mut self, max_air_jumps: u8) -> Self {
        self.max_air_jumps = max_air_jumps;
        self
    }

    pub fn with_world_width(mut self, world_width: f32) -> Self {
        self.world_width = world_width;
        self
    }

    /// Check that the values describe a playable controller
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("run_speed", self.run_speed),
            ("jump_speed", self.jump_speed),
            ("gravity", self.gravity),
            ("knockback_speed", self.knockback_speed),
            ("ladder_top_offset", self.ladder_top_offset),
            ("ladder_top_drop", self.ladder_top_drop),
            ("teleport_start_offset", self.teleport_start_offset),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(name));
            }
        }

        let positive = [
            ("fixed_delta", self.fixed_delta),
            ("liquid_gravity_scale", self.liquid_gravity_scale),
            ("teleport_drop_speed", self.teleport_drop_speed),
            ("world_width", self.world_width),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }

        if self.slide_end >= self.slide_duration {
            return Err(ConfigError::TimerOrder {
                name: "slide",
                start: self.slide_duration,
                end: self.slide_end,
            });
        }
        if self.hurt_release >= self.hurt_duration {
            return Err(ConfigError::TimerOrder {
                name: "hurt",
                start: self.hurt_duration,
                end: self.hurt_release,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats() {
        let stats = MovementStats::default();
        assert_eq!(stats.run_speed, 82.5);
        assert_eq!(stats.jump_speed, -310.0);
        assert_eq!(stats.max_air_jumps, 1);
        assert_eq!(stats.hurt_duration, 96);
        assert_eq!(stats.hurt_release, 72);
    }

    #[test]
    fn test_base_stats_are_valid() {
        assert!(BASE_STATS.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let stats = MovementStats::default()
            .with_run_speed(100.0)
            .with_max_air_jumps(0)
            .with_world_width(256.0);
        assert_eq!(stats.run_speed, 100.0);
        assert_eq!(stats.max_air_jumps, 0);
        assert_eq!(stats.world_width, 256.0);
    }

    #[test]
    fn test_rejects_zero_delta() {
        let stats = MovementStats::default().with_fixed_delta(0.0);
        assert!(matches!(
            stats.validate(),
            Err(ConfigError::NotPositive { name: "fixed_delta", .. })
        ));
    }

    #[test]
    fn test_rejects_nan_gravity() {
        let stats = MovementStats::default().with_gravity(f32::NAN);
        assert!(matches!(stats.validate(), Err(ConfigError::NotFinite("gravity"))));
    }

    #[test]
    fn test_rejects_inverted_hurt_timers() {
        let mut stats = MovementStats::default();
        stats.hurt_release = 100;
        assert!(matches!(
            stats.validate(),
            Err(ConfigError::TimerOrder { name: "hurt", .. })
        ));
    }
}
