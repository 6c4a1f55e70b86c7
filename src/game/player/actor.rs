// Mutable state of the controlled player

use glam::Vec2;

use super::environment::{EnvironmentProbe, TileKind};
use super::presentation::CollisionShape;
use super::state::{PlayerState, TextureVariant};
use super::stats::MovementStats;

/// What the player was doing before the latest changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct History {
    /// Last state entered through a state change
    pub previous_state: PlayerState,
    /// Whether the last hurt was taken while sliding under a low ceiling
    pub hurt_under_obstacle: bool,
    /// Last texture applied to the sprite
    pub previous_texture: TextureVariant,
}

/// Saturating tick counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timers {
    /// Limits slide length and blocks chaining slides
    pub slide_cooldown: u32,
    /// Ticks left on the shooting pose
    pub fire_pose: u32,
    /// Flinch and invincibility countdown
    pub hurt: u32,
    /// Blink phase bit (0 or 1)
    pub blink_phase: u32,
}

/// The single controlled character
#[derive(Debug, Clone, PartialEq)]
pub struct ActorState {
    state: PlayerState,
    history: History,
    /// State whose clip is on screen
    presented_state: PlayerState,

    pub position: Vec2,
    pub velocity: Vec2,
    /// Horizontal speed copied into the velocity before each move
    pub x_speed: f32,

    /// Facing left as drawn on the ground / when not mid-shot on a ladder
    pub facing_sprite: bool,
    /// Facing left as last requested by input
    pub facing_actual: bool,
    /// Facing left as last rendered
    pub rendered_facing: bool,

    pub timers: Timers,

    /// Divisor on run and slide speed
    pub horizontal_speed_scale: f32,
    /// Divisor on gravity
    pub gravity_scale: f32,
    pub max_air_jumps: u8,
    pub remaining_air_jumps: u8,

    /// Keeps the player out of the fall state until it touches ground
    pub force_idle: bool,
    /// Zeroes run (or climb) speed
    pub movement_suppressed: bool,
    /// No low ceiling above a sliding player
    pub low_ceiling_clear: bool,
    /// Direction the current slide started in
    pub slide_direction: i8,

    pub sprite_offset_y: f32,
    pub visible: bool,
    pub active_shape: CollisionShape,
    /// Side the slide shape and wall probe are mirrored to
    pub shape_facing_left: bool,
    /// Climb clip frozen while the player hangs still
    pub animation_paused: bool,

    // Environment snapshot, written every tick
    pub is_grounded: bool,
    pub is_wall_touching: bool,
    pub obstacle_overlap: bool,
    pub overlap_tile: TileKind,
    pub previous_overlap_tile: TileKind,
    pub below_tile: TileKind,
    pub overlap_tile_position: Vec2,
    pub ladder_snap_x: f32,
}

impl ActorState {
    /// Create a player beginning its teleport drop at `position`
    pub fn spawned_at(position: Vec2, stats: &MovementStats) -> Self {
        Self {
            state: PlayerState::TeleportIn,
            history: History::default(),
            presented_state: PlayerState::TeleportIn,
            position,
            velocity: Vec2::ZERO,
            x_speed: 0.0,
            facing_sprite: false,
            facing_actual: false,
            rendered_facing: false,
            timers: Timers::default(),
            horizontal_speed_scale: 1.0,
            gravity_scale: 1.0,
            max_air_jumps: stats.max_air_jumps,
            remaining_air_jumps: stats.max_air_jumps,
            force_idle: false,
            movement_suppressed: false,
            low_ceiling_clear: true,
            slide_direction: 0,
            sprite_offset_y: stats.teleport_start_offset,
            visible: true,
            active_shape: CollisionShape::Standing,
            shape_facing_left: false,
            animation_paused: false,
            is_grounded: false,
            is_wall_touching: false,
            obstacle_overlap: false,
            overlap_tile: TileKind::None,
            previous_overlap_tile: TileKind::None,
            below_tile: TileKind::None,
            overlap_tile_position: Vec2::ZERO,
            ladder_snap_x: position.x,
        }
    }

    /// Create a player already standing in the level, skipping the teleport
    pub fn standing(position: Vec2, stats: &MovementStats) -> Self {
        let mut actor = Self::spawned_at(position, stats);
        actor.state = PlayerState::Idle;
        actor.presented_state = PlayerState::Idle;
        actor.history.previous_state = PlayerState::Idle;
        actor.sprite_offset_y = 0.0;
        actor.is_grounded = true;
        actor
    }

    /// Get the current state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// State whose animation is currently showing
    pub fn presented_state(&self) -> PlayerState {
        self.presented_state
    }

    /// Rendered facing as a sign: -1 left, 1 right
    pub fn facing_sign(&self) -> f32 {
        if self.rendered_facing {
            -1.0
        } else {
            1.0
        }
    }

    /// Check if the post-hurt blink is running
    pub fn is_invincible(&self) -> bool {
        self.timers.hurt > 0
    }

    /// Copy this tick's world queries into the actor
    pub fn record_environment(&mut self, env: &EnvironmentProbe) {
        self.is_grounded = env.is_grounded;
        self.is_wall_touching = env.is_wall_touching;
        self.obstacle_overlap = env.obstacle_overlap;
        self.overlap_tile = env.overlap_tile_kind;
        self.below_tile = env.below_tile_kind;
        self.overlap_tile_position = env.overlap_world_position;
        self.ladder_snap_x = env.ladder_snap_x;
    }

    /// Switch state; the only writer of `state` and `history.previous_state`
    ///
    /// While the flinch clip is still protected the logical state changes but
    /// the presented clip stays on `Hurt`.
    pub(super) fn change_state(&mut self, to: PlayerState, stats: &MovementStats) {
        let flinching = self.timers.hurt > stats.hurt_release;
        if !flinching || to == PlayerState::Hurt {
            self.presented_state = to;
        }
        if matches!(
            to,
            PlayerState::Jump | PlayerState::Climb | PlayerState::ClimbTop
        ) {
            self.movement_suppressed = false;
        }
        if self.state == PlayerState::Slide && to != PlayerState::Hurt {
            self.low_ceiling_clear = true;
        }
        self.state = to;
        self.history.previous_state = to;
    }

    pub(super) fn set_hurt_under_obstacle(&mut self, under_obstacle: bool) {
        self.history.hurt_under_obstacle = under_obstacle;
    }

    pub(super) fn apply_texture(&mut self, texture: TextureVariant) {
        self.history.previous_texture = texture;
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: PlayerState) {
        self.state = state;
        self.presented_state = state;
        self.history.previous_state = state;
        self.sprite_offset_y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_state() {
        let stats = MovementStats::default();
        let actor = ActorState::spawned_at(Vec2::new(64.0, 100.0), &stats);
        assert_eq!(actor.state(), PlayerState::TeleportIn);
        assert_eq!(actor.sprite_offset_y, -240.0);
        assert_eq!(actor.remaining_air_jumps, 1);
        assert!(actor.visible);
        assert!(actor.low_ceiling_clear);
    }

    #[test]
    fn test_standing_skips_teleport() {
        let stats = MovementStats::default();
        let actor = ActorState::standing(Vec2::ZERO, &stats);
        assert_eq!(actor.state(), PlayerState::Idle);
        assert_eq!(actor.presented_state(), PlayerState::Idle);
        assert_eq!(actor.sprite_offset_y, 0.0);
    }

    #[test]
    fn test_change_state_records_history() {
        let stats = MovementStats::default();
        let mut actor = ActorState::standing(Vec2::ZERO, &stats);
        actor.change_state(PlayerState::Run, &stats);
        assert_eq!(actor.state(), PlayerState::Run);
        assert_eq!(actor.history().previous_state, PlayerState::Run);
        assert_eq!(actor.presented_state(), PlayerState::Run);
    }

    #[test]
    fn test_flinch_keeps_hurt_clip() {
        let stats = MovementStats::default();
        let mut actor = ActorState::standing(Vec2::ZERO, &stats);
        actor.timers.hurt = 96;
        actor.change_state(PlayerState::Hurt, &stats);
        actor.change_state(PlayerState::Idle, &stats);
        assert_eq!(actor.state(), PlayerState::Idle);
        assert_eq!(actor.presented_state(), PlayerState::Hurt);

        actor.timers.hurt = 72;
        actor.change_state(PlayerState::Idle, &stats);
        assert_eq!(actor.presented_state(), PlayerState::Idle);
    }

    #[test]
    fn test_entering_jump_clears_suppression() {
        let stats = MovementStats::default();
        let mut actor = ActorState::standing(Vec2::ZERO, &stats);
        actor.movement_suppressed = true;
        actor.change_state(PlayerState::Jump, &stats);
        assert!(!actor.movement_suppressed);
    }

    #[test]
    fn test_facing_sign() {
        let stats = MovementStats::default();
        let mut actor = ActorState::standing(Vec2::ZERO, &stats);
        assert_eq!(actor.facing_sign(), 1.0);
        actor.rendered_facing = true;
        assert_eq!(actor.facing_sign(), -1.0);
    }
}
