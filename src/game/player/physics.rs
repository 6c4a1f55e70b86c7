// Velocity integration gated by the player state
//
// The helpers are pure so they can be checked against arbitrary tunings;
// `integrate` applies them to the actor in the order the tick needs.

use super::actor::ActorState;
use super::input::InputSnapshot;
use super::state::PlayerState;
use super::stats::MovementStats;

/// Vertical velocity after one tick of gravity
pub fn apply_gravity(velocity_y: f32, stats: &MovementStats, gravity_scale: f32) -> f32 {
    velocity_y + (stats.gravity * stats.fixed_delta) / gravity_scale
}

/// Horizontal speed from held input
pub fn run_speed(held_x: i8, stats: &MovementStats, speed_scale: f32, suppressed: bool) -> f32 {
    if suppressed {
        0.0
    } else {
        (f32::from(held_x) * stats.run_speed) / speed_scale
    }
}

/// Horizontal slide speed; double the run speed in the facing direction
pub fn slide_speed(facing_sign: f32, stats: &MovementStats, speed_scale: f32) -> f32 {
    (facing_sign * stats.run_speed * 2.0) / speed_scale
}

/// Vertical ladder speed from held input
pub fn climb_speed(held_y: i8, stats: &MovementStats, suppressed: bool) -> f32 {
    if suppressed {
        0.0
    } else {
        f32::from(held_y) * stats.run_speed * 0.75
    }
}

/// Flinch push-back, away from where the player faces
pub fn knockback_speed(facing_sign: f32, under_obstacle: bool, stats: &MovementStats) -> f32 {
    if under_obstacle {
        0.0
    } else {
        -facing_sign * stats.knockback_speed
    }
}

/// Update `x_speed` and the vertical velocity for the state the tick ended in
pub fn integrate(actor: &mut ActorState, input: &InputSnapshot, stats: &MovementStats) {
    let state = actor.state();

    if state.has_run_control() {
        actor.x_speed = run_speed(
            input.held_x(),
            stats,
            actor.horizontal_speed_scale,
            actor.movement_suppressed,
        );
    }

    match state {
        PlayerState::Climb | PlayerState::ClimbTop => {
            actor.velocity.y = climb_speed(input.held_y(), stats, actor.movement_suppressed);
        }
        PlayerState::Slide => {
            actor.x_speed = slide_speed(actor.facing_sign(), stats, actor.horizontal_speed_scale);
        }
        PlayerState::Hurt => {
            actor.x_speed = knockback_speed(
                actor.facing_sign(),
                actor.history().hurt_under_obstacle,
                stats,
            );
        }
        _ => {}
    }

    if state.has_gravity() {
        actor.velocity.y = apply_gravity(actor.velocity.y, stats, actor.gravity_scale);
    }
}
