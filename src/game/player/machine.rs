// Player state machine
//
// One call to `advance` per physics tick. The transitions live in an ordered
// table; for the state the player is in, the first row whose guard holds is
// taken and no other row is looked at until the next tick.

use log::{debug, trace};

use super::actor::ActorState;
use super::environment::{EnvironmentProbe, TileKind};
use super::input::InputSnapshot;
use super::presentation;
use super::state::{PlayerState, TextureVariant};
use super::stats::MovementStats;
use super::ConfigError;

use PlayerState::*;

/// Condition gating a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Guard {
    /// Damage taken with no hurt timer running
    Damaged,
    /// Teleport sprite has dropped onto the hitbox
    SpriteSettled,
    /// Jump tapped on the ground, not holding down, nothing overhead
    GroundJump,
    /// Jump tapped in the air with an air jump left
    AirJump,
    /// Not grounded and not pinned to idle
    WalkedOffLedge,
    HorizontalHeld,
    HorizontalReleased,
    Landed,
    /// Down + jump with the slide cooled down and no wall in the probe
    SlideStart,
    /// Slid into a wall with room to stand
    SlideBlocked,
    /// Slide timer ran out with room to stand
    SlideSpent,
    /// Up on a ladder shaft, or up tapped on a ladder top
    LadderGrab,
    /// Down while standing on a ladder top
    LadderTopGrab,
    /// Climbed off the bottom of the ladder
    LeftLadder,
    /// Reached the floor while climbing down
    ClimbedDown,
    LadderJump,
    NearLadderTop,
    BelowLadderTop,
    /// Climbed past the ladder top holding up
    Dismount,
    /// Flinch is over
    HurtRecovered,
}

/// Destination of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    To(PlayerState),
    /// Run if horizontal input is held, else Idle
    IdleOrRun,
    /// Slide if the hurt was taken under a low ceiling, else Idle
    SlideOrIdle,
}

/// Side effect applied when a transition is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Capture the under-ceiling flag, stop vertically, start the hurt timer
    Flinch,
    Launch,
    AirLaunch,
    ClearCeiling,
    ResetAirJumps,
    StartSlide,
    GrabLadder,
    GrabLadderTop,
    DropFromLadder,
    Dismount,
}

/// One row of the transition table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub from: &'static [PlayerState],
    pub guard: Guard,
    pub to: Target,
    pub effect: Effect,
}

const GROUND: &[PlayerState] = &[Idle, Step, Run];
const FREE: &[PlayerState] = &[Idle, Step, Run, Jump, Slide];
const FOOTED: &[PlayerState] = &[Idle, Step, Run, Slide];

/// Checked before any per-state bookkeeping
pub const HURT_ADMISSION: Rule = Rule {
    from: &[Idle, Step, Run, Jump, Slide, Climb, ClimbTop, Hurt],
    guard: Guard::Damaged,
    to: Target::To(Hurt),
    effect: Effect::Flinch,
};

/// Per-state transitions in priority order
pub const TRANSITIONS: &[Rule] = &[
    Rule { from: &[TeleportIn], guard: Guard::SpriteSettled, to: Target::To(Appear), effect: Effect::None },
    Rule { from: GROUND, guard: Guard::GroundJump, to: Target::To(Jump), effect: Effect::Launch },
    Rule { from: FREE, guard: Guard::AirJump, to: Target::To(Jump), effect: Effect::AirLaunch },
    Rule { from: FOOTED, guard: Guard::WalkedOffLedge, to: Target::To(Jump), effect: Effect::ClearCeiling },
    Rule { from: &[Idle], guard: Guard::HorizontalHeld, to: Target::To(Step), effect: Effect::None },
    Rule { from: &[Run], guard: Guard::HorizontalReleased, to: Target::To(Step), effect: Effect::None },
    Rule { from: &[Jump], guard: Guard::Landed, to: Target::IdleOrRun, effect: Effect::ResetAirJumps },
    Rule { from: FOOTED, guard: Guard::SlideStart, to: Target::To(Slide), effect: Effect::StartSlide },
    Rule { from: &[Slide], guard: Guard::SlideBlocked, to: Target::To(Idle), effect: Effect::None },
    Rule { from: &[Slide], guard: Guard::SlideSpent, to: Target::To(Idle), effect: Effect::None },
    Rule { from: FREE, guard: Guard::LadderGrab, to: Target::To(Climb), effect: Effect::GrabLadder },
    Rule { from: FREE, guard: Guard::LadderTopGrab, to: Target::To(ClimbTop), effect: Effect::GrabLadderTop },
    Rule { from: &[Climb], guard: Guard::LeftLadder, to: Target::To(Jump), effect: Effect::DropFromLadder },
    Rule { from: &[Climb], guard: Guard::ClimbedDown, to: Target::To(Idle), effect: Effect::None },
    Rule { from: &[Climb, ClimbTop], guard: Guard::LadderJump, to: Target::To(Jump), effect: Effect::None },
    Rule { from: &[Climb], guard: Guard::NearLadderTop, to: Target::To(ClimbTop), effect: Effect::None },
    Rule { from: &[ClimbTop], guard: Guard::BelowLadderTop, to: Target::To(Climb), effect: Effect::None },
    Rule { from: &[ClimbTop], guard: Guard::Dismount, to: Target::To(Idle), effect: Effect::Dismount },
    Rule { from: &[Hurt], guard: Guard::HurtRecovered, to: Target::SlideOrIdle, effect: Effect::None },
];

/// Rows that apply to `state`, in the order they are tried
pub fn rules_for(state: PlayerState) -> impl Iterator<Item = &'static Rule> {
    TRANSITIONS
        .iter()
        .filter(move |rule| rule.from.contains(&state))
}

/// Cue raised by the animation collaborator when a clip finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCue {
    TeleportInComplete,
    StepComplete,
    Other,
}

impl AnimationCue {
    pub fn parse(token: &str) -> Self {
        match token {
            "teleport-in-complete" => Self::TeleportInComplete,
            "step-complete" => Self::StepComplete,
            _ => Self::Other,
        }
    }
}

/// A state change performed during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub from: PlayerState,
    pub to: PlayerState,
}

/// Drives an `ActorState` through the movement states
#[derive(Debug, Clone)]
pub struct PlayerStateMachine {
    stats: MovementStats,
}

impl Default for PlayerStateMachine {
    fn default() -> Self {
        Self {
            stats: MovementStats::default(),
        }
    }
}

impl PlayerStateMachine {
    pub fn new(stats: MovementStats) -> Result<Self, ConfigError> {
        stats.validate()?;
        Ok(Self { stats })
    }

    pub fn stats(&self) -> &MovementStats {
        &self.stats
    }

    /// Run one tick of the state machine
    ///
    /// Returns the state change taken this tick, if any. Velocity integration
    /// and collision are left to the caller.
    pub fn advance(
        &self,
        actor: &mut ActorState,
        input: &InputSnapshot,
        env: &EnvironmentProbe,
    ) -> Option<StateChange> {
        actor.record_environment(env);
        self.update_facing(actor, input);
        self.update_gravity_scale(actor);

        if actor.state() != Slide {
            actor.timers.slide_cooldown = actor.timers.slide_cooldown.saturating_sub(1);
        }

        let mut change = None;
        if actor.state().can_be_hurt() && self.holds(HURT_ADMISSION.guard, actor, input)
        {
            change = Some(self.take(&HURT_ADMISSION, actor, input));
        }

        self.bookkeeping(actor, input);

        if change.is_none() {
            let rule = rules_for(actor.state()).find(|rule| self.holds(rule.guard, actor, input));
            if let Some(rule) = rule {
                change = Some(self.take(rule, actor, input));
            }
        }

        // Drop after the settle check
        if change.is_none() && actor.state() == TeleportIn && actor.sprite_offset_y < 0.0 {
            actor.sprite_offset_y =
                (actor.sprite_offset_y + self.stats.teleport_drop_speed).min(0.0);
        }

        if actor.state() != Climb {
            actor.animation_paused = false;
        }

        self.update_blink(actor);
        self.update_weapon(actor, input);
        actor.rendered_facing = presentation::rendered_facing(
            actor.state(),
            actor.timers.fire_pose,
            actor.facing_sprite,
            actor.facing_actual,
        );

        trace!(
            "tick: state={:?} vel={:?} hurt={} slide={} fire={}",
            actor.state(),
            actor.velocity,
            actor.timers.hurt,
            actor.timers.slide_cooldown,
            actor.timers.fire_pose
        );

        change
    }

    /// React to a finished animation clip
    pub fn on_animation_cue(
        &self,
        actor: &mut ActorState,
        cue: AnimationCue,
        input: &InputSnapshot,
    ) -> Option<StateChange> {
        let from = actor.state();
        let to = match (cue, from) {
            (AnimationCue::TeleportInComplete, Appear) => Idle,
            (AnimationCue::StepComplete, Step) => {
                actor.movement_suppressed = false;
                if input.held_x() != 0 {
                    Run
                } else {
                    Idle
                }
            }
            _ => return None,
        };
        actor.change_state(to, &self.stats);
        debug!("{:?} -> {:?} on {:?}", from, to, cue);
        Some(StateChange { from, to })
    }

    /// Leave the level; ignored while already teleporting
    pub fn begin_teleport_out(&self, actor: &mut ActorState) -> Option<StateChange> {
        let from = actor.state();
        if from.is_teleporting() {
            return None;
        }
        actor.x_speed = 0.0;
        actor.velocity = glam::Vec2::ZERO;
        actor.change_state(TeleportOut, &self.stats);
        debug!("{:?} -> {:?}", from, TeleportOut);
        Some(StateChange {
            from,
            to: TeleportOut,
        })
    }

    fn update_facing(&self, actor: &mut ActorState, input: &InputSnapshot) {
        let facing_left = match input.held_x() {
            -1 => true,
            1 => false,
            _ => return,
        };

        let state = actor.state();
        if state.is_free_moving() {
            actor.facing_actual = facing_left;
            actor.facing_sprite = facing_left;
            actor.shape_facing_left = facing_left;
        } else if state.is_climbing() {
            actor.facing_actual = facing_left;
        }
    }

    fn update_gravity_scale(&self, actor: &mut ActorState) {
        if actor.previous_overlap_tile != actor.overlap_tile {
            actor.gravity_scale = if actor.overlap_tile == TileKind::Liquid {
                self.stats.liquid_gravity_scale
            } else {
                1.0
            };
            actor.previous_overlap_tile = actor.overlap_tile;
        }
    }

    /// Per-state work that happens every tick regardless of transitions
    fn bookkeeping(&self, actor: &mut ActorState, input: &InputSnapshot) {
        let state = actor.state();

        if FOOTED.contains(&state) && actor.is_grounded && actor.force_idle {
            actor.force_idle = false;
        }

        match state {
            Step => actor.movement_suppressed = true,
            Jump => {
                if actor.velocity.y < 0.0 && !input.jump_held {
                    actor.velocity.y = 0.0;
                }
            }
            Climb | ClimbTop => {
                actor.movement_suppressed = actor.timers.fire_pose > 0;
                if state == Climb {
                    actor.animation_paused = input.held_y() == 0;
                }
            }
            Slide => {
                actor.low_ceiling_clear = !actor.obstacle_overlap;
                if actor.timers.slide_cooldown > self.stats.slide_end {
                    actor.timers.slide_cooldown -= 1;
                }
                let held_x = input.held_x();
                if held_x != 0 && held_x != actor.slide_direction && actor.low_ceiling_clear {
                    actor.timers.slide_cooldown = self.stats.slide_end;
                }
            }
            Hurt => actor.timers.hurt = actor.timers.hurt.saturating_sub(1),
            _ => {}
        }
    }

    fn holds(&self, guard: Guard, actor: &ActorState, input: &InputSnapshot) -> bool {
        let stats = &self.stats;
        match guard {
            Guard::Damaged => input.damage_tapped && actor.timers.hurt == 0,
            Guard::SpriteSettled => actor.sprite_offset_y >= 0.0,
            Guard::GroundJump => {
                input.jump_tapped
                    && actor.is_grounded
                    && input.held_y() != 1
                    && actor.low_ceiling_clear
            }
            Guard::AirJump => {
                input.jump_tapped && !actor.is_grounded && actor.remaining_air_jumps > 0
            }
            Guard::WalkedOffLedge => !actor.is_grounded && !actor.force_idle,
            Guard::HorizontalHeld => input.held_x() != 0,
            Guard::HorizontalReleased => input.held_x() == 0,
            Guard::Landed => actor.is_grounded,
            Guard::SlideStart => {
                input.held_y() == 1
                    && input.jump_tapped
                    && actor.timers.slide_cooldown == 0
                    && !actor.obstacle_overlap
            }
            Guard::SlideBlocked => actor.is_wall_touching && actor.low_ceiling_clear,
            Guard::SlideSpent => {
                actor.timers.slide_cooldown <= stats.slide_end && actor.low_ceiling_clear
            }
            Guard::LadderGrab => {
                (input.held_y() == -1 && actor.overlap_tile == TileKind::LadderBody)
                    || (input.tap_y() == -1 && actor.overlap_tile == TileKind::LadderTop)
            }
            Guard::LadderTopGrab => {
                input.held_y() == 1 && actor.below_tile == TileKind::LadderTop
            }
            Guard::LeftLadder => !actor.overlap_tile.is_ladder(),
            Guard::ClimbedDown => actor.is_grounded && input.held_y() == 1,
            Guard::LadderJump => input.jump_tapped,
            Guard::NearLadderTop => {
                actor.overlap_tile == TileKind::LadderTop
                    && actor.position.y < actor.overlap_tile_position.y + stats.ladder_top_offset
            }
            Guard::BelowLadderTop => {
                actor.overlap_tile == TileKind::LadderTop
                    && actor.position.y > actor.overlap_tile_position.y + stats.ladder_top_offset
            }
            Guard::Dismount => !actor.overlap_tile.is_ladder() && input.held_y() == -1,
            Guard::HurtRecovered => actor.timers.hurt <= stats.hurt_release,
        }
    }

    fn take(&self, rule: &Rule, actor: &mut ActorState, input: &InputSnapshot) -> StateChange {
        let stats = &self.stats;
        let from = actor.state();
        let to = match rule.to {
            Target::To(state) => state,
            Target::IdleOrRun => {
                if input.held_x() != 0 {
                    Run
                } else {
                    Idle
                }
            }
            Target::SlideOrIdle => {
                if actor.history().hurt_under_obstacle {
                    Slide
                } else {
                    Idle
                }
            }
        };

        match rule.effect {
            Effect::None => {}
            Effect::Flinch => {
                actor.set_hurt_under_obstacle(!actor.low_ceiling_clear);
            }
            Effect::Launch => actor.velocity.y = stats.jump_speed,
            Effect::AirLaunch => {
                actor.velocity.y = stats.jump_speed;
                actor.remaining_air_jumps = actor.remaining_air_jumps.saturating_sub(1);
            }
            Effect::ClearCeiling => actor.low_ceiling_clear = true,
            Effect::ResetAirJumps => actor.remaining_air_jumps = actor.max_air_jumps,
            Effect::StartSlide => {
                actor.slide_direction = if actor.facing_sprite { -1 } else { 1 };
                actor.timers.slide_cooldown = stats.slide_duration;
            }
            Effect::GrabLadder => {
                actor.position.x = actor.ladder_snap_x;
                actor.x_speed = 0.0;
                actor.velocity = glam::Vec2::ZERO;
            }
            Effect::GrabLadderTop => {
                actor.position.x = actor.ladder_snap_x;
                actor.position.y += stats.ladder_top_drop;
                actor.x_speed = 0.0;
                actor.velocity = glam::Vec2::ZERO;
            }
            Effect::DropFromLadder => actor.velocity.y = 0.0,
            Effect::Dismount => {
                actor.position.y = actor.overlap_tile_position.y + stats.ladder_top_offset;
                actor.velocity.y = 0.0;
                actor.force_idle = true;
            }
        }

        actor.change_state(to, stats);

        if rule.effect == Effect::Flinch {
            actor.velocity.y = 0.0;
            actor.timers.hurt = stats.hurt_duration;
        }

        debug!("{:?} -> {:?} ({:?})", from, to, rule.guard);
        StateChange { from, to }
    }

    fn update_blink(&self, actor: &mut ActorState) {
        if actor.timers.hurt > 0 && actor.state() != Hurt {
            actor.timers.blink_phase = (actor.timers.blink_phase + 1) % 2;
            if actor.timers.blink_phase == 0 {
                actor.visible = !actor.visible;
            }
            actor.timers.hurt -= 1;
        }

        if actor.timers.hurt == 0 && !actor.visible {
            actor.visible = true;
        }
    }

    fn update_weapon(&self, actor: &mut ActorState, input: &InputSnapshot) {
        if input.fire_tapped && actor.state().can_fire() {
            actor.timers.fire_pose = self.stats.fire_pose_duration;
        }

        if actor.timers.fire_pose > 0 {
            if actor.history().previous_texture != TextureVariant::Shoot {
                actor.apply_texture(TextureVariant::Shoot);
            }
            actor.timers.fire_pose -= 1;
            if actor.timers.fire_pose == 0 && actor.state().is_climbing() {
                actor.facing_sprite = actor.facing_actual;
            }
        }

        if actor.timers.fire_pose == 0 && actor.history().previous_texture != TextureVariant::Normal
        {
            actor.apply_texture(TextureVariant::Normal);
        }
    }
}
