// Player controller: runs one fixed physics tick end to end

use glam::Vec2;
use log::{debug, info};

use super::actor::ActorState;
use super::environment::EnvironmentProbe;
use super::input::InputSnapshot;
use super::machine::{AnimationCue, PlayerStateMachine, StateChange};
use super::physics;
use super::presentation::{self, CollisionShape, PresentationFrame};
use super::state::PlayerState;
use super::stats::MovementStats;
use super::ConfigError;

/// Result of resolving a move against the level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Collision and tile queries the controller needs from the level
pub trait World {
    /// Sample the surroundings of `actor` before the state machine runs
    fn probe(&mut self, actor: &ActorState) -> EnvironmentProbe;

    /// Move `shape` from `position` by `velocity * dt`, sliding along solids
    fn move_and_slide(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        shape: CollisionShape,
        dt: f32,
    ) -> Motion;
}

/// Owns the player and drives it through the tick pipeline
#[derive(Debug, Clone)]
pub struct PlayerController {
    machine: PlayerStateMachine,
    actor: ActorState,
    last_input: InputSnapshot,
    last_change: Option<StateChange>,
}

impl PlayerController {
    /// Create a player that teleports in at `spawn`
    pub fn new(stats: MovementStats, spawn: Vec2) -> Result<Self, ConfigError> {
        let machine = PlayerStateMachine::new(stats)?;
        let actor = ActorState::spawned_at(spawn, machine.stats());
        info!("Player spawning at ({}, {})", spawn.x, spawn.y);
        Ok(Self {
            machine,
            actor,
            last_input: InputSnapshot::default(),
            last_change: None,
        })
    }

    /// Create a player already standing at `position`
    pub fn standing(stats: MovementStats, position: Vec2) -> Result<Self, ConfigError> {
        let machine = PlayerStateMachine::new(stats)?;
        let actor = ActorState::standing(position, machine.stats());
        Ok(Self {
            machine,
            actor,
            last_input: InputSnapshot::default(),
            last_change: None,
        })
    }

    pub fn actor(&self) -> &ActorState {
        &self.actor
    }

    pub fn state(&self) -> PlayerState {
        self.actor.state()
    }

    pub fn stats(&self) -> &MovementStats {
        self.machine.stats()
    }

    /// State change made by the most recent tick or cue, if any
    pub fn last_change(&self) -> Option<StateChange> {
        self.last_change
    }

    /// Run one physics tick
    pub fn tick<W: World + ?Sized>(
        &mut self,
        input: &InputSnapshot,
        world: &mut W,
    ) -> PresentationFrame {
        let stats = self.machine.stats();

        let env = world.probe(&self.actor);
        self.last_change = self.machine.advance(&mut self.actor, input, &env);
        if let Some(change) = self.last_change {
            debug!("state {:?} -> {:?}", change.from, change.to);
        }

        physics::integrate(&mut self.actor, input, stats);
        presentation::update_shapes(&mut self.actor);

        self.actor.velocity.x = self.actor.x_speed;
        let motion = world.move_and_slide(
            self.actor.position,
            self.actor.velocity,
            self.actor.active_shape,
            stats.fixed_delta,
        );
        self.actor.position = motion.position;
        self.actor.velocity = motion.velocity;
        self.actor.position.x = self.actor.position.x.clamp(0.0, stats.world_width);

        self.last_input = *input;
        presentation::present(&self.actor)
    }

    /// Forward a completion token from the animation player
    ///
    /// Uses the input of the latest tick to pick Run or Idle after a step.
    pub fn on_animation_complete(&mut self, token: &str) -> Option<PresentationFrame> {
        let cue = AnimationCue::parse(token);
        let change = self
            .machine
            .on_animation_cue(&mut self.actor, cue, &self.last_input)?;
        self.last_change = Some(change);
        Some(presentation::present(&self.actor))
    }

    /// Start the level-exit teleport
    pub fn begin_teleport_out(&mut self) -> Option<PresentationFrame> {
        let change = self.machine.begin_teleport_out(&mut self.actor)?;
        self.last_change = Some(change);
        Some(presentation::present(&self.actor))
    }

    /// Presentation for the actor as it stands, without ticking
    pub fn present(&self) -> PresentationFrame {
        presentation::present(&self.actor)
    }
}
