// Player character
//
// This module contains everything that drives the controlled avatar:
// - Movement states and the transition table between them
// - Per-tick input and environment records
// - Velocity integration and presentation mapping
// - The controller tying a tick together and the animation player

pub mod actor;
pub mod animation;
pub mod controller;
pub mod environment;
pub mod input;
pub mod machine;
pub mod physics;
pub mod presentation;
pub mod state;
pub mod stats;

use thiserror::Error;

// Re-export commonly used types
pub use actor::{ActorState, History, Timers};
pub use animation::{apply_frame, AnimationClip, AnimationPlayer, AnimationSink};
pub use controller::{Motion, PlayerController, World};
pub use environment::{EnvironmentProbe, TileKind};
pub use input::InputSnapshot;
pub use machine::{AnimationCue, PlayerStateMachine, StateChange};
pub use presentation::{CollisionShape, PresentationFrame};
pub use state::{PlayerState, TextureVariant};
pub use stats::{MovementStats, BASE_STATS};

/// Invalid movement tuning
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} timer must end before it starts: start {start}, end {end}")]
    TimerOrder {
        name: &'static str,
        start: u32,
        end: u32,
    },
}

/// Failure reported by the animation collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    #[error("Unknown animation clip: {0}")]
    UnknownClip(String),
}
