// Ladder Runner: platformer avatar controller with a reference tile-world host

pub mod core;
pub mod engine;
pub mod game;

pub use game::player::{
    ActorState, EnvironmentProbe, InputSnapshot, MovementStats, PlayerController, PlayerState,
    PresentationFrame, World,
};
