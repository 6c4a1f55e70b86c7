// Engine modules: fixed-step clock, keyboard input, tile collision

pub mod game_loop;
pub mod input;
pub mod physics;
