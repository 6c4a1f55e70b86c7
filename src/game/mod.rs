// Game logic: the player character

pub mod player;
