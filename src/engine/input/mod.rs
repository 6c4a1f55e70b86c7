// Keyboard input for the player controller
//
// - `action`: the actions the controller reads and the fixed key table
// - `collector`: press/hold tracking that produces one snapshot per tick

pub mod action;
pub mod collector;

// Re-export commonly used types
pub use action::Action;
pub use collector::InputCollector;
