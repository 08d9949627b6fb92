// Input handling system
//
// Turns device state into one `InputSnapshot` per simulation tick.
//
// ## Architecture
//
// - `action`: Defines the actions a character reacts to
// - `player`: Per-player pressed/just-pressed tracking
// - `snapshot`: The per-tick snapshot, the `InputSource` trait and a scripted source
//
// ## Usage Example
//
// ```rust
// use platformer_controller::engine::input::{Action, InputSource, PlayerInput};
//
// let mut input = PlayerInput::new(0);
//
// // In your event loop, forward device events
// input.press(Action::Jump);
//
// // Once per tick, before the controller runs
// let snapshot = input.poll();
// assert!(snapshot.jump_pressed);
// ```

pub mod action;
pub mod player;
pub mod snapshot;

// Re-export commonly used types
pub use action::Action;
pub use player::PlayerInput;
pub use snapshot::{InputSnapshot, InputSource, ScriptedInput};
