// Character system
//
// This module contains everything related to playable characters:
// - Controller configuration
// - Locomotion state machine (grounded / airborne / climbing / hurt)
// - The per-tick controller that turns input into velocity, poses and cues
// - Pose and cue identities plus the players that consume them
// - Character glue binding a controller to a physics body

pub mod animation;
pub mod audio;
pub mod character;
pub mod config;
pub mod controller;
pub mod state;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationPlayer, Pose, PosePlayer};
pub use audio::{standard_cue_channel, Cue};
pub use character::{Character, CharacterId, CharacterManager};
pub use config::{ConfigError, ControllerConfig, GROUND_TAG, HURT_DURATION};
pub use controller::{Actuators, LocomotionController};
pub use state::{ContactFlags, HurtTimer, MotionState, MotionStateMachine};
