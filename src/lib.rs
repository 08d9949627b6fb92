//! Per-tick character controller for a 2D platformer.
//!
//! The `game::characters` module holds the locomotion state machine
//! (grounded / airborne / climbing / hurt) and the `Character` glue that binds
//! it to a rapier2d body. The `engine` module provides the host-side pieces the
//! controller talks to: physics world, input tracking, a single-channel cue
//! player and the fixed-timestep loop.

pub mod core;
pub mod engine;
pub mod game;
