// Engine modules: physics, input, audio cues, fixed-step loop

pub mod audio;
pub mod game_loop;
pub mod input;
pub mod physics;
