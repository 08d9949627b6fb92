// One-shot sound cues
//
// Characters own a single cue channel: at most one cue sounds at a time and
// a cue requested while another is playing is dropped, not queued.

mod channel;

pub use channel::{CueChannel, CueClip};

/// Anything that can be asked to start a named one-shot cue
pub trait CuePlayer {
    /// Try to start `cue`. Returns true if it started, false if the channel
    /// was busy or the cue is unknown.
    fn try_play(&mut self, cue: &str) -> bool;
}
