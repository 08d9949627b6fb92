use std::collections::HashMap;

use super::CuePlayer;

/// A named one-shot sound
#[derive(Debug, Clone, PartialEq)]
pub struct CueClip {
    /// Name the clip is requested by
    pub name: String,
    /// How long the clip keeps the channel busy, in seconds
    pub duration: f32,
}

impl CueClip {
    pub fn new(name: &str, duration: f32) -> Self {
        Self {
            name: name.to_string(),
            duration: duration.max(0.0),
        }
    }
}

/// Single playback channel with at-most-one-concurrent-cue semantics
#[derive(Debug, Default)]
pub struct CueChannel {
    /// Known clips by name
    clips: HashMap<String, CueClip>,
    /// Name of the clip currently sounding
    current: Option<String>,
    /// Seconds until the current clip ends
    remaining: f32,
}

impl CueChannel {
    pub fn new() -> Self {
        Self {
            clips: HashMap::new(),
            current: None,
            remaining: 0.0,
        }
    }

    /// Register a clip
    pub fn add_clip(&mut self, clip: CueClip) {
        self.clips.insert(clip.name.clone(), clip);
    }

    /// Builder-style clip registration
    pub fn with_clip(mut self, name: &str, duration: f32) -> Self {
        self.add_clip(CueClip::new(name, duration));
        self
    }

    /// Check if a clip is registered
    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Check if a cue is currently sounding
    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    /// Name of the cue currently sounding
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Advance playback (called every tick)
    pub fn advance(&mut self, dt: f32) {
        if self.current.is_none() {
            return;
        }

        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.current = None;
        }
    }
}

impl CuePlayer for CueChannel {
    fn try_play(&mut self, cue: &str) -> bool {
        if self.is_playing() {
            return false;
        }

        let Some(clip) = self.clips.get(cue) else {
            return false;
        };

        // Zero-length clips never occupy the channel
        if clip.duration > 0.0 {
            self.current = Some(clip.name.clone());
            self.remaining = clip.duration;
        }
        true
    }
}
