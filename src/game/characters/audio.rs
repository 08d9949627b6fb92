// Character sound cues

use crate::engine::audio::CueChannel;

/// One-shot cues a character controller may trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Move,
    Jump,
    Climb,
    Hurt,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Move, Cue::Jump, Cue::Climb, Cue::Hurt];

    /// Identifier the cue player knows this cue by
    pub fn id(&self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Jump => "jump",
            Self::Climb => "climb",
            Self::Hurt => "hurt",
        }
    }

    /// How long the cue keeps the channel busy, in seconds
    pub fn duration(&self) -> f32 {
        match self {
            Self::Move => 0.25,
            Self::Jump => 0.4,
            Self::Climb => 0.3,
            Self::Hurt => 0.6,
        }
    }
}

/// A cue channel with every [`Cue`] registered
pub fn standard_cue_channel() -> CueChannel {
    Cue::ALL
        .iter()
        .fold(CueChannel::new(), |channel, cue| {
            channel.with_clip(cue.id(), cue.duration())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::CuePlayer;

    #[test]
    fn test_standard_channel_knows_every_cue() {
        let channel = standard_cue_channel();
        for cue in Cue::ALL {
            assert!(channel.has_clip(cue.id()), "missing {:?}", cue);
        }
    }

    #[test]
    fn test_standard_channel_plays_one_cue_at_a_time() {
        let mut channel = standard_cue_channel();
        assert!(channel.try_play(Cue::Jump.id()));
        assert!(!channel.try_play(Cue::Hurt.id()));

        channel.advance(Cue::Jump.duration());
        assert!(channel.try_play(Cue::Hurt.id()));
    }
}
