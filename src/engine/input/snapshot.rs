// Per-tick input snapshots and the sources that produce them

use std::collections::VecDeque;

use crate::core::math::clamp_axis;

/// Input consumed by a character controller for one simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Horizontal axis (-1 = left, 1 = right)
    pub horizontal: f32,
    /// Vertical axis (-1 = down, 1 = up)
    pub vertical: f32,
    /// Jump was pressed this tick (edge, not held)
    pub jump_pressed: bool,
}

impl InputSnapshot {
    /// Create a snapshot, clamping both axes to [-1, 1]
    pub fn new(horizontal: f32, vertical: f32, jump_pressed: bool) -> Self {
        Self {
            horizontal: clamp_axis(horizontal),
            vertical: clamp_axis(vertical),
            jump_pressed,
        }
    }

    /// No input at all
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Anything that can be polled once per tick for an input snapshot
pub trait InputSource {
    /// Produce the snapshot for the coming tick
    fn poll(&mut self) -> InputSnapshot;
}

/// Replays a fixed sequence of inputs, each held for a number of ticks.
///
/// Used by the headless demo and by tests. Once the script runs out every
/// poll returns [`InputSnapshot::idle`].
#[derive(Debug, Default)]
pub struct ScriptedInput {
    segments: VecDeque<(u32, InputSnapshot)>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self {
            segments: VecDeque::new(),
        }
    }

    /// Hold `snapshot` for `ticks` polls. A jump in the snapshot only fires on
    /// the first tick of the segment.
    pub fn then(mut self, ticks: u32, snapshot: InputSnapshot) -> Self {
        if ticks > 0 {
            self.segments.push_back((ticks, snapshot));
        }
        self
    }

    /// Check if the script has been fully consumed
    pub fn is_finished(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total number of ticks left in the script
    pub fn remaining_ticks(&self) -> u32 {
        self.segments.iter().map(|(ticks, _)| ticks).sum()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputSnapshot {
        let Some((ticks, snapshot)) = self.segments.front_mut() else {
            return InputSnapshot::idle();
        };

        let polled = *snapshot;
        // Jump is an edge: only the first tick of a segment presses it
        snapshot.jump_pressed = false;

        *ticks -= 1;
        if *ticks == 0 {
            self.segments.pop_front();
        }

        polled
    }
}
