//! Fixed timestep driver.
//!
//! Frame durations go in, a number of fixed simulation ticks comes out.
//! Character controllers, hurt timers and the physics world all advance by
//! exactly [`FIXED_TIMESTEP`] per tick, independent of the frame rate.

use std::time::Duration;

/// Simulation rate
pub const TICKS_PER_SECOND: u32 = 60;

/// Length of one tick in seconds
pub const FIXED_TIMESTEP: f32 = 1.0 / TICKS_PER_SECOND as f32;
const FIXED_TIMESTEP_DURATION: Duration =
    Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

/// Maximum number of ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Fixed timestep loop state
pub struct GameLoop {
    /// Accumulated time not yet consumed by ticks
    accumulator: Duration,

    /// Whether the simulation is paused
    paused: bool,

    /// Frames seen so far
    frame_count: u64,

    /// Ticks handed out so far
    tick_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            paused: false,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Feed an explicit frame duration; returns the number of fixed ticks to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }

        // Drop whatever the cap left behind instead of carrying a backlog
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::debug!(
                "Frame took {:?}, dropping {:?} of simulation time",
                frame_time,
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += u64::from(ticks);
        ticks
    }

    /// Get the fixed timestep (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Interpolation factor between the last two ticks, in [0, 1)
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / FIXED_TIMESTEP_DURATION.as_secs_f32()
    }

    /// Simulated time elapsed in ticks so far
    pub fn simulated_time(&self) -> Duration {
        Duration::from_secs_f64(self.tick_count as f64 / f64::from(TICKS_PER_SECOND))
    }

    /// Get total number of frames seen
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of ticks handed out
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Check if the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent a tick burst
            self.accumulator = Duration::ZERO;
            log::info!("Simulation resumed");
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
