// Character locomotion state machine

use crate::core::math::approx_equal;

/// Slack for float countdowns (1/60 summed sixty times is not exactly 1.0)
const TIMER_EPSILON: f32 = 1e-4;

/// Represents the current locomotion state of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MotionState {
    /// Standing or running on the ground
    #[default]
    Grounded,
    /// In the air (jumping or falling)
    Airborne,
    /// On a climbable surface, gravity off
    Climbing,
    /// Incapacitated after a hit; preempts every other state
    Hurt,
}

impl MotionState {
    /// Check if the character is climbing
    pub fn is_climbing(&self) -> bool {
        matches!(self, Self::Climbing)
    }

    /// Check if the character consumes input in this state
    pub fn accepts_input(&self) -> bool {
        !matches!(self, Self::Hurt)
    }

    /// Gravity multiplier the body must carry in this state
    pub fn gravity_scale(&self) -> f32 {
        if self.is_climbing() {
            0.0
        } else {
            1.0
        }
    }

    /// Locomotion state implied by the grounded flag
    pub fn from_grounded(is_grounded: bool) -> Self {
        if is_grounded {
            Self::Grounded
        } else {
            Self::Airborne
        }
    }
}

/// Contact information fed by physics events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactFlags {
    /// Set by ground contact, cleared optimistically on jump
    pub is_grounded: bool,
    /// True while overlapping a climbable region
    pub can_climb: bool,
}

impl Default for ContactFlags {
    fn default() -> Self {
        // Characters spawn standing on something
        Self {
            is_grounded: true,
            can_climb: false,
        }
    }
}

/// Countdown that ends the hurt state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HurtTimer {
    remaining: f32,
}

impl HurtTimer {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
        }
    }

    /// Seconds left
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Count down by `dt`; returns true once the timer has elapsed
    pub fn advance(&mut self, dt: f32) -> bool {
        self.remaining = (self.remaining - dt).max(0.0);
        self.is_elapsed()
    }

    /// Check if the timer has run out
    pub fn is_elapsed(&self) -> bool {
        approx_equal(self.remaining, 0.0, TIMER_EPSILON)
    }
}

/// State machine that tracks the current locomotion state.
///
/// Only [`MotionStateMachine::apply_hurt`] may enter `Hurt`, and only an
/// elapsed hurt timer may leave it: `transition` refuses to move out of
/// `Hurt` on its own.
#[derive(Debug)]
pub struct MotionStateMachine {
    current_state: MotionState,
    previous_state: MotionState,
    state_time: f32,
    hurt_timer: Option<HurtTimer>,
}

impl Default for MotionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: MotionState::Grounded,
            previous_state: MotionState::Grounded,
            state_time: 0.0,
            hurt_timer: None,
        }
    }

    /// Get the current state
    pub fn state(&self) -> MotionState {
        self.current_state
    }

    /// Get the previous state
    pub fn previous_state(&self) -> MotionState {
        self.previous_state
    }

    /// Get time spent in current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Check if state just changed this tick
    pub fn state_just_changed(&self) -> bool {
        self.state_time == 0.0
    }

    /// Pending hurt countdown, present only while hurt
    pub fn hurt_timer(&self) -> Option<&HurtTimer> {
        self.hurt_timer.as_ref()
    }

    /// Transition to a new state. Ignored while hurt.
    pub fn transition(&mut self, new_state: MotionState) {
        if self.current_state == MotionState::Hurt || new_state == MotionState::Hurt {
            return;
        }
        self.set_state(new_state);
    }

    /// Outside climbing, follow the grounded flag
    pub fn settle(&mut self, is_grounded: bool) {
        if matches!(
            self.current_state,
            MotionState::Grounded | MotionState::Airborne
        ) {
            self.transition(MotionState::from_grounded(is_grounded));
        }
    }

    /// Enter hurt, (re)starting the recovery countdown
    pub fn apply_hurt(&mut self, duration: f32) {
        self.set_state(MotionState::Hurt);
        self.state_time = 0.0;
        self.hurt_timer = Some(HurtTimer::new(duration));
    }

    /// Advance timers (called every tick).
    ///
    /// Returns true on the tick the hurt timer elapses; the machine is then
    /// back in `Grounded` or `Airborne` according to `is_grounded`.
    pub fn update(&mut self, dt: f32, is_grounded: bool) -> bool {
        self.state_time += dt;

        let Some(timer) = self.hurt_timer.as_mut() else {
            return false;
        };

        if !timer.advance(dt) {
            return false;
        }

        self.hurt_timer = None;
        self.set_state(MotionState::from_grounded(is_grounded));
        true
    }

    fn set_state(&mut self, new_state: MotionState) {
        if self.current_state != new_state {
            log::debug!("Motion state {:?} -> {:?}", self.current_state, new_state);
            self.previous_state = self.current_state;
            self.current_state = new_state;
            self.state_time = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let sm = MotionStateMachine::new();
        assert_eq!(sm.state(), MotionState::Grounded);
        assert!(sm.hurt_timer().is_none());
    }

    #[test]
    fn test_state_transition() {
        let mut sm = MotionStateMachine::new();
        sm.transition(MotionState::Climbing);
        assert_eq!(sm.state(), MotionState::Climbing);
        assert_eq!(sm.previous_state(), MotionState::Grounded);
    }

    #[test]
    fn test_state_just_changed() {
        let mut sm = MotionStateMachine::new();
        sm.transition(MotionState::Airborne);
        assert!(sm.state_just_changed());
        sm.update(0.1, false);
        assert!(!sm.state_just_changed());
    }

    #[test]
    fn test_settle_follows_grounded_flag() {
        let mut sm = MotionStateMachine::new();
        sm.settle(false);
        assert_eq!(sm.state(), MotionState::Airborne);
        sm.settle(true);
        assert_eq!(sm.state(), MotionState::Grounded);
    }

    #[test]
    fn test_settle_leaves_climbing_alone() {
        let mut sm = MotionStateMachine::new();
        sm.transition(MotionState::Climbing);
        sm.settle(true);
        assert_eq!(sm.state(), MotionState::Climbing);
    }

    #[test]
    fn test_transition_cannot_leave_hurt() {
        let mut sm = MotionStateMachine::new();
        sm.apply_hurt(1.0);
        sm.transition(MotionState::Climbing);
        sm.settle(true);
        assert_eq!(sm.state(), MotionState::Hurt);
    }

    #[test]
    fn test_transition_cannot_enter_hurt() {
        let mut sm = MotionStateMachine::new();
        sm.transition(MotionState::Hurt);
        assert_eq!(sm.state(), MotionState::Grounded);
        assert!(sm.hurt_timer().is_none());
    }

    #[test]
    fn test_hurt_recovers_after_duration() {
        let mut sm = MotionStateMachine::new();
        sm.apply_hurt(1.0);
        assert_eq!(sm.state(), MotionState::Hurt);

        assert!(!sm.update(0.5, true));
        assert_eq!(sm.state(), MotionState::Hurt);

        assert!(sm.update(0.5, false));
        assert_eq!(sm.state(), MotionState::Airborne);
        assert!(sm.hurt_timer().is_none());
    }

    #[test]
    fn test_hurt_recovers_after_sixty_ticks() {
        let mut sm = MotionStateMachine::new();
        sm.apply_hurt(1.0);

        for _ in 0..59 {
            assert!(!sm.update(1.0 / 60.0, true));
        }
        assert!(sm.update(1.0 / 60.0, true));
        assert_eq!(sm.state(), MotionState::Grounded);
    }

    #[test]
    fn test_reapplying_hurt_restarts_timer() {
        let mut sm = MotionStateMachine::new();
        sm.apply_hurt(1.0);
        sm.update(0.75, true);

        sm.apply_hurt(1.0);
        assert!(!sm.update(0.5, true));
        assert_eq!(sm.state(), MotionState::Hurt);
        assert!(sm.update(0.5, true));
    }

    #[test]
    fn test_gravity_scale_per_state() {
        assert_eq!(MotionState::Climbing.gravity_scale(), 0.0);
        assert_eq!(MotionState::Grounded.gravity_scale(), 1.0);
        assert_eq!(MotionState::Airborne.gravity_scale(), 1.0);
        assert_eq!(MotionState::Hurt.gravity_scale(), 1.0);
    }

    #[test]
    fn test_hurt_blocks_input() {
        assert!(!MotionState::Hurt.accepts_input());
        assert!(MotionState::Climbing.accepts_input());
    }

    #[test]
    fn test_timer_never_goes_negative() {
        let mut timer = HurtTimer::new(0.25);
        assert!(timer.advance(1.0));
        assert_eq!(timer.remaining(), 0.0);
    }
}
