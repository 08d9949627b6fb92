// Locomotion controller: per-tick input -> velocity, state, poses and cues

use glam::Vec2;
use log::{debug, trace};

use crate::engine::audio::CuePlayer;
use crate::engine::input::InputSnapshot;
use crate::engine::physics::PhysicsBody;

use super::animation::{Pose, PosePlayer};
use super::audio::Cue;
use super::config::{ConfigError, ControllerConfig, GROUND_TAG, HURT_DURATION};
use super::state::{ContactFlags, MotionState, MotionStateMachine};

/// Collaborators the controller drives during one call.
///
/// The physics body is required. Pose and cue players are optional; requests
/// to a missing player are dropped.
pub struct Actuators<'a> {
    body: &'a mut dyn PhysicsBody,
    poses: Option<&'a mut dyn PosePlayer>,
    cues: Option<&'a mut dyn CuePlayer>,
}

impl<'a> Actuators<'a> {
    pub fn new(body: &'a mut dyn PhysicsBody) -> Self {
        Self {
            body,
            poses: None,
            cues: None,
        }
    }

    /// Attach a pose player
    pub fn with_poses(mut self, poses: &'a mut dyn PosePlayer) -> Self {
        self.poses = Some(poses);
        self
    }

    /// Attach a cue player
    pub fn with_cues(mut self, cues: &'a mut dyn CuePlayer) -> Self {
        self.cues = Some(cues);
        self
    }

    /// Read access to the driven body
    pub fn body(&self) -> &dyn PhysicsBody {
        &*self.body
    }

    fn request_pose(&mut self, pose: Pose) {
        if let Some(poses) = self.poses.as_deref_mut() {
            poses.request_pose(pose.name());
        }
    }

    fn try_cue(&mut self, cue: Cue) {
        if let Some(cues) = self.cues.as_deref_mut() {
            if !cues.try_play(cue.id()) {
                trace!("Cue channel busy, dropped {:?}", cue);
            }
        }
    }

    fn set_velocity_x(&mut self, x: f32) {
        let velocity = self.body.linear_velocity();
        self.body.set_linear_velocity(Vec2::new(x, velocity.y));
    }

    fn set_velocity_y(&mut self, y: f32) {
        let velocity = self.body.linear_velocity();
        self.body.set_linear_velocity(Vec2::new(velocity.x, y));
    }
}

/// Per-character locomotion state machine.
///
/// Each tick, in priority order: hurt gate, horizontal movement, jump, climb
/// entry, climb motion, locomotion pose. Physics feeds back through the
/// contact callbacks between ticks.
#[derive(Debug)]
pub struct LocomotionController {
    config: ControllerConfig,
    state_machine: MotionStateMachine,
    contacts: ContactFlags,
}

impl LocomotionController {
    /// Create a controller for a freshly spawned, grounded character
    pub fn new(config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state_machine: MotionStateMachine::new(),
            contacts: ContactFlags::default(),
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Get the current state
    pub fn state(&self) -> MotionState {
        self.state_machine.state()
    }

    pub fn state_machine(&self) -> &MotionStateMachine {
        &self.state_machine
    }

    pub fn contacts(&self) -> ContactFlags {
        self.contacts
    }

    pub fn is_grounded(&self) -> bool {
        self.contacts.is_grounded
    }

    pub fn can_climb(&self) -> bool {
        self.contacts.can_climb
    }

    pub fn is_climbing(&self) -> bool {
        self.state().is_climbing()
    }

    pub fn is_hurt(&self) -> bool {
        self.state() == MotionState::Hurt
    }

    /// Seconds until hurt recovery, if hurt
    pub fn hurt_time_remaining(&self) -> Option<f32> {
        self.state_machine.hurt_timer().map(|timer| timer.remaining())
    }

    /// Advance the controller by one tick
    pub fn on_tick(&mut self, input: &InputSnapshot, dt: f32, out: &mut Actuators<'_>) {
        let accepts_input = self.state().accepts_input();
        let recovered = self.state_machine.update(dt, self.contacts.is_grounded);

        // Hurt swallows the whole tick, including the one it ends on
        if !accepts_input {
            if recovered {
                debug!("Recovered from hurt into {:?}", self.state());
            }
            return;
        }

        let InputSnapshot {
            horizontal,
            vertical,
            jump_pressed,
        } = *input;

        self.apply_horizontal(horizontal, out);

        if jump_pressed && self.contacts.is_grounded && !self.is_climbing() {
            self.jump(out);
        }

        if self.contacts.can_climb && vertical != 0.0 && !self.is_climbing() {
            self.enter_climb(out);
        }

        if self.is_climbing() {
            self.climb(vertical, out);
        } else {
            self.update_locomotion_pose(horizontal, out);
            self.state_machine.settle(self.contacts.is_grounded);
        }
    }

    /// A collision began with a collider carrying `tag`
    pub fn on_ground_contact_begin(&mut self, tag: &str) {
        if tag != GROUND_TAG {
            return;
        }

        self.contacts.is_grounded = true;
        self.state_machine.settle(true);
    }

    /// The character started overlapping a trigger carrying `tag`
    pub fn on_climb_region_enter(&mut self, tag: &str) {
        if tag == self.config.climb_region_tag {
            // Climbing itself waits for vertical input
            self.contacts.can_climb = true;
        }
    }

    /// The character stopped overlapping a trigger carrying `tag`
    pub fn on_climb_region_exit(&mut self, tag: &str, out: &mut Actuators<'_>) {
        if tag != self.config.climb_region_tag {
            return;
        }

        self.contacts.can_climb = false;
        if self.is_climbing() {
            self.exit_climb(out);
        }
    }

    /// Knock the character into the hurt state for [`HURT_DURATION`] seconds
    pub fn hurt(&mut self, out: &mut Actuators<'_>) {
        if self.is_climbing() {
            self.exit_climb(out);
        }

        self.state_machine.apply_hurt(HURT_DURATION);
        out.try_cue(Cue::Hurt);
        out.request_pose(Pose::Hurt);
    }

    fn apply_horizontal(&mut self, horizontal: f32, out: &mut Actuators<'_>) {
        if self.is_climbing() {
            out.set_velocity_x(0.0);
        } else {
            out.set_velocity_x(horizontal * self.config.move_speed);
        }

        if horizontal != 0.0 {
            out.try_cue(Cue::Move);
        }
    }

    fn jump(&mut self, out: &mut Actuators<'_>) {
        out.set_velocity_y(self.config.jump_force);

        // Cleared now rather than when physics reports separation
        self.contacts.is_grounded = false;
        self.state_machine.transition(MotionState::Airborne);

        out.try_cue(Cue::Jump);
        out.request_pose(Pose::Jump);
    }

    fn enter_climb(&mut self, out: &mut Actuators<'_>) {
        self.state_machine.transition(MotionState::Climbing);
        out.body.set_gravity_scale(MotionState::Climbing.gravity_scale());
        out.request_pose(Pose::Climb);
    }

    fn climb(&mut self, vertical: f32, out: &mut Actuators<'_>) {
        out.body
            .set_linear_velocity(Vec2::new(0.0, vertical * self.config.climb_speed));

        if vertical != 0.0 {
            out.request_pose(Pose::Climb);
            out.try_cue(Cue::Climb);
        } else {
            out.request_pose(Pose::ClimbIdle);
        }
    }

    fn exit_climb(&mut self, out: &mut Actuators<'_>) {
        self.state_machine
            .transition(MotionState::from_grounded(self.contacts.is_grounded));
        out.body.set_gravity_scale(self.state().gravity_scale());
        out.set_velocity_y(0.0);
    }

    fn update_locomotion_pose(&mut self, horizontal: f32, out: &mut Actuators<'_>) {
        if horizontal != 0.0 {
            out.request_pose(Pose::Move);
        } else if self.contacts.is_grounded {
            out.request_pose(Pose::Idle);
        }
        // Airborne without horizontal input keeps whatever pose is showing
    }
}
