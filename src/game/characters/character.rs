// Character entity and management

use log::{info, warn};

use crate::engine::audio::CueChannel;
use crate::engine::input::InputSnapshot;
use crate::engine::physics::{
    body::presets, ColliderHandle, CollisionEvent, PhysicsWorld, RigidBodyHandle,
};

use super::animation::AnimationPlayer;
use super::audio::standard_cue_channel;
use super::config::{ConfigError, ControllerConfig};
use super::controller::{Actuators, LocomotionController};
use super::state::MotionState;

/// Unique identifier for a character
pub type CharacterId = u32;

/// Collider width in world units
pub const CHARACTER_WIDTH: f32 = 1.0;
/// Collider height in world units
pub const CHARACTER_HEIGHT: f32 = 2.0;

/// A platformer character: locomotion controller bound to a physics body,
/// an animation player and a cue channel
#[derive(Debug)]
pub struct Character {
    /// Unique identifier
    pub id: CharacterId,
    /// Character name (for display and logs)
    pub name: String,

    // Physics
    /// Handle to the character's rigid body in the physics world
    pub body_handle: RigidBodyHandle,
    /// Handle to the character's collider
    pub collider_handle: ColliderHandle,

    /// Locomotion state machine
    pub controller: LocomotionController,
    /// Pose player driven by the controller
    pub animation: AnimationPlayer,
    /// Single cue channel driven by the controller
    pub cues: CueChannel,

    /// Input for the next tick (set by the host)
    pub input: InputSnapshot,
}

impl Character {
    /// Create a new character and add it to the physics world
    pub fn new(
        id: CharacterId,
        name: &str,
        config: ControllerConfig,
        physics: &mut PhysicsWorld,
        spawn_x: f32,
        spawn_y: f32,
    ) -> Result<Self, ConfigError> {
        // Validate before touching the world
        let controller = LocomotionController::new(config)?;

        let body_handle = physics.add_rigid_body(presets::player_body(spawn_x, spawn_y));
        let collider_handle = physics.add_collider(
            presets::player_collider(CHARACTER_WIDTH, CHARACTER_HEIGHT),
            body_handle,
        );

        Ok(Self {
            id,
            name: name.to_string(),
            body_handle,
            collider_handle,
            controller,
            animation: AnimationPlayer::with_standard_animations(),
            cues: standard_cue_channel(),
            input: InputSnapshot::idle(),
        })
    }

    /// Run one controller tick against the physics body, then advance
    /// animation and cue playback
    pub fn update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        let input = self.input;
        self.with_actuators(physics, |controller, out| {
            controller.on_tick(&input, dt, out)
        });

        self.animation.update(dt);
        self.cues.advance(dt);
    }

    /// Knock the character into the hurt state
    pub fn hurt(&mut self, physics: &mut PhysicsWorld) {
        info!("{} got hurt", self.name);
        self.with_actuators(physics, |controller, out| controller.hurt(out));
    }

    /// Feed a collision event to the controller if it involves this character.
    ///
    /// Solid contacts report ground, sensor overlaps report climb regions;
    /// the controller decides by tag whether anything changes.
    pub fn handle_collision(&mut self, physics: &mut PhysicsWorld, event: &CollisionEvent) {
        let Some(other) = event.other(self.collider_handle) else {
            return;
        };
        let Some(tag) = physics.collider_tag(other).map(str::to_owned) else {
            return;
        };

        match *event {
            CollisionEvent::Started { sensor: false, .. } => {
                self.controller.on_ground_contact_begin(&tag);
            }
            CollisionEvent::Started { sensor: true, .. } => {
                self.controller.on_climb_region_enter(&tag);
            }
            CollisionEvent::Stopped { sensor: true, .. } => {
                self.with_actuators(physics, |controller, out| {
                    controller.on_climb_region_exit(&tag, out)
                });
            }
            CollisionEvent::Stopped { sensor: false, .. } => {}
        }
    }

    /// Get the current locomotion state
    pub fn state(&self) -> MotionState {
        self.controller.state()
    }

    /// Get character's current position
    pub fn position(&self, physics: &PhysicsWorld) -> Option<(f32, f32)> {
        physics.get_rigid_body(self.body_handle).map(|body| {
            let pos = body.translation();
            (pos.x, pos.y)
        })
    }

    /// Get character's current velocity
    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<(f32, f32)> {
        physics.get_rigid_body(self.body_handle).map(|body| {
            let vel = body.linvel();
            (vel.x, vel.y)
        })
    }

    /// Clear per-tick input (called at end of tick)
    pub fn clear_input(&mut self) {
        // Jump is an edge; the axes are continuous
        self.input.jump_pressed = false;
    }

    fn with_actuators<R>(
        &mut self,
        physics: &mut PhysicsWorld,
        f: impl FnOnce(&mut LocomotionController, &mut Actuators<'_>) -> R,
    ) -> Option<R> {
        let Some(body) = physics.get_rigid_body_mut(self.body_handle) else {
            warn!("{} (id {}) has no rigid body", self.name, self.id);
            return None;
        };

        let mut out = Actuators::new(body)
            .with_poses(&mut self.animation)
            .with_cues(&mut self.cues);
        Some(f(&mut self.controller, &mut out))
    }
}

/// Manages all characters in the game
#[derive(Debug, Default)]
pub struct CharacterManager {
    characters: Vec<Character>,
    next_id: CharacterId,
}

impl CharacterManager {
    pub fn new() -> Self {
        Self {
            characters: Vec::new(),
            next_id: 0,
        }
    }

    /// Spawn a new character
    pub fn spawn_character(
        &mut self,
        name: &str,
        config: ControllerConfig,
        physics: &mut PhysicsWorld,
        spawn_x: f32,
        spawn_y: f32,
    ) -> Result<CharacterId, ConfigError> {
        let id = self.next_id;
        let character = Character::new(id, name, config, physics, spawn_x, spawn_y)?;
        self.next_id += 1;

        info!("Spawned {} (id {}) at ({}, {})", name, id, spawn_x, spawn_y);
        self.characters.push(character);

        Ok(id)
    }

    /// Get a character by ID
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Get a mutable character by ID
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == id)
    }

    /// Set the input a character will consume on the next tick
    pub fn set_input(&mut self, id: CharacterId, input: InputSnapshot) {
        if let Some(character) = self.get_mut(id) {
            character.input = input;
        }
    }

    /// Get all characters
    pub fn all(&self) -> &[Character] {
        &self.characters
    }

    /// Tick all characters
    pub fn update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        for character in &mut self.characters {
            character.update(physics, dt);
            character.clear_input();
        }
    }

    /// Dispatch the last physics step's collision events to the characters
    /// they involve
    pub fn handle_collision_events(&mut self, physics: &mut PhysicsWorld) {
        let events = physics.get_collision_events();
        for event in &events {
            for character in &mut self.characters {
                character.handle_collision(physics, event);
            }
        }
    }

    /// Remove a character by ID, taking its body out of the physics world.
    /// A pending hurt recovery goes away with the controller.
    pub fn remove(&mut self, id: CharacterId, physics: &mut PhysicsWorld) -> Option<Character> {
        let pos = self.characters.iter().position(|c| c.id == id)?;
        let character = self.characters.remove(pos);
        physics.remove_rigid_body(character.body_handle);

        info!("Removed {} (id {})", character.name, id);
        Some(character)
    }

    /// Get the number of characters
    pub fn count(&self) -> usize {
        self.characters.len()
    }
}
