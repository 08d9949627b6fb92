use rapier2d::prelude::*;
use std::collections::HashMap;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue};

/// Physics world that manages all physics simulation.
///
/// Besides the rapier pipeline it keeps a tag per collider ("Ground", "Climb",
/// ...), which is how game code tells level geometry apart in collision events.
pub struct PhysicsWorld {
    /// Gravity vector (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Collision event handler
    collision_event_queue: CollisionEventQueue,

    /// Gameplay tags attached to colliders
    collider_tags: HashMap<ColliderHandle, String>,

    /// Tags of colliders removed since the last step
    retiring_tags: HashMap<ColliderHandle, String>,

    /// Tags of colliders removed before the last step, readable while its
    /// events are dispatched
    retired_tags: HashMap<ColliderHandle, String>,

    /// Overlap ends caused by removals, delivered with the next step's events
    pending_events: Vec<GameCollisionEvent>,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            collider_tags: HashMap::new(),
            retiring_tags: HashMap::new(),
            retired_tags: HashMap::new(),
            pending_events: Vec::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        // Clear previous step's collision events
        self.collision_event_queue.clear();
        self.retired_tags = std::mem::take(&mut self.retiring_tags);
        for event in self.pending_events.drain(..) {
            self.collision_event_queue.push(event);
        }

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            event_handler,
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Add a collider attached to a rigid body and tag it
    pub fn add_tagged_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
        tag: &str,
    ) -> ColliderHandle {
        let handle = self.add_collider(collider, parent_handle);
        self.collider_tags.insert(handle, tag.to_string());
        handle
    }

    /// Tag of a collider, if it has one.
    ///
    /// Removed colliders keep their tag until the step after the one that
    /// reported their last overlaps.
    pub fn collider_tag(&self, handle: ColliderHandle) -> Option<&str> {
        self.collider_tags
            .get(&handle)
            .or_else(|| self.retiring_tags.get(&handle))
            .or_else(|| self.retired_tags.get(&handle))
            .map(String::as_str)
    }

    /// Remove a rigid body and all its attached colliders.
    ///
    /// Sensor overlaps the body's colliders had are reported as `Stopped`
    /// events by the next step, so characters inside a removed region leave it.
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        let colliders = self
            .rigid_body_set
            .get(handle)
            .map(|body| body.colliders().to_vec())
            .unwrap_or_default();

        for collider in colliders {
            let ended = self
                .narrow_phase
                .intersection_pairs_with(collider)
                .filter(|(_, _, intersecting)| *intersecting)
                .map(|(collider1, collider2, _)| GameCollisionEvent::Stopped {
                    collider1,
                    collider2,
                    sensor: true,
                });
            self.pending_events.extend(ended);

            if let Some(tag) = self.collider_tags.remove(&collider) {
                self.retiring_tags.insert(collider, tag);
            }
        }

        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Get all collision events from the last step
    pub fn get_collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Inject a collision event as if the last step had produced it.
    /// Hosts with their own contact source use this to drive characters.
    pub fn push_collision_event(&self, event: GameCollisionEvent) {
        self.collision_event_queue.push(event);
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
