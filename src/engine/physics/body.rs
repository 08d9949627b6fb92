use super::collision::CollisionGroups;
use glam::Vec2;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// The slice of a physics body a character controller is allowed to touch:
/// linear velocity and gravity scale.
pub trait PhysicsBody {
    /// Current linear velocity
    fn linear_velocity(&self) -> Vec2;

    /// Overwrite the linear velocity
    fn set_linear_velocity(&mut self, velocity: Vec2);

    /// Current gravity multiplier (1.0 = normal gravity, 0.0 = none)
    fn gravity_scale(&self) -> f32;

    /// Overwrite the gravity multiplier
    fn set_gravity_scale(&mut self, scale: f32);
}

impl PhysicsBody for RigidBody {
    fn linear_velocity(&self) -> Vec2 {
        let linvel = self.linvel();
        Vec2::new(linvel.x, linvel.y)
    }

    fn set_linear_velocity(&mut self, velocity: Vec2) {
        self.set_linvel(vector![velocity.x, velocity.y], true);
    }

    fn gravity_scale(&self) -> f32 {
        RigidBody::gravity_scale(self)
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        RigidBody::set_gravity_scale(self, scale, true);
    }
}

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    gravity_scale: Real,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            gravity_scale: 1.0,
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            gravity_scale: 0.0,
            can_sleep: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock rotation (useful for player characters)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .gravity_scale(self.gravity_scale)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    collision_groups: CollisionGroups,
    is_sensor: bool,
    friction: Real,
    restitution: Real,
    density: Real,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            collision_groups: CollisionGroups::Default,
            is_sensor: false,
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
        }
    }

    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_width, half_height))
    }

    /// Create a capsule-shaped collider (good for characters)
    pub fn capsule(half_height: Real, radius: Real) -> Self {
        Self::with_shape(SharedShape::capsule_y(half_height, radius))
    }

    /// Set the collision groups for filtering
    pub fn collision_groups(mut self, groups: CollisionGroups) -> Self {
        self.collision_groups = groups;
        self
    }

    /// Make this a sensor (detects overlaps but doesn't cause physical response)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set density (mass will be calculated from shape volume)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Build the collider. Collision events are always enabled: the
    /// character controller is driven by them.
    pub fn build(self) -> Collider {
        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.collision_groups.to_interaction_groups())
            .sensor(self.is_sensor)
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build()
    }
}

/// Common rigid body configurations for level objects
pub mod presets {
    use super::*;

    /// Create a player character body (dynamic, rotation locked)
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .gravity_scale(1.0)
            .can_sleep(false) // Players should never sleep
            .build()
    }

    /// Create a player character collider (capsule shape)
    pub fn player_collider(width: Real, height: Real) -> Collider {
        let radius = width / 2.0;
        let half_height = ((height / 2.0) - radius).max(0.0);

        ColliderBuilder2D::capsule(half_height, radius)
            .collision_groups(CollisionGroups::Player)
            .friction(0.0) // No friction for smooth movement
            .restitution(0.0)
            .density(1.0)
            .build()
    }

    /// Create a ground body (fixed/static)
    pub fn ground_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Create a ground collider (box shape)
    pub fn ground_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::Ground)
            .friction(0.3)
            .restitution(0.0)
            .build()
    }

    /// Create a climbable region (sensor: reports overlaps, never blocks)
    pub fn climb_region_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .collision_groups(CollisionGroups::ClimbRegion)
            .sensor(true)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_builder_dynamic() {
        let body = BodyBuilder::new_dynamic().position(10.0, 20.0).build();

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert_eq!(body.translation().x, 10.0);
        assert_eq!(body.translation().y, 20.0);
    }

    #[test]
    fn test_collider_builder_box() {
        let collider = ColliderBuilder2D::box_shape(1.0, 2.0).friction(0.3).build();

        assert!(!collider.is_sensor());
        assert_eq!(collider.friction(), 0.3);
    }

    #[test]
    fn test_player_preset() {
        let body = presets::player_body(0.0, 0.0);
        let collider = presets::player_collider(1.0, 2.0);

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert!(body.is_rotation_locked());
        assert!(!collider.is_sensor());
    }

    #[test]
    fn test_climb_region_is_sensor() {
        let collider = presets::climb_region_collider(1.0, 6.0);
        assert!(collider.is_sensor());
    }

    #[test]
    fn test_rigid_body_as_physics_body() {
        let mut body = presets::player_body(0.0, 0.0);
        let physics_body: &mut dyn PhysicsBody = &mut body;

        physics_body.set_linear_velocity(Vec2::new(5.0, -2.0));
        physics_body.set_gravity_scale(0.0);

        assert_eq!(physics_body.linear_velocity(), Vec2::new(5.0, -2.0));
        assert_eq!(physics_body.gravity_scale(), 0.0);
        assert_eq!(body.linvel().x, 5.0);
        assert_eq!(body.gravity_scale(), 0.0);
    }
}
