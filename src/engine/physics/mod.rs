// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{BodyBuilder, ColliderBuilder2D, ColliderHandle, PhysicsBody, RigidBodyHandle};
pub use collision::{CollisionEvent, CollisionEventQueue, CollisionGroups};
pub use world::PhysicsWorld;

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{Real, RigidBody, Vector};
