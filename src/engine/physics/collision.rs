use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Player characters
    Player = 0b0000_0010,

    /// Solid ground and platforms
    Ground = 0b0000_0100,

    /// Ladders, vines and other climbable trigger zones
    ClimbRegion = 0b0000_1000,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Players touch the level but not each other
            CollisionGroups::Player => Group::from_bits_truncate(
                CollisionGroups::Default as u32
                    | CollisionGroups::Ground as u32
                    | CollisionGroups::ClimbRegion as u32,
            ),

            CollisionGroups::Ground => Group::from_bits_truncate(
                CollisionGroups::Default as u32
                    | CollisionGroups::Player as u32
                    | CollisionGroups::Ground as u32,
            ),

            // Climb regions only ever report player overlaps
            CollisionGroups::ClimbRegion => {
                Group::from_bits_truncate(CollisionGroups::Player as u32)
            }

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching (or overlapping, for sensors)
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        sensor: bool,
    },

    /// Two colliders stopped touching (or overlapping, for sensors)
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
        sensor: bool,
    },
}

impl CollisionEvent {
    /// Whether one of the two colliders is a sensor (trigger overlap)
    pub fn is_sensor(&self) -> bool {
        match *self {
            Self::Started { sensor, .. } | Self::Stopped { sensor, .. } => sensor,
        }
    }

    /// Given one collider of the pair, return the other one
    pub fn other(&self, collider: ColliderHandle) -> Option<ColliderHandle> {
        let (collider1, collider2) = match *self {
            Self::Started {
                collider1,
                collider2,
                ..
            }
            | Self::Stopped {
                collider1,
                collider2,
                ..
            } => (collider1, collider2),
        };

        if collider1 == collider {
            Some(collider2)
        } else if collider2 == collider {
            Some(collider1)
        } else {
            None
        }
    }
}

/// Queue for storing collision events during physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this step
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Add a collision event
    pub(crate) fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                    sensor: flags.contains(CollisionEventFlags::SENSOR),
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                    sensor: flags.contains(CollisionEventFlags::SENSOR),
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
