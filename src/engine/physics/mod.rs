// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{presets, ColliderHandle, RigidBodyHandle};
pub use collision::{CollisionEvent, FixtureKind};
pub use world::{FixtureTag, PhysicsWorld};

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{Real, RigidBody, Vector};
