use rapier2d::prelude::*;
use std::collections::HashMap;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue, FixtureKind};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// What a collider belongs to: its category plus the raw id of the owning
/// game entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixtureTag {
    pub kind: FixtureKind,
    pub owner: u64,
}

impl FixtureTag {
    pub fn new(kind: FixtureKind, owner: u64) -> Self {
        Self { kind, owner }
    }
}

/// Top-down physics world. Owns every body and collider, steps rapier,
/// and keeps the contact events and fixture tags the game layer reads.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,

    // Rapier pipeline state
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    /// Contact events raised by the last steps, waiting to be drained
    collision_event_queue: CollisionEventQueue,

    /// Fixture tags by collider, used to route contacts to entities
    fixture_tags: HashMap<ColliderHandle, FixtureTag>,
}

impl PhysicsWorld {
    /// Create a new top-down physics world (no gravity)
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, 0.0])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: 1.0 / 60.0,
            ..IntegrationParameters::default()
        };

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
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            fixture_tags: HashMap::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    ///
    /// Contact events raised during the step are queued, not cleared, until
    /// [`PhysicsWorld::drain_collision_events`] is called.
    pub fn step(&mut self) {
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
            Some(&mut self.query_pipeline),
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

    /// Add a collider and tag it in one go
    pub fn add_tagged_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
        tag: FixtureTag,
    ) -> ColliderHandle {
        let handle = self.add_collider(collider, parent_handle);
        self.set_fixture_tag(handle, tag);
        handle
    }

    /// Remove a rigid body and all its attached colliders
    ///
    /// Returns false if the body was already gone.
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) -> bool {
        let attached: Vec<ColliderHandle> = self
            .rigid_body_set
            .get(handle)
            .map(|body| body.colliders().to_vec())
            .unwrap_or_default();

        let removed = self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );

        for collider in attached {
            self.fixture_tags.remove(&collider);
        }

        removed.is_some()
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

    /// Number of live rigid bodies
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }

    /// Tag a collider so contacts on it can be routed
    pub fn set_fixture_tag(&mut self, collider: ColliderHandle, tag: FixtureTag) {
        self.fixture_tags.insert(collider, tag);
    }

    /// Get the tag of a collider, if it is still in the world
    pub fn fixture_tag(&self, collider: ColliderHandle) -> Option<FixtureTag> {
        self.fixture_tags.get(&collider).copied()
    }

    /// Take all collision events raised since the last drain
    pub fn drain_collision_events(&mut self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.drain()
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::body::presets;
    use super::*;

    #[test]
    fn test_remove_body_drops_tags() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::zombie_body(0.0, 0.0, 5.0));
        let collider = world.add_tagged_collider(
            presets::zombie_collider(0.5, 10.0),
            body,
            FixtureTag::new(FixtureKind::Zombie, 3),
        );

        assert_eq!(
            world.fixture_tag(collider),
            Some(FixtureTag::new(FixtureKind::Zombie, 3))
        );
        assert!(world.remove_rigid_body(body));
        assert_eq!(world.fixture_tag(collider), None);
        assert!(world.get_rigid_body(body).is_none());
    }

    #[test]
    fn test_remove_body_twice() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::zombie_body(0.0, 0.0, 5.0));

        assert!(world.remove_rigid_body(body));
        assert!(!world.remove_rigid_body(body));
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_overlapping_bodies_raise_started() {
        let mut world = PhysicsWorld::new();
        let zombie = world.add_rigid_body(presets::zombie_body(0.0, 0.0, 5.0));
        let zombie_collider = world.add_collider(presets::zombie_collider(0.5, 10.0), zombie);
        let player = world.add_rigid_body(presets::player_body(0.6, 0.0, 5.0));
        let player_collider = world.add_collider(presets::player_collider(0.5, 1.0), player);

        world.step();

        let events = world.drain_collision_events();
        assert!(events.iter().any(|e| {
            let (a, b) = e.colliders();
            e.is_started()
                && ((a, b) == (zombie_collider, player_collider)
                    || (a, b) == (player_collider, zombie_collider))
        }));
        assert!(world.drain_collision_events().is_empty());
    }

    #[test]
    fn test_no_gravity() {
        let mut world = PhysicsWorld::new();
        let body = world.add_rigid_body(presets::player_body(0.0, 0.0, 0.0));
        world.add_collider(presets::player_collider(0.5, 1.0), body);

        for _ in 0..10 {
            world.step();
        }

        let pos = world.get_rigid_body(body).unwrap().translation();
        assert_eq!(pos.y, 0.0);
    }
}
