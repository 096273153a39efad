// Character base shared by zombies and the player

use glam::Vec2;
use log::warn;

use crate::core::math::{from_physics, to_physics};
use crate::engine::physics::{PhysicsWorld, RigidBodyHandle};
use crate::game::entity::Entity;

/// A single incoming strike
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Damage to apply (≥ 0)
    pub amount: i32,
    /// Where the strike came from, used for knockback
    pub source: Vec2,
}

/// Movement, melee cooldown and physics body bookkeeping on top of an
/// [`Entity`]
#[derive(Debug)]
pub struct Character {
    pub entity: Entity,
    /// Movement speed (units/second), mutable by buffs
    pub speed: i32,
    /// Damage dealt per strike, mutable by buffs
    pub attack_damage: i32,
    /// Seconds since the last strike
    hit_refresh: f32,
    /// Exclusively owned; taken on despawn so it is removed exactly once
    body: Option<RigidBodyHandle>,
}

impl Character {
    pub fn new(entity: Entity, speed: i32, attack_damage: i32) -> Self {
        Self {
            entity,
            speed,
            attack_damage,
            hit_refresh: 0.0,
            body: None,
        }
    }

    /// Bind the physics body. A character gets exactly one body; a later
    /// handle is still consumed, and its body is removed from the world.
    pub fn attach_body(&mut self, physics: &mut PhysicsWorld, handle: RigidBodyHandle) -> bool {
        if self.body.is_some() {
            warn!("Character already owns a body, removing {:?}", handle);
            physics.remove_rigid_body(handle);
            return false;
        }
        self.body = Some(handle);
        true
    }

    pub fn body(&self) -> Option<RigidBodyHandle> {
        self.body
    }

    /// Base per-tick bookkeeping: advance the strike cooldown
    pub fn update(&mut self, delta: f32) {
        self.hit_refresh += delta;
    }

    pub fn hit_refresh(&self) -> f32 {
        self.hit_refresh
    }

    pub fn set_hit_refresh(&mut self, seconds: f32) {
        self.hit_refresh = seconds;
    }

    /// Start a fresh cooldown after landing a strike
    pub fn reset_hit_refresh(&mut self) {
        self.hit_refresh = 0.0;
    }

    /// True once strictly more than `cooldown` seconds have passed since
    /// the last strike
    pub fn cooldown_ready(&self, cooldown: f32) -> bool {
        self.hit_refresh > cooldown
    }

    pub fn position(&self) -> Vec2 {
        self.entity.position
    }

    /// Vector from this character to `target`
    pub fn vector_to(&self, target: Vec2) -> Vec2 {
        target - self.entity.position
    }

    pub fn distance_to(&self, target: Vec2) -> f32 {
        self.vector_to(target).length()
    }

    /// Copy the body position into the entity; physics is authoritative
    pub fn sync_from_body(&mut self, physics: &PhysicsWorld) {
        let Some(body) = self.body.and_then(|h| physics.get_rigid_body(h)) else {
            return;
        };
        self.entity.position = from_physics(body.translation());
    }

    /// Push the body through its centre of mass, waking it
    pub fn apply_impulse(&self, physics: &mut PhysicsWorld, impulse: Vec2) {
        let Some(handle) = self.body else {
            return;
        };
        let Some(body) = physics.get_rigid_body_mut(handle) else {
            warn!("Impulse on missing body {:?}", handle);
            return;
        };
        body.apply_impulse(to_physics(impulse), true);
    }

    /// Set the body velocity directly (used for input-driven movement)
    pub fn set_velocity(&self, physics: &mut PhysicsWorld, velocity: Vec2) {
        let Some(handle) = self.body else {
            return;
        };
        let Some(body) = physics.get_rigid_body_mut(handle) else {
            warn!("Velocity on missing body {:?}", handle);
            return;
        };
        body.set_linvel(to_physics(velocity), true);
    }

    pub fn velocity(&self, physics: &PhysicsWorld) -> Option<Vec2> {
        self.body
            .and_then(|h| physics.get_rigid_body(h))
            .map(|body| from_physics(body.linvel()))
    }

    /// Body mass, or zero without a body
    pub fn mass(&self, physics: &PhysicsWorld) -> f32 {
        self.body
            .and_then(|h| physics.get_rigid_body(h))
            .map(|body| body.mass())
            .unwrap_or(0.0)
    }

    /// Remove the body from the world. Returns true only for the call that
    /// actually destroyed it.
    pub fn despawn(&mut self, physics: &mut PhysicsWorld) -> bool {
        match self.body.take() {
            Some(handle) => physics.remove_rigid_body(handle),
            None => false,
        }
    }
}

/// Anything that can be struck
pub trait Combatant {
    fn character(&self) -> &Character;

    fn character_mut(&mut self) -> &mut Character;

    /// Apply a strike. The default only subtracts health; kinds that react
    /// to hits (knockback, stun) override this.
    fn take_damage(&mut self, hit: Hit, _physics: &mut PhysicsWorld) {
        self.character_mut().entity.take_damage(hit.amount);
    }

    fn is_alive(&self) -> bool {
        self.character().entity.is_alive()
    }

    fn health(&self) -> i32 {
        self.character().entity.health()
    }

    fn position(&self) -> Vec2 {
        self.character().position()
    }
}
