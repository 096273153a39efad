// The player character

use glam::Vec2;
use log::info;

use super::character::{Character, Combatant, Hit};
use super::stats::{PlayerKind, PlayerStats};
use crate::core::math::direction_or_zero;
use crate::engine::physics::{presets, FixtureKind, FixtureTag, PhysicsWorld};
use crate::game::config::CombatConfig;
use crate::game::entity::Entity;

/// Fixture owner id used for the single player
pub const PLAYER_OWNER: u64 = 0;

/// The player: a damage sink for zombies and the target of buffs
#[derive(Debug)]
pub struct Player {
    character: Character,
    kind: PlayerKind,
    base: PlayerStats,
    hit_cooldown: f32,
    attack_range: f32,
    /// Desired movement direction, set by the input layer
    move_intent: Vec2,
}

impl Player {
    /// Create a player without a physics body
    pub fn new(kind: PlayerKind, position: Vec2, config: &CombatConfig) -> Self {
        let base = kind.stats();
        let entity = Entity::new(position, 0.0, config.player_radius, base.max_health);
        Self {
            character: Character::new(entity, base.speed, base.attack_damage),
            kind,
            base,
            hit_cooldown: config.player_hit_cooldown,
            attack_range: config.player_attack_range,
            move_intent: Vec2::ZERO,
        }
    }

    /// Create a player and its body in the physics world
    pub fn spawn(
        kind: PlayerKind,
        position: Vec2,
        config: &CombatConfig,
        physics: &mut PhysicsWorld,
    ) -> Self {
        let mut player = Self::new(kind, position, config);

        let body = presets::player_body(position.x, position.y, config.player_damping);
        let body_handle = physics.add_rigid_body(body);
        physics.add_tagged_collider(
            presets::player_collider(config.player_radius, config.player_density),
            body_handle,
            FixtureTag::new(FixtureKind::Player, PLAYER_OWNER),
        );
        player.character.attach_body(physics, body_handle);

        info!("Spawned {:?} player at {}", kind, position);
        player
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    /// Stat line the player was created with; buffs never touch it
    pub fn base_stats(&self) -> PlayerStats {
        self.base
    }

    /// Current attack damage (base plus active buffs)
    pub fn attack_damage(&self) -> i32 {
        self.character.attack_damage
    }

    /// Current speed (base plus active buffs)
    pub fn speed(&self) -> i32 {
        self.character.speed
    }

    pub fn attack_range(&self) -> f32 {
        self.attack_range
    }

    pub fn set_move_intent(&mut self, direction: Vec2) {
        self.move_intent = direction;
    }

    pub fn move_intent(&self) -> Vec2 {
        self.move_intent
    }

    /// Per-tick update: cooldown bookkeeping, then input-driven movement
    pub fn update(&mut self, delta: f32, physics: &mut PhysicsWorld) {
        self.character.update(delta);

        let velocity = if self.is_alive() {
            direction_or_zero(self.move_intent) * self.character.speed as f32
        } else {
            Vec2::ZERO
        };
        self.character.set_velocity(physics, velocity);
    }

    /// Check if the player's own strike is off cooldown
    pub fn can_strike(&self) -> bool {
        self.is_alive() && self.character.cooldown_ready(self.hit_cooldown)
    }

    /// Check if `target` is within striking distance
    pub fn in_reach(&self, target: Vec2) -> bool {
        self.character.distance_to(target) <= self.attack_range
    }

    /// The strike this player would deal right now
    pub fn strike(&self) -> Hit {
        Hit {
            amount: self.character.attack_damage,
            source: self.character.position(),
        }
    }

    /// Start the strike cooldown after landing at least one hit
    pub fn finish_strike(&mut self) {
        self.character.reset_hit_refresh();
    }
}

impl Combatant for Player {
    fn character(&self) -> &Character {
        &self.character
    }

    fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    /// No resistance model: every point of damage lands
    fn take_damage(&mut self, hit: Hit, _physics: &mut PhysicsWorld) {
        let was_alive = self.is_alive();
        self.character.entity.take_damage(hit.amount);
        if was_alive && !self.is_alive() {
            info!("Player died");
        }
    }
}
