// Hostile agents
//
// A zombie chases the player with steering impulses, strikes while it is
// touching the player, and gets knocked back and stunned whenever it is
// hit. Melee range comes from physics contact events only; there is no
// per-tick distance check.

use glam::Vec2;
use log::{debug, info};

use super::character::{Character, Combatant, Hit};
use super::player::Player;
use super::state::ZombieState;
use super::stats::ZombieKind;
use crate::core::math::{direction_or_zero, facing_angle};
use crate::engine::physics::{presets, FixtureKind, FixtureTag, PhysicsWorld};
use crate::game::ids::{to_owner, ZombieId};
use crate::game::config::CombatConfig;
use crate::game::entity::Entity;

#[derive(Debug)]
pub struct Zombie {
    character: Character,
    kind: ZombieKind,
    /// Steering impulse per tick, from the kind's speed multiplier
    steering: f32,
    hit_cooldown: f32,
    stun_duration: f32,
    knockback_coefficient: f32,
    /// Seconds of stun left
    stun_timer: f32,
    /// Open contacts with the player's fixture
    melee_contacts: u32,
}

impl Zombie {
    /// Create a zombie without a physics body. Kind multipliers are applied
    /// here, once.
    pub fn new(kind: ZombieKind, position: Vec2, config: &CombatConfig) -> Self {
        let stats = kind.stats(config);
        let entity = Entity::new(position, 0.0, config.zombie_radius, stats.max_health);
        Self {
            character: Character::new(entity, stats.speed, stats.attack_damage),
            kind,
            steering: stats.steering,
            hit_cooldown: config.zombie_hit_cooldown,
            stun_duration: config.stun_duration,
            knockback_coefficient: config.knockback_coefficient,
            stun_timer: 0.0,
            melee_contacts: 0,
        }
    }

    /// Create a zombie and its body, tagging the fixture with `id` so
    /// contacts find their way back to it
    pub fn spawn(
        kind: ZombieKind,
        position: Vec2,
        config: &CombatConfig,
        physics: &mut PhysicsWorld,
        id: ZombieId,
    ) -> Self {
        let mut zombie = Self::new(kind, position, config);

        let body = presets::zombie_body(position.x, position.y, config.zombie_damping);
        let body_handle = physics.add_rigid_body(body);
        physics.add_tagged_collider(
            presets::zombie_collider(config.zombie_radius, config.zombie_density),
            body_handle,
            FixtureTag::new(FixtureKind::Zombie, to_owner(id)),
        );
        zombie.character.attach_body(physics, body_handle);

        debug!("Spawned {} zombie {:?} at {}", kind, id, position);
        zombie
    }

    pub fn kind(&self) -> ZombieKind {
        self.kind
    }

    pub fn state(&self) -> ZombieState {
        ZombieState::from_parts(self.is_alive(), self.stun_timer)
    }

    pub fn stun_timer(&self) -> f32 {
        self.stun_timer
    }

    pub fn attack_damage(&self) -> i32 {
        self.character.attack_damage
    }

    pub fn hit_cooldown(&self) -> f32 {
        self.hit_cooldown
    }

    /// True while at least one contact with the player is open
    pub fn in_melee_range(&self) -> bool {
        self.melee_contacts > 0
    }

    pub fn melee_contacts(&self) -> u32 {
        self.melee_contacts
    }

    /// The player's fixture started touching this zombie
    pub fn begin_contact(&mut self) {
        self.melee_contacts += 1;
    }

    /// The player's fixture stopped touching this zombie
    pub fn end_contact(&mut self) {
        self.melee_contacts = self.melee_contacts.saturating_sub(1);
    }

    /// Per-tick update. Returns the damage dealt to the player this tick,
    /// if any.
    pub fn update(
        &mut self,
        delta: f32,
        player: &mut Player,
        physics: &mut PhysicsWorld,
    ) -> Option<i32> {
        let state = self.state();
        if state == ZombieState::Dead {
            return None;
        }

        self.character.update(delta);

        if !state.can_move() {
            self.stun_timer -= delta;
            return None;
        }

        let to_player = self.character.vector_to(player.position());
        self.character
            .apply_impulse(physics, direction_or_zero(to_player) * self.steering);
        if to_player != Vec2::ZERO {
            self.character.entity.rotation = facing_angle(to_player);
        }

        if state.can_attack()
            && self.in_melee_range()
            && player.is_alive()
            && self.character.cooldown_ready(self.hit_cooldown)
        {
            let hit = Hit {
                amount: self.character.attack_damage,
                source: self.character.position(),
            };
            player.take_damage(hit, physics);
            self.character.reset_hit_refresh();
            return Some(hit.amount);
        }

        None
    }
}

impl Combatant for Zombie {
    fn character(&self) -> &Character {
        &self.character
    }

    fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    /// Knock the zombie away from the attacker, (re)start the stun, then
    /// apply the damage. Hits on a dead zombie are ignored.
    fn take_damage(&mut self, hit: Hit, physics: &mut PhysicsWorld) {
        if !self.state().can_be_hit() {
            return;
        }

        let towards_attacker = direction_or_zero(self.character.vector_to(hit.source));
        let mass = self.character.mass(physics);
        self.character.apply_impulse(
            physics,
            towards_attacker * (-self.knockback_coefficient * mass),
        );

        // Reset, never extend
        self.stun_timer = self.stun_duration;

        self.character.entity.take_damage(hit.amount);
        if !self.is_alive() {
            info!("{} zombie died", self.kind);
        }
    }
}
