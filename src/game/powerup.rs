// Timed power-ups
//
// A power-up applies an additive stat delta to the player when activated
// and removes exactly that delta when it runs out or is taken away, so a
// full cycle always leaves the player's stats where they started.

use glam::Vec2;
use log::{debug, info};

use crate::engine::physics::{presets, FixtureKind, FixtureTag, PhysicsWorld, RigidBodyHandle};
use crate::game::ids::{to_owner, PowerUpId};
use crate::game::characters::{Combatant, Player};
use crate::game::config::CombatConfig;

/// Buff variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Extra attack damage
    Strength,
    /// Extra movement speed
    Haste,
    /// Both at once
    Frenzy,
}

impl PowerUpKind {
    /// The stat change this kind grants
    pub fn effect(self, config: &CombatConfig) -> StatDelta {
        match self {
            PowerUpKind::Strength => StatDelta {
                attack_damage: config.power_up_damage_bonus,
                speed: 0,
            },
            PowerUpKind::Haste => StatDelta {
                attack_damage: 0,
                speed: config.power_up_speed_bonus,
            },
            PowerUpKind::Frenzy => StatDelta {
                attack_damage: config.power_up_damage_bonus,
                speed: config.power_up_speed_bonus,
            },
        }
    }
}

/// Additive change to the player's stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatDelta {
    pub attack_damage: i32,
    pub speed: i32,
}

impl StatDelta {
    fn apply(self, player: &mut Player) {
        let character = player.character_mut();
        character.attack_damage += self.attack_damage;
        character.speed += self.speed;
    }

    fn revert(self, player: &mut Player) {
        let character = player.character_mut();
        character.attack_damage -= self.attack_damage;
        character.speed -= self.speed;
    }
}

/// Lifecycle of a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PowerUpState {
    /// Waiting on the ground
    #[default]
    Inactive,
    /// Picked up and counting down
    Active,
    /// Spent; terminal
    Expired,
}

#[derive(Debug)]
pub struct PowerUp {
    kind: PowerUpKind,
    state: PowerUpState,
    /// Seconds left; only counts down while active
    time_remaining: f32,
    effect: StatDelta,
    position: Vec2,
    body: Option<RigidBodyHandle>,
}

impl PowerUp {
    /// Create a power-up without a pickup body
    pub fn new(kind: PowerUpKind, position: Vec2, config: &CombatConfig) -> Self {
        Self::with_duration(kind, position, config.power_up_duration, config)
    }

    pub fn with_duration(
        kind: PowerUpKind,
        position: Vec2,
        duration: f32,
        config: &CombatConfig,
    ) -> Self {
        Self {
            kind,
            state: PowerUpState::Inactive,
            time_remaining: duration,
            effect: kind.effect(config),
            position,
            body: None,
        }
    }

    /// Create a power-up with a sensor body the player can walk into
    pub fn spawn(
        kind: PowerUpKind,
        position: Vec2,
        config: &CombatConfig,
        physics: &mut PhysicsWorld,
        id: PowerUpId,
    ) -> Self {
        let mut power_up = Self::new(kind, position, config);

        let body_handle = physics.add_rigid_body(presets::pickup_body(position.x, position.y));
        physics.add_tagged_collider(
            presets::pickup_collider(config.pickup_radius),
            body_handle,
            FixtureTag::new(FixtureKind::PowerUp, to_owner(id)),
        );
        power_up.body = Some(body_handle);

        debug!("Spawned {:?} power-up {:?} at {}", kind, id, position);
        power_up
    }

    pub fn kind(&self) -> PowerUpKind {
        self.kind
    }

    pub fn state(&self) -> PowerUpState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == PowerUpState::Active
    }

    pub fn time_remaining(&self) -> f32 {
        self.time_remaining
    }

    pub fn effect(&self) -> StatDelta {
        self.effect
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Apply the buff. Only an inactive power-up can be activated.
    pub fn activate(&mut self, player: &mut Player) -> bool {
        if self.state != PowerUpState::Inactive {
            return false;
        }
        self.state = PowerUpState::Active;
        self.effect.apply(player);
        info!(
            "{:?} activated for {:.1}s ({:?})",
            self.kind, self.time_remaining, self.effect
        );
        true
    }

    /// Count down while active; expire once the time goes below zero
    pub fn update(&mut self, delta: f32, player: &mut Player) {
        if self.state != PowerUpState::Active {
            return;
        }
        self.time_remaining -= delta;
        if self.time_remaining < 0.0 {
            self.deactivate(player);
        }
    }

    /// Remove the buff. Only an active power-up can be deactivated.
    pub fn deactivate(&mut self, player: &mut Player) -> bool {
        if self.state != PowerUpState::Active {
            return false;
        }
        self.state = PowerUpState::Expired;
        self.effect.revert(player);
        info!("{:?} expired", self.kind);
        true
    }

    /// Drop the pickup body once it has been collected or removed
    pub fn despawn(&mut self, physics: &mut PhysicsWorld) -> bool {
        match self.body.take() {
            Some(handle) => physics.remove_rigid_body(handle),
            None => false,
        }
    }

    pub fn body(&self) -> Option<RigidBodyHandle> {
        self.body
    }
}
