// The combat simulation
//
// Owns the physics world and every combatant, and runs one tick in a fixed
// order: physics step, contact dispatch, position sync, zombies, player,
// power-ups. Contacts raised by a step are always applied before any
// zombie looks at its melee range in that same tick.

use glam::Vec2;
use log::{debug, info};
use slotmap::SlotMap;

use crate::engine::physics::{presets, FixtureKind, FixtureTag, PhysicsWorld, RigidBodyHandle};
use crate::game::characters::{Combatant, Player, PlayerKind, Zombie, ZombieKind};
use crate::game::config::CombatConfig;
use crate::game::contact::{self, Contact};
use crate::game::error::ConfigError;
use crate::game::ids::{PowerUpId, ZombieId};
use crate::game::powerup::{PowerUp, PowerUpKind, PowerUpState};

/// Where the fight stands after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulationStatus {
    #[default]
    Running,
    /// No living zombies remain
    WaveCleared,
    /// The player is dead; terminal
    PlayerDead,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// Zombie strikes that landed on the player
    pub strikes: u32,
    /// Total damage the player took
    pub damage_taken: i32,
    /// Power-ups picked up this tick
    pub power_ups_activated: u32,
    /// Power-ups that ran out this tick
    pub power_ups_expired: u32,
    pub status: SimulationStatus,
}

pub struct Simulation {
    config: CombatConfig,
    physics: PhysicsWorld,
    player: Player,
    zombies: SlotMap<ZombieId, Zombie>,
    power_ups: SlotMap<PowerUpId, PowerUp>,
    walls: Vec<RigidBodyHandle>,
    elapsed: f32,
    tick_count: u64,
}

impl Simulation {
    /// Build a simulation with a freshly spawned player. Bad configuration
    /// is rejected here, before anything is simulated.
    pub fn new(
        config: CombatConfig,
        player_kind: PlayerKind,
        player_spawn: Vec2,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut physics = PhysicsWorld::new();
        let player = Player::spawn(player_kind, player_spawn, &config, &mut physics);

        Ok(Self {
            config,
            physics,
            player,
            zombies: SlotMap::with_key(),
            power_ups: SlotMap::with_key(),
            walls: Vec::new(),
            elapsed: 0.0,
            tick_count: 0,
        })
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// The single current player
    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Every tracked zombie, dead ones included until [`Simulation::compact`]
    pub fn zombies(&self) -> &SlotMap<ZombieId, Zombie> {
        &self.zombies
    }

    pub fn zombie(&self, id: ZombieId) -> Option<&Zombie> {
        self.zombies.get(id)
    }

    pub fn zombie_mut(&mut self, id: ZombieId) -> Option<&mut Zombie> {
        self.zombies.get_mut(id)
    }

    pub fn power_ups(&self) -> &SlotMap<PowerUpId, PowerUp> {
        &self.power_ups
    }

    pub fn power_up(&self, id: PowerUpId) -> Option<&PowerUp> {
        self.power_ups.get(id)
    }

    pub fn living_zombies(&self) -> usize {
        self.zombies.iter().filter(|(_, z)| z.is_alive()).count()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn status(&self) -> SimulationStatus {
        if !self.player.is_alive() {
            SimulationStatus::PlayerDead
        } else if self.living_zombies() == 0 {
            SimulationStatus::WaveCleared
        } else {
            SimulationStatus::Running
        }
    }

    pub fn spawn_zombie(&mut self, kind: ZombieKind, position: Vec2) -> ZombieId {
        let config = &self.config;
        let physics = &mut self.physics;
        self.zombies
            .insert_with_key(|id| Zombie::spawn(kind, position, config, physics, id))
    }

    /// Spawn a whole wave at once
    pub fn spawn_wave(&mut self, spawns: &[(ZombieKind, Vec2)]) -> Vec<ZombieId> {
        let ids: Vec<ZombieId> = spawns
            .iter()
            .map(|&(kind, position)| self.spawn_zombie(kind, position))
            .collect();
        info!("Wave of {} zombies spawned", ids.len());
        ids
    }

    pub fn spawn_power_up(&mut self, kind: PowerUpKind, position: Vec2) -> PowerUpId {
        let config = &self.config;
        let physics = &mut self.physics;
        self.power_ups
            .insert_with_key(|id| PowerUp::spawn(kind, position, config, physics, id))
    }

    /// Add static level geometry
    pub fn add_wall(&mut self, position: Vec2, half_width: f32, half_height: f32) {
        let body = self
            .physics
            .add_rigid_body(presets::wall_body(position.x, position.y));
        let owner = self.walls.len() as u64;
        self.physics.add_tagged_collider(
            presets::wall_collider(half_width, half_height),
            body,
            FixtureTag::new(FixtureKind::Wall, owner),
        );
        self.walls.push(body);
    }

    /// Advance the simulation by one tick of `delta` seconds
    pub fn tick(&mut self, delta: f32) -> TickReport {
        let mut report = TickReport::default();

        if delta > 0.0 && (self.physics.timestep() - delta).abs() > f32::EPSILON {
            self.physics.set_timestep(delta);
        }
        self.physics.step();

        let contacts = contact::dispatch(&mut self.physics);
        report.power_ups_activated = self.apply_contacts(&contacts);

        self.player.character_mut().sync_from_body(&self.physics);
        for (_, zombie) in self.zombies.iter_mut() {
            zombie.character_mut().sync_from_body(&self.physics);
        }

        for (_, zombie) in self.zombies.iter_mut() {
            if let Some(damage) = zombie.update(delta, &mut self.player, &mut self.physics) {
                report.strikes += 1;
                report.damage_taken += damage;
            }
        }

        self.player.update(delta, &mut self.physics);

        for (_, power_up) in self.power_ups.iter_mut() {
            let was_active = power_up.is_active();
            power_up.update(delta, &mut self.player);
            if was_active && !power_up.is_active() {
                report.power_ups_expired += 1;
            }
        }

        self.elapsed += delta;
        self.tick_count += 1;
        report.status = self.status();
        report
    }

    /// Apply resolved contacts. Returns how many power-ups were picked up.
    pub fn apply_contacts(&mut self, contacts: &[Contact]) -> u32 {
        let mut activated = 0;
        for contact in contacts {
            match *contact {
                Contact::MeleeBegin(id) => {
                    if let Some(zombie) = self.zombies.get_mut(id) {
                        zombie.begin_contact();
                    }
                }
                Contact::MeleeEnd(id) => {
                    if let Some(zombie) = self.zombies.get_mut(id) {
                        zombie.end_contact();
                    }
                }
                Contact::PickupTouched(id) => {
                    if !self.player.is_alive() {
                        continue;
                    }
                    let Some(power_up) = self.power_ups.get_mut(id) else {
                        continue;
                    };
                    if power_up.activate(&mut self.player) {
                        // Collected: the pickup leaves the level
                        power_up.despawn(&mut self.physics);
                        activated += 1;
                    }
                }
            }
        }
        activated
    }

    /// Player strike: hits every living zombie in reach if the player's
    /// cooldown allows. Returns the number of zombies hit.
    pub fn player_attack(&mut self) -> usize {
        if !self.player.can_strike() {
            return 0;
        }

        let hit = self.player.strike();
        let mut landed = 0;
        for (_, zombie) in self.zombies.iter_mut() {
            if zombie.is_alive() && self.player.in_reach(zombie.position()) {
                zombie.take_damage(hit, &mut self.physics);
                landed += 1;
            }
        }

        if landed > 0 {
            self.player.finish_strike();
            debug!("Player hit {} zombies for {}", landed, hit.amount);
        }
        landed
    }

    /// Take a power-up out of play, undoing its buff if it is running
    pub fn remove_power_up(&mut self, id: PowerUpId) -> bool {
        let Some(mut power_up) = self.power_ups.remove(id) else {
            return false;
        };
        power_up.deactivate(&mut self.player);
        power_up.despawn(&mut self.physics);
        true
    }

    /// Free dead zombies and spent power-ups, destroying their bodies.
    /// Returns the number of zombies removed.
    pub fn compact(&mut self) -> usize {
        let physics = &mut self.physics;
        let before = self.zombies.len();
        self.zombies.retain(|_, zombie| {
            if zombie.is_alive() {
                return true;
            }
            zombie.character_mut().despawn(physics);
            false
        });
        let removed = before - self.zombies.len();

        self.power_ups.retain(|_, power_up| {
            if power_up.state() != PowerUpState::Expired {
                return true;
            }
            power_up.despawn(physics);
            false
        });

        if removed > 0 {
            info!("Compacted {} dead zombies", removed);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::{Hit, ZombieState};

    const DT: f32 = 1.0 / 60.0;

    fn sim() -> Simulation {
        Simulation::new(CombatConfig::default(), PlayerKind::Heavy, Vec2::ZERO).unwrap()
    }

    fn arm_player(sim: &mut Simulation) {
        sim.player_mut().character_mut().set_hit_refresh(10.0);
    }

    fn kill(sim: &mut Simulation, id: ZombieId) {
        let hit = Hit {
            amount: 10_000,
            source: Vec2::ZERO,
        };
        let mut detached = PhysicsWorld::new();
        sim.zombie_mut(id).unwrap().take_damage(hit, &mut detached);
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = CombatConfig {
            stun_duration: 0.0,
            ..CombatConfig::default()
        };
        assert!(matches!(
            Simulation::new(config, PlayerKind::Nerdy, Vec2::ZERO),
            Err(ConfigError::InvalidValue {
                field: "stun_duration",
                ..
            })
        ));
    }

    #[test]
    fn test_touching_zombie_strikes_in_same_tick() {
        let mut sim = sim();
        let id = sim.spawn_zombie(ZombieKind::Slow, Vec2::new(0.8, 0.0));
        let cooldown = sim.zombie(id).unwrap().hit_cooldown();
        sim.zombie_mut(id)
            .unwrap()
            .character_mut()
            .set_hit_refresh(cooldown + 1.0);
        let before = sim.player().health();

        let report = sim.tick(DT);

        let zombie = sim.zombie(id).unwrap();
        assert!(zombie.in_melee_range());
        assert_eq!(report.strikes, 1);
        assert_eq!(sim.player().health(), before - zombie.attack_damage());
        assert_eq!(zombie.character().hit_refresh(), 0.0);
    }

    #[test]
    fn test_begin_contact_then_one_strike() {
        let mut sim = sim();
        let id = sim.spawn_zombie(ZombieKind::Medium, Vec2::new(8.0, 0.0));
        sim.zombie_mut(id)
            .unwrap()
            .character_mut()
            .set_hit_refresh(5.0);
        let before = sim.player().health();

        sim.apply_contacts(&[Contact::MeleeBegin(id)]);
        let report = sim.tick(DT);

        let damage = sim.zombie(id).unwrap().attack_damage();
        assert_eq!(report.strikes, 1);
        assert_eq!(report.damage_taken, damage);
        assert_eq!(sim.player().health(), before - damage);
    }

    #[test]
    fn test_melee_end_closes_range() {
        let mut sim = sim();
        let id = sim.spawn_zombie(ZombieKind::Medium, Vec2::new(8.0, 0.0));
        sim.zombie_mut(id)
            .unwrap()
            .character_mut()
            .set_hit_refresh(5.0);
        let before = sim.player().health();

        sim.apply_contacts(&[Contact::MeleeBegin(id), Contact::MeleeEnd(id)]);
        assert!(!sim.zombie(id).unwrap().in_melee_range());

        for _ in 0..5 {
            assert_eq!(sim.tick(DT).strikes, 0);
        }
        assert_eq!(sim.player().health(), before);
    }

    #[test]
    fn test_distant_zombie_never_strikes() {
        let mut sim = sim();
        let id = sim.spawn_zombie(ZombieKind::Fast, Vec2::new(30.0, 0.0));
        sim.zombie_mut(id)
            .unwrap()
            .character_mut()
            .set_hit_refresh(100.0);
        let before = sim.player().health();

        for _ in 0..30 {
            sim.tick(DT);
        }
        assert_eq!(sim.player().health(), before);
    }

    #[test]
    fn test_zombie_pursues_player() {
        let mut sim = sim();
        let id = sim.spawn_zombie(ZombieKind::Fast, Vec2::new(10.0, 0.0));

        for _ in 0..60 {
            sim.tick(DT);
        }

        let zombie = sim.zombie(id).unwrap();
        assert!(zombie.position().x < 10.0);
        assert_eq!(zombie.state(), ZombieState::Pursuing);
    }

    #[test]
    fn test_player_attack_hits_zombies_in_reach() {
        let mut sim = sim();
        let near = sim.spawn_zombie(ZombieKind::Medium, Vec2::new(1.2, 0.0));
        let far = sim.spawn_zombie(ZombieKind::Medium, Vec2::new(9.0, 0.0));
        sim.tick(DT);
        arm_player(&mut sim);
        let damage = sim.player().attack_damage();
        let near_health = sim.zombie(near).unwrap().health();

        assert_eq!(sim.player_attack(), 1);

        let hit = sim.zombie(near).unwrap();
        assert_eq!(hit.health(), near_health - damage);
        assert_eq!(hit.stun_timer(), sim.config().stun_duration);
        assert_eq!(sim.zombie(far).unwrap().stun_timer(), 0.0);

        // Cooldown started
        assert_eq!(sim.player_attack(), 0);
    }

    #[test]
    fn test_dead_zombies_stay_until_compaction() {
        let mut sim = sim();
        let id = sim.spawn_zombie(ZombieKind::Fast, Vec2::new(1.0, 0.0));
        sim.tick(DT);
        let bodies = sim.physics().body_count();

        for _ in 0..10 {
            arm_player(&mut sim);
            sim.player_attack();
        }
        assert!(!sim.zombie(id).unwrap().is_alive());
        assert_eq!(sim.zombies().len(), 1);
        assert_eq!(sim.status(), SimulationStatus::WaveCleared);

        assert_eq!(sim.compact(), 1);
        assert!(sim.zombie(id).is_none());
        assert_eq!(sim.physics().body_count(), bodies - 1);
        assert_eq!(sim.compact(), 0);
    }

    #[test]
    fn test_pickup_on_touch_and_expiry() {
        let mut sim = sim();
        sim.spawn_zombie(ZombieKind::Slow, Vec2::new(50.0, 50.0));
        let before = sim.player().attack_damage();
        let id = sim.spawn_power_up(PowerUpKind::Strength, Vec2::ZERO);

        let report = sim.tick(DT);
        assert_eq!(report.power_ups_activated, 1);
        assert!(sim.power_up(id).unwrap().is_active());
        assert!(sim.power_up(id).unwrap().body().is_none());
        assert_eq!(sim.player().attack_damage(), before + 10);

        let duration = sim.config().power_up_duration;
        let mut expired = 0;
        for _ in 0..((duration / DT) as usize + 10) {
            expired += sim.tick(DT).power_ups_expired;
        }
        assert_eq!(expired, 1);
        assert_eq!(sim.player().attack_damage(), before);
        assert_eq!(sim.power_up(id).unwrap().state(), PowerUpState::Expired);
    }

    #[test]
    fn test_remove_active_power_up_reverts() {
        let mut sim = sim();
        let before = sim.player().speed();
        let id = sim.spawn_power_up(PowerUpKind::Haste, Vec2::new(20.0, 0.0));
        sim.apply_contacts(&[Contact::PickupTouched(id)]);
        assert!(sim.player().speed() > before);

        assert!(sim.remove_power_up(id));
        assert_eq!(sim.player().speed(), before);
        assert!(!sim.remove_power_up(id));
    }

    #[test]
    fn test_player_death_status() {
        let mut sim = sim();
        sim.spawn_zombie(ZombieKind::Slow, Vec2::new(20.0, 0.0));
        let hit = crate::game::characters::Hit {
            amount: 10_000,
            source: Vec2::ZERO,
        };
        let mut physics = PhysicsWorld::new();
        sim.player_mut().take_damage(hit, &mut physics);

        assert_eq!(sim.tick(DT).status, SimulationStatus::PlayerDead);
    }

    #[test]
    fn test_contacts_for_unknown_slots_are_ignored() {
        let mut sim = sim();
        assert_eq!(
            sim.apply_contacts(&[
                Contact::MeleeBegin(ZombieId::default()),
                Contact::PickupTouched(PowerUpId::default())
            ]),
            0
        );
    }

    #[test]
    fn test_compacted_slots_are_reused_without_aliasing() {
        let mut sim = sim();
        let mut stale = Vec::new();

        for _ in 0..100 {
            let id = sim.spawn_zombie(ZombieKind::Slow, Vec2::new(20.0, 0.0));
            kill(&mut sim, id);
            assert_eq!(sim.compact(), 1);
            stale.push(id);
        }
        assert!(sim.zombies().capacity() < 100);
        assert_eq!(sim.physics().body_count(), 1);

        let fresh = sim.spawn_zombie(ZombieKind::Slow, Vec2::new(20.0, 0.0));
        let contacts: Vec<Contact> = stale.iter().map(|&id| Contact::MeleeBegin(id)).collect();
        sim.apply_contacts(&contacts);

        assert!(stale.iter().all(|&id| sim.zombie(id).is_none()));
        assert!(!sim.zombie(fresh).unwrap().in_melee_range());
    }
}
