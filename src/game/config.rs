// Combat tuning
//
// Every constant the combat core reads lives here so a level or a test can
// swap in its own values. Per-kind stat tables stay in `characters::stats`.

use super::error::ConfigError;

/// Tunable values for the combat simulation
#[derive(Debug, Clone, PartialEq)]
pub struct CombatConfig {
    // Zombie base stats (scaled by the per-kind multipliers at spawn)
    /// Base movement speed (units/second)
    pub zombie_speed: i32,
    /// Base maximum health
    pub zombie_max_health: i32,
    /// Base melee damage
    pub zombie_damage: i32,
    /// Seconds between zombie melee strikes
    pub zombie_hit_cooldown: f32,

    // Reaction to being hit
    /// Seconds a zombie is stunned after taking damage
    pub stun_duration: f32,
    /// Knockback impulse per unit of body mass
    pub knockback_coefficient: f32,

    // Zombie body
    pub zombie_radius: f32,
    pub zombie_density: f32,
    pub zombie_damping: f32,

    // Player body and melee
    pub player_radius: f32,
    pub player_density: f32,
    pub player_damping: f32,
    /// Centre-to-centre reach of the player's strike
    pub player_attack_range: f32,
    /// Seconds between player strikes
    pub player_hit_cooldown: f32,

    // Power-ups
    pub pickup_radius: f32,
    /// Seconds a power-up stays active once picked up
    pub power_up_duration: f32,
    /// Attack damage granted by damage buffs
    pub power_up_damage_bonus: i32,
    /// Speed granted by speed buffs
    pub power_up_speed_bonus: i32,
}

/// Default tuning, balanced for waves of a dozen or so zombies
pub const DEFAULT_CONFIG: CombatConfig = CombatConfig {
    zombie_speed: 3,
    zombie_max_health: 100,
    zombie_damage: 10,
    zombie_hit_cooldown: 1.0,

    stun_duration: 0.5,
    knockback_coefficient: 8.0,

    zombie_radius: 0.5,
    zombie_density: 10.0,
    zombie_damping: 5.0,

    player_radius: 0.5,
    player_density: 1.0,
    player_damping: 10.0,
    player_attack_range: 1.5,
    player_hit_cooldown: 0.5,

    pickup_radius: 0.5,
    power_up_duration: 10.0,
    power_up_damage_bonus: 10,
    power_up_speed_bonus: 2,
};

impl Default for CombatConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl CombatConfig {
    /// Check every value is usable, reporting the first bad one
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("zombie_hit_cooldown", self.zombie_hit_cooldown),
            ("stun_duration", self.stun_duration),
            ("zombie_radius", self.zombie_radius),
            ("zombie_density", self.zombie_density),
            ("player_radius", self.player_radius),
            ("player_density", self.player_density),
            ("player_attack_range", self.player_attack_range),
            ("player_hit_cooldown", self.player_hit_cooldown),
            ("pickup_radius", self.pickup_radius),
            ("power_up_duration", self.power_up_duration),
            ("zombie_max_health", self.zombie_max_health as f32),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        let non_negative = [
            ("zombie_speed", self.zombie_speed as f32),
            ("zombie_damage", self.zombie_damage as f32),
            ("knockback_coefficient", self.knockback_coefficient),
            ("zombie_damping", self.zombie_damping),
            ("player_damping", self.player_damping),
            ("power_up_damage_bonus", self.power_up_damage_bonus as f32),
            ("power_up_speed_bonus", self.power_up_speed_bonus as f32),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        Ok(())
    }
}
