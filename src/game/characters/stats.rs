// Per-kind stat tables
//
// Zombie kinds scale shared base stats by a fixed multiplier triple; player
// kinds pick a fixed base stat line. Both tables are closed and resolved
// once, at spawn.

use std::fmt;
use std::str::FromStr;

use crate::game::config::CombatConfig;
use crate::game::error::ConfigError;

/// Hostile agent variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZombieKind {
    Slow,
    Medium,
    Fast,
}

/// (health, speed, damage) scaling for a zombie kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    pub health: f32,
    pub speed: f32,
    pub damage: f32,
}

/// Slow zombies are the baseline brute
pub const SLOW_MULTIPLIERS: Multipliers = Multipliers {
    health: 1.0,
    speed: 0.6,
    damage: 1.5,
};

pub const MEDIUM_MULTIPLIERS: Multipliers = Multipliers {
    health: 0.8,
    speed: 1.0,
    damage: 1.0,
};

/// Fast zombies trade health for speed
pub const FAST_MULTIPLIERS: Multipliers = Multipliers {
    health: 0.5,
    speed: 1.6,
    damage: 0.8,
};

/// Stats a zombie keeps for its whole life
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZombieStats {
    pub max_health: i32,
    pub speed: i32,
    pub attack_damage: i32,
    /// Steering impulse magnitude applied each tick
    pub steering: f32,
}

impl ZombieKind {
    pub const ALL: [ZombieKind; 3] = [ZombieKind::Slow, ZombieKind::Medium, ZombieKind::Fast];

    pub fn multipliers(self) -> Multipliers {
        match self {
            ZombieKind::Slow => SLOW_MULTIPLIERS,
            ZombieKind::Medium => MEDIUM_MULTIPLIERS,
            ZombieKind::Fast => FAST_MULTIPLIERS,
        }
    }

    /// Scale the configured base stats; fractions are truncated
    pub fn stats(self, config: &CombatConfig) -> ZombieStats {
        let m = self.multipliers();
        ZombieStats {
            max_health: (config.zombie_max_health as f32 * m.health) as i32,
            speed: (config.zombie_speed as f32 * m.speed) as i32,
            attack_damage: (config.zombie_damage as f32 * m.damage) as i32,
            steering: m.speed,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ZombieKind::Slow => "slow",
            ZombieKind::Medium => "medium",
            ZombieKind::Fast => "fast",
        }
    }
}

impl fmt::Display for ZombieKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZombieKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(ZombieKind::Slow),
            "medium" => Ok(ZombieKind::Medium),
            "fast" => Ok(ZombieKind::Fast),
            _ => Err(ConfigError::UnknownZombieKind(s.to_string())),
        }
    }
}

/// Playable character variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerKind {
    Nerdy,
    Sporty,
    Heavy,
}

/// Base stat line for a player kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    pub max_health: i32,
    /// Movement speed (units/second)
    pub speed: i32,
    pub attack_damage: i32,
}

/// Hits hardest
pub const NERDY_STATS: PlayerStats = PlayerStats {
    max_health: 100,
    speed: 5,
    attack_damage: 25,
};

/// Outruns everything
pub const SPORTY_STATS: PlayerStats = PlayerStats {
    max_health: 100,
    speed: 7,
    attack_damage: 15,
};

/// Soaks damage
pub const HEAVY_STATS: PlayerStats = PlayerStats {
    max_health: 150,
    speed: 4,
    attack_damage: 20,
};

impl PlayerKind {
    pub fn stats(self) -> PlayerStats {
        match self {
            PlayerKind::Nerdy => NERDY_STATS,
            PlayerKind::Sporty => SPORTY_STATS,
            PlayerKind::Heavy => HEAVY_STATS,
        }
    }
}

impl FromStr for PlayerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nerdy" => Ok(PlayerKind::Nerdy),
            "sporty" => Ok(PlayerKind::Sporty),
            "heavy" => Ok(PlayerKind::Heavy),
            _ => Err(ConfigError::UnknownPlayerKind(s.to_string())),
        }
    }
}
