// Character system
//
// This module contains everything that fights:
// - Character base (cooldowns, physics body) and the Combatant trait
// - Zombies and their stun/pursuit state machine
// - The player
// - Per-kind stat tables

pub mod character;
pub mod player;
pub mod state;
pub mod stats;
pub mod zombie;

// Re-export commonly used types
pub use character::{Character, Combatant, Hit};
pub use player::Player;
pub use state::ZombieState;
pub use stats::{Multipliers, PlayerKind, PlayerStats, ZombieKind, ZombieStats};
pub use zombie::Zombie;
