// Game modules: combatants, power-ups, contact routing and the simulation

pub mod characters;
pub mod config;
pub mod contact;
pub mod entity;
pub mod error;
pub mod ids;
pub mod powerup;
pub mod simulation;

pub use config::{CombatConfig, DEFAULT_CONFIG};
pub use contact::Contact;
pub use error::ConfigError;
pub use ids::{PowerUpId, ZombieId};
pub use powerup::{PowerUp, PowerUpKind, PowerUpState, StatDelta};
pub use simulation::{Simulation, SimulationStatus, TickReport};
