//! Combat and physics core for a top-down zombie survival game.
//!
//! Zombies pursue the player with physics impulses, strike on contact and
//! are knocked back and stunned when hit. Timed power-ups buff the player.
//! Rendering, audio and input devices live outside this crate.

pub mod core;
pub mod engine;
pub mod game;
