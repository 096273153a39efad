use std::time::Duration;

use anyhow::Result;
use glam::Vec2;
use log::info;

use horde_survival::core::math::direction_or_zero;
use horde_survival::engine::game_loop::{GameLoop, FIXED_TIMESTEP};
use horde_survival::game::characters::{Combatant, PlayerKind, ZombieKind};
use horde_survival::game::{CombatConfig, PowerUpKind, Simulation, SimulationStatus};

/// Give up on a wave that takes longer than this (simulated seconds)
const MAX_SIMULATED_SECS: f32 = 180.0;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let player_kind: PlayerKind = match std::env::args().nth(1) {
        Some(name) => name.parse()?,
        None => PlayerKind::Sporty,
    };

    info!("Starting Horde Survival as {:?}...", player_kind);

    let mut sim = Simulation::new(CombatConfig::default(), player_kind, Vec2::ZERO)?;
    sim.add_wall(Vec2::new(0.0, 12.0), 12.0, 0.5);
    sim.add_wall(Vec2::new(0.0, -12.0), 12.0, 0.5);

    let wave: Vec<(ZombieKind, Vec2)> = ZombieKind::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, &kind)| {
            (0..3).map(move |j| {
                let angle = (i * 3 + j) as f32 * std::f32::consts::TAU / 9.0;
                (kind, Vec2::from_angle(angle) * 8.0)
            })
        })
        .collect();
    sim.spawn_wave(&wave);
    sim.spawn_power_up(PowerUpKind::Frenzy, Vec2::new(2.0, 0.0));

    // Headless: feed the loop exactly one fixed step per frame
    let mut game_loop = GameLoop::new();
    let frame = Duration::from_micros(16_667);
    let mut status = SimulationStatus::Running;

    while status == SimulationStatus::Running && game_loop.simulated_secs() < MAX_SIMULATED_SECS {
        for _ in 0..game_loop.advance(frame) {
            steer_player(&mut sim);
            sim.player_attack();

            let report = sim.tick(FIXED_TIMESTEP);
            if report.damage_taken > 0 {
                info!(
                    "Player took {} damage, {} health left",
                    report.damage_taken,
                    sim.player().health()
                );
            }
            status = report.status;
        }

        if game_loop.tick_count() % 60 == 0 {
            sim.compact();
        }
    }

    match status {
        SimulationStatus::WaveCleared => info!(
            "Wave cleared in {:.1}s with {} health left",
            sim.elapsed(),
            sim.player().health()
        ),
        SimulationStatus::PlayerDead => info!(
            "Player fell after {:.1}s, {} zombies still standing",
            sim.elapsed(),
            sim.living_zombies()
        ),
        SimulationStatus::Running => info!(
            "Stopped after {:.1}s with {} zombies left",
            sim.elapsed(),
            sim.living_zombies()
        ),
    }

    Ok(())
}

/// Walk towards the closest living zombie
fn steer_player(sim: &mut Simulation) {
    let position = sim.player().position();
    let target = sim
        .zombies()
        .iter()
        .filter(|(_, zombie)| zombie.is_alive())
        .map(|(_, zombie)| zombie.position())
        .min_by(|a, b| a.distance_squared(position).total_cmp(&b.distance_squared(position)));

    let intent = match target {
        Some(target) if !sim.player().in_reach(target) => direction_or_zero(target - position),
        _ => Vec2::ZERO,
    };
    sim.player_mut().set_move_intent(intent);
}
