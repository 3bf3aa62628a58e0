//! Тесты детерминизма
//!
//! Арена + выстрелы с одинаковым seed → идентичный мир

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rogue_simulation::scenario::{aim_and_fire, spawn_arena, Arena, ArenaSettings};
use rogue_simulation::*;

const TICK_COUNT: usize = 240;
const FIRE_TICKS: [usize; 3] = [10, 60, 120];

/// Запускает арену и возвращает snapshot Transform всех entity
fn run_simulation(seed: u64) -> Vec<u8> {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / FIXED_HZ,
        )));

    let arena = spawn_seeded_arena(&mut app);

    for tick in 0..TICK_COUNT {
        if let Some(shot) = FIRE_TICKS.iter().position(|&fire_tick| fire_tick == tick) {
            let barrel = arena.barrels[shot % arena.barrels.len()];
            aim_and_fire(app.world_mut(), &arena, barrel);
        }
        app.update();
    }

    world_snapshot::<Transform>(app.world_mut())
}

fn spawn_seeded_arena(app: &mut App) -> Arena {
    let world = app.world_mut();
    let mut rng = world
        .remove_resource::<DeterministicRng>()
        .expect("create_headless_app inserts DeterministicRng");
    let arena = spawn_arena(&mut world.commands(), &mut rng, ArenaSettings::default());
    world.insert_resource(rng);
    world.flush();
    arena
}

fn barrel_positions(seed: u64) -> Vec<Vec3> {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    let arena = spawn_seeded_arena(&mut app);
    arena
        .barrels
        .iter()
        .map(|&barrel| app.world().get::<Transform>(barrel).unwrap().translation)
        .collect()
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let snapshot1 = run_simulation(SEED);
    let snapshot2 = run_simulation(SEED);

    assert!(!snapshot1.is_empty());
    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    // Запускаем 3 раза — все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} отличается от прогона 0 (seed={})",
            i, SEED
        );
    }
}

#[test]
fn test_different_seeds_place_barrels_differently() {
    let first = barrel_positions(1);
    let second = barrel_positions(2);

    assert_eq!(first.len(), ArenaSettings::default().barrel_count);
    assert_ne!(first, second, "seed не влияет на расстановку бочек");

    // Все бочки вне минимальной дистанции от кастера
    let min_distance = ArenaSettings::default().min_barrel_distance;
    for position in first {
        assert!(Vec2::new(position.x, position.z).length() >= min_distance);
    }
}
