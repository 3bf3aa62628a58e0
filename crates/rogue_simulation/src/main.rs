//! Headless симуляция Action Rogue
//!
//! Арена + Rapier physics без рендера: кастер по очереди стреляет в бочки,
//! в конце — сводка взрывов и попаданий.

use bevy::prelude::*;
use rogue_simulation::scenario::{aim_and_fire, spawn_arena, ArenaSettings};
use rogue_simulation::{
    create_physics_app, BarrelDetonated, DeterministicRng, ProjectileImpacted,
};

/// Пауза между выстрелами (тики)
const FIRE_INTERVAL_TICKS: usize = 45;
const TOTAL_TICKS: usize = 900;

#[derive(Resource, Default)]
struct Tally {
    detonations: usize,
    impacts: usize,
}

fn count_detonations(mut events: EventReader<BarrelDetonated>, mut tally: ResMut<Tally>) {
    tally.detonations += events.read().count();
}

fn count_impacts(mut events: EventReader<ProjectileImpacted>, mut tally: ResMut<Tally>) {
    tally.impacts += events.read().count();
}

fn main() {
    let seed = 42;
    println!("Starting Action Rogue headless simulation (seed: {})", seed);

    let mut app = create_physics_app(seed);
    app.init_resource::<Tally>()
        .add_systems(Update, (count_detonations, count_impacts));

    let arena = {
        let world = app.world_mut();
        let mut rng = world
            .remove_resource::<DeterministicRng>()
            .unwrap_or_else(|| DeterministicRng::new(seed));
        let arena = spawn_arena(&mut world.commands(), &mut rng, ArenaSettings::default());
        world.insert_resource(rng);
        world.flush();
        arena
    };
    app.insert_resource(arena.clone());

    let mut next_target = 0;
    for tick in 0..TOTAL_TICKS {
        if tick % FIRE_INTERVAL_TICKS == 0 && next_target < arena.barrels.len() {
            aim_and_fire(app.world_mut(), &arena, arena.barrels[next_target]);
            next_target += 1;
        }

        app.update();

        if tick % 100 == 0 {
            let entity_count = app.world().entities().len();
            println!("Tick {}: {} entities", tick, entity_count);
        }
    }

    let tally = app.world().resource::<Tally>();
    println!(
        "Simulation complete! detonations={} projectile impacts={}",
        tally.detonations, tally.impacts
    );
}
