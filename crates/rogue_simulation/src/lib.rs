//! Action Rogue Simulation Core
//!
//! Gameplay-акторы на Bevy 0.16 + Rapier:
//! - ExplosiveBarrel: hit от MagicProjectile → радиальный импульс → destroy через 2 sec
//! - MagicProjectile: летит прямо, первый hit/overlap не с instigator → destroy
//!
//! Симуляция headless (MinimalPlugins). Rapier physics step, рендер и
//! debug draw добавляет клиент.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use bevy_rapier3d::plugin::{NoUserData, PhysicsSet, RapierPhysicsPlugin};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod actors;
pub mod components;
pub mod debug;
pub mod lifecycle;
pub mod logger;
pub mod physics;
pub mod scenario;

// Re-export базовых типов для удобства
pub use actors::*;
pub use components::*;
pub use debug::{spawn_debug_marker, DebugDrawConfig, DebugDrawPlugin, DebugMarker};
pub use lifecycle::{
    cancel_destroy, despawn_pending_actors, destroy_actor, schedule_destroy, DestroyAfter,
    LifecyclePlugin, PendingDestroy,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::{
    ActorBeginOverlap, ActorHit, PhysicsBridgePlugin, ProjectileMovement, RadialFalloff,
    RadialForce,
};

/// Частота FixedUpdate (gameplay таймеры, движение снарядов)
pub const FIXED_HZ: f64 = 60.0;

/// Порядок gameplay систем в PostUpdate
///
/// CollisionDispatch (после Rapier writeback) → Cleanup (деспавн уничтоженных).
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    CollisionDispatch,
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .configure_sets(
                PostUpdate,
                (
                    SimulationSet::CollisionDispatch.after(PhysicsSet::Writeback),
                    SimulationSet::Cleanup,
                )
                    .chain(),
            )
            .add_plugins((
                PhysicsBridgePlugin,
                LifecyclePlugin,
                DebugDrawPlugin,
                ActorsPlugin,
            ));

        // Seed по умолчанию, если app собран не через create_headless_app
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ));

    app
}

/// Headless App с Rapier physics step (headless бинарник, physics тесты)
///
/// Время двигается вручную: ровно один fixed tick (1/FIXED_HZ) на update.
pub fn create_physics_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins((
        TransformPlugin,
        RapierPhysicsPlugin::<NoUserData>::default(),
        SimulationPlugin,
    ))
    .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / FIXED_HZ,
    )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
