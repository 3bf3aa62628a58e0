//! Physics module
//!
//! Rapier владеет collision detection и rigid body step (клиент добавляет
//! RapierPhysicsPlugin). Здесь — то, чего в Rapier нет:
//! - events: бридж CollisionEvent → ActorHit / ActorBeginOverlap
//! - radial_force: one-shot радиальный импульс
//! - projectile_movement: движение снаряда

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use crate::SimulationSet;

pub mod events;
pub mod projectile_movement;
pub mod radial_force;

// Re-export основных типов
pub use events::{dispatch_collision_events, resolve_actor, ActorBeginOverlap, ActorHit};
pub use projectile_movement::{integrate_projectile_movement, ProjectileMovement, WORLD_GRAVITY};
pub use radial_force::{fire_impulse, RadialFalloff, RadialForce, RadialImpulseTargets};

/// Physics bridge plugin
///
/// CollisionEvent регистрируем сами: headless симуляция работает и без
/// RapierPhysicsPlugin (события тогда приходят из тестов).
pub struct PhysicsBridgePlugin;

impl Plugin for PhysicsBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CollisionEvent>()
            .register_type::<ProjectileMovement>()
            .register_type::<RadialForce>();

        app.add_systems(FixedUpdate, integrate_projectile_movement);

        // После Rapier writeback: события текущего step уже записаны
        app.add_systems(
            PostUpdate,
            dispatch_collision_events.in_set(SimulationSet::CollisionDispatch),
        );
    }
}
