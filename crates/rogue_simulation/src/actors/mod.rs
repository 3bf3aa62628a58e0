//! Gameplay акторы
//!
//! - explosive_barrel: бочка, взрывается от magic projectile
//! - magic_projectile: снаряд заклинания (blocking / overlap / mixed профили)
//! - caster: pawn, выпускающий снаряды
//! - level: static геометрия уровня
//!
//! Обработчики коллизий — entity observers (регистрируются в spawn helpers).

use bevy::prelude::*;

pub mod caster;
pub mod explosive_barrel;
pub mod level;
pub mod magic_projectile;

pub use caster::{
    spawn_pawn, spawn_projectiles_from_intents, Caster, PrimaryAttackIntent, ProjectileFired,
    PAWN_CAPSULE_HALF_HEIGHT, PAWN_RADIUS, PAWN_STAND_HEIGHT,
};
pub use explosive_barrel::{
    spawn_explosive_barrel, BarrelDetonated, ExplosiveBarrel, BARREL_DESTROY_DELAY,
    BARREL_HALF_HEIGHT, BARREL_RADIUS,
};
pub use level::spawn_world_geometry;
pub use magic_projectile::{
    spawn_magic_projectile, ImpactKind, MagicProjectile, ParticleEffect,
    ProjectileCollisionMode, ProjectileImpacted, MAGIC_TRAIL_TEMPLATE, PROJECTILE_RADIUS,
};

/// Actors Plugin
///
/// Регистрирует события акторов и систему каста.
/// Hit/overlap логика живёт в observers, не в schedule.
pub struct ActorsPlugin;

impl Plugin for ActorsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<BarrelDetonated>()
            .add_event::<ProjectileImpacted>()
            .add_event::<PrimaryAttackIntent>()
            .add_event::<ProjectileFired>();

        app.register_type::<ExplosiveBarrel>()
            .register_type::<MagicProjectile>()
            .register_type::<ParticleEffect>()
            .register_type::<Caster>();

        app.add_systems(Update, spawn_projectiles_from_intents);
    }
}
