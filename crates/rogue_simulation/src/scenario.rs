//! Demo arena: пол, стены, кастер и бочки в seeded случайных позициях
//!
//! Используется headless бинарником и клиентом.

use bevy::prelude::*;
use rand::Rng;

use crate::actors::{
    spawn_explosive_barrel, spawn_pawn, spawn_world_geometry, Caster, ExplosiveBarrel,
    PrimaryAttackIntent, BARREL_HALF_HEIGHT, PAWN_STAND_HEIGHT,
};
use crate::physics::RadialForce;
use crate::DeterministicRng;

/// Параметры арены
#[derive(Debug, Clone, Copy)]
pub struct ArenaSettings {
    pub barrel_count: usize,
    /// Половина стороны квадратной арены (метры)
    pub half_size: f32,
    /// Минимальная дистанция бочек от кастера
    pub min_barrel_distance: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            barrel_count: 6,
            half_size: 12.0,
            min_barrel_distance: 4.0,
        }
    }
}

/// Заспавненная арена
#[derive(Resource, Debug, Clone)]
pub struct Arena {
    pub caster: Entity,
    pub barrels: Vec<Entity>,
}

pub fn spawn_arena(
    commands: &mut Commands,
    rng: &mut DeterministicRng,
    settings: ArenaSettings,
) -> Arena {
    let half = settings.half_size;

    // Пол (верх на y=0) + 4 стены
    spawn_world_geometry(
        commands,
        "Floor",
        Transform::from_xyz(0.0, -0.5, 0.0),
        Vec3::new(half, 0.5, half),
    );
    for (name, position, half_extents) in [
        ("WallNorth", Vec3::new(0.0, 1.0, -half), Vec3::new(half, 1.0, 0.25)),
        ("WallSouth", Vec3::new(0.0, 1.0, half), Vec3::new(half, 1.0, 0.25)),
        ("WallWest", Vec3::new(-half, 1.0, 0.0), Vec3::new(0.25, 1.0, half)),
        ("WallEast", Vec3::new(half, 1.0, 0.0), Vec3::new(0.25, 1.0, half)),
    ] {
        spawn_world_geometry(commands, name, Transform::from_translation(position), half_extents);
    }

    let caster = spawn_pawn(
        commands,
        "Caster",
        Transform::from_xyz(0.0, PAWN_STAND_HEIGHT, 0.0),
        Caster::default(),
    );

    let spread = half - 1.0;
    let mut barrels = Vec::with_capacity(settings.barrel_count);
    while barrels.len() < settings.barrel_count {
        let x = rng.rng.gen_range(-spread..spread);
        let z = rng.rng.gen_range(-spread..spread);
        let position = Vec3::new(x, BARREL_HALF_HEIGHT, z);

        if Vec2::new(position.x, position.z).length() < settings.min_barrel_distance {
            continue;
        }

        barrels.push(spawn_explosive_barrel(
            commands,
            position,
            ExplosiveBarrel::default(),
            RadialForce::default(),
        ));
    }

    crate::log_info(&format!(
        "Arena spawned: seed={} barrels={} half_size={}",
        rng.seed,
        barrels.len(),
        half
    ));

    Arena { caster, barrels }
}

/// Развернуть кастера к бочке и отправить PrimaryAttackIntent
///
/// false — бочки уже нет (снесло соседним взрывом), выстрела не было.
pub fn aim_and_fire(world: &mut World, arena: &Arena, barrel: Entity) -> bool {
    let Some(target) = world.get::<Transform>(barrel).map(|t| t.translation) else {
        return false;
    };

    if let Some(mut caster_transform) = world.get_mut::<Transform>(arena.caster) {
        face_towards(&mut caster_transform, target);
    }

    world.send_event(PrimaryAttackIntent {
        caster: arena.caster,
    });
    true
}

/// Развернуть кастера лицом к цели (только yaw)
///
/// Снаряд летит горизонтально на высоте muzzle (см. `Caster::default`),
/// эта линия огня проходит через бочки, стоящие на полу.
pub fn face_towards(caster_transform: &mut Transform, target: Vec3) {
    let mut flat_target = target;
    flat_target.y = caster_transform.translation.y;

    if flat_target.distance_squared(caster_transform.translation) > f32::EPSILON {
        caster_transform.look_at(flat_target, Vec3::Y);
    }
}
