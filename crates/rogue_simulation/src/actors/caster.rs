//! Caster — pawn, выпускающий magic projectiles
//!
//! Event-driven (как weapon fire intent):
//! input / AI → PrimaryAttackIntent → spawn снаряда перед кастером

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, RigidBody};
use serde::{Deserialize, Serialize};

use crate::actors::{spawn_magic_projectile, ProjectileCollisionMode};
use crate::components::{CollisionProfile, Pawn};

/// Капсула pawn'а: half-height цилиндра + радиус (центр на PAWN_STAND_HEIGHT над полом)
pub const PAWN_CAPSULE_HALF_HEIGHT: f32 = 0.5;
pub const PAWN_RADIUS: f32 = 0.4;
pub const PAWN_STAND_HEIGHT: f32 = PAWN_CAPSULE_HALF_HEIGHT + PAWN_RADIUS;

/// Способность кастовать magic projectile
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct Caster {
    /// Профиль коллизий выпускаемых снарядов
    pub collision_mode: ProjectileCollisionMode,
    /// Точка спавна снаряда в локальных координатах кастера
    pub muzzle_offset: Vec3,
}

impl Default for Caster {
    fn default() -> Self {
        Self {
            collision_mode: ProjectileCollisionMode::default(),
            // Перед капсулой (forward = -Z), на высоте бочек: y = 0.9 - 0.35 = 0.55
            // над полом. Выстрел горизонтальный (кастер только поворачивается).
            muzzle_offset: Vec3::new(0.0, -0.35, -0.8),
        }
    }
}

impl Caster {
    /// Transform снаряда из Transform кастера
    pub fn muzzle_transform(&self, caster_transform: &Transform) -> Transform {
        Transform {
            translation: caster_transform.translation
                + caster_transform.rotation * self.muzzle_offset,
            rotation: caster_transform.rotation,
            ..default()
        }
    }
}

/// Event: кастер хочет выпустить снаряд
#[derive(Event, Debug, Clone, Copy)]
pub struct PrimaryAttackIntent {
    pub caster: Entity,
}

/// Event: снаряд выпущен
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileFired {
    pub caster: Entity,
    pub projectile: Entity,
}

/// System: PrimaryAttackIntent → spawn MagicProjectile (instigator = caster)
pub fn spawn_projectiles_from_intents(
    mut commands: Commands,
    mut intents: EventReader<PrimaryAttackIntent>,
    casters: Query<(&Caster, &Transform)>,
    mut fired: EventWriter<ProjectileFired>,
) {
    for intent in intents.read() {
        let Ok((caster, caster_transform)) = casters.get(intent.caster) else {
            crate::log_warning(&format!(
                "PrimaryAttackIntent from {:?} without Caster/Transform, skipped",
                intent.caster
            ));
            continue;
        };

        let projectile = spawn_magic_projectile(
            &mut commands,
            caster.muzzle_transform(caster_transform),
            Some(intent.caster),
            caster.collision_mode,
        );

        fired.write(ProjectileFired {
            caster: intent.caster,
            projectile,
        });

        crate::log(&format!(
            "Caster {:?} fired MagicProjectile {:?} ({:?})",
            intent.caster, projectile, caster.collision_mode
        ));
    }
}

/// Spawn helper: pawn-кастер (kinematic капсула)
pub fn spawn_pawn(
    commands: &mut Commands,
    name: &str,
    transform: Transform,
    caster: Caster,
) -> Entity {
    let profile = CollisionProfile::pawn();

    commands
        .spawn((
            Name::new(name.to_string()),
            transform,
            Pawn,
            caster,
            profile,
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(PAWN_CAPSULE_HALF_HEIGHT, PAWN_RADIUS),
            profile.solid_groups(),
        ))
        .id()
}
