//! ExplosiveBarrel — взрывная бочка
//!
//! Физическая бочка (RigidBody::Dynamic). При hit от MagicProjectile:
//! 1. один радиальный импульс (RadialForce)
//! 2. single-fire таймер 2 sec → destroy
//!
//! Hit от чего угодно другого — только лог.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ActiveEvents, Collider, ExternalImpulse, RigidBody, Velocity};
use serde::{Deserialize, Serialize};

use crate::actors::MagicProjectile;
use crate::components::{display_name, CollisionProfile};
use crate::lifecycle::schedule_destroy;
use crate::physics::{fire_impulse, ActorHit, RadialForce, RadialImpulseTargets};

/// Задержка destroy после взрыва (секунды)
pub const BARREL_DESTROY_DELAY: f32 = 2.0;

/// Размеры цилиндра бочки (метры)
pub const BARREL_HALF_HEIGHT: f32 = 0.45;
pub const BARREL_RADIUS: f32 = 0.3;

/// Взрывная бочка
///
/// `explosion_radius` / `explosion_damage` — designer-параметры, логикой пока не читаются
/// (урона в игре нет). Радиус импульса задаётся в `RadialForce`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct ExplosiveBarrel {
    pub explosion_radius: f32,
    pub explosion_damage: f32,
    /// Взрыв срабатывает один раз: повторный hit снаряда до destroy только логируется
    #[serde(skip)]
    pub detonated: bool,
}

/// Event: бочка взорвалась (импульс выстрелил, destroy запланирован)
#[derive(Event, Debug, Clone)]
pub struct BarrelDetonated {
    pub barrel: Entity,
    /// Снаряд, вызвавший взрыв
    pub projectile: Entity,
    pub origin: Vec3,
    /// Сколько dynamic тел получили импульс
    pub bodies_affected: usize,
}

/// Spawn helper: бочка + физика + hit observer
pub fn spawn_explosive_barrel(
    commands: &mut Commands,
    position: Vec3,
    barrel: ExplosiveBarrel,
    radial_force: RadialForce,
) -> Entity {
    let profile = CollisionProfile::physics_actor();

    commands
        .spawn((
            Name::new("ExplosiveBarrel"),
            Transform::from_translation(position),
            barrel,
            radial_force,
            profile,
            // Rapier physics
            RigidBody::Dynamic,
            Collider::cylinder(BARREL_HALF_HEIGHT, BARREL_RADIUS),
            profile.solid_groups(),
            ActiveEvents::COLLISION_EVENTS,
            Velocity::zero(),
            ExternalImpulse::default(),
        ))
        .observe(on_barrel_hit)
        .id()
}

/// Observer: hit по бочке
fn on_barrel_hit(
    trigger: Trigger<ActorHit>,
    mut commands: Commands,
    mut barrels: Query<(&mut ExplosiveBarrel, &RadialForce, &Transform)>,
    projectiles: Query<(), With<MagicProjectile>>,
    names: Query<Option<&Name>>,
    mut bodies: RadialImpulseTargets,
    mut detonations: EventWriter<BarrelDetonated>,
) {
    let barrel_entity = trigger.target();
    let other = trigger.event().other;

    let other_name = match names.get(other) {
        Ok(name) => display_name(name, other),
        Err(_) => format!("{:?}", other),
    };
    crate::log(&format!(
        "ExplosiveBarrel {:?} hit by {}",
        barrel_entity, other_name
    ));

    // Взрываемся только от magic projectile
    if !projectiles.contains(other) {
        return;
    }

    let Ok((mut barrel, radial_force, transform)) = barrels.get_mut(barrel_entity) else {
        return;
    };

    if barrel.detonated {
        crate::log(&format!(
            "ExplosiveBarrel {:?} already detonated, ignoring {}",
            barrel_entity, other_name
        ));
        return;
    }
    barrel.detonated = true;

    let origin = transform.translation;
    let emitter = *radial_force;
    let bodies_affected = fire_impulse(&mut commands, &emitter, barrel_entity, origin, &mut bodies);

    schedule_destroy(&mut commands, barrel_entity, BARREL_DESTROY_DELAY);

    detonations.write(BarrelDetonated {
        barrel: barrel_entity,
        projectile: other,
        origin,
        bodies_affected,
    });

    crate::log_info(&format!(
        "💥 ExplosiveBarrel {:?} detonated by {} ({} bodies pushed, destroy in {:.1}s)",
        barrel_entity, other_name, bodies_affected, BARREL_DESTROY_DELAY
    ));
}
