//! Radial force emitter — one-shot радиальный импульс
//!
//! Rapier не имеет radial force, поэтому считаем импульс сами:
//! - направление: origin → центр тела (ноль если совпадают)
//! - величина: impulse_strength × falloff(distance)
//! - только `RigidBody::Dynamic` в радиусе (kinematic/fixed не двигаются)
//!
//! `impulse_vel_change = true` → прямое изменение `Velocity::linvel` (масса игнорируется),
//! иначе импульс копится в `ExternalImpulse` (Rapier применит и сбросит на следующем step).

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, RigidBody, Velocity};
use serde::{Deserialize, Serialize};

/// Затухание импульса с расстоянием
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum RadialFalloff {
    /// Полная сила во всём радиусе
    #[default]
    Constant,
    /// Линейно от полной силы в центре до нуля на границе
    Linear,
}

/// Radial force emitter (прикреплён к актору, origin = Transform актора)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct RadialForce {
    /// Радиус действия (метры)
    pub radius: f32,
    /// Сила импульса (м/с при vel_change, Н·с иначе)
    pub impulse_strength: f32,
    /// Импульс = изменение скорости (масса игнорируется)
    pub impulse_vel_change: bool,
    pub falloff: RadialFalloff,
    /// Не толкать тело самого владельца
    pub ignore_owning_actor: bool,
}

impl Default for RadialForce {
    fn default() -> Self {
        Self {
            radius: 6.0,
            impulse_strength: 25.0,
            impulse_vel_change: true,
            falloff: RadialFalloff::Constant,
            ignore_owning_actor: false,
        }
    }
}

impl RadialForce {
    /// Импульс для тела в `body_position` (None — вне радиуса)
    pub fn impulse_at(&self, origin: Vec3, body_position: Vec3) -> Option<Vec3> {
        let offset = body_position - origin;
        let distance = offset.length();

        if distance > self.radius {
            return None;
        }

        let scale = match self.falloff {
            RadialFalloff::Constant => 1.0,
            RadialFalloff::Linear => {
                if self.radius > 0.0 {
                    1.0 - distance / self.radius
                } else {
                    0.0
                }
            }
        };

        Some(offset.normalize_or_zero() * self.impulse_strength * scale)
    }
}

/// Тела, на которые может подействовать радиальный импульс
pub type RadialImpulseTargets<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static Transform,
        &'static RigidBody,
        Option<&'static mut Velocity>,
        Option<&'static mut ExternalImpulse>,
    ),
>;

/// Выстрелить импульс один раз. Возвращает число затронутых тел.
pub fn fire_impulse(
    commands: &mut Commands,
    emitter: &RadialForce,
    owner: Entity,
    origin: Vec3,
    bodies: &mut RadialImpulseTargets,
) -> usize {
    let mut affected = 0;

    for (entity, transform, body, velocity, external) in bodies.iter_mut() {
        if !matches!(body, RigidBody::Dynamic) {
            continue;
        }
        if emitter.ignore_owning_actor && entity == owner {
            continue;
        }

        let Some(impulse) = emitter.impulse_at(origin, transform.translation) else {
            continue;
        };
        if impulse == Vec3::ZERO {
            continue;
        }

        if emitter.impulse_vel_change {
            match velocity {
                Some(mut velocity) => velocity.linvel += impulse,
                None => {
                    commands.entity(entity).insert(Velocity::linear(impulse));
                }
            }
        } else {
            match external {
                Some(mut external) => external.impulse += impulse,
                None => {
                    commands.entity(entity).insert(ExternalImpulse {
                        impulse,
                        torque_impulse: Vec3::ZERO,
                    });
                }
            }
        }

        affected += 1;
    }

    affected
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_constant_falloff_full_strength_inside_radius() {
        let emitter = RadialForce::default();

        let impulse = emitter.impulse_at(Vec3::ZERO, Vec3::new(3.0, 0.0, 0.0));

        assert_eq!(impulse, Some(Vec3::new(25.0, 0.0, 0.0)));
    }

    #[test]
    fn test_outside_radius_no_impulse() {
        let emitter = RadialForce::default();

        assert_eq!(emitter.impulse_at(Vec3::ZERO, Vec3::new(0.0, 0.0, 6.5)), None);
    }

    #[test]
    fn test_linear_falloff() {
        let emitter = RadialForce {
            radius: 10.0,
            impulse_strength: 20.0,
            falloff: RadialFalloff::Linear,
            ..default()
        };

        let impulse = emitter
            .impulse_at(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0))
            .expect("inside radius");

        // 5m из 10m → половина силы
        assert!((impulse.y - 10.0).abs() < 1e-4, "impulse = {:?}", impulse);
    }

    #[test]
    fn test_coincident_body_gets_zero_direction() {
        let emitter = RadialForce::default();

        assert_eq!(emitter.impulse_at(Vec3::ONE, Vec3::ONE), Some(Vec3::ZERO));
    }

    #[test]
    fn test_fire_impulse_only_dynamic_bodies_in_radius() {
        let mut world = World::new();
        let owner = world.spawn(Transform::default()).id();

        let near = world
            .spawn((
                Transform::from_xyz(2.0, 0.0, 0.0),
                RigidBody::Dynamic,
                Velocity::zero(),
            ))
            .id();
        let far = world
            .spawn((
                Transform::from_xyz(20.0, 0.0, 0.0),
                RigidBody::Dynamic,
                Velocity::zero(),
            ))
            .id();
        let wall = world
            .spawn((
                Transform::from_xyz(1.0, 0.0, 0.0),
                RigidBody::Fixed,
                Velocity::zero(),
            ))
            .id();

        let emitter = RadialForce::default();
        let affected = world
            .run_system_once(
                move |mut commands: Commands, mut bodies: RadialImpulseTargets| {
                    fire_impulse(&mut commands, &emitter, owner, Vec3::ZERO, &mut bodies)
                },
            )
            .expect("system runs");

        assert_eq!(affected, 1);
        assert_eq!(world.get::<Velocity>(near).unwrap().linvel, Vec3::new(25.0, 0.0, 0.0));
        assert_eq!(world.get::<Velocity>(far).unwrap().linvel, Vec3::ZERO);
        assert_eq!(world.get::<Velocity>(wall).unwrap().linvel, Vec3::ZERO);
    }

    #[test]
    fn test_fire_impulse_without_vel_change_uses_external_impulse() {
        let mut world = World::new();
        let owner = world.spawn(Transform::default()).id();
        let crate_body = world
            .spawn((Transform::from_xyz(0.0, 0.0, -4.0), RigidBody::Dynamic))
            .id();

        let emitter = RadialForce {
            impulse_vel_change: false,
            impulse_strength: 50.0,
            ..default()
        };
        world
            .run_system_once(
                move |mut commands: Commands, mut bodies: RadialImpulseTargets| {
                    fire_impulse(&mut commands, &emitter, owner, Vec3::ZERO, &mut bodies)
                },
            )
            .expect("system runs");

        let external = world.get::<ExternalImpulse>(crate_body).expect("impulse inserted");
        assert_eq!(external.impulse, Vec3::new(0.0, 0.0, -50.0));
    }
}
