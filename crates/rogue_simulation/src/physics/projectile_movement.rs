//! Projectile movement — прямолинейное движение снаряда
//!
//! Архитектура (как kinematic контроллер персонажей):
//! - Rapier только для коллизий (RigidBody::KinematicPositionBased)
//! - Velocity интегрируем сами в FixedUpdate
//! - Gravity через gravity_scale (magic projectile = 0, летит прямо)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Ускорение свободного падения (m/s²)
pub const WORLD_GRAVITY: f32 = -9.81;

/// Движение снаряда (designer-настройки + runtime velocity)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct ProjectileMovement {
    /// Стартовая скорость (m/s)
    pub initial_speed: f32,
    /// Лимит скорости (m/s), 0 = без лимита
    pub max_speed: f32,
    pub gravity_scale: f32,
    /// Поворачивать Transform вдоль velocity
    pub rotation_follows_velocity: bool,
    /// Стартовое направление = forward снаряда (иначе world -Z)
    pub initial_velocity_in_local_space: bool,

    #[serde(skip)]
    pub velocity: Vec3,
    #[serde(skip)]
    pub launched: bool,
    #[serde(skip)]
    pub stopped: bool,
}

impl Default for ProjectileMovement {
    fn default() -> Self {
        Self {
            initial_speed: 10.0,
            max_speed: 15.0,
            gravity_scale: 0.0,
            rotation_follows_velocity: true,
            initial_velocity_in_local_space: true,
            velocity: Vec3::ZERO,
            launched: false,
            stopped: false,
        }
    }
}

impl ProjectileMovement {
    /// Задать стартовую velocity из ориентации снаряда
    pub fn launch(&mut self, rotation: Quat) {
        let direction = if self.initial_velocity_in_local_space {
            rotation * Vec3::NEG_Z
        } else {
            Vec3::NEG_Z
        };

        self.velocity = self.limit(direction * self.initial_speed);
        self.launched = true;
    }

    /// Остановить симуляцию (блокирующий hit)
    pub fn stop(&mut self) {
        self.velocity = Vec3::ZERO;
        self.stopped = true;
    }

    pub fn is_moving(&self) -> bool {
        !self.stopped && self.velocity != Vec3::ZERO
    }

    /// Один шаг: gravity + speed clamp. Возвращает смещение за `delta`.
    pub fn step(&mut self, delta: f32) -> Vec3 {
        if self.stopped {
            return Vec3::ZERO;
        }

        self.velocity.y += WORLD_GRAVITY * self.gravity_scale * delta;
        self.velocity = self.limit(self.velocity);

        self.velocity * delta
    }

    fn limit(&self, velocity: Vec3) -> Vec3 {
        if self.max_speed > 0.0 {
            velocity.clamp_length_max(self.max_speed)
        } else {
            velocity
        }
    }
}

/// Система интеграции velocity → Transform
///
/// Работает в FixedUpdate. Незапущенные снаряды стартуют на первом тике.
pub fn integrate_projectile_movement(
    mut query: Query<(&mut ProjectileMovement, &mut Transform)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (mut movement, mut transform) in query.iter_mut() {
        if !movement.launched {
            movement.launch(transform.rotation);
        }

        let displacement = movement.step(delta);
        transform.translation += displacement;

        if movement.rotation_follows_velocity && movement.is_moving() {
            if let Ok(direction) = Dir3::new(movement.velocity) {
                transform.look_to(direction, Vec3::Y);
            }
        }
    }
}
