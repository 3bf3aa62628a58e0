//! Debug markers — временные debug-сферы в мире
//!
//! Симуляция только спавнит marker entity и считает lifetime.
//! Рисует клиент (Gizmos), headless режим просто их expire'ит.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Настройки debug-визуализации
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct DebugDrawConfig {
    /// Выключено → markers не спавнятся
    pub enabled: bool,
    /// Радиус сферы (метры)
    pub marker_radius: f32,
    /// Время жизни marker (секунды)
    pub marker_lifetime: f32,
    /// sRGBA
    pub marker_rgba: [f32; 4],
}

impl Default for DebugDrawConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            marker_radius: 0.32,
            marker_lifetime: 2.0,
            marker_rgba: [1.0, 0.85, 0.1, 1.0],
        }
    }
}

/// Временный debug marker (позиция = Transform)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct DebugMarker {
    pub radius: f32,
    pub rgba: [f32; 4],
    pub lifetime: Timer,
}

/// Заспавнить marker по текущему конфигу. None если debug draw выключен.
pub fn spawn_debug_marker(
    commands: &mut Commands,
    config: &DebugDrawConfig,
    position: Vec3,
) -> Option<Entity> {
    if !config.enabled {
        return None;
    }

    let marker = commands
        .spawn((
            Name::new("DebugMarker"),
            Transform::from_translation(position),
            DebugMarker {
                radius: config.marker_radius,
                rgba: config.marker_rgba,
                lifetime: Timer::from_seconds(config.marker_lifetime, TimerMode::Once),
            },
        ))
        .id();

    Some(marker)
}

/// Система: tick lifetime → деспавн истёкших markers
pub fn expire_debug_markers(
    mut commands: Commands,
    mut markers: Query<(Entity, &mut DebugMarker)>,
    time: Res<Time>,
) {
    for (entity, mut marker) in markers.iter_mut() {
        marker.lifetime.tick(time.delta());
        if marker.lifetime.finished() {
            commands.entity(entity).try_despawn();
        }
    }
}

pub struct DebugDrawPlugin;

impl Plugin for DebugDrawPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugDrawConfig>()
            .register_type::<DebugDrawConfig>()
            .register_type::<DebugMarker>()
            .add_systems(FixedUpdate, expire_debug_markers);
    }
}
