//! Геометрия уровня (static коллайдеры)

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, RigidBody};

use crate::components::{CollisionProfile, WorldGeometry};

/// Spawn helper: static box (пол, стена)
pub fn spawn_world_geometry(
    commands: &mut Commands,
    name: &str,
    transform: Transform,
    half_extents: Vec3,
) -> Entity {
    let profile = CollisionProfile::world_static();

    commands
        .spawn((
            Name::new(name.to_string()),
            transform,
            WorldGeometry,
            profile,
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            profile.solid_groups(),
        ))
        .id()
}
