use std::collections::HashMap;

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;
use rogue_simulation::{
    log_warning, DebugMarker, ExplosiveBarrel, ParticleEffect, Pawn, WorldGeometry,
    BARREL_HALF_HEIGHT, BARREL_RADIUS, MAGIC_TRAIL_TEMPLATE, PROJECTILE_RADIUS,
};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_visual_assets)
            .add_systems(
                Update,
                (
                    attach_barrel_visuals,
                    attach_projectile_visuals,
                    attach_pawn_visuals,
                    attach_geometry_visuals,
                    tint_detonated_barrels,
                    draw_debug_markers,
                ),
            );
    }
}

/// Общие меши/материалы акторов
#[derive(Resource)]
struct VisualAssets {
    barrel_mesh: Handle<Mesh>,
    barrel_material: Handle<StandardMaterial>,
    detonated_material: Handle<StandardMaterial>,
    projectile_mesh: Handle<Mesh>,
    /// ParticleEffect template → emissive материал trail
    trail_materials: HashMap<String, Handle<StandardMaterial>>,
    fallback_trail_material: Handle<StandardMaterial>,
    pawn_mesh: Handle<Mesh>,
    pawn_material: Handle<StandardMaterial>,
    geometry_material: Handle<StandardMaterial>,
}

fn load_visual_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut trail_materials = HashMap::new();
    trail_materials.insert(
        MAGIC_TRAIL_TEMPLATE.to_string(),
        materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.6, 1.0),
            emissive: LinearRgba::rgb(0.6, 1.2, 4.0),
            ..default()
        }),
    );

    commands.insert_resource(VisualAssets {
        barrel_mesh: meshes.add(Cylinder::new(BARREL_RADIUS, BARREL_HALF_HEIGHT * 2.0)),
        barrel_material: materials.add(Color::srgb(0.75, 0.15, 0.1)),
        detonated_material: materials.add(Color::srgb(0.2, 0.2, 0.2)),
        projectile_mesh: meshes.add(Sphere::new(PROJECTILE_RADIUS)),
        trail_materials,
        fallback_trail_material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.0, 1.0),
            emissive: LinearRgba::rgb(2.0, 0.0, 2.0),
            ..default()
        }),
        pawn_mesh: meshes.add(Capsule3d::new(0.4, 1.0)),
        pawn_material: materials.add(Color::srgb(0.2, 0.2, 0.8)),
        geometry_material: materials.add(Color::srgb(0.3, 0.5, 0.3)),
    });
}

/// Визуал вешаем прямо на симуляционную entity: despawn уносит его вместе с актором
fn attach_barrel_visuals(
    mut commands: Commands,
    assets: Res<VisualAssets>,
    query: Query<Entity, Added<ExplosiveBarrel>>,
) {
    for entity in query.iter() {
        commands.entity(entity).try_insert((
            Mesh3d(assets.barrel_mesh.clone()),
            MeshMaterial3d(assets.barrel_material.clone()),
        ));
    }
}

/// Материал снаряда по ParticleEffect template (неизвестный → magenta fallback)
fn attach_projectile_visuals(
    mut commands: Commands,
    assets: Res<VisualAssets>,
    query: Query<(Entity, &ParticleEffect), Added<ParticleEffect>>,
) {
    for (entity, effect) in query.iter() {
        let material = match assets.trail_materials.get(&effect.template) {
            Some(material) => material.clone(),
            None => {
                log_warning(&format!("Unknown particle template '{}'", effect.template));
                assets.fallback_trail_material.clone()
            }
        };

        commands.entity(entity).try_insert((
            Mesh3d(assets.projectile_mesh.clone()),
            MeshMaterial3d(material),
        ));
    }
}

fn attach_pawn_visuals(
    mut commands: Commands,
    assets: Res<VisualAssets>,
    query: Query<Entity, Added<Pawn>>,
) {
    for entity in query.iter() {
        commands.entity(entity).try_insert((
            Mesh3d(assets.pawn_mesh.clone()),
            MeshMaterial3d(assets.pawn_material.clone()),
        ));
    }
}

/// Box меш по размеру cuboid коллайдера
fn attach_geometry_visuals(
    mut commands: Commands,
    assets: Res<VisualAssets>,
    mut meshes: ResMut<Assets<Mesh>>,
    query: Query<(Entity, &Collider), Added<WorldGeometry>>,
) {
    for (entity, collider) in query.iter() {
        let Some(cuboid) = collider.as_cuboid() else {
            continue;
        };
        let size = cuboid.half_extents() * 2.0;

        commands.entity(entity).try_insert((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(assets.geometry_material.clone()),
        ));
    }
}

/// Взорванная бочка темнеет до destroy
fn tint_detonated_barrels(
    assets: Res<VisualAssets>,
    mut query: Query<
        (&ExplosiveBarrel, &mut MeshMaterial3d<StandardMaterial>),
        Changed<ExplosiveBarrel>,
    >,
) {
    for (barrel, mut material) in query.iter_mut() {
        if barrel.detonated {
            material.0 = assets.detonated_material.clone();
        }
    }
}

/// Debug markers: gizmo сферы (пока marker жив)
fn draw_debug_markers(query: Query<(&DebugMarker, &Transform)>, mut gizmos: Gizmos) {
    for (marker, transform) in query.iter() {
        let [r, g, b, a] = marker.rgba;
        gizmos.sphere(
            bevy::math::Isometry3d::from_translation(transform.translation),
            marker.radius,
            Color::srgba(r, g, b, a),
        );
    }
}
