use bevy::prelude::*;
use bevy_rapier3d::prelude::{NoUserData, RapierPhysicsPlugin};
use rogue_simulation::scenario::{spawn_arena, ArenaSettings};
use rogue_simulation::{DeterministicRng, SimulationPlugin};

mod camera;
mod input;
mod rendering;

use camera::CameraPlugin;
use input::CasterInputPlugin;
use rendering::RenderingSyncPlugin;

fn main() {
    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Action Rogue - Barrels".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Rapier: collision detection + rigid body step
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Simulation (gameplay акторы)
        .add_plugins(SimulationPlugin)
        // Rendering sync (simulation → visuals)
        .add_plugins(RenderingSyncPlugin)
        .add_plugins(CameraPlugin)
        .add_plugins(CasterInputPlugin)
        .add_systems(Startup, setup_scene)
        .run();
}

/// Lights, camera и demo арена
fn setup_scene(mut commands: Commands, mut rng: ResMut<DeterministicRng>) {
    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_4)),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(14.0, 12.0, 14.0).looking_at(Vec3::ZERO, Vec3::Y),
        camera::OrbitCamera {
            distance: 22.0,
            ..default()
        },
    ));

    // Симуляционные entity, визуал добавит RenderingSyncPlugin
    let arena = spawn_arena(&mut commands, &mut rng, ArenaSettings::default());
    commands.insert_resource(arena);
}
