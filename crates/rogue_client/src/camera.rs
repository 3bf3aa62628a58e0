use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use rogue_simulation::scenario::Arena;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (follow_caster, orbit_camera_controls, update_camera_transform).chain(),
        );
    }
}

/// Орбитальная камера вокруг кастера
#[derive(Component)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,   // Horizontal rotation (radians)
    pub pitch: f32, // Vertical rotation (radians)
    pub sensitivity: f32,
    pub zoom_speed: f32,
    /// Скорость догона фокуса (1/sec)
    pub follow_rate: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 15.0,
            yaw: std::f32::consts::FRAC_PI_4,
            pitch: std::f32::consts::FRAC_PI_4,
            sensitivity: 0.005,
            zoom_speed: 1.5,
            follow_rate: 6.0,
        }
    }
}

/// Фокус плавно догоняет кастера
fn follow_caster(
    arena: Option<Res<Arena>>,
    targets: Query<&Transform, Without<OrbitCamera>>,
    mut cameras: Query<&mut OrbitCamera>,
    time: Res<Time>,
) {
    let Some(arena) = arena else {
        return;
    };
    let Ok(target) = targets.get(arena.caster) else {
        return;
    };

    for mut camera in cameras.iter_mut() {
        let t = (camera.follow_rate * time.delta_secs()).min(1.0);
        let focus = camera.focus.lerp(target.translation, t);
        if focus.distance_squared(camera.focus) > 1e-8 {
            camera.focus = focus;
        }
    }
}

/// ПКМ — вращение, колесо — zoom
fn orbit_camera_controls(
    mut query: Query<&mut OrbitCamera>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
) {
    let Ok(mut camera) = query.single_mut() else {
        return;
    };

    if mouse_buttons.pressed(MouseButton::Right) && mouse_motion.delta != Vec2::ZERO {
        let sensitivity = camera.sensitivity;
        camera.yaw -= mouse_motion.delta.x * sensitivity;
        // Без переворота через полюс
        camera.pitch = (camera.pitch + mouse_motion.delta.y * sensitivity).clamp(0.1, 1.4);
    }

    if mouse_scroll.delta.y != 0.0 {
        let zoom = mouse_scroll.delta.y * camera.zoom_speed;
        camera.distance = (camera.distance - zoom).clamp(4.0, 60.0);
    }
}

fn update_camera_transform(
    mut query: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>,
) {
    for (camera, mut transform) in query.iter_mut() {
        let offset = Vec3::new(
            camera.pitch.cos() * camera.yaw.sin(),
            camera.pitch.sin(),
            camera.pitch.cos() * camera.yaw.cos(),
        ) * camera.distance;

        *transform =
            Transform::from_translation(camera.focus + offset).looking_at(camera.focus, Vec3::Y);
    }
}
