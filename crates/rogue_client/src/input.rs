//! Клавиатура/мышь → intents кастера
//!
//! - Space / ЛКМ: PrimaryAttackIntent
//! - A/D, ←/→: поворот кастера
//! - Tab: следующий профиль коллизий снаряда
//! - F1: debug markers on/off

use bevy::prelude::*;
use rogue_simulation::scenario::Arena;
use rogue_simulation::{
    log_info, Caster, DebugDrawConfig, PrimaryAttackIntent, ProjectileCollisionMode,
};

/// Скорость поворота кастера (rad/sec)
const TURN_SPEED: f32 = 2.5;

pub struct CasterInputPlugin;

impl Plugin for CasterInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                turn_caster,
                fire_on_input,
                cycle_collision_mode,
                toggle_debug_draw,
            ),
        );
    }
}

fn turn_caster(
    arena: Option<Res<Arena>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut transforms: Query<&mut Transform, With<Caster>>,
    time: Res<Time>,
) {
    let Some(arena) = arena else {
        return;
    };
    let Ok(mut transform) = transforms.get_mut(arena.caster) else {
        return;
    };

    let mut turn = 0.0;
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        turn += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        turn -= 1.0;
    }

    if turn != 0.0 {
        transform.rotate_y(turn * TURN_SPEED * time.delta_secs());
    }
}

fn fire_on_input(
    arena: Option<Res<Arena>>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut intents: EventWriter<PrimaryAttackIntent>,
) {
    let Some(arena) = arena else {
        return;
    };

    if keys.just_pressed(KeyCode::Space) || mouse_buttons.just_pressed(MouseButton::Left) {
        intents.write(PrimaryAttackIntent {
            caster: arena.caster,
        });
    }
}

fn cycle_collision_mode(
    arena: Option<Res<Arena>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut casters: Query<&mut Caster>,
) {
    if !keys.just_pressed(KeyCode::Tab) {
        return;
    }
    let Some(arena) = arena else {
        return;
    };
    let Ok(mut caster) = casters.get_mut(arena.caster) else {
        return;
    };

    caster.collision_mode = match caster.collision_mode {
        ProjectileCollisionMode::Blocking => ProjectileCollisionMode::Overlap,
        ProjectileCollisionMode::Overlap => ProjectileCollisionMode::Mixed,
        ProjectileCollisionMode::Mixed => ProjectileCollisionMode::Blocking,
    };
    log_info(&format!("Projectile collision mode: {:?}", caster.collision_mode));
}

fn toggle_debug_draw(keys: Res<ButtonInput<KeyCode>>, mut config: ResMut<DebugDrawConfig>) {
    if keys.just_pressed(KeyCode::F1) {
        config.enabled = !config.enabled;
        log_info(&format!("Debug markers: {}", config.enabled));
    }
}
