//! Lifecycle акторов: уничтожение в конце кадра и отложенное по таймеру
//!
//! `destroy_actor` только помечает entity (`PendingDestroy`), деспавн — в
//! PostUpdate после collision dispatch. Все observers одного кадра видят
//! актора целым (бочка проверяет тип снаряда, который уже себя уничтожил).
//!
//! Уничтожение идемпотентно: повторный destroy — no-op, без warning.

use bevy::prelude::*;

/// Маркер: актор уничтожается в конце текущего кадра
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PendingDestroy;

/// Деспавн entity по истечении single-fire таймера
///
/// Отмена — `cancel_destroy` (удаляет компонент). Повтора нет.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct DestroyAfter {
    pub timer: Timer,
}

impl DestroyAfter {
    pub fn seconds(delay: f32) -> Self {
        Self {
            timer: Timer::from_seconds(delay, TimerMode::Once),
        }
    }

    pub fn remaining_secs(&self) -> f32 {
        self.timer.remaining_secs()
    }
}

/// Уничтожить актора в конце кадра (безопасно для уже удалённых)
pub fn destroy_actor(commands: &mut Commands, entity: Entity) {
    commands.entity(entity).try_insert(PendingDestroy);
}

/// Запланировать уничтожение через `delay` секунд
///
/// Уже запланированный таймер не перезапускается: решает вызывающий
/// (по своему состоянию), армить ли ещё раз.
pub fn schedule_destroy(commands: &mut Commands, entity: Entity, delay: f32) {
    commands.entity(entity).try_insert_if_new(DestroyAfter::seconds(delay));
}

/// Отменить запланированное уничтожение
pub fn cancel_destroy(commands: &mut Commands, entity: Entity) {
    commands.entity(entity).try_remove::<DestroyAfter>();
}

/// Система: tick DestroyAfter таймеров → деспавн
///
/// Работает в FixedUpdate (Time = Time<Fixed>).
pub fn tick_destroy_timers(
    mut commands: Commands,
    mut query: Query<(Entity, &mut DestroyAfter, Option<&Name>)>,
    time: Res<Time>,
) {
    for (entity, mut destroy_after, name) in query.iter_mut() {
        destroy_after.timer.tick(time.delta());

        if destroy_after.timer.just_finished() {
            crate::log(&format!(
                "Destroying {} (timer {:.2}s elapsed)",
                crate::components::display_name(name, entity),
                destroy_after.timer.duration().as_secs_f32()
            ));
            destroy_actor(&mut commands, entity);
        }
    }
}

/// Система: деспавн помеченных акторов (PostUpdate, после collision dispatch)
pub fn despawn_pending_actors(
    mut commands: Commands,
    query: Query<Entity, With<PendingDestroy>>,
) {
    for entity in query.iter() {
        commands.entity(entity).try_despawn();
    }
}

pub struct LifecyclePlugin;

impl Plugin for LifecyclePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<DestroyAfter>()
            .register_type::<PendingDestroy>()
            .add_systems(FixedUpdate, tick_destroy_timers)
            .add_systems(
                PostUpdate,
                despawn_pending_actors.in_set(crate::SimulationSet::Cleanup),
            );
    }
}
