//! Collision bridge: Rapier `CollisionEvent` → targeted actor events
//!
//! Акторы не читают Rapier напрямую. Бридж резолвит коллайдер → актор
//! и триггерит `ActorHit` / `ActorBeginOverlap` на обеих сторонах пары.
//! Обработчики — entity observers, регистрируются при spawn актора.

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

use crate::components::ColliderOwner;

/// Event: блокирующий контакт с другим актором (solid vs solid)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorHit {
    pub other: Entity,
}

/// Event: начало overlap с другим актором (хотя бы одна сторона — sensor)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorBeginOverlap {
    pub other: Entity,
}

/// Коллайдер → актор-владелец (sensor children резолвятся через ColliderOwner)
pub fn resolve_actor(collider: Entity, owners: &Query<&ColliderOwner>) -> Entity {
    owners.get(collider).map(|owner| owner.0).unwrap_or(collider)
}

/// System: Rapier CollisionEvent → ActorHit / ActorBeginOverlap
///
/// Только `Started` события. `Stopped` (end overlap) геймплею не нужен.
pub fn dispatch_collision_events(
    mut commands: Commands,
    mut collision_events: EventReader<CollisionEvent>,
    owners: Query<&ColliderOwner>,
    alive: Query<Entity>,
) {
    for event in collision_events.read() {
        let CollisionEvent::Started(collider_a, collider_b, flags) = *event else {
            continue;
        };

        let actor_a = resolve_actor(collider_a, &owners);
        let actor_b = resolve_actor(collider_b, &owners);

        // Свой sensor задел своё же тело
        if actor_a == actor_b {
            continue;
        }

        // Одна из сторон уже уничтожена в этом кадре
        if !alive.contains(actor_a) || !alive.contains(actor_b) {
            continue;
        }

        if flags.contains(CollisionEventFlags::SENSOR) {
            commands.trigger_targets(ActorBeginOverlap { other: actor_b }, actor_a);
            commands.trigger_targets(ActorBeginOverlap { other: actor_a }, actor_b);
        } else {
            commands.trigger_targets(ActorHit { other: actor_b }, actor_a);
            commands.trigger_targets(ActorHit { other: actor_a }, actor_b);
        }
    }
}
