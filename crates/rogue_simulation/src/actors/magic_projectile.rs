//! MagicProjectile — снаряд заклинания
//!
//! Lifecycle:
//! - spawn кастером (instigator) → летит прямо (ProjectileMovement, gravity 0)
//! - первый hit/overlap не с instigator → лог + debug marker + destroy
//!
//! Hit и overlap — два независимых observer'а, сходятся в один исход.
//! Урон не наносится.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::{
    ActiveCollisionTypes, ActiveEvents, Collider, RigidBody, Sensor,
};
use serde::{Deserialize, Serialize};

use crate::components::{
    display_name, ColliderOwner, CollisionChannel, CollisionProfile, CollisionResponse,
    ChannelResponses,
};
use crate::debug::{spawn_debug_marker, DebugDrawConfig};
use crate::lifecycle::destroy_actor;
use crate::physics::{ActorBeginOverlap, ActorHit, ProjectileMovement};

/// Радиус сферы коллизии снаряда (метры)
pub const PROJECTILE_RADIUS: f32 = 0.2;

/// Профиль коллизий снаряда
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum ProjectileCollisionMode {
    /// Останавливается о геометрию уровня, overlap с pawn / physics body
    Blocking,
    /// Только overlap (геометрия, pawn, physics body) — никогда не блокируется
    Overlap,
    /// Block геометрия + physics body (бочки), overlap pawn
    #[default]
    Mixed,
}

impl ProjectileCollisionMode {
    pub fn profile(self) -> CollisionProfile {
        use CollisionResponse::{Block, Ignore, Overlap};

        let responses = match self {
            ProjectileCollisionMode::Blocking => ChannelResponses {
                world_static: Block,
                world_dynamic: Ignore,
                pawn: Overlap,
                physics_body: Overlap,
            },
            ProjectileCollisionMode::Overlap => ChannelResponses {
                world_static: Overlap,
                world_dynamic: Ignore,
                pawn: Overlap,
                physics_body: Overlap,
            },
            ProjectileCollisionMode::Mixed => ChannelResponses {
                world_static: Block,
                world_dynamic: Ignore,
                pawn: Overlap,
                physics_body: Block,
            },
        };

        CollisionProfile {
            object_type: CollisionChannel::WorldDynamic,
            responses,
        }
    }
}

/// Снаряд заклинания
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct MagicProjectile {
    /// Кто выпустил (self-hit игнорируется)
    pub instigator: Option<Entity>,
    pub collision_mode: ProjectileCollisionMode,
    /// Terminal impact уже обработан
    pub spent: bool,
}

impl MagicProjectile {
    pub fn new(instigator: Option<Entity>, collision_mode: ProjectileCollisionMode) -> Self {
        Self {
            instigator,
            collision_mode,
            spent: false,
        }
    }
}

/// Trail по умолчанию у magic projectile
pub const MAGIC_TRAIL_TEMPLATE: &str = "magic_projectile_trail";

/// Визуальный эффект снаряда: клиент выбирает материал trail по `template`
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ParticleEffect {
    pub template: String,
}

impl Default for ParticleEffect {
    fn default() -> Self {
        Self {
            template: MAGIC_TRAIL_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ImpactKind {
    Hit,
    Overlap,
}

/// Event: снаряд отработал столкновение и уничтожен
#[derive(Event, Debug, Clone)]
pub struct ProjectileImpacted {
    pub projectile: Entity,
    pub other: Entity,
    pub other_name: String,
    /// Позиция снаряда в момент impact (= позиция debug marker)
    pub position: Vec3,
    pub kind: ImpactKind,
}

/// Kinematic снаряд должен получать контакты со static геометрией и kinematic pawn'ами
fn projectile_collision_types() -> ActiveCollisionTypes {
    ActiveCollisionTypes::default()
        | ActiveCollisionTypes::KINEMATIC_STATIC
        | ActiveCollisionTypes::KINEMATIC_KINEMATIC
}

/// Spawn helper: снаряд + коллайдеры по профилю + observers
///
/// - solid ball на root (если профиль что-то блокирует)
/// - sensor ball child (если профиль что-то overlap'ит), `ColliderOwner` → root
pub fn spawn_magic_projectile(
    commands: &mut Commands,
    transform: Transform,
    instigator: Option<Entity>,
    collision_mode: ProjectileCollisionMode,
) -> Entity {
    let profile = collision_mode.profile();

    let mut projectile = commands.spawn((
        Name::new("MagicProjectile"),
        transform,
        MagicProjectile::new(instigator, collision_mode),
        ProjectileMovement::default(),
        ParticleEffect::default(),
        profile,
        RigidBody::KinematicPositionBased,
    ));
    let projectile_entity = projectile.id();

    if profile.blocks_anything() {
        projectile.insert((
            Collider::ball(PROJECTILE_RADIUS),
            profile.solid_groups(),
            ActiveEvents::COLLISION_EVENTS,
            projectile_collision_types(),
        ));
    }

    if profile.overlaps_anything() {
        projectile.with_children(|children| {
            children.spawn((
                Name::new("MagicProjectileSensor"),
                Transform::default(),
                Collider::ball(PROJECTILE_RADIUS),
                Sensor,
                profile.sensor_groups(),
                ActiveEvents::COLLISION_EVENTS,
                projectile_collision_types(),
                ColliderOwner(projectile_entity),
            ));
        });
    }

    projectile
        .observe(on_projectile_hit)
        .observe(on_projectile_overlap);

    projectile_entity
}

/// Общие параметры hit/overlap observers
#[derive(SystemParam)]
struct ProjectileImpactContext<'w, 's> {
    commands: Commands<'w, 's>,
    projectiles: Query<
        'w,
        's,
        (
            &'static mut MagicProjectile,
            &'static mut ProjectileMovement,
            &'static Transform,
        ),
    >,
    names: Query<'w, 's, Option<&'static Name>>,
    debug_config: Res<'w, DebugDrawConfig>,
    impacts: EventWriter<'w, ProjectileImpacted>,
}

impl ProjectileImpactContext<'_, '_> {
    /// Terminal impact: guards → лог → marker → event → destroy
    fn resolve(&mut self, projectile: Entity, other: Entity, kind: ImpactKind) {
        let Ok((mut state, mut movement, transform)) = self.projectiles.get_mut(projectile) else {
            return;
        };

        // Hit и overlap в одном кадре — обрабатываем только первый
        if state.spent {
            return;
        }

        // Другой стороны уже нет
        let Ok(other_name) = self.names.get(other) else {
            return;
        };

        if state.instigator == Some(other) {
            return;
        }

        state.spent = true;
        if kind == ImpactKind::Hit {
            movement.stop();
        }

        let position = transform.translation;
        let other_name = display_name(other_name, other);

        match kind {
            ImpactKind::Hit => crate::log_info(&format!(
                "MagicProjectile {:?} hit {} at {:?}",
                projectile, other_name, position
            )),
            ImpactKind::Overlap => crate::log_info(&format!(
                "MagicProjectile {:?} overlapped {} at {:?}",
                projectile, other_name, position
            )),
        }

        spawn_debug_marker(&mut self.commands, &self.debug_config, position);

        self.impacts.write(ProjectileImpacted {
            projectile,
            other,
            other_name,
            position,
            kind,
        });

        destroy_actor(&mut self.commands, projectile);
    }
}

fn on_projectile_hit(trigger: Trigger<ActorHit>, mut context: ProjectileImpactContext) {
    context.resolve(trigger.target(), trigger.event().other, ImpactKind::Hit);
}

fn on_projectile_overlap(trigger: Trigger<ActorBeginOverlap>, mut context: ProjectileImpactContext) {
    context.resolve(trigger.target(), trigger.event().other, ImpactKind::Overlap);
}
