//! Physics integration test
//!
//! Полный стек как в headless бинарнике: Rapier step + collision bridge +
//! observers. Контакты не подделываются — их находит Rapier по коллайдерам,
//! collision groups и active collision types.
//!
//! Проверяем:
//! - Blocking снаряд останавливается о стену и уничтожается
//! - Overlap снаряд никогда не блокируется, уничтожается на overlap с pawn
//! - Mixed снаряд даёт блокирующий hit по бочке → взрыв → destroy через 2 sec
//! - demo арена: выстрелы кастера реально взрывают бочки

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;
use rogue_simulation::scenario::{aim_and_fire, spawn_arena, ArenaSettings};
use rogue_simulation::*;

/// Всё, что симуляция сообщила за прогон
#[derive(Resource, Default)]
struct Recorded {
    impacts: Vec<ProjectileImpacted>,
    detonations: Vec<BarrelDetonated>,
}

fn record_events(
    mut impacts: EventReader<ProjectileImpacted>,
    mut detonations: EventReader<BarrelDetonated>,
    mut recorded: ResMut<Recorded>,
) {
    recorded.impacts.extend(impacts.read().cloned());
    recorded.detonations.extend(detonations.read().cloned());
}

/// Helper: physics App + пол (верх на y=0)
fn create_arena_app(seed: u64) -> App {
    let mut app = create_physics_app(seed);
    app.init_resource::<Recorded>()
        .add_systems(Last, record_events);

    // Startup: Rapier context
    app.update();

    spawn_world_geometry(
        &mut app.world_mut().commands(),
        "Floor",
        Transform::from_xyz(0.0, -0.5, 0.0),
        Vec3::new(15.0, 0.5, 15.0),
    );
    app.world_mut().flush();

    app
}

fn spawn_caster(app: &mut App, name: &str, z: f32, mode: ProjectileCollisionMode) -> Entity {
    let pawn = spawn_pawn(
        &mut app.world_mut().commands(),
        name,
        Transform::from_xyz(0.0, PAWN_STAND_HEIGHT, z),
        Caster {
            collision_mode: mode,
            ..default()
        },
    );
    app.world_mut().flush();
    pawn
}

fn spawn_wall(app: &mut App, z: f32) -> Entity {
    let wall = spawn_world_geometry(
        &mut app.world_mut().commands(),
        "Wall",
        Transform::from_xyz(0.0, 1.0, z),
        Vec3::new(3.0, 1.0, 0.25),
    );
    app.world_mut().flush();
    wall
}

/// Выстрел: intent → update → entity снаряда
fn fire(app: &mut App, caster: Entity) -> Entity {
    app.world_mut().send_event(PrimaryAttackIntent { caster });
    app.update();

    let mut projectiles = app
        .world_mut()
        .query_filtered::<(Entity, &MagicProjectile), Without<PendingDestroy>>();
    projectiles
        .iter(app.world())
        .find(|(_, projectile)| projectile.instigator == Some(caster))
        .map(|(entity, _)| entity)
        .expect("caster fired a projectile")
}

fn run_for(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn is_alive(app: &App, entity: Entity) -> bool {
    app.world().get_entity(entity).is_ok()
}

#[test]
fn test_blocking_projectile_stopped_by_wall() {
    let mut app = create_arena_app(1);

    let caster = spawn_caster(&mut app, "A", 0.0, ProjectileCollisionMode::Blocking);
    let wall = spawn_wall(&mut app, -5.0);

    let projectile = fire(&mut app, caster);
    // 1 sec на 10 m/s — стена (лицевая грань z = -4.75) точно достигнута
    run_for(&mut app, 60);

    assert!(!is_alive(&app, projectile), "projectile must be destroyed by the wall");

    let recorded = app.world().resource::<Recorded>();
    assert_eq!(recorded.impacts.len(), 1, "impacts: {:?}", recorded.impacts);

    let impact = &recorded.impacts[0];
    assert_eq!(impact.projectile, projectile);
    assert_eq!(impact.other, wall);
    assert_eq!(impact.kind, ImpactKind::Hit);
    // Остановился перед стеной, не прошёл насквозь
    assert!(
        impact.position.z > -4.75,
        "impact behind the wall face: {:?}",
        impact.position
    );
}

#[test]
fn test_overlap_projectile_never_blocked() {
    let mut app = create_arena_app(2);

    let caster = spawn_caster(&mut app, "A", 0.0, ProjectileCollisionMode::Overlap);
    let wall = spawn_wall(&mut app, -5.0);

    let projectile = fire(&mut app, caster);
    // Нет solid коллайдера — только sensor child
    assert!(app.world().get::<Collider>(projectile).is_none());

    run_for(&mut app, 60);

    assert!(!is_alive(&app, projectile));

    let recorded = app.world().resource::<Recorded>();
    assert_eq!(recorded.impacts.len(), 1, "impacts: {:?}", recorded.impacts);
    assert_eq!(recorded.impacts[0].other, wall);
    assert_eq!(recorded.impacts[0].kind, ImpactKind::Overlap);
}

#[test]
fn test_overlap_projectile_destroyed_on_pawn() {
    let mut app = create_arena_app(3);

    let caster = spawn_caster(&mut app, "A", 0.0, ProjectileCollisionMode::Overlap);
    let target = spawn_caster(&mut app, "B", -3.0, ProjectileCollisionMode::Overlap);
    spawn_wall(&mut app, -8.0);

    let projectile = fire(&mut app, caster);
    run_for(&mut app, 60);

    assert!(!is_alive(&app, projectile));

    // Первый и единственный impact — pawn B, до стены снаряд не долетел
    let recorded = app.world().resource::<Recorded>();
    assert_eq!(recorded.impacts.len(), 1, "impacts: {:?}", recorded.impacts);
    assert_eq!(recorded.impacts[0].other, target);
    assert_eq!(recorded.impacts[0].other_name, "B");
    assert_eq!(recorded.impacts[0].kind, ImpactKind::Overlap);

    // Marker на месте overlap
    let mut markers = app
        .world_mut()
        .query_filtered::<&Transform, With<DebugMarker>>();
    let marker_positions: Vec<Vec3> = markers
        .iter(app.world())
        .map(|transform| transform.translation)
        .collect();
    assert_eq!(marker_positions, vec![recorded.impacts[0].position]);
}

#[test]
fn test_mixed_projectile_detonates_barrel() {
    let mut app = create_arena_app(4);

    let caster = spawn_caster(&mut app, "A", 0.0, ProjectileCollisionMode::Mixed);
    let barrel = spawn_explosive_barrel(
        &mut app.world_mut().commands(),
        Vec3::new(0.0, BARREL_HALF_HEIGHT, -5.0),
        ExplosiveBarrel::default(),
        RadialForce::default(),
    );
    app.world_mut().flush();

    let projectile = fire(&mut app, caster);
    run_for(&mut app, 60);

    assert!(!is_alive(&app, projectile));

    {
        let recorded = app.world().resource::<Recorded>();
        assert_eq!(
            recorded.detonations.len(),
            1,
            "detonations: {:?}",
            recorded.detonations
        );
        assert_eq!(recorded.detonations[0].barrel, barrel);
        assert_eq!(recorded.detonations[0].projectile, projectile);

        // Блокирующий hit, не overlap
        let impact = recorded
            .impacts
            .iter()
            .find(|impact| impact.other == barrel)
            .expect("projectile reported the barrel impact");
        assert_eq!(impact.kind, ImpactKind::Hit);
    }

    assert!(is_alive(&app, barrel), "barrel waits 2 sec before destroy");
    assert!(app.world().get::<DestroyAfter>(barrel).is_some());

    // 60 тиков уже прошло после взрыва < 1 sec; ещё 2 sec — точно уничтожена
    run_for(&mut app, 120);
    assert!(!is_alive(&app, barrel), "barrel still alive 2 sec after detonation");
}

#[test]
fn test_arena_caster_detonates_barrels() {
    let mut app = create_arena_app(42);

    let arena = {
        let world = app.world_mut();
        let mut rng = world
            .remove_resource::<DeterministicRng>()
            .expect("create_headless_app inserts DeterministicRng");
        // Пол уже есть у create_arena_app, spawn_arena добавит свой — не мешает
        let arena = spawn_arena(&mut world.commands(), &mut rng, ArenaSettings::default());
        world.insert_resource(rng);
        world.flush();
        arena
    };

    for &barrel in &arena.barrels {
        aim_and_fire(app.world_mut(), &arena, barrel);
        // 1.5 sec: перелёт через всю арену
        run_for(&mut app, 90);
    }

    let recorded = app.world().resource::<Recorded>();
    assert!(
        !recorded.detonations.is_empty(),
        "no barrel detonated in the demo arena"
    );
}
