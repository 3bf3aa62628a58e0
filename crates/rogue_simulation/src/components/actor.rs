//! Базовые компоненты акторов: Pawn, WorldGeometry, ColliderOwner

use bevy::prelude::*;

/// Персонаж (игрок, NPC) — может быть instigator снаряда
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Pawn;

/// Статичная геометрия уровня (пол, стены)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct WorldGeometry;

/// Дочерний коллайдер принадлежит актору-владельцу
///
/// Rapier сообщает коллизии по entity коллайдера; для sensor-коллайдеров
/// (child entity) бридж резолвит владельца через этот компонент.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ColliderOwner(pub Entity);

/// Человекочитаемое имя актора для логов (Name или entity id)
pub fn display_name(name: Option<&Name>, entity: Entity) -> String {
    match name {
        Some(name) => name.as_str().to_string(),
        None => format!("{:?}", entity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_name() {
        let entity = Entity::from_raw(7);
        let name = Name::new("Barrel_01");

        assert_eq!(display_name(Some(&name), entity), "Barrel_01");
        assert_eq!(display_name(None, entity), format!("{:?}", entity));
    }
}
