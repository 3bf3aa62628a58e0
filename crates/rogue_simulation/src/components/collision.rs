//! Collision channels и профили ответа
//!
//! ## Архитектура:
//! - **Channel:** тип объекта (WorldStatic, WorldDynamic, Pawn, PhysicsBody) = один бит Rapier `Group`
//! - **Response:** как профиль реагирует на канал (Ignore / Overlap / Block)
//! - **Profile:** object channel + response на каждый канал
//!
//! Rapier не умеет per-channel response на одном коллайдере, поэтому профиль
//! раскладывается на два коллайдера:
//! - solid коллайдер: filters = каналы с `Block`
//! - sensor коллайдер: filters = каналы с `Overlap`

use bevy::prelude::*;
use bevy_rapier3d::prelude::{CollisionGroups, Group};
use serde::{Deserialize, Serialize};

/// Канал коллизий (тип объекта)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum CollisionChannel {
    /// Статичная геометрия уровня (стены, пол)
    WorldStatic,
    /// Подвижные не-физические объекты (снаряды)
    WorldDynamic,
    /// Персонажи
    Pawn,
    /// Симулируемые rigid body (бочки)
    PhysicsBody,
}

impl CollisionChannel {
    pub const ALL: [CollisionChannel; 4] = [
        CollisionChannel::WorldStatic,
        CollisionChannel::WorldDynamic,
        CollisionChannel::Pawn,
        CollisionChannel::PhysicsBody,
    ];

    pub fn group(self) -> Group {
        match self {
            CollisionChannel::WorldStatic => Group::GROUP_1,
            CollisionChannel::WorldDynamic => Group::GROUP_2,
            CollisionChannel::Pawn => Group::GROUP_3,
            CollisionChannel::PhysicsBody => Group::GROUP_4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum CollisionResponse {
    #[default]
    Ignore,
    Overlap,
    Block,
}

/// Response профиля на каждый канал
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelResponses {
    pub world_static: CollisionResponse,
    pub world_dynamic: CollisionResponse,
    pub pawn: CollisionResponse,
    pub physics_body: CollisionResponse,
}

impl ChannelResponses {
    pub fn all(response: CollisionResponse) -> Self {
        Self {
            world_static: response,
            world_dynamic: response,
            pawn: response,
            physics_body: response,
        }
    }

    pub fn get(&self, channel: CollisionChannel) -> CollisionResponse {
        match channel {
            CollisionChannel::WorldStatic => self.world_static,
            CollisionChannel::WorldDynamic => self.world_dynamic,
            CollisionChannel::Pawn => self.pawn,
            CollisionChannel::PhysicsBody => self.physics_body,
        }
    }

    pub fn set(&mut self, channel: CollisionChannel, response: CollisionResponse) {
        match channel {
            CollisionChannel::WorldStatic => self.world_static = response,
            CollisionChannel::WorldDynamic => self.world_dynamic = response,
            CollisionChannel::Pawn => self.pawn = response,
            CollisionChannel::PhysicsBody => self.physics_body = response,
        }
    }
}

/// Профиль коллизий актора (object channel + responses)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct CollisionProfile {
    pub object_type: CollisionChannel,
    pub responses: ChannelResponses,
}

impl CollisionProfile {
    /// Симулируемый физический актор: блокирует всё
    pub fn physics_actor() -> Self {
        Self {
            object_type: CollisionChannel::PhysicsBody,
            responses: ChannelResponses::all(CollisionResponse::Block),
        }
    }

    /// Статичная геометрия уровня
    pub fn world_static() -> Self {
        Self {
            object_type: CollisionChannel::WorldStatic,
            responses: ChannelResponses::all(CollisionResponse::Block),
        }
    }

    pub fn pawn() -> Self {
        Self {
            object_type: CollisionChannel::Pawn,
            responses: ChannelResponses::all(CollisionResponse::Block),
        }
    }

    /// Builder: переопределить response на один канал
    pub fn with_response(mut self, channel: CollisionChannel, response: CollisionResponse) -> Self {
        self.responses.set(channel, response);
        self
    }

    pub fn response_to(&self, channel: CollisionChannel) -> CollisionResponse {
        self.responses.get(channel)
    }

    fn mask_for(&self, response: CollisionResponse) -> Group {
        CollisionChannel::ALL
            .into_iter()
            .filter(|channel| self.responses.get(*channel) == response)
            .fold(Group::NONE, |mask, channel| mask | channel.group())
    }

    /// Каналы, которые физически останавливают объект
    pub fn blocking_mask(&self) -> Group {
        self.mask_for(CollisionResponse::Block)
    }

    /// Каналы, дающие только overlap trigger
    pub fn overlap_mask(&self) -> Group {
        self.mask_for(CollisionResponse::Overlap)
    }

    pub fn blocks_anything(&self) -> bool {
        !self.blocking_mask().is_empty()
    }

    pub fn overlaps_anything(&self) -> bool {
        !self.overlap_mask().is_empty()
    }

    /// Groups для solid коллайдера
    pub fn solid_groups(&self) -> CollisionGroups {
        CollisionGroups::new(self.object_type.group(), self.blocking_mask())
    }

    /// Groups для sensor коллайдера
    pub fn sensor_groups(&self) -> CollisionGroups {
        CollisionGroups::new(self.object_type.group(), self.overlap_mask())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physics_actor_blocks_everything() {
        let profile = CollisionProfile::physics_actor();

        assert_eq!(profile.object_type, CollisionChannel::PhysicsBody);
        assert_eq!(
            profile.blocking_mask(),
            Group::GROUP_1 | Group::GROUP_2 | Group::GROUP_3 | Group::GROUP_4
        );
        assert!(!profile.overlaps_anything());
    }

    #[test]
    fn test_with_response_overrides_single_channel() {
        let profile = CollisionProfile::pawn()
            .with_response(CollisionChannel::WorldDynamic, CollisionResponse::Overlap);

        assert_eq!(profile.response_to(CollisionChannel::WorldDynamic), CollisionResponse::Overlap);
        assert_eq!(profile.response_to(CollisionChannel::WorldStatic), CollisionResponse::Block);
        assert_eq!(profile.overlap_mask(), Group::GROUP_2);
        assert!(!profile.blocking_mask().contains(Group::GROUP_2));
    }

    #[test]
    fn test_ignored_channels_in_no_mask() {
        let profile = CollisionProfile {
            object_type: CollisionChannel::WorldDynamic,
            responses: ChannelResponses::default(),
        };

        assert!(!profile.blocks_anything());
        assert!(!profile.overlaps_anything());
        assert_eq!(profile.solid_groups().filters, Group::NONE);
        assert_eq!(profile.sensor_groups().memberships, Group::GROUP_2);
    }
}
