//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: маркеры акторов (Pawn, WorldGeometry) + ColliderOwner
//! - collision: каналы и профили ответа на коллизии

pub mod actor;
pub mod collision;

// Re-exports для удобного импорта
pub use actor::*;
pub use collision::*;
