//! Core types for Corny Groń: static catalogs and the mutable character.
//!
//! This crate holds everything a run needs to describe itself without
//! rolling a single die: the weapon, scroll, advancement, enemy and
//! location tables, plus the [`Character`] aggregate that owns every
//! piece of mutable run state. Dice and combat live in `cg-mechanics`.

/// Immutable game tables.
pub mod catalog;
/// The mutable character aggregate.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Carried equipment and consumables.
pub mod inventory;

/// Re-export catalog types.
pub use catalog::{
    ADVANCEMENT_COUNT, Advancement, EnemyCategory, EnemyId, EnemyStats, FIREARMS, LOCATION_TABLE,
    Location, Scroll, ScrollKind, Weapon, WeaponStats, clamp_location_roll,
};
/// Re-export the character aggregate.
pub use character::{Character, HalvedEnemies, MapStatus, RestCooldowns, RestSite};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export inventory types.
pub use inventory::{Inventory, Loseable, MAX_POTIONS};
