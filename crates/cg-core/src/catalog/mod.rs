//! Static catalogs: weapons, scrolls, advancements, enemies, and locations.
//!
//! Every table here is fixed at compile time. Entries are addressed by
//! enum, never by display string, so lookups cannot miss.

pub mod advancements;
pub mod enemies;
pub mod locations;
pub mod scrolls;
pub mod weapons;

pub use advancements::{ADVANCEMENT_COUNT, Advancement};
pub use enemies::{EnemyCategory, EnemyId, EnemyStats, FIREARMS};
pub use locations::{LOCATION_TABLE, Location, clamp_location_roll};
pub use scrolls::{Scroll, ScrollKind};
pub use weapons::{Weapon, WeaponStats};
