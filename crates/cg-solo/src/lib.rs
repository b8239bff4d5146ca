//! Run controller for the Corny Groń mountain adventure.
//!
//! Owns the character, the dice, the current view (idle map, scene,
//! combat, or an ending) and a stack of pending continuations. Location
//! scripts, the manor, the cave, shops and advancement sequences are all
//! expressed as scenes whose choices carry a [`Step`]; anything that must
//! happen after a nested flow is pushed as a [`Continuation`].

pub mod advancement;
pub mod cave;
pub mod config;
pub mod encounter;
pub mod error;
pub mod fight;
pub mod journal;
pub mod manor;
pub mod route;
pub mod scene;
pub mod session;
pub mod shared;
pub mod shop;
pub mod snapshot;
pub mod step;
pub mod supervisor;

pub use config::RunConfig;
pub use error::{Refusal, RunError, RunResult};
pub use fight::{EnemyDraw, FightPlan, VictoryPlan};
pub use journal::{Journal, JournalEntry};
pub use scene::{Choice, Scene};
pub use session::{Run, View};
pub use shared::{FixedDelay, Pacer, SharedRun};
pub use shop::{SaleItem, ShopKind, ShopVisit, Ware};
pub use snapshot::{RunSnapshot, ViewSnapshot};
pub use step::{Continuation, Step};
pub use supervisor::Ending;
