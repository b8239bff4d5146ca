//! Dice, loot tables, and the turn-based combat resolver for Corny Groń.
//!
//! Every random decision in the game goes through a [`DiceSource`], so a
//! run can be replayed from a seed or driven by a scripted sequence in
//! tests. The [`Combat`] resolver plays out one fight against a single
//! enemy, and [`resolve_spoils`] turns a victory into rewards.

pub mod combat;
pub mod dice;
pub mod error;
pub mod loot;
pub mod rewards;

pub use combat::{AvailableActions, Combat, CombatAction, CombatEvent, CombatOutcome, FightSetup, Foe};
pub use dice::{DiceSource, DiceTray, DieResult, RollResult, ScriptedDice, SeededDice};
pub use error::{MechError, MechResult, Rejection};
pub use loot::{grant_random_object, random_scroll};
pub use rewards::{RewardTag, Spoils, resolve_spoils};
