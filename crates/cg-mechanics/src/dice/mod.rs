//! Dice sources and roll results.
//!
//! [`DiceSource`] is the only source of nondeterminism in the game.
//! [`SeededDice`] wraps a seeded `StdRng`, [`ScriptedDice`] replays a
//! fixed sequence for tests, and [`DiceTray`] wraps either one to keep a
//! short history of recent rolls.

pub mod roll;
pub mod source;
pub mod tray;

pub use roll::{DieResult, RollResult};
pub use source::{ScriptedDice, SeededDice};
pub use tray::DiceTray;

/// Produces uniformly distributed die results.
pub trait DiceSource {
    /// Roll one die. Returns a value in `1..=sides`; sides 0 and 1 yield 1.
    fn roll(&mut self, sides: u32) -> u32;

    /// Roll several dice at once.
    fn roll_many(&mut self, sides: &[u32]) -> RollResult {
        let dice = sides
            .iter()
            .map(|&s| DieResult {
                sides: s,
                value: self.roll(s),
            })
            .collect();
        RollResult { dice }
    }

    /// Roll one die and return the value as a signed amount.
    fn amount(&mut self, sides: u32) -> i32 {
        i32::try_from(self.roll(sides)).unwrap_or(i32::MAX)
    }

    /// Roll a d4.
    fn d4(&mut self) -> u32 {
        self.roll(4)
    }

    /// Roll a d6.
    fn d6(&mut self) -> u32 {
        self.roll(6)
    }
}

impl<D: DiceSource + ?Sized> DiceSource for Box<D> {
    fn roll(&mut self, sides: u32) -> u32 {
        (**self).roll(sides)
    }

    fn roll_many(&mut self, sides: &[u32]) -> RollResult {
        (**self).roll_many(sides)
    }
}
