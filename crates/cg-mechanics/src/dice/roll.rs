//! Dice roll results and aggregation.

use serde::{Deserialize, Serialize};

/// The result of rolling a single die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieResult {
    /// Number of sides.
    pub sides: u32,
    /// The value rolled (1 to sides).
    pub value: u32,
}

/// The result of rolling one or more dice together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Individual die results.
    pub dice: Vec<DieResult>,
}

impl RollResult {
    /// Sum of all die values.
    pub fn total(&self) -> u32 {
        self.dice.iter().map(|d| d.value).sum()
    }

    /// Product of all die values, used by the `d6×d6` treasure rolls.
    pub fn product(&self) -> u32 {
        self.dice.iter().map(|d| d.value).product()
    }

    /// Number of dice in the result.
    pub fn count(&self) -> usize {
        self.dice.len()
    }
}

impl std::fmt::Display for RollResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sides: Vec<String> = self.dice.iter().map(|d| format!("d{}", d.sides)).collect();
        let values: Vec<String> = self.dice.iter().map(|d| d.value.to_string()).collect();
        write!(
            f,
            "{} [{}] = {}",
            sides.join("+"),
            values.join(", "),
            self.total()
        )
    }
}
