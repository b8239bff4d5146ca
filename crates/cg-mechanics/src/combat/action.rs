//! Combat actions and event logging.

use serde::{Deserialize, Serialize};

/// An action the player can submit during a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatAction {
    /// Swing the wielded weapon.
    Attack,
    /// Drink a healing potion.
    DrinkPotion,
    /// Read the scroll at this index in the scroll list.
    UseScroll(usize),
    /// Run away.
    Flee,
}

impl std::fmt::Display for CombatAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attack => write!(f, "Attack"),
            Self::DrinkPotion => write!(f, "Drink potion"),
            Self::UseScroll(i) => write!(f, "Use scroll #{i}"),
            Self::Flee => write!(f, "Flee"),
        }
    }
}

/// A recorded combat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEvent {
    /// Turn number (1-based).
    pub turn: u32,
    /// What the player did.
    pub action: CombatAction,
    /// Narrative result of the turn.
    pub message: String,
}

impl std::fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[Turn {}] {}: {}", self.turn, self.action, self.message)
    }
}

/// Which actions the player may take right now.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AvailableActions {
    /// Attacking is always possible while the fight lasts.
    pub attack: bool,
    /// At least one potion is held.
    pub potion: bool,
    /// One flag per carried scroll, in inventory order.
    pub scrolls: Vec<bool>,
    /// Fleeing is always possible while the fight lasts.
    pub flee: bool,
    /// The fight allows the cap and a charge is held.
    pub vanish: bool,
}
