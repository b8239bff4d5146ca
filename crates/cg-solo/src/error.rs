//! Error types for a run.

use cg_core::CoreError;
use cg_mechanics::MechError;
use thiserror::Error;

use crate::shop::Ware;

/// Result type for run operations.
pub type RunResult<T> = Result<T, RunError>;

/// Why a run-level action was refused. A refusal never changes state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Refusal {
    /// A scene is waiting for a choice.
    #[error("finish the current scene first")]
    SceneOpen,
    /// A fight is in progress.
    #[error("you are in a fight")]
    InCombat,
    /// The chosen option is shown but not available.
    #[error("'{0}' is not available right now")]
    ChoiceDisabled(String),
    /// Not enough coins.
    #[error("not enough dutki (need {need}, have {have})")]
    NotEnoughCoins {
        /// Price of the action.
        need: u32,
        /// Coins carried.
        have: u32,
    },
    /// No potions to drink.
    #[error("no potions left")]
    NoPotions,
    /// Points or visited places are below the advancement thresholds.
    #[error("need 15 points and 12 visited places to advance")]
    ThresholdsNotMet,
    /// The divination sigil does not work underground.
    #[error("the sigil does not work in the cave")]
    InCave,
    /// No divination sigil carried.
    #[error("you carry no divination sigil")]
    NoSigil,
    /// Buying or selling outside a shop.
    #[error("there is no shop here")]
    NotInShop,
    /// This shop does not sell the ware.
    #[error("{0} is not sold here")]
    NotStocked(Ware),
    /// The item is already carried and only one may be held.
    #[error("you already carry {0}")]
    AlreadyOwned(&'static str),
    /// The potion pouch is full.
    #[error("your potion pouch is full")]
    PouchFull,
    /// Nothing of that kind to sell.
    #[error("you have nothing like that to sell")]
    NothingToSell,
}

/// Errors that can occur during a run.
#[derive(Debug, Error)]
pub enum RunError {
    /// A precondition was not met.
    #[error("rejected: {0}")]
    Rejected(Refusal),

    /// A combat action failed.
    #[error(transparent)]
    Mech(#[from] MechError),

    /// Catalog or character error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The character is dead or has won.
    #[error("the run is over")]
    RunOver,

    /// No scene is waiting for a choice.
    #[error("no active scene")]
    NoActiveScene,

    /// No fight is in progress.
    #[error("no active combat")]
    NoActiveCombat,

    /// Choice index out of range.
    #[error("no choice numbered {0}")]
    InvalidChoice(usize),

    /// No choice label matched the input.
    #[error("no choice matches '{0}'")]
    UnknownChoice(String),

    /// Another action is still being processed.
    #[error("busy: another action is in progress")]
    Busy,

    /// An earlier action panicked midway; the run must be restarted.
    #[error("the run was interrupted by a failed action; start a new run")]
    Interrupted,
}

impl RunError {
    /// Whether this error is a refused precondition (including combat ones).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_) | Self::Mech(MechError::Rejected(_)))
    }
}

impl From<Refusal> for RunError {
    fn from(refusal: Refusal) -> Self {
        Self::Rejected(refusal)
    }
}
