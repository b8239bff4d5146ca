//! Error types for the mechanics engine.

use cg_core::ScrollKind;

/// A precondition that stopped an action before it changed any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The fight already ended.
    FightOver,
    /// No potions left.
    NoPotions,
    /// No scroll at that index.
    NoSuchScroll(usize),
    /// This scroll cannot be read in a fight.
    ScrollNotForCombat(ScrollKind),
    /// A summoned bies is still fighting.
    HelperAlreadyActive,
    /// The fight does not allow slipping away with the cap.
    CapNotAllowed,
    /// The cap has no charges left.
    NoCapCharges,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FightOver => write!(f, "the fight is already over"),
            Self::NoPotions => write!(f, "no potions left"),
            Self::NoSuchScroll(i) => write!(f, "no scroll at index {i}"),
            Self::ScrollNotForCombat(k) => write!(f, "{k} cannot be used in combat"),
            Self::HelperAlreadyActive => write!(f, "a bies is already active"),
            Self::CapNotAllowed => write!(f, "the cap cannot be used in this fight"),
            Self::NoCapCharges => write!(f, "the cap has no charges"),
        }
    }
}

/// Errors that can occur during mechanics operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// The action was refused and nothing changed.
    #[error("rejected: {0}")]
    Rejected(Rejection),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
