use crate::catalog::{EnemyCategory, EnemyId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised when converting raw ids into catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Advancement ids run from 1 to 6.
    #[error("unknown advancement id: {0}")]
    UnknownAdvancement(u8),

    /// Manor rooms are numbered 1 to 6.
    #[error("unknown manor room: {0}")]
    UnknownManorRoom(u8),

    /// A resilience pick named an enemy from the wrong tier.
    #[error("{enemy} is not a {expected} enemy")]
    WrongCategory {
        /// The enemy that was picked.
        enemy: EnemyId,
        /// The category the slot requires.
        expected: EnemyCategory,
    },
}
