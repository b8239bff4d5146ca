//! Journal entry types.

use cg_core::{Advancement, EnemyId, Location};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the run journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum JournalEntry {
    /// Something happened.
    Narrative {
        /// Sequence number, unique within the run.
        seq: u64,
        /// The narrative text.
        text: String,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
    /// The character arrived somewhere.
    Travel {
        /// Sequence number.
        seq: u64,
        /// Destination.
        location: Location,
        /// The clamped table roll, when the trip was rolled.
        roll: Option<u8>,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
    /// A turn of combat.
    Combat {
        /// Sequence number.
        seq: u64,
        /// The opponent.
        enemy: EnemyId,
        /// What happened this turn.
        text: String,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
    /// An advancement was granted.
    Advancement {
        /// Sequence number.
        seq: u64,
        /// The advancement.
        advancement: Advancement,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
    /// The run ended.
    Ending {
        /// Sequence number.
        seq: u64,
        /// True for a win, false for death.
        won: bool,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
}

impl JournalEntry {
    /// Sequence number of the entry.
    pub fn seq(&self) -> u64 {
        match self {
            Self::Narrative { seq, .. }
            | Self::Travel { seq, .. }
            | Self::Combat { seq, .. }
            | Self::Advancement { seq, .. }
            | Self::Ending { seq, .. } => *seq,
        }
    }

    /// When the entry was recorded.
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Narrative { timestamp, .. }
            | Self::Travel { timestamp, .. }
            | Self::Combat { timestamp, .. }
            | Self::Advancement { timestamp, .. }
            | Self::Ending { timestamp, .. } => *timestamp,
        }
    }

    /// One-line rendering used by the log view.
    pub fn text(&self) -> String {
        match self {
            Self::Narrative { text, .. } => text.clone(),
            Self::Travel {
                location,
                roll: Some(roll),
                ..
            } => format!("You travel to {location} (rolled {roll})."),
            Self::Travel { location, .. } => format!("You travel to {location}."),
            Self::Combat { text, .. } => text.clone(),
            Self::Advancement { advancement, .. } => {
                format!("Advancement gained: {}", advancement.description())
            }
            Self::Ending { won: true, .. } => "You are the Harnaś!".to_string(),
            Self::Ending { won: false, .. } => "You died.".to_string(),
        }
    }
}
