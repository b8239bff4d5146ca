//! Journal storage and export.

use std::collections::VecDeque;

use cg_core::{Advancement, EnemyId, Location};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::entry::JournalEntry;

/// A bounded log of run events, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Journal {
    entries: VecDeque<JournalEntry>,
    limit: usize,
    next_seq: u64,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(50)
    }
}

impl Journal {
    /// Create an empty journal keeping at most `limit` entries.
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
            next_seq: 1,
        }
    }

    fn push(&mut self, build: impl FnOnce(u64) -> JournalEntry) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push_front(build(seq));
        self.entries.truncate(self.limit);
        seq
    }

    /// Record a narrative line.
    pub fn narrate(&mut self, text: impl Into<String>) -> u64 {
        let text = text.into();
        self.push(|seq| JournalEntry::Narrative {
            seq,
            text,
            timestamp: Utc::now(),
        })
    }

    /// Record a trip.
    pub fn travel(&mut self, location: Location, roll: Option<u8>) -> u64 {
        self.push(|seq| JournalEntry::Travel {
            seq,
            location,
            roll,
            timestamp: Utc::now(),
        })
    }

    /// Record a combat turn.
    pub fn combat(&mut self, enemy: EnemyId, text: impl Into<String>) -> u64 {
        let text = text.into();
        self.push(|seq| JournalEntry::Combat {
            seq,
            enemy,
            text,
            timestamp: Utc::now(),
        })
    }

    /// Record a granted advancement.
    pub fn advancement(&mut self, advancement: Advancement) -> u64 {
        self.push(|seq| JournalEntry::Advancement {
            seq,
            advancement,
            timestamp: Utc::now(),
        })
    }

    /// Record the end of the run.
    pub fn ending(&mut self, won: bool) -> u64 {
        self.push(|seq| JournalEntry::Ending {
            seq,
            won,
            timestamp: Utc::now(),
        })
    }

    /// All kept entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &JournalEntry> {
        self.entries.iter()
    }

    /// Entries recorded after `seq`, oldest first.
    pub fn since(&self, seq: u64) -> Vec<&JournalEntry> {
        let mut out: Vec<&JournalEntry> =
            self.entries.iter().filter(|e| e.seq() > seq).collect();
        out.reverse();
        out
    }

    /// Sequence number of the newest entry, or 0 when empty.
    pub fn last_seq(&self) -> u64 {
        self.entries.front().map_or(0, JournalEntry::seq)
    }

    /// Number of kept entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as markdown, oldest first.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Corny Groń Journal\n\n");
        for entry in self.entries.iter().rev() {
            let time = entry.timestamp().format("%H:%M:%S");
            match entry {
                JournalEntry::Travel { .. } => {
                    out.push_str(&format!("## {}\n\n", entry.text()));
                }
                JournalEntry::Combat { enemy, text, .. } => {
                    out.push_str(&format!("**{enemy}** ({time}): {text}\n\n"));
                }
                JournalEntry::Advancement { .. } => {
                    out.push_str(&format!("**{}**\n\n", entry.text()));
                }
                JournalEntry::Ending { .. } => {
                    out.push_str(&format!("---\n\n*{}*\n", entry.text()));
                }
                JournalEntry::Narrative { text, .. } => {
                    out.push_str(&format!("{text}\n\n"));
                }
            }
        }
        out
    }

    /// Export the journal as plain text, oldest first.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Corny Groń Journal\n==================\n\n");
        for entry in self.entries.iter().rev() {
            let time = entry.timestamp().format("%H:%M:%S");
            out.push_str(&format!("[{time}] {}\n", entry.text()));
        }
        out
    }
}
