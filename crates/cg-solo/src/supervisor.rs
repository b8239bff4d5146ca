//! Terminal-state checks.
//!
//! Runs after every state change. Death takes precedence over victory.

use cg_core::Character;
use log::info;
use serde::{Deserialize, Serialize};

use crate::session::{Run, View};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ending {
    /// HP reached zero.
    Dead,
    /// All six advancements held.
    Won,
}

/// Check (and latch) the terminal state of a character.
pub fn check(character: &mut Character) -> Option<Ending> {
    if character.is_dead() {
        return Some(Ending::Dead);
    }
    if character.has_won() {
        return Some(Ending::Won);
    }
    if character.is_out_of_hp() {
        character.declare_dead();
        return Some(Ending::Dead);
    }
    if character.has_all_advancements() {
        character.declare_won();
        return Some(Ending::Won);
    }
    None
}

impl Run {
    /// Force the terminal view if the run has ended. Returns true when it has.
    pub(crate) fn supervise(&mut self) -> bool {
        let already_over = self.is_over();
        let Some(ending) = check(&mut self.character) else {
            return false;
        };
        if !already_over {
            info!("run {} ended: {ending:?}", self.character.run_id);
            self.journal.ending(ending == Ending::Won);
        }
        self.pending.clear();
        self.view = match ending {
            Ending::Dead => View::Dead,
            Ending::Won => View::Won,
        };
        true
    }
}
