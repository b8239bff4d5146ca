//! A dice source wrapper that remembers recent rolls.

use std::collections::VecDeque;

use log::debug;

use super::{DiceSource, DieResult, RollResult};

/// Wraps a dice source and records the last few rolls.
#[derive(Debug, Clone)]
pub struct DiceTray<D> {
    source: D,
    history: VecDeque<RollResult>,
    limit: usize,
}

impl<D: DiceSource> DiceTray<D> {
    /// Wrap a source, keeping at most `limit` rolls (minimum 1).
    pub fn new(source: D, limit: usize) -> Self {
        Self {
            source,
            history: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    /// Recent rolls, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &RollResult> {
        self.history.iter()
    }

    /// The most recent roll.
    pub fn last(&self) -> Option<&RollResult> {
        self.history.front()
    }

    /// The wrapped source.
    pub fn source(&self) -> &D {
        &self.source
    }

    /// The wrapped source, mutably.
    pub fn source_mut(&mut self) -> &mut D {
        &mut self.source
    }

    fn record(&mut self, result: RollResult) {
        debug!("rolled {result}");
        self.history.push_front(result);
        self.history.truncate(self.limit);
    }
}

impl<D: DiceSource> DiceSource for DiceTray<D> {
    fn roll(&mut self, sides: u32) -> u32 {
        let value = self.source.roll(sides);
        self.record(RollResult {
            dice: vec![DieResult { sides, value }],
        });
        value
    }

    fn roll_many(&mut self, sides: &[u32]) -> RollResult {
        let result = self.source.roll_many(sides);
        self.record(result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn keeps_only_limit() {
        let mut tray = DiceTray::new(ScriptedDice::new([1, 2, 3]), 2);
        tray.roll(6);
        tray.roll(6);
        tray.roll(6);
        let values: Vec<u32> = tray.recent().map(|r| r.total()).collect();
        assert_eq!(values, vec![3, 2]);
    }

    #[test]
    fn roll_many_recorded_once() {
        let mut tray = DiceTray::new(ScriptedDice::new([4, 6]), 5);
        let r = tray.roll_many(&[4, 6]);
        assert_eq!(r.total(), 10);
        assert_eq!(tray.recent().count(), 1);
        assert_eq!(tray.last().map(|r| r.count()), Some(2));
    }

    #[test]
    fn zero_limit_still_keeps_one() {
        let mut tray = DiceTray::new(ScriptedDice::new([5]), 0);
        tray.roll(6);
        assert_eq!(tray.last().map(|r| r.total()), Some(5));
        assert_eq!(tray.source().remaining(), 0);
    }
}
