//! Advancement rolls.
//!
//! Each roll is a d6 re-rolled until it lands on an advancement not yet
//! held. Resilience needs two picks before it is granted.

use cg_core::{Advancement, EnemyId};
use cg_mechanics::DiceSource;

use crate::error::RunResult;
use crate::scene::Scene;
use crate::session::Run;
use crate::step::{Continuation, Step};

/// Give up re-rolling after this many collisions and take the lowest gap.
const MAX_REROLLS: usize = 64;

/// Roll a d6 until it shows an advancement not in `held`.
///
/// Returns `None` when everything is already held.
pub fn roll_missing(
    held: &std::collections::BTreeSet<Advancement>,
    dice: &mut dyn DiceSource,
) -> Option<Advancement> {
    if Advancement::ALL.iter().all(|adv| held.contains(adv)) {
        return None;
    }
    for _ in 0..MAX_REROLLS {
        let roll = u8::try_from(dice.d6()).unwrap_or(1);
        if let Ok(adv) = Advancement::from_id(roll) {
            if !held.contains(&adv) {
                return Some(adv);
            }
        }
    }
    Advancement::ALL.into_iter().find(|adv| !held.contains(adv))
}

impl Run {
    /// Roll the first of `remaining` advancements and queue the rest.
    pub(crate) fn roll_advancement(&mut self, remaining: u32) {
        if remaining == 0 {
            self.finish();
            return;
        }
        let Some(adv) = roll_missing(self.character.advancements(), &mut self.dice) else {
            self.finish();
            return;
        };
        if remaining > 1 {
            self.pending.push(Continuation::Advancements(remaining - 1));
        }

        if adv == Advancement::Resilience {
            let mut scene = Scene::new(
                "Advancement!",
                "Resilience: choose a scanty enemy whose blows will be halved.",
            );
            for enemy in EnemyId::SCANTY {
                scene = scene.choice(enemy.name(), Step::PickScanty(enemy));
            }
            self.show(scene);
            return;
        }

        self.character.grant(adv);
        self.journal.advancement(adv);
        self.show(
            Scene::new("Advancement!", format!("You have grown stronger: {}", adv.description()))
                .choice("Continue", Step::Finish),
        );
    }

    pub(crate) fn pick_scanty(&mut self, scanty: EnemyId) {
        let mut scene = Scene::new(
            "Advancement!",
            format!("Resilience: {scanty} chosen. Now choose a hardy enemy."),
        );
        for hardy in EnemyId::HARDY {
            scene = scene.choice(hardy.name(), Step::PickHardy { scanty, hardy });
        }
        self.show(scene);
    }

    pub(crate) fn pick_hardy(&mut self, scanty: EnemyId, hardy: EnemyId) -> RunResult<()> {
        if self.character.grant_resilience(scanty, hardy)? {
            self.journal.advancement(Advancement::Resilience);
            self.log(format!("Blows from the {scanty} and the {hardy} now land at half strength."));
        }
        self.finish();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::session::View;
    use cg_mechanics::ScriptedDice;
    use std::collections::BTreeSet;

    fn idle_run(rolls: &[u32]) -> Run {
        let mut script = vec![1, 1, 1, 4];
        script.extend_from_slice(rolls);
        let mut run = Run::with_dice(
            "Maryna",
            RunConfig::default().without_pacing(),
            ScriptedDice::new(script).with_fallback(1),
        );
        run.choose(0).unwrap();
        run
    }

    #[test]
    fn rerolls_collisions() {
        let held: BTreeSet<Advancement> = [Advancement::Vigor].into_iter().collect();
        let mut dice = ScriptedDice::new([3, 3, 4]);
        assert_eq!(roll_missing(&held, &mut dice), Some(Advancement::Renown));
    }

    #[test]
    fn nothing_left_to_roll() {
        let held: BTreeSet<Advancement> = Advancement::ALL.into_iter().collect();
        let mut dice = ScriptedDice::new([1]);
        assert_eq!(roll_missing(&held, &mut dice), None);
    }

    #[test]
    fn stuck_dice_still_find_a_gap() {
        let held: BTreeSet<Advancement> = [Advancement::HarnasTitle].into_iter().collect();
        let mut dice = ScriptedDice::new(Vec::<u32>::new()).with_fallback(1);
        assert_eq!(roll_missing(&held, &mut dice), Some(Advancement::SteadyHand));
    }

    #[test]
    fn two_rolls_in_sequence() {
        let mut run = idle_run(&[3, 5]);
        run.pending.push(Continuation::Advancements(2));
        run.finish();
        assert!(run.character().has_advancement(Advancement::Vigor));
        assert_eq!(run.character().hp(), 20);
        run.choose(0).unwrap();
        assert!(run.character().has_advancement(Advancement::Gunsmith));
        run.choose(0).unwrap();
        assert!(matches!(run.view(), View::Idle));
    }

    #[test]
    fn resilience_needs_two_picks() {
        let mut run = idle_run(&[6]);
        run.pending.push(Continuation::Advancements(1));
        run.finish();
        assert_eq!(run.scene().unwrap().choices.len(), 4);
        run.choose(3).unwrap();
        assert_eq!(run.scene().unwrap().choices.len(), 4);
        assert!(!run.character().has_advancement(Advancement::Resilience));
        run.choose(1).unwrap();
        assert!(run.character().has_advancement(Advancement::Resilience));
        assert_eq!(run.character().halved.scanty, Some(EnemyId::Wolf));
        assert_eq!(run.character().halved.hardy, Some(EnemyId::Bear));
    }

    #[test]
    fn sixth_advancement_wins_mid_sequence() {
        let mut run = idle_run(&[5]);
        for adv in [
            Advancement::HarnasTitle,
            Advancement::SteadyHand,
            Advancement::Vigor,
            Advancement::Renown,
        ] {
            run.character.grant(adv);
        }
        run.character
            .grant_resilience(EnemyId::Hajduk, EnemyId::Spook)
            .unwrap();
        run.pending.push(Continuation::Advancements(2));
        run.finish();
        assert!(matches!(run.view(), View::Won));
        assert!(run.character().has_won());
        assert!(run.pending().is_empty());
    }
}
