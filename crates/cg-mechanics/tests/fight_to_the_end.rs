//! Whole fights resolved with seeded dice.

use cg_core::{Character, EnemyId, Location, Weapon};
use cg_mechanics::{
    Combat, CombatAction, CombatOutcome, FightSetup, RewardTag, SeededDice, resolve_spoils,
};
use proptest::prelude::*;

const TURN_LIMIT: u32 = 200;

fn fight(enemy: EnemyId, weapon: Weapon, seed: u64) -> (Character, Combat, CombatOutcome) {
    let mut dice = SeededDice::new(seed);
    let mut hero = Character::new("Maryna", weapon, 0);
    let mut combat = Combat::begin(FightSetup::new(enemy, Location::DeepWoods), &mut hero);
    for _ in 0..TURN_LIMIT {
        let outcome = combat
            .act(CombatAction::Attack, &mut hero, &mut dice)
            .unwrap();
        if outcome.is_terminal() {
            return (hero, combat, outcome);
        }
    }
    panic!("{enemy} fight did not end within {TURN_LIMIT} turns");
}

proptest! {
    #[test]
    fn every_fight_ends_decisively(seed in any::<u64>(), idx in 0usize..EnemyId::ALL.len()) {
        let enemy = EnemyId::ALL[idx];
        let (hero, combat, outcome) = fight(enemy, Weapon::Sabre, seed);
        prop_assert!(combat.is_finished());
        match outcome {
            CombatOutcome::Victory { points } => {
                prop_assert!(hero.hp() > 0);
                prop_assert_eq!(points, enemy.stats().reward());
                prop_assert_eq!(hero.points, points);
            }
            CombatOutcome::Defeat => prop_assert!(hero.is_out_of_hp()),
            other => prop_assert!(false, "unexpected outcome {:?}", other),
        }
        prop_assert!(hero.hp() <= hero.max_hp());
    }

    #[test]
    fn fleeing_costs_at_most_the_flee_die(
        seed in any::<u64>(),
        n in 0u32..=8,
        idx in 0usize..EnemyId::ALL.len(),
    ) {
        let location = Location::DeepWoods;
        let mut dice = SeededDice::new(seed);
        let mut hero = Character::new("Maryna", Weapon::Knife, 0);
        let setup = FightSetup::new(EnemyId::ALL[idx], location).with_flee_die(n);
        let mut combat = Combat::begin(setup, &mut hero);
        let before = hero.hp();

        let outcome = combat.act(CombatAction::Flee, &mut hero, &mut dice).unwrap();
        let lost = before - hero.hp();
        prop_assert_eq!(outcome, CombatOutcome::Fled { damage: lost });
        if n == 0 {
            prop_assert_eq!(lost, 0);
        } else {
            prop_assert!((1..=n as i32).contains(&lost), "lost {} on a d{}", lost, n);
        }
        prop_assert!(combat.is_finished());
        prop_assert!(hero.has_escaped(location));
        prop_assert!(!hero.has_visited(location));
    }
}

#[test]
fn finished_fight_refuses_more_turns() {
    let (mut hero, mut combat, _) = fight(EnemyId::Hajduk, Weapon::Scattergun, 11);
    let mut dice = SeededDice::new(12);
    assert!(combat.act(CombatAction::Attack, &mut hero, &mut dice).is_err());
    assert!(combat.act(CombatAction::Flee, &mut hero, &mut dice).is_err());
}

#[test]
fn spoils_follow_a_spirit_victory() {
    let mut dice = SeededDice::new(3);
    let mut hero = Character::new("Maryna", Weapon::Karabela, 0);
    let spoils = resolve_spoils(EnemyId::Spirit, &[RewardTag::FallRisk], &mut hero, &mut dice);
    assert_eq!(spoils.advancement_rolls, 2);
    assert_eq!(hero.inventory.scrolls().len(), 3);
    assert!(hero.coins >= 1 && hero.coins <= 36);
    assert!(spoils.loss_reason.is_none());
}
