//! The Milord's manor: six rooms walked one after another.

use std::collections::BTreeSet;

use cg_core::{Advancement, EnemyId, Location};
use cg_mechanics::{DiceSource, RewardTag, grant_random_object, random_scroll};
use log::info;

use crate::fight::{EnemyDraw, FightPlan};
use crate::scene::Scene;
use crate::session::Run;
use crate::step::Step;

/// Number of rooms in the manor.
pub const ROOM_COUNT: u8 = 6;

/// What the Milord asks for in his study.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demand {
    /// All scrolls and potions.
    ScrollsAndPotions,
    /// All dutki and points.
    CoinsAndPoints,
    /// Your soul. Cannot be yielded without dying.
    Soul,
}

impl Demand {
    fn from_roll(roll: u32) -> Self {
        match roll {
            0..=2 => Self::ScrollsAndPotions,
            3..=4 => Self::CoinsAndPoints,
            _ => Self::Soul,
        }
    }

    fn text(self) -> &'static str {
        match self {
            Self::ScrollsAndPotions => "The Milord demands all your scrolls and potions.",
            Self::CoinsAndPoints => "The Milord demands all your dutki and glory.",
            Self::Soul => "The Milord demands your soul.",
        }
    }
}

/// Pick the next room: step down from the roll past visited rooms, and
/// fall back to the roll itself when no lower room is free.
pub fn pick_next_room(roll: u8, visited: &BTreeSet<u8>) -> u8 {
    (1..=roll)
        .rev()
        .find(|room| !visited.contains(room))
        .unwrap_or(roll)
}

fn milord_fight() -> FightPlan {
    FightPlan::new(
        EnemyDraw::Named {
            enemy: EnemyId::Milord,
            hardy: true,
        },
        Location::MilordsManor,
    )
    .with_flee_die(6)
    .with_cap(false)
    .with_rewards(&[RewardTag::ContinueManor])
}

fn hajduk_fight(extra: &[RewardTag]) -> FightPlan {
    FightPlan::new(
        EnemyDraw::Named {
            enemy: EnemyId::ManorHajduk,
            hardy: false,
        },
        Location::MilordsManor,
    )
    .with_rewards(extra)
    .with_rewards(&[RewardTag::ContinueManor])
}

impl Run {
    pub(crate) fn enter_manor(&mut self, from_cave: bool) {
        self.log("You enter the Milord's Manor.");
        self.character.manor_entered_from_cave = from_cave;
        self.character.current_location = Location::MilordsManor;
        self.character.in_cave = false;
        let room = if from_cave {
            6
        } else {
            match self.dice.d6() {
                0..=2 => 3,
                3..=5 => 2,
                _ => 4,
            }
        };
        self.manor_room(room);
    }

    fn manor_room(&mut self, room: u8) {
        info!("manor room {room}");
        self.character.manor_rooms_visited.insert(room);
        let from_cave = self.character.manor_entered_from_cave;
        match room {
            1 => {
                let demand = Demand::from_roll(self.dice.d6());
                let scene = Scene::new("The Study", demand.text());
                let scene = if demand == Demand::Soul {
                    scene
                        .choice("Fight", Step::Fight(milord_fight()))
                        .choice("Submit", Step::Submit)
                } else {
                    scene
                        .choice("Give Them", Step::Yield(demand))
                        .choice("Fight", Step::Fight(milord_fight()))
                };
                self.show(scene);
            }
            2 => {
                let scene = Scene::new("The Hallway", "A hajduk in livery bars the corridor.")
                    .choice("Fight", Step::Fight(hajduk_fight(&[])));
                self.show(scene);
            }
            3 => {
                let scene = Scene::new(
                    "The Dining Room",
                    "A feast is laid out, still steaming. Nobody is here.",
                )
                .choice("Eat", Step::Eat)
                .choice("Leave It", Step::RoomDone { allow_exit: true });
                self.show(scene);
            }
            4 => match self.dice.d6() {
                0..=2 => {
                    let scene = Scene::new("The Pantry", "Only gnawed bones remain.")
                        .choice("Continue", Step::RoomDone { allow_exit: from_cave });
                    self.show(scene);
                }
                3..=4 => {
                    let scene = Scene::new("The Pantry", "A hajduk guards the larder.").choice(
                        "Fight",
                        Step::Fight(hajduk_fight(&[RewardTag::PantryOne])),
                    );
                    self.show(scene);
                }
                _ => {
                    let healed = self.character.heal(self.dice.amount(6));
                    let first = grant_random_object(&mut self.character, &mut self.dice);
                    let second = grant_random_object(&mut self.character, &mut self.dice);
                    let text = format!(
                        "You feast and heal {healed} HP. Among the jars you find: {first}, {second}."
                    );
                    self.log(text.clone());
                    self.show(
                        Scene::new("The Pantry", text)
                            .choice("Continue", Step::RoomDone { allow_exit: true }),
                    );
                }
            },
            5 => match self.dice.d6() {
                0..=2 => {
                    let spook = FightPlan::new(
                        EnemyDraw::Named {
                            enemy: EnemyId::Spook,
                            hardy: true,
                        },
                        Location::MilordsManor,
                    )
                    .with_rewards(&[RewardTag::LibrarySpook, RewardTag::ContinueManor]);
                    let scene = Scene::new("The Library", "A spook rises from the shelves.")
                        .choice("Fight", Step::Fight(spook));
                    self.show(scene);
                }
                3..=4 => {
                    for _ in 0..2 {
                        let scroll = random_scroll(&mut self.dice);
                        self.character.inventory.add_scroll(scroll);
                    }
                    let text = "You find two scrolls among the books.";
                    self.log(text);
                    self.show(
                        Scene::new("The Library", text)
                            .choice("Continue", Step::RoomDone { allow_exit: true }),
                    );
                }
                _ => {
                    self.character.milord_true_name_known = true;
                    let text = "A genealogy reveals the Milord's true name.";
                    self.log(text);
                    self.show(
                        Scene::new("The Library", text)
                            .choice("Continue", Step::RoomDone { allow_exit: true }),
                    );
                }
            },
            _ => match self.dice.d6() {
                0..=2 => {
                    let text = if self.character.inventory.add_potion() {
                        "You find a herbal potion on a dusty shelf."
                    } else {
                        "You find a herbal potion, but your pouch is full."
                    };
                    self.log(text);
                    self.show(
                        Scene::new("The Cellar", text)
                            .choice("Continue", Step::RoomDone { allow_exit: true }),
                    );
                }
                3..=4 => {
                    let scene = Scene::new(
                        "The Cellar",
                        "A bottle of something dark and fizzing sits alone on a barrel.",
                    )
                    .choice("Drink", Step::DrinkMystery)
                    .choice("Leave It", Step::RoomDone { allow_exit: from_cave });
                    self.show(scene);
                }
                _ => {
                    let coins = self.dice.d4() * self.dice.d6();
                    self.character.coins += coins;
                    let text = format!("Behind a loose brick lies a purse with {coins} dutki.");
                    self.log(text.clone());
                    self.show(
                        Scene::new("The Cellar", text)
                            .choice("Continue", Step::RoomDone { allow_exit: from_cave }),
                    );
                }
            },
        }
    }

    pub(crate) fn room_done(&mut self, allow_exit: bool) {
        self.character.mark_visited(Location::MilordsManor);
        self.manor_choice(allow_exit);
    }

    pub(crate) fn manor_choice(&mut self, allow_exit: bool) {
        let scene = if self.character.manor_rooms_visited.len() >= usize::from(ROOM_COUNT) {
            Scene::new("Milord's Manor", "Every room has been explored.")
                .choice("Leave Manor", Step::Finish)
        } else {
            Scene::new("Milord's Manor", "Corridors lead deeper into the manor.")
                .choice("Explore Another Room", Step::NextRoom)
                .choice_if(allow_exit, "Leave Manor", Step::Finish)
        };
        self.show(scene);
    }

    pub(crate) fn next_room(&mut self) {
        let roll = u8::try_from(self.dice.d6()).unwrap_or(ROOM_COUNT);
        let room = pick_next_room(roll, &self.character.manor_rooms_visited);
        self.manor_room(room);
    }

    pub(crate) fn yield_to(&mut self, demand: Demand) {
        match demand {
            Demand::ScrollsAndPotions => {
                self.character.inventory.clear_scrolls();
                self.character.inventory.clear_potions();
            }
            Demand::CoinsAndPoints => {
                self.character.coins = 0;
                self.character.points = 0;
            }
            Demand::Soul => {}
        }
        self.log("You hand over what the Milord asks.");
        self.room_done(true);
    }

    pub(crate) fn submit(&mut self) {
        let hp = self.character.hp();
        self.character.wound(hp);
        self.log("The Milord takes your soul.");
        self.finish();
    }

    pub(crate) fn eat(&mut self) {
        let from_cave = self.character.manor_entered_from_cave;
        match self.dice.d6() {
            1 => {
                let mut scene = Scene::new(
                    "Cursed Wine",
                    "The wine burns like ice. Something of you slips away.",
                );
                let held: Vec<Advancement> =
                    self.character.advancements().iter().copied().collect();
                if held.is_empty() {
                    scene = scene.choice("No Advancements to Lose", Step::CursedWine(None));
                }
                for adv in held {
                    scene = scene.choice(
                        format!("Lose Advancement {}", adv.id()),
                        Step::CursedWine(Some(adv)),
                    );
                }
                self.show(scene);
            }
            2..=3 => {
                let lost = self.character.wound(self.dice.amount(6));
                self.character.next_fight_hit_mod = -1;
                self.log(format!("The food is spoiled. You lose {lost} HP and feel weak."));
                if self.supervise() {
                    return;
                }
                self.room_done(from_cave);
            }
            4..=5 => {
                let healed = self.character.heal(self.dice.amount(6));
                self.log(format!("A hearty meal. You heal {healed} HP."));
                self.room_done(from_cave);
            }
            _ => {
                self.character.heal_full();
                self.character.next_fight_hit_mod = 1;
                self.log("A feast fit for a king. You are fully healed and emboldened.");
                self.room_done(from_cave);
            }
        }
    }

    pub(crate) fn cursed_wine(&mut self, lost: Option<Advancement>) {
        self.character.points = 0;
        if let Some(adv) = lost {
            if self.character.revoke(adv) {
                self.log(format!("You lost advancement: {}.", adv.description()));
            }
        }
        self.room_done(true);
    }

    pub(crate) fn drink_mystery(&mut self) {
        let from_cave = self.character.manor_entered_from_cave;
        if self.dice.d6() % 2 == 0 {
            self.character.heal_full();
            self.log("The potion restores you completely.");
        } else {
            let lost = self.character.wound(self.dice.amount(6));
            self.character.points = 0;
            self.log(format!("Poison! You lose {lost} HP and all your points."));
            if self.supervise() {
                return;
            }
        }
        self.room_done(from_cave);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::session::View;
    use cg_mechanics::ScriptedDice;
    use proptest::prelude::*;

    fn idle_run(rolls: &[u32]) -> Run {
        let mut script = vec![1, 1, 1, 4];
        script.extend_from_slice(rolls);
        let mut run = Run::with_dice(
            "Maryna",
            RunConfig::default().without_pacing(),
            ScriptedDice::new(script).with_fallback(5),
        );
        run.choose(0).unwrap();
        run
    }

    #[test]
    fn next_room_steps_down_past_visited() {
        let visited: BTreeSet<u8> = [3, 4].into_iter().collect();
        assert_eq!(pick_next_room(4, &visited), 2);
        assert_eq!(pick_next_room(5, &visited), 5);
    }

    #[test]
    fn next_room_wraps_to_roll() {
        let visited: BTreeSet<u8> = [1, 2].into_iter().collect();
        assert_eq!(pick_next_room(2, &visited), 2);
    }

    proptest! {
        #[test]
        fn never_skips_a_free_lower_room(roll in 1u8..=6, mask in 0u8..64) {
            let visited: BTreeSet<u8> = (1..=6).filter(|r| mask & (1 << (r - 1)) != 0).collect();
            let room = pick_next_room(roll, &visited);
            let free_lower = (1..=roll).any(|r| !visited.contains(&r));
            if free_lower {
                prop_assert!(!visited.contains(&room));
                prop_assert!(room <= roll);
            } else {
                prop_assert_eq!(room, roll);
            }
        }
    }

    #[test]
    fn entry_rolls_pick_first_room() {
        let mut run = idle_run(&[1]);
        run.enter_manor(false);
        assert_eq!(run.scene().unwrap().title, "The Dining Room");
        let mut run = idle_run(&[4]);
        run.enter_manor(false);
        assert_eq!(run.scene().unwrap().title, "The Hallway");
        let mut run = idle_run(&[6, 1]);
        run.enter_manor(false);
        assert_eq!(run.scene().unwrap().title, "The Pantry");
    }

    #[test]
    fn cave_entry_starts_in_cellar() {
        let mut run = idle_run(&[1]);
        run.character.in_cave = true;
        run.enter_manor(true);
        assert!(!run.character().in_cave);
        assert_eq!(run.scene().unwrap().title, "The Cellar");
        run.choose(0).unwrap();
        assert_eq!(run.character().inventory.potions(), 1);
        assert_eq!(
            run.scene().unwrap().labels(),
            vec!["Explore Another Room", "Leave Manor"]
        );
    }

    #[test]
    fn spoiled_food_blocks_exit_for_front_door_guests() {
        let mut run = idle_run(&[1, 2, 3]);
        run.enter_manor(false);
        run.choose(0).unwrap();
        assert_eq!(run.character().hp(), 12);
        assert_eq!(run.character().next_fight_hit_mod, -1);
        assert_eq!(run.scene().unwrap().labels(), vec!["Explore Another Room"]);
        assert!(run.character().has_visited(Location::MilordsManor));
    }

    #[test]
    fn cursed_wine_without_advancements() {
        let mut run = idle_run(&[1, 1]);
        run.character.points = 9;
        run.enter_manor(false);
        run.choose(0).unwrap();
        assert_eq!(run.scene().unwrap().labels(), vec!["No Advancements to Lose"]);
        run.choose(0).unwrap();
        assert_eq!(run.character().points, 0);
    }

    #[test]
    fn cursed_wine_takes_chosen_advancement() {
        let mut run = idle_run(&[1, 1]);
        run.character.grant(Advancement::Vigor);
        run.enter_manor(false);
        run.choose(0).unwrap();
        run.choose(0).unwrap();
        assert!(!run.character().has_advancement(Advancement::Vigor));
        assert_eq!(run.character().max_hp(), 15);
    }

    #[test]
    fn study_demand_can_be_paid() {
        let mut run = idle_run(&[3]);
        run.character.points = 5;
        run.character.manor_entered_from_cave = false;
        run.manor_room(1);
        assert_eq!(run.scene().unwrap().labels(), vec!["Give Them", "Fight"]);
        run.choose(0).unwrap();
        assert_eq!(run.character().coins, 0);
        assert_eq!(run.character().points, 0);
    }

    #[test]
    fn study_fight_is_the_milord() {
        let mut run = idle_run(&[6]);
        run.manor_room(1);
        assert_eq!(run.scene().unwrap().labels(), vec!["Fight", "Submit"]);
        run.choose(0).unwrap();
        let combat = run.combat().unwrap();
        assert_eq!(combat.enemy(), EnemyId::Milord);
        assert_eq!(combat.setup.flee_die, 6);
        assert!(!combat.setup.allow_cap);
    }

    #[test]
    fn submitting_is_fatal() {
        let mut run = idle_run(&[6]);
        run.manor_room(1);
        run.choose(1).unwrap();
        assert!(matches!(run.view(), View::Dead));
        assert!(run.character().is_dead());
    }

    #[test]
    fn all_rooms_visited_offers_only_leave() {
        let mut run = idle_run(&[]);
        run.character.manor_rooms_visited = (1..=6).collect();
        run.manor_choice(false);
        assert_eq!(run.scene().unwrap().labels(), vec!["Leave Manor"]);
    }

    #[test]
    fn library_true_name() {
        let mut run = idle_run(&[6]);
        run.manor_room(5);
        assert!(run.character().milord_true_name_known);
    }
}
