//! The cave below the burrow.
//!
//! While in the cave, travelling rolls another cave encounter instead of
//! the location table.

use cg_core::{EnemyId, Location, RestSite};
use cg_mechanics::{DiceSource, RewardTag};

use crate::fight::{EnemyDraw, FightPlan};
use crate::scene::Scene;
use crate::session::Run;
use crate::step::Step;

fn cave_fight(draw: EnemyDraw, tags: &[RewardTag]) -> FightPlan {
    FightPlan::new(draw, Location::Cave).with_rewards(tags)
}

impl Run {
    pub(crate) fn enter_cave(&mut self) {
        self.log("You climb down into the Cave.");
        self.character.in_cave = true;
        self.character.current_location = Location::Cave;
        self.cave_encounter();
    }

    pub(crate) fn cave_encounter(&mut self) {
        match self.dice.d6() {
            1 => {
                let scene = Scene::new("Cave", "The cavern is dark and damp, but empty.")
                    .choice("Continue", Step::CaveOn);
                self.show(scene);
            }
            2 => {
                let penalty = if self.character.inventory.kaftan { 0 } else { 1 };
                let swim = self.dice.amount(6) + penalty;
                if swim <= 2 {
                    let lost = self.character.wound(self.dice.amount(6));
                    self.log(format!("The current drags you under. You lose {lost} HP."));
                    let scene = Scene::new(
                        "Flooded Cavern",
                        format!("You nearly drown, lose {lost} HP and must turn back."),
                    )
                    .choice("Retreat", Step::ExitCave);
                    self.show(scene);
                } else if swim <= 4 {
                    let undine = EnemyDraw::Named {
                        enemy: EnemyId::Undine,
                        hardy: true,
                    };
                    self.start_fight(cave_fight(undine, &[RewardTag::ContinueCave]));
                } else {
                    self.character.inventory.spirit_heart = true;
                    self.log("At the bottom of the pool you find the Heart of the Mountains.");
                    let scene = Scene::new(
                        "Flooded Cavern",
                        "A stone heart pulses in your hand. The Spirit will know you.",
                    )
                    .choice("Continue", Step::CaveOn);
                    self.show(scene);
                }
            }
            3 => self.start_fight(cave_fight(EnemyDraw::Hardy, &[RewardTag::ContinueCave])),
            4 => {
                let can_drink = self.character.can_rest(RestSite::Spring);
                let scene = Scene::new("Spring of Life", "Clear water bubbles from the rock.")
                    .choice_if(can_drink, "Drink", Step::SpringDrink)
                    .choice("Leave It", Step::CaveOn);
                self.show(scene);
            }
            5 => self.cave_exit_scene(),
            _ => {
                if self.character.cave_hidden_passage_seen {
                    match self.dice.d6() {
                        0..=3 => self.start_fight(cave_fight(
                            EnemyDraw::Hardy,
                            &[RewardTag::ContinueCave],
                        )),
                        4..=5 => self.cave_exit_scene(),
                        _ => {
                            let scene = Scene::new(
                                "Hidden Passage",
                                "A narrow stair climbs towards daylight and the summit.",
                            )
                            .choice("Follow It", Step::PassageToPeak);
                            self.show(scene);
                        }
                    }
                } else {
                    self.character.cave_hidden_passage_seen = true;
                    self.log("A guardian stands before a hidden passage.");
                    self.start_fight(cave_fight(EnemyDraw::Hardy, &[RewardTag::EnterManor]));
                }
            }
        }
    }

    fn cave_exit_scene(&mut self) {
        let scene = Scene::new("Cave Exit", "You see daylight ahead.").choice("Exit", Step::CaveSurface);
        self.show(scene);
    }

    pub(crate) fn cave_on(&mut self) {
        self.character.mark_visited(Location::Cave);
        self.cave_prompt();
    }

    pub(crate) fn cave_prompt(&mut self) {
        let scene = Scene::new("Cave", "Do you go deeper or try to leave the cave?")
            .choice("Go Deeper", Step::CaveDeeper)
            .choice("Exit Cave", Step::ExitCave);
        self.show(scene);
    }

    pub(crate) fn spring_drink(&mut self) {
        let max = self.character.max_hp();
        self.character.rest(RestSite::Spring, max);
        self.log("The Spring of Life restores you completely.");
        self.cave_on();
    }

    /// d4 = 1 means something catches you on the way out; you stay below.
    pub(crate) fn exit_cave(&mut self) {
        if self.dice.d4() == 1 {
            self.log("Something lurks near the exit!");
            self.start_fight(cave_fight(EnemyDraw::Hardy, &[]));
        } else {
            self.character.in_cave = false;
            self.log("You climb back to the surface.");
            self.finish();
        }
    }

    pub(crate) fn cave_surface(&mut self) {
        self.character.mark_visited(Location::Cave);
        self.character.in_cave = false;
        self.character.current_location = Location::MountainPass;
        self.log("You emerge on the Mountain Pass.");
        self.mountain_pass();
    }

    pub(crate) fn passage_to_peak(&mut self) {
        self.character.mark_visited(Location::Cave);
        self.character.in_cave = false;
        self.character.current_location = Location::PeakBlack;
        self.log("The passage ends beneath the summit.");
        self.peak();
    }
}
