//! Travel and the per-location scripts.

use cg_core::{Advancement, LOCATION_TABLE, Location, RestSite, ScrollKind};
use cg_mechanics::{DiceSource, grant_random_object, random_scroll};
use log::info;

use crate::encounter::{EncounterCtx, flee_die_for};
use crate::fight::{EnemyDraw, FightPlan};
use crate::scene::Scene;
use crate::shop::ShopVisit;
use crate::step::{Continuation, Step};
use crate::session::Run;

/// What the Mountain Pass holds on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassFind {
    /// A random object left at the hideout.
    Object,
    /// A scroll at the bottom of the cliff.
    Scroll,
    /// Nothing but mist.
    Silence,
}

fn arrival_text(location: Location) -> &'static str {
    match location {
        Location::PeakBlack => "The summit looms above the clouds.",
        Location::MilordsManor => "Iron gates hang open on rusted hinges.",
        Location::Cliff => "A narrow ledge winds along the rock face.",
        Location::Crags => "Loose stones shift under every step.",
        Location::Burrow => "A dark hole opens at the foot of an old pine.",
        Location::DeepWoods => "The trees close in around the path.",
        Location::Meadow => "Open grass sways in the wind.",
        Location::MountainPass => "The trail climbs between two ridges.",
        Location::ShepherdsHut => "Smoke rises from a small wooden hut.",
        Location::MountainVillage => "Wooden houses huddle around a chapel.",
        Location::Cave => "Water drips somewhere in the dark.",
    }
}

impl Run {
    /// Arrive at the location with table id `id`.
    ///
    /// The manor turns into the peak once visited. Known places roll a d4
    /// for an ambush; new places open their introduction.
    pub(crate) fn resolve_location(&mut self, id: u8, roll: Option<u8>) {
        let mut location = Location::from_roll(i32::from(id));
        if location == Location::MilordsManor && self.character.has_visited(location) {
            location = Location::PeakBlack;
        }
        self.character.current_location = location;
        self.character.in_cave = false;
        self.journal.travel(location, roll);
        info!("travel to {location}");

        let known = self.character.has_visited(location) || self.character.has_escaped(location);
        if location != Location::PeakBlack && known {
            let scene = if self.dice.d4() == 1 {
                let plan = FightPlan::new(EnemyDraw::Scanty, location)
                    .with_flee_die(flee_die_for(location));
                Scene::new(
                    location.name(),
                    "You return to a familiar place. An enemy approaches.",
                )
                .choice("Prepare", Step::Fight(plan))
            } else {
                Scene::new(location.name(), "You return to a familiar place. It is empty.")
                    .choice("Continue", Step::Finish)
            };
            self.show(scene);
            return;
        }

        let text = format!("{} {}", arrival_text(location), location.lore());
        self.show(Scene::new(location.name(), text).choice("Explore", Step::Explore(location)));
    }

    pub(crate) fn explore(&mut self, location: Location) {
        match location {
            Location::PeakBlack => self.peak(),
            Location::MilordsManor => self.enter_manor(false),
            Location::Cliff | Location::Crags => {
                let ctx = EncounterCtx::at(location)
                    .with_reward(cg_mechanics::RewardTag::FallRisk)
                    .without_auto_visit()
                    .then(Continuation::FallRisk(location))
                    .then(Continuation::MarkVisited(location));
                self.encounter(ctx);
            }
            Location::Burrow => {
                self.encounter(EncounterCtx::at(location).then(Continuation::BurrowOffer));
            }
            Location::DeepWoods | Location::Meadow => self.encounter(EncounterCtx::at(location)),
            Location::MountainPass => self.mountain_pass(),
            Location::ShepherdsHut => {
                self.encounter(EncounterCtx::at(location).then(Continuation::HutRest));
            }
            Location::MountainVillage => self.village(),
            Location::Cave => self.enter_cave(),
        }
    }

    pub(crate) fn mountain_pass(&mut self) {
        let (name, text, step) = match self.dice.d4() {
            1 => (
                "Highwaymen's Hideout",
                "An abandoned camp. Something was left behind.",
                Step::PassFind(PassFind::Object),
            ),
            2 => (
                "Vermin Ridge",
                "Something stirs among the rocks.",
                Step::Fight(FightPlan::new(EnemyDraw::Scanty, Location::MountainPass)),
            ),
            3 => (
                "Bottom of a Cliff",
                "A torn satchel lies among the stones.",
                Step::PassFind(PassFind::Scroll),
            ),
            _ => (
                "Misty Valley",
                "Fog fills the valley and muffles every sound.",
                Step::PassFind(PassFind::Silence),
            ),
        };
        self.show(Scene::new(format!("Mountain Pass: {name}"), text).choice("Continue", step));
    }

    pub(crate) fn pass_find(&mut self, find: PassFind) {
        match find {
            PassFind::Object => {
                let found = grant_random_object(&mut self.character, &mut self.dice);
                self.log(format!("Found: {found}."));
            }
            PassFind::Scroll => {
                let scroll = random_scroll(&mut self.dice);
                self.log(format!("Found a {} scroll.", scroll.kind));
                self.character.inventory.add_scroll(scroll);
            }
            PassFind::Silence => self.log("The valley is eerily silent."),
        }
        self.character.mark_visited(Location::MountainPass);
        self.finish();
    }

    fn village(&mut self) {
        let can_rest = self.character.can_rest(RestSite::Village);
        self.character.mark_visited(Location::MountainVillage);
        self.character.location_roll_modifier = -1;
        let scene = Scene::new(
            "Mountain Village",
            "Villagers trade at the well. The inn has a spare bed.",
        )
        .choice("Trade", Step::OpenShop(ShopVisit::village()))
        .choice_if(can_rest, "Rest", Step::Rest(RestSite::Village))
        .choice("Leave", Step::Finish);
        self.show(scene);
    }

    pub(crate) fn hut_rest(&mut self) {
        let can_rest = self.character.can_rest(RestSite::Hut);
        let scene = Scene::new("Bacówka", "The shepherd offers you a place by the fire.")
            .choice_if(can_rest, "Rest", Step::Rest(RestSite::Hut))
            .choice("Leave", Step::Finish);
        self.show(scene);
    }

    pub(crate) fn burrow_offer(&mut self) {
        let scene = Scene::new("A Burrow", "A tunnel leads down into the Cave.")
            .choice("Enter the Cave", Step::EnterCave)
            .choice("Leave It", Step::Finish);
        self.show(scene);
    }

    pub(crate) fn rest_at(&mut self, site: RestSite) {
        let heal = match site {
            RestSite::Hut => self.dice.amount(6) + 2,
            RestSite::Village => self.dice.amount(6) + 6,
            RestSite::Spring => self.character.max_hp(),
        };
        let gained = self.character.rest(site, heal);
        self.log(format!("You rest and recover {gained} HP."));
        self.finish();
    }

    pub(crate) fn peak(&mut self) {
        if self.character.ready_for_ascension() {
            let scene = Scene::new(
                "Spirit of the Mountains",
                "The Spirit recognizes your deeds and offers you greatness.",
            )
            .choice("Accept Greatness", Step::Ascend);
            self.show(scene);
        } else {
            let plan = FightPlan::new(
                EnemyDraw::Named {
                    enemy: cg_core::EnemyId::Spirit,
                    hardy: true,
                },
                Location::PeakBlack,
            )
            .with_cap(false);
            self.start_fight(plan);
        }
    }

    pub(crate) fn ascend(&mut self) {
        if self.character.grant(Advancement::HarnasTitle) {
            self.journal.advancement(Advancement::HarnasTitle);
        }
        let coins = self.dice.d6() * self.dice.d6();
        self.character.coins += coins;
        for _ in 0..3 {
            let scroll = random_scroll(&mut self.dice);
            self.character.inventory.add_scroll(scroll);
        }
        self.character.mark_visited(Location::PeakBlack);
        self.log(format!(
            "The Spirit names you its equal. You receive {coins} dutki and three scrolls."
        ));
        self.pending.push(Continuation::Advancements(2));
        self.finish();
    }

    pub(crate) fn divination_scene(&mut self) {
        let mut scene = Scene::new(
            "Divination Sigil",
            "The sigil glows. Choose where it will carry you.",
        );
        for (id, location) in (1u8..).zip(LOCATION_TABLE) {
            scene = scene.choice(format!("{} ({id})", location.name()), Step::Divine(id));
        }
        self.show(scene);
    }

    pub(crate) fn divine_to(&mut self, id: u8) {
        if let Some(index) = self
            .character
            .inventory
            .find_scroll(ScrollKind::DivinationSigil)
        {
            self.character.inventory.spend_scroll(index);
        }
        self.log("The sigil flares and the mountain folds around you.");
        self.resolve_location(id, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::session::View;
    use cg_mechanics::ScriptedDice;

    /// Knife, kaftan, 7 dutki, Misty Valley accepted: idle at the pass.
    fn idle_run(rolls: &[u32]) -> Run {
        let mut script = vec![1, 1, 1, 4];
        script.extend_from_slice(rolls);
        let mut run = Run::with_dice(
            "Maryna",
            RunConfig::default().without_pacing(),
            ScriptedDice::new(script).with_fallback(2),
        );
        run.choose(0).unwrap();
        run
    }

    #[test]
    fn travel_opens_location_intro() {
        let mut run = idle_run(&[3, 3]);
        run.travel().unwrap();
        let scene = run.scene().unwrap();
        assert_eq!(scene.title, "Deep Woods");
        assert_eq!(scene.labels(), vec!["Explore"]);
        assert_eq!(run.character().current_location, Location::DeepWoods);
    }

    #[test]
    fn village_modifier_applies_to_next_roll() {
        let mut run = idle_run(&[6, 6]);
        run.travel().unwrap();
        run.choose(0).unwrap();
        assert_eq!(run.character().location_roll_modifier, -1);
        let labels = run.scene().unwrap().labels();
        assert_eq!(labels, vec!["Trade", "Rest", "Leave"]);
    }

    #[test]
    fn visited_manor_becomes_peak() {
        let mut run = idle_run(&[1, 1]);
        run.character.mark_visited(Location::MilordsManor);
        run.travel().unwrap();
        assert_eq!(run.character().current_location, Location::PeakBlack);
        assert_eq!(run.scene().unwrap().title, "Peak Black");
    }

    #[test]
    fn revisit_can_be_empty() {
        let mut run = idle_run(&[5, 5, 3]);
        run.travel().unwrap();
        let scene = run.scene().unwrap();
        assert_eq!(scene.title, "Mountain Pass");
        assert!(scene.description.contains("It is empty"));
    }

    #[test]
    fn revisit_ambush_in_meadow_is_free_to_flee() {
        let mut run = idle_run(&[4, 4, 1]);
        run.character.mark_visited(Location::Meadow);
        run.travel().unwrap();
        run.choose(0).unwrap();
        let combat = run.combat().unwrap();
        assert_eq!(combat.setup.flee_die, 0);
        assert_eq!(combat.setup.location, Location::Meadow);
    }

    #[test]
    fn peak_without_requirements_means_spirit_fight() {
        let mut run = idle_run(&[]);
        run.resolve_location(1, None);
        run.choose(0).unwrap();
        let combat = run.combat().unwrap();
        assert_eq!(combat.enemy(), cg_core::EnemyId::Spirit);
        assert!(!combat.setup.allow_cap);
    }

    #[test]
    fn ascension_grants_title_and_two_rolls() {
        let mut run = idle_run(&[]);
        for location in Location::ASCENSION_REQUIREMENTS {
            run.character.mark_visited(location);
        }
        run.resolve_location(1, None);
        run.choose(0).unwrap();
        assert_eq!(run.scene().unwrap().title, "Spirit of the Mountains");
        run.choose(0).unwrap();
        assert!(run.character().has_advancement(Advancement::HarnasTitle));
        assert_eq!(run.character().inventory.scrolls().len(), 3);
        assert_eq!(run.scene().unwrap().title, "Advancement!");
        assert_eq!(run.pending(), &[Continuation::Advancements(1)]);
    }

    #[test]
    fn hut_rest_heals_and_resets_cooldown() {
        let mut run = idle_run(&[]);
        run.character.wound(10);
        run.pending.push(Continuation::HutRest);
        run.finish();
        assert_eq!(run.scene().unwrap().labels(), vec!["Rest", "Leave"]);
        run.choose(0).unwrap();
        assert_eq!(run.character().hp(), 9);
        assert_eq!(run.character().cooldowns.get(RestSite::Hut), 0);
        assert!(matches!(run.view(), View::Idle));
    }

    #[test]
    fn divination_spends_the_sigil() {
        let mut run = idle_run(&[2]);
        run.character
            .inventory
            .add_scroll(cg_core::Scroll::new(ScrollKind::DivinationSigil, 1));
        run.divine().unwrap();
        assert_eq!(run.scene().unwrap().choices.len(), 12);
        run.choose(11).unwrap();
        assert!(run.character().inventory.scrolls().is_empty());
        assert_eq!(run.character().current_location, Location::MountainVillage);
    }
}
