//! Run management.
//!
//! `Run` owns the character, the dice tray, the journal and the current
//! view. Every inbound action validates its preconditions first: a
//! refused action returns an error and leaves the run untouched.

use cg_core::{Character, ScrollKind, Weapon};
use cg_mechanics::{Combat, DiceSource, DiceTray, RollResult, SeededDice};
use log::{debug, info, warn};

use crate::config::RunConfig;
use crate::error::{Refusal, RunError, RunResult};
use crate::journal::Journal;
use crate::scene::Scene;
use crate::step::{Continuation, Step};

/// Dutki needed to buy an advancement with a ducat.
pub const DUCAT_PRICE: u32 = 40;

/// What the player is looking at.
#[derive(Debug, Clone)]
pub enum View {
    /// On the map, free to travel.
    Idle,
    /// A scene waits for a choice.
    Scene(Scene),
    /// A fight is in progress.
    Combat(Box<Combat>),
    /// The character died.
    Dead,
    /// The character became the Harnaś.
    Won,
}

/// A single playthrough.
pub struct Run {
    pub(crate) character: Character,
    pub(crate) dice: DiceTray<Box<dyn DiceSource + Send>>,
    pub(crate) view: View,
    pub(crate) pending: Vec<Continuation>,
    pub(crate) journal: Journal,
    config: RunConfig,
    seed: Option<u64>,
}

impl Run {
    /// Start a run with seeded dice (entropy when the config has no seed).
    pub fn start(name: impl Into<String>, config: RunConfig) -> Self {
        let dice = match config.seed {
            Some(seed) => SeededDice::new(seed),
            None => SeededDice::from_entropy(),
        };
        let seed = dice.seed();
        let mut run = Self::with_dice(name, config, dice);
        run.seed = Some(seed);
        run
    }

    /// Start a run with a caller-supplied dice source.
    ///
    /// Rolls the starting weapon (d4), one extra item (d4) and the purse
    /// (d6+6), then opens the Mountain Pass.
    pub fn with_dice(
        name: impl Into<String>,
        config: RunConfig,
        dice: impl DiceSource + Send + 'static,
    ) -> Self {
        let source: Box<dyn DiceSource + Send> = Box::new(dice);
        let mut dice = DiceTray::new(source, config.dice_tray_limit);

        let weapon = Weapon::from_starting_roll(dice.d4());
        let extra = dice.d4();
        let mut character = Character::new(name, weapon, 0);
        match extra {
            1 => character.inventory.kaftan = true,
            2 => {
                character.inventory.add_potion();
            }
            3 => {
                let uses = dice.d4();
                character
                    .inventory
                    .add_scroll(cg_core::Scroll::new(ScrollKind::BiesSummoning, uses));
            }
            _ => character.inventory.cap_charges = dice.d4(),
        }
        character.coins = dice.d6() + 6;
        info!(
            "run {} started: {} with {}, {} dutki",
            character.run_id, character.name, weapon, character.coins
        );

        let mut run = Self {
            character,
            dice,
            view: View::Idle,
            pending: Vec::new(),
            journal: Journal::new(config.log_limit),
            config,
            seed: None,
        };
        run.journal
            .narrate("You begin your journey at the Mountain Pass.");
        run.mountain_pass();
        run
    }

    /// The character.
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// The current view.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// The journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// The configuration the run started with.
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The dice seed, when the run uses seeded dice.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Pending continuations, next to run last.
    pub fn pending(&self) -> &[Continuation] {
        &self.pending
    }

    /// Recent rolls, newest first.
    pub fn recent_rolls(&self) -> impl Iterator<Item = &RollResult> {
        self.dice.recent()
    }

    /// The open scene, if any.
    pub fn scene(&self) -> Option<&Scene> {
        match &self.view {
            View::Scene(scene) => Some(scene),
            _ => None,
        }
    }

    /// The fight in progress, if any.
    pub fn combat(&self) -> Option<&Combat> {
        match &self.view {
            View::Combat(combat) => Some(combat),
            _ => None,
        }
    }

    /// Whether the run has ended.
    pub fn is_over(&self) -> bool {
        self.character.is_dead() || self.character.has_won()
    }

    /// Roll on the location table, or go deeper when in the cave.
    pub fn travel(&mut self) -> RunResult<()> {
        self.ensure_idle()?;
        if self.character.in_cave {
            self.cave_encounter();
        } else {
            let roll = self.dice.roll_many(&[6, 6]);
            let raw = i32::try_from(roll.total()).unwrap_or(i32::MAX)
                + self.character.location_roll_modifier;
            let id = cg_core::clamp_location_roll(raw);
            debug!("location roll {roll} -> {id}");
            self.resolve_location(id, Some(id));
        }
        self.supervise();
        Ok(())
    }

    /// Pick a scene option by index.
    pub fn choose(&mut self, index: usize) -> RunResult<()> {
        let step = {
            let scene = self.current_scene()?;
            let choice = scene
                .choices
                .get(index)
                .ok_or(RunError::InvalidChoice(index))?;
            if !choice.enabled {
                return Err(Refusal::ChoiceDisabled(choice.label.clone()).into());
            }
            debug!("chose '{}'", choice.label);
            choice.step().clone()
        };
        let previous = std::mem::replace(&mut self.view, View::Idle);
        match self.apply(step) {
            Ok(()) => {
                self.supervise();
                Ok(())
            }
            Err(e) => {
                warn!("choice refused: {e}");
                self.view = previous;
                Err(e)
            }
        }
    }

    /// Pick a scene option by (fuzzy) label.
    pub fn choose_label(&mut self, input: &str) -> RunResult<()> {
        let index = self
            .current_scene()?
            .find_choice(input)
            .ok_or_else(|| RunError::UnknownChoice(input.to_string()))?;
        self.choose(index)
    }

    /// Drink a potion outside combat. Returns HP healed.
    pub fn drink_potion(&mut self) -> RunResult<i32> {
        match self.view {
            View::Dead | View::Won => return Err(RunError::RunOver),
            View::Combat(_) => return Err(Refusal::InCombat.into()),
            View::Idle | View::Scene(_) => {}
        }
        if !self.character.inventory.take_potion() {
            return Err(Refusal::NoPotions.into());
        }
        let roll = self.dice.amount(6);
        let healed = self.character.heal(roll);
        self.log(format!("You drank a potion and healed {healed} HP."));
        Ok(healed)
    }

    /// Trade 15 points and 12 visited places for an advancement roll.
    pub fn advance(&mut self) -> RunResult<()> {
        self.ensure_idle()?;
        if !self.character.can_advance() {
            return Err(Refusal::ThresholdsNotMet.into());
        }
        self.character.points = 0;
        self.character.visited_places = 0;
        self.character.temporary_hit_penalty = 0;
        self.log("You take stock of your deeds and grow stronger.");
        self.pending.push(Continuation::Advancements(1));
        self.finish();
        Ok(())
    }

    /// Buy an advancement roll with a ducat.
    pub fn buy_ducat(&mut self) -> RunResult<()> {
        self.ensure_idle()?;
        let have = self.character.coins;
        if have < DUCAT_PRICE {
            return Err(Refusal::NotEnoughCoins {
                need: DUCAT_PRICE,
                have,
            }
            .into());
        }
        self.character.coins -= DUCAT_PRICE;
        self.character.temporary_hit_penalty = 0;
        self.log(format!("You bought a ducat for {DUCAT_PRICE} dutki."));
        self.pending.push(Continuation::Advancements(1));
        self.finish();
        Ok(())
    }

    /// Open the divination sigil's destination list.
    pub fn divine(&mut self) -> RunResult<()> {
        self.ensure_idle()?;
        if self.character.in_cave {
            return Err(Refusal::InCave.into());
        }
        if self
            .character
            .inventory
            .find_scroll(ScrollKind::DivinationSigil)
            .is_none()
        {
            return Err(Refusal::NoSigil.into());
        }
        self.divination_scene();
        Ok(())
    }

    pub(crate) fn ensure_idle(&self) -> RunResult<()> {
        let refusal = match self.view {
            View::Idle => return Ok(()),
            View::Scene(_) => Refusal::SceneOpen,
            View::Combat(_) => Refusal::InCombat,
            View::Dead | View::Won => return Err(RunError::RunOver),
        };
        warn!("action refused: {refusal}");
        Err(refusal.into())
    }

    pub(crate) fn current_scene(&self) -> RunResult<&Scene> {
        match &self.view {
            View::Scene(scene) => Ok(scene),
            View::Dead | View::Won => Err(RunError::RunOver),
            View::Idle | View::Combat(_) => Err(RunError::NoActiveScene),
        }
    }

    pub(crate) fn log(&mut self, text: impl Into<String>) {
        let text = text.into();
        debug!("{text}");
        self.journal.narrate(text);
    }

    /// Display a scene unless the run has just ended.
    pub(crate) fn show(&mut self, scene: Scene) {
        if self.supervise() {
            return;
        }
        self.view = View::Scene(scene);
    }

    /// The current flow is done: resume the next continuation or go idle.
    pub(crate) fn finish(&mut self) {
        if self.supervise() {
            return;
        }
        match self.pending.pop() {
            Some(next) => self.resume(next),
            None => self.view = View::Idle,
        }
    }

    fn resume(&mut self, next: Continuation) {
        debug!("resuming {next:?}");
        match next {
            Continuation::ManorChoice { allow_exit } => self.manor_choice(allow_exit),
            Continuation::CavePrompt => self.cave_prompt(),
            Continuation::FallRisk(location) => self.fall_risk(location),
            Continuation::MarkVisited(location) => {
                self.character.mark_visited(location);
                self.finish();
            }
            Continuation::Advancements(count) => self.roll_advancement(count),
            Continuation::BurrowOffer => self.burrow_offer(),
            Continuation::HutRest => self.hut_rest(),
            Continuation::EnterManorFromCave => self.enter_manor(true),
        }
    }

    fn apply(&mut self, step: Step) -> RunResult<()> {
        match step {
            Step::Finish => self.finish(),
            Step::Explore(location) => self.explore(location),
            Step::Fight(plan) => self.start_fight(plan),
            Step::PassFind(find) => self.pass_find(find),
            Step::Snares { rope, ctx } => self.snares(rope, ctx),
            Step::Riddle(ctx) => self.riddle(ctx),
            Step::RiddleReward { coins, ctx } => self.riddle_reward(coins, ctx),
            Step::Fall { location, rope } => self.fall(location, rope),
            Step::Rest(site) => self.rest_at(site),
            Step::OpenShop(visit) => self.open_shop(visit),
            Step::Buy { ware, visit } => self.buy_at(ware, visit)?,
            Step::Sell { item, visit } => self.sell_at(item, visit)?,
            Step::LeaveShop(visit) => self.leave_shop(visit),
            Step::EnterCave => self.enter_cave(),
            Step::CaveOn => self.cave_on(),
            Step::CaveDeeper => self.cave_encounter(),
            Step::ExitCave => self.exit_cave(),
            Step::CaveSurface => self.cave_surface(),
            Step::SpringDrink => self.spring_drink(),
            Step::PassageToPeak => self.passage_to_peak(),
            Step::NextRoom => self.next_room(),
            Step::RoomDone { allow_exit } => self.room_done(allow_exit),
            Step::Yield(demand) => self.yield_to(demand),
            Step::Submit => self.submit(),
            Step::Eat => self.eat(),
            Step::CursedWine(lost) => self.cursed_wine(lost),
            Step::DrinkMystery => self.drink_mystery(),
            Step::Lose { item, plan } => self.lose_item(item, plan),
            Step::MoveOn(plan) => self.move_on(plan),
            Step::PickScanty(scanty) => self.pick_scanty(scanty),
            Step::PickHardy { scanty, hardy } => self.pick_hardy(scanty, hardy)?,
            Step::Ascend => self.ascend(),
            Step::Divine(id) => self.divine_to(id),
        }
        Ok(())
    }
}
