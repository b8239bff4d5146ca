//! Starting fights and settling what follows them.

use cg_core::{EnemyCategory, EnemyId, Location, Loseable};
use cg_mechanics::{
    Combat, CombatAction, CombatOutcome, DiceSource, FightSetup, RewardTag, resolve_spoils,
};
use log::{info, warn};

use crate::error::{RunError, RunResult};
use crate::scene::Scene;
use crate::session::{Run, View};
use crate::step::{Continuation, Step};

/// How the opponent is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyDraw {
    /// d4 on the scanty table.
    Scanty,
    /// d4 on the hardy table.
    Hardy,
    /// A fixed enemy. `hardy` fights can be taken over by a hunting Milord.
    Named {
        /// The enemy.
        enemy: EnemyId,
        /// Counts as a hardy fight.
        hardy: bool,
    },
}

impl EnemyDraw {
    /// Whether a hunting Milord may take this fight over.
    pub fn is_hardy(self) -> bool {
        matches!(self, Self::Hardy | Self::Named { hardy: true, .. })
    }
}

/// Everything needed to open a fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FightPlan {
    /// Who shows up.
    pub draw: EnemyDraw,
    /// Where the fight happens.
    pub location: Location,
    /// Die rolled for flee damage (0 = free).
    pub flee_die: u32,
    /// Override for the invisibility cap; `None` uses the enemy's default.
    pub allow_cap: Option<bool>,
    /// Tags steering the spoils and the follow-up.
    pub rewards: Vec<RewardTag>,
}

impl FightPlan {
    /// A plan with a d4 flee die and default cap rules.
    pub fn new(draw: EnemyDraw, location: Location) -> Self {
        Self {
            draw,
            location,
            flee_die: 4,
            allow_cap: None,
            rewards: Vec::new(),
        }
    }

    /// Set the flee damage die.
    pub fn with_flee_die(mut self, sides: u32) -> Self {
        self.flee_die = sides;
        self
    }

    /// Force the cap rule.
    pub fn with_cap(mut self, allowed: bool) -> Self {
        self.allow_cap = Some(allowed);
        self
    }

    /// Attach reward tags.
    pub fn with_rewards(mut self, tags: &[RewardTag]) -> Self {
        self.rewards.extend_from_slice(tags);
        self
    }
}

/// What happens once the victory scene is dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VictoryPlan {
    /// Where the fight happened.
    pub location: Location,
    /// The fight's reward tags.
    pub tags: Vec<RewardTag>,
    /// Advancement rolls owed.
    pub advancement_rolls: u32,
}

/// Pick the opponent. A hunting Milord replaces any hardy opponent except
/// himself and the Spirit.
pub fn pick_enemy(draw: EnemyDraw, milord_hunts: bool, dice: &mut dyn DiceSource) -> EnemyId {
    let base = match draw {
        EnemyDraw::Scanty => {
            EnemyId::draw(EnemyCategory::Scanty, dice.d4()).unwrap_or(EnemyId::Hajduk)
        }
        EnemyDraw::Hardy => EnemyId::draw(EnemyCategory::Hardy, dice.d4()).unwrap_or(EnemyId::Bear),
        EnemyDraw::Named { enemy, .. } => enemy,
    };
    if milord_hunts && draw.is_hardy() && !matches!(base, EnemyId::Milord | EnemyId::Spirit) {
        EnemyId::Milord
    } else {
        base
    }
}

impl Run {
    pub(crate) fn start_fight(&mut self, plan: FightPlan) {
        if self.supervise() {
            return;
        }
        let enemy = pick_enemy(plan.draw, self.character.milord_hunts, &mut self.dice);
        let mut setup = FightSetup::new(enemy, plan.location).with_flee_die(plan.flee_die);
        if let Some(allowed) = plan.allow_cap {
            setup = setup.with_cap(allowed);
        }
        for tag in plan.rewards {
            setup = setup.with_reward(tag);
        }
        let combat = Combat::begin(setup, &mut self.character);
        self.journal.combat(enemy, combat.message.clone());
        self.view = View::Combat(Box::new(combat));
    }

    /// Attack with the wielded weapon.
    pub fn attack(&mut self) -> RunResult<CombatOutcome> {
        self.combat_action(CombatAction::Attack)
    }

    /// Read a scroll by inventory index.
    pub fn use_scroll(&mut self, index: usize) -> RunResult<CombatOutcome> {
        self.combat_action(CombatAction::UseScroll(index))
    }

    /// Run away.
    pub fn flee(&mut self) -> RunResult<CombatOutcome> {
        self.combat_action(CombatAction::Flee)
    }

    /// Resolve one combat turn.
    pub fn combat_action(&mut self, action: CombatAction) -> RunResult<CombatOutcome> {
        let combat = match &mut self.view {
            View::Combat(combat) => combat,
            View::Dead | View::Won => return Err(RunError::RunOver),
            View::Idle | View::Scene(_) => return Err(RunError::NoActiveCombat),
        };
        let outcome = combat
            .act(action, &mut self.character, &mut self.dice)
            .inspect_err(|e| warn!("{action:?} refused: {e}"))?;
        self.journal.combat(combat.enemy(), combat.message.clone());
        self.after_combat(outcome);
        Ok(outcome)
    }

    /// Slip past the enemy under the invisibility cap.
    pub fn vanish(&mut self) -> RunResult<CombatOutcome> {
        let combat = match &mut self.view {
            View::Combat(combat) => combat,
            View::Dead | View::Won => return Err(RunError::RunOver),
            View::Idle | View::Scene(_) => return Err(RunError::NoActiveCombat),
        };
        let outcome = combat
            .avoid_with_cap(&mut self.character)
            .inspect_err(|e| warn!("vanish refused: {e}"))?;
        self.journal.combat(combat.enemy(), combat.message.clone());
        self.after_combat(outcome);
        Ok(outcome)
    }

    fn take_combat(&mut self) -> Option<Combat> {
        match std::mem::replace(&mut self.view, View::Idle) {
            View::Combat(combat) => Some(*combat),
            other => {
                self.view = other;
                None
            }
        }
    }

    fn after_combat(&mut self, outcome: CombatOutcome) {
        match outcome {
            CombatOutcome::Ongoing => {}
            CombatOutcome::Defeat => {
                self.supervise();
            }
            CombatOutcome::Victory { .. } => {
                if let Some(combat) = self.take_combat() {
                    self.on_victory(combat);
                }
            }
            CombatOutcome::Fled { .. } => {
                let Some(combat) = self.take_combat() else {
                    return;
                };
                if self.supervise() {
                    return;
                }
                let location = combat.setup.location;
                if location.has_fall_risk() {
                    self.pending.push(Continuation::FallRisk(location));
                }
                self.finish();
            }
            CombatOutcome::Avoided { .. } => {
                let Some(combat) = self.take_combat() else {
                    return;
                };
                let location = combat.setup.location;
                match Continuation::follow_up(&combat.setup.rewards, location) {
                    Some(next) => self.pending.push(next),
                    None if location.has_fall_risk() => {
                        self.pending.push(Continuation::FallRisk(location));
                    }
                    None => {}
                }
                self.finish();
            }
        }
    }

    fn on_victory(&mut self, combat: Combat) {
        let enemy = combat.enemy();
        let spoils = resolve_spoils(
            enemy,
            &combat.setup.rewards,
            &mut self.character,
            &mut self.dice,
        );
        info!("spoils from {enemy}: {}", spoils.message);
        if !spoils.message.is_empty() {
            self.log(spoils.message.clone());
        }
        let plan = VictoryPlan {
            location: combat.setup.location,
            tags: combat.setup.rewards.clone(),
            advancement_rolls: spoils.advancement_rolls,
        };
        let summary = format!("{} {}", combat.message, spoils.message)
            .trim()
            .to_string();

        let Some(reason) = spoils.loss_reason else {
            self.victory_scene(summary, plan);
            return;
        };
        let items = self.character.inventory.loseable();
        if items.is_empty() {
            self.victory_scene(format!("{summary} You had nothing to lose."), plan);
            return;
        }
        let mut scene = Scene::new("Choose a Loss", format!("{summary}\n{reason}"));
        for item in items {
            scene = scene.choice(
                item.to_string(),
                Step::Lose {
                    item,
                    plan: plan.clone(),
                },
            );
        }
        self.show(scene);
    }

    fn victory_scene(&mut self, summary: String, plan: VictoryPlan) {
        self.show(Scene::new("Victory", summary).choice("Move On", Step::MoveOn(plan)));
    }

    pub(crate) fn lose_item(&mut self, item: Loseable, plan: VictoryPlan) {
        if self.character.inventory.lose(item) {
            self.log(format!("You lost: {item}."));
        }
        self.victory_scene(format!("You lost: {item}."), plan);
    }

    pub(crate) fn move_on(&mut self, plan: VictoryPlan) {
        self.character.mark_visited(plan.location);
        if let Some(next) = Continuation::follow_up(&plan.tags, plan.location) {
            self.pending.push(next);
        }
        if plan.advancement_rolls > 0 {
            self.pending
                .push(Continuation::Advancements(plan.advancement_rolls));
        }
        self.finish();
    }
}
