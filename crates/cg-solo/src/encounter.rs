//! The generic d6 encounter and the fall-risk check.
//!
//! | d6 | result                                   |
//! |----|------------------------------------------|
//! | 1  | nothing happens                          |
//! | 2  | snares (rope helps), maybe a scanty foe  |
//! | 3  | a traveller's riddle                     |
//! | 4  | scanty fight                             |
//! | 5  | hardy fight                              |
//! | 6  | a wandering merchant                     |

use cg_core::Location;
use cg_mechanics::{DiceSource, RewardTag};

use crate::fight::{EnemyDraw, FightPlan};
use crate::scene::Scene;
use crate::session::Run;
use crate::shop::ShopVisit;
use crate::step::{Continuation, Step};

/// Flee damage die at a location: fleeing across the meadow is free.
pub fn flee_die_for(location: Location) -> u32 {
    if location == Location::Meadow { 0 } else { 4 }
}

/// Where an encounter happens and what follows a peaceful outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncounterCtx {
    /// Where the encounter happens.
    pub location: Location,
    /// Flee damage die for any fight.
    pub flee_die: u32,
    /// Reward tags for any fight.
    pub rewards: Vec<RewardTag>,
    /// Mark the location visited after a peaceful outcome.
    pub auto_visit: bool,
    /// Work run after a peaceful outcome, in order. Dropped when a fight
    /// starts; the fight's tags decide what follows a victory.
    pub then: Vec<Continuation>,
}

impl EncounterCtx {
    /// Context for an encounter at `location`.
    pub fn at(location: Location) -> Self {
        Self {
            location,
            flee_die: flee_die_for(location),
            rewards: Vec::new(),
            auto_visit: true,
            then: Vec::new(),
        }
    }

    /// Add a reward tag to any fight.
    pub fn with_reward(mut self, tag: RewardTag) -> Self {
        self.rewards.push(tag);
        self
    }

    /// Leave marking the location to a continuation.
    pub fn without_auto_visit(mut self) -> Self {
        self.auto_visit = false;
        self
    }

    /// Queue work after a peaceful outcome.
    pub fn then(mut self, next: Continuation) -> Self {
        self.then.push(next);
        self
    }

    fn fight(&self, draw: EnemyDraw) -> FightPlan {
        FightPlan::new(draw, self.location)
            .with_flee_die(self.flee_die)
            .with_rewards(&self.rewards)
    }
}

impl Run {
    pub(crate) fn encounter(&mut self, ctx: EncounterCtx) {
        match self.dice.d6() {
            1 => {
                self.log("Nothing happens.");
                self.end_encounter(ctx);
            }
            2 => {
                if self.character.inventory.rope {
                    let scene = Scene::new("Snares", "Use your rope to add +1 to the roll?")
                        .choice(
                            "Use Rope",
                            Step::Snares {
                                rope: true,
                                ctx: ctx.clone(),
                            },
                        )
                        .choice("Do Not Use Rope", Step::Snares { rope: false, ctx });
                    self.show(scene);
                } else {
                    self.snares(false, ctx);
                }
            }
            3 => {
                let scene = Scene::new(
                    "A Traveller",
                    "A hooded figure blocks the path and asks a riddle.",
                )
                .choice("Answer (Roll d6)", Step::Riddle(ctx));
                self.show(scene);
            }
            4 => self.start_fight(ctx.fight(EnemyDraw::Scanty)),
            5 => self.start_fight(ctx.fight(EnemyDraw::Hardy)),
            _ => {
                if ctx.auto_visit {
                    self.character.mark_visited(ctx.location);
                }
                self.open_shop(ShopVisit::merchant(ctx.then));
            }
        }
    }

    fn end_encounter(&mut self, ctx: EncounterCtx) {
        if ctx.auto_visit {
            self.character.mark_visited(ctx.location);
        }
        self.pending.extend(ctx.then.into_iter().rev());
        self.finish();
    }

    pub(crate) fn snares(&mut self, rope: bool, ctx: EncounterCtx) {
        let bonus = if rope {
            self.character.inventory.rope = false;
            1
        } else {
            0
        };
        if self.dice.amount(6) + bonus <= 3 {
            let lost = self.character.wound(self.dice.amount(6));
            self.log(format!("You are caught in snares and lose {lost} HP."));
        } else {
            self.log("You slip past the snares.");
        }
        if self.supervise() {
            return;
        }
        if self.dice.d6() == 1 {
            self.start_fight(ctx.fight(EnemyDraw::Scanty));
        } else {
            self.end_encounter(ctx);
        }
    }

    pub(crate) fn riddle(&mut self, ctx: EncounterCtx) {
        if self.dice.d6() % 2 == 1 {
            let scene = Scene::new("Riddle Answered", "Correct! Choose your reward.")
                .choice(
                    "6 Dutki",
                    Step::RiddleReward {
                        coins: true,
                        ctx: ctx.clone(),
                    },
                )
                .choice("3 Points", Step::RiddleReward { coins: false, ctx });
            self.show(scene);
        } else {
            let lost = self.character.wound(self.dice.amount(4));
            self.log(format!("Wrong answer. The traveller strikes you for {lost} HP."));
            if self.supervise() {
                return;
            }
            self.end_encounter(ctx);
        }
    }

    pub(crate) fn riddle_reward(&mut self, coins: bool, ctx: EncounterCtx) {
        if coins {
            self.character.coins += 6;
            self.log("The traveller pays you 6 dutki.");
        } else {
            self.character.points += 3;
            self.log("The traveller's respect earns you 3 points.");
        }
        self.end_encounter(ctx);
    }

    pub(crate) fn fall_risk(&mut self, location: Location) {
        if self.character.inventory.rope {
            let scene = Scene::new(
                location.name(),
                "There is a risk of falling. Use your rope to add +1 to the roll?",
            )
            .choice(
                "Use Rope",
                Step::Fall {
                    location,
                    rope: true,
                },
            )
            .choice(
                "Do Not Use Rope",
                Step::Fall {
                    location,
                    rope: false,
                },
            );
            self.show(scene);
        } else {
            self.fall(location, false);
        }
    }

    /// d6 ≤ 3 means a slip; a second d6 (+1 with rope) ≤ 3 means a fall
    /// for d6+2 damage.
    pub(crate) fn fall(&mut self, location: Location, rope: bool) {
        let bonus = if rope {
            self.character.inventory.rope = false;
            1
        } else {
            0
        };
        if self.dice.d6() <= 3 {
            if self.dice.amount(6) + bonus <= 3 {
                let lost = self.character.wound(self.dice.amount(6) + 2);
                self.log(format!("You fell down the {location}! You lose {lost} HP."));
            } else {
                self.log("You slip but catch yourself.");
            }
        }
        self.finish();
    }
}
