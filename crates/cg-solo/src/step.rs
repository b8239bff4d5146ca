//! What a choice does, and what is left to do afterwards.
//!
//! A [`Step`] is the effect carried by a scene choice. A
//! [`Continuation`] is deferred work on the run's pending stack, resumed
//! when the current flow finishes.

use cg_core::{Advancement, EnemyId, Location, Loseable, RestSite};
use cg_mechanics::RewardTag;

use crate::encounter::EncounterCtx;
use crate::fight::{FightPlan, VictoryPlan};
use crate::manor::Demand;
use crate::route::PassFind;
use crate::shop::{SaleItem, ShopVisit, Ware};

/// The effect of choosing a scene option.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Close the scene and resume pending work.
    Finish,
    /// Explore a freshly reached location.
    Explore(Location),
    /// Start a fight.
    Fight(FightPlan),
    /// Resolve a Mountain Pass find.
    PassFind(PassFind),
    /// Walk into the snares, optionally using the rope.
    Snares {
        /// Spend the rope for +1.
        rope: bool,
        /// Encounter context.
        ctx: EncounterCtx,
    },
    /// Answer the traveller's riddle.
    Riddle(EncounterCtx),
    /// Take the riddle reward.
    RiddleReward {
        /// Coins when true, points otherwise.
        coins: bool,
        /// Encounter context.
        ctx: EncounterCtx,
    },
    /// Resolve a fall-risk check.
    Fall {
        /// Cliff or crags.
        location: Location,
        /// Spend the rope for +1.
        rope: bool,
    },
    /// Rest at a hut or village.
    Rest(RestSite),
    /// Open a shop counter.
    OpenShop(ShopVisit),
    /// Buy a ware.
    Buy {
        /// The ware.
        ware: Ware,
        /// The open shop.
        visit: ShopVisit,
    },
    /// Sell an item.
    Sell {
        /// The item.
        item: SaleItem,
        /// The open shop.
        visit: ShopVisit,
    },
    /// Close the shop.
    LeaveShop(ShopVisit),
    /// Go down from the burrow.
    EnterCave,
    /// Mark the cave visited and offer the cave prompt.
    CaveOn,
    /// Roll another cave encounter.
    CaveDeeper,
    /// Try to climb out.
    ExitCave,
    /// Leave through the cave exit onto the Mountain Pass.
    CaveSurface,
    /// Drink from the Spring of Life.
    SpringDrink,
    /// Follow the hidden passage to the peak.
    PassageToPeak,
    /// Walk on to another manor room.
    NextRoom,
    /// A manor room is done.
    RoomDone {
        /// Whether leaving the manor is offered.
        allow_exit: bool,
    },
    /// Hand over what the Milord demands.
    Yield(Demand),
    /// Give up your soul.
    Submit,
    /// Eat in the dining room.
    Eat,
    /// Cursed wine: lose an advancement (or nothing if none held).
    CursedWine(Option<Advancement>),
    /// Drink the cellar's mysterious potion.
    DrinkMystery,
    /// Give up an item after a victory.
    Lose {
        /// The item lost.
        item: Loseable,
        /// What follows the victory.
        plan: VictoryPlan,
    },
    /// Leave the victory scene.
    MoveOn(VictoryPlan),
    /// Pick the scanty enemy to halve.
    PickScanty(EnemyId),
    /// Pick the hardy enemy to halve.
    PickHardy {
        /// Chosen scanty enemy.
        scanty: EnemyId,
        /// Chosen hardy enemy.
        hardy: EnemyId,
    },
    /// Accept the Spirit's gift at the peak.
    Ascend,
    /// Travel to a location table id by divination.
    Divine(u8),
}

/// Deferred work, resumed when the current flow finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Offer another manor room.
    ManorChoice {
        /// Whether leaving the manor is offered.
        allow_exit: bool,
    },
    /// Offer go deeper / exit in the cave.
    CavePrompt,
    /// Run the fall-risk check.
    FallRisk(Location),
    /// Mark a location visited.
    MarkVisited(Location),
    /// Roll this many advancements, one after another.
    Advancements(u32),
    /// Offer the way down from the burrow.
    BurrowOffer,
    /// Offer rest at the shepherd's hut.
    HutRest,
    /// Walk into the manor through the hidden passage.
    EnterManorFromCave,
}

impl Continuation {
    /// The follow-up implied by a reward tag, if it has one.
    pub fn from_tag(tag: RewardTag, location: Location) -> Option<Self> {
        match tag {
            RewardTag::EnterManor => Some(Self::EnterManorFromCave),
            RewardTag::ContinueCave => Some(Self::CavePrompt),
            RewardTag::ContinueManor => Some(Self::ManorChoice { allow_exit: true }),
            RewardTag::FallRisk => Some(Self::FallRisk(location)),
            RewardTag::PantryOne | RewardTag::PantryTwo | RewardTag::LibrarySpook => None,
        }
    }

    /// The winning follow-up among a fight's tags.
    pub fn follow_up(tags: &[RewardTag], location: Location) -> Option<Self> {
        RewardTag::follow_up(tags).and_then(|tag| Self::from_tag(tag, location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loot_tags_have_no_follow_up() {
        assert_eq!(Continuation::from_tag(RewardTag::PantryOne, Location::MilordsManor), None);
        assert_eq!(Continuation::from_tag(RewardTag::LibrarySpook, Location::MilordsManor), None);
    }

    #[test]
    fn follow_up_precedence() {
        let tags = [RewardTag::PantryOne, RewardTag::ContinueManor];
        assert_eq!(
            Continuation::follow_up(&tags, Location::MilordsManor),
            Some(Continuation::ManorChoice { allow_exit: true })
        );
        let tags = [RewardTag::FallRisk, RewardTag::EnterManor];
        assert_eq!(
            Continuation::follow_up(&tags, Location::Cave),
            Some(Continuation::EnterManorFromCave)
        );
    }

    #[test]
    fn fall_risk_carries_location() {
        assert_eq!(
            Continuation::follow_up(&[RewardTag::FallRisk], Location::Crags),
            Some(Continuation::FallRisk(Location::Crags))
        );
    }
}
