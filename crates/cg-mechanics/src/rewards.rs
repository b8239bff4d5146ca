//! Post-combat reward resolution.
//!
//! Ordinary enemies carry a small table of `(chance, boon)` rules rolled
//! on a d6. The Milord and the Spirit have fixed handlers. Reward tags
//! attached to the fight add room-specific loot and pick the follow-up
//! scene.

use cg_core::{Character, EnemyId, Scroll, ScrollKind, Weapon};
use log::info;
use serde::{Deserialize, Serialize};

use crate::dice::DiceSource;
use crate::loot::{grant_random_object, random_scroll};

/// Marker attached to a fight describing what happens after victory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardTag {
    /// Pantry hajduk: heal d4 and find one object.
    PantryOne,
    /// Pantry feast: heal d6 and find two objects.
    PantryTwo,
    /// Library spook: find a random scroll.
    LibrarySpook,
    /// Return to the manor's room choice.
    ContinueManor,
    /// Return to the cave prompt.
    ContinueCave,
    /// Run the cliff/crags fall-risk check.
    FallRisk,
    /// Walk through the hidden passage into the manor.
    EnterManor,
}

impl RewardTag {
    /// Follow-up tags in order of precedence.
    pub const FOLLOW_UPS: [RewardTag; 4] = [
        Self::EnterManor,
        Self::ContinueCave,
        Self::ContinueManor,
        Self::FallRisk,
    ];

    /// The follow-up that wins among the given tags, if any.
    pub fn follow_up(tags: &[RewardTag]) -> Option<RewardTag> {
        Self::FOLLOW_UPS.into_iter().find(|t| tags.contains(t))
    }
}

/// What a victory produced beyond the points already granted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Spoils {
    /// Narrative summary.
    pub message: String,
    /// Set when the player must give up an item; holds the reason.
    pub loss_reason: Option<&'static str>,
    /// Advancement rolls owed.
    pub advancement_rolls: u32,
}

#[derive(Debug, Clone, Copy)]
enum Chance {
    Always,
    /// d6 roll at most this value.
    AtMost(u32),
}

#[derive(Debug, Clone, Copy)]
enum Boon {
    Weapon(Weapon),
    Scroll(ScrollKind),
    Rope,
    Coins(&'static [u32]),
    PointCurse,
    HitPenalty,
    LossChoice(&'static str),
    BonusAdvancement,
}

#[derive(Debug, Clone, Copy)]
struct SpoilRule {
    chance: Chance,
    boon: Boon,
}

const fn rule(chance: Chance, boon: Boon) -> SpoilRule {
    SpoilRule { chance, boon }
}

const HAJDUK: &[SpoilRule] = &[rule(Chance::AtMost(2), Boon::Weapon(Weapon::Knife))];
const BIES: &[SpoilRule] = &[rule(
    Chance::AtMost(2),
    Boon::Scroll(ScrollKind::BiesSummoning),
)];
const POACHER: &[SpoilRule] = &[rule(Chance::AtMost(2), Boon::Rope)];
const WOLF: &[SpoilRule] = &[rule(
    Chance::AtMost(1),
    Boon::LossChoice("The wolf stole an item. Choose what you lose."),
)];
const UNDINE: &[SpoilRule] = &[
    rule(Chance::Always, Boon::Coins(&[6, 6, 6])),
    rule(Chance::AtMost(1), Boon::PointCurse),
];
const BEAR: &[SpoilRule] = &[rule(
    Chance::AtMost(2),
    Boon::LossChoice("The bear broke something. Choose what you lose."),
)];
const HIGHWAYMAN: &[SpoilRule] = &[
    rule(Chance::Always, Boon::Coins(&[4, 6])),
    rule(Chance::AtMost(1), Boon::HitPenalty),
];
const SPOOK: &[SpoilRule] = &[rule(Chance::AtMost(2), Boon::BonusAdvancement)];
const MANOR_HAJDUK: &[SpoilRule] = &[rule(Chance::AtMost(2), Boon::Weapon(Weapon::Sabre))];

fn spoil_table(enemy: EnemyId) -> &'static [SpoilRule] {
    match enemy {
        EnemyId::Hajduk => HAJDUK,
        EnemyId::Bies => BIES,
        EnemyId::Poacher => POACHER,
        EnemyId::Wolf => WOLF,
        EnemyId::Undine => UNDINE,
        EnemyId::Bear => BEAR,
        EnemyId::Highwayman => HIGHWAYMAN,
        EnemyId::Spook => SPOOK,
        EnemyId::ManorHajduk => MANOR_HAJDUK,
        EnemyId::Milord | EnemyId::Spirit => &[],
    }
}

fn apply_boon(boon: Boon, character: &mut Character, dice: &mut dyn DiceSource, spoils: &mut Spoils) {
    let msg = &mut spoils.message;
    match boon {
        Boon::Weapon(weapon) => {
            if character.inventory.weapon == weapon {
                msg.push_str(&format!("You found a {weapon}, but you already have one. "));
            } else {
                character.inventory.weapon = weapon;
                msg.push_str(&format!("You found a {weapon}! "));
            }
        }
        Boon::Scroll(kind) => {
            character.inventory.add_scroll(Scroll::new(kind, dice.d4()));
            msg.push_str(&format!("Found a {kind} scroll! "));
        }
        Boon::Rope => {
            if character.inventory.rope {
                msg.push_str("Found a Rope, but you already have one. ");
            } else {
                character.inventory.rope = true;
                msg.push_str("Found a Rope! ");
            }
        }
        Boon::Coins(sides) => {
            let coins = dice.roll_many(sides).total();
            character.coins += coins;
            msg.push_str(&format!("Looted {coins} dutki. "));
        }
        Boon::PointCurse => {
            character.points = 0;
            msg.push_str("A curse took all your points! ");
        }
        Boon::HitPenalty => {
            character.temporary_hit_penalty = -1;
            msg.push_str("A bullet got stuck in your side! (-1 to hit until you rest or advance) ");
        }
        Boon::LossChoice(reason) => spoils.loss_reason = Some(reason),
        Boon::BonusAdvancement => {
            spoils.advancement_rolls += 1;
            msg.push_str("Spiritual awakening! Immediate advancement! ");
        }
    }
}

/// Resolve everything a victory over `enemy` yields.
///
/// Enemy-specific spoils come first, then the loot attached by `tags`.
/// Follow-up tags are left to the caller (see [`RewardTag::follow_up`]).
pub fn resolve_spoils(
    enemy: EnemyId,
    tags: &[RewardTag],
    character: &mut Character,
    dice: &mut dyn DiceSource,
) -> Spoils {
    let mut spoils = Spoils {
        message: format!("You defeated the {enemy}. "),
        ..Spoils::default()
    };

    for rule in spoil_table(enemy) {
        let hit = match rule.chance {
            Chance::Always => true,
            Chance::AtMost(n) => dice.d6() <= n,
        };
        if hit {
            apply_boon(rule.boon, character, dice, &mut spoils);
        }
    }

    match enemy {
        EnemyId::Milord => {
            let coins = dice.roll_many(&[6, 6]).total();
            character.coins += coins;
            character.inventory.weapon = Weapon::Karabela;
            character.inventory.karabela = true;
            character.milord_defeated = true;
            character.milord_hunts = false;
            spoils.advancement_rolls += 1;
            spoils
                .message
                .push_str(&format!("You took {coins} dutki and the Milord's karabela. "));
        }
        EnemyId::Spirit => {
            let coins = dice.roll_many(&[6, 6]).product();
            character.coins += coins;
            for _ in 0..3 {
                let scroll = random_scroll(dice);
                character.inventory.add_scroll(scroll);
            }
            spoils.advancement_rolls += 2;
            spoils.message.push_str(&format!(
                "The Spirit's treasure grants {coins} dutki and three scrolls. "
            ));
        }
        _ => {}
    }

    if tags.contains(&RewardTag::PantryOne) {
        let healed = character.heal(dice.amount(4));
        let found = grant_random_object(character, dice);
        spoils
            .message
            .push_str(&format!("You found {found} and healed {healed} HP. "));
    }
    if tags.contains(&RewardTag::PantryTwo) {
        let healed = character.heal(dice.amount(6));
        let first = grant_random_object(character, dice);
        let second = grant_random_object(character, dice);
        spoils.message.push_str(&format!(
            "You found {first} and {second}, and healed {healed} HP. "
        ));
    }
    if tags.contains(&RewardTag::LibrarySpook) {
        let scroll = random_scroll(dice);
        character.inventory.add_scroll(scroll);
        spoils.message.push_str("You found a random scroll. ");
    }

    spoils.message = spoils.message.trim_end().to_string();
    info!("spoils of {enemy}: {}", spoils.message);
    spoils
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    fn hero() -> Character {
        Character::new("Janosik", Weapon::Ciupaga, 0)
    }

    #[test]
    fn hajduk_drops_knife_on_low_roll() {
        let mut c = hero();
        let mut dice = ScriptedDice::new([2]);
        let s = resolve_spoils(EnemyId::Hajduk, &[], &mut c, &mut dice);
        assert_eq!(c.inventory.weapon, Weapon::Knife);
        assert!(s.message.contains("Knife"));
    }

    #[test]
    fn hajduk_drops_nothing_on_high_roll() {
        let mut c = hero();
        let mut dice = ScriptedDice::new([3]);
        let s = resolve_spoils(EnemyId::Hajduk, &[], &mut c, &mut dice);
        assert_eq!(c.inventory.weapon, Weapon::Ciupaga);
        assert_eq!(s.message, "You defeated the Hajduk.");
    }

    #[test]
    fn undine_gold_and_curse() {
        let mut c = hero();
        c.points = 9;
        let mut dice = ScriptedDice::new([1, 2, 3, 1]);
        resolve_spoils(EnemyId::Undine, &[], &mut c, &mut dice);
        assert_eq!(c.coins, 6);
        assert_eq!(c.points, 0);
    }

    #[test]
    fn highwayman_penalty() {
        let mut c = hero();
        let mut dice = ScriptedDice::new([4, 6, 1]);
        resolve_spoils(EnemyId::Highwayman, &[], &mut c, &mut dice);
        assert_eq!(c.coins, 10);
        assert_eq!(c.temporary_hit_penalty, -1);
    }

    #[test]
    fn wolf_and_bear_ask_for_loss() {
        let mut c = hero();
        let mut dice = ScriptedDice::new([1, 2]);
        let wolf = resolve_spoils(EnemyId::Wolf, &[], &mut c, &mut dice);
        assert!(wolf.loss_reason.is_some());
        let bear = resolve_spoils(EnemyId::Bear, &[], &mut c, &mut dice);
        assert!(bear.loss_reason.is_some());
    }

    #[test]
    fn spook_awakening() {
        let mut c = hero();
        let mut dice = ScriptedDice::new([1]);
        let s = resolve_spoils(EnemyId::Spook, &[], &mut c, &mut dice);
        assert_eq!(s.advancement_rolls, 1);
    }

    #[test]
    fn milord_rewards() {
        let mut c = hero();
        c.milord_hunts = true;
        let mut dice = ScriptedDice::new([3, 4]);
        let s = resolve_spoils(EnemyId::Milord, &[RewardTag::ContinueManor], &mut c, &mut dice);
        assert_eq!(c.coins, 7);
        assert_eq!(c.inventory.weapon, Weapon::Karabela);
        assert!(c.inventory.karabela);
        assert!(c.milord_defeated);
        assert!(!c.milord_hunts);
        assert_eq!(s.advancement_rolls, 1);
    }

    #[test]
    fn spirit_treasure() {
        let mut c = hero();
        // 3×4 coins, then three scrolls: fire(2), ward(1), sigil
        let mut dice = ScriptedDice::new([3, 4, 2, 2, 3, 1, 4]);
        let s = resolve_spoils(EnemyId::Spirit, &[], &mut c, &mut dice);
        assert_eq!(c.coins, 12);
        assert_eq!(c.inventory.scrolls().len(), 3);
        assert_eq!(s.advancement_rolls, 2);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn pantry_and_library_tags() {
        let mut c = hero();
        c.wound(5);
        // manor hajduk d6=5 (no sabre), heal d4=3, object: rope
        let mut dice = ScriptedDice::new([5, 3, 3]);
        let s = resolve_spoils(EnemyId::ManorHajduk, &[RewardTag::PantryOne], &mut c, &mut dice);
        assert_eq!(c.hp(), 13);
        assert!(c.inventory.rope);
        assert!(s.message.contains("Rope"));

        let mut dice = ScriptedDice::new([6, 2, 1]);
        resolve_spoils(EnemyId::Spook, &[RewardTag::LibrarySpook], &mut c, &mut dice);
        assert_eq!(c.inventory.scrolls().len(), 1);
        assert_eq!(c.inventory.scrolls()[0].kind, ScrollKind::FireGlyph);
    }

    #[test]
    fn follow_up_precedence() {
        use RewardTag::*;
        assert_eq!(RewardTag::follow_up(&[FallRisk, ContinueManor]), Some(ContinueManor));
        assert_eq!(RewardTag::follow_up(&[ContinueCave, EnterManor]), Some(EnterManor));
        assert_eq!(RewardTag::follow_up(&[PantryOne]), None);
    }
}
