//! The turn-based combat resolver.
//!
//! A [`Combat`] pits the character against one enemy instance. Each call
//! to [`Combat::act`] resolves a whole shared turn: the player's action,
//! the summoned helper's bite, the victory check, and (unless the player
//! landed a hit) the enemy's retaliation. Rejected actions change nothing
//! and give the enemy no free turn.

pub mod action;

pub use action::{AvailableActions, CombatAction, CombatEvent};

use cg_core::{Character, EnemyId, EnemyStats, Location, ScrollKind, Weapon};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::dice::DiceSource;
use crate::error::{MechError, MechResult, Rejection};
use crate::rewards::RewardTag;

/// An enemy instance with its own hit points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Foe {
    /// Catalog stats.
    pub stats: EnemyStats,
    /// Current hit points.
    pub hp: i32,
}

impl Foe {
    /// Spawn a fresh enemy at full hp.
    pub fn spawn(id: EnemyId) -> Self {
        let stats = id.stats();
        Self {
            stats,
            hp: stats.max_hp,
        }
    }

    /// Which enemy this is.
    pub fn id(&self) -> EnemyId {
        self.stats.id
    }
}

/// Fixed parameters of one fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightSetup {
    /// The enemy to face.
    pub enemy: EnemyId,
    /// Where the fight happens. Fleeing marks it escaped; victory, visited.
    pub location: Location,
    /// Sides of the flee damage die. Zero means fleeing is free.
    pub flee_die: u32,
    /// Whether the invisibility cap can end the fight.
    pub allow_cap: bool,
    /// Weapons that count as bare hands in this fight.
    pub forbidden: Vec<Weapon>,
    /// Extra rewards and follow-ups once the enemy falls.
    pub rewards: Vec<RewardTag>,
}

impl FightSetup {
    /// Default setup: d4 flee damage, the enemy's own forbidden weapons,
    /// and the cap allowed except against the Milord and the Spirit.
    pub fn new(enemy: EnemyId, location: Location) -> Self {
        Self {
            enemy,
            location,
            flee_die: 4,
            allow_cap: !matches!(enemy, EnemyId::Milord | EnemyId::Spirit),
            forbidden: enemy.forbidden_weapons().to_vec(),
            rewards: Vec::new(),
        }
    }

    /// Set the flee damage die.
    pub fn with_flee_die(mut self, sides: u32) -> Self {
        self.flee_die = sides;
        self
    }

    /// Allow or forbid the invisibility cap.
    pub fn with_cap(mut self, allowed: bool) -> Self {
        self.allow_cap = allowed;
        self
    }

    /// Replace the forbidden weapon list.
    pub fn with_forbidden(mut self, weapons: &[Weapon]) -> Self {
        self.forbidden = weapons.to_vec();
        self
    }

    /// Add a reward tag.
    pub fn with_reward(mut self, tag: RewardTag) -> Self {
        if !self.rewards.contains(&tag) {
            self.rewards.push(tag);
        }
        self
    }
}

/// How a call to [`Combat::act`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    /// The fight goes on.
    Ongoing,
    /// The enemy fell. Points were already added.
    Victory {
        /// Points awarded.
        points: u32,
    },
    /// The character's hp ran out.
    Defeat,
    /// The character ran away.
    Fled {
        /// Damage taken while fleeing.
        damage: i32,
    },
    /// The character vanished under the cap. Points were already added.
    Avoided {
        /// Points awarded.
        points: u32,
    },
}

impl CombatOutcome {
    /// Whether the fight is over.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// The state of an ongoing fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combat {
    /// The enemy instance.
    pub foe: Foe,
    /// The fight's fixed parameters.
    pub setup: FightSetup,
    /// One-shot hit modifier carried in from the character.
    pub hit_mod: i32,
    /// Turns of protection ward left.
    pub ward_turns: u32,
    /// Turns the summoned bies keeps fighting.
    pub helper_turns: u32,
    /// Current turn (1-based).
    pub turn: u32,
    /// Narrative of the last turn.
    pub message: String,
    /// Every resolved turn.
    pub log: Vec<CombatEvent>,
    finished: bool,
}

impl Combat {
    /// Open a fight.
    ///
    /// Consumes the character's one-shot hit modifier and takes over any
    /// summoned bies still carried from an earlier fight.
    pub fn begin(setup: FightSetup, character: &mut Character) -> Self {
        let foe = Foe::spawn(setup.enemy);
        let hit_mod = std::mem::take(&mut character.next_fight_hit_mod);
        let helper_turns = std::mem::take(&mut character.active_helper_turns);
        info!(
            "fight: {} at {} (hit mod {hit_mod:+}, bies {helper_turns})",
            foe.id(),
            setup.location
        );
        let message = format!("A {} blocks your path!", foe.id());
        Self {
            foe,
            setup,
            hit_mod,
            ward_turns: 0,
            helper_turns,
            turn: 1,
            message,
            log: Vec::new(),
            finished: false,
        }
    }

    /// Which enemy is being fought.
    pub fn enemy(&self) -> EnemyId {
        self.foe.id()
    }

    /// Whether the fight has reached a terminal outcome.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The weapon actually used: bare hands if the wielded one is forbidden.
    pub fn effective_weapon(&self, character: &Character) -> Weapon {
        let weapon = character.inventory.weapon;
        if self.setup.forbidden.contains(&weapon) {
            Weapon::BareHands
        } else {
            weapon
        }
    }

    /// Total modifier added to the d6 hit roll.
    pub fn hit_modifier(&self, character: &Character) -> i32 {
        let mut total = self.effective_weapon(character).stats().hit_bonus
            + character.permanent_hit_bonus
            + self.hit_mod
            + character.temporary_hit_penalty;
        if self.enemy() == EnemyId::Milord && character.milord_true_name_known {
            total += 1;
        }
        if self.enemy() == EnemyId::Spirit && character.inventory.spirit_heart {
            total += 1;
        }
        total
    }

    /// Actions the player may take right now.
    pub fn available(&self, character: &Character) -> AvailableActions {
        if self.finished {
            return AvailableActions::default();
        }
        AvailableActions {
            attack: true,
            potion: character.inventory.potions() > 0,
            scrolls: character
                .inventory
                .scrolls()
                .iter()
                .map(|s| self.scroll_allowed(s.kind).is_ok())
                .collect(),
            flee: true,
            vanish: self.cap_allowed(character).is_ok(),
        }
    }

    fn scroll_allowed(&self, kind: ScrollKind) -> Result<(), Rejection> {
        if !kind.usable_in_combat() {
            return Err(Rejection::ScrollNotForCombat(kind));
        }
        if kind == ScrollKind::BiesSummoning && self.helper_turns > 0 {
            return Err(Rejection::HelperAlreadyActive);
        }
        Ok(())
    }

    fn cap_allowed(&self, character: &Character) -> Result<(), Rejection> {
        if !self.setup.allow_cap {
            return Err(Rejection::CapNotAllowed);
        }
        if character.inventory.cap_charges == 0 {
            return Err(Rejection::NoCapCharges);
        }
        Ok(())
    }

    fn check(&self, action: CombatAction, character: &Character) -> Result<(), Rejection> {
        if self.finished {
            return Err(Rejection::FightOver);
        }
        match action {
            CombatAction::DrinkPotion if character.inventory.potions() == 0 => {
                Err(Rejection::NoPotions)
            }
            CombatAction::UseScroll(index) => {
                let scroll = character
                    .inventory
                    .scrolls()
                    .get(index)
                    .ok_or(Rejection::NoSuchScroll(index))?;
                self.scroll_allowed(scroll.kind)
            }
            _ => Ok(()),
        }
    }

    /// Resolve one turn.
    pub fn act(
        &mut self,
        action: CombatAction,
        character: &mut Character,
        dice: &mut dyn DiceSource,
    ) -> MechResult<CombatOutcome> {
        self.check(action, character).map_err(MechError::Rejected)?;

        if action == CombatAction::Flee {
            return Ok(self.flee(character, dice));
        }

        let mut msg = String::new();
        let mut damage_to_foe = 0;
        let mut landed = false;

        match action {
            CombatAction::Attack => {
                let weapon = self.effective_weapon(character).stats();
                let hit = dice.amount(6) + self.hit_modifier(character);
                if hit >= self.foe.stats.hit_threshold {
                    let dmg = (dice.amount(weapon.damage_die) + weapon.bonus_damage).max(0);
                    damage_to_foe += dmg;
                    landed = true;
                    msg.push_str(&format!("You hit for {dmg}! "));
                } else {
                    msg.push_str("You missed! ");
                }
            }
            CombatAction::DrinkPotion => {
                character.inventory.take_potion();
                let healed = character.heal(dice.amount(6));
                msg.push_str(&format!("You drank a potion and healed {healed} HP. "));
            }
            CombatAction::UseScroll(index) => {
                match character.inventory.spend_scroll(index) {
                    Some(ScrollKind::BiesSummoning) => {
                        self.helper_turns = dice.d4();
                        msg.push_str(&format!(
                            "You summoned a bies for {} turns. ",
                            self.helper_turns
                        ));
                    }
                    Some(ScrollKind::FireGlyph) => {
                        let dmg = dice.amount(6) + 1;
                        damage_to_foe += dmg;
                        msg.push_str(&format!("Fire glyph scorches for {dmg} damage! "));
                    }
                    Some(ScrollKind::ProtectionWard) => {
                        self.ward_turns = dice.d4();
                        msg.push_str(&format!(
                            "Protection ward shields you for {} turns. ",
                            self.ward_turns
                        ));
                    }
                    // Filtered out by `check`.
                    Some(ScrollKind::DivinationSigil) | None => {}
                }
            }
            CombatAction::Flee => {}
        }

        if self.helper_turns > 0 {
            let bite = dice.amount(4);
            damage_to_foe += bite;
            self.helper_turns -= 1;
            msg.push_str(&format!("Bies deals {bite} damage! "));
        }

        self.foe.hp -= damage_to_foe;
        if self.foe.hp <= 0 {
            let points = self.foe.stats.reward();
            character.points += points;
            character.active_helper_turns = self.helper_turns;
            msg.push_str(&format!("The {} falls!", self.enemy()));
            self.close(action, msg);
            info!("victory over {}, +{points} points", self.enemy());
            return Ok(CombatOutcome::Victory { points });
        }

        if !landed {
            let dealt = self.enemy_strike(character, dice, &mut msg);
            character.wound(dealt);
        }

        self.ward_turns = self.ward_turns.saturating_sub(1);

        if character.is_out_of_hp() {
            self.close(action, msg);
            info!("defeated by {}", self.enemy());
            return Ok(CombatOutcome::Defeat);
        }

        self.record(action, msg);
        self.turn += 1;
        Ok(CombatOutcome::Ongoing)
    }

    /// Slip away under the invisibility cap: full reward, no fight.
    pub fn avoid_with_cap(&mut self, character: &mut Character) -> MechResult<CombatOutcome> {
        if self.finished {
            return Err(MechError::Rejected(Rejection::FightOver));
        }
        self.cap_allowed(character).map_err(MechError::Rejected)?;
        let points = self.foe.stats.reward();
        character.points += points;
        character.inventory.cap_charges -= 1;
        character.mark_visited(self.setup.location);
        self.finished = true;
        self.message = format!("You vanish from sight and gain {points} points without a fight.");
        info!("avoided {} with the cap", self.enemy());
        Ok(CombatOutcome::Avoided { points })
    }

    fn flee(&mut self, character: &mut Character, dice: &mut dyn DiceSource) -> CombatOutcome {
        let damage = if self.setup.flee_die == 0 {
            0
        } else {
            dice.amount(self.setup.flee_die)
        };
        character.wound(damage);
        character.mark_escaped(self.setup.location);
        if self.enemy() == EnemyId::Milord {
            character.milord_hunts = true;
        }
        let msg = if damage > 0 {
            format!("You fled, taking {damage} damage.")
        } else {
            "You fled.".to_string()
        };
        self.close(CombatAction::Flee, msg);
        info!("fled from {}", self.enemy());
        CombatOutcome::Fled { damage }
    }

    fn enemy_strike(
        &self,
        character: &Character,
        dice: &mut dyn DiceSource,
        msg: &mut String,
    ) -> i32 {
        let stats = self.foe.stats;
        let mut dmg = if stats.id == EnemyId::Undine && self.turn % 2 == 0 {
            msg.push_str("Undine ensnares you! ");
            dice.amount(6)
        } else {
            dice.amount(stats.damage_die) + stats.damage_bonus
        };
        if character.halved.halves(stats.id) {
            dmg /= 2;
        }
        if character.inventory.kaftan {
            dmg = (dmg - dice.amount(4)).max(0);
        }
        if self.ward_turns > 0 {
            dmg = (dmg - dice.amount(4)).max(0);
        }
        debug!("{} strikes for {dmg}", stats.id);
        msg.push_str(&format!("Enemy deals {dmg} damage."));
        dmg
    }

    fn record(&mut self, action: CombatAction, message: String) {
        let message = message.trim_end().to_string();
        self.log.push(CombatEvent {
            turn: self.turn,
            action,
            message: message.clone(),
        });
        self.message = message;
    }

    fn close(&mut self, action: CombatAction, message: String) {
        self.record(action, message);
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use cg_core::{EnemyId, Scroll};

    fn hero(weapon: Weapon) -> Character {
        Character::new("Janosik", weapon, 10)
    }

    fn fight(enemy: EnemyId, c: &mut Character) -> Combat {
        Combat::begin(FightSetup::new(enemy, Location::DeepWoods), c)
    }

    #[test]
    fn knife_kills_poacher_in_two_hits() {
        let mut c = hero(Weapon::Knife);
        let mut combat = fight(EnemyId::Poacher, &mut c);
        // hit 3 ≥ 3, dmg 3; hit 6, dmg 2 → 5 total = max hp
        let mut dice = ScriptedDice::new([3, 3, 6, 2]);
        let first = combat.act(CombatAction::Attack, &mut c, &mut dice);
        assert_eq!(first, Ok(CombatOutcome::Ongoing));
        assert_eq!(combat.foe.hp, 2);
        assert_eq!(c.hp(), 15);
        let second = combat.act(CombatAction::Attack, &mut c, &mut dice);
        assert_eq!(second, Ok(CombatOutcome::Victory { points: 3 }));
        assert_eq!(c.points, 3);
        assert!(combat.is_finished());
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn miss_lets_enemy_strike() {
        let mut c = hero(Weapon::Knife);
        let mut combat = fight(EnemyId::Wolf, &mut c);
        // miss on 2 (< 4), wolf d4 rolls 3, +1
        let mut dice = ScriptedDice::new([2, 3]);
        let out = combat.act(CombatAction::Attack, &mut c, &mut dice);
        assert_eq!(out, Ok(CombatOutcome::Ongoing));
        assert_eq!(c.hp(), 11);
        assert_eq!(combat.turn, 2);
    }

    #[test]
    fn forbidden_weapon_falls_back_to_bare_hands() {
        let mut c = hero(Weapon::Samopal);
        let combat = fight(EnemyId::Undine, &mut c);
        assert_eq!(combat.effective_weapon(&c), Weapon::BareHands);
        let other = fight(EnemyId::Bear, &mut c);
        assert_eq!(other.effective_weapon(&c), Weapon::Samopal);
    }

    #[test]
    fn undine_ensnares_on_even_turns() {
        let mut c = hero(Weapon::Knife);
        let mut combat = fight(EnemyId::Undine, &mut c);
        // turn 1: miss (1), undine d4 = 2
        // turn 2: miss (1), ensnare d6 = 5
        let mut dice = ScriptedDice::new([1, 2, 1, 5]);
        combat.act(CombatAction::Attack, &mut c, &mut dice).ok();
        assert_eq!(c.hp(), 13);
        combat.act(CombatAction::Attack, &mut c, &mut dice).ok();
        assert_eq!(c.hp(), 8);
        assert!(combat.message.contains("ensnares"));
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn kaftan_and_ward_soak_damage() {
        let mut c = hero(Weapon::Knife);
        c.inventory.kaftan = true;
        c.inventory.add_scroll(Scroll::new(ScrollKind::ProtectionWard, 1));
        let mut combat = fight(EnemyId::Bear, &mut c);
        // ward turns d4 = 2; bear d6 = 6 +1 = 7; kaftan 3; ward 4 → 0
        let mut dice = ScriptedDice::new([2, 6, 3, 4]);
        let out = combat.act(CombatAction::UseScroll(0), &mut c, &mut dice);
        assert_eq!(out, Ok(CombatOutcome::Ongoing));
        assert_eq!(c.hp(), 15);
        assert_eq!(combat.ward_turns, 1);
        assert!(c.inventory.scrolls().is_empty());
    }

    #[test]
    fn halved_enemy_damage() {
        let mut c = hero(Weapon::Knife);
        c.grant_resilience(EnemyId::Wolf, EnemyId::Bear).ok();
        let mut combat = fight(EnemyId::Wolf, &mut c);
        // miss, wolf 4+1 = 5 → 2
        let mut dice = ScriptedDice::new([1, 4]);
        combat.act(CombatAction::Attack, &mut c, &mut dice).ok();
        assert_eq!(c.hp(), 13);
    }

    #[test]
    fn fire_glyph_hits_regardless() {
        let mut c = hero(Weapon::Knife);
        c.inventory.add_scroll(Scroll::new(ScrollKind::FireGlyph, 2));
        let mut combat = fight(EnemyId::Poacher, &mut c);
        let mut dice = ScriptedDice::new([4]);
        let out = combat.act(CombatAction::UseScroll(0), &mut c, &mut dice);
        assert_eq!(out, Ok(CombatOutcome::Victory { points: 3 }));
        assert_eq!(c.inventory.scrolls()[0].uses, 1);
    }

    #[test]
    fn bies_helper_bites_and_persists() {
        let mut c = hero(Weapon::Knife);
        c.inventory.add_scroll(Scroll::new(ScrollKind::BiesSummoning, 1));
        let mut combat = fight(EnemyId::Poacher, &mut c);
        // summon 4 turns, bite 2, poacher hits 1
        let mut dice = ScriptedDice::new([4, 2, 1]);
        combat.act(CombatAction::UseScroll(0), &mut c, &mut dice).ok();
        assert_eq!(combat.helper_turns, 3);
        assert_eq!(combat.foe.hp, 3);
        assert_eq!(c.hp(), 14);
        // hit 6, dmg 1, bite 2 → dead; 2 helper turns left carried over
        let mut dice = ScriptedDice::new([6, 1, 2]);
        let out = combat.act(CombatAction::Attack, &mut c, &mut dice);
        assert_eq!(out, Ok(CombatOutcome::Victory { points: 3 }));
        assert_eq!(c.active_helper_turns, 2);
    }

    #[test]
    fn second_bies_rejected() {
        let mut c = hero(Weapon::Knife);
        c.active_helper_turns = 2;
        c.inventory.add_scroll(Scroll::new(ScrollKind::BiesSummoning, 1));
        let mut combat = fight(EnemyId::Hajduk, &mut c);
        assert_eq!(combat.helper_turns, 2);
        let mut dice = ScriptedDice::new(Vec::<u32>::new());
        let out = combat.act(CombatAction::UseScroll(0), &mut c, &mut dice);
        assert_eq!(
            out,
            Err(MechError::Rejected(Rejection::HelperAlreadyActive))
        );
        assert_eq!(c.inventory.scrolls().len(), 1);
        assert_eq!(combat.turn, 1);
    }

    #[test]
    fn rejections_leave_state_untouched() {
        let mut c = hero(Weapon::Knife);
        c.inventory.add_scroll(Scroll::new(ScrollKind::DivinationSigil, 1));
        let mut combat = fight(EnemyId::Hajduk, &mut c);
        let mut dice = ScriptedDice::new([6, 6]);
        assert_eq!(
            combat.act(CombatAction::DrinkPotion, &mut c, &mut dice),
            Err(MechError::Rejected(Rejection::NoPotions))
        );
        assert_eq!(
            combat.act(CombatAction::UseScroll(3), &mut c, &mut dice),
            Err(MechError::Rejected(Rejection::NoSuchScroll(3)))
        );
        assert_eq!(
            combat.act(CombatAction::UseScroll(0), &mut c, &mut dice),
            Err(MechError::Rejected(Rejection::ScrollNotForCombat(
                ScrollKind::DivinationSigil
            )))
        );
        assert_eq!(dice.remaining(), 2);
        assert_eq!(c.hp(), 15);
        assert!(combat.log.is_empty());
    }

    #[test]
    fn potion_heals_then_enemy_acts() {
        let mut c = hero(Weapon::Knife);
        c.inventory.add_potion();
        c.wound(10);
        let mut combat = fight(EnemyId::Hajduk, &mut c);
        let mut dice = ScriptedDice::new([6, 2]);
        combat.act(CombatAction::DrinkPotion, &mut c, &mut dice).ok();
        assert_eq!(c.hp(), 9);
        assert_eq!(c.inventory.potions(), 0);
    }

    #[test]
    fn flee_with_zero_die_is_free() {
        let mut c = hero(Weapon::Knife);
        let setup = FightSetup::new(EnemyId::Wolf, Location::Meadow).with_flee_die(0);
        let mut combat = Combat::begin(setup, &mut c);
        let mut dice = ScriptedDice::new(Vec::<u32>::new());
        let out = combat.act(CombatAction::Flee, &mut c, &mut dice);
        assert_eq!(out, Ok(CombatOutcome::Fled { damage: 0 }));
        assert_eq!(c.hp(), 15);
        assert!(c.has_escaped(Location::Meadow));
        assert!(!c.has_visited(Location::Meadow));
    }

    #[test]
    fn fleeing_the_milord_sets_the_hunt() {
        let mut c = hero(Weapon::Knife);
        let setup = FightSetup::new(EnemyId::Milord, Location::MilordsManor).with_flee_die(6);
        let mut combat = Combat::begin(setup, &mut c);
        let mut dice = ScriptedDice::new([5]);
        let out = combat.act(CombatAction::Flee, &mut c, &mut dice);
        assert_eq!(out, Ok(CombatOutcome::Fled { damage: 5 }));
        assert!(c.milord_hunts);
        assert_eq!(
            combat.act(CombatAction::Attack, &mut c, &mut dice),
            Err(MechError::Rejected(Rejection::FightOver))
        );
    }

    #[test]
    fn defeat_when_hp_runs_out() {
        let mut c = hero(Weapon::Knife);
        c.wound(13);
        let mut combat = fight(EnemyId::Wolf, &mut c);
        let mut dice = ScriptedDice::new([1, 4]);
        let out = combat.act(CombatAction::Attack, &mut c, &mut dice);
        assert_eq!(out, Ok(CombatOutcome::Defeat));
        assert!(combat.is_finished());
        assert_eq!(c.hp(), 0);
    }

    #[test]
    fn hit_mod_is_consumed_at_start() {
        let mut c = hero(Weapon::Sabre);
        c.next_fight_hit_mod = 1;
        c.temporary_hit_penalty = -1;
        c.milord_true_name_known = true;
        let combat = fight(EnemyId::Milord, &mut c);
        assert_eq!(c.next_fight_hit_mod, 0);
        // sabre +1, mod +1, penalty -1, true name +1
        assert_eq!(combat.hit_modifier(&c), 2);
    }

    #[test]
    fn cap_avoidance() {
        let mut c = hero(Weapon::Knife);
        c.inventory.cap_charges = 1;
        let mut combat = fight(EnemyId::Bear, &mut c);
        assert!(combat.available(&c).vanish);
        let out = combat.avoid_with_cap(&mut c);
        assert_eq!(out, Ok(CombatOutcome::Avoided { points: 7 }));
        assert_eq!(c.inventory.cap_charges, 0);
        assert!(c.has_visited(Location::DeepWoods));
    }

    #[test]
    fn cap_refused_against_bosses() {
        let mut c = hero(Weapon::Knife);
        c.inventory.cap_charges = 2;
        let mut combat = fight(EnemyId::Spirit, &mut c);
        assert!(!combat.available(&c).vanish);
        assert_eq!(
            combat.avoid_with_cap(&mut c),
            Err(MechError::Rejected(Rejection::CapNotAllowed))
        );
        assert_eq!(c.inventory.cap_charges, 2);
    }

    #[test]
    fn available_actions_reflect_state() {
        let mut c = hero(Weapon::Knife);
        c.inventory.add_scroll(Scroll::new(ScrollKind::FireGlyph, 1));
        c.inventory.add_scroll(Scroll::new(ScrollKind::DivinationSigil, 1));
        let combat = fight(EnemyId::Hajduk, &mut c);
        let actions = combat.available(&c);
        assert!(actions.attack);
        assert!(!actions.potion);
        assert_eq!(actions.scrolls, vec![true, false]);
        assert!(!actions.vanish);
    }
}
