//! The mutable character aggregate.
//!
//! [`Character`] owns every piece of run state: vitals, resources,
//! advancements, map bookkeeping, manor and cave sub-state, antagonist
//! flags and the inventory. Mutation helpers keep its invariants intact:
//! hp stays within `0..=max_hp`, a location is never both visited and
//! escaped, and advancement ids are unique.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{
    ADVANCEMENT_COUNT, Advancement, EnemyCategory, EnemyId, Location, Weapon,
};
use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;

/// Max hp of a fresh character.
pub const BASE_MAX_HP: i32 = 15;
/// Max hp after the vigor advancement.
pub const VIGOR_MAX_HP: i32 = 20;
/// A rest site is usable once its cooldown reaches this value.
pub const REST_COOLDOWN: u32 = 6;
/// Points needed for the manual advance.
pub const ADVANCE_POINTS: u32 = 15;
/// Visited places needed for the manual advance.
pub const ADVANCE_PLACES: u32 = 12;

/// The three places a character can rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestSite {
    /// The shepherd's hut.
    Hut,
    /// The mountain village.
    Village,
    /// The healing spring in the cave.
    Spring,
}

/// Locations visited since each rest site was last used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestCooldowns {
    /// Shepherd's hut counter.
    pub hut: u32,
    /// Village counter.
    pub village: u32,
    /// Cave spring counter.
    pub spring: u32,
}

impl Default for RestCooldowns {
    fn default() -> Self {
        Self {
            hut: REST_COOLDOWN,
            village: REST_COOLDOWN,
            spring: REST_COOLDOWN,
        }
    }
}

impl RestCooldowns {
    /// Counter for a site.
    pub fn get(&self, site: RestSite) -> u32 {
        match site {
            RestSite::Hut => self.hut,
            RestSite::Village => self.village,
            RestSite::Spring => self.spring,
        }
    }

    fn slot(&mut self, site: RestSite) -> &mut u32 {
        match site {
            RestSite::Hut => &mut self.hut,
            RestSite::Village => &mut self.village,
            RestSite::Spring => &mut self.spring,
        }
    }

    fn tick(&mut self) {
        self.hut += 1;
        self.village += 1;
        self.spring += 1;
    }
}

/// The enemies whose damage is halved by the resilience advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HalvedEnemies {
    /// The chosen scanty enemy.
    pub scanty: Option<EnemyId>,
    /// The chosen hardy enemy.
    pub hardy: Option<EnemyId>,
}

impl HalvedEnemies {
    /// Whether damage from this enemy is halved.
    pub fn halves(&self, enemy: EnemyId) -> bool {
        match enemy.category() {
            EnemyCategory::Scanty => self.scanty == Some(enemy),
            EnemyCategory::Hardy => self.hardy == Some(enemy),
            EnemyCategory::Special => false,
        }
    }

    /// Whether no enemy is halved.
    pub fn is_empty(&self) -> bool {
        self.scanty.is_none() && self.hardy.is_none()
    }
}

/// How a location shows on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapStatus {
    /// Never been there.
    Unknown,
    /// Fully explored.
    Visited,
    /// Fled from.
    Escaped,
    /// The character is there now.
    Current,
}

/// The single mutable aggregate owned by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Identifies the run this character belongs to.
    pub run_id: Uuid,
    /// Player-chosen name.
    pub name: String,
    hp: i32,
    max_hp: i32,
    /// Coins (dutki).
    pub coins: u32,
    /// Points toward the manual advance.
    pub points: u32,
    advancements: BTreeSet<Advancement>,
    /// Permanent hit bonus from advancements.
    pub permanent_hit_bonus: i32,
    /// Resilience picks.
    pub halved: HalvedEnemies,
    /// Where the character stands.
    pub current_location: Location,
    visited: BTreeSet<Location>,
    escaped: BTreeSet<Location>,
    /// Places visited since the last manual advance.
    pub visited_places: u32,
    /// Added to every 2d6 location roll.
    pub location_roll_modifier: i32,
    /// Rest cooldown counters.
    pub cooldowns: RestCooldowns,
    /// Manor rooms already explored (ids 1 to 6).
    pub manor_rooms_visited: BTreeSet<u8>,
    /// The manor was entered through the cave's hidden passage.
    pub manor_entered_from_cave: bool,
    /// The character is below ground.
    pub in_cave: bool,
    /// The cave's hidden passage has been found once.
    pub cave_hidden_passage_seen: bool,
    /// The Milord has fallen.
    pub milord_defeated: bool,
    /// The Milord replaces every hardy draw until defeated.
    pub milord_hunts: bool,
    /// +1 to hit against the Milord.
    pub milord_true_name_known: bool,
    /// One-shot hit modifier for the next fight.
    pub next_fight_hit_mod: i32,
    /// Penalty until the next rest or advancement.
    pub temporary_hit_penalty: i32,
    /// Summoned bies turns carried between fights.
    pub active_helper_turns: u32,
    /// Carried items.
    pub inventory: Inventory,
    is_dead: bool,
    has_won: bool,
}

impl Character {
    /// Create a fresh character at the Mountain Pass.
    pub fn new(name: impl Into<String>, weapon: Weapon, coins: u32) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            name: name.into(),
            hp: BASE_MAX_HP,
            max_hp: BASE_MAX_HP,
            coins,
            points: 0,
            advancements: BTreeSet::new(),
            permanent_hit_bonus: 0,
            halved: HalvedEnemies::default(),
            current_location: Location::MountainPass,
            visited: BTreeSet::new(),
            escaped: BTreeSet::new(),
            visited_places: 0,
            location_roll_modifier: 0,
            cooldowns: RestCooldowns::default(),
            manor_rooms_visited: BTreeSet::new(),
            manor_entered_from_cave: false,
            in_cave: false,
            cave_hidden_passage_seen: false,
            milord_defeated: false,
            milord_hunts: false,
            milord_true_name_known: false,
            next_fight_hit_mod: 0,
            temporary_hit_penalty: 0,
            active_helper_turns: 0,
            inventory: Inventory::with_weapon(weapon),
            is_dead: false,
            has_won: false,
        }
    }

    // -- vitals --------------------------------------------------------------

    /// Current hit points.
    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// Maximum hit points.
    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    /// Heal up to `amount`, clamped at max hp. Returns hp actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    /// Heal to full.
    pub fn heal_full(&mut self) {
        self.hp = self.max_hp;
    }

    /// Take damage, clamped at zero. Returns hp actually lost.
    pub fn wound(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0)).max(0);
        before - self.hp
    }

    /// Whether hp has run out. The dead flag itself is set by the run.
    pub fn is_out_of_hp(&self) -> bool {
        self.hp <= 0
    }

    // -- terminal flags ------------------------------------------------------

    /// Whether the run ended in death.
    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    /// Whether the run ended in victory.
    pub fn has_won(&self) -> bool {
        self.has_won
    }

    /// Set the dead flag. Never cleared.
    pub fn declare_dead(&mut self) {
        self.is_dead = true;
    }

    /// Set the won flag. Never cleared.
    pub fn declare_won(&mut self) {
        self.has_won = true;
    }

    // -- advancements --------------------------------------------------------

    /// Held advancements in id order.
    pub fn advancements(&self) -> &BTreeSet<Advancement> {
        &self.advancements
    }

    /// Whether an advancement is held.
    pub fn has_advancement(&self, adv: Advancement) -> bool {
        self.advancements.contains(&adv)
    }

    /// Whether every advancement is held.
    pub fn has_all_advancements(&self) -> bool {
        self.advancements.len() >= ADVANCEMENT_COUNT
    }

    /// Grant an advancement and apply its effect.
    ///
    /// Returns `false` if already held. Resilience needs enemy picks and
    /// must go through [`Character::grant_resilience`]; it is refused here.
    pub fn grant(&mut self, adv: Advancement) -> bool {
        if adv == Advancement::Resilience || self.advancements.contains(&adv) {
            return false;
        }
        match adv {
            Advancement::HarnasTitle => {}
            Advancement::SteadyHand => self.permanent_hit_bonus += 1,
            Advancement::Vigor => {
                self.max_hp = VIGOR_MAX_HP;
                self.hp = VIGOR_MAX_HP;
            }
            Advancement::Renown => self.points += 5,
            Advancement::Gunsmith => self.inventory.weapon = Weapon::Scattergun,
            Advancement::Resilience => {}
        }
        self.advancements.insert(adv);
        true
    }

    /// Grant resilience with one scanty and one hardy enemy.
    ///
    /// Returns `Ok(false)` and changes nothing if already held.
    pub fn grant_resilience(&mut self, scanty: EnemyId, hardy: EnemyId) -> CoreResult<bool> {
        if scanty.category() != EnemyCategory::Scanty {
            return Err(CoreError::WrongCategory {
                enemy: scanty,
                expected: EnemyCategory::Scanty,
            });
        }
        if hardy.category() != EnemyCategory::Hardy {
            return Err(CoreError::WrongCategory {
                enemy: hardy,
                expected: EnemyCategory::Hardy,
            });
        }
        if self.advancements.contains(&Advancement::Resilience) {
            return Ok(false);
        }
        self.halved = HalvedEnemies {
            scanty: Some(scanty),
            hardy: Some(hardy),
        };
        self.advancements.insert(Advancement::Resilience);
        Ok(true)
    }

    /// Take an advancement away and reverse its effect.
    ///
    /// Returns `false` if it was not held.
    pub fn revoke(&mut self, adv: Advancement) -> bool {
        if !self.advancements.remove(&adv) {
            return false;
        }
        match adv {
            Advancement::HarnasTitle => {}
            Advancement::SteadyHand => {
                self.permanent_hit_bonus = (self.permanent_hit_bonus - 1).max(0);
            }
            Advancement::Vigor => {
                self.max_hp = BASE_MAX_HP;
                self.hp = self.hp.min(self.max_hp);
            }
            Advancement::Renown => self.points = self.points.saturating_sub(5),
            Advancement::Gunsmith => {
                if self.inventory.weapon == Weapon::Scattergun {
                    self.inventory.weapon = Weapon::BareHands;
                }
            }
            Advancement::Resilience => self.halved = HalvedEnemies::default(),
        }
        true
    }

    /// Whether the manual advance thresholds are met.
    pub fn can_advance(&self) -> bool {
        self.points >= ADVANCE_POINTS && self.visited_places >= ADVANCE_PLACES
    }

    // -- map bookkeeping -----------------------------------------------------

    /// Record a full visit: counts the place, ticks every rest cooldown, and
    /// clears any escaped mark.
    pub fn mark_visited(&mut self, location: Location) {
        self.visited_places += 1;
        self.cooldowns.tick();
        self.escaped.remove(&location);
        self.visited.insert(location);
    }

    /// Record a flight. No effect on a location already visited.
    pub fn mark_escaped(&mut self, location: Location) {
        if !self.visited.contains(&location) {
            self.escaped.insert(location);
        }
    }

    /// Whether the location was fully explored.
    pub fn has_visited(&self, location: Location) -> bool {
        self.visited.contains(&location)
    }

    /// Whether the character fled from the location.
    pub fn has_escaped(&self, location: Location) -> bool {
        self.escaped.contains(&location)
    }

    /// Visited locations.
    pub fn visited(&self) -> &BTreeSet<Location> {
        &self.visited
    }

    /// Escaped locations.
    pub fn escaped(&self) -> &BTreeSet<Location> {
        &self.escaped
    }

    /// Map status of a tile.
    pub fn map_status(&self, location: Location) -> MapStatus {
        if location == self.current_location || (location == Location::Cave && self.in_cave) {
            MapStatus::Current
        } else if self.visited.contains(&location) {
            MapStatus::Visited
        } else if self.escaped.contains(&location) {
            MapStatus::Escaped
        } else {
            MapStatus::Unknown
        }
    }

    /// Whether every surface location needed for a peaceful ascension is visited.
    pub fn ready_for_ascension(&self) -> bool {
        Location::ASCENSION_REQUIREMENTS
            .iter()
            .all(|loc| self.visited.contains(loc))
    }

    // -- resting -------------------------------------------------------------

    /// Whether a rest site's cooldown allows resting.
    pub fn can_rest(&self, site: RestSite) -> bool {
        self.cooldowns.get(site) >= REST_COOLDOWN
    }

    /// Rest at a site: heal, reset its cooldown, clear the hit penalty.
    /// Returns hp gained.
    pub fn rest(&mut self, site: RestSite, heal: i32) -> i32 {
        *self.cooldowns.slot(site) = 0;
        self.temporary_hit_penalty = 0;
        self.heal(heal)
    }

    /// Reset a site's cooldown without resting there.
    pub fn reset_cooldown(&mut self, site: RestSite) {
        *self.cooldowns.slot(site) = 0;
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | HP {}/{} | {} coins | {} pts | {} | {}",
            self.name,
            self.hp,
            self.max_hp,
            self.coins,
            self.points,
            self.inventory.weapon,
            self.current_location,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hero() -> Character {
        Character::new("Janosik", Weapon::Knife, 10)
    }

    #[test]
    fn character_serde_roundtrip() {
        let mut c = hero();
        c.wound(4);
        c.grant(Advancement::SteadyHand);
        c.grant_resilience(EnemyId::Wolf, EnemyId::Bear).unwrap();
        c.mark_visited(Location::DeepWoods);
        c.mark_escaped(Location::Cliff);
        c.manor_rooms_visited.insert(3);
        c.milord_hunts = true;
        let json = serde_json::to_string(&c).unwrap();
        let back: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
        assert_eq!(back.hp(), 11);
        assert!(back.has_escaped(Location::Cliff));
    }

    #[test]
    fn fresh_character() {
        let c = hero();
        assert_eq!(c.hp(), 15);
        assert_eq!(c.max_hp(), 15);
        assert_eq!(c.current_location, Location::MountainPass);
        assert!(c.can_rest(RestSite::Hut));
        assert!(!c.is_dead());
        assert!(!c.has_won());
    }

    #[test]
    fn heal_clamps() {
        let mut c = hero();
        c.wound(4);
        assert_eq!(c.heal(10), 4);
        assert_eq!(c.hp(), 15);
    }

    #[test]
    fn wound_floors_at_zero() {
        let mut c = hero();
        assert_eq!(c.wound(40), 15);
        assert_eq!(c.hp(), 0);
        assert!(c.is_out_of_hp());
    }

    #[test]
    fn vigor_grant_and_revoke() {
        let mut c = hero();
        c.wound(5);
        assert!(c.grant(Advancement::Vigor));
        assert_eq!(c.max_hp(), 20);
        assert_eq!(c.hp(), 20);
        assert!(!c.grant(Advancement::Vigor));
        assert!(c.revoke(Advancement::Vigor));
        assert_eq!(c.max_hp(), 15);
        assert_eq!(c.hp(), 15);
    }

    #[test]
    fn other_grants_apply_effects() {
        let mut c = hero();
        c.grant(Advancement::SteadyHand);
        c.grant(Advancement::Renown);
        c.grant(Advancement::Gunsmith);
        assert_eq!(c.permanent_hit_bonus, 1);
        assert_eq!(c.points, 5);
        assert_eq!(c.inventory.weapon, Weapon::Scattergun);

        c.points = 3;
        c.revoke(Advancement::Renown);
        assert_eq!(c.points, 0);
        c.revoke(Advancement::Gunsmith);
        assert_eq!(c.inventory.weapon, Weapon::BareHands);
        c.revoke(Advancement::SteadyHand);
        assert_eq!(c.permanent_hit_bonus, 0);
    }

    #[test]
    fn resilience_requires_picks() {
        let mut c = hero();
        assert!(!c.grant(Advancement::Resilience));
        assert!(!c.has_advancement(Advancement::Resilience));

        assert_eq!(
            c.grant_resilience(EnemyId::Bear, EnemyId::Bear),
            Err(CoreError::WrongCategory {
                enemy: EnemyId::Bear,
                expected: EnemyCategory::Scanty,
            })
        );
        assert_eq!(c.grant_resilience(EnemyId::Wolf, EnemyId::Bear), Ok(true));
        assert!(c.halved.halves(EnemyId::Wolf));
        assert!(c.halved.halves(EnemyId::Bear));
        assert!(!c.halved.halves(EnemyId::Hajduk));
    }

    #[test]
    fn resilience_second_grant_keeps_mapping() {
        let mut c = hero();
        c.grant_resilience(EnemyId::Wolf, EnemyId::Bear).ok();
        assert_eq!(c.grant_resilience(EnemyId::Bies, EnemyId::Spook), Ok(false));
        assert_eq!(c.halved.scanty, Some(EnemyId::Wolf));
        assert_eq!(c.halved.hardy, Some(EnemyId::Bear));
    }

    #[test]
    fn visit_clears_escape() {
        let mut c = hero();
        c.mark_escaped(Location::Cliff);
        assert_eq!(c.map_status(Location::Cliff), MapStatus::Escaped);
        c.mark_visited(Location::Cliff);
        assert!(c.has_visited(Location::Cliff));
        assert!(!c.has_escaped(Location::Cliff));
        c.mark_escaped(Location::Cliff);
        assert!(!c.has_escaped(Location::Cliff));
    }

    #[test]
    fn visit_ticks_cooldowns() {
        let mut c = hero();
        c.rest(RestSite::Hut, 3);
        assert_eq!(c.cooldowns.hut, 0);
        c.mark_visited(Location::Meadow);
        c.mark_visited(Location::Meadow);
        assert_eq!(c.cooldowns.hut, 2);
        assert_eq!(c.cooldowns.village, REST_COOLDOWN + 2);
        assert_eq!(c.visited_places, 2);
    }

    #[test]
    fn rest_clears_penalty() {
        let mut c = hero();
        c.temporary_hit_penalty = -1;
        c.wound(6);
        assert_eq!(c.rest(RestSite::Village, 4), 4);
        assert_eq!(c.temporary_hit_penalty, 0);
        assert!(!c.can_rest(RestSite::Village));
    }

    #[test]
    fn map_status_current_and_cave() {
        let mut c = hero();
        c.current_location = Location::Burrow;
        c.in_cave = true;
        assert_eq!(c.map_status(Location::Burrow), MapStatus::Current);
        assert_eq!(c.map_status(Location::Cave), MapStatus::Current);
        assert_eq!(c.map_status(Location::Meadow), MapStatus::Unknown);
    }

    #[test]
    fn advance_thresholds() {
        let mut c = hero();
        c.points = 15;
        c.visited_places = 11;
        assert!(!c.can_advance());
        c.visited_places = 12;
        assert!(c.can_advance());
    }

    #[test]
    fn ascension_needs_nine_locations() {
        let mut c = hero();
        for loc in &Location::ASCENSION_REQUIREMENTS[..8] {
            c.mark_visited(*loc);
        }
        assert!(!c.ready_for_ascension());
        c.mark_visited(Location::MilordsManor);
        assert!(c.ready_for_ascension());
    }

    #[test]
    fn terminal_flags_are_sticky() {
        let mut c = hero();
        c.declare_dead();
        c.heal_full();
        assert!(c.is_dead());
    }

    proptest! {
        #[test]
        fn hp_stays_within_bounds(ops in proptest::collection::vec(-12i32..12, 0..40)) {
            let mut c = hero();
            for delta in ops {
                if delta >= 0 {
                    c.heal(delta);
                } else {
                    c.wound(-delta);
                }
                prop_assert!(c.hp() >= 0);
                prop_assert!(c.hp() <= c.max_hp());
            }
        }

        #[test]
        fn never_visited_and_escaped(steps in proptest::collection::vec((0usize..11, any::<bool>()), 0..40)) {
            let mut c = hero();
            for (idx, visit) in steps {
                let loc = Location::MAP[idx];
                if visit {
                    c.mark_visited(loc);
                } else {
                    c.mark_escaped(loc);
                }
                prop_assert!(c.visited().is_disjoint(c.escaped()));
            }
        }
    }
}
