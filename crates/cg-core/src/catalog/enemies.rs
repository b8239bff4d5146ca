//! Enemy stat blocks.
//!
//! Enemies come in three tiers. Scanty and hardy enemies are drawn at
//! random with a d4; special enemies only appear where a location script
//! names them.

use serde::{Deserialize, Serialize};

use super::weapons::Weapon;

/// Weapons that misfire against the Undine and fall back to bare hands.
pub const FIREARMS: [Weapon; 2] = [Weapon::Samopal, Weapon::Scattergun];

/// Enemy tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyCategory {
    /// Weak, common foes.
    Scanty,
    /// Tougher foes.
    Hardy,
    /// Named bosses.
    Special,
}

impl std::fmt::Display for EnemyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scanty => write!(f, "scanty"),
            Self::Hardy => write!(f, "hardy"),
            Self::Special => write!(f, "special"),
        }
    }
}

/// Stable identity of every enemy in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyId {
    /// Scanty.
    Hajduk,
    /// Scanty.
    Bies,
    /// Scanty.
    Poacher,
    /// Scanty.
    Wolf,
    /// Hardy. Ensnares on even turns.
    Undine,
    /// Hardy.
    Bear,
    /// Hardy.
    Highwayman,
    /// Hardy.
    Spook,
    /// Special. Lord of the manor.
    Milord,
    /// Special. Guards the manor hallway.
    ManorHajduk,
    /// Special. Guardian of Peak Black.
    Spirit,
}

/// Fixed numbers for one enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyStats {
    /// Which enemy this is.
    pub id: EnemyId,
    /// Tier of the enemy.
    pub category: EnemyCategory,
    /// Hit roll needed to wound it.
    pub hit_threshold: i32,
    /// Sides of its damage die.
    pub damage_die: u32,
    /// Flat bonus on its damage.
    pub damage_bonus: i32,
    /// Starting hit points.
    pub max_hp: i32,
    /// Points awarded on victory when different from the hit threshold.
    pub reward_points: Option<u32>,
}

impl EnemyStats {
    /// Points granted for defeating (or avoiding) this enemy.
    pub fn reward(&self) -> u32 {
        self.reward_points
            .unwrap_or(self.hit_threshold.unsigned_abs())
    }
}

impl EnemyId {
    /// Scanty enemies, indexed by `d4 - 1`.
    pub const SCANTY: [EnemyId; 4] = [Self::Hajduk, Self::Bies, Self::Poacher, Self::Wolf];

    /// Hardy enemies, indexed by `d4 - 1`.
    pub const HARDY: [EnemyId; 4] = [Self::Undine, Self::Bear, Self::Highwayman, Self::Spook];

    /// Every enemy in catalog order.
    pub const ALL: [EnemyId; 11] = [
        Self::Hajduk,
        Self::Bies,
        Self::Poacher,
        Self::Wolf,
        Self::Undine,
        Self::Bear,
        Self::Highwayman,
        Self::Spook,
        Self::Milord,
        Self::ManorHajduk,
        Self::Spirit,
    ];

    /// Returns the stat block.
    pub fn stats(self) -> EnemyStats {
        use EnemyCategory::{Hardy, Scanty, Special};
        let (category, hit_threshold, damage_die, damage_bonus, max_hp, reward_points) = match self
        {
            Self::Hajduk => (Scanty, 3, 4, 0, 6, None),
            Self::Bies => (Scanty, 3, 4, 0, 6, None),
            Self::Poacher => (Scanty, 3, 4, 0, 5, None),
            Self::Wolf => (Scanty, 4, 4, 1, 6, None),
            Self::Undine => (Hardy, 4, 4, 0, 8, None),
            Self::Bear => (Hardy, 5, 6, 1, 10, Some(7)),
            Self::Highwayman => (Hardy, 4, 6, 1, 10, None),
            Self::Spook => (Hardy, 5, 6, 0, 12, None),
            Self::Milord => (Special, 5, 6, 2, 14, None),
            Self::ManorHajduk => (Special, 3, 6, 0, 6, None),
            Self::Spirit => (Special, 6, 6, 2, 20, None),
        };
        EnemyStats {
            id: self,
            category,
            hit_threshold,
            damage_die,
            damage_bonus,
            max_hp,
            reward_points,
        }
    }

    /// Tier of this enemy.
    pub fn category(self) -> EnemyCategory {
        self.stats().category
    }

    /// Draw a random enemy of the given tier from a d4 result.
    ///
    /// Special enemies are never drawn; asking for one yields `None`.
    pub fn draw(category: EnemyCategory, roll: u32) -> Option<Self> {
        let idx = roll.clamp(1, 4) as usize - 1;
        match category {
            EnemyCategory::Scanty => Some(Self::SCANTY[idx]),
            EnemyCategory::Hardy => Some(Self::HARDY[idx]),
            EnemyCategory::Special => None,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Hajduk => "Hajduk",
            Self::Bies => "Bies",
            Self::Poacher => "Poacher",
            Self::Wolf => "Wolf",
            Self::Undine => "Undine",
            Self::Bear => "Bear",
            Self::Highwayman => "Highwayman",
            Self::Spook => "Spook",
            Self::Milord => "The Milord",
            Self::ManorHajduk => "Milord's Hajduk",
            Self::Spirit => "Spirit of the Mountains",
        }
    }

    /// A line of folklore shown when the fight opens.
    pub fn lore(self) -> &'static str {
        match self {
            Self::Hajduk => "A court guard turned outlaw, still bound to old orders and old grudges.",
            Self::Bies => "A malicious spirit of the wilds; bonfires and salt keep its gaze away.",
            Self::Poacher => "A hunter who ignores village taboos and claims the forest owes him meat.",
            Self::Wolf => "Not just a beast but a watcher. Some say it is a witch's eyes on four legs.",
            Self::Undine => "A water spirit coiled in river mist, luring travelers with drowned songs.",
            Self::Bear => "A forest lord, kin to men in the old tales and owed grim respect.",
            Self::Highwayman => "A mountain bandit who knows every trail and every traveler lost on it.",
            Self::Spook => "A restless soul bound to these heights by unkept vows.",
            Self::Milord => "A noble corrupted by pride, haunting his halls with contracts in blood.",
            Self::ManorHajduk => "The Milord's last loyal blade, kept by oath after the manor fell.",
            Self::Spirit => "The ancient guardian of Corny Groń, colder than the stone.",
        }
    }

    /// Weapons that do not work against this enemy.
    pub fn forbidden_weapons(self) -> &'static [Weapon] {
        match self {
            Self::Undine => &FIREARMS,
            _ => &[],
        }
    }
}

impl std::fmt::Display for EnemyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_names_are_stable() {
        for enemy in EnemyId::ALL {
            let json = serde_json::to_string(&enemy).unwrap();
            assert_eq!(json, format!("\"{enemy:?}\""));
            let back: EnemyId = serde_json::from_str(&json).unwrap();
            assert_eq!(back, enemy);
        }
        assert_eq!(serde_json::to_string(&EnemyId::Milord).unwrap(), "\"Milord\"");
    }

    #[test]
    fn reward_defaults_to_threshold() {
        assert_eq!(EnemyId::Hajduk.stats().reward(), 3);
        assert_eq!(EnemyId::Spirit.stats().reward(), 6);
    }

    #[test]
    fn bear_has_distinct_reward() {
        let bear = EnemyId::Bear.stats();
        assert_eq!(bear.hit_threshold, 5);
        assert_eq!(bear.reward(), 7);
    }

    #[test]
    fn draw_by_category() {
        assert_eq!(EnemyId::draw(EnemyCategory::Scanty, 4), Some(EnemyId::Wolf));
        assert_eq!(EnemyId::draw(EnemyCategory::Hardy, 1), Some(EnemyId::Undine));
        assert_eq!(EnemyId::draw(EnemyCategory::Special, 1), None);
    }

    #[test]
    fn categories_match_tables() {
        for id in EnemyId::SCANTY {
            assert_eq!(id.category(), EnemyCategory::Scanty);
        }
        for id in EnemyId::HARDY {
            assert_eq!(id.category(), EnemyCategory::Hardy);
        }
        assert_eq!(EnemyId::Milord.category(), EnemyCategory::Special);
    }

    #[test]
    fn undine_forbids_firearms() {
        assert_eq!(EnemyId::Undine.forbidden_weapons(), &FIREARMS);
        assert!(EnemyId::Bear.forbidden_weapons().is_empty());
    }
}
