//! The weapon table.

use serde::{Deserialize, Serialize};

/// A weapon the character can wield. Exactly one is held at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weapon {
    /// A plain knife.
    Knife,
    /// A highlander's axe-cane.
    Ciupaga,
    /// A light cavalry sabre.
    Sabre,
    /// A crude hand-gun.
    Samopal,
    /// A wide-bore scattergun.
    Scattergun,
    /// The Milord's blade.
    Karabela,
    /// No weapon at all.
    #[default]
    BareHands,
}

/// Fixed combat and trade numbers for a weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Sides of the damage die.
    pub damage_die: u32,
    /// Flat bonus added to every damage roll.
    pub bonus_damage: i32,
    /// Flat bonus added to every hit roll.
    pub hit_bonus: i32,
    /// Shop price in coins.
    pub price: u32,
}

impl Weapon {
    /// Every weapon, in catalog order.
    pub const ALL: [Weapon; 7] = [
        Self::Knife,
        Self::Ciupaga,
        Self::Sabre,
        Self::Samopal,
        Self::Scattergun,
        Self::Karabela,
        Self::BareHands,
    ];

    /// Weapons a new character (or a buried-object find) can roll on a d4.
    pub const STARTING: [Weapon; 4] = [Self::Knife, Self::Ciupaga, Self::Sabre, Self::Samopal];

    /// Returns the stat block for this weapon.
    pub fn stats(self) -> WeaponStats {
        let (damage_die, bonus_damage, hit_bonus, price) = match self {
            Self::Knife => (4, 0, 0, 6),
            Self::Ciupaga => (6, 0, 0, 9),
            Self::Sabre => (6, 0, 1, 12),
            Self::Samopal => (6, 1, 0, 15),
            Self::Scattergun => (6, 2, 0, 25),
            Self::Karabela => (6, 2, 1, 999),
            Self::BareHands => (4, -1, 0, 0),
        };
        WeaponStats {
            damage_die,
            bonus_damage,
            hit_bonus,
            price,
        }
    }

    /// Picks a starting weapon from a d4 result. Out-of-range rolls clamp.
    pub fn from_starting_roll(roll: u32) -> Self {
        let idx = roll.clamp(1, 4) as usize - 1;
        Self::STARTING[idx]
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Knife => "Knife",
            Self::Ciupaga => "Ciupaga",
            Self::Sabre => "Sabre",
            Self::Samopal => "Samopał",
            Self::Scattergun => "Scattergun",
            Self::Karabela => "Karabela",
            Self::BareHands => "Bare Hands",
        }
    }

    /// Whether this is the empty-handed fallback.
    pub fn is_bare_hands(self) -> bool {
        self == Self::BareHands
    }
}

impl std::fmt::Display for Weapon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::fmt::Display for WeaponStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.damage_die)?;
        if self.bonus_damage != 0 {
            write!(f, "{:+}", self.bonus_damage)?;
        }
        if self.hit_bonus != 0 {
            write!(f, ", {:+} hit", self.hit_bonus)?;
        }
        Ok(())
    }
}
