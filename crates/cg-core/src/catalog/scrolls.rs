//! The scroll table.

use serde::{Deserialize, Serialize};

/// The four kinds of scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScrollKind {
    /// Summons a bies that bites the enemy each turn.
    BiesSummoning,
    /// A one-shot burst of fire.
    FireGlyph,
    /// Softens incoming blows for a few turns.
    ProtectionWard,
    /// Reveals a path to any location. Useless in a fight.
    DivinationSigil,
}

impl ScrollKind {
    /// All scroll kinds, indexed by `d4 - 1`.
    pub const ALL: [ScrollKind; 4] = [
        Self::BiesSummoning,
        Self::FireGlyph,
        Self::ProtectionWard,
        Self::DivinationSigil,
    ];

    /// Picks a scroll kind from a d4 result. Out-of-range rolls clamp.
    pub fn from_roll(roll: u32) -> Self {
        Self::ALL[roll.clamp(1, 4) as usize - 1]
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::BiesSummoning => "Bies Summoning",
            Self::FireGlyph => "Fire Glyph",
            Self::ProtectionWard => "Protection Ward",
            Self::DivinationSigil => "Divination Sigil",
        }
    }

    /// What the scroll does, for the catalog listing.
    pub fn description(self) -> &'static str {
        match self {
            Self::BiesSummoning => "A bies fights beside you for d4 turns, dealing d4 each turn.",
            Self::FireGlyph => "Deals d6+1 damage whether or not you hit.",
            Self::ProtectionWard => "For d4 turns, reduce each enemy hit by d4.",
            Self::DivinationSigil => "Outside the cave, travel to a location of your choice.",
        }
    }

    /// Whether the scroll can be read during a fight.
    pub fn usable_in_combat(self) -> bool {
        self != Self::DivinationSigil
    }
}

impl std::fmt::Display for ScrollKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A scroll in the inventory with its remaining charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scroll {
    /// What the scroll does.
    pub kind: ScrollKind,
    /// Charges left. Scrolls at zero are dropped from the inventory.
    pub uses: u32,
}

impl Scroll {
    /// Create a scroll with the given number of charges.
    pub fn new(kind: ScrollKind, uses: u32) -> Self {
        Self { kind, uses }
    }
}

impl std::fmt::Display for Scroll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.kind, self.uses)
    }
}
