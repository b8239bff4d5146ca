//! Map locations and the 2d6 location table.

use serde::{Deserialize, Serialize};

/// A place on the mountain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    /// The summit, guarded by the Spirit.
    PeakBlack,
    /// The Milord's decaying manor.
    MilordsManor,
    /// A cliff with a risk of falling.
    Cliff,
    /// Crags with a risk of falling.
    Crags,
    /// A burrow leading down to the cave.
    Burrow,
    /// Deep woods.
    DeepWoods,
    /// A meadow. Fleeing here costs nothing.
    Meadow,
    /// The mountain pass where every run begins.
    MountainPass,
    /// The shepherd's hut, a place to rest.
    ShepherdsHut,
    /// The village: trade and rest.
    MountainVillage,
    /// The cave below the burrow. Never rolled directly.
    Cave,
}

/// The location table indexed by `clamped_roll - 1`.
pub const LOCATION_TABLE: [Location; 12] = [
    Location::PeakBlack,
    Location::MilordsManor,
    Location::Cliff,
    Location::Crags,
    Location::Burrow,
    Location::DeepWoods,
    Location::DeepWoods,
    Location::Meadow,
    Location::Meadow,
    Location::MountainPass,
    Location::ShepherdsHut,
    Location::MountainVillage,
];

/// Clamp a raw location roll (2d6 plus modifiers) into `1..=12`.
pub fn clamp_location_roll(raw: i32) -> u8 {
    // The clamp bounds the value to 1..=12, so the cast is lossless.
    raw.clamp(1, 12) as u8
}

impl Location {
    /// The order tiles appear on the map.
    pub const MAP: [Location; 11] = [
        Self::MountainPass,
        Self::DeepWoods,
        Self::Meadow,
        Self::Cliff,
        Self::Crags,
        Self::Burrow,
        Self::Cave,
        Self::MilordsManor,
        Self::ShepherdsHut,
        Self::MountainVillage,
        Self::PeakBlack,
    ];

    /// Surface locations that must all be visited for a peaceful ascension.
    pub const ASCENSION_REQUIREMENTS: [Location; 9] = [
        Self::Cliff,
        Self::Crags,
        Self::Burrow,
        Self::DeepWoods,
        Self::Meadow,
        Self::MountainPass,
        Self::ShepherdsHut,
        Self::MountainVillage,
        Self::MilordsManor,
    ];

    /// Look up a location from a (possibly unclamped) table roll.
    pub fn from_roll(raw: i32) -> Self {
        LOCATION_TABLE[usize::from(clamp_location_roll(raw)) - 1]
    }

    /// The lowest table id that leads here, if the location is on the table.
    pub fn table_id(self) -> Option<u8> {
        LOCATION_TABLE
            .iter()
            .position(|&l| l == self)
            .and_then(|i| u8::try_from(i + 1).ok())
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::PeakBlack => "Peak Black",
            Self::MilordsManor => "Milord's Manor",
            Self::Cliff => "A Cliff",
            Self::Crags => "Crags",
            Self::Burrow => "A Burrow",
            Self::DeepWoods => "Deep Woods",
            Self::Meadow => "A Meadow",
            Self::MountainPass => "Mountain Pass",
            Self::ShepherdsHut => "Bacówka (Shepherd's Hut)",
            Self::MountainVillage => "Mountain Village",
            Self::Cave => "Cave",
        }
    }

    /// Folklore appended to scene descriptions.
    pub fn lore(self) -> &'static str {
        match self {
            Self::PeakBlack => {
                "Known as Corny Groń, this summit marks the border between the living and the mountain spirits."
            }
            Self::MilordsManor => "A decaying court of a cursed noble, where the clocks count only debts.",
            Self::Cliff => "A black scar in the ridge where storms are born and ravens circle.",
            Self::Crags => "Jagged teeth of the mountains that punish the vain and test the sure-footed.",
            Self::Burrow => "A hungry hollow in the earth that opens for those who owe the underworld.",
            Self::DeepWoods => "The firs whisper here, and the wind carries warnings of lost woodcutters.",
            Self::Meadow => "Shepherds tell of midnight dances where the grass lies flat by morning.",
            Self::MountainPass => "Smugglers carved these switchbacks; travelers still leave coins at the cairns.",
            Self::ShepherdsHut => "A warm lamp in the high pasture, kept by a bacza with a long memory.",
            Self::MountainVillage => "A stubborn settlement bound by old rites and hearth smoke.",
            Self::Cave => "Cold breath seeps from this throat of stone.",
        }
    }

    /// Cliff and Crags end with a fall-risk check.
    pub fn has_fall_risk(self) -> bool {
        matches!(self, Self::Cliff | Self::Crags)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_names_are_stable() {
        assert_eq!(serde_json::to_string(&Location::DeepWoods).unwrap(), "\"DeepWoods\"");
        assert_eq!(serde_json::to_string(&Location::MilordsManor).unwrap(), "\"MilordsManor\"");
        let back: Location = serde_json::from_str("\"PeakBlack\"").unwrap();
        assert_eq!(back, Location::PeakBlack);
    }

    #[test]
    fn table_mapping() {
        assert_eq!(Location::from_roll(1), Location::PeakBlack);
        assert_eq!(Location::from_roll(2), Location::MilordsManor);
        assert_eq!(Location::from_roll(7), Location::DeepWoods);
        assert_eq!(Location::from_roll(9), Location::Meadow);
        assert_eq!(Location::from_roll(12), Location::MountainVillage);
    }

    #[test]
    fn rolls_clamp_into_table() {
        assert_eq!(clamp_location_roll(13 - 1), 12);
        assert_eq!(clamp_location_roll(1 - 2), 1);
        assert_eq!(Location::from_roll(14), Location::MountainVillage);
        assert_eq!(Location::from_roll(-3), Location::PeakBlack);
    }

    #[test]
    fn cave_is_not_on_the_table() {
        assert_eq!(Location::Cave.table_id(), None);
        assert_eq!(Location::Meadow.table_id(), Some(8));
    }

    #[test]
    fn map_has_every_location_once() {
        let mut seen = std::collections::BTreeSet::new();
        for loc in Location::MAP {
            assert!(seen.insert(loc));
        }
        assert_eq!(seen.len(), 11);
    }

    #[test]
    fn fall_risk_locations() {
        assert!(Location::Cliff.has_fall_risk());
        assert!(Location::Crags.has_fall_risk());
        assert!(!Location::Meadow.has_fall_risk());
    }
}
