//! The advancement table.
//!
//! Six permanent upgrades, rolled on a d6. Each id can be held once.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Number of distinct advancements. Holding all of them wins the run.
pub const ADVANCEMENT_COUNT: usize = 6;

/// A permanent one-time upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Advancement {
    /// 1: the Harnaś title. No mechanical effect.
    HarnasTitle,
    /// 2: +1 to every hit roll.
    SteadyHand,
    /// 3: max hp becomes 20, healed to full.
    Vigor,
    /// 4: +5 points.
    Renown,
    /// 5: a scattergun replaces the current weapon.
    Gunsmith,
    /// 6: damage from one scanty and one hardy enemy is halved.
    Resilience,
}

impl Advancement {
    /// All advancements in id order.
    pub const ALL: [Advancement; ADVANCEMENT_COUNT] = [
        Self::HarnasTitle,
        Self::SteadyHand,
        Self::Vigor,
        Self::Renown,
        Self::Gunsmith,
        Self::Resilience,
    ];

    /// The 1-based id used by the d6 advancement roll.
    pub fn id(self) -> u8 {
        match self {
            Self::HarnasTitle => 1,
            Self::SteadyHand => 2,
            Self::Vigor => 3,
            Self::Renown => 4,
            Self::Gunsmith => 5,
            Self::Resilience => 6,
        }
    }

    /// Look up an advancement by its 1-based id.
    pub fn from_id(id: u8) -> CoreResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.id() == id)
            .ok_or(CoreError::UnknownAdvancement(id))
    }

    /// Short description of the permanent effect.
    pub fn description(self) -> &'static str {
        match self {
            Self::HarnasTitle => "You earn the title of Harnaś.",
            Self::SteadyHand => "+1 to hit.",
            Self::Vigor => "Maximum HP becomes 20; you heal to full.",
            Self::Renown => "+5 points.",
            Self::Gunsmith => "You gain a Scattergun.",
            Self::Resilience => "Damage from one scanty and one hardy enemy is halved.",
        }
    }
}

impl TryFrom<u8> for Advancement {
    type Error = CoreError;

    fn try_from(id: u8) -> CoreResult<Self> {
        Self::from_id(id)
    }
}

impl std::fmt::Display for Advancement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id(), self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for adv in Advancement::ALL {
            assert_eq!(Advancement::from_id(adv.id()), Ok(adv));
        }
    }

    #[test]
    fn unknown_id_rejected() {
        assert_eq!(
            Advancement::try_from(7),
            Err(CoreError::UnknownAdvancement(7))
        );
        assert!(Advancement::from_id(0).is_err());
    }
}
