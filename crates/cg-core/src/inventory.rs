//! Carried equipment and consumables.

use serde::{Deserialize, Serialize};

use crate::catalog::{Scroll, ScrollKind, Weapon};

/// Most potions a character can carry.
pub const MAX_POTIONS: u32 = 10;

/// Everything the character carries.
///
/// Potions and scrolls sit behind methods so the potion cap and the
/// "no empty scrolls" rule cannot be broken from outside.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Inventory {
    /// The wielded weapon.
    pub weapon: Weapon,
    potions: u32,
    scrolls: Vec<Scroll>,
    /// Adds +1 to rope-assisted rolls (snares, falls).
    pub rope: bool,
    /// Leather armor: absorbs d4 of every enemy hit.
    pub kaftan: bool,
    /// Invisibility cap charges.
    pub cap_charges: u32,
    /// The mountain spirit's heart: +1 to hit against the Spirit.
    pub spirit_heart: bool,
    /// The Milord's blade has been claimed.
    pub karabela: bool,
}

impl Inventory {
    /// Create an inventory holding only the given weapon.
    pub fn with_weapon(weapon: Weapon) -> Self {
        Self {
            weapon,
            ..Self::default()
        }
    }

    /// Current potion count.
    pub fn potions(&self) -> u32 {
        self.potions
    }

    /// Add one potion. Returns `false` when already at the cap.
    pub fn add_potion(&mut self) -> bool {
        if self.potions >= MAX_POTIONS {
            return false;
        }
        self.potions += 1;
        true
    }

    /// Remove one potion. Returns `false` when there was none.
    pub fn take_potion(&mut self) -> bool {
        if self.potions == 0 {
            return false;
        }
        self.potions -= 1;
        true
    }

    /// Drop every potion.
    pub fn clear_potions(&mut self) {
        self.potions = 0;
    }

    /// Carried scrolls, in pickup order.
    pub fn scrolls(&self) -> &[Scroll] {
        &self.scrolls
    }

    /// Add a scroll. Scrolls with no charges are ignored.
    pub fn add_scroll(&mut self, scroll: Scroll) {
        if scroll.uses > 0 {
            self.scrolls.push(scroll);
        }
    }

    /// Spend one charge of the scroll at `index`.
    ///
    /// Returns the scroll kind, or `None` for an out-of-range index. The
    /// scroll is removed once its charges run out.
    pub fn spend_scroll(&mut self, index: usize) -> Option<ScrollKind> {
        let scroll = self.scrolls.get_mut(index)?;
        let kind = scroll.kind;
        scroll.uses = scroll.uses.saturating_sub(1);
        self.scrolls.retain(|s| s.uses > 0);
        Some(kind)
    }

    /// Remove the whole scroll at `index`.
    pub fn remove_scroll(&mut self, index: usize) -> Option<Scroll> {
        if index < self.scrolls.len() {
            Some(self.scrolls.remove(index))
        } else {
            None
        }
    }

    /// Drop every scroll.
    pub fn clear_scrolls(&mut self) {
        self.scrolls.clear();
    }

    /// Index of the first scroll of the given kind.
    pub fn find_scroll(&self, kind: ScrollKind) -> Option<usize> {
        self.scrolls.iter().position(|s| s.kind == kind)
    }

    /// Whether the character wields anything better than bare hands.
    pub fn is_armed(&self) -> bool {
        !self.weapon.is_bare_hands()
    }

    /// Items that a thief or a beast could take.
    pub fn loseable(&self) -> Vec<Loseable> {
        let mut items = Vec::new();
        if self.is_armed() {
            items.push(Loseable::Weapon(self.weapon));
        }
        if self.potions > 0 {
            items.push(Loseable::Potion);
        }
        if self.rope {
            items.push(Loseable::Rope);
        }
        if self.kaftan {
            items.push(Loseable::Kaftan);
        }
        if self.cap_charges > 0 {
            items.push(Loseable::Cap);
        }
        for (index, scroll) in self.scrolls.iter().enumerate() {
            items.push(Loseable::Scroll {
                index,
                kind: scroll.kind,
            });
        }
        items
    }

    /// Remove a loseable item. Returns `false` if it was no longer held.
    pub fn lose(&mut self, item: Loseable) -> bool {
        match item {
            Loseable::Weapon(w) => {
                if self.weapon != w || !self.is_armed() {
                    return false;
                }
                self.weapon = Weapon::BareHands;
                true
            }
            Loseable::Potion => self.take_potion(),
            Loseable::Rope => std::mem::replace(&mut self.rope, false),
            Loseable::Kaftan => std::mem::replace(&mut self.kaftan, false),
            Loseable::Cap => std::mem::take(&mut self.cap_charges) > 0,
            Loseable::Scroll { index, kind } => {
                if self.scrolls.get(index).map(|s| s.kind) != Some(kind) {
                    return false;
                }
                self.remove_scroll(index).is_some()
            }
        }
    }
}

/// A single item that can be taken away from the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Loseable {
    /// The wielded weapon (never bare hands).
    Weapon(Weapon),
    /// One potion.
    Potion,
    /// The rope.
    Rope,
    /// The kaftan.
    Kaftan,
    /// The invisibility cap with all its charges.
    Cap,
    /// The scroll at a position in the scroll list.
    Scroll {
        /// Position in the scroll list.
        index: usize,
        /// Kind, checked again before removal.
        kind: ScrollKind,
    },
}

impl std::fmt::Display for Loseable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weapon(w) => write!(f, "Weapon: {w}"),
            Self::Potion => write!(f, "Herbal Potion"),
            Self::Rope => write!(f, "Rope"),
            Self::Kaftan => write!(f, "Leather Kaftan"),
            Self::Cap => write!(f, "Invisibility Cap"),
            Self::Scroll { kind, .. } => write!(f, "Scroll: {kind}"),
        }
    }
}
