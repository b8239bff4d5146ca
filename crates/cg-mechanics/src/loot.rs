//! Random finds: buried objects and scrolls.

use cg_core::{Character, Scroll, ScrollKind, Weapon};
use log::debug;

use crate::dice::DiceSource;

/// Roll a random scroll: a d4 picks the kind, then d4 charges.
/// The divination sigil always has a single charge.
pub fn random_scroll(dice: &mut dyn DiceSource) -> Scroll {
    let kind = ScrollKind::from_roll(dice.d4());
    let uses = if kind == ScrollKind::DivinationSigil {
        1
    } else {
        dice.d4()
    };
    Scroll::new(kind, uses)
}

/// Roll on the d6 object table and give the result to the character.
///
/// Returns a short description of the find. Items the character
/// already holds are reported but not duplicated.
pub fn grant_random_object(character: &mut Character, dice: &mut dyn DiceSource) -> String {
    let inv = &mut character.inventory;
    let found = match dice.d6() {
        1 => {
            let weapon = Weapon::from_starting_roll(dice.d4());
            if inv.weapon == weapon {
                format!("{weapon} (already have one)")
            } else {
                inv.weapon = weapon;
                weapon.to_string()
            }
        }
        2 => {
            if inv.add_potion() {
                "Herbal Potion".to_string()
            } else {
                "Herbal Potion (pack is full)".to_string()
            }
        }
        3 => {
            if inv.rope {
                "Rope (already have one)".to_string()
            } else {
                inv.rope = true;
                "Rope".to_string()
            }
        }
        4 => {
            let scroll = random_scroll(dice);
            let name = format!("a {} scroll", scroll.kind);
            inv.add_scroll(scroll);
            name
        }
        5 => {
            if inv.kaftan {
                "Leather Kaftan (already have one)".to_string()
            } else {
                inv.kaftan = true;
                "Leather Kaftan".to_string()
            }
        }
        _ => {
            if inv.cap_charges > 0 {
                "Invisibility Cap (already have one)".to_string()
            } else {
                inv.cap_charges = dice.d4();
                "Invisibility Cap".to_string()
            }
        }
    };
    debug!("found {found}");
    found
}
