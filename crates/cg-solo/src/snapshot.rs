//! Serializable read-only views of a run, for front ends.

use cg_core::{EnemyId, Location, MapStatus, Scroll, Weapon};
use cg_mechanics::{AvailableActions, RollResult};
use serde::{Deserialize, Serialize};

use crate::journal::JournalEntry;
use crate::session::{Run, View};

/// One location on the map and how the character knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapTile {
    /// The location.
    pub location: Location,
    /// Known state.
    pub status: MapStatus,
}

/// The character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    /// Character name.
    pub name: String,
    /// Current HP.
    pub hp: i32,
    /// Maximum HP.
    pub max_hp: i32,
    /// Dutki.
    pub coins: u32,
    /// Points toward a manual advance.
    pub points: u32,
    /// Places visited toward a manual advance.
    pub visited_places: u32,
    /// Held advancement ids.
    pub advancements: Vec<u8>,
    /// Wielded weapon.
    pub weapon: Weapon,
    /// Herbal potions.
    pub potions: u32,
    /// Scrolls in inventory order.
    pub scrolls: Vec<Scroll>,
    /// Rope held.
    pub rope: bool,
    /// Kaftan held.
    pub kaftan: bool,
    /// Invisibility cap charges.
    pub cap_charges: u32,
    /// Heart of the Mountains held.
    pub spirit_heart: bool,
    /// Current location.
    pub location: Location,
    /// Underground.
    pub in_cave: bool,
    /// The map in display order.
    pub map: Vec<MapTile>,
}

/// A scene option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSnapshot {
    /// Button label.
    pub label: String,
    /// Selectable.
    pub enabled: bool,
}

/// What the player is looking at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewSnapshot {
    /// On the map.
    Idle,
    /// A scene waiting for a choice.
    Scene {
        /// Heading.
        title: String,
        /// Body.
        description: String,
        /// Options.
        choices: Vec<ChoiceSnapshot>,
    },
    /// A fight.
    Combat {
        /// Opponent.
        enemy: EnemyId,
        /// Opponent HP.
        enemy_hp: i32,
        /// Opponent starting HP.
        enemy_max_hp: i32,
        /// Folklore about the opponent.
        lore: String,
        /// Current turn.
        turn: u32,
        /// Last turn's narrative.
        message: String,
        /// Modifier added to the hit roll.
        hit_modifier: i32,
        /// Legal actions.
        actions: AvailableActions,
    },
    /// Dead.
    Dead,
    /// Won.
    Won,
}

/// Everything a front end needs to draw the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    /// Dice seed, when seeded.
    pub seed: Option<u64>,
    /// Character sheet.
    pub character: CharacterSnapshot,
    /// Current view.
    pub view: ViewSnapshot,
    /// Journal, newest first.
    pub log: Vec<JournalEntry>,
    /// Recent rolls, newest first.
    pub rolls: Vec<RollResult>,
}

impl RunSnapshot {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Run {
    /// Capture the current state.
    pub fn snapshot(&self) -> RunSnapshot {
        let c = &self.character;
        let inv = &c.inventory;
        let character = CharacterSnapshot {
            name: c.name.clone(),
            hp: c.hp(),
            max_hp: c.max_hp(),
            coins: c.coins,
            points: c.points,
            visited_places: c.visited_places,
            advancements: c.advancements().iter().map(|a| a.id()).collect(),
            weapon: inv.weapon,
            potions: inv.potions(),
            scrolls: inv.scrolls().to_vec(),
            rope: inv.rope,
            kaftan: inv.kaftan,
            cap_charges: inv.cap_charges,
            spirit_heart: inv.spirit_heart,
            location: c.current_location,
            in_cave: c.in_cave,
            map: Location::MAP
                .iter()
                .map(|&location| MapTile {
                    location,
                    status: c.map_status(location),
                })
                .collect(),
        };
        let view = match &self.view {
            View::Idle => ViewSnapshot::Idle,
            View::Scene(scene) => ViewSnapshot::Scene {
                title: scene.title.clone(),
                description: scene.description.clone(),
                choices: scene
                    .choices
                    .iter()
                    .map(|choice| ChoiceSnapshot {
                        label: choice.label.clone(),
                        enabled: choice.enabled,
                    })
                    .collect(),
            },
            View::Combat(combat) => ViewSnapshot::Combat {
                enemy: combat.enemy(),
                enemy_hp: combat.foe.hp,
                enemy_max_hp: combat.foe.stats.max_hp,
                lore: combat.enemy().lore().to_string(),
                turn: combat.turn,
                message: combat.message.clone(),
                hit_modifier: combat.hit_modifier(c),
                actions: combat.available(c),
            },
            View::Dead => ViewSnapshot::Dead,
            View::Won => ViewSnapshot::Won,
        };
        RunSnapshot {
            seed: self.seed(),
            character,
            view,
            log: self.journal.entries().cloned().collect(),
            rolls: self.dice.recent().cloned().collect(),
        }
    }
}
