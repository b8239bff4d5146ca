//! The wandering merchant and the village market.

use cg_core::{Character, MAX_POTIONS, Weapon};
use cg_mechanics::random_scroll;

use crate::error::{Refusal, RunResult};
use crate::scene::Scene;
use crate::session::Run;
use crate::step::{Continuation, Step};

/// Price of a herbal potion.
pub const POTION_PRICE: u32 = 4;
/// Price of a rope.
pub const ROPE_PRICE: u32 = 5;
/// Price of a leather kaftan.
pub const KAFTAN_PRICE: u32 = 10;
/// Price of a random scroll (merchant only).
pub const SCROLL_PRICE: u32 = 7;
/// What the invisibility cap fetches, whatever its charges.
pub const CAP_PRICE: u32 = 15;

/// Which counter is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopKind {
    /// Met during an encounter; also sells scrolls.
    Merchant,
    /// The village market.
    Village,
}

/// An open shop and what to do once it closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopVisit {
    /// Which counter.
    pub kind: ShopKind,
    /// Work resumed after leaving, in order.
    pub then: Vec<Continuation>,
}

impl ShopVisit {
    /// A merchant met on the road.
    pub fn merchant(then: Vec<Continuation>) -> Self {
        Self {
            kind: ShopKind::Merchant,
            then,
        }
    }

    /// The village market.
    pub fn village() -> Self {
        Self {
            kind: ShopKind::Village,
            then: Vec::new(),
        }
    }
}

/// Something for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ware {
    /// Herbal potion.
    Potion,
    /// Knife.
    Knife,
    /// Ciupaga.
    Ciupaga,
    /// Rope.
    Rope,
    /// Sabre.
    Sabre,
    /// Samopał.
    Samopal,
    /// Scattergun.
    Scattergun,
    /// Leather kaftan.
    Kaftan,
    /// A random scroll.
    Scroll,
}

impl Ware {
    /// Counter order.
    pub const ALL: [Ware; 9] = [
        Self::Potion,
        Self::Knife,
        Self::Ciupaga,
        Self::Rope,
        Self::Sabre,
        Self::Samopal,
        Self::Scattergun,
        Self::Kaftan,
        Self::Scroll,
    ];

    /// The weapon this ware is, if any.
    pub fn weapon(self) -> Option<Weapon> {
        match self {
            Self::Knife => Some(Weapon::Knife),
            Self::Ciupaga => Some(Weapon::Ciupaga),
            Self::Sabre => Some(Weapon::Sabre),
            Self::Samopal => Some(Weapon::Samopal),
            Self::Scattergun => Some(Weapon::Scattergun),
            Self::Potion | Self::Rope | Self::Kaftan | Self::Scroll => None,
        }
    }

    /// Price in dutki.
    pub fn price(self) -> u32 {
        match self {
            Self::Potion => POTION_PRICE,
            Self::Rope => ROPE_PRICE,
            Self::Kaftan => KAFTAN_PRICE,
            Self::Scroll => SCROLL_PRICE,
            Self::Knife | Self::Ciupaga | Self::Sabre | Self::Samopal | Self::Scattergun => {
                self.weapon().map_or(0, |w| w.stats().price)
            }
        }
    }

    /// Whether the given counter sells this ware.
    pub fn stocked_by(self, kind: ShopKind) -> bool {
        self != Self::Scroll || kind == ShopKind::Merchant
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Potion => "Herbal Potion",
            Self::Rope => "Rope",
            Self::Kaftan => "Leather Kaftan",
            Self::Scroll => "Random Scroll",
            Self::Knife | Self::Ciupaga | Self::Sabre | Self::Samopal | Self::Scattergun => {
                self.weapon().map_or("", Weapon::name)
            }
        }
    }
}

impl std::fmt::Display for Ware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Something the character can sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleItem {
    /// One herbal potion.
    Potion,
    /// The wielded weapon.
    Weapon,
    /// The rope.
    Rope,
    /// The kaftan.
    Kaftan,
    /// The invisibility cap, all charges.
    Cap,
    /// The scroll at this inventory index.
    Scroll(usize),
}

/// What the character could sell right now, with labels and prices.
pub fn sellable(character: &Character) -> Vec<(SaleItem, String, u32)> {
    let inv = &character.inventory;
    let mut out = Vec::new();
    if inv.potions() > 0 {
        out.push((SaleItem::Potion, "Herbal Potion".to_string(), POTION_PRICE));
    }
    if !inv.weapon.is_bare_hands() {
        out.push((SaleItem::Weapon, inv.weapon.to_string(), inv.weapon.stats().price));
    }
    if inv.rope {
        out.push((SaleItem::Rope, "Rope".to_string(), ROPE_PRICE));
    }
    if inv.kaftan {
        out.push((SaleItem::Kaftan, "Leather Kaftan".to_string(), KAFTAN_PRICE));
    }
    if inv.cap_charges > 0 {
        out.push((SaleItem::Cap, "Invisibility Cap".to_string(), CAP_PRICE));
    }
    for (index, scroll) in inv.scrolls().iter().enumerate() {
        out.push((SaleItem::Scroll(index), scroll.to_string(), SCROLL_PRICE));
    }
    out
}

/// Check a purchase; returns the price when allowed.
pub fn check_purchase(character: &Character, ware: Ware, kind: ShopKind) -> Result<u32, Refusal> {
    if !ware.stocked_by(kind) {
        return Err(Refusal::NotStocked(ware));
    }
    let inv = &character.inventory;
    match ware {
        Ware::Potion if inv.potions() >= MAX_POTIONS => return Err(Refusal::PouchFull),
        Ware::Rope if inv.rope => return Err(Refusal::AlreadyOwned("a rope")),
        Ware::Kaftan if inv.kaftan => return Err(Refusal::AlreadyOwned("a leather kaftan")),
        _ => {}
    }
    let price = ware.price();
    if character.coins < price {
        return Err(Refusal::NotEnoughCoins {
            need: price,
            have: character.coins,
        });
    }
    Ok(price)
}

impl Run {
    /// Buy from the open shop.
    pub fn buy(&mut self, ware: Ware) -> RunResult<()> {
        let visit = self.open_visit()?;
        self.buy_at(ware, visit)
    }

    /// Sell to the open shop.
    pub fn sell(&mut self, item: SaleItem) -> RunResult<()> {
        let visit = self.open_visit()?;
        self.sell_at(item, visit)
    }

    fn open_visit(&self) -> RunResult<ShopVisit> {
        self.current_scene()?
            .shop
            .clone()
            .ok_or_else(|| Refusal::NotInShop.into())
    }

    pub(crate) fn buy_at(&mut self, ware: Ware, visit: ShopVisit) -> RunResult<()> {
        let price = check_purchase(&self.character, ware, visit.kind)?;
        self.character.coins -= price;
        match ware {
            Ware::Potion => {
                self.character.inventory.add_potion();
            }
            Ware::Rope => self.character.inventory.rope = true,
            Ware::Kaftan => self.character.inventory.kaftan = true,
            Ware::Scroll => {
                let scroll = random_scroll(&mut self.dice);
                self.character.inventory.add_scroll(scroll);
            }
            Ware::Knife | Ware::Ciupaga | Ware::Sabre | Ware::Samopal | Ware::Scattergun => {
                if let Some(weapon) = ware.weapon() {
                    self.character.inventory.weapon = weapon;
                }
            }
        }
        self.log(format!("Bought {ware} for {price} dutki."));
        self.open_shop(visit);
        Ok(())
    }

    pub(crate) fn sell_at(&mut self, item: SaleItem, visit: ShopVisit) -> RunResult<()> {
        let (_, label, price) = sellable(&self.character)
            .into_iter()
            .find(|(candidate, _, _)| *candidate == item)
            .ok_or(Refusal::NothingToSell)?;
        let inv = &mut self.character.inventory;
        match item {
            SaleItem::Potion => {
                inv.take_potion();
            }
            SaleItem::Weapon => {
                if inv.weapon == Weapon::Karabela {
                    inv.karabela = false;
                }
                inv.weapon = Weapon::BareHands;
            }
            SaleItem::Rope => inv.rope = false,
            SaleItem::Kaftan => inv.kaftan = false,
            SaleItem::Cap => inv.cap_charges = 0,
            SaleItem::Scroll(index) => {
                inv.remove_scroll(index);
            }
        }
        self.character.coins += price;
        self.log(format!("Sold {label} for {price} dutki."));
        self.open_shop(visit);
        Ok(())
    }

    pub(crate) fn open_shop(&mut self, visit: ShopVisit) {
        let title = match visit.kind {
            ShopKind::Merchant => "A Wandering Merchant",
            ShopKind::Village => "Village Market",
        };
        let mut scene = Scene::new(title, format!("You have {} dutki.", self.character.coins));
        for ware in Ware::ALL {
            if !ware.stocked_by(visit.kind) {
                continue;
            }
            let enabled = check_purchase(&self.character, ware, visit.kind).is_ok();
            scene = scene.choice_enabled(
                format!("Buy {ware} ({} dutki)", ware.price()),
                Step::Buy {
                    ware,
                    visit: visit.clone(),
                },
                enabled,
            );
        }
        for (item, label, price) in sellable(&self.character) {
            scene = scene.choice(
                format!("Sell {label} ({price} dutki)"),
                Step::Sell {
                    item,
                    visit: visit.clone(),
                },
            );
        }
        scene = scene
            .choice("Leave Shop", Step::LeaveShop(visit.clone()))
            .with_shop(visit);
        self.show(scene);
    }

    pub(crate) fn leave_shop(&mut self, visit: ShopVisit) {
        self.pending.extend(visit.then.into_iter().rev());
        self.finish();
    }
}
