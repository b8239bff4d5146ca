use comfy_table::{ContentArrangement, Table};

use cg_core::{Advancement, EnemyId, LOCATION_TABLE, ScrollKind, Weapon};

const KINDS: [&str; 5] = ["weapons", "enemies", "scrolls", "advancements", "locations"];

pub fn run(kind: Option<&str>) -> Result<(), String> {
    let kinds: Vec<&str> = match kind {
        None => KINDS.to_vec(),
        Some(k) => {
            let k = k.to_lowercase();
            let found = KINDS
                .iter()
                .find(|name| name.starts_with(k.as_str()))
                .ok_or_else(|| {
                    format!("unknown catalog '{k}' (expected one of: {})", KINDS.join(", "))
                })?;
            vec![*found]
        }
    };

    for (i, kind) in kinds.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let table = match *kind {
            "weapons" => weapons(),
            "enemies" => enemies(),
            "scrolls" => scrolls(),
            "advancements" => advancements(),
            _ => locations(),
        };
        println!("{table}");
    }
    Ok(())
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

fn weapons() -> Table {
    let mut t = table(vec!["Weapon", "Damage", "Price"]);
    for weapon in Weapon::ALL {
        let stats = weapon.stats();
        let price = if weapon.is_bare_hands() {
            "—".to_string()
        } else {
            stats.price.to_string()
        };
        t.add_row(vec![weapon.name().to_string(), stats.to_string(), price]);
    }
    t
}

fn enemies() -> Table {
    let mut t = table(vec!["Enemy", "Tier", "Hit on", "Damage", "HP", "Points"]);
    for id in EnemyId::ALL {
        let s = id.stats();
        let damage = if s.damage_bonus == 0 {
            format!("d{}", s.damage_die)
        } else {
            format!("d{}{:+}", s.damage_die, s.damage_bonus)
        };
        t.add_row(vec![
            id.name().to_string(),
            s.category.to_string(),
            format!("{}+", s.hit_threshold),
            damage,
            s.max_hp.to_string(),
            s.reward().to_string(),
        ]);
    }
    t
}

fn scrolls() -> Table {
    let mut t = table(vec!["Scroll", "In combat", "Effect"]);
    for kind in ScrollKind::ALL {
        let combat = if kind.usable_in_combat() { "yes" } else { "no" };
        t.add_row(vec![kind.name(), combat, kind.description()]);
    }
    t
}

fn advancements() -> Table {
    let mut t = table(vec!["#", "Advancement"]);
    for adv in Advancement::ALL {
        t.add_row(vec![adv.id().to_string(), adv.description().to_string()]);
    }
    t
}

fn locations() -> Table {
    let mut t = table(vec!["2d6", "Location", "Lore"]);
    for (id, location) in (1u8..).zip(LOCATION_TABLE) {
        t.add_row(vec![
            id.to_string(),
            location.name().to_string(),
            location.lore().to_string(),
        ]);
    }
    t
}
