use std::io::{self, BufRead, Write};
use std::time::Duration;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use log::debug;

use cg_core::MapStatus;
use cg_mechanics::CombatAction;
use cg_solo::{JournalEntry, Run, RunConfig, RunError, RunSnapshot, SharedRun, ViewSnapshot};

const HELP: &str = "\
  <number>      pick a choice (or type its label)
  travel        roll for the next location (or go deeper in the cave)
  attack        strike the enemy
  potion        drink a herbal potion
  scroll <n>    read scroll number n in combat
  flee          run from the fight
  vanish        slip away under the invisibility cap
  advance       trade 15 points and 12 places for an advancement
  ducat         buy an advancement for 40 dutki
  divine        read a divination sigil
  look          show the current scene again
  status        character sheet
  map           known locations
  log           recent journal entries
  rolls         recent dice rolls
  journal       the whole journal as Markdown
  json          the run state as JSON
  quit          leave the mountain";

/// What a command asks the loop to do next.
enum Reply {
    /// The run changed: print new journal entries and the view.
    Acted,
    /// Print the view again.
    Look,
    /// Print some text.
    Text(String),
    Quit,
}

pub fn run(name: &str, seed: Option<u64>, pacing_ms: u64, log_limit: usize) -> Result<(), String> {
    let mut config = RunConfig::default()
        .with_pacing(Duration::from_millis(pacing_ms))
        .with_log_limit(log_limit);
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let game = SharedRun::new(Run::start(name, config));

    println!("  {} Corny Groń", "Starting".bold());
    if let Some(seed) = game.inspect(Run::seed).map_err(fail)? {
        println!("  Seed: {seed}");
    }
    println!("  Type 'help' for commands, 'quit' to exit.\n");

    let mut seen = print_journal(&game, 0)?;
    print_view(&game)?;

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match dispatch(&game, input) {
            Ok(Reply::Acted) => {
                seen = print_journal(&game, seen)?;
                if print_view(&game)? {
                    break;
                }
            }
            Ok(Reply::Look) => {
                print_view(&game)?;
            }
            Ok(Reply::Text(text)) => println!("{text}\n"),
            Ok(Reply::Quit) => break,
            Err(e) => println!("{}\n", e.yellow()),
        }
    }

    Ok(())
}

fn fail(e: RunError) -> String {
    e.to_string()
}

fn act(
    game: &SharedRun,
    action: impl FnOnce(&mut Run) -> Result<(), RunError>,
) -> Result<Reply, String> {
    game.try_submit(action).map_err(fail)?;
    Ok(Reply::Acted)
}

fn dispatch(game: &SharedRun, input: &str) -> Result<Reply, String> {
    debug!("command '{input}'");
    let mut words = input.split_whitespace();
    let command = words.next().unwrap_or_default().to_lowercase();

    match command.as_str() {
        "quit" | "q" | "exit" => Ok(Reply::Quit),
        "help" | "h" | "?" => Ok(Reply::Text(HELP.to_string())),
        "look" => Ok(Reply::Look),
        "status" | "s" => Ok(Reply::Text(status(&game.snapshot().map_err(fail)?))),
        "map" | "m" => Ok(Reply::Text(map(&game.snapshot().map_err(fail)?))),
        "log" | "l" => Ok(Reply::Text(recent(&game.snapshot().map_err(fail)?))),
        "rolls" => Ok(Reply::Text(rolls(&game.snapshot().map_err(fail)?))),
        "journal" => game
            .inspect(|run| run.journal().export_markdown())
            .map(Reply::Text)
            .map_err(fail),
        "json" => {
            let snapshot = game.snapshot().map_err(fail)?;
            snapshot.to_json().map(Reply::Text).map_err(|e| e.to_string())
        }
        "travel" | "t" => act(game, Run::travel),
        "attack" | "a" => act(game, |run| run.attack().map(|_| ())),
        "potion" | "p" => act(game, |run| {
            if run.combat().is_some() {
                run.combat_action(CombatAction::DrinkPotion).map(|_| ())
            } else {
                run.drink_potion().map(|_| ())
            }
        }),
        "scroll" => {
            let number: usize = words
                .next()
                .ok_or("usage: scroll <n>")?
                .parse()
                .map_err(|_| "usage: scroll <n>".to_string())?;
            if number == 0 {
                return Err("scrolls are numbered from 1".into());
            }
            act(game, |run| run.use_scroll(number - 1).map(|_| ()))
        }
        "flee" | "f" => act(game, |run| run.flee().map(|_| ())),
        "vanish" | "cap" => act(game, |run| run.vanish().map(|_| ())),
        "advance" => act(game, Run::advance),
        "ducat" => act(game, Run::buy_ducat),
        "divine" => act(game, Run::divine),
        _ => {
            let result = match input.parse::<usize>() {
                Ok(0) => return Err("choices are numbered from 1".into()),
                Ok(number) => game.try_submit(|run| run.choose(number - 1)),
                Err(_) => game.try_submit(|run| run.choose_label(input)),
            };
            match result {
                Ok(()) => Ok(Reply::Acted),
                Err(RunError::NoActiveScene) => {
                    Err(format!("unknown command '{input}' (type 'help')"))
                }
                Err(e) => Err(e.to_string()),
            }
        }
    }
}

/// Print journal entries newer than `since`; returns the newest sequence number.
fn print_journal(game: &SharedRun, since: u64) -> Result<u64, String> {
    let (lines, last) = game
        .inspect(|run| {
            let journal = run.journal();
            let lines: Vec<String> = journal
                .since(since)
                .into_iter()
                .map(JournalEntry::text)
                .collect();
            (lines, journal.last_seq())
        })
        .map_err(fail)?;
    for line in lines {
        println!("  {}", line.italic());
    }
    Ok(last.max(since))
}

/// Print the current view. Returns true once the run is over.
fn print_view(game: &SharedRun) -> Result<bool, String> {
    let snapshot = game.snapshot().map_err(fail)?;
    let c = &snapshot.character;
    match &snapshot.view {
        ViewSnapshot::Idle => {
            let place = if c.in_cave {
                "deep in the Cave".to_string()
            } else {
                format!("at {}", c.location)
            };
            println!(
                "\n  You stand {place}. {}/{} HP, {} dutki. Type 'travel' to move on.\n",
                c.hp, c.max_hp, c.coins
            );
            Ok(false)
        }
        ViewSnapshot::Scene {
            title,
            description,
            choices,
        } => {
            println!("\n  {}", title.bold().cyan());
            for line in description.lines() {
                println!("  {line}");
            }
            for (i, choice) in choices.iter().enumerate() {
                if choice.enabled {
                    println!("    {}. {}", i + 1, choice.label);
                } else {
                    let label = format!("{}. {} (unavailable)", i + 1, choice.label);
                    println!("    {}", label.dimmed());
                }
            }
            println!();
            Ok(false)
        }
        ViewSnapshot::Combat {
            enemy,
            enemy_hp,
            enemy_max_hp,
            lore,
            turn,
            message,
            hit_modifier,
            actions,
        } => {
            println!(
                "\n  {} {enemy} ({enemy_hp}/{enemy_max_hp} HP), turn {turn}",
                "Fight:".red().bold()
            );
            println!("  {}", lore.dimmed());
            println!("  {message}");
            println!("  You: {}/{} HP, hit modifier {hit_modifier:+}", c.hp, c.max_hp);
            let mut options = vec!["attack"];
            if actions.potion {
                options.push("potion");
            }
            let readable: Vec<String> = actions
                .scrolls
                .iter()
                .enumerate()
                .filter(|(_, usable)| **usable)
                .map(|(i, _)| format!("scroll {}", i + 1))
                .collect();
            options.extend(readable.iter().map(String::as_str));
            options.push("flee");
            if actions.vanish {
                options.push("vanish");
            }
            println!("  Actions: {}\n", options.join(", "));
            Ok(false)
        }
        ViewSnapshot::Dead => {
            println!("\n  {}\n", "You died on the mountain.".red().bold());
            Ok(true)
        }
        ViewSnapshot::Won => {
            println!("\n  {}\n", "You are the Harnaś!".green().bold());
            Ok(true)
        }
    }
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_string()
}

fn status(snapshot: &RunSnapshot) -> String {
    let c = &snapshot.character;
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", c.name.as_str()]);

    let scrolls = if c.scrolls.is_empty() {
        "none".to_string()
    } else {
        c.scrolls
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. {s}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let advancements = if c.advancements.is_empty() {
        "none".to_string()
    } else {
        c.advancements
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let location = if c.in_cave {
        format!("{} (underground)", c.location)
    } else {
        c.location.to_string()
    };

    let rows: Vec<(&str, String)> = vec![
        ("HP", format!("{}/{}", c.hp, c.max_hp)),
        ("Dutki", c.coins.to_string()),
        ("Points", c.points.to_string()),
        ("Places", c.visited_places.to_string()),
        ("Weapon", c.weapon.to_string()),
        ("Potions", c.potions.to_string()),
        ("Scrolls", scrolls),
        ("Rope", yes_no(c.rope)),
        ("Kaftan", yes_no(c.kaftan)),
        ("Cap", c.cap_charges.to_string()),
        ("Heart", yes_no(c.spirit_heart)),
        ("Advancements", advancements),
        ("Location", location),
    ];
    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value]);
    }
    table.to_string()
}

fn map(snapshot: &RunSnapshot) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Location", "Status"]);
    for tile in &snapshot.character.map {
        let status = match tile.status {
            MapStatus::Unknown => "unexplored",
            MapStatus::Visited => "visited",
            MapStatus::Escaped => "escaped",
            MapStatus::Current => "you are here",
        };
        table.add_row(vec![tile.location.to_string(), status.to_string()]);
    }
    table.to_string()
}

fn recent(snapshot: &RunSnapshot) -> String {
    if snapshot.log.is_empty() {
        return "  The journal is empty.".to_string();
    }
    let mut lines: Vec<String> = snapshot
        .log
        .iter()
        .take(10)
        .map(|entry| format!("  {}", entry.text()))
        .collect();
    lines.reverse();
    lines.join("\n")
}

fn rolls(snapshot: &RunSnapshot) -> String {
    if snapshot.rolls.is_empty() {
        return "  No dice rolled yet.".to_string();
    }
    snapshot
        .rolls
        .iter()
        .map(|roll| format!("  {roll}"))
        .collect::<Vec<_>>()
        .join("\n")
}
