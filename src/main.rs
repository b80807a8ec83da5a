//! Mendbot demo - entry point
//!
//! Drives the assist engine against the scriptable sim host through an
//! interactive console loop: advance ticks, hurt party members, watch the
//! engine pick targets and cast, and poke the failure modes.

use std::io::{self, Write};

use clap::Parser;
use rand::Rng;

use mendbot::actions::catalog::{ActionDescriptor, DurationUnit, RawDuration};
use mendbot::core::config::EngineConfig;
use mendbot::core::error::{MendError, Result};
use mendbot::core::types::Seconds;
use mendbot::engine::{Engine, EngineEvent};
use mendbot::host::sim::SimHost;
use mendbot::profile::TomlProfileStore;

/// Seconds of session time per tick
const TICK_SECONDS: Seconds = 0.25;

#[derive(Parser, Debug)]
#[command(name = "mendbot", about = "Party-assist engine demo")]
struct Args {
    /// Directory for per-character profile files
    #[arg(long, default_value = "profiles")]
    profile_dir: String,

    /// Active character name
    #[arg(long, default_value = "Adventurer")]
    character: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("mendbot=info")
        .init();

    let args = Args::parse();
    tracing::info!("Mendbot starting...");

    let config = EngineConfig::default();
    config.validate().map_err(MendError::InvalidConfig)?;

    let mut now: Seconds = 0.0;
    let mut engine = Engine::new(config, now)
        .with_store(Box::new(TomlProfileStore::new(&args.profile_dir)));
    engine.set_active_character(Some(&args.character), now)?;

    let mut host = build_host(&args.character);

    println!("\n=== MENDBOT ===");
    println!("Party-assist automation engine against a simulated host");
    println!();
    println!("Commands:");
    println!("  tick / t           - Advance one tick");
    println!("  run <n>            - Run n ticks with random incoming damage");
    println!("  status / s         - Show engine status");
    println!("  json               - Dump the status snapshot as JSON");
    println!("  damage <who> <n>   - Reduce a member's HP");
    println!("  join <name>        - Add a group member");
    println!("  leave <name>       - Remove a group member");
    println!("  cast <who> <spell> - Manually cast on a member");
    println!("  slot <n>           - Cast the slot binding (0=self)");
    println!("  auto on|off        - Toggle automatic assistance");
    println!("  zone <id>          - Change the active area");
    println!("  menu on|off        - Enter/leave a non-interactable context");
    println!("  quit / q           - Exit");
    println!();

    loop {
        print!("[{:7.2}s] > ", now);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["tick"] | ["t"] => {
                now += TICK_SECONDS;
                let events = engine.tick(&mut host, now);
                print_events(&events);
            }
            ["run", n] => {
                let count: u32 = n.parse().unwrap_or(1);
                let mut rng = rand::thread_rng();
                for _ in 0..count {
                    now += TICK_SECONDS;
                    apply_random_damage(&engine, &mut host, &mut rng);
                    let events = engine.tick(&mut host, now);
                    print_events(&events);
                }
            }
            ["status"] | ["s"] => display_status(&engine, now),
            ["json"] => {
                let status = engine.status(now);
                println!("{}", serde_json::to_string_pretty(&status)?);
            }
            ["damage", who, amount] => {
                let amount: i32 = amount.parse().unwrap_or(10);
                match engine.roster().find_by_name(who) {
                    Some(member) => {
                        let hp = (member.current_hp - amount).max(0);
                        let id = member.id;
                        host.set_hp(id, hp);
                        println!("{} takes {} damage", who, amount);
                    }
                    None => println!("No member named '{}'", who),
                }
            }
            ["join", name] => {
                host.add_member(name, 100, 100);
                println!("{} joined the party", name);
            }
            ["leave", name] => match engine.roster().find_by_name(name) {
                Some(member) => {
                    host.remove_member(member.id);
                    println!("{} left the party", name);
                }
                None => println!("No member named '{}'", name),
            },
            ["cast", who, spell @ ..] if !spell.is_empty() => {
                let spell = spell.join(" ");
                match engine.cast_by_name(&mut host, who, &spell, now) {
                    Ok(outcome) => println!("{}", outcome),
                    Err(e) => println!("Dispatch failed: {}", e),
                }
            }
            ["slot", n] => {
                let slot: usize = n.parse().unwrap_or(0);
                match engine.cast_on_slot(&mut host, slot, now) {
                    Ok(outcome) => println!("{}", outcome),
                    Err(e) => println!("Dispatch failed: {}", e),
                }
            }
            ["auto", state] => {
                let enabled = *state == "on";
                engine.set_auto_assist(enabled)?;
                println!("Automatic assistance {}", if enabled { "on" } else { "off" });
            }
            ["zone", id] => {
                host.set_context(id);
                println!("Moved to zone '{}'", id);
            }
            ["menu", state] => {
                host.set_session_active(*state != "on");
                println!("Menu {}", if *state == "on" { "opened" } else { "closed" });
            }
            _ => println!("Unknown command: {}", input),
        }
    }

    engine.shutdown()?;
    tracing::info!("Mendbot shutting down");
    Ok(())
}

/// Seed the sim host with a small party and a spellbook
fn build_host(player_name: &str) -> SimHost {
    let mut host = SimHost::new(player_name);
    host.add_member("Brina", 100, 100);
    host.add_member("Korr", 100, 100);

    // Declared cooldowns exercise the unit normalization paths
    host.learn(ActionDescriptor::with_cooldown(
        "Minor Healing",
        RawDuration::new(1500.0),
    ));
    host.learn(ActionDescriptor::with_cooldown(
        "Major Healing",
        RawDuration::new(6.0),
    ));
    host.learn(ActionDescriptor::with_cooldown(
        "Group Heal",
        RawDuration::with_unit(12_000.0, DurationUnit::Millis),
    ));
    host.learn(ActionDescriptor::new("Fire Bolt"));
    host.catalog_only(ActionDescriptor::new("Supreme Healing"));
    host
}

fn apply_random_damage(engine: &Engine, host: &mut SimHost, rng: &mut impl Rng) {
    let members = engine.roster().members();
    if members.is_empty() {
        return;
    }
    let victim = &members[rng.gen_range(0..members.len())];
    if victim.current_hp > 0 {
        let amount = rng.gen_range(0..20);
        host.set_hp(victim.id, (victim.current_hp - amount).max(0));
    }
}

fn print_events(events: &[EngineEvent]) {
    for event in events {
        match event {
            EngineEvent::CompositionChanged { members } => {
                println!("  * party now: [{}]", members.join(", "));
            }
            EngineEvent::Suppressed { reason, resume_in } => {
                println!("  * paused ({}) for {:.1}s", reason, resume_in);
            }
            EngineEvent::AutoDispatched { target, outcome } => {
                println!("  * auto on {}: {}", target, outcome);
            }
            EngineEvent::HostFault { detail } => {
                println!("  * host fault: {}", detail);
            }
        }
    }
}

fn display_status(engine: &Engine, now: Seconds) {
    let status = engine.status(now);
    println!(
        "auto: {} | {}",
        if status.auto_assist { "on" } else { "off" },
        if status.suppressed {
            format!(
                "paused ({}) {:.1}s left",
                status.suppress_reason.as_deref().unwrap_or("-"),
                status.suppress_remaining
            )
        } else {
            "active".to_string()
        }
    );
    match &status.candidate {
        Some(c) => println!(
            "lowest: {} at {:.0}% -> {}",
            c.name,
            c.health_fraction * 100.0,
            c.action
        ),
        None => println!("lowest: (none)"),
    }
    if let Some(outcome) = &status.last_outcome {
        println!("last: {}", outcome);
    }
    for member in engine.roster().members() {
        let marker = if member.is_self { "*" } else { " " };
        println!(
            " {} {} {}/{}",
            marker, member.name, member.current_hp, member.max_hp
        );
    }
}
