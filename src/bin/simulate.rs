//! Balance simulator CLI.
//!
//! Runs headless Monte Carlo battles to check class pacing and loot rates.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # 100 runs per class, 1000 turns
//!   cargo run --bin simulate -- -c warrior       # Warrior only
//!   cargo run --bin simulate -- -n 500 -s 42     # 500 runs, reproducible

use darkspire::content::GameContent;
use darkspire::core::engine::{EngineConfig, HeadlessEngine};
use darkspire::core::types::PlayerClass;
use std::env;

struct SimArgs {
    runs: u64,
    max_turns: u32,
    base_seed: u64,
    class: Option<PlayerClass>,
    auto_equip: bool,
}

impl Default for SimArgs {
    fn default() -> Self {
        Self {
            runs: 100,
            max_turns: 1000,
            base_seed: 0,
            class: None,
            auto_equip: true,
        }
    }
}

#[derive(Default)]
struct ClassTotals {
    monsters_defeated: u64,
    final_level: u64,
    final_wave: u64,
    gold: u64,
    items_dropped: u64,
    skills_used: u64,
    turns_run: u64,
    deaths: u64,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let sim = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              DARKSPIRE BALANCE SIMULATOR                      ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs per class: {}", sim.runs);
    println!("  Max Turns:      {}", sim.max_turns);
    println!("  Base Seed:      {}", sim.base_seed);
    println!("  Auto-Equip:     {}", sim.auto_equip);
    if let Some(class) = sim.class {
        println!("  Class:          {}", class.name());
    }
    println!();
    println!("Running simulation...");
    println!();

    let content = GameContent::load_default().expect("bundled content must parse");

    let classes: Vec<PlayerClass> = match sim.class {
        Some(class) => vec![class],
        None => PlayerClass::all().to_vec(),
    };

    println!(
        "{:<10} {:>8} {:>8} {:>8} {:>10} {:>8} {:>9} {:>8}",
        "Class", "Kills", "Level", "Wave", "Gold", "Drops", "Skills", "Deaths"
    );
    println!("{}", "─".repeat(75));

    for class in classes {
        let mut totals = ClassTotals::default();

        for run in 0..sim.runs {
            let config = EngineConfig {
                class,
                max_turns: sim.max_turns,
                seed: sim.base_seed.wrapping_add(run),
                auto_equip: sim.auto_equip,
            };
            let mut engine = HeadlessEngine::new(content.clone(), config)
                .expect("content is validated at load time");
            let stats = engine
                .run(sim.max_turns)
                .expect("headless run should not fail");

            totals.monsters_defeated += stats.monsters_defeated;
            totals.final_level += u64::from(stats.final_level);
            totals.final_wave += u64::from(stats.final_wave);
            totals.gold += stats.gold;
            totals.items_dropped += stats.items_dropped as u64;
            totals.skills_used += stats.skills_used;
            totals.turns_run += u64::from(stats.turns_run);
            if stats.died {
                totals.deaths += 1;
            }
        }

        let n = sim.runs as f64;
        println!(
            "{:<10} {:>8.1} {:>8.1} {:>8.1} {:>10.0} {:>8.1} {:>9.1} {:>7.0}%",
            class.name(),
            totals.monsters_defeated as f64 / n,
            totals.final_level as f64 / n,
            totals.final_wave as f64 / n,
            totals.gold as f64 / n,
            totals.items_dropped as f64 / n,
            totals.skills_used as f64 / n,
            100.0 * totals.deaths as f64 / n,
        );
    }

    println!();
    println!("(all columns are per-run averages; Deaths is the run death rate)");
}

fn parse_args(args: &[String]) -> SimArgs {
    let mut sim = SimArgs::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    sim.runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-t" | "--turns" => {
                if i + 1 < args.len() {
                    sim.max_turns = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    sim.base_seed = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "-c" | "--class" => {
                if i + 1 < args.len() {
                    sim.class = parse_class(&args[i + 1]);
                    if sim.class.is_none() {
                        eprintln!("Unknown class: {}", args[i + 1]);
                        std::process::exit(1);
                    }
                    i += 1;
                }
            }
            "--no-auto-equip" => {
                sim.auto_equip = false;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    sim
}

fn parse_class(name: &str) -> Option<PlayerClass> {
    match name.to_ascii_lowercase().as_str() {
        "warrior" => Some(PlayerClass::Warrior),
        "mage" => Some(PlayerClass::Mage),
        "rogue" => Some(PlayerClass::Rogue),
        "paladin" => Some(PlayerClass::Paladin),
        _ => None,
    }
}

fn print_help() {
    println!("Darkspire Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Runs per class (default: 100)");
    println!("    -t, --turns <T>     Max turns per run (default: 1000)");
    println!("    -s, --seed <S>      Base seed; run k uses seed S+k (default: 0)");
    println!("    -c, --class <C>     Simulate one class: warrior, mage, rogue, paladin");
    println!("    --no-auto-equip     Keep drops in the inventory instead of equipping upgrades");
    println!("    -h, --help          Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                     # All classes");
    println!("    cargo run --bin simulate -- -c mage -n 500   # Mage deep dive");
    println!("    cargo run --bin simulate -- -s 42            # Reproducible");
}
