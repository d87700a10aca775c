//! Buffon's Needle entry point
//!
//! Drives a simulation from the command line: each `--drop` is one batch,
//! `--reset` clears everything, and the counters are printed after each step.

use std::time::{SystemTime, UNIX_EPOCH};

use buffon_needle::{DropPreset, NeedleSimulation, Report, Settings};

const USAGE: &str =
    "Usage: buffon-needle [--config FILE] [--seed S] [--drop N|LABEL]... [--reset] [--json]";

/// One step requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Drop(i64),
    Reset,
}

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config: Option<String>,
    seed: Option<u64>,
    actions: Vec<Action>,
    json: bool,
    help: bool,
}

fn parse_drop(value: &str) -> Result<i64, String> {
    if let Some(preset) = DropPreset::from_str(value) {
        return Ok(i64::from(preset.count()));
    }
    value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid --drop value: {}", value))
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let value = args.get(i).ok_or("--config needs a path")?;
                cli.config = Some(value.clone());
            }
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("--seed needs a value")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("Invalid --seed value: {}", value))?;
                cli.seed = Some(seed);
            }
            "--drop" => {
                i += 1;
                let value = args.get(i).ok_or("--drop needs a count")?;
                cli.actions.push(Action::Drop(parse_drop(value)?));
            }
            "--reset" => cli.actions.push(Action::Reset),
            "--json" => cli.json = true,
            "--help" | "-h" => cli.help = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    Ok(cli)
}

fn print_help() {
    println!("{}", USAGE);
    println!();
    println!("Options:");
    println!("  --config FILE   Load settings from a JSON file");
    println!("  --seed S        RNG seed (overrides the settings file)");
    println!("  --drop N|LABEL  Drop a batch of sticks (count or preset label like +1K)");
    println!("  --reset         Clear all dropped sticks at this point");
    println!("  --json          Print the final report as JSON");
    println!();
    println!("Without --drop, every configured preset is dropped once in order.");
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run(cli: CliArgs) -> Result<(), String> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path).map_err(|e| e.to_string())?,
        None => Settings::default(),
    };
    let params = settings.parameters().map_err(|e| e.to_string())?;
    let seed = cli.seed.or(settings.seed).unwrap_or_else(time_seed);
    log::info!("Simulation initialized with seed: {}", seed);

    let actions = if cli.actions.is_empty() {
        settings
            .presets
            .iter()
            .map(|p| Action::Drop(i64::from(p.count())))
            .collect()
    } else {
        cli.actions
    };

    let mut sim = NeedleSimulation::new(params, seed);
    for action in actions {
        match action {
            Action::Drop(count) => {
                sim.drop_sticks(count, settings.x_range, settings.y_range)
                    .map_err(|e| e.to_string())?;
                println!("+{:<6} {}", count, Report::from_simulation(&sim).status_line());
            }
            Action::Reset => {
                sim.reset();
                println!("reset   {}", Report::from_simulation(&sim).status_line());
            }
        }
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&Report::from_simulation(&sim))
            .map_err(|e| e.to_string())?;
        println!("{}", json);
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    if cli.help {
        print_help();
        return;
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
