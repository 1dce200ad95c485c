// Scenario Runner - Load and execute scenario YAML files
//
// Usage:
//   cargo run --bin scenario_runner scenarios/congested.yaml
//   cargo run --bin scenario_runner scenarios/  (runs all .yaml files in directory)
//   cargo run --bin scenario_runner scenarios/congested.yaml --seed 0x1234...
//   cargo run --bin scenario_runner scenarios/congested.yaml --csv events.csv

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};
use simple_logger::SimpleLogger;

use sf_rust::sf_event_sinks::{ConsoleEventSink, CsvEventSink, MultiEventSink};
use sf_rust::sf_stats::seed_to_hex;
use sf_rust::{SimConfig, SimEngine};

/// Scenario file format
#[derive(Debug, serde::Deserialize)]
struct ScenarioFile {
    /// Scenario metadata
    #[serde(default)]
    meta: ScenarioMeta,

    /// Simulation configuration, missing fields take their defaults
    config: SimConfig,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ScenarioMeta {
    name: Option<String>,
    description: Option<String>,
    hypothesis: Option<String>,
}

struct Options {
    path: PathBuf,
    seed: Option<[u8; 32]>,
    csv: Option<PathBuf>,
}

fn main() {
    SimpleLogger::new().init().unwrap();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: {} <scenario.yaml | directory/> [--seed SEED_HEX] [--csv PATH]",
            args[0]
        );
        eprintln!("\nExamples:");
        eprintln!("  {} scenarios/congested.yaml", args[0]);
        eprintln!("  {} scenarios/", args[0]);
        eprintln!("  {} scenarios/congested.yaml --seed 0x123456...", args[0]);
        std::process::exit(1);
    }

    let options = parse_options(&args);

    if options.path.is_file() {
        run_scenario_file(&options.path, &options);
    } else if options.path.is_dir() {
        run_scenario_directory(&options.path, &options);
    } else {
        eprintln!("Error: Path does not exist: {}", options.path.display());
        std::process::exit(1);
    }
}

fn parse_options(args: &[String]) -> Options {
    let mut options = Options {
        path: PathBuf::from(&args[1]),
        seed: None,
        csv: None,
    };

    let mut rest = args[2..].iter();
    while let Some(flag) = rest.next() {
        let value = rest.next().unwrap_or_else(|| {
            eprintln!("Missing value for {}", flag);
            std::process::exit(1);
        });
        match flag.as_str() {
            "--seed" => options.seed = Some(parse_seed_hex(value)),
            "--csv" => options.csv = Some(PathBuf::from(value)),
            other => {
                eprintln!("Unknown option: {}", other);
                std::process::exit(1);
            }
        }
    }

    options
}

fn run_scenario_directory(dir: &Path, options: &Options) {
    let mut scenarios = Vec::new();

    // Find all .yaml files
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let ext = path.extension().and_then(|s| s.to_str());
            if ext == Some("yaml") || ext == Some("yml") {
                scenarios.push(path);
            }
        }
    }

    scenarios.sort();

    if scenarios.is_empty() {
        eprintln!("No .yaml files found in {}", dir.display());
        std::process::exit(1);
    }

    println!("Found {} scenario(s) to run\n", scenarios.len());

    for (i, scenario_path) in scenarios.iter().enumerate() {
        println!(
            "\n{}/{} Running: {}\n",
            i + 1,
            scenarios.len(),
            scenario_path.display()
        );
        run_scenario_file(scenario_path, options);
    }

    println!("\nAll scenarios complete!\n");
}

fn run_scenario_file(path: &Path, options: &Options) {
    println!("Loading scenario from: {}", path.display());

    let yaml_content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", path.display(), e);
        std::process::exit(1);
    });

    let scenario: ScenarioFile = serde_yaml::from_str(&yaml_content).unwrap_or_else(|e| {
        eprintln!("Failed to parse {}: {}", path.display(), e);
        std::process::exit(1);
    });

    match scenario.meta.name {
        Some(ref name) => println!("\n== {} ==\n", name),
        None => println!("\n== Scenario: {} ==\n", path.display()),
    }
    if let Some(ref desc) = scenario.meta.description {
        println!("{}\n", desc);
    }
    if let Some(ref hypothesis) = scenario.meta.hypothesis {
        println!("Hypothesis:");
        println!("  {}\n", hypothesis);
    }

    let mut config = scenario.config;
    if options.seed.is_some() {
        config.seed = options.seed;
    }

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration in {}: {}", path.display(), e);
        std::process::exit(1);
    }

    println!("Configuration:");
    println!("  Routers: {} x capacity {}", config.num_routers, config.router_capacity);
    println!(
        "  Arrivals: p={} up to {} per tick, size {}..={}",
        config.arrival_probability,
        config.max_packets_per_tick,
        config.min_packet_size,
        config.max_packet_size
    );
    println!("  Bandwidth: {}", config.bandwidth);
    println!("  Duration: {}", config.duration);

    let mut sinks = MultiEventSink::new();
    sinks.add_sink(Box::new(ConsoleEventSink::new(config.enable_event_logging)));
    if let Some(ref csv_path) = options.csv {
        match CsvEventSink::new(csv_path) {
            Ok(csv) => sinks.add_sink(Box::new(csv)),
            Err(e) => {
                eprintln!("Failed to create {}: {}", csv_path.display(), e);
                std::process::exit(1);
            }
        }
    }

    let mut engine = SimEngine::new(config).with_sink(Box::new(sinks));
    if let Some(seed) = engine.seed() {
        info!("seed = {}", seed_to_hex(&seed));
    }

    match engine.run() {
        Ok(summary) => summary.print_summary(),
        Err(e) => {
            error!("{}: simulation aborted: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    println!("\nScenario complete!\n");
}

fn parse_seed_hex(hex: &str) -> [u8; 32] {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let mut seed = [0u8; 32];

    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        if i >= 32 {
            break;
        }
        let byte = std::str::from_utf8(chunk)
            .ok()
            .and_then(|s| u8::from_str_radix(s, 16).ok());
        seed[i] = byte.unwrap_or_else(|| {
            eprintln!("Invalid hex seed: {}", hex);
            std::process::exit(1);
        });
    }

    seed
}
