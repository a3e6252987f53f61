// Fractal maze generator: headless CLI driver.
//
// Generates a level, then simulates a run of descents: before each one the
// given number of seconds is fed to the difficulty timer, and the level is
// regenerated with difficulty adjustment. Prints a summary per level, or the
// final level as JSON.
//
// Usage:
//   cargo run -p fractal_maze --bin generate -- [--seed N] [--config PATH]
//     [--descents N] [--elapsed SECS] [--json]
//
// Set RUST_LOG=debug to see per-stage pipeline logging.

use anyhow::{Context, Result};
use fractal_maze::config::MazeConfig;
use fractal_maze::difficulty::{Level, MazeGenerator};
use fractal_maze::prng::GameRng;
use fractal_maze::types::SegmentTag;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    let seed: u64 = parse_flag(&args, "--seed").unwrap_or(42);
    let descents: u32 = parse_flag(&args, "--descents").unwrap_or(0);
    let elapsed: f32 = parse_flag(&args, "--elapsed").unwrap_or(20.0);
    let config_path: Option<String> = parse_flag(&args, "--config");
    let as_json = args.iter().any(|a| a == "--json");

    let config = match config_path {
        Some(path) => load_config(Path::new(&path))?,
        None => MazeConfig::default(),
    };

    let mut rng = GameRng::new(seed);
    let mut generator = MazeGenerator::new(config, &mut rng).context("initial generation failed")?;
    if !as_json {
        println!("=== Fractal Maze Generator ===");
        println!("Seed: {seed}");
        println!("Descents: {descents} ({elapsed:.1}s each)");
        println!();
        print_summary(generator.level(), &generator);
    }

    for _ in 0..descents {
        generator.advance(elapsed);
        generator
            .regenerate(true, &mut rng)
            .context("regeneration failed")?;
        if !as_json {
            print_summary(generator.level(), &generator);
        }
    }

    if as_json {
        let json = serde_json::to_string_pretty(generator.level())?;
        println!("{json}");
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<MazeConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = MazeConfig::from_json(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn print_summary(level: &Level, generator: &MazeGenerator) {
    let state = generator.state();
    println!(
        "Level {}: {} commands, {} segments (depth cap {})",
        level.generation,
        level.command_len,
        level.segments.len(),
        state.max_depth
    );
    println!(
        "  Pathway {}  Blocked {}  Unvisited {}  (main path {})",
        level.count(SegmentTag::Pathway),
        level.count(SegmentTag::Blocked),
        level.count(SegmentTag::Unvisited),
        level.main_path.len()
    );
    match (level.start, level.spawn_segment()) {
        (Some(start), _) => println!(
            "  Start {start} at {} (threshold {:.1})",
            level.segment(start).position,
            state.start_threshold
        ),
        (None, Some(spawn)) => println!(
            "  No start above {:.1}; spawning at topmost pathway {spawn}",
            state.start_threshold
        ),
        (None, None) => println!("  No spawn point"),
    }
    if let Some(boundary) = level.lower_boundary {
        println!("  Lower boundary y = {boundary:.2}");
    }
    for event in &level.events {
        println!("  event: {event:?}");
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
