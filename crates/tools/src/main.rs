use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::journal_file::JournalWriter;
use game_core::{Driver, GameConfig, SaveFile, parse_commands};

/// Plays an input string such as `n123sswwd:q` and prints the resulting world.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Commands to apply: n<digits>s, w/a/s/d, l, :q
    #[arg(short, long)]
    input: String,
    /// Save file used by `l` and `:q`
    #[arg(short, long, default_value = "savefile.json")]
    save: PathBuf,
    /// JSON file with generation settings; missing keys keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for the fresh game started when loading fails
    #[arg(long, default_value_t = 0)]
    fallback_seed: u64,
    /// Also record the parsed commands to this JSONL journal
    #[arg(short, long)]
    journal: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    GameConfig::from_json(&json)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    let commands = parse_commands(&args.input).context("Malformed input string")?;

    if let Some(path) = &args.journal {
        let mut writer = JournalWriter::create(path, args.fallback_seed, env!("CARGO_PKG_VERSION"))
            .with_context(|| format!("Failed to create journal: {}", path.display()))?;
        for &command in &commands {
            writer.append(command)?;
        }
    }

    let mut driver = Driver::new(config, SaveFile::new(&args.save))
        .context("Invalid generation settings")?
        .with_fallback_seed(args.fallback_seed);
    for applied in driver.run(commands) {
        if applied.swapped {
            eprintln!("{:?}: {:?}, swapped layers", applied.command, applied.outcome);
        }
    }

    let Some(game) = driver.game() else {
        println!("No game was started.");
        return Ok(());
    };
    for row in game.current().grid.to_rows() {
        println!("{row}");
    }
    println!("Seed: {}", game.seed());
    println!("Snapshot Hash: {:#018x}", game.snapshot_hash());

    Ok(())
}
