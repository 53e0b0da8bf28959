use anyhow::{Context, Result, ensure};
use clap::Parser;
use game_core::{
    Command, CommandOutcome, Direction, Driver, Game, GameConfig, MemoryStore, TileKind,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 1000)]
    steps: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

enum Action {
    Apply(Command),
    SaveAndReload,
}

/// Mostly moves, with an occasional new game or save-and-reload.
fn next_action(rng: &mut ChaCha8Rng) -> Action {
    match rng.next_u64() % 100 {
        0 => Action::Apply(Command::NewGame(rng.next_u64())),
        1 => Action::SaveAndReload,
        _ => Action::Apply(Command::Move(choose(
            rng,
            &[Direction::Up, Direction::Left, Direction::Down, Direction::Right],
        ))),
    }
}

/// Quits (which saves), then loads the save into a fresh driver and checks
/// that nothing changed.
fn save_and_reload(mut driver: Driver<MemoryStore>, seed: u64) -> Result<Driver<MemoryStore>> {
    driver.apply(Command::Quit);
    let before = driver.game().map(Game::snapshot_hash);

    let mut reloaded =
        Driver::new(driver.config().clone(), driver.store().clone())?.with_fallback_seed(seed);
    let applied = reloaded.apply(Command::Load);
    ensure!(
        matches!(applied.outcome, CommandOutcome::Loaded { .. }),
        "reload did not restore the save: {:?}",
        applied.outcome
    );
    ensure!(reloaded.game().map(Game::snapshot_hash) == before, "reload changed the session");
    Ok(reloaded)
}

fn check_invariants(game: &Game) -> Result<()> {
    let current = game.current();
    let players = current.grid.count(TileKind::Player);
    ensure!(players == 1, "Invariant failed: {players} player tiles on the active layer");
    ensure!(
        current.grid.tile_at(game.player_pos()) == TileKind::Player,
        "Invariant failed: player tile is not at {:?}",
        game.player_pos()
    );
    ensure!(
        game.overworld().grid.count(TileKind::Player) == 0,
        "Invariant failed: player drawn on the inactive layer"
    );
    for world in [current, game.overworld()] {
        let grid = &world.grid;
        let leaked = grid
            .positions()
            .filter(|&pos| grid.is_border(pos))
            .any(|pos| !matches!(grid.tile_at(pos), TileKind::Wall | TileKind::Empty));
        ensure!(!leaked, "Invariant failed: walkable border tile on layer {}", world.seed);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} steps...", args.seed, args.steps);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut driver = Driver::new(GameConfig::default(), MemoryStore::new())?
        .with_fallback_seed(args.seed);
    driver.apply(Command::NewGame(args.seed));

    let mut swaps = 0;
    for step in 0..args.steps {
        match next_action(&mut rng) {
            Action::Apply(command) => {
                swaps += usize::from(driver.apply(command).swapped);
            }
            Action::SaveAndReload => {
                driver = save_and_reload(driver, args.seed)
                    .with_context(|| format!("step {step}: save and reload"))?;
            }
        }
        if let Some(game) = driver.game() {
            check_invariants(game).with_context(|| format!("step {step}"))?;
        }
    }

    println!("Fuzzing completed successfully ({swaps} layer swaps).");
    Ok(())
}
