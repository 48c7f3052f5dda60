//! Random self-play soak runner.
//!
//! Run with:
//! `cargo run --release --bin self_play`
//! `cargo run --release --bin self_play -- --games 50 --seed 7 --show-board`
//!
//! Set `RUST_LOG=plum_rules=debug` to log every move.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use plum_rules::utils::self_play::{play_random_series, SelfPlayConfig, SelfPlaySeriesConfig};
use plum_rules::ChessErrors;

#[derive(Debug, Parser)]
#[command(name = "self_play", about = "Play seeded random games through the rules engine")]
struct Args {
    /// Number of games to play.
    #[arg(long, default_value_t = 10)]
    games: u16,

    /// Seed of the first game; game i uses seed + i.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stop a game after this many plies.
    #[arg(long, default_value_t = 300)]
    max_plies: u32,

    /// Print the final board of every game.
    #[arg(long)]
    show_board: bool,
}

fn main() -> Result<(), ChessErrors> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let started = chrono::Local::now();
    info!(games = args.games, seed = args.seed, max_plies = args.max_plies, "starting self-play");

    let config = SelfPlaySeriesConfig {
        games: args.games,
        base_seed: args.seed,
        per_game: SelfPlayConfig {
            max_plies: args.max_plies,
            ..SelfPlayConfig::default()
        },
    };

    let stats = play_random_series(&config, |i, report| {
        println!(
            "[self_play] game {}/{} seed={} outcome={:?} plies={}",
            i + 1,
            args.games,
            args.seed.wrapping_add(u64::from(i)),
            report.outcome,
            report.plies
        );
        if args.show_board {
            println!("{}\n", report.final_game);
        }
    })?;

    println!(
        "[{}] {}",
        started.format("%Y-%m-%d %H:%M:%S"),
        stats.report()
    );
    Ok(())
}
