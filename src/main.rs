use amazons::player::ai::AIConfig;
use amazons::selfplay::{run_selfplay, PlayerKind, SelfPlayConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// Applied when neither the command line nor the config file sets a limit.
const DEFAULT_TIME_LIMIT_MS: u64 = 5_000;

/// Game of the Amazons self-play runner
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 1)]
    games: usize,

    #[arg(long, value_enum, default_value_t = PlayerKind::AlphaBeta)]
    white: PlayerKind,

    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    black: PlayerKind,

    /// Base seed for the random players
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stop a game undecided after this many moves
    #[arg(long)]
    max_moves: Option<usize>,

    /// Search settings (defaults to ./ai_config.json, then built-ins)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Per-move search budget in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Directory for per-game JSON records
    #[arg(long)]
    save_games: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut ai_config = match &args.config {
        Some(path) => AIConfig::from_path(path)?,
        None => AIConfig::load_or_default(),
    };
    ai_config.search.time_limit_ms = args
        .time_limit_ms
        .or(ai_config.search.time_limit_ms)
        .or(Some(DEFAULT_TIME_LIMIT_MS));

    let stats = run_selfplay(SelfPlayConfig {
        num_games: args.games,
        white: args.white,
        black: args.black,
        seed: args.seed,
        max_moves: args.max_moves,
        search: ai_config.search,
        save_dir: args.save_games,
    })?;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
