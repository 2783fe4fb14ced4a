use crate::core::{Board, Side};
use crate::game::{Game, GameEnd, GameResult};
use crate::player::ai::{AlphaBetaAI, RandomAI, SearchConfig};
use crate::player::PlayerController;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    #[value(name = "alphabeta")]
    AlphaBeta,
    Random,
}

#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    pub num_games: usize,
    pub white: PlayerKind,
    pub black: PlayerKind,
    /// Base seed; every game and side gets its own seed derived from it.
    pub seed: u64,
    pub max_moves: Option<usize>,
    pub search: SearchConfig,
    /// Write one JSON record per game here when set.
    pub save_dir: Option<PathBuf>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 1,
            white: PlayerKind::AlphaBeta,
            black: PlayerKind::Random,
            seed: 0,
            max_moves: None,
            search: SearchConfig::default(),
            save_dir: None,
        }
    }
}

/// How many games ended each way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndCounts {
    pub no_moves: usize,
    pub resigned: usize,
    pub forfeit: usize,
    pub move_limit: usize,
}

impl EndCounts {
    fn record(&mut self, end: GameEnd) {
        let slot = match end {
            GameEnd::NoMoves => &mut self.no_moves,
            GameEnd::Resigned => &mut self.resigned,
            GameEnd::Forfeit => &mut self.forfeit,
            GameEnd::MoveLimit => &mut self.move_limit,
        };
        *slot += 1;
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SelfPlayStats {
    pub started_at: String,
    pub total_games: usize,
    pub white_wins: usize,
    pub black_wins: usize,
    /// Undecided games, i.e. those stopped by the move limit.
    pub draws: usize,
    pub ends: EndCounts,
    pub total_moves: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub white: PlayerKind,
    pub black: PlayerKind,
    pub seed: u64,
    pub games: Vec<GameResult>,
    #[serde(skip)]
    total_time_ms: u128,
}

impl SelfPlayStats {
    pub fn new(config: &SelfPlayConfig, started_at: String) -> Self {
        Self {
            started_at,
            total_games: 0,
            white_wins: 0,
            black_wins: 0,
            draws: 0,
            ends: EndCounts::default(),
            total_moves: 0,
            avg_moves: 0.0,
            avg_time_ms: 0.0,
            white: config.white,
            black: config.black,
            seed: config.seed,
            games: Vec::new(),
            total_time_ms: 0,
        }
    }

    pub fn add_result(&mut self, result: GameResult) {
        match result.winner {
            Some(Side::White) => self.white_wins += 1,
            Some(Side::Black) => self.black_wins += 1,
            None => self.draws += 1,
        }
        self.ends.record(result.end);

        self.total_games += 1;
        self.total_moves += result.moves;
        self.total_time_ms += result.time_ms;
        self.avg_moves = self.total_moves as f64 / self.total_games as f64;
        self.avg_time_ms = self.total_time_ms as f64 / self.total_games as f64;
        self.games.push(result);
    }

    /// Share of decided games won by `side`, or `None` before any decided game.
    pub fn win_rate(&self, side: Side) -> Option<f64> {
        let decided = self.white_wins + self.black_wins;
        let wins = match side {
            Side::White => self.white_wins,
            Side::Black => self.black_wins,
        };
        (decided > 0).then(|| wins as f64 / decided as f64)
    }
}

/// Play `num_games` independent games in parallel.
///
/// Results come back in game order whatever order the games finish in.
pub fn run_selfplay(config: SelfPlayConfig) -> anyhow::Result<SelfPlayStats> {
    let started_at = chrono::Local::now();
    let stamp = started_at.format("%Y%m%d_%H%M%S").to_string();
    if let Some(dir) = &config.save_dir {
        std::fs::create_dir_all(dir)?;
    }

    info!(
        games = config.num_games,
        white = ?config.white,
        black = ?config.black,
        seed = config.seed,
        "starting self-play"
    );

    let results = (0..config.num_games)
        .into_par_iter()
        .map(|game_num| -> anyhow::Result<GameResult> {
            let white = make_player(&config, Side::White, game_num);
            let black = make_player(&config, Side::Black, game_num);

            let mut game = Game::new(Board::new());
            game.max_moves = config.max_moves;
            let result = game.play(white.as_ref(), black.as_ref());

            info!(
                game = game_num + 1,
                winner = ?result.winner,
                moves = result.moves,
                time_ms = result.time_ms as u64,
                "game finished"
            );
            if let Some(dir) = &config.save_dir {
                save_record(dir, game_num, &stamp, &result)?;
            }
            Ok(result)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut stats = SelfPlayStats::new(&config, started_at.to_rfc3339());
    for result in results {
        stats.add_result(result);
    }
    info!(
        white_wins = stats.white_wins,
        black_wins = stats.black_wins,
        draws = stats.draws,
        avg_moves = stats.avg_moves,
        "self-play finished"
    );
    Ok(stats)
}

fn make_player(config: &SelfPlayConfig, side: Side, game_num: usize) -> Box<dyn PlayerController> {
    let name = format!("{:?}-{}", config_kind(config, side), side);
    match config_kind(config, side) {
        PlayerKind::AlphaBeta => Box::new(AlphaBetaAI::new(side, &name, config.search.clone())),
        PlayerKind::Random => Box::new(RandomAI::new(&name, game_seed(config.seed, game_num, side))),
    }
}

fn config_kind(config: &SelfPlayConfig, side: Side) -> PlayerKind {
    match side {
        Side::White => config.white,
        Side::Black => config.black,
    }
}

// splitmix64 step over (base, game, side) so neighbouring games get
// unrelated streams
fn game_seed(base: u64, game_num: usize, side: Side) -> u64 {
    let mut z = base
        .wrapping_add((game_num as u64).wrapping_mul(2))
        .wrapping_add(side.index() as u64)
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn save_record(dir: &Path, game_num: usize, stamp: &str, result: &GameResult) -> anyhow::Result<()> {
    let filename = dir.join(format!("game_{:04}_{}.json", game_num + 1, stamp));
    let file = std::fs::File::create(filename)?;
    serde_json::to_writer_pretty(file, result)?;
    Ok(())
}
