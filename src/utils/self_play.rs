//! Seeded random self-play for soak-testing the rules engine.
//!
//! Each ply picks uniformly among every legal `(piece, destination)` pair of
//! the side to move and submits it through `ChessGame::submit_move`, exactly
//! as a presentation layer would. After every accepted move the game's
//! invariants are re-checked, so a corrupted board surfaces as an `Err`
//! instead of a silently wrong game.

use rand::prelude::IndexedRandom;
use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;

use crate::errors::{ChessErrors, ChessResult};
use crate::game::chess_game::ChessGame;
use crate::game::move_result::{GameStatus, MoveEffect, MoveResult};
use crate::game_state::chess_types::{Color, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfPlayOutcome {
    Checkmate { winner: Color },
    Stalemate,
    MaxPlies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfPlayConfig {
    pub max_plies: u32,
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            max_plies: 300,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelfPlayReport {
    pub outcome: SelfPlayOutcome,
    pub plies: u32,
    pub captures: u32,
    pub castles: u32,
    pub en_passants: u32,
    pub promotions: u32,
    pub final_status: GameStatus,
    pub final_game: ChessGame,
}

/// Play one seeded random game from the standard arrangement.
pub fn play_random_game(config: &SelfPlayConfig) -> ChessResult<SelfPlayReport> {
    play_random_game_from(ChessGame::new()?, config)
}

/// Play one seeded random game from a caller-provided position.
pub fn play_random_game_from(
    mut game: ChessGame,
    config: &SelfPlayConfig,
) -> ChessResult<SelfPlayReport> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut plies = 0u32;
    let mut captures = 0u32;
    let mut castles = 0u32;
    let mut en_passants = 0u32;
    let mut promotions = 0u32;

    game.check_invariants()?;

    while plies < config.max_plies && !game.game_status().is_terminal() {
        let mover = game.active_color();
        let candidates: Vec<(String, Square)> = game
            .legal_moves(mover)
            .iter()
            .flat_map(|(name, destinations)| {
                destinations.iter().map(move |to| (name.clone(), *to))
            })
            .collect();
        let Some((name, to)) = candidates.choose(&mut rng).cloned() else {
            return Err(ChessErrors::InvariantViolation(format!(
                "{mover} has no legal move but the status is {}",
                game.game_status()
            )));
        };

        let effect = match game.submit_move(mover, &name, to)? {
            MoveResult::Accepted { effect } => effect,
            MoveResult::Rejected { reason } => {
                return Err(ChessErrors::InvariantViolation(format!(
                    "listed move {mover} {name} -> {to} was rejected: {reason:?}"
                )))
            }
        };
        match effect {
            MoveEffect::Plain => {}
            MoveEffect::Castle(_) => castles += 1,
            MoveEffect::EnPassant => en_passants += 1,
            MoveEffect::Promotion => promotions += 1,
        }
        if game
            .last_move()
            .is_some_and(|record| record.captured.is_some())
        {
            captures += 1;
        }

        game.check_invariants()?;
        plies += 1;
    }

    let final_status = game.game_status();
    let outcome = match final_status {
        GameStatus::Checkmate { winner } => SelfPlayOutcome::Checkmate { winner },
        GameStatus::Stalemate => SelfPlayOutcome::Stalemate,
        GameStatus::Ongoing | GameStatus::Check(_) => SelfPlayOutcome::MaxPlies,
    };
    debug!(seed = config.seed, plies, ?outcome, "self-play game finished");

    Ok(SelfPlayReport {
        outcome,
        plies,
        captures,
        castles,
        en_passants,
        promotions,
        final_status,
        final_game: game,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfPlaySeriesConfig {
    pub games: u16,
    pub base_seed: u64,
    pub per_game: SelfPlayConfig,
}

impl Default for SelfPlaySeriesConfig {
    fn default() -> Self {
        Self {
            games: 10,
            base_seed: 0,
            per_game: SelfPlayConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelfPlaySeriesStats {
    pub games: u16,
    pub white_wins: u16,
    pub black_wins: u16,
    pub stalemates: u16,
    pub unfinished: u16,
    pub total_plies: u64,
    pub captures: u64,
    pub castles: u64,
    pub en_passants: u64,
    pub promotions: u64,
}

impl SelfPlaySeriesStats {
    pub fn report(&self) -> String {
        format!(
            "games={} white_wins={} black_wins={} stalemates={} unfinished={} plies={} captures={} castles={} en_passants={} promotions={}",
            self.games,
            self.white_wins,
            self.black_wins,
            self.stalemates,
            self.unfinished,
            self.total_plies,
            self.captures,
            self.castles,
            self.en_passants,
            self.promotions
        )
    }

    fn record(&mut self, report: &SelfPlayReport) {
        self.games += 1;
        match report.outcome {
            SelfPlayOutcome::Checkmate {
                winner: Color::White,
            } => self.white_wins += 1,
            SelfPlayOutcome::Checkmate {
                winner: Color::Black,
            } => self.black_wins += 1,
            SelfPlayOutcome::Stalemate => self.stalemates += 1,
            SelfPlayOutcome::MaxPlies => self.unfinished += 1,
        }
        self.total_plies += u64::from(report.plies);
        self.captures += u64::from(report.captures);
        self.castles += u64::from(report.castles);
        self.en_passants += u64::from(report.en_passants);
        self.promotions += u64::from(report.promotions);
    }
}

/// Play `config.games` games; game `i` uses seed `base_seed + i`. `on_game`
/// sees each finished game, e.g. to print it.
pub fn play_random_series<F>(
    config: &SelfPlaySeriesConfig,
    mut on_game: F,
) -> ChessResult<SelfPlaySeriesStats>
where
    F: FnMut(u16, &SelfPlayReport),
{
    let mut stats = SelfPlaySeriesStats::default();
    for i in 0..config.games {
        let per_game = SelfPlayConfig {
            seed: config.base_seed.wrapping_add(u64::from(i)),
            ..config.per_game
        };
        let report = play_random_game(&per_game)?;
        stats.record(&report);
        on_game(i, &report);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::PieceKind;

    #[test]
    fn seeded_games_keep_every_invariant() {
        for seed in [1u64, 7, 42, 1234, 98765] {
            let config = SelfPlayConfig {
                max_plies: 120,
                seed,
            };
            let report = play_random_game(&config).expect("random game stays consistent");
            assert!(report.plies <= 120);
            assert_eq!(report.final_game.ply(), report.plies);
            assert_eq!(report.final_game.history().len(), report.plies as usize);
            for color in Color::ALL {
                assert!(report.final_game.board().king(color).is_some());
            }
            if report.outcome == SelfPlayOutcome::MaxPlies {
                assert_eq!(report.plies, 120);
            }
        }
    }

    #[test]
    fn same_seed_replays_the_same_game() {
        let config = SelfPlayConfig {
            max_plies: 60,
            seed: 2024,
        };
        let first = play_random_game(&config).expect("first run");
        let second = play_random_game(&config).expect("second run");
        assert_eq!(first.outcome, second.outcome);
        assert_eq!(first.final_game, second.final_game);
    }

    #[test]
    fn terminal_start_plays_no_moves() {
        let game = ChessGame::with_setup(|board| {
            board.add_piece(Color::Black, PieceKind::King, "King1", 7, 7)?;
            board.add_piece(Color::White, PieceKind::King, "King1", 0, 0)?;
            board.add_piece(Color::White, PieceKind::Queen, "Queen1", 5, 6)?;
            board.set_ply(1);
            Ok(())
        })
        .expect("setup is valid");
        assert_eq!(game.game_status(), GameStatus::Stalemate);

        let report =
            play_random_game_from(game, &SelfPlayConfig::default()).expect("nothing to play");
        assert_eq!(report.outcome, SelfPlayOutcome::Stalemate);
        assert_eq!(report.plies, 0);
    }

    #[test]
    fn series_tallies_every_game() {
        let config = SelfPlaySeriesConfig {
            games: 3,
            base_seed: 11,
            per_game: SelfPlayConfig {
                max_plies: 40,
                seed: 0,
            },
        };
        let mut seen = Vec::new();
        let stats =
            play_random_series(&config, |i, report| seen.push((i, report.plies))).expect("series runs");

        assert_eq!(stats.games, 3);
        assert_eq!(
            stats.white_wins + stats.black_wins + stats.stalemates + stats.unfinished,
            3
        );
        assert_eq!(seen.len(), 3);
        assert_eq!(
            stats.total_plies,
            seen.iter().map(|(_, plies)| u64::from(*plies)).sum::<u64>()
        );
        assert!(stats.report().starts_with("games=3 "));
    }
}
