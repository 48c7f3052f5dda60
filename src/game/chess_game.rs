//! Turn controller.
//!
//! `ChessGame` owns the live board together with a cached legal-move table
//! for each color. Moves arrive from the presentation layer as
//! `(color, piece name, destination)`; illegal requests come back as
//! `MoveResult::Rejected` and leave the game untouched. Accepted moves are
//! applied, the ply counter advances, both tables are recomputed and the game
//! status is re-derived from the new position.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, info};

use crate::errors::{ChessErrors, ChessResult};
use crate::game::move_result::{GameStatus, MoveRecord, MoveResult, RejectReason};
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Color, Square};
use crate::game_state::piece::{Piece, PieceId};
use crate::move_generation::attack_map::{attackers_to_square, is_king_in_check};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_table::{
    compute_legal_move_table, has_any_legal_move, LegalMoveTable,
};
use crate::utils::render_board::render_board;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessGame {
    board: BoardState,
    // [color]
    legal_moves: [LegalMoveTable; 2],
    status: GameStatus,
    history: Vec<MoveRecord>,
}

impl ChessGame {
    /// Standard opening arrangement, White to move.
    pub fn new() -> ChessResult<Self> {
        Self::from_board(BoardState::standard())
    }

    /// Start from an empty board populated by `setup`.
    ///
    /// Placement faults raised inside the callback are returned unchanged; the
    /// finished board must hold exactly one king per color.
    pub fn with_setup<F>(setup: F) -> ChessResult<Self>
    where
        F: FnOnce(&mut BoardState) -> ChessResult<()>,
    {
        let mut board = BoardState::new_empty();
        setup(&mut board)?;
        Self::from_board(board)
    }

    /// Start from a prebuilt board. Besides the structural checks, the side
    /// that is not to move must not be in check.
    pub fn from_board(board: BoardState) -> ChessResult<Self> {
        board.validate()?;
        let waiting = board.active_color().opposite();
        if is_king_in_check(&board, waiting) {
            return Err(ChessErrors::KingCapturable(waiting));
        }
        let mut game = Self {
            board,
            legal_moves: Default::default(),
            status: GameStatus::Ongoing,
            history: Vec::new(),
        };
        game.refresh()?;
        Ok(game)
    }

    pub fn legal_moves(&self, color: Color) -> &LegalMoveTable {
        &self.legal_moves[color.index()]
    }

    pub fn legal_moves_for(&self, color: Color, name: &str) -> Option<&BTreeSet<Square>> {
        self.legal_moves[color.index()].get(name)
    }

    #[inline]
    pub fn game_status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        self.board.active_color()
    }

    #[inline]
    pub fn ply(&self) -> u32 {
        self.board.ply()
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.board.piece_at(square)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_in_check(&self.board, color)
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Request a move of `color`'s piece `name` onto `to`.
    ///
    /// Rejections are returned as `Ok(MoveResult::Rejected { .. })`. An `Err`
    /// means the cached tables and the board disagree.
    pub fn submit_move(&mut self, color: Color, name: &str, to: Square) -> ChessResult<MoveResult> {
        let active = self.active_color();
        if color != active {
            debug!(%color, %active, name, %to, "move rejected: wrong turn");
            return Ok(MoveResult::Rejected {
                reason: RejectReason::WrongTurn,
            });
        }

        let listed = self
            .legal_moves_for(color, name)
            .is_some_and(|destinations| destinations.contains(&to));
        if !listed {
            debug!(%color, name, %to, "move rejected: illegal destination");
            return Ok(MoveResult::Rejected {
                reason: RejectReason::IllegalDestination,
            });
        }

        let id = PieceId::new(color, name);
        let kind = self
            .board
            .piece(color, name)
            .map(|piece| piece.kind)
            .ok_or_else(|| ChessErrors::StaleLegalMoveEntry(id.clone()))?;
        let ply = self.board.ply();

        let applied = apply_move(&mut self.board, &id, to)?;
        self.board.validate()?;
        self.board.advance_ply();
        self.history.push(MoveRecord {
            ply,
            piece: id,
            kind,
            from: applied.from,
            to: applied.to,
            captured: applied.captured,
            effect: applied.effect,
            rook_relocation: applied.rook_relocation,
            promoted_to: applied.promoted_to,
        });
        self.refresh()?;

        debug!(
            ply,
            %color,
            name,
            from = %applied.from,
            %to,
            effect = ?applied.effect,
            status = %self.status,
            "move applied"
        );
        if self.status.is_terminal() {
            info!(ply = self.board.ply(), status = %self.status, "game over");
        }

        Ok(MoveResult::Accepted {
            effect: applied.effect,
        })
    }

    /// Verify board consistency and that each cached table lists exactly the
    /// registered pieces of its color.
    pub fn check_invariants(&self) -> ChessResult<()> {
        self.board.validate()?;
        for color in Color::ALL {
            let table = &self.legal_moves[color.index()];
            if let Some(stale) = table
                .keys()
                .find(|name| self.board.piece(color, name).is_none())
            {
                return Err(ChessErrors::StaleLegalMoveEntry(PieceId::new(
                    color,
                    stale.as_str(),
                )));
            }
            if let Some(missing) = self
                .board
                .pieces(color)
                .find(|piece| !table.contains_key(&piece.name))
            {
                return Err(ChessErrors::InvariantViolation(format!(
                    "{} has no legal-move table entry",
                    missing.id()
                )));
            }
        }
        Ok(())
    }

    fn refresh(&mut self) -> ChessResult<()> {
        for color in Color::ALL {
            self.legal_moves[color.index()] = compute_legal_move_table(&self.board, color)?;
        }

        let active = self.active_color();
        let in_check = is_king_in_check(&self.board, active);
        let can_move = has_any_legal_move(&self.legal_moves[active.index()]);
        if in_check {
            if let Some(king_sq) = self.board.king_square(active) {
                let attackers = attackers_to_square(&self.board, king_sq, active.opposite());
                debug!(%active, king = %king_sq, ?attackers, "king in check");
            }
        }
        self.status = match (in_check, can_move) {
            (true, true) => GameStatus::Check(active),
            (false, true) => GameStatus::Ongoing,
            (true, false) => GameStatus::Checkmate {
                winner: active.opposite(),
            },
            (false, false) => GameStatus::Stalemate,
        };
        Ok(())
    }
}

impl fmt::Display for ChessGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_board(&self.board))
    }
}
