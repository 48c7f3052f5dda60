//! Tagged values returned to the presentation layer.

use std::fmt;

use crate::game_state::chess_types::{CastleSide, Color, PieceKind, Square};
use crate::game_state::piece::PieceId;

/// Secondary board effect of an accepted move that the presentation layer
/// has to mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveEffect {
    Plain,
    /// The rook on that side moved next to the king.
    Castle(CastleSide),
    /// The passed pawn was removed from beside the capturing pawn.
    EnPassant,
    /// The pawn was replaced by a new queen.
    Promotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    WrongTurn,
    IllegalDestination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveResult {
    Accepted { effect: MoveEffect },
    Rejected { reason: RejectReason },
}

impl MoveResult {
    pub fn effect(&self) -> Option<MoveEffect> {
        match self {
            MoveResult::Accepted { effect } => Some(*effect),
            MoveResult::Rejected { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    /// The given side is in check and has at least one legal move.
    Check(Color),
    Checkmate { winner: Color },
    Stalemate,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing"),
            GameStatus::Check(color) => write!(f, "{color} is in check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// One accepted move, kept in memory for the lifetime of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// Ply at which the move was played (0 = White's first move).
    pub ply: u32,
    pub piece: PieceId,
    pub kind: PieceKind,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceId>,
    pub effect: MoveEffect,
    pub rook_relocation: Option<(Square, Square)>,
    pub promoted_to: Option<PieceId>,
}
