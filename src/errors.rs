//! Errors used throughout the rules engine.
//!
//! Illegal moves are NOT errors: `submit_move` reports them as ordinary
//! `MoveResult::Rejected` values. `ChessErrors` covers the two remaining
//! families:
//! - placement faults raised while building a custom position (occupied
//!   square, duplicate name, off-board coordinates, missing king, a king left
//!   capturable by the side to move);
//! - internal corruption (a cached legal-move table naming a piece that is no
//!   longer registered, a move applied to a piece that does not exist). These
//!   indicate bugs and are not intended to be recovered from by callers.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};
use crate::game_state::piece::PieceId;

/// Unified error type for the rules engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// A side has no king. Every position must hold exactly one per color.
    #[error("{0} has no king on the board")]
    MissingKing(Color),

    /// A side has more than one king.
    #[error("{0} has more than one king on the board")]
    MultipleKings(Color),

    /// The side not to move stands in check, so its king could be captured.
    #[error("{0} is in check but it is not {0}'s turn")]
    KingCapturable(Color),

    /// Tried to place a piece onto a square that already holds one.
    #[error("square {0} is already occupied")]
    SquareOccupied(Square),

    /// Piece names must be unique per color.
    #[error("piece name {0} is already registered")]
    DuplicatePieceName(PieceId),

    /// Coordinates outside `0..=7`.
    #[error("coordinates ({row}, {col}) are off the board")]
    OutOfBounds { row: i32, col: i32 },

    /// The named piece is not registered for its color.
    #[error("no registered piece named {0}")]
    UnknownPiece(PieceId),

    /// A cached legal-move table references a piece missing from the registry.
    #[error("legal-move table references missing piece {0}")]
    StaleLegalMoveEntry(PieceId),

    /// The occupancy grid and the piece registry disagree.
    #[error("board invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type alias for rules-engine operations.
pub type ChessResult<T> = Result<T, ChessErrors>;
