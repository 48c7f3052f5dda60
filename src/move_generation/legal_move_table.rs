//! Per-color tables of legal destinations, keyed by piece name.
//!
//! The turn controller recomputes both tables after every accepted move and
//! answers `legal_moves` queries from them. Pieces without a legal move still
//! get an (empty) entry, so the table doubles as the side's roster.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::errors::ChessResult;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Color, Square};
use crate::move_generation::legality_filter::legal_destinations;

pub type LegalMoveTable = BTreeMap<String, BTreeSet<Square>>;

pub fn compute_legal_move_table(board: &BoardState, color: Color) -> ChessResult<LegalMoveTable> {
    let mut table = LegalMoveTable::new();
    for piece in board.pieces(color) {
        let destinations = legal_destinations(board, &piece.id())?;
        trace!(
            piece = %piece.id(),
            from = %piece.square,
            count = destinations.len(),
            "legal destinations"
        );
        table.insert(piece.name.clone(), destinations);
    }
    Ok(table)
}

/// Total number of legal moves in a table.
pub fn legal_move_count(table: &LegalMoveTable) -> usize {
    table.values().map(BTreeSet::len).sum()
}

#[inline]
pub fn has_any_legal_move(table: &LegalMoveTable) -> bool {
    table.values().any(|destinations| !destinations.is_empty())
}
