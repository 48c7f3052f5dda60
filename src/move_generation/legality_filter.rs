//! King-safety filtering of pseudo-legal moves.
//!
//! Each candidate is played on a cloned board and rejected when the mover's
//! king ends up attacked. Kings additionally may not capture a defended piece
//! and may not castle out of, through or into check. Filtering never fails on
//! a legal position; it only shrinks the candidate set.

use std::collections::BTreeSet;

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{CastleSide, PieceKind, Square, SquareSet};
use crate::game_state::piece::{Piece, PieceId};
use crate::move_generation::attack_map::{attacked_squares, defended_squares, is_king_in_check};
use crate::move_generation::legal_move_apply::{apply_move, castle_side};
use crate::move_generation::move_generator::generate_piece_moves;

/// Legal destinations of the piece `id`, in row-major order.
pub fn legal_destinations(board: &BoardState, id: &PieceId) -> ChessResult<BTreeSet<Square>> {
    let piece = board
        .piece(id.color, &id.name)
        .ok_or_else(|| ChessErrors::UnknownPiece(id.clone()))?;
    let candidates = generate_piece_moves(board, piece.square);
    let opponent = piece.color.opposite();

    let is_king = piece.kind == PieceKind::King;
    let defended = if is_king {
        defended_squares(board, opponent)
    } else {
        SquareSet::EMPTY
    };

    let mut legal = BTreeSet::new();
    for to in candidates.destinations() {
        // Kings are never captured; a position allowing it is refused at setup.
        if board
            .piece_at(to)
            .is_some_and(|target| target.is(opponent, PieceKind::King))
        {
            continue;
        }
        if is_king && defended.contains(to) {
            continue;
        }
        if let Some(side) = castle_side(piece, to) {
            if !castle_path_safe(board, piece, side) {
                continue;
            }
        }

        let mut hypothetical = board.clone();
        apply_move(&mut hypothetical, id, to)?;
        if is_king_in_check(&hypothetical, piece.color) {
            continue;
        }
        legal.insert(to);
    }

    Ok(legal)
}

/// No square the king occupies while castling (start, pass-through, end) may
/// be attacked by the opponent in the current position.
pub fn castle_path_safe(board: &BoardState, king: &Piece, side: CastleSide) -> bool {
    let attacked = attacked_squares(board, king.color.opposite());
    let row = king.square.row;
    let end = side.king_destination_col();
    let (low, high) = if end < king.square.col {
        (end, king.square.col)
    } else {
        (king.square.col, end)
    };
    (low..=high).all(|col| !attacked.contains(Square::new(row, col)))
}
