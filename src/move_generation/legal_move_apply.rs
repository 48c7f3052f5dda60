//! Applying a move to a board.
//!
//! `apply_move` performs every board effect of a move: capture (including the
//! passed pawn of an en-passant capture), castling rook relocation, pawn
//! two-step eligibility, promotion to a queen and castle-right bookkeeping.
//! It does not validate legality and does not advance the ply counter; the
//! turn controller does both. The legality filter runs it on cloned boards.

use crate::errors::{ChessErrors, ChessResult};
use crate::game::move_result::MoveEffect;
use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{CastleSide, PieceKind, Square};
use crate::game_state::piece::{Piece, PieceId};
use crate::move_generation::move_generator::en_passant_victim;

/// Board-level outcome of an applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub effect: MoveEffect,
    pub from: Square,
    pub to: Square,
    pub captured: Option<PieceId>,
    pub rook_relocation: Option<(Square, Square)>,
    pub promoted_to: Option<PieceId>,
}

/// The castle a king move onto `to` performs, if any: an unmoved king moving
/// two files along its home rank.
pub fn castle_side(piece: &Piece, to: Square) -> Option<CastleSide> {
    let home_row = piece.color.home_row();
    if piece.kind != PieceKind::King
        || piece.has_moved
        || piece.square.row != home_row
        || to.row != home_row
        || piece.square.col.abs_diff(to.col) != 2
    {
        return None;
    }
    CastleSide::from_king_destination_col(to.col)
}

pub fn apply_move(board: &mut BoardState, id: &PieceId, to: Square) -> ChessResult<AppliedMove> {
    let piece = board
        .piece(id.color, &id.name)
        .cloned()
        .ok_or_else(|| ChessErrors::UnknownPiece(id.clone()))?;
    let from = piece.square;

    let castle = castle_side(&piece, to);
    let en_passant = en_passant_victim(board, &piece, to).map(|victim| victim.id());
    let double_step =
        piece.kind == PieceKind::Pawn && from.col == to.col && from.row.abs_diff(to.row) == 2;
    let promotes = piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row();

    // Eligibility lasts exactly one opposing turn, used or not.
    board.clear_en_passant_flags();

    let captured = match &en_passant {
        Some(victim) => board.remove(victim),
        None => match board.id_at(to).cloned() {
            Some(occupant) => board.remove(&occupant),
            None => None,
        },
    };
    if let Some(taken) = &captured {
        if taken.kind == PieceKind::Rook && taken.square.row == taken.color.home_row() {
            if let Some(side) = CastleSide::from_rook_col(taken.square.col) {
                board.revoke_castle_right(taken.color, side);
            }
        }
    }

    board.relocate(id, to)?;
    if let Some(moved) = board.piece_mut(id) {
        moved.has_moved = true;
        moved.en_passant_eligible = double_step;
        if moved.kind == PieceKind::King {
            moved.castle_rights.revoke_all();
        }
    }
    if piece.kind == PieceKind::Rook && from.row == piece.color.home_row() {
        if let Some(side) = CastleSide::from_rook_col(from.col) {
            board.revoke_castle_right(piece.color, side);
        }
    }

    let mut rook_relocation = None;
    if let Some(side) = castle {
        let rook_from = Square::new(from.row, side.rook_col());
        let rook_to = Square::new(from.row, side.rook_destination_col());
        let rook = board.id_at(rook_from).cloned().ok_or_else(|| {
            ChessErrors::InvariantViolation(format!("no rook on {rook_from} to castle with"))
        })?;
        board.relocate(&rook, rook_to)?;
        if let Some(rook) = board.piece_mut(&rook) {
            rook.has_moved = true;
        }
        rook_relocation = Some((rook_from, rook_to));
    }

    let mut promoted_to = None;
    if promotes {
        board.remove(id);
        let queen = Piece::new(
            board.next_queen_name(piece.color),
            PieceKind::Queen,
            piece.color,
            to,
        )
        .moved();
        promoted_to = Some(queen.id());
        board.place(queen)?;
    }

    let effect = if let Some(side) = castle {
        MoveEffect::Castle(side)
    } else if en_passant.is_some() {
        MoveEffect::EnPassant
    } else if promotes {
        MoveEffect::Promotion
    } else {
        MoveEffect::Plain
    };

    Ok(AppliedMove {
        effect,
        from,
        to,
        captured: captured.map(|taken| taken.id()),
        rook_relocation,
        promoted_to,
    })
}
