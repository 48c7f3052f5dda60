//! Canonical chess-rule constants.
//!
//! This module stores the standard opening arrangement used to initialize a
//! new game and the naming scheme for pieces created by promotion.

use crate::game_state::chess_types::PieceKind;

/// Back-rank layout by column, mirrored for both colors on their home rows.
/// Names are `label + ordinal` (`Rook1`, `Rook2`, ...).
pub const BACK_RANK: [(PieceKind, u8); 8] = [
    (PieceKind::Rook, 1),
    (PieceKind::Knight, 1),
    (PieceKind::Bishop, 1),
    (PieceKind::King, 1),
    (PieceKind::Queen, 1),
    (PieceKind::Bishop, 2),
    (PieceKind::Knight, 2),
    (PieceKind::Rook, 2),
];

/// First ordinal tried when naming a queen created by promotion.
pub const FIRST_PROMOTED_QUEEN_ORDINAL: u32 = 3;

pub fn piece_name(kind: PieceKind, ordinal: u32) -> String {
    format!("{}{}", kind.label(), ordinal)
}

/// Standard name of the pawn starting on `col` (`Pawn1` on column 0).
pub fn pawn_name(col: u8) -> String {
    piece_name(PieceKind::Pawn, col as u32 + 1)
}
