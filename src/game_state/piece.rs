//! Piece identity and per-piece live data.
//!
//! A piece is owned by the `BoardState` registry of its color and addressed by
//! `PieceId`, the `(color, name)` pair.

use std::fmt;

use crate::game_state::chess_types::{CastleRights, Color, PieceKind, Square};

/// Stable identity of a piece. Names are unique per color only, so the
/// identity is the `(color, name)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId {
    pub color: Color,
    pub name: String,
}

impl PieceId {
    pub fn new(color: Color, name: impl Into<String>) -> Self {
        Self {
            color,
            name: name.into(),
        }
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.name)
    }
}

/// Live data of one registered piece.
///
/// Whether a piece is defended, or a king is in check, is derived from the
/// attack map each time it is needed and is not stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub name: String,
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub has_moved: bool,
    /// Pawns only: set by a two-square advance, cleared after one opposing turn.
    pub en_passant_eligible: bool,
    /// Kings only.
    pub castle_rights: CastleRights,
}

impl Piece {
    pub fn new(name: impl Into<String>, kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            name: name.into(),
            kind,
            color,
            square,
            has_moved: false,
            en_passant_eligible: false,
            castle_rights: if kind == PieceKind::King {
                CastleRights::ALL
            } else {
                CastleRights::NONE
            },
        }
    }

    /// Mark the piece as already moved (for hand-built positions).
    pub fn moved(mut self) -> Self {
        self.has_moved = true;
        self.castle_rights.revoke_all();
        self
    }

    pub fn id(&self) -> PieceId {
        PieceId::new(self.color, self.name.clone())
    }

    #[inline]
    pub fn is(&self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::CastleSide;

    #[test]
    fn new_kings_start_with_both_castle_rights() {
        let king = Piece::new("King1", PieceKind::King, Color::White, Square::new(0, 3));
        assert!(king.castle_rights.allows(CastleSide::Queenside));
        assert!(king.castle_rights.allows(CastleSide::Kingside));

        let rook = Piece::new("Rook1", PieceKind::Rook, Color::White, Square::new(0, 0));
        assert_eq!(rook.castle_rights, CastleRights::NONE);
    }

    #[test]
    fn moved_builder_clears_castle_rights() {
        let king = Piece::new("King1", PieceKind::King, Color::Black, Square::new(7, 3)).moved();
        assert!(king.has_moved);
        assert_eq!(king.castle_rights, CastleRights::NONE);
    }

    #[test]
    fn identity_distinguishes_same_name_across_colors() {
        let white = Piece::new("Pawn1", PieceKind::Pawn, Color::White, Square::new(1, 0));
        let black = Piece::new("Pawn1", PieceKind::Pawn, Color::Black, Square::new(6, 0));
        assert_ne!(white.id(), black.id());
        assert_eq!(white.id().to_string(), "White Pawn1");
    }
}
