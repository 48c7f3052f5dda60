//! Authoritative mutable position.
//!
//! `BoardState` owns every live piece. It stores an 8x8 occupancy grid of
//! piece identities, a per-color registry from piece name to piece data, and
//! the ply counter. The grid and the registries are only mutated together,
//! so a square is occupied iff exactly one registered piece claims it.
//!
//! Cloning a `BoardState` produces a fully independent copy; the legality
//! filter relies on this to test hypothetical positions.

use std::collections::BTreeMap;

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::{
    pawn_name, piece_name, BACK_RANK, FIRST_PROMOTED_QUEEN_ORDINAL,
};
use crate::game_state::chess_types::{CastleSide, Color, PieceKind, Square};
use crate::game_state::piece::{Piece, PieceId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardState {
    grid: [[Option<PieceId>; 8]; 8],
    registry: [BTreeMap<String, Piece>; 2],
    ply: u32,
}

impl BoardState {
    /// Board without any pieces, White to move.
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard opening arrangement, White to move.
    pub fn standard() -> Self {
        let mut board = Self::new_empty();
        for color in Color::ALL {
            for (col, (kind, ordinal)) in BACK_RANK.iter().enumerate() {
                let square = Square::new(color.home_row(), col as u8);
                board.insert(Piece::new(piece_name(*kind, *ordinal as u32), *kind, color, square));
            }
            for col in 0..8u8 {
                let square = Square::new(color.pawn_row(), col);
                board.insert(Piece::new(pawn_name(col), PieceKind::Pawn, color, square));
            }
        }
        board
    }

    /// Register a piece, checking the square is on the board and free and
    /// that the name is unused for its color.
    pub fn place(&mut self, piece: Piece) -> ChessResult<()> {
        if !piece.square.is_on_board() {
            return Err(ChessErrors::OutOfBounds {
                row: piece.square.row as i32,
                col: piece.square.col as i32,
            });
        }
        if self.id_at(piece.square).is_some() {
            return Err(ChessErrors::SquareOccupied(piece.square));
        }
        if self.registry[piece.color.index()].contains_key(&piece.name) {
            return Err(ChessErrors::DuplicatePieceName(piece.id()));
        }
        self.insert(piece);
        Ok(())
    }

    /// Convenience wrapper over [`BoardState::place`] taking signed
    /// coordinates, for hand-built test positions.
    pub fn add_piece(
        &mut self,
        color: Color,
        kind: PieceKind,
        name: &str,
        row: i32,
        col: i32,
    ) -> ChessResult<()> {
        let square = Square::try_new(row, col).ok_or(ChessErrors::OutOfBounds { row, col })?;
        self.place(Piece::new(name, kind, color, square))
    }

    fn insert(&mut self, piece: Piece) {
        self.grid[piece.square.row as usize][piece.square.col as usize] = Some(piece.id());
        self.registry[piece.color.index()].insert(piece.name.clone(), piece);
    }

    /// Unregister a piece and clear its square.
    pub fn remove(&mut self, id: &PieceId) -> Option<Piece> {
        let piece = self.registry[id.color.index()].remove(&id.name)?;
        self.grid[piece.square.row as usize][piece.square.col as usize] = None;
        Some(piece)
    }

    /// Move a registered piece to an empty square. Captures must be removed
    /// beforehand.
    pub(crate) fn relocate(&mut self, id: &PieceId, to: Square) -> ChessResult<()> {
        if self.id_at(to).is_some_and(|occupant| occupant != id) {
            return Err(ChessErrors::SquareOccupied(to));
        }
        let piece = self.registry[id.color.index()]
            .get_mut(&id.name)
            .ok_or_else(|| ChessErrors::UnknownPiece(id.clone()))?;
        let from = piece.square;
        piece.square = to;
        self.grid[from.row as usize][from.col as usize] = None;
        self.grid[to.row as usize][to.col as usize] = Some(id.clone());
        Ok(())
    }

    pub fn piece(&self, color: Color, name: &str) -> Option<&Piece> {
        self.registry[color.index()].get(name)
    }

    pub(crate) fn piece_mut(&mut self, id: &PieceId) -> Option<&mut Piece> {
        self.registry[id.color.index()].get_mut(&id.name)
    }

    pub fn id_at(&self, square: Square) -> Option<&PieceId> {
        self.grid
            .get(square.row as usize)
            .and_then(|row| row.get(square.col as usize))
            .and_then(Option::as_ref)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        let id = self.id_at(square)?;
        self.piece(id.color, &id.name)
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.id_at(square).is_none()
    }

    /// Pieces of one color, ordered by name.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.registry[color.index()].values()
    }

    pub fn piece_count(&self, color: Color) -> usize {
        self.registry[color.index()].len()
    }

    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces(color).find(|piece| piece.kind == PieceKind::King)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.king(color).map(|king| king.square)
    }

    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Override the ply counter, e.g. to hand a custom position to Black.
    pub fn set_ply(&mut self, ply: u32) {
        self.ply = ply;
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        Color::from_ply(self.ply)
    }

    pub(crate) fn advance_ply(&mut self) {
        self.ply += 1;
    }

    pub(crate) fn clear_en_passant_flags(&mut self) {
        for registry in self.registry.iter_mut() {
            for piece in registry.values_mut() {
                piece.en_passant_eligible = false;
            }
        }
    }

    /// Drop one castle right from `color`'s king (no-op without a king).
    pub(crate) fn revoke_castle_right(&mut self, color: Color, side: CastleSide) {
        if let Some(king) = self.registry[color.index()]
            .values_mut()
            .find(|piece| piece.kind == PieceKind::King)
        {
            king.castle_rights.revoke(side);
        }
    }

    /// `Queen{n}` with the smallest free `n`, starting at 3.
    pub fn next_queen_name(&self, color: Color) -> String {
        (FIRST_PROMOTED_QUEEN_ORDINAL..)
            .map(|ordinal| piece_name(PieceKind::Queen, ordinal))
            .find(|name| !self.registry[color.index()].contains_key(name))
            .unwrap_or_else(|| piece_name(PieceKind::Queen, FIRST_PROMOTED_QUEEN_ORDINAL))
    }

    /// Check the structural invariants: one king per color, and the grid and
    /// registries describe the same set of pieces.
    pub fn validate(&self) -> ChessResult<()> {
        for color in Color::ALL {
            match self.pieces(color).filter(|p| p.kind == PieceKind::King).count() {
                0 => return Err(ChessErrors::MissingKing(color)),
                1 => {}
                _ => return Err(ChessErrors::MultipleKings(color)),
            }
        }

        let mut claimed = 0usize;
        for color in Color::ALL {
            for piece in self.pieces(color) {
                match self.id_at(piece.square) {
                    Some(id) if id.color == color && id.name == piece.name => claimed += 1,
                    _ => {
                        return Err(ChessErrors::InvariantViolation(format!(
                            "{} claims {} but the grid disagrees",
                            piece.id(),
                            piece.square
                        )))
                    }
                }
            }
        }

        let occupied = self.grid.iter().flatten().filter(|cell| cell.is_some()).count();
        if occupied != claimed {
            return Err(ChessErrors::InvariantViolation(format!(
                "{occupied} occupied squares but {claimed} registered pieces"
            )));
        }
        Ok(())
    }
}
