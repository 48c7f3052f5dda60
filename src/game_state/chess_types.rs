//! Primitive chess types shared by every subsystem: sides, piece kinds,
//! board coordinates, castling sides/rights and a compact square set.

use std::fmt;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Even plies belong to White, odd plies to Black.
    #[inline]
    pub const fn from_ply(ply: u32) -> Self {
        if ply % 2 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    #[inline]
    pub const fn pawn_row(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Farthest rank from the home row; pawns promote here.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row delta of a pawn step.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Piece kind (color is represented separately).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Rook,
    Bishop,
    Knight,
    King,
    Queen,
}

impl PieceKind {
    /// Rooks, bishops and queens move along rays stopped by the first blocker.
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen)
    }

    /// Base used for the default piece names (`Rook1`, `Queen3`, ...).
    pub const fn label(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::King => "King",
            PieceKind::Queen => "Queen",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Board coordinate. Row 0 is White's home rank, row 7 is Black's.
///
/// Field order makes the derived `Ord` row-major, which is the order legal
/// destination sets are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Build a square from in-range coordinates (`0..=7` each).
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Build a square from possibly out-of-range coordinates.
    #[inline]
    pub const fn try_new(row: i32, col: i32) -> Option<Self> {
        if row < 0 || row > 7 || col < 0 || col > 7 {
            return None;
        }
        Some(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row < 8 && self.col < 8
    }

    /// Neighbouring square `(dr, dc)` away, if it is still on the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        Self::try_new(self.row as i32 + dr as i32, self.col as i32 + dc as i32)
    }

    /// Bit index used by [`SquareSet`] (`row * 8 + col`).
    #[inline]
    pub const fn bit_index(self) -> u32 {
        (self.row as u32) * 8 + self.col as u32
    }

    #[inline]
    pub const fn from_bit_index(index: u32) -> Self {
        Self {
            row: (index / 8) as u8,
            col: (index % 8) as u8,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Column of both kings in the standard arrangement.
pub const KING_HOME_COL: u8 = 3;

/// Which rook a king castles with. Queenside is the column-0 rook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Queenside,
    Kingside,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::Queenside, CastleSide::Kingside];

    #[inline]
    pub const fn rook_col(self) -> u8 {
        match self {
            CastleSide::Queenside => 0,
            CastleSide::Kingside => 7,
        }
    }

    /// Two files from the king's home square toward the rook.
    #[inline]
    pub const fn king_destination_col(self) -> u8 {
        match self {
            CastleSide::Queenside => KING_HOME_COL - 2,
            CastleSide::Kingside => KING_HOME_COL + 2,
        }
    }

    /// The square the king passes over, next to its destination.
    #[inline]
    pub const fn rook_destination_col(self) -> u8 {
        match self {
            CastleSide::Queenside => KING_HOME_COL - 1,
            CastleSide::Kingside => KING_HOME_COL + 1,
        }
    }

    pub const fn from_king_destination_col(col: u8) -> Option<Self> {
        if col == CastleSide::Queenside.king_destination_col() {
            Some(CastleSide::Queenside)
        } else if col == CastleSide::Kingside.king_destination_col() {
            Some(CastleSide::Kingside)
        } else {
            None
        }
    }

    pub const fn from_rook_col(col: u8) -> Option<Self> {
        match col {
            0 => Some(CastleSide::Queenside),
            7 => Some(CastleSide::Kingside),
            _ => None,
        }
    }

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            CastleSide::Queenside => CASTLE_QUEENSIDE,
            CastleSide::Kingside => CASTLE_KINGSIDE,
        }
    }
}

impl fmt::Display for CastleSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastleSide::Queenside => write!(f, "queenside"),
            CastleSide::Kingside => write!(f, "kingside"),
        }
    }
}

pub const CASTLE_QUEENSIDE: u8 = 1 << 0;
pub const CASTLE_KINGSIDE: u8 = 1 << 1;

/// Per-king castling rights bitmask. Bits are only ever cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights(u8);

impl CastleRights {
    pub const NONE: CastleRights = CastleRights(0);
    pub const ALL: CastleRights = CastleRights(CASTLE_QUEENSIDE | CASTLE_KINGSIDE);

    #[inline]
    pub const fn allows(self, side: CastleSide) -> bool {
        self.0 & side.bit() != 0
    }

    #[inline]
    pub fn revoke(&mut self, side: CastleSide) {
        self.0 &= !side.bit();
    }

    #[inline]
    pub fn revoke_all(&mut self) {
        self.0 = 0;
    }
}

/// Set of board squares packed into a bitboard (`bit = row * 8 + col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    pub const EMPTY: SquareSet = SquareSet(0);

    #[inline]
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u64 << square.bit_index();
    }

    #[inline]
    pub const fn contains(self, square: Square) -> bool {
        square.is_on_board() && (self.0 & (1u64 << square.bit_index())) != 0
    }

    #[inline]
    pub const fn union(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 | other.0)
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Square> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let index = bits.trailing_zeros();
            bits &= bits - 1;
            Some(Square::from_bit_index(index))
        })
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}
