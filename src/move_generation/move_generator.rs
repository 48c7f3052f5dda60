//! Pseudo-legal move generation for a single piece.
//!
//! `generate_piece_moves` classifies every board cell relative to one piece:
//! `OpenMove` (empty and reachable), `Capture` (enemy and reachable as an
//! attack) or `BlockedOwn` (friendly piece on a reachable cell; not a
//! destination, but that piece is defended). King safety is NOT considered
//! here; see `legality_filter`.
//!
//! Generation reads the board only. The same routine serves live move tables
//! and the "future" attack maps computed on hypothetical boards.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{CastleSide, PieceKind, Square, SquareSet, KING_HOME_COL};
use crate::game_state::piece::Piece;
use crate::moves::piece_templates::{ray_directions, window_squares, PieceTemplate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellClass {
    BlockedOwn,
    Capture,
    OpenMove,
}

/// Per-cell classification for one piece; unmarked cells are non-candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveMatrix {
    cells: [[Option<CellClass>; 8]; 8],
}

impl MoveMatrix {
    #[inline]
    pub fn get(&self, square: Square) -> Option<CellClass> {
        self.cells
            .get(square.row as usize)
            .and_then(|row| row.get(square.col as usize))
            .copied()
            .flatten()
    }

    #[inline]
    pub fn set(&mut self, square: Square, class: CellClass) {
        self.cells[square.row as usize][square.col as usize] = Some(class);
    }

    /// Marked cells, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Square, CellClass)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, class)| {
                class.map(|class| (Square::new(row as u8, col as u8), class))
            })
        })
    }

    /// Pseudo-legal destinations: `OpenMove` and `Capture` cells.
    pub fn destinations(&self) -> impl Iterator<Item = Square> + '_ {
        self.iter()
            .filter(|(_, class)| matches!(class, CellClass::OpenMove | CellClass::Capture))
            .map(|(square, _)| square)
    }

    pub fn squares_of(&self, class: CellClass) -> SquareSet {
        self.iter()
            .filter(|(_, marked)| *marked == class)
            .map(|(square, _)| square)
            .collect()
    }

    pub fn marked(&self) -> SquareSet {
        self.iter().map(|(square, _)| square).collect()
    }
}

/// Classify every cell for the piece standing on `square`, including
/// castling destinations for an unmoved king. Empty squares yield an empty
/// matrix.
pub fn generate_piece_moves(board: &BoardState, square: Square) -> MoveMatrix {
    let Some(piece) = board.piece_at(square) else {
        return MoveMatrix::default();
    };

    let mut matrix = geometric_moves(board, piece);
    if piece.kind == PieceKind::King {
        for side in CastleSide::ALL {
            if castle_path_clear(board, piece, side) {
                let destination = Square::new(piece.color.home_row(), side.king_destination_col());
                matrix.set(destination, CellClass::OpenMove);
            }
        }
    }
    matrix
}

/// Cells the piece on `square` attacks: everything it could capture onto if
/// an enemy stood there. Pawn forward cells and castling cells never count;
/// pawn diagonals always do.
pub fn piece_attack_cells(board: &BoardState, square: Square) -> SquareSet {
    let Some(piece) = board.piece_at(square) else {
        return SquareSet::EMPTY;
    };

    match piece.kind {
        PieceKind::Pawn => {
            let template = PieceTemplate::for_piece(PieceKind::Pawn, piece.color);
            window_squares(&PieceTemplate::window(&template.attacks, piece.square)).collect()
        }
        _ => geometric_moves(board, piece).marked(),
    }
}

/// Template geometry filtered by occupancy, without castling.
pub(crate) fn geometric_moves(board: &BoardState, piece: &Piece) -> MoveMatrix {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, piece),
        kind if kind.is_slider() => sliding_moves(board, piece),
        _ => stepping_moves(board, piece),
    }
}

fn occupied_class(board: &BoardState, piece: &Piece, target: Square) -> Option<CellClass> {
    board.piece_at(target).map(|occupant| {
        if occupant.color == piece.color {
            CellClass::BlockedOwn
        } else {
            CellClass::Capture
        }
    })
}

/// Walk each ray outward; the first occupied cell ends the ray.
fn sliding_moves(board: &BoardState, piece: &Piece) -> MoveMatrix {
    let template = PieceTemplate::for_piece(piece.kind, piece.color);
    let reach = PieceTemplate::window(&template.moves, piece.square);
    let mut matrix = MoveMatrix::default();

    for &(dr, dc) in ray_directions(piece.kind) {
        let mut cursor = piece.square.offset(dr, dc);
        while let Some(target) = cursor {
            if !reach[target.row as usize][target.col as usize] {
                break;
            }
            match occupied_class(board, piece, target) {
                None => matrix.set(target, CellClass::OpenMove),
                Some(class) => {
                    matrix.set(target, class);
                    break;
                }
            }
            cursor = target.offset(dr, dc);
        }
    }

    matrix
}

fn stepping_moves(board: &BoardState, piece: &Piece) -> MoveMatrix {
    let template = PieceTemplate::for_piece(piece.kind, piece.color);
    let reach = PieceTemplate::window(&template.moves, piece.square);
    let mut matrix = MoveMatrix::default();

    for target in window_squares(&reach) {
        let class = occupied_class(board, piece, target).unwrap_or(CellClass::OpenMove);
        matrix.set(target, class);
    }

    matrix
}

fn pawn_moves(board: &BoardState, piece: &Piece) -> MoveMatrix {
    let template = PieceTemplate::for_piece(PieceKind::Pawn, piece.color);
    let mut matrix = MoveMatrix::default();

    // Forward cells: empty only, and the two-step needs the cell in between.
    // Only an unmoved pawn on its start rank may take the two-step.
    let on_start = !piece.has_moved && piece.square.row == piece.color.pawn_row();
    let advance = PieceTemplate::window(template.pawn_advance(on_start), piece.square);
    let forward = piece.color.forward();
    let mut cursor = piece.square.offset(forward, 0);
    while let Some(target) = cursor {
        if !advance[target.row as usize][target.col as usize] || !board.is_empty(target) {
            break;
        }
        matrix.set(target, CellClass::OpenMove);
        cursor = target.offset(forward, 0);
    }

    let attacks = PieceTemplate::window(&template.attacks, piece.square);
    for target in window_squares(&attacks) {
        match occupied_class(board, piece, target) {
            Some(class) => matrix.set(target, class),
            None => {
                if en_passant_victim(board, piece, target).is_some() {
                    matrix.set(target, CellClass::Capture);
                }
            }
        }
    }

    matrix
}

/// The enemy pawn an en-passant capture onto `target` would remove: it must
/// stand beside `pawn` on `target`'s file and still hold its eligibility.
pub(crate) fn en_passant_victim<'a>(
    board: &'a BoardState,
    pawn: &Piece,
    target: Square,
) -> Option<&'a Piece> {
    if pawn.kind != PieceKind::Pawn || target.col == pawn.square.col || !board.is_empty(target) {
        return None;
    }
    let beside = Square::new(pawn.square.row, target.col);
    board.piece_at(beside).filter(|victim| {
        victim.kind == PieceKind::Pawn
            && victim.color != pawn.color
            && victim.en_passant_eligible
            && target.row as i8 == pawn.square.row as i8 + pawn.color.forward()
    })
}

/// Geometric castling eligibility: unmoved king on its home square, right
/// still held, unmoved friendly rook on the corner, empty squares between.
/// Attack safety of the king's path is checked by the legality filter.
pub fn castle_path_clear(board: &BoardState, king: &Piece, side: CastleSide) -> bool {
    let home_row = king.color.home_row();
    if king.kind != PieceKind::King
        || king.has_moved
        || !king.castle_rights.allows(side)
        || king.square != Square::new(home_row, KING_HOME_COL)
    {
        return false;
    }

    let corner = Square::new(home_row, side.rook_col());
    let rook_ready = board
        .piece_at(corner)
        .is_some_and(|rook| rook.is(king.color, PieceKind::Rook) && !rook.has_moved);
    if !rook_ready {
        return false;
    }

    let (low, high) = match side {
        CastleSide::Queenside => (side.rook_col() + 1, KING_HOME_COL),
        CastleSide::Kingside => (KING_HOME_COL + 1, side.rook_col()),
    };
    (low..high).all(|col| board.is_empty(Square::new(home_row, col)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;
    use crate::game_state::piece::PieceId;

    fn board_with(pieces: &[(Color, PieceKind, &str, i32, i32)]) -> BoardState {
        let mut board = BoardState::new_empty();
        for (color, kind, name, row, col) in pieces {
            board
                .add_piece(*color, *kind, name, *row, *col)
                .expect("test placement should succeed");
        }
        board
    }

    #[test]
    fn pieces_behind_the_pawn_wall_have_no_moves() {
        let board = BoardState::standard();
        for square in [Square::new(0, 0), Square::new(0, 2), Square::new(0, 4)] {
            let matrix = generate_piece_moves(&board, square);
            assert_eq!(matrix.destinations().count(), 0);
        }
        let knight = generate_piece_moves(&board, Square::new(0, 1));
        let targets: Vec<Square> = knight.destinations().collect();
        assert_eq!(targets, vec![Square::new(2, 0), Square::new(2, 2)]);
    }

    #[test]
    fn rook_ray_stops_at_first_blocker() {
        let board = board_with(&[
            (Color::White, PieceKind::Rook, "Rook1", 0, 0),
            (Color::White, PieceKind::Pawn, "Pawn1", 3, 0),
            (Color::Black, PieceKind::Knight, "Knight1", 0, 4),
        ]);
        let matrix = generate_piece_moves(&board, Square::new(0, 0));

        assert_eq!(matrix.get(Square::new(2, 0)), Some(CellClass::OpenMove));
        assert_eq!(matrix.get(Square::new(3, 0)), Some(CellClass::BlockedOwn));
        assert_eq!(matrix.get(Square::new(4, 0)), None);
        assert_eq!(matrix.get(Square::new(0, 4)), Some(CellClass::Capture));
        assert_eq!(matrix.get(Square::new(0, 5)), None);
        assert_eq!(matrix.destinations().count(), 6);
    }

    #[test]
    fn adjacent_friend_hides_everything_beyond_it() {
        let board = board_with(&[
            (Color::Black, PieceKind::Queen, "Queen1", 4, 4),
            (Color::Black, PieceKind::Bishop, "Bishop1", 5, 5),
            (Color::Black, PieceKind::Rook, "Rook1", 4, 3),
        ]);
        let matrix = generate_piece_moves(&board, Square::new(4, 4));
        assert_eq!(matrix.get(Square::new(5, 5)), Some(CellClass::BlockedOwn));
        assert_eq!(matrix.get(Square::new(6, 6)), None);
        assert_eq!(matrix.get(Square::new(4, 3)), Some(CellClass::BlockedOwn));
        assert_eq!(matrix.get(Square::new(4, 0)), None);
    }

    #[test]
    fn pawn_two_step_needs_both_cells_empty() {
        let mut board = BoardState::standard();
        let first = generate_piece_moves(&board, Square::new(1, 4));
        assert_eq!(
            first.destinations().collect::<Vec<_>>(),
            vec![Square::new(2, 4), Square::new(3, 4)]
        );

        let knight = PieceId::new(Color::Black, "Knight2");
        board
            .relocate(&knight, Square::new(2, 4))
            .expect("knight lands in front of the pawn");
        let blocked = generate_piece_moves(&board, Square::new(1, 4));
        assert_eq!(blocked.destinations().count(), 0);
        assert_eq!(blocked.get(Square::new(2, 4)), None);
    }

    #[test]
    fn hand_placed_pawn_off_its_start_rank_steps_once() {
        let board = board_with(&[
            (Color::White, PieceKind::Pawn, "Pawn5", 4, 4),
            (Color::Black, PieceKind::Pawn, "Pawn1", 3, 0),
        ]);
        let white = generate_piece_moves(&board, Square::new(4, 4));
        assert_eq!(white.destinations().collect::<Vec<_>>(), vec![Square::new(5, 4)]);
        let black = generate_piece_moves(&board, Square::new(3, 0));
        assert_eq!(black.destinations().collect::<Vec<_>>(), vec![Square::new(2, 0)]);
    }

    #[test]
    fn pawn_diagonals_capture_enemies_and_defend_friends() {
        let board = board_with(&[
            (Color::White, PieceKind::Pawn, "Pawn4", 3, 3),
            (Color::Black, PieceKind::Bishop, "Bishop1", 4, 4),
            (Color::White, PieceKind::Knight, "Knight1", 4, 2),
            (Color::Black, PieceKind::Rook, "Rook1", 4, 3),
        ]);
        let matrix = generate_piece_moves(&board, Square::new(3, 3));
        assert_eq!(matrix.get(Square::new(4, 4)), Some(CellClass::Capture));
        assert_eq!(matrix.get(Square::new(4, 2)), Some(CellClass::BlockedOwn));
        assert_eq!(matrix.get(Square::new(4, 3)), None);
        assert_eq!(matrix.destinations().collect::<Vec<_>>(), vec![Square::new(4, 4)]);
    }

    #[test]
    fn en_passant_cell_is_a_capture_only_while_eligible() {
        let mut board = board_with(&[
            (Color::White, PieceKind::Pawn, "Pawn5", 4, 4),
            (Color::Black, PieceKind::Pawn, "Pawn4", 4, 3),
        ]);
        let black_pawn = PieceId::new(Color::Black, "Pawn4");
        board
            .piece_mut(&black_pawn)
            .expect("pawn registered")
            .en_passant_eligible = true;

        let matrix = generate_piece_moves(&board, Square::new(4, 4));
        assert_eq!(matrix.get(Square::new(5, 3)), Some(CellClass::Capture));

        board
            .piece_mut(&black_pawn)
            .expect("pawn registered")
            .en_passant_eligible = false;
        let matrix = generate_piece_moves(&board, Square::new(4, 4));
        assert_eq!(matrix.get(Square::new(5, 3)), None);
    }

    #[test]
    fn unmoved_king_gets_castle_cells_when_the_path_is_empty() {
        let board = board_with(&[
            (Color::White, PieceKind::King, "King1", 0, 3),
            (Color::White, PieceKind::Rook, "Rook1", 0, 0),
            (Color::White, PieceKind::Rook, "Rook2", 0, 7),
            (Color::White, PieceKind::Bishop, "Bishop2", 0, 5),
        ]);
        let matrix = generate_piece_moves(&board, Square::new(0, 3));
        assert_eq!(matrix.get(Square::new(0, 1)), Some(CellClass::OpenMove));
        assert_eq!(matrix.get(Square::new(0, 5)), None);
        assert_eq!(matrix.get(Square::new(0, 4)), Some(CellClass::OpenMove));

        let king = board.piece(Color::White, "King1").expect("king registered");
        assert!(castle_path_clear(&board, king, CastleSide::Queenside));
        assert!(!castle_path_clear(&board, king, CastleSide::Kingside));
    }

    #[test]
    fn moved_rook_blocks_castling() {
        let mut board = BoardState::new_empty();
        board
            .add_piece(Color::Black, PieceKind::King, "King1", 7, 3)
            .expect("place king");
        board
            .place(Piece::new("Rook1", PieceKind::Rook, Color::Black, Square::new(7, 0)).moved())
            .expect("place rook");
        let king = board.piece(Color::Black, "King1").expect("king registered");
        assert!(!castle_path_clear(&board, king, CastleSide::Queenside));
        let matrix = generate_piece_moves(&board, Square::new(7, 3));
        assert_eq!(matrix.get(Square::new(7, 1)), None);
    }

    #[test]
    fn pawn_attack_cells_include_empty_diagonals() {
        let board = board_with(&[(Color::Black, PieceKind::Pawn, "Pawn1", 6, 0)]);
        let cells = piece_attack_cells(&board, Square::new(6, 0));
        assert_eq!(cells.iter().collect::<Vec<_>>(), vec![Square::new(5, 1)]);
    }
}
