//! Side-wide attack and defence maps.
//!
//! These run the move generator for every piece of one side in "future"
//! mode: nothing is cached, nothing is filtered for legality, and the board
//! is only read. The legality filter calls them on hypothetical boards.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Color, PieceKind, Square, SquareSet};
use crate::move_generation::move_generator::{geometric_moves, piece_attack_cells, CellClass};

/// Every square `attacker_color` attacks.
pub fn attacked_squares(board: &BoardState, attacker_color: Color) -> SquareSet {
    board
        .pieces(attacker_color)
        .fold(SquareSet::EMPTY, |acc, piece| {
            acc.union(piece_attack_cells(board, piece.square))
        })
}

/// Squares of `color`'s own pieces that another `color` piece could recapture on.
pub fn defended_squares(board: &BoardState, color: Color) -> SquareSet {
    board.pieces(color).fold(SquareSet::EMPTY, |acc, piece| {
        acc.union(geometric_moves(board, piece).squares_of(CellClass::BlockedOwn))
    })
}

pub fn is_square_attacked(board: &BoardState, square: Square, attacker_color: Color) -> bool {
    board
        .pieces(attacker_color)
        .any(|piece| piece_attack_cells(board, piece.square).contains(square))
}

#[inline]
pub fn is_king_in_check(board: &BoardState, color: Color) -> bool {
    let Some(king_sq) = board.king_square(color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// Pieces of `attacker_color` attacking `square`, by square and kind.
pub fn attackers_to_square(
    board: &BoardState,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    board
        .pieces(attacker_color)
        .filter(|piece| piece_attack_cells(board, piece.square).contains(square))
        .map(|piece| (piece.square, piece.kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_attack_map_covers_the_third_rank() {
        let board = BoardState::standard();
        let attacked = attacked_squares(&board, Color::White);
        for col in 0..8 {
            assert!(attacked.contains(Square::new(2, col)));
        }
        assert!(!attacked.contains(Square::new(3, 4)));
        assert!(!is_king_in_check(&board, Color::White));
        assert!(!is_king_in_check(&board, Color::Black));
    }

    #[test]
    fn defended_squares_follow_recapture_geometry() {
        let mut board = BoardState::new_empty();
        board
            .add_piece(Color::Black, PieceKind::Rook, "Rook1", 7, 4)
            .expect("place rook");
        board
            .add_piece(Color::Black, PieceKind::Knight, "Knight1", 1, 4)
            .expect("place knight");
        board
            .add_piece(Color::Black, PieceKind::Bishop, "Bishop1", 1, 6)
            .expect("place bishop");

        let defended = defended_squares(&board, Color::Black);
        assert!(defended.contains(Square::new(1, 4)));
        assert!(!defended.contains(Square::new(1, 6)));
        assert!(!defended.contains(Square::new(7, 4)));
    }

    #[test]
    fn attackers_to_square_lists_every_attacker() {
        let mut board = BoardState::new_empty();
        board
            .add_piece(Color::White, PieceKind::King, "King1", 0, 3)
            .expect("place king");
        board
            .add_piece(Color::Black, PieceKind::Rook, "Rook1", 7, 3)
            .expect("place rook");
        board
            .add_piece(Color::Black, PieceKind::Knight, "Knight1", 2, 4)
            .expect("place knight");
        board
            .add_piece(Color::Black, PieceKind::Bishop, "Bishop1", 4, 7)
            .expect("place bishop");

        let attackers = attackers_to_square(&board, Square::new(0, 3), Color::Black);
        assert_eq!(attackers.len(), 3);
        assert!(is_king_in_check(&board, Color::White));
    }
}
