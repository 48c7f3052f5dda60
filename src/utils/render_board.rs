//! Terminal-oriented Unicode board renderer.
//!
//! Diagnostic view of a `BoardState` for tests, logs and the self-play
//! binary. Row 7 is printed on top; row and column indices run along the
//! margins.

use crate::game_state::board_state::BoardState;
use crate::game_state::chess_types::{Color, PieceKind, Square};

pub fn render_board(board: &BoardState) -> String {
    let mut out = String::new();

    out.push_str("  0 1 2 3 4 5 6 7\n");

    for row in (0..8u8).rev() {
        out.push(char::from(b'0' + row));
        out.push(' ');

        for col in 0..8u8 {
            match board.piece_at(Square::new(row, col)) {
                Some(piece) => out.push(piece_to_unicode(piece.color, piece.kind)),
                None => out.push('·'),
            }

            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'0' + row));
        out.push('\n');
    }

    out.push_str("  0 1 2 3 4 5 6 7");

    out
}

fn piece_to_unicode(color: Color, kind: PieceKind) -> char {
    match (color, kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}
