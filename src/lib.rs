//! Crate root module declarations for the Plum Rules chess engine.
//!
//! This file exposes the rules subsystems (board state, piece templates, move
//! generation, legality filtering and the turn controller) plus the diagnostic
//! utilities, so binaries, benches and an external presentation layer can
//! import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod board_state;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod piece;
}

pub mod moves {
    pub mod piece_templates;
}

pub mod move_generation {
    pub mod attack_map;
    pub mod legal_move_apply;
    pub mod legal_move_table;
    pub mod legality_filter;
    pub mod move_generator;
}

pub mod game {
    pub mod chess_game;
    pub mod move_result;
}

pub mod utils {
    pub mod render_board;
    pub mod self_play;
}

pub use errors::{ChessErrors, ChessResult};
pub use game::chess_game::ChessGame;
pub use game::move_result::{GameStatus, MoveEffect, MoveRecord, MoveResult, RejectReason};
pub use game_state::board_state::BoardState;
pub use game_state::chess_types::{CastleSide, Color, PieceKind, Square};
pub use game_state::piece::{Piece, PieceId};
