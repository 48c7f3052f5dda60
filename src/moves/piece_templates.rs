//! Static per-kind move/attack geometry.
//!
//! Every template is a 15x15 grid centered on the piece (cell `[7][7]` is the
//! origin, `[7 + dr][7 + dc]` the cell `dr` rows and `dc` columns away). The
//! 8x8 window around any board square is a plain slice of that grid, so board
//! edges are clipped in one step and no per-offset bounds checks are needed.
//!
//! Sliding kinds mark the full length of every ray; stopping at the first
//! blocker is the move generator's job.

use crate::game_state::chess_types::{Color, PieceKind, Square};

pub const TEMPLATE_SIZE: usize = 15;
pub const TEMPLATE_CENTER: usize = 7;

pub type TemplateGrid = [[bool; TEMPLATE_SIZE]; TEMPLATE_SIZE];
pub type BoardWindow = [[bool; 8]; 8];

/// Move and attack geometry of one piece kind (and color, for pawns).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceTemplate {
    /// Cells reachable onto an empty square.
    pub moves: TemplateGrid,
    /// Cells reachable onto an enemy.
    pub attacks: TemplateGrid,
    /// Pawns only: forward cells usable before the pawn has moved.
    pub first_move: Option<TemplateGrid>,
}

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, -1),
    (2, 1),
    (1, -2),
    (-1, -2),
    (1, 2),
    (-2, 1),
    (-1, 2),
    (-2, -1),
];

const KING_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 0),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

pub static ROOK_TEMPLATE: PieceTemplate = PieceTemplate::symmetric(straight_lines());
pub static BISHOP_TEMPLATE: PieceTemplate = PieceTemplate::symmetric(diagonal_lines());
pub static QUEEN_TEMPLATE: PieceTemplate =
    PieceTemplate::symmetric(merge_grids(straight_lines(), diagonal_lines()));
pub static KNIGHT_TEMPLATE: PieceTemplate = PieceTemplate::symmetric(offsets(&KNIGHT_OFFSETS));
pub static KING_TEMPLATE: PieceTemplate = PieceTemplate::symmetric(offsets(&KING_OFFSETS));
pub static WHITE_PAWN_TEMPLATE: PieceTemplate = pawn_template(1);
pub static BLACK_PAWN_TEMPLATE: PieceTemplate = pawn_template(-1);

impl PieceTemplate {
    /// Template whose attack geometry equals its move geometry.
    const fn symmetric(grid: TemplateGrid) -> Self {
        Self {
            moves: grid,
            attacks: grid,
            first_move: None,
        }
    }

    pub fn for_piece(kind: PieceKind, color: Color) -> &'static PieceTemplate {
        match kind {
            PieceKind::Pawn => match color {
                Color::White => &WHITE_PAWN_TEMPLATE,
                Color::Black => &BLACK_PAWN_TEMPLATE,
            },
            PieceKind::Rook => &ROOK_TEMPLATE,
            PieceKind::Bishop => &BISHOP_TEMPLATE,
            PieceKind::Knight => &KNIGHT_TEMPLATE,
            PieceKind::King => &KING_TEMPLATE,
            PieceKind::Queen => &QUEEN_TEMPLATE,
        }
    }

    /// Slice the board-aligned 8x8 window of `grid` for a piece on `origin`.
    /// `window[r][c]` tells whether board cell `(r, c)` is marked.
    pub fn window(grid: &TemplateGrid, origin: Square) -> BoardWindow {
        let row_start = TEMPLATE_CENTER - origin.row as usize;
        let col_start = TEMPLATE_CENTER - origin.col as usize;
        let mut out = [[false; 8]; 8];
        for (out_row, template_row) in out.iter_mut().zip(&grid[row_start..row_start + 8]) {
            out_row.copy_from_slice(&template_row[col_start..col_start + 8]);
        }
        out
    }

    /// Forward geometry for a pawn; the first-move template applies while the
    /// two-step is still available.
    pub fn pawn_advance(&self, two_step_available: bool) -> &TemplateGrid {
        match (&self.first_move, two_step_available) {
            (Some(first), true) => first,
            _ => &self.moves,
        }
    }
}

/// Ray directions of a sliding kind; empty for non-sliders.
pub fn ray_directions(kind: PieceKind) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::Rook => &ROOK_DIRECTIONS,
        PieceKind::Bishop => &BISHOP_DIRECTIONS,
        PieceKind::Queen => &QUEEN_DIRECTIONS,
        _ => &[],
    }
}

/// Board cells marked in a window, row-major.
pub fn window_squares(window: &BoardWindow) -> impl Iterator<Item = Square> + '_ {
    window.iter().enumerate().flat_map(|(row, cells)| {
        cells
            .iter()
            .enumerate()
            .filter(|(_, marked)| **marked)
            .map(move |(col, _)| Square::new(row as u8, col as u8))
    })
}

const fn empty_grid() -> TemplateGrid {
    [[false; TEMPLATE_SIZE]; TEMPLATE_SIZE]
}

const fn straight_lines() -> TemplateGrid {
    let mut grid = empty_grid();
    let mut i = 0usize;
    while i < TEMPLATE_SIZE {
        grid[TEMPLATE_CENTER][i] = true;
        grid[i][TEMPLATE_CENTER] = true;
        i += 1;
    }
    grid[TEMPLATE_CENTER][TEMPLATE_CENTER] = false;
    grid
}

const fn diagonal_lines() -> TemplateGrid {
    let mut grid = empty_grid();
    let mut i = 0usize;
    while i < TEMPLATE_SIZE {
        grid[i][i] = true;
        grid[i][TEMPLATE_SIZE - 1 - i] = true;
        i += 1;
    }
    grid[TEMPLATE_CENTER][TEMPLATE_CENTER] = false;
    grid
}

const fn merge_grids(a: TemplateGrid, b: TemplateGrid) -> TemplateGrid {
    let mut grid = empty_grid();
    let mut r = 0usize;
    while r < TEMPLATE_SIZE {
        let mut c = 0usize;
        while c < TEMPLATE_SIZE {
            grid[r][c] = a[r][c] || b[r][c];
            c += 1;
        }
        r += 1;
    }
    grid
}

const fn offsets(deltas: &[(i32, i32)]) -> TemplateGrid {
    let mut grid = empty_grid();
    let mut i = 0usize;
    while i < deltas.len() {
        let (dr, dc) = deltas[i];
        grid[(TEMPLATE_CENTER as i32 + dr) as usize][(TEMPLATE_CENTER as i32 + dc) as usize] =
            true;
        i += 1;
    }
    grid
}

const fn pawn_template(forward: i32) -> PieceTemplate {
    PieceTemplate {
        moves: offsets(&[(forward, 0)]),
        attacks: offsets(&[(forward, -1), (forward, 1)]),
        first_move: Some(offsets(&[(forward, 0), (2 * forward, 0)])),
    }
}
