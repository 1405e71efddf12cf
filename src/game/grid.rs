//! Board geometry: linear cell indices on an N×N square grid.

use crate::error::{GameError, GameResult};

/// A row/column position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// Row, counted from the top.
    pub row: usize,
    /// Column, counted from the left.
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Linear index of this coordinate on a board of the given size.
    #[must_use]
    pub const fn to_index(self, board_size: usize) -> usize {
        self.row * board_size + self.col
    }
}

/// Map a cell index to its row and column.
///
/// # Errors
///
/// Returns [`GameError::InvalidIndex`] if the index is outside the board.
pub fn to_row_col(index: usize, board_size: usize) -> GameResult<Coord> {
    if !in_bounds(index, board_size) {
        return Err(GameError::InvalidIndex { index, board_size });
    }
    Ok(Coord::new(index / board_size, index % board_size))
}

/// Check if a cell index lies on the board.
#[must_use]
pub const fn in_bounds(index: usize, board_size: usize) -> bool {
    index < board_size * board_size
}

/// Chebyshev distance between two cells.
///
/// Both movement and attack reach are measured with this metric, so a
/// diagonal step costs the same as an orthogonal one.
#[must_use]
pub const fn distance(a: usize, b: usize, board_size: usize) -> usize {
    let row_delta = (a / board_size).abs_diff(b / board_size);
    let col_delta = (a % board_size).abs_diff(b % board_size);
    if row_delta > col_delta {
        row_delta
    } else {
        col_delta
    }
}

/// The up-to-eight cells surrounding `index`, in row-major order.
///
/// The window is clipped to the board and never contains `index` itself.
#[must_use]
pub fn neighborhood(index: usize, board_size: usize) -> Vec<usize> {
    let row = index / board_size;
    let col = index % board_size;
    let mut cells = Vec::with_capacity(8);

    for r in row.saturating_sub(1)..=(row + 1).min(board_size - 1) {
        for c in col.saturating_sub(1)..=(col + 1).min(board_size - 1) {
            let cell = r * board_size + c;
            if cell != index {
                cells.push(cell);
            }
        }
    }

    cells
}

/// Border classification of a cell, used to pick frame glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileZone {
    /// Row 0, column 0.
    TopLeft,
    /// Row 0, last column.
    TopRight,
    /// Last row, column 0.
    BottomLeft,
    /// Last row, last column.
    BottomRight,
    /// Row 0, not a corner.
    Top,
    /// Last row, not a corner.
    Bottom,
    /// Column 0, not a corner.
    Left,
    /// Last column, not a corner.
    Right,
    /// Any interior cell.
    Center,
}

/// Classify a cell as corner, edge or interior.
#[must_use]
pub const fn tile_zone(index: usize, board_size: usize) -> TileZone {
    let row = index / board_size;
    let col = index % board_size;
    let last = board_size - 1;

    match (row, col) {
        (0, 0) => TileZone::TopLeft,
        (0, c) if c == last => TileZone::TopRight,
        (r, 0) if r == last => TileZone::BottomLeft,
        (r, c) if r == last && c == last => TileZone::BottomRight,
        (0, _) => TileZone::Top,
        (r, _) if r == last => TileZone::Bottom,
        (_, 0) => TileZone::Left,
        (_, c) if c == last => TileZone::Right,
        _ => TileZone::Center,
    }
}
