//! Board model: a fixed 6x5 grid of letter tiles.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Number of guesses in a round.
pub const MAX_ROWS: usize = 6;

/// Number of letters in a word.
pub const WORD_LENGTH: usize = 5;

/// Visual state of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileStatus {
    /// No letter.
    #[default]
    Empty,
    /// Letter typed but not yet scored.
    Filled,
    /// Right letter, right position.
    Correct,
    /// Letter is in the word at another position.
    Present,
    /// Letter is not in the word.
    Absent,
}

impl TileStatus {
    /// Whether the service has scored this tile.
    pub fn is_scored(self) -> bool {
        matches!(self, Self::Correct | Self::Present | Self::Absent)
    }

    /// Ranking used for keyboard hints; a better hint never gets downgraded.
    pub fn hint_rank(self) -> u8 {
        match self {
            Self::Empty | Self::Filled => 0,
            Self::Absent => 1,
            Self::Present => 2,
            Self::Correct => 3,
        }
    }
}

/// One letter cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    /// The letter, `None` while the tile is empty.
    pub letter: Option<char>,
    /// Correctness / input state.
    pub status: TileStatus,
}

impl Tile {
    /// An empty tile.
    pub const EMPTY: Tile = Tile {
        letter: None,
        status: TileStatus::Empty,
    };

    /// A typed, unscored tile.
    pub fn filled(letter: char) -> Self {
        Self {
            letter: Some(letter),
            status: TileStatus::Filled,
        }
    }
}

/// One guess attempt.
pub type Row = [Tile; WORD_LENGTH];

/// The full grid. The shape never changes, only tile contents do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: [Row; MAX_ROWS],
}

impl Board {
    /// Creates a board with every tile empty.
    pub fn new() -> Self {
        Self {
            rows: [[Tile::EMPTY; WORD_LENGTH]; MAX_ROWS],
        }
    }

    /// Returns the tile at `(row, col)`.
    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Returns a row.
    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> &[Row; MAX_ROWS] {
        &self.rows
    }

    /// Overwrites a single tile.
    ///
    /// Callers keep `(row, col)` in range through the cursor; an out-of-range
    /// write is dropped.
    pub fn set_tile(&mut self, row: usize, col: usize, letter: Option<char>, status: TileStatus) {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(tile) => *tile = Tile { letter, status },
            None => warn!(row, col, "Ignoring tile write outside the board"),
        }
    }

    /// Sets the status of every tile in a row, leaving letters alone.
    pub fn set_row_statuses(&mut self, row: usize, statuses: &[TileStatus; WORD_LENGTH]) {
        match self.rows.get_mut(row) {
            Some(tiles) => {
                for (tile, status) in tiles.iter_mut().zip(statuses) {
                    tile.status = *status;
                }
            }
            None => warn!(row, "Ignoring row update outside the board"),
        }
    }

    /// Concatenates the letters of a row.
    pub fn word(&self, row: usize) -> String {
        self.rows
            .get(row)
            .map(|tiles| tiles.iter().filter_map(|t| t.letter).collect())
            .unwrap_or_default()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Row/tile pointer to the cell currently accepting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cursor {
    /// Row index in `0..=MAX_ROWS`. `MAX_ROWS` means the board is used up.
    pub row: usize,
    /// Tile index in `0..=WORD_LENGTH`.
    pub tile: usize,
}

impl Cursor {
    /// Cursor at the first tile of the first row.
    pub fn origin() -> Self {
        Self::default()
    }

    /// Whether the cursor still points at a row on the board.
    pub fn on_board(&self) -> bool {
        self.row < MAX_ROWS
    }

    /// Whether the current row has all its letters.
    pub fn row_complete(&self) -> bool {
        self.tile == WORD_LENGTH
    }
}

/// Checks the cursor invariant against a board.
///
/// Rows above the cursor are fully scored, tiles left of it are `Filled`,
/// and everything from the cursor rightwards is `Empty`. Every tile must
/// also agree with its letter (`Empty` exactly when there is no letter).
pub fn cursor_invariant_holds(board: &Board, cursor: Cursor) -> bool {
    let tiles_consistent = board
        .rows()
        .iter()
        .flatten()
        .all(|t| (t.status == TileStatus::Empty) == t.letter.is_none());

    let scored_above = board
        .rows()
        .iter()
        .take(cursor.row)
        .flatten()
        .all(|t| t.status.is_scored());

    let current_ok = match board.row(cursor.row) {
        Some(tiles) => tiles.iter().enumerate().all(|(i, t)| {
            if i < cursor.tile {
                t.status == TileStatus::Filled
            } else {
                t.status == TileStatus::Empty
            }
        }),
        None => cursor.row == MAX_ROWS && cursor.tile == 0,
    };

    tiles_consistent && scored_above && current_ok
}
