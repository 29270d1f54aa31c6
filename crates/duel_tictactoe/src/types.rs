//! Core domain types for tic-tac-toe.

use crate::position::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A player's mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Symbol {
    /// Always moves first.
    X,
    /// Moves second.
    O,
}

impl Symbol {
    /// Returns the opposing symbol.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

/// A single square of the board.
///
/// On the wire a cell is a string: `""`, `"X"` or `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Cell {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Holds a player's mark.
    Occupied(Symbol),
}

impl Cell {
    /// Returns the symbol in this cell, if any.
    pub fn symbol(self) -> Option<Symbol> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(symbol) => Some(symbol),
        }
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => String::new(),
            Cell::Occupied(symbol) => symbol.to_string(),
        }
    }
}

impl TryFrom<String> for Cell {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "" => Ok(Cell::Empty),
            "X" => Ok(Cell::Occupied(Symbol::X)),
            "O" => Ok(Cell::Occupied(Symbol::O)),
            other => Err(format!("invalid cell value {other:?}, expected \"\", \"X\" or \"O\"")),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Stored row-major; serialized as three rows of three cells.
///
/// Boards only change through [`crate::apply_move`]; cells cannot be
/// written directly from outside the crate:
///
/// ```compile_fail
/// use duel_tictactoe::{Board, Cell, Coord, Symbol};
///
/// let mut board = Board::new();
/// board.set(Coord::new(0, 0).unwrap(), Cell::Occupied(Symbol::O));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[[Cell; 3]; 3]", into = "[[Cell; 3]; 3]")]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell at the given coordinate.
    pub fn get(&self, at: Coord) -> Cell {
        self.cells[at.index()]
    }

    /// Overwrites the cell at the given coordinate.
    pub(crate) fn set(&mut self, at: Coord, cell: Cell) {
        self.cells[at.index()] = cell;
    }

    /// Returns true if nobody has played at `at`.
    pub fn is_empty(&self, at: Coord) -> bool {
        self.get(at) == Cell::Empty
    }

    /// Returns true when all nine cells are occupied.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Cell::Empty)
    }

    /// Number of cells holding `symbol`.
    pub fn count(&self, symbol: Symbol) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Occupied(symbol))
            .count()
    }

    /// Returns the board as three rows of three cells.
    pub fn rows(&self) -> [[Cell; 3]; 3] {
        let mut rows = [[Cell::Empty; 3]; 3];
        for (index, cell) in self.cells.iter().enumerate() {
            rows[index / 3][index % 3] = *cell;
        }
        rows
    }

    pub(crate) fn cell_at_index(&self, index: usize) -> Cell {
        self.cells[index]
    }
}

impl From<[[Cell; 3]; 3]> for Board {
    fn from(rows: [[Cell; 3]; 3]) -> Self {
        let mut cells = [Cell::Empty; 9];
        for (row, values) in rows.iter().enumerate() {
            for (col, cell) in values.iter().enumerate() {
                cells[row * 3 + col] = *cell;
            }
        }
        Self { cells }
    }
}

impl From<Board> for [[Cell; 3]; 3] {
    fn from(board: Board) -> Self {
        board.rows()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.rows().iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    Cell::Empty => write!(f, "{}", row * 3 + col + 1)?,
                    Cell::Occupied(symbol) => write!(f, "{symbol}")?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Where a game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Moves are still accepted.
    Ongoing,
    /// The symbol completed a line.
    Won(Symbol),
    /// Full board, no line.
    Draw,
}

impl Status {
    /// Returns true once the game is decided.
    pub fn is_terminal(self) -> bool {
        self != Status::Ongoing
    }

    /// Returns the winner, present only for [`Status::Won`].
    pub fn winner(self) -> Option<Symbol> {
        match self {
            Status::Won(symbol) => Some(symbol),
            Status::Ongoing | Status::Draw => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ongoing => write!(f, "ongoing"),
            Status::Won(symbol) => write!(f, "{symbol} wins"),
            Status::Draw => write!(f, "draw"),
        }
    }
}
