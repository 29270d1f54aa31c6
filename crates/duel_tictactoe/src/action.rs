//! Errors returned by the engine.
//!
//! Both move errors are expected, recoverable outcomes: callers surface them
//! as a rejected move and carry on.

/// Error that can occur when applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The game is already decided.
    #[display("Game is already over")]
    OutOfTurn,

    /// The target cell already holds a mark.
    #[display("Cell is already occupied")]
    CellOccupied,
}

impl std::error::Error for MoveError {}

/// A row or column outside `0..=2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("Coordinate ({row}, {col}) is off the board")]
pub struct CoordError {
    /// Requested row.
    pub row: usize,
    /// Requested column.
    pub col: usize,
}

impl std::error::Error for CoordError {}
