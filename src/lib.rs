pub mod board;
pub mod error;
pub mod game;
pub mod snake;
pub mod term;

pub type TermInt = u16;

/// A `(row, col)` cell. Signed so a step off the board can be represented
/// before it gets rejected.
pub type Coords = (i16, i16);
