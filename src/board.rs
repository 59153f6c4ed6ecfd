use rand::Rng;

use crate::error::StartupError;
use crate::{Coords, TermInt};

pub const MIN_ROWS: TermInt = 5;
pub const MIN_COLS: TermInt = 12;

/// The play field. Row 0, row `rows - 1`, col 0 and col `cols - 1` hold the
/// drawn border and are lethal; everything in between is playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    rows: i16,
    cols: i16,
}

impl Board {
    pub fn new(rows: TermInt, cols: TermInt) -> Result<Self, StartupError> {
        if rows < MIN_ROWS || cols < MIN_COLS {
            return Err(StartupError::TerminalTooSmall { rows, cols });
        }

        match (i16::try_from(rows), i16::try_from(cols)) {
            (Ok(r), Ok(c)) => Ok(Board { rows: r, cols: c }),
            _ => Err(StartupError::TerminalTooLarge { rows, cols }),
        }
    }

    pub fn rows(&self) -> i16 {
        self.rows
    }

    pub fn cols(&self) -> i16 {
        self.cols
    }

    pub fn center(&self) -> Coords {
        (self.rows / 2, self.cols / 2)
    }

    pub fn is_border(&self, pos: Coords) -> bool {
        let (row, col) = pos;
        row <= 0 || col <= 0 || row >= self.rows - 1 || col >= self.cols - 1
    }

    pub fn interior_cells(&self) -> usize {
        (self.rows as usize - 2) * (self.cols as usize - 2)
    }

    /// A uniformly random playable cell.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Coords {
        (rng.gen_range(1..self.rows - 1), rng.gen_range(1..self.cols - 1))
    }
}
