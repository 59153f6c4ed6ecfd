use std::{error::Error, fmt};

use crate::TermInt;

/// Reasons a session can't start. Nothing past startup is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    TerminalTooSmall { rows: TermInt, cols: TermInt },
    TerminalTooLarge { rows: TermInt, cols: TermInt },
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::TerminalTooSmall { rows, cols } => write!(
                f,
                "terminal is {}x{}, need at least {}x{}",
                rows,
                cols,
                crate::board::MIN_ROWS,
                crate::board::MIN_COLS
            ),
            StartupError::TerminalTooLarge { rows, cols } => {
                write!(f, "terminal is {}x{}, which is too large to play on", rows, cols)
            }
        }
    }
}

impl Error for StartupError {}
