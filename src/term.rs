use crate::{Coords, TermInt};
use std::{io::{self, Stdout, Write, stdout}, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Quit,
    Other,
}

impl Key {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Quit | Key::Other => None,
        }
    }

    pub fn from_event(ev: &KeyEvent) -> Self {
        if ev.modifiers.contains(KeyModifiers::CONTROL) && ev.code == KeyCode::Char('c') {
            return Key::Quit;
        }

        match ev.code {
            KeyCode::Char('w') | KeyCode::Up => Key::Up,
            KeyCode::Char('a') | KeyCode::Left => Key::Left,
            KeyCode::Char('s') | KeyCode::Down => Key::Down,
            KeyCode::Char('d') | KeyCode::Right => Key::Right,
            _ => Key::Other,
        }
    }
}

/// Everything the game needs from a terminal. Positions are `(row, col)`.
pub trait Terminal {
    /// `(rows, cols)`.
    fn size(&self) -> io::Result<(TermInt, TermInt)>;

    /// How long `poll_key` may wait for input.
    fn set_input_timeout(&mut self, timeout: Duration);

    /// Waits up to the input timeout for a single key.
    fn poll_key(&mut self) -> io::Result<Option<Key>>;

    fn draw_cell(&mut self, pos: Coords, glyph: char) -> io::Result<()>;

    fn draw_text(&mut self, pos: Coords, text: &str) -> io::Result<()>;

    fn refresh(&mut self) -> io::Result<()>;

    fn sleep(&mut self, duration: Duration);
}

/// crossterm-backed terminal. Holds raw mode and the alternate screen for as
/// long as it lives and gives them back on drop.
pub struct TermManager {
    stdout: Stdout,
    input_timeout: Duration,
    active: bool,
}

impl TermManager {
    pub fn setup() -> Result<Self> {
        let mut term = TermManager {
            stdout: stdout(),
            input_timeout: Duration::ZERO,
            active: false,
        };

        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        term.active = true;

        execute!(
            term.stdout,
            EnterAlternateScreen,
            cursor::Hide,
            cursor::DisableBlinking,
            terminal::Clear(ClearType::All)
        )
        .context("failed to enter alternate screen")?;

        tracing::debug!("terminal acquired");
        Ok(term)
    }

    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        // Leave the screen even if raw mode refuses to turn off.
        let screen = execute!(
            self.stdout,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        );
        terminal::disable_raw_mode()?;
        screen
    }
}

impl Terminal for TermManager {
    fn size(&self) -> io::Result<(TermInt, TermInt)> {
        let (cols, rows) = terminal::size()?;
        Ok((rows, cols))
    }

    fn set_input_timeout(&mut self, timeout: Duration) {
        self.input_timeout = timeout;
    }

    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        if !event::poll(self.input_timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(ev) if ev.kind != KeyEventKind::Release => Ok(Some(Key::from_event(&ev))),
            _ => Ok(None),
        }
    }

    fn draw_cell(&mut self, pos: Coords, glyph: char) -> io::Result<()> {
        let (x, y) = cursor_at(pos)?;
        queue!(self.stdout, cursor::MoveTo(x, y), style::Print(glyph))
    }

    fn draw_text(&mut self, pos: Coords, text: &str) -> io::Result<()> {
        let (x, y) = cursor_at(pos)?;
        queue!(self.stdout, cursor::MoveTo(x, y), style::Print(text))
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::error!(?err, "failed to restore terminal");
        }
    }
}

/// Converts a `(row, col)` cell into crossterm's `(x, y)`.
fn cursor_at(pos: Coords) -> io::Result<(u16, u16)> {
    let (row, col) = pos;
    match (u16::try_from(col), u16::try_from(row)) {
        (Ok(x), Ok(y)) => Ok((x, y)),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("cell {:?} is off screen", pos),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        let cases = [
            (KeyCode::Up, Key::Up),
            (KeyCode::Char('w'), Key::Up),
            (KeyCode::Down, Key::Down),
            (KeyCode::Char('s'), Key::Down),
            (KeyCode::Left, Key::Left),
            (KeyCode::Char('a'), Key::Left),
            (KeyCode::Right, Key::Right),
            (KeyCode::Char('d'), Key::Right),
        ];

        for (code, key) in cases {
            assert_eq!(Key::from_event(&press(code, KeyModifiers::NONE)), key);
        }
    }

    #[test]
    fn ctrl_c_quits_and_plain_c_does_nothing() {
        assert_eq!(
            Key::from_event(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Key::Quit
        );
        assert_eq!(
            Key::from_event(&press(KeyCode::Char('c'), KeyModifiers::NONE)),
            Key::Other
        );
        assert_eq!(Key::Other.direction(), None);
        assert_eq!(Key::Quit.direction(), None);
    }

    #[test]
    fn cursor_swaps_row_col_into_x_y() {
        assert_eq!(cursor_at((3, 7)).unwrap(), (7, 3));
        assert!(cursor_at((-1, 0)).is_err());
    }
}
