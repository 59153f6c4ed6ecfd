#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake::board::Board;
use snake::game::SnakeGame;
use snake::snake::{Direction, Snake};
use snake::term::{Key, Terminal};
use snake::{Coords, TermInt};

/// In-memory terminal: hands out scripted keys and records what gets drawn.
pub struct ScriptedTerminal {
    pub rows: TermInt,
    pub cols: TermInt,
    pub keys: VecDeque<Key>,
    pub screen: HashMap<Coords, char>,
    pub texts: Vec<(Coords, String)>,
    pub sleeps: Vec<Duration>,
    pub refreshes: usize,
    pub input_timeout: Option<Duration>,
    pub polls: usize,
}

impl ScriptedTerminal {
    pub fn new(rows: TermInt, cols: TermInt) -> Self {
        ScriptedTerminal {
            rows,
            cols,
            keys: VecDeque::new(),
            screen: HashMap::new(),
            texts: Vec::new(),
            sleeps: Vec::new(),
            refreshes: 0,
            input_timeout: None,
            polls: 0,
        }
    }

    pub fn with_keys(mut self, keys: &[Key]) -> Self {
        self.keys.extend(keys.iter().copied());
        self
    }

    pub fn cell(&self, pos: Coords) -> char {
        self.screen.get(&pos).copied().unwrap_or(' ')
    }
}

impl Terminal for ScriptedTerminal {
    fn size(&self) -> io::Result<(TermInt, TermInt)> {
        Ok((self.rows, self.cols))
    }

    fn set_input_timeout(&mut self, timeout: Duration) {
        self.input_timeout = Some(timeout);
    }

    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        self.polls += 1;
        Ok(self.keys.pop_front())
    }

    fn draw_cell(&mut self, pos: Coords, glyph: char) -> io::Result<()> {
        assert!(
            pos.0 >= 0 && pos.1 >= 0 && pos.0 < self.rows as i16 && pos.1 < self.cols as i16,
            "drew {:?} outside a {}x{} terminal",
            pos,
            self.rows,
            self.cols
        );
        self.screen.insert(pos, glyph);
        Ok(())
    }

    fn draw_text(&mut self, pos: Coords, text: &str) -> io::Result<()> {
        self.texts.push((pos, text.to_string()));
        Ok(())
    }

    fn refresh(&mut self) -> io::Result<()> {
        self.refreshes += 1;
        Ok(())
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}

pub fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// A 20x20 game around the given head-first snake.
pub fn game_with(
    segments: &[Coords],
    direction: Direction,
    food: Option<Coords>,
) -> SnakeGame<ScriptedTerminal, ChaCha8Rng> {
    let board = Board::new(20, 20).unwrap();
    let snake = Snake::from_segments(segments.iter().copied(), direction).unwrap();
    SnakeGame::from_parts(ScriptedTerminal::new(20, 20), rng(1), board, snake, food)
}
