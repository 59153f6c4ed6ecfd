use std::{io, time::{Duration, Instant}};

use anyhow::{Context, Result};
use rand::Rng;

use crate::Coords;
use crate::board::Board;
use crate::term::{Key, Terminal};
use crate::snake::{Snake, Direction::*, MoveResult::*};

const TICK_INTERVAL_MS: u64 = 100;
const GAME_OVER_HOLD_MS: u64 = 2000;
const INITIAL_SNAKE_LENGTH: i16 = 3;

const SNAKE_CHAR: char = '#';
const FOOD_CHAR: char = '*';
const EMPTY_CHAR: char = ' ';

const GAME_OVER_MSG: &str = "GAME OVER!";
const WIN_MSG: &str = "YOU WIN!";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Crashed,
    /// The snake filled every playable cell.
    Won,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    GameOver(Ending),
}

pub struct SnakeGame<T, R> {
    board: Board,
    snake: Snake,
    food: Option<Coords>,
    state: GameState,
    tick_interval: Duration,
    term: T,
    rng: R,
}

impl<T: Terminal, R: Rng> SnakeGame<T, R> {
    /// Sizes the board from the terminal, lays out the starting snake in the
    /// middle heading left, places food and draws the first frame.
    pub fn new(term: T, rng: R) -> Result<Self> {
        let (rows, cols) = term.size().context("failed to read terminal size")?;
        let board = Board::new(rows, cols)?;
        let snake = Snake::new(board.center(), INITIAL_SNAKE_LENGTH, Left);

        tracing::info!(rows, cols, "starting game");

        let mut game = SnakeGame::from_parts(term, rng, board, snake, None);
        game.draw_initial().context("failed to draw the board")?;
        Ok(game)
    }

    /// Assembles a game around an existing snake without drawing anything.
    /// The caller keeps `food` off the snake; `None` means "pick one".
    pub fn from_parts(term: T, rng: R, board: Board, snake: Snake, food: Option<Coords>) -> Self {
        let mut game = SnakeGame {
            board,
            snake,
            food,
            state: GameState::Running,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            term,
            rng,
        };

        if game.food.is_none() {
            game.food = game.spawn_food();
        }
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Coords> {
        self.food
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn terminal(&self) -> &T {
        &self.term
    }

    /// Ticks until the game ends.
    pub fn run(&mut self) -> io::Result<Ending> {
        self.term.set_input_timeout(self.tick_interval);

        loop {
            if let GameState::GameOver(ending) = self.tick()? {
                tracing::info!(?ending, length = self.snake.len(), "game finished");
                return Ok(ending);
            }
        }
    }

    /// One fixed-length tick: take at most one key, advance, then wait out
    /// whatever is left of the interval.
    pub fn tick(&mut self) -> io::Result<GameState> {
        let started = Instant::now();
        let key = self.term.poll_key()?;
        let state = self.step(key)?;

        if state == GameState::Running {
            if let Some(rest) = self.tick_interval.checked_sub(started.elapsed()) {
                if !rest.is_zero() {
                    self.term.sleep(rest);
                }
            }
        }

        Ok(state)
    }

    /// Advances the game by one cell given the key read this tick, if any.
    /// Does nothing once the game is over.
    pub fn step(&mut self, key: Option<Key>) -> io::Result<GameState> {
        if self.state != GameState::Running {
            return Ok(self.state);
        }

        match key {
            Some(Key::Quit) => {
                self.state = GameState::GameOver(Ending::Quit);
                return Ok(self.state);
            }
            Some(key) => {
                if let Some(dir) = key.direction() {
                    self.snake.set_direction(dir);
                }
            }
            None => {}
        }

        match self.snake.move_step(&self.board, self.food) {
            Crashed { at } => {
                tracing::debug!(?at, length = self.snake.len(), "snake crashed");
                self.finish(Ending::Crashed)?;
            }
            Moved { new_head, old_tail } => {
                self.term.draw_cell(old_tail, EMPTY_CHAR)?;
                self.term.draw_cell(new_head, SNAKE_CHAR)?;
                self.term.refresh()?;
            }
            Grew { new_head } => {
                tracing::debug!(?new_head, length = self.snake.len(), "food eaten");

                self.food = self.spawn_food();
                if let Some(food) = self.food {
                    self.term.draw_cell(food, FOOD_CHAR)?;
                }
                self.term.draw_cell(new_head, SNAKE_CHAR)?;
                self.term.refresh()?;

                if self.food.is_none() {
                    self.finish(Ending::Won)?;
                }
            }
        }

        Ok(self.state)
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Rejection-samples a free playable cell. `None` once the snake covers
    /// the whole board.
    fn spawn_food(&mut self) -> Option<Coords> {
        if self.snake.len() >= self.board.interior_cells() {
            return None;
        }

        loop {
            let pos = self.board.random_cell(&mut self.rng);
            if !self.snake.contains(pos) {
                return Some(pos);
            }
        }
    }

    fn finish(&mut self, ending: Ending) -> io::Result<()> {
        let msg = match ending {
            Ending::Crashed => GAME_OVER_MSG,
            Ending::Won => WIN_MSG,
            Ending::Quit => "",
        };

        if !msg.is_empty() {
            let (row, col) = self.board.center();
            let half = msg.len() as i16 / 2;
            self.term.draw_text((row, col - half), msg)?;
            self.term.refresh()?;
            self.term.sleep(Duration::from_millis(GAME_OVER_HOLD_MS));
        }

        self.state = GameState::GameOver(ending);
        Ok(())
    }

    fn draw_initial(&mut self) -> io::Result<()> {
        self.draw_borders()?;

        for pos in self.snake.body().iter() {
            self.term.draw_cell(*pos, SNAKE_CHAR)?;
        }

        if let Some(food) = self.food {
            self.term.draw_cell(food, FOOD_CHAR)?;
        }

        self.term.refresh()
    }

    fn draw_borders(&mut self) -> io::Result<()> {
        let (rows, cols) = (self.board.rows(), self.board.cols());
        let (end_row, end_col) = (rows - 1, cols - 1);

        for col in 0..cols {
            let ch = if col == 0 || col == end_col {'+'} else {'-'};
            self.term.draw_cell((0, col), ch)?;
            self.term.draw_cell((end_row, col), ch)?;
        }

        for row in 1..end_row {
            self.term.draw_cell((row, 0), '|')?;
            self.term.draw_cell((row, end_col), '|')?;
        }

        Ok(())
    }
}
