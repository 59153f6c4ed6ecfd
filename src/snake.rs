use std::collections::VecDeque;

use crate::board::Board;
use crate::Coords;
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// `(row, col)` step for one cell of travel.
    pub fn offset(self) -> (i16, i16) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords, old_tail: Coords },
    Grew { new_head: Coords },
    Crashed { at: Coords },
}

/// Body is stored head-first and is never empty.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
}

impl Snake {
    /// Lays out `size` segments starting at `head` and trailing away from
    /// `direction`.
    pub fn new(head: Coords, size: i16, direction: Direction) -> Self {
        let (dr, dc) = direction.offset();

        let body = (0..size.max(1))
            .map(|i| (head.0 - dr * i, head.1 - dc * i))
            .collect();
        Snake { body, direction }
    }

    /// Builds a snake from explicit head-first segments. `None` if there are none.
    pub fn from_segments<I>(segments: I, direction: Direction) -> Option<Self>
    where
        I: IntoIterator<Item = Coords>,
    {
        let body: VecDeque<Coords> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Snake { body, direction })
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn tail(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.body.contains(&pos)
    }

    pub fn next_head(&self) -> Coords {
        let (row, col) = self.head();
        let (dr, dc) = self.direction.offset();
        (row + dr, col + dc)
    }

    /// Advances one cell. Collisions are checked against the border and the
    /// whole current body (tail included) before anything is committed, so
    /// a crash leaves the snake untouched.
    pub fn move_step(&mut self, board: &Board, food: Option<Coords>) -> MoveResult {
        let new_head = self.next_head();

        if board.is_border(new_head) || self.contains(new_head) {
            return Crashed { at: new_head };
        }

        let old_tail = self.tail();
        self.body.push_front(new_head);

        if food == Some(new_head) {
            Grew { new_head }
        } else {
            self.body.pop_back();
            Moved { new_head, old_tail }
        }
    }

    // Reversing straight into the neck is allowed; it just crashes next step.
    pub fn set_direction(&mut self, new_direction: Direction) {
        self.direction = new_direction;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}
