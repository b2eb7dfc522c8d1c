pub mod cell;
pub mod direction;

use std::fmt;

use cell::CellState;
use direction::Direction;

use crate::view::{Marking, StepObserver, Tick};

/// Which traversal phase the grid is in. Gates neighbor eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Generating,
    Solving,
}

/// The backtrack chain from the goal did not reach the start cell.
///
/// For a properly generated perfect maze this cannot happen; seeing it
/// means a logic defect upstream, not a runtime condition to retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoPathError;

impl fmt::Display for NoPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no path between start and goal")
    }
}

impl std::error::Error for NoPathError {}

/// Rectangular grid of packed cell state words, indexed row-major.
///
/// Cell `(x, y)` lives at index `y * width + x`. The start cell is
/// index 0 (top-left) and the goal cell is index `cell_count - 1`
/// (bottom-right). An optional [`StepObserver`] receives a mutation
/// event for every wall knocked down and every path marking.
pub struct Maze {
    cells: Box<[CellState]>,
    width: u16,
    height: u16,
    mode: Mode,
    observer: Option<Box<dyn StepObserver>>,
}

impl Maze {
    pub fn new(width: u16, height: u16, observer: Option<Box<dyn StepObserver>>) -> Self {
        let count = width as usize * height as usize;
        Maze {
            cells: vec![CellState::default(); count].into_boxed_slice(),
            width,
            height,
            mode: Mode::Idle,
            observer,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        tracing::debug!(?mode, "grid mode change");
        self.mode = mode;
    }

    /// The designated solve start, top-left.
    pub fn start_index(&self) -> usize {
        0
    }

    /// The designated solve goal, bottom-right.
    pub fn goal_index(&self) -> usize {
        self.cell_count() - 1
    }

    /// Read-only state word of one cell.
    pub fn cell(&self, index: usize) -> CellState {
        self.cells[index]
    }

    pub fn cell_index(&self, x: u16, y: u16) -> usize {
        debug_assert!(x < self.width && y < self.height);
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        y as usize * self.width as usize + x as usize
    }

    pub fn coordinates(&self, index: usize) -> (u16, u16) {
        ((index % self.width as usize) as u16, (index / self.width as usize) as u16)
    }

    /// Signed so that neighbor offsets can be probed directly.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// The neighbor of `cell` in `direction`, if it is in bounds.
    fn neighbor_index(&self, cell: usize, direction: Direction) -> Option<usize> {
        let (x, y) = self.coordinates(cell);
        let (dx, dy) = direction.offset();
        let (nx, ny) = (x as i32 + dx, y as i32 + dy);
        self.in_bounds(nx, ny)
            .then(|| self.cell_index(nx as u16, ny as u16))
    }

    /// Eligible neighbors of `cell` under the current mode, in direction
    /// table order (West, South, East, North).
    ///
    /// While generating, a neighbor qualifies if it has never been
    /// carved into (all walls standing). While solving, it qualifies if
    /// the wall toward it is open and it carries no solution or
    /// backtrack marking yet. Idle mode has no eligible neighbors.
    pub fn neighbors(&self, cell: usize) -> Vec<(usize, Direction)> {
        let mut found = Vec::with_capacity(4);
        for direction in Direction::ALL {
            let Some(index) = self.neighbor_index(cell, direction) else {
                continue;
            };
            let state = self.cells[index];
            let eligible = match self.mode {
                Mode::Generating => state.is_uncarved(),
                // The open wall is checked on the neighbor's side via the
                // opposite-direction bit; symmetry makes this equivalent
                // to checking our own side.
                Mode::Solving => {
                    state.walls_open().contains(direction.opposite().flag())
                        && state.solution().is_empty()
                        && state.backtrack().is_empty()
                }
                Mode::Idle => false,
            };
            if eligible {
                found.push((index, direction));
            }
        }
        found
    }

    /// Knock down the wall between two adjacent cells.
    ///
    /// `to` must be the neighbor of `from` in `direction`; anything else
    /// is a caller bug, asserted in debug builds.
    pub fn connect(&mut self, from: usize, to: usize, direction: Direction) {
        debug_assert_eq!(
            self.neighbor_index(from, direction),
            Some(to),
            "connect called with non-adjacent cells"
        );
        self.cells[from].open_wall(direction);
        self.cells[to].open_wall(direction.opposite());
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_wall_opened(from, direction);
        }
    }

    /// Advance the path under exploration from `from` to `to`.
    ///
    /// `from`'s outgoing solution direction is replaced with `direction`
    /// and `to` records the way back to `from` in its backtrack field.
    pub fn mark_on_path(&mut self, from: usize, to: usize, direction: Direction) {
        debug_assert_eq!(
            self.neighbor_index(from, direction),
            Some(to),
            "mark_on_path called with non-adjacent cells"
        );
        self.cells[from].set_solution(direction);
        self.cells[to].set_backtrack(direction.opposite());
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_cell_marked(from, Marking::Visited);
        }
    }

    /// Back the path out of a dead end. A no-op (and no event) if the
    /// cell carries no solution bits.
    pub fn unmark_path(&mut self, cell: usize) {
        if self.cells[cell].clear_solution()
            && let Some(observer) = self.observer.as_deref_mut()
        {
            observer.on_cell_marked(cell, Marking::Backtracked);
        }
    }

    /// Walk the backtrack chain from `goal` to the start cell and return
    /// the traveled directions in start-to-goal order.
    ///
    /// Bounded by `cell_count` steps so a corrupted or cyclic chain
    /// surfaces as [`NoPathError`] instead of looping forever.
    pub fn reconstruct_path(&self, goal: usize) -> Result<Vec<Direction>, NoPathError> {
        let mut path = Vec::new();
        let mut current = goal;
        while current != self.start_index() {
            if path.len() >= self.cell_count() {
                return Err(NoPathError);
            }
            let back = self.cells[current].backtrack();
            let direction = Direction::ALL
                .into_iter()
                .find(|d| back.contains(d.flag()))
                .ok_or(NoPathError)?;
            current = self.neighbor_index(current, direction).ok_or(NoPathError)?;
            // The chain points backward; the traveled direction is the
            // reverse of the stored one.
            path.push(direction.opposite());
        }
        path.reverse();
        Ok(path)
    }

    /// Invoke the per-step tick hook, if an observer is attached.
    pub fn tick(&mut self) -> Tick {
        match self.observer.as_deref_mut() {
            Some(observer) => observer.tick(),
            None => Tick::Continue,
        }
    }
}
