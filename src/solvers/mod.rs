mod dfs;

use dfs::solve_dfs;

use crate::generators::get_rng;
use crate::maze::{Maze, NoPathError, direction::Direction};

/// Available solving algorithms. The dispatch below is the seam a
/// breadth-first solver would slot into; it would share the same
/// neighbor and marking contract with a queue for a frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Dfs,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
        }
    }
}

/// Find a path from the start cell to the goal cell of a carved maze.
///
/// Returns the traveled directions in start-to-goal order. On success
/// the maze mode returns to [`Idle`](crate::maze::Mode::Idle); the
/// solution and backtrack markings are working state, not a result.
pub fn solve_maze(
    maze: &mut Maze,
    solver: Solver,
    seed: Option<u64>,
) -> Result<Vec<Direction>, NoPathError> {
    match solver {
        Solver::Dfs => solve_dfs(maze, &mut get_rng(seed)),
    }
}
