use rand::Rng;

use crate::maze::{Maze, Mode, NoPathError, direction::Direction};
use crate::view::Tick;

/// Walk from the start cell to the goal cell with a randomized
/// depth-first search over the open walls.
///
/// Advancing marks the current cell's outgoing solution direction and
/// the next cell's backtrack direction; dead ends clear the solution
/// marking and pop the explicit backtrack stack. On a perfect maze the
/// goal is always reached; an exhausted stack means the grid was not
/// fully connected and surfaces as [`NoPathError`].
pub fn solve_dfs(maze: &mut Maze, rng: &mut impl Rng) -> Result<Vec<Direction>, NoPathError> {
    let goal = maze.goal_index();
    let mut current = maze.start_index();
    let mut stack = Vec::new();
    tracing::info!(goal, "solving maze");

    while current != goal {
        let neighbors = maze.neighbors(current);
        if neighbors.is_empty() {
            maze.unmark_path(current);
            current = stack.pop().ok_or_else(|| {
                tracing::error!("solver exhausted all backtracking before the goal");
                NoPathError
            })?;
        } else {
            let (next, direction) = neighbors[rng.random_range(0..neighbors.len())];
            maze.mark_on_path(current, next, direction);
            stack.push(current);
            current = next;
        }
        if maze.tick() == Tick::Abort {
            tracing::info!("solve aborted by observer");
            std::process::exit(0);
        }
    }

    let path = maze.reconstruct_path(goal)?;
    maze.set_mode(Mode::Idle);
    tracing::info!(steps = path.len(), "maze solved");
    Ok(path)
}
