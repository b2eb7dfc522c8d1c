use rand::{SeedableRng, rngs::StdRng};

mod dfs;

use dfs::randomized_dfs;

use crate::maze::Maze;

/// Get a random number generator, optionally seeded for reproducibility.
pub(crate) fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Dfs,
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::Dfs => write!(f, "Randomized Depth-First Search (DFS)"),
        }
    }
}

/// Carve passages into `maze` until every cell is reachable.
///
/// On return the maze is a spanning tree over the grid (a perfect maze)
/// and its mode has advanced to [`Solving`](crate::maze::Mode::Solving).
pub fn generate_maze(maze: &mut Maze, generator: Generator, seed: Option<u64>) {
    match generator {
        Generator::Dfs => randomized_dfs(maze, &mut get_rng(seed)),
    }
}
