use rand::Rng;

use crate::maze::{Maze, Mode};
use crate::view::Tick;

/// Carve a perfect maze with a randomized depth-first walk.
///
/// Starts from a uniformly random cell and repeatedly tunnels into a
/// random uncarved neighbor, backtracking through an explicit stack at
/// dead ends, until every cell has been visited. Each step knocks down
/// exactly one wall, so the finished maze has `cell_count - 1`
/// connections and exactly one simple path between any two cells.
pub fn randomized_dfs(maze: &mut Maze, rng: &mut impl Rng) {
    if maze.is_empty() {
        return;
    }

    maze.set_mode(Mode::Generating);

    let mut current = rng.random_range(0..maze.cell_count());
    let mut visited_count = 1;
    let mut stack = Vec::new();
    tracing::info!(start = current, cells = maze.cell_count(), "carving maze");

    while visited_count < maze.cell_count() {
        let neighbors = maze.neighbors(current);
        if neighbors.is_empty() {
            // Dead end: every cell below us on the stack was carved from
            // the start cell, so the stack cannot run dry before the
            // grid is fully covered.
            current = stack
                .pop()
                .expect("backtrack stack drained before all cells were carved");
        } else {
            let (next, direction) = neighbors[rng.random_range(0..neighbors.len())];
            maze.connect(current, next, direction);
            stack.push(current);
            current = next;
            visited_count += 1;
        }
        if maze.tick() == Tick::Abort {
            tracing::info!("carve aborted by observer");
            std::process::exit(0);
        }
    }

    maze.set_mode(Mode::Solving);
    tracing::info!("maze carved");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::get_rng;
    use crate::maze::direction::Direction;
    use proptest::prelude::*;

    /// Number of open-wall connections, counting each knocked-down wall
    /// once (every connection sets one bit on each side).
    fn connection_count(maze: &Maze) -> usize {
        (0..maze.cell_count())
            .map(|i| maze.cell(i).walls_open().bits().count_ones() as usize)
            .sum::<usize>()
            / 2
    }

    /// Every open wall must be mirrored by the neighbor on the other side.
    fn assert_wall_symmetry(maze: &Maze) {
        for index in 0..maze.cell_count() {
            let (x, y) = maze.coordinates(index);
            for direction in Direction::ALL {
                if !maze.cell(index).walls_open().contains(direction.flag()) {
                    continue;
                }
                let (dx, dy) = direction.offset();
                let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                assert!(maze.in_bounds(nx, ny), "open wall leads out of bounds");
                let neighbor = maze.cell_index(nx as u16, ny as u16);
                assert!(
                    maze.cell(neighbor)
                        .walls_open()
                        .contains(direction.opposite().flag()),
                    "wall between {index} and {neighbor} open on one side only"
                );
            }
        }
    }

    /// Number of cells reachable from the start through open walls.
    fn reachable_count(maze: &Maze) -> usize {
        let mut seen = vec![false; maze.cell_count()];
        let mut frontier = vec![0usize];
        seen[0] = true;
        while let Some(cell) = frontier.pop() {
            let (x, y) = maze.coordinates(cell);
            for direction in Direction::ALL {
                if !maze.cell(cell).walls_open().contains(direction.flag()) {
                    continue;
                }
                let (dx, dy) = direction.offset();
                let next = maze.cell_index((x as i32 + dx) as u16, (y as i32 + dy) as u16);
                if !seen[next] {
                    seen[next] = true;
                    frontier.push(next);
                }
            }
        }
        seen.iter().filter(|&&s| s).count()
    }

    #[test]
    fn two_by_one_grid_has_a_single_forced_connection() {
        let mut maze = Maze::new(2, 1, None);
        randomized_dfs(&mut maze, &mut get_rng(Some(0)));
        assert_eq!(connection_count(&maze), 1);
        assert!(maze.cell(0).walls_open().contains(Direction::East.flag()));
        assert!(maze.cell(1).walls_open().contains(Direction::West.flag()));
        assert_eq!(maze.mode(), Mode::Solving);
    }

    #[test]
    fn one_by_one_grid_needs_no_carving() {
        let mut maze = Maze::new(1, 1, None);
        randomized_dfs(&mut maze, &mut get_rng(Some(0)));
        assert_eq!(connection_count(&maze), 0);
        assert_eq!(maze.mode(), Mode::Solving);
    }

    #[test]
    fn empty_grid_is_left_alone() {
        let mut maze = Maze::new(0, 0, None);
        randomized_dfs(&mut maze, &mut get_rng(Some(0)));
        assert_eq!(maze.mode(), Mode::Idle);
    }

    #[test]
    fn carved_maze_is_a_spanning_tree() {
        for seed in 0..5 {
            let mut maze = Maze::new(9, 6, None);
            randomized_dfs(&mut maze, &mut get_rng(Some(seed)));
            assert_eq!(connection_count(&maze), maze.cell_count() - 1);
            assert_eq!(reachable_count(&maze), maze.cell_count());
            assert_wall_symmetry(&maze);
        }
    }

    proptest! {
        #[test]
        fn spanning_tree_holds_for_any_size_and_seed(
            width in 1u16..12,
            height in 1u16..12,
            seed in any::<u64>(),
        ) {
            let mut maze = Maze::new(width, height, None);
            randomized_dfs(&mut maze, &mut get_rng(Some(seed)));
            prop_assert_eq!(connection_count(&maze), maze.cell_count() - 1);
            prop_assert_eq!(reachable_count(&maze), maze.cell_count());
            assert_wall_symmetry(&maze);
        }
    }
}
