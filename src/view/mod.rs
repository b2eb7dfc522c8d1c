pub mod terminal;

use crate::maze::direction::Direction;

/// How a cell changed during solving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marking {
    /// The cell joined the path currently under exploration.
    Visited,
    /// The cell was abandoned as a dead end.
    Backtracked,
}

/// Verdict of the per-step tick hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    /// The run must stop immediately. The traversal loops honor this by
    /// exiting the process; the observer is expected to have cleaned up
    /// its own resources before returning it.
    Abort,
}

/// Receiver for grid mutation events and the per-step tick.
///
/// This is the entire boundary between the maze algorithms and the
/// presentation layer: the grid reports each knocked-down wall and each
/// path marking as it happens, and the generator and solver call
/// [`tick`](StepObserver::tick) exactly once per traversal step.
pub trait StepObserver {
    /// The wall between `from` and its neighbor in `direction` was
    /// knocked down. Called once per connection.
    fn on_wall_opened(&mut self, from: usize, direction: Direction);

    /// A cell joined or left the in-progress solution path.
    fn on_cell_marked(&mut self, cell: usize, marking: Marking);

    /// Called once per traversal step. May pace the animation and poll
    /// for a quit request.
    fn tick(&mut self) -> Tick;
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::generators::{Generator, generate_maze};
    use crate::maze::Maze;
    use crate::solvers::{Solver, solve_maze};

    #[derive(Default)]
    struct Counters {
        walls_opened: usize,
        visited: usize,
        backtracked: usize,
        ticks: usize,
    }

    /// Counts events through a shared handle so the counters survive the
    /// maze taking ownership of the observer.
    struct RecordingObserver(Rc<RefCell<Counters>>);

    impl StepObserver for RecordingObserver {
        fn on_wall_opened(&mut self, _from: usize, _direction: Direction) {
            self.0.borrow_mut().walls_opened += 1;
        }

        fn on_cell_marked(&mut self, _cell: usize, marking: Marking) {
            let mut counters = self.0.borrow_mut();
            match marking {
                Marking::Visited => counters.visited += 1,
                Marking::Backtracked => counters.backtracked += 1,
            }
        }

        fn tick(&mut self) -> Tick {
            self.0.borrow_mut().ticks += 1;
            Tick::Continue
        }
    }

    #[test]
    fn generation_emits_one_wall_event_per_connection() {
        let counters = Rc::new(RefCell::new(Counters::default()));
        let mut maze = Maze::new(6, 5, Some(Box::new(RecordingObserver(counters.clone()))));
        generate_maze(&mut maze, Generator::Dfs, Some(7));
        let counters = counters.borrow();
        assert_eq!(counters.walls_opened, maze.cell_count() - 1);
        // Every step ticks once, and backtracking steps open no wall.
        assert!(counters.ticks >= counters.walls_opened);
    }

    #[test]
    fn solving_emits_visit_and_backtrack_events() {
        let counters = Rc::new(RefCell::new(Counters::default()));
        let mut maze = Maze::new(6, 5, Some(Box::new(RecordingObserver(counters.clone()))));
        generate_maze(&mut maze, Generator::Dfs, Some(7));
        let path = solve_maze(&mut maze, Solver::Dfs, Some(7)).unwrap();
        let counters = counters.borrow();
        // One visit per advance, and each backtracked cell was first
        // visited, so visits dominate both counts.
        assert!(counters.visited >= path.len());
        assert!(counters.visited >= counters.backtracked);
    }

    #[test]
    fn forced_corridor_ticks_once_per_step() {
        let counters = Rc::new(RefCell::new(Counters::default()));
        let mut maze = Maze::new(2, 1, Some(Box::new(RecordingObserver(counters.clone()))));
        generate_maze(&mut maze, Generator::Dfs, Some(0));
        assert_eq!(counters.borrow().ticks, 1);
        solve_maze(&mut maze, Solver::Dfs, Some(0)).unwrap();
        assert_eq!(counters.borrow().ticks, 2);
        assert_eq!(counters.borrow().walls_opened, 1);
        assert_eq!(counters.borrow().visited, 1);
        assert_eq!(counters.borrow().backtracked, 0);
    }
}
