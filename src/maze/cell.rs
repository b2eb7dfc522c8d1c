use std::fmt;

use bitflags::bitflags;

use super::direction::Direction;

bitflags! {
    /// A set of compass directions packed into a nibble, one bit per
    /// direction in the fixed order West, South, East, North.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DirSet: u8 {
        const WEST = 0b1000;
        const SOUTH = 0b0100;
        const EAST = 0b0010;
        const NORTH = 0b0001;
    }
}

/// Packed state word for one grid cell.
///
/// Four 4-bit fields, most to least significant: backtrack, solution,
/// border (reserved, unused), wall-open. Each field is a [`DirSet`].
/// A wall-open bit in direction D means the wall between this cell and
/// its D-neighbor has been knocked down; a solution bit records the
/// direction the in-progress path leaves this cell; a backtrack bit
/// records the direction back to the cell this one was reached from.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct CellState(u16);

const WALL_SHIFT: u32 = 0;
const BORDER_SHIFT: u32 = 4;
const SOLUTION_SHIFT: u32 = 8;
const BACKTRACK_SHIFT: u32 = 12;

const NIBBLE: u16 = 0b1111;

impl CellState {
    /// The directions whose walls have been knocked down.
    pub fn walls_open(self) -> DirSet {
        DirSet::from_bits_truncate((self.0 >> WALL_SHIFT & NIBBLE) as u8)
    }

    /// The direction the current solution path leaves this cell in,
    /// if the cell is on the path. At most one bit is set.
    pub fn solution(self) -> DirSet {
        DirSet::from_bits_truncate((self.0 >> SOLUTION_SHIFT & NIBBLE) as u8)
    }

    /// The direction back toward the cell this one was first reached
    /// from during solving. At most one bit is set.
    pub fn backtrack(self) -> DirSet {
        DirSet::from_bits_truncate((self.0 >> BACKTRACK_SHIFT & NIBBLE) as u8)
    }

    /// A cell with every wall still standing has never been carved into.
    pub fn is_uncarved(self) -> bool {
        self.walls_open().is_empty()
    }

    /// Knock down the wall toward `direction`. Wall bits are only ever
    /// set, never cleared.
    pub fn open_wall(&mut self, direction: Direction) {
        self.0 |= (direction.flag().bits() as u16) << WALL_SHIFT;
    }

    /// Record `direction` as this cell's outgoing path direction,
    /// replacing any previous one.
    pub fn set_solution(&mut self, direction: Direction) {
        self.clear_solution();
        self.0 |= (direction.flag().bits() as u16) << SOLUTION_SHIFT;
    }

    /// Take this cell off the solution path. Returns whether any
    /// solution bit was actually cleared.
    pub fn clear_solution(&mut self) -> bool {
        let had = !self.solution().is_empty();
        self.0 &= !(NIBBLE << SOLUTION_SHIFT);
        had
    }

    /// Record `direction` as the way back to the cell this one was
    /// reached from.
    pub fn set_backtrack(&mut self, direction: Direction) {
        self.0 |= (direction.flag().bits() as u16) << BACKTRACK_SHIFT;
    }

    /// The raw state word.
    pub fn bits(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellState")
            .field("backtrack", &self.backtrack())
            .field("solution", &self.solution())
            .field("border", &(self.0 >> BORDER_SHIFT & NIBBLE))
            .field("walls_open", &self.walls_open())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cell_is_uncarved_and_unmarked() {
        let cell = CellState::default();
        assert!(cell.is_uncarved());
        assert!(cell.solution().is_empty());
        assert!(cell.backtrack().is_empty());
        assert_eq!(cell.bits(), 0);
    }

    #[test]
    fn open_wall_touches_only_the_wall_nibble() {
        let mut cell = CellState::default();
        cell.open_wall(Direction::East);
        cell.open_wall(Direction::North);
        assert_eq!(cell.walls_open(), DirSet::EAST | DirSet::NORTH);
        assert!(cell.solution().is_empty());
        assert!(cell.backtrack().is_empty());
    }

    #[test]
    fn set_solution_replaces_the_previous_direction() {
        let mut cell = CellState::default();
        cell.set_solution(Direction::West);
        cell.set_solution(Direction::South);
        assert_eq!(cell.solution(), DirSet::SOUTH);
    }

    #[test]
    fn clear_solution_reports_whether_bits_were_set() {
        let mut cell = CellState::default();
        assert!(!cell.clear_solution());
        cell.set_solution(Direction::East);
        assert!(cell.clear_solution());
        assert!(cell.solution().is_empty());
    }

    #[test]
    fn fields_do_not_bleed_into_each_other() {
        let mut cell = CellState::default();
        cell.open_wall(Direction::West);
        cell.set_solution(Direction::West);
        cell.set_backtrack(Direction::West);
        assert_eq!(cell.walls_open(), DirSet::WEST);
        assert_eq!(cell.solution(), DirSet::WEST);
        assert_eq!(cell.backtrack(), DirSet::WEST);
        assert!(cell.clear_solution());
        assert_eq!(cell.walls_open(), DirSet::WEST);
        assert_eq!(cell.backtrack(), DirSet::WEST);
    }
}
