use std::fmt;

use super::cell::DirSet;

/// One of the four compass directions a cell can face its neighbors in.
///
/// The fixed order West, South, East, North matches the bit order of the
/// per-cell nibbles, so this enum is the single source of truth for
/// offsets, flag masks, opposites, and labels. No other module hardcodes
/// a coordinate offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    South,
    East,
    North,
}

impl Direction {
    /// All directions in nibble bit order, most significant first.
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::South,
        Direction::East,
        Direction::North,
    ];

    /// The (dx, dy) unit offset to the neighbor in this direction.
    /// y grows downward, matching terminal rows.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::North => (0, -1),
        }
    }

    /// The single-bit flag this direction occupies within a nibble.
    pub fn flag(self) -> DirSet {
        match self {
            Direction::West => DirSet::WEST,
            Direction::South => DirSet::SOUTH,
            Direction::East => DirSet::EAST,
            Direction::North => DirSet::NORTH,
        }
    }

    /// The direction pointing back at this one.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::West => Direction::East,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::North => Direction::South,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::West => "West",
            Direction::South => "South",
            Direction::East => "East",
            Direction::North => "North",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn opposite_offsets_cancel() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let (ox, oy) = dir.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn flags_are_disjoint_and_cover_the_nibble() {
        let mut all = DirSet::empty();
        for dir in Direction::ALL {
            assert!(!all.intersects(dir.flag()));
            all |= dir.flag();
        }
        assert_eq!(all, DirSet::all());
    }
}
