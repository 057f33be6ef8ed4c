use std::fmt;

use smallvec::SmallVec;

/// Identity of a cell within one maze.
///
/// Non-negative values index into the maze's cell array. Negative values are
/// synthetic *outer* cells: `-d - 1` stands for "outside the maze in
/// direction `d`" and is used to mark entries and exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(pub i32);

impl CellId {
    /// The outer cell for direction slot `d`.
    pub const fn outer(direction: usize) -> Self {
        CellId(-(direction as i32) - 1)
    }

    pub const fn is_outer(self) -> bool {
        self.0 < 0
    }

    /// Direction slot encoded by an outer cell, `None` for maze-part cells.
    pub fn direction(self) -> Option<usize> {
        self.is_outer().then(|| (-self.0 - 1) as usize)
    }

    /// Array index of a maze-part cell. Must not be called on outer cells.
    pub fn index(self) -> usize {
        debug_assert!(!self.is_outer());
        self.0 as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction() {
            Some(d) => write!(f, "outer[{}]", d),
            None => write!(f, "#{}", self.0),
        }
    }
}

/// One maze-part cell: its neighbor lists, populated exactly once at maze
/// construction from the topology provider.
#[derive(Debug, Clone)]
pub struct Cell {
    /// Maze-part neighbors only.
    pub(crate) neighbors: SmallVec<[CellId; 6]>,
    /// Full per-direction slots, possibly outer cells, `None` where the
    /// topology has no slot in that direction.
    pub(crate) directed: SmallVec<[Option<CellId>; 6]>,
}

impl Cell {
    pub(crate) fn from_slots(directed: SmallVec<[Option<CellId>; 6]>) -> Self {
        let neighbors = directed
            .iter()
            .flatten()
            .filter(|cell| !cell.is_outer())
            .copied()
            .collect();
        Cell { neighbors, directed }
    }

    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }

    pub fn directed_neighbors(&self) -> &[Option<CellId>] {
        &self.directed
    }
}
