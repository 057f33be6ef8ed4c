use hashbrown::HashMap;

use crate::{
    error::GraphError,
    graph::{CellId, Edge, Maze},
};

/// Direction of a directed link relative to its normalized edge: `Forward`
/// points from the lower-id endpoint to the higher one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDir {
    Forward,
    Backward,
}

impl LinkDir {
    fn of(edge: Edge, from: CellId) -> LinkDir {
        if edge.a() == from {
            LinkDir::Forward
        } else {
            LinkDir::Backward
        }
    }

    /// Source/target of a link with this direction over `edge`.
    pub fn endpoints(self, edge: Edge) -> (CellId, CellId) {
        match self {
            LinkDir::Forward => (edge.a(), edge.b()),
            LinkDir::Backward => (edge.b(), edge.a()),
        }
    }
}

/// Direction overlay over a maze, tracking one direction per managed edge.
///
/// Only edges connected through the overlay appear in the map. Connecting
/// records the direction and opens the underlying passage; disconnecting
/// only undoes a relation the overlay itself recorded, so removing the
/// opposite direction is a no-op.
#[derive(Debug, Clone, Default)]
pub struct DirectedMaze {
    links: HashMap<Edge, LinkDir>,
}

impl DirectedMaze {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn links(&self) -> &HashMap<Edge, LinkDir> {
        &self.links
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Whether a `from -> to` link is currently recorded.
    pub fn has_link(&self, from: CellId, to: CellId) -> bool {
        let edge = Edge::new(from, to);
        self.links.get(&edge) == Some(&LinkDir::of(edge, from))
    }

    /// Records `from -> to` and opens the underlying passage. A prior record
    /// on the same edge (either direction) is overwritten. Returns whether
    /// the passage was previously closed.
    pub fn connect(
        &mut self,
        maze: &mut Maze,
        from: CellId,
        to: CellId,
    ) -> Result<bool, GraphError> {
        let flipped = maze.connect(from, to)?;
        let edge = Edge::new(from, to);
        self.links.insert(edge, LinkDir::of(edge, from));
        Ok(flipped)
    }

    /// Undoes a recorded `from -> to` link and closes the passage. Returns
    /// `false` without touching anything when no such link exists, including
    /// when only the opposite direction is recorded.
    pub fn disconnect(
        &mut self,
        maze: &mut Maze,
        from: CellId,
        to: CellId,
    ) -> Result<bool, GraphError> {
        if !self.has_link(from, to) {
            return Ok(false);
        }
        self.links.remove(&Edge::new(from, to));
        maze.block(from, to)?;
        Ok(true)
    }

    /// Target of `cell`'s outgoing link, scanning its managed edges.
    pub fn outgoing(&self, maze: &Maze, cell: CellId) -> Option<CellId> {
        maze.neighbors(cell)
            .iter()
            .copied()
            .find(|&n| self.has_link(cell, n))
    }

    /// All outgoing targets of `cell`; the Origin Shift invariant keeps this
    /// at most one, but the overlay itself does not enforce it.
    pub fn outgoing_all(&self, maze: &Maze, cell: CellId) -> Vec<CellId> {
        maze.neighbors(cell)
            .iter()
            .copied()
            .filter(|&n| self.has_link(cell, n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::OrthogonalGrid;

    #[test]
    fn connect_records_direction_and_opens() {
        let mut maze = Maze::new(&OrthogonalGrid::new(2, 2));
        let mut dir = DirectedMaze::new();

        assert!(dir.connect(&mut maze, CellId(1), CellId(0)).unwrap());
        assert!(maze.are_connected(CellId(0), CellId(1)).unwrap());
        assert!(dir.has_link(CellId(1), CellId(0)));
        assert!(!dir.has_link(CellId(0), CellId(1)));
    }

    #[test]
    fn disconnect_only_undoes_own_relation() {
        let mut maze = Maze::new(&OrthogonalGrid::new(2, 2));
        let mut dir = DirectedMaze::new();
        dir.connect(&mut maze, CellId(0), CellId(1)).unwrap();

        // opposite direction was never recorded
        assert!(!dir.disconnect(&mut maze, CellId(1), CellId(0)).unwrap());
        assert!(maze.are_connected(CellId(0), CellId(1)).unwrap());

        assert!(dir.disconnect(&mut maze, CellId(0), CellId(1)).unwrap());
        assert!(!maze.are_connected(CellId(0), CellId(1)).unwrap());
        assert_eq!(dir.link_count(), 0);
    }

    #[test]
    fn reconnect_overwrites_direction() {
        let mut maze = Maze::new(&OrthogonalGrid::new(2, 2));
        let mut dir = DirectedMaze::new();
        dir.connect(&mut maze, CellId(0), CellId(1)).unwrap();
        dir.connect(&mut maze, CellId(1), CellId(0)).unwrap();

        assert!(dir.has_link(CellId(1), CellId(0)));
        assert!(!dir.has_link(CellId(0), CellId(1)));
        assert_eq!(dir.link_count(), 1);
    }

    #[test]
    fn outgoing_scans_neighbors() {
        let mut maze = Maze::new(&OrthogonalGrid::new(3, 1));
        let mut dir = DirectedMaze::new();
        dir.connect(&mut maze, CellId(1), CellId(2)).unwrap();

        assert_eq!(dir.outgoing(&maze, CellId(1)), Some(CellId(2)));
        assert_eq!(dir.outgoing(&maze, CellId(2)), None);
        assert_eq!(dir.outgoing(&maze, CellId(0)), None);
    }
}
