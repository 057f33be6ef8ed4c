use std::fmt;

use super::cell::CellId;

/// Unordered pair of cells, normalized so the lower id comes first.
///
/// In the base graph an edge is any geometrically adjacent pair, boundary
/// pairs included; in the passages graph it is a currently open link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge(CellId, CellId);

impl Edge {
    pub fn new(a: CellId, b: CellId) -> Self {
        if a <= b {
            Edge(a, b)
        } else {
            Edge(b, a)
        }
    }

    pub fn a(self) -> CellId {
        self.0
    }

    pub fn b(self) -> CellId {
        self.1
    }

    pub fn cells(self) -> (CellId, CellId) {
        (self.0, self.1)
    }

    /// The endpoint that is not `cell`, if `cell` is an endpoint at all.
    pub fn other(self, cell: CellId) -> Option<CellId> {
        if cell == self.0 {
            Some(self.1)
        } else if cell == self.1 {
            Some(self.0)
        } else {
            None
        }
    }

    /// Whether one endpoint lies outside the maze.
    pub fn is_boundary(self) -> bool {
        self.0.is_outer() != self.1.is_outer()
    }

    /// The maze-part endpoint of a boundary edge.
    pub fn interior(self) -> Option<CellId> {
        match (self.0.is_outer(), self.1.is_outer()) {
            (true, false) => Some(self.1),
            (false, true) => Some(self.0),
            _ => None,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
