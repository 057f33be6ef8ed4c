use super::{cell::CellId, edge::Edge};

/// An entry/exit solution request: two boundary edges plus a cached
/// breadth-first route between their interior endpoints.
///
/// The cache is cleared whenever either edge is reassigned or any passage
/// flips, and recomputed lazily by [`Maze::path_route`](super::Maze::path_route).
#[derive(Debug, Clone)]
pub struct Path {
    pub(crate) entry: Edge,
    pub(crate) exit: Edge,
    pub(crate) route: Option<Vec<CellId>>,
}

impl Path {
    pub(crate) fn new(entry: Edge, exit: Edge) -> Self {
        Self {
            entry,
            exit,
            route: None,
        }
    }

    pub fn entry(&self) -> Edge {
        self.entry
    }

    pub fn exit(&self) -> Edge {
        self.exit
    }

    /// The cached route, if it has been computed since the last change.
    pub fn cached_route(&self) -> Option<&[CellId]> {
        self.route.as_deref()
    }
}
