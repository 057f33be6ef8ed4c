use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use super::{cell::Cell, cell::CellId, edge::Edge, path::Path};
use crate::{dims::Dims, error::GraphError, topology::Topology};

/// The connectivity substrate: a fixed cell array, the set of currently open
/// passages, and any entry/exit path requests.
///
/// The cell array and its neighbor slots are set once at construction from
/// the topology provider and never change; generation only toggles passages.
#[derive(Debug, Clone)]
pub struct Maze {
    cells: Vec<Cell>,
    connections: HashSet<Edge>,
    paths: Vec<Path>,
    rect: Option<Dims>,
}

impl Maze {
    /// Builds the base graph, querying the topology exactly once per cell.
    pub fn new(topology: &dyn Topology) -> Self {
        let count = topology.cell_count();
        let mut cells = Vec::with_capacity(count);
        for i in 0..count {
            let slots: SmallVec<[Option<CellId>; 6]> = topology
                .directed_neighbors(CellId(i as i32))
                .into_iter()
                .collect();
            cells.push(Cell::from_slots(slots));
        }

        Maze {
            cells,
            connections: HashSet::new(),
            paths: Vec::new(),
            rect: topology.rectangle(),
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, cell: CellId) -> Option<&Cell> {
        if cell.is_outer() {
            return None;
        }
        self.cells.get(cell.index())
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (CellId(i as i32), cell))
    }

    pub fn iter_ids(&self) -> impl Iterator<Item = CellId> {
        (0..self.cells.len() as i32).map(CellId)
    }

    /// Maze-part neighbors of `cell`; empty for outer or unknown ids.
    pub fn neighbors(&self, cell: CellId) -> &[CellId] {
        self.cell(cell).map(Cell::neighbors).unwrap_or(&[])
    }

    /// Full per-direction neighbor slots; empty for outer or unknown ids.
    pub fn directed_neighbors(&self, cell: CellId) -> &[Option<CellId>] {
        self.cell(cell).map(Cell::directed_neighbors).unwrap_or(&[])
    }

    /// `Some(size)` when the underlying topology is a plain rectangular
    /// orthogonal grid, captured at construction.
    pub fn rectangle(&self) -> Option<Dims> {
        self.rect
    }

    /// Opens the passage between two neighboring maze-part cells. Returns
    /// whether it was previously closed.
    pub fn connect(&mut self, a: CellId, b: CellId) -> Result<bool, GraphError> {
        self.ensure_inner_pair(a, b)?;
        let flipped = self.connections.insert(Edge::new(a, b));
        if flipped {
            self.invalidate_routes();
        }
        Ok(flipped)
    }

    /// Closes the passage between two neighboring maze-part cells. Returns
    /// whether it was previously open.
    pub fn block(&mut self, a: CellId, b: CellId) -> Result<bool, GraphError> {
        self.ensure_inner_pair(a, b)?;
        let flipped = self.connections.remove(&Edge::new(a, b));
        if flipped {
            self.invalidate_routes();
        }
        Ok(flipped)
    }

    /// Pure openness query, with the same precondition checks as
    /// [`connect`](Self::connect)/[`block`](Self::block).
    pub fn are_connected(&self, a: CellId, b: CellId) -> Result<bool, GraphError> {
        self.ensure_inner_pair(a, b)?;
        Ok(self.connections.contains(&Edge::new(a, b)))
    }

    pub fn is_open(&self, edge: Edge) -> bool {
        self.connections.contains(&edge)
    }

    pub fn connections(&self) -> &HashSet<Edge> {
        &self.connections
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of open passages at `cell`.
    pub fn open_degree(&self, cell: CellId) -> Result<usize, GraphError> {
        self.ensure_inner(cell)?;
        Ok(self
            .neighbors(cell)
            .iter()
            .filter(|&&n| self.connections.contains(&Edge::new(cell, n)))
            .count())
    }

    /// Cells with exactly one open passage.
    pub fn find_dead_ends(&self) -> Vec<CellId> {
        self.iter_ids()
            .filter(|&cell| {
                self.neighbors(cell)
                    .iter()
                    .filter(|&&n| self.connections.contains(&Edge::new(cell, n)))
                    .count()
                    == 1
            })
            .collect()
    }

    /// Enumerates closed base-graph edges, skipping any edge currently
    /// designated as a path's entry or exit.
    pub fn get_walls(&self, include_boundary: bool) -> Vec<Edge> {
        let path_edges: HashSet<Edge> = self
            .paths
            .iter()
            .flat_map(|p| [p.entry, p.exit])
            .collect();

        let mut walls = Vec::new();
        for (id, cell) in self.cells() {
            for &slot in cell.directed_neighbors().iter().flatten() {
                if slot.is_outer() {
                    if !include_boundary {
                        continue;
                    }
                } else if slot < id {
                    // inner pair, emit once
                    continue;
                }
                let edge = Edge::new(id, slot);
                if !self.connections.contains(&edge) && !path_edges.contains(&edge) {
                    walls.push(edge);
                }
            }
        }
        walls
    }

    /// All inner base-graph edges (each adjacent maze-part pair once).
    pub fn inner_edges(&self) -> Vec<Edge> {
        let mut edges = Vec::new();
        for (id, cell) in self.cells() {
            for &n in cell.neighbors() {
                if id < n {
                    edges.push(Edge::new(id, n));
                }
            }
        }
        edges
    }

    /// Depth-first discovery over all neighbor relations, guarded by
    /// `include`; traversal continues only through included inner edges and
    /// restarts from every unvisited component. Edges come back in discovery
    /// order, which linearizes the included subgraph into continuous strokes.
    pub fn find_graph_edges_dfs(&self, mut include: impl FnMut(Edge) -> bool) -> Vec<Edge> {
        let mut seen = vec![false; self.cells.len()];
        let mut reported: HashSet<Edge> = HashSet::new();
        let mut order = Vec::new();
        let mut stack = Vec::new();

        for start in 0..self.cells.len() {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            stack.push(CellId(start as i32));

            while let Some(cur) = stack.pop() {
                for &next in self.cells[cur.index()].directed_neighbors().iter().flatten() {
                    let edge = Edge::new(cur, next);
                    if reported.contains(&edge) || !include(edge) {
                        continue;
                    }
                    reported.insert(edge);
                    order.push(edge);
                    if !next.is_outer() && !seen[next.index()] {
                        seen[next.index()] = true;
                        stack.push(next);
                    }
                }
            }
        }
        order
    }

    /// Whether the base graph is connected. The spanning-tree algorithms
    /// assume a connected base graph and may never terminate on one that is
    /// not; callers handing in exotic topologies should check first.
    pub fn is_connected(&self) -> bool {
        if self.cells.is_empty() {
            return true;
        }
        let mut seen = vec![false; self.cells.len()];
        seen[0] = true;
        let mut reached = 1;
        let mut stack = vec![CellId(0)];
        while let Some(cur) = stack.pop() {
            for &n in self.neighbors(cur) {
                if !seen[n.index()] {
                    seen[n.index()] = true;
                    reached += 1;
                    stack.push(n);
                }
            }
        }
        reached == self.cells.len()
    }

    /// Shortest route through the passages graph, breadth-first.
    pub fn shortest_path(&self, from: CellId, to: CellId) -> Result<Vec<CellId>, GraphError> {
        self.ensure_inner(from)?;
        self.ensure_inner(to)?;

        if from == to {
            return Ok(vec![from]);
        }

        let mut came_from: HashMap<CellId, CellId> = HashMap::new();
        let mut queue = VecDeque::new();
        came_from.insert(from, from);
        queue.push_back(from);

        while let Some(cur) = queue.pop_front() {
            for &n in self.neighbors(cur) {
                if !self.connections.contains(&Edge::new(cur, n)) {
                    continue;
                }
                if came_from.contains_key(&n) {
                    continue;
                }
                came_from.insert(n, cur);
                if n == to {
                    let mut route = vec![to];
                    let mut cur = to;
                    while cur != from {
                        cur = came_from[&cur];
                        route.push(cur);
                    }
                    route.reverse();
                    return Ok(route);
                }
                queue.push_back(n);
            }
        }

        Err(GraphError::PathNotFound)
    }

    /// Registers an entry/exit request. Both edges must cross the boundary.
    pub fn add_path(&mut self, entry: Edge, exit: Edge) -> Result<usize, GraphError> {
        self.ensure_boundary_edge(entry)?;
        self.ensure_boundary_edge(exit)?;
        self.paths.push(Path::new(entry, exit));
        Ok(self.paths.len() - 1)
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn set_path_entry(&mut self, path: usize, entry: Edge) -> Result<(), GraphError> {
        self.ensure_boundary_edge(entry)?;
        let path = self.path_mut(path)?;
        path.entry = entry;
        path.route = None;
        Ok(())
    }

    pub fn set_path_exit(&mut self, path: usize, exit: Edge) -> Result<(), GraphError> {
        self.ensure_boundary_edge(exit)?;
        let path = self.path_mut(path)?;
        path.exit = exit;
        path.route = None;
        Ok(())
    }

    /// The path's route, computed lazily and cached until the next change.
    pub fn path_route(&mut self, path: usize) -> Result<&[CellId], GraphError> {
        self.path_mut(path)?;
        if self.paths[path].route.is_none() {
            let from = self.paths[path].entry.interior().unwrap();
            let to = self.paths[path].exit.interior().unwrap();
            let route = self.shortest_path(from, to)?;
            self.paths[path].route = Some(route);
        }
        Ok(self.paths[path].route.as_deref().unwrap())
    }

    fn path_mut(&mut self, path: usize) -> Result<&mut Path, GraphError> {
        self.paths
            .get_mut(path)
            .ok_or(GraphError::UnknownPath(path))
    }

    fn invalidate_routes(&mut self) {
        for path in &mut self.paths {
            path.route = None;
        }
    }

    fn ensure_inner(&self, cell: CellId) -> Result<(), GraphError> {
        if cell.is_outer() {
            return Err(GraphError::OuterCell(cell));
        }
        if cell.index() >= self.cells.len() {
            return Err(GraphError::UnknownCell(cell));
        }
        Ok(())
    }

    fn ensure_inner_pair(&self, a: CellId, b: CellId) -> Result<(), GraphError> {
        self.ensure_inner(a)?;
        self.ensure_inner(b)?;
        if !self.cells[a.index()].neighbors().contains(&b) {
            return Err(GraphError::NotNeighbors(a, b));
        }
        Ok(())
    }

    fn ensure_boundary_edge(&self, edge: Edge) -> Result<(), GraphError> {
        let Some(interior) = edge.interior() else {
            return Err(GraphError::NotBoundary(edge));
        };
        self.ensure_inner(interior)?;
        let outer = edge.other(interior).unwrap();
        if !self.cells[interior.index()]
            .directed_neighbors()
            .contains(&Some(outer))
        {
            return Err(GraphError::NotBoundary(edge));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{grid_dir, OrthogonalGrid};

    fn maze3() -> Maze {
        Maze::new(&OrthogonalGrid::new(3, 3))
    }

    #[test]
    fn connect_reports_prior_state() {
        let mut maze = maze3();
        assert!(maze.connect(CellId(0), CellId(1)).unwrap());
        assert!(!maze.connect(CellId(0), CellId(1)).unwrap());
        assert!(maze.are_connected(CellId(1), CellId(0)).unwrap());
        assert!(maze.block(CellId(0), CellId(1)).unwrap());
        assert!(!maze.block(CellId(0), CellId(1)).unwrap());
    }

    #[test]
    fn non_neighbors_are_rejected() {
        let mut maze = maze3();
        assert_eq!(
            maze.connect(CellId(0), CellId(8)),
            Err(GraphError::NotNeighbors(CellId(0), CellId(8)))
        );
        assert_eq!(
            maze.are_connected(CellId(0), CellId(2)),
            Err(GraphError::NotNeighbors(CellId(0), CellId(2)))
        );
    }

    #[test]
    fn outer_cells_are_rejected() {
        let mut maze = maze3();
        let outer = CellId::outer(grid_dir::LEFT);
        assert_eq!(
            maze.connect(outer, CellId(0)),
            Err(GraphError::OuterCell(outer))
        );
        assert_eq!(
            maze.block(CellId(0), CellId(-2)),
            Err(GraphError::OuterCell(CellId(-2)))
        );
    }

    #[test]
    fn dead_ends_count_single_open_passages() {
        let mut maze = maze3();
        maze.connect(CellId(0), CellId(1)).unwrap();
        maze.connect(CellId(1), CellId(2)).unwrap();
        let ends = maze.find_dead_ends();
        assert!(ends.contains(&CellId(0)));
        assert!(ends.contains(&CellId(2)));
        assert!(!ends.contains(&CellId(1)));
    }

    #[test]
    fn walls_exclude_path_edges() {
        let mut maze = maze3();
        let entry = Edge::new(CellId(0), CellId::outer(grid_dir::LEFT));
        let exit = Edge::new(CellId(8), CellId::outer(grid_dir::RIGHT));
        maze.add_path(entry, exit).unwrap();

        let walls = maze.get_walls(true);
        assert!(!walls.contains(&entry));
        assert!(!walls.contains(&exit));
        // a 3x3 grid has 12 inner walls; all still closed
        assert_eq!(maze.get_walls(false).len(), 12);

        maze.connect(CellId(0), CellId(1)).unwrap();
        assert_eq!(maze.get_walls(false).len(), 11);
    }

    #[test]
    fn path_route_is_cached_and_invalidated() {
        let mut maze = maze3();
        let entry = Edge::new(CellId(0), CellId::outer(grid_dir::TOP));
        let exit = Edge::new(CellId(2), CellId::outer(grid_dir::TOP));
        let path = maze.add_path(entry, exit).unwrap();

        assert!(matches!(
            maze.path_route(path),
            Err(GraphError::PathNotFound)
        ));

        maze.connect(CellId(0), CellId(1)).unwrap();
        maze.connect(CellId(1), CellId(2)).unwrap();
        assert_eq!(
            maze.path_route(path).unwrap(),
            &[CellId(0), CellId(1), CellId(2)]
        );
        assert!(maze.paths()[path].cached_route().is_some());

        // reassigning an edge clears the cache
        maze.set_path_exit(path, Edge::new(CellId(6), CellId::outer(grid_dir::BOTTOM)))
            .unwrap();
        assert!(maze.paths()[path].cached_route().is_none());
    }

    #[test]
    fn unknown_path_indices_are_rejected() {
        let mut maze = maze3();
        let boundary = Edge::new(CellId(0), CellId::outer(grid_dir::LEFT));
        assert_eq!(
            maze.set_path_entry(0, boundary),
            Err(GraphError::UnknownPath(0))
        );
        assert_eq!(
            maze.set_path_exit(3, boundary),
            Err(GraphError::UnknownPath(3))
        );
        assert!(matches!(maze.path_route(1), Err(GraphError::UnknownPath(1))));
    }

    #[test]
    fn non_boundary_path_edges_are_rejected() {
        let mut maze = maze3();
        let inner = Edge::new(CellId(0), CellId(1));
        let boundary = Edge::new(CellId(8), CellId::outer(grid_dir::RIGHT));
        assert_eq!(
            maze.add_path(inner, boundary),
            Err(GraphError::NotBoundary(inner))
        );
        // cell 4 is in the middle, it has no boundary slots
        let fake = Edge::new(CellId(4), CellId::outer(grid_dir::LEFT));
        assert_eq!(maze.add_path(fake, boundary), Err(GraphError::NotBoundary(fake)));
    }

    #[test]
    fn connectivity_check_spots_isolated_components() {
        assert!(maze3().is_connected());

        // two cells, no neighbor relation at all
        #[derive(Debug)]
        struct TwoIslands;
        impl crate::topology::Topology for TwoIslands {
            fn cell_count(&self) -> usize {
                2
            }
            fn dimensions(&self) -> usize {
                2
            }
            fn directed_neighbors(&self, _cell: CellId) -> Vec<Option<CellId>> {
                vec![None, None]
            }
        }
        assert!(!Maze::new(&TwoIslands).is_connected());
    }

    #[test]
    fn dfs_walk_linearizes_open_passages() {
        let mut maze = maze3();
        maze.connect(CellId(0), CellId(1)).unwrap();
        maze.connect(CellId(1), CellId(4)).unwrap();
        maze.connect(CellId(7), CellId(8)).unwrap();

        let maze_ref = maze.clone();
        let edges = maze.find_graph_edges_dfs(|e| maze_ref.is_open(e));
        assert_eq!(edges.len(), 3);
        // the disconnected component is still discovered
        assert!(edges.contains(&Edge::new(CellId(7), CellId(8))));
    }
}
