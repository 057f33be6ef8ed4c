use std::fmt;

use crate::{dims::Dims, graph::CellId};

/// Narrow capability interface the generation core needs from a topology
/// provider.
///
/// `directed_neighbors` is invoked exactly once per cell at maze
/// construction time; everything else the core does goes through the graph
/// it builds from those answers. Geometry (point coordinates, shapes) stays
/// with the provider and its rendering layer.
pub trait Topology: fmt::Debug {
    /// Number of maze-part cells.
    fn cell_count(&self) -> usize;

    /// Number of spatial dimensions, for providers that care.
    fn dimensions(&self) -> usize;

    /// Ordered per-direction neighbor slots of `cell`. A slot holds the
    /// neighbor in that direction, the outer cell (`CellId::outer(d)`) where
    /// the direction leaves the maze, or `None` where the topology has no
    /// slot at all.
    fn directed_neighbors(&self, cell: CellId) -> Vec<Option<CellId>>;

    /// `Some(size)` when the cells form a plain rectangular orthogonal grid
    /// in row-major order. Algorithms that only run on such grids check this
    /// at generator construction.
    fn rectangle(&self) -> Option<Dims> {
        None
    }
}

/// Direction slot order used by [`OrthogonalGrid`].
pub mod grid_dir {
    pub const LEFT: usize = 0;
    pub const RIGHT: usize = 1;
    pub const TOP: usize = 2;
    pub const BOTTOM: usize = 3;
}

/// Minimal rectangular orthogonal grid provider.
///
/// Cells are indexed row-major (`y * width + x`). Ships with the crate
/// because the grid-only algorithms, tests and benches need a concrete
/// rectangular topology; richer providers live outside the core.
#[derive(Debug, Clone, Copy)]
pub struct OrthogonalGrid {
    size: Dims,
}

impl OrthogonalGrid {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid must be non-empty");
        Self {
            size: Dims(width, height),
        }
    }

    pub fn size(&self) -> Dims {
        self.size
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Option<CellId> {
        self.size
            .contains(Dims(x, y))
            .then(|| CellId(y * self.size.0 + x))
    }

    fn slot(&self, x: i32, y: i32, dir: usize) -> Option<CellId> {
        Some(self.cell_at(x, y).unwrap_or(CellId::outer(dir)))
    }
}

impl Topology for OrthogonalGrid {
    fn cell_count(&self) -> usize {
        self.size.product() as usize
    }

    fn dimensions(&self) -> usize {
        2
    }

    fn directed_neighbors(&self, cell: CellId) -> Vec<Option<CellId>> {
        let Dims(w, _) = self.size;
        let (x, y) = (cell.0 % w, cell.0 / w);

        vec![
            self.slot(x - 1, y, grid_dir::LEFT),
            self.slot(x + 1, y, grid_dir::RIGHT),
            self.slot(x, y - 1, grid_dir::TOP),
            self.slot(x, y + 1, grid_dir::BOTTOM),
        ]
    }

    fn rectangle(&self) -> Option<Dims> {
        Some(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_cell_has_two_outer_slots() {
        let grid = OrthogonalGrid::new(3, 3);
        let slots = grid.directed_neighbors(CellId(0));
        assert_eq!(slots[grid_dir::LEFT], Some(CellId::outer(grid_dir::LEFT)));
        assert_eq!(slots[grid_dir::TOP], Some(CellId::outer(grid_dir::TOP)));
        assert_eq!(slots[grid_dir::RIGHT], Some(CellId(1)));
        assert_eq!(slots[grid_dir::BOTTOM], Some(CellId(3)));
    }

    #[test]
    fn row_major_indexing() {
        let grid = OrthogonalGrid::new(4, 2);
        assert_eq!(grid.cell_at(3, 1), Some(CellId(7)));
        assert_eq!(grid.cell_at(4, 0), None);
    }
}
