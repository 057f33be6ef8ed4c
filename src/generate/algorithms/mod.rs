mod aldous_broder;
mod binary_tree;
mod depth_first_search;
mod growing_tree;
mod hunt_and_kill;
mod kruskal;
mod origin_shift;
mod prim_cell;
mod prim_edge;
mod recursive_division;
mod sidewinder;
mod wilson;

pub use aldous_broder::AldousBroder;
pub use binary_tree::BinaryTree;
pub use depth_first_search::DepthFirstSearch;
pub use growing_tree::{ActivePick, GrowingTree};
pub use hunt_and_kill::HuntAndKill;
pub use kruskal::Kruskals;
pub use origin_shift::{OriginShift, OriginShiftOptions};
pub use prim_cell::PrimCell;
pub use prim_edge::PrimEdge;
pub use recursive_division::RecursiveDivision;
pub use sidewinder::Sidewinder;
pub use wilson::Wilson;

use super::MazeAlgorithm;
use crate::{
    dims::Dims,
    error::GenError,
    graph::{CellId, Maze},
    registry::Registry,
};

/// Fails with a topology mismatch unless the maze sits on a plain
/// rectangular orthogonal grid.
pub(crate) fn require_rectangle(maze: &Maze, algorithm: &'static str) -> Result<Dims, GenError> {
    match maze.rectangle() {
        Some(size) if size.product() as usize == maze.cell_count() => Ok(size),
        _ => Err(GenError::TopologyMismatch { algorithm }),
    }
}

/// Row-major cell lookup on a rectangular grid.
pub(crate) fn cell_at(size: Dims, x: i32, y: i32) -> CellId {
    debug_assert!(size.contains(Dims(x, y)));
    CellId(y * size.0 + x)
}

/// Factory signature used by the algorithm registry.
pub type AlgorithmFactory = fn() -> Box<dyn MazeAlgorithm>;

/// All built-in algorithms by name, with Kruskal's as the default. External
/// harnesses (CLIs, benchmark drivers) look algorithms up here.
pub fn default_registry() -> Registry<AlgorithmFactory> {
    let mut registry: Registry<AlgorithmFactory> =
        Registry::with_default(|| Box::new(Kruskals::new()));

    registry.register("kruskal".into(), || Box::new(Kruskals::new()));
    registry.register("depth-first-search".into(), || {
        Box::new(DepthFirstSearch::new())
    });
    registry.register("prim-cell".into(), || Box::new(PrimCell::new()));
    registry.register("prim-edge".into(), || Box::new(PrimEdge::new()));
    registry.register("wilson".into(), || Box::new(Wilson::new()));
    registry.register("aldous-broder".into(), || Box::new(AldousBroder::uniform()));
    registry.register("hunt-and-kill".into(), || Box::new(HuntAndKill::new()));
    registry.register("growing-tree".into(), || {
        Box::new(GrowingTree::new(ActivePick::Newest))
    });
    registry.register("binary-tree".into(), || Box::new(BinaryTree::new()));
    registry.register("sidewinder".into(), || {
        Box::new(Sidewinder::new(0.5).expect("0.5 is a valid bias"))
    });
    registry.register("recursive-division".into(), || {
        Box::new(RecursiveDivision::new(0.5).expect("0.5 is a valid bias"))
    });
    registry.register("origin-shift".into(), || {
        Box::new(OriginShift::new(OriginShiftOptions::default()).expect("default options are valid"))
    });

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generate::{GenOptions, Generator, StepResult},
        graph::{Edge, Maze},
        topology::OrthogonalGrid,
    };
    use hashbrown::HashSet;

    fn spanning_tree_check(maze: &Maze) {
        assert_eq!(maze.connection_count(), maze.cell_count() - 1);

        // connected: a DFS over open edges reaches every cell
        let mut seen = HashSet::new();
        let mut stack = vec![CellId(0)];
        seen.insert(CellId(0));
        while let Some(cell) = stack.pop() {
            for &n in maze.neighbors(cell) {
                if maze.are_connected(cell, n).unwrap() && seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        assert_eq!(seen.len(), maze.cell_count());
    }

    fn generate(factory: &AlgorithmFactory, size: (i32, i32), seed: u64) -> Maze {
        let maze = Maze::new(&OrthogonalGrid::new(size.0, size.1));
        Generator::new(maze, factory(), GenOptions::seeded(seed))
            .unwrap()
            .generate()
            .unwrap()
    }

    #[test]
    fn every_algorithm_spans_the_grid() {
        let registry = default_registry();
        for name in [
            "kruskal",
            "depth-first-search",
            "prim-cell",
            "prim-edge",
            "wilson",
            "aldous-broder",
            "hunt-and-kill",
            "growing-tree",
            "binary-tree",
            "sidewinder",
            "recursive-division",
        ] {
            let factory = registry.get(name).unwrap();
            for (size, seed) in [((5, 5), 42), ((7, 3), 1), ((2, 9), 1234)] {
                let maze = generate(factory, size, seed);
                spanning_tree_check(&maze);
            }
        }
    }

    #[test]
    fn registry_default_spans_like_any_named_entry() {
        let registry = default_registry();
        assert_eq!(registry.keys().count(), 12);

        let factory = registry.get_default().unwrap();
        let maze = Maze::new(&OrthogonalGrid::new(5, 5));
        let maze = Generator::new(maze, factory(), GenOptions::seeded(8))
            .unwrap()
            .generate()
            .unwrap();
        spanning_tree_check(&maze);
    }

    #[test]
    fn identical_seeds_reproduce_identical_runs() {
        let registry = default_registry();
        for name in ["kruskal", "wilson", "hunt-and-kill", "origin-shift"] {
            let factory = registry.get(name).unwrap();
            let a = generate(factory, (6, 6), 99);
            let b = generate(factory, (6, 6), 99);
            let ea: HashSet<&Edge> = a.connections().iter().collect();
            let eb: HashSet<&Edge> = b.connections().iter().collect();
            assert_eq!(ea, eb, "{name} diverged between equal seeds");
        }
    }

    #[test]
    fn identical_seeds_reproduce_identical_snapshots() {
        let registry = default_registry();
        let factory = registry.get("depth-first-search").unwrap();

        let trace = |seed| {
            let maze = Maze::new(&OrthogonalGrid::new(5, 5));
            let mut gen = Generator::new(maze, factory(), GenOptions::seeded(seed)).unwrap();
            let mut trace = Vec::new();
            while gen.step().unwrap() == StepResult::Snapshot {
                let mut edges: Vec<Edge> = gen.maze().connections().iter().copied().collect();
                edges.sort_by_key(|e| (e.a(), e.b()));
                trace.push((edges, gen.selected(), gen.visited().count(true)));
            }
            trace
        };

        assert_eq!(trace(7), trace(7));
        assert_ne!(trace(7), trace(8));
    }

    #[test]
    fn kruskal_5x5_seed_42_yields_a_tree() {
        let maze = Maze::new(&OrthogonalGrid::new(5, 5));
        let maze = Generator::new(maze, Kruskals::new(), GenOptions::seeded(42))
            .unwrap()
            .generate()
            .unwrap();
        assert_eq!(maze.connection_count(), 24);
        spanning_tree_check(&maze);
    }

    #[test]
    fn grid_only_algorithms_reject_other_topologies() {
        // a topology that enumerates neighbors but is not a rectangle
        #[derive(Debug)]
        struct Triangle;
        impl crate::topology::Topology for Triangle {
            fn cell_count(&self) -> usize {
                3
            }
            fn dimensions(&self) -> usize {
                2
            }
            fn directed_neighbors(&self, cell: CellId) -> Vec<Option<CellId>> {
                (0..3)
                    .map(|i| (i != cell.0).then(|| CellId(i)))
                    .collect()
            }
        }

        let maze = Maze::new(&Triangle);
        let err = Generator::new(maze, BinaryTree::new(), GenOptions::default());
        assert!(matches!(
            err,
            Err(GenError::TopologyMismatch { algorithm: "binary tree" })
        ));
    }
}
