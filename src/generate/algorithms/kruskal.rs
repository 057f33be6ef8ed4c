use rand::seq::SliceRandom as _;

use crate::{
    dset::DisjointSet,
    error::GenError,
    generate::{GenState, MazeAlgorithm, StepResult},
    graph::{CellId, Edge},
};

/// Randomized Kruskal's: shuffle all inner walls, open one whenever its two
/// sides still belong to different components.
///
/// Cells never become "visited" one by one here; every cell starts as its own
/// singleton component, so the visited marks default to true for the whole
/// run.
#[derive(Debug, Default)]
pub struct Kruskals {
    walls: Vec<Edge>,
    sets: DisjointSet<CellId>,
    started: bool,
}

impl Kruskals {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MazeAlgorithm for Kruskals {
    fn name(&self) -> &'static str {
        "kruskal"
    }

    fn visited_default(&self) -> bool {
        true
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
        if !self.started {
            self.started = true;
            self.walls = state.maze.inner_edges();
            self.walls.shuffle(&mut state.rng);
            self.sets = DisjointSet::with_capacity(state.maze.cell_count());
            for cell in state.maze.iter_ids() {
                self.sets.add(cell);
            }
        }

        while let Some(wall) = self.walls.pop() {
            let (a, b) = wall.cells();
            if !self.sets.union(&a, &b) {
                continue;
            }
            state.connect(a, b)?;
            state.select(Some(a));
            return Ok(StepResult::Snapshot);
        }

        Ok(StepResult::Done)
    }
}
