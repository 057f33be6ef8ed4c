use rand::Rng as _;

use crate::{
    error::GenError,
    generate::{GenState, MazeAlgorithm, StepResult},
    graph::{CellId, Edge},
};

/// Edge-based Prim: keep a bag of candidate walls touching the tree, open a
/// random one whenever exactly one of its sides is already visited.
///
/// The bag may hold stale walls (both sides absorbed since insertion) and
/// duplicates; they are skipped silently.
#[derive(Debug, Default)]
pub struct PrimEdge {
    walls: Vec<Edge>,
    started: bool,
}

impl PrimEdge {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_walls(&mut self, state: &GenState, cell: CellId) {
        for &n in state.maze().neighbors(cell) {
            self.walls.push(Edge::new(cell, n));
        }
    }
}

impl MazeAlgorithm for PrimEdge {
    fn name(&self) -> &'static str {
        "prim (edge)"
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
        if !self.started {
            self.started = true;
            let start = state.start_cell();
            state.mark_visited(start, true);
            state.select(Some(start));
            self.add_walls(state, start);
            return Ok(StepResult::Snapshot);
        }

        while !self.walls.is_empty() {
            let idx = state.rng.gen_range(0..self.walls.len());
            let wall = self.walls.swap_remove(idx);
            let (a, b) = wall.cells();

            let fresh = match (state.visited.get(a), state.visited.get(b)) {
                (true, false) => b,
                (false, true) => a,
                // stale: both sides absorbed since this wall was queued
                _ => continue,
            };

            state.connect(a, b)?;
            state.mark_visited(fresh, true);
            state.select(Some(fresh));
            self.add_walls(state, fresh);
            return Ok(StepResult::Snapshot);
        }

        Ok(StepResult::Done)
    }
}
