use rand::{seq::SliceRandom as _, Rng as _};

use crate::{
    error::GenError,
    generate::{GenState, MazeAlgorithm, StepResult},
    graph::CellId,
};

/// Cell-based Prim: grow the tree by absorbing a random frontier cell and
/// connecting it to one random neighbor already in the tree.
///
/// Frontier membership is mirrored in the highlight marks, which doubles as
/// the duplicate guard and as the animation overlay.
#[derive(Debug, Default)]
pub struct PrimCell {
    frontier: Vec<CellId>,
    started: bool,
}

impl PrimCell {
    pub fn new() -> Self {
        Self::default()
    }

    fn extend_frontier(&mut self, state: &mut GenState, cell: CellId) {
        let fresh: Vec<CellId> = state
            .maze
            .neighbors(cell)
            .iter()
            .copied()
            .filter(|&n| !state.visited.get(n) && !state.highlighted.get(n))
            .collect();
        for n in fresh {
            state.highlight(n, true);
            self.frontier.push(n);
        }
    }
}

impl MazeAlgorithm for PrimCell {
    fn name(&self) -> &'static str {
        "prim (cell)"
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
        if !self.started {
            self.started = true;
            let start = state.start_cell();
            state.mark_visited(start, true);
            state.select(Some(start));
            self.extend_frontier(state, start);
            return Ok(StepResult::Snapshot);
        }

        if self.frontier.is_empty() {
            return Ok(StepResult::Done);
        }

        let idx = state.rng.gen_range(0..self.frontier.len());
        let cell = self.frontier.swap_remove(idx);
        state.highlight(cell, false);

        let inside: Vec<CellId> = state
            .maze
            .neighbors(cell)
            .iter()
            .copied()
            .filter(|&n| state.visited.get(n))
            .collect();
        let &anchor = inside
            .choose(&mut state.rng)
            .expect("frontier cells border the tree");

        state.connect(cell, anchor)?;
        state.mark_visited(cell, true);
        state.select(Some(cell));
        self.extend_frontier(state, cell);
        Ok(StepResult::Snapshot)
    }
}
