use rand::seq::SliceRandom as _;

use crate::{
    error::GenError,
    generate::{GenState, MazeAlgorithm, StepResult},
    graph::CellId,
};

/// Randomized backtracker: carve toward a random unvisited neighbor, pop the
/// stack on dead ends. Backtracking pops emit their own snapshots so the
/// cursor is animatable.
#[derive(Debug, Default)]
pub struct DepthFirstSearch {
    stack: Vec<CellId>,
    started: bool,
}

impl DepthFirstSearch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MazeAlgorithm for DepthFirstSearch {
    fn name(&self) -> &'static str {
        "depth-first search"
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
        if !self.started {
            self.started = true;
            let start = state.start_cell();
            state.mark_visited(start, true);
            state.select(Some(start));
            self.stack.push(start);
            return Ok(StepResult::Snapshot);
        }

        let Some(&current) = self.stack.last() else {
            return Ok(StepResult::Done);
        };

        let unvisited: Vec<CellId> = state
            .maze
            .neighbors(current)
            .iter()
            .copied()
            .filter(|&n| !state.visited.get(n))
            .collect();

        if let Some(&chosen) = unvisited.choose(&mut state.rng) {
            state.connect(current, chosen)?;
            state.mark_visited(chosen, true);
            state.select(Some(chosen));
            self.stack.push(chosen);
        } else {
            self.stack.pop();
            state.select(self.stack.last().copied());
        }
        Ok(StepResult::Snapshot)
    }
}
