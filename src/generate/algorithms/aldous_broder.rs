use crate::{
    error::GenError,
    generate::{
        selectors::{NeighborSelector, UniformSelector},
        GenState, MazeAlgorithm, StepResult,
    },
    graph::CellId,
};

/// Aldous–Broder: random-walk the whole graph, carving whenever the walk
/// first reaches an unvisited cell.
///
/// Produces uniformly random spanning trees with the uniform selector, but
/// terminates only once every cell has been visited, so it can be slow on
/// large graphs. A heat-map selector biases the walk toward unexplored
/// regions at the cost of uniformity.
#[derive(Debug)]
pub struct AldousBroder {
    selector: Box<dyn NeighborSelector>,
    current: Option<CellId>,
}

impl AldousBroder {
    pub fn new(selector: Box<dyn NeighborSelector>) -> Self {
        Self {
            selector,
            current: None,
        }
    }

    pub fn uniform() -> Self {
        Self::new(Box::new(UniformSelector))
    }
}

impl MazeAlgorithm for AldousBroder {
    fn name(&self) -> &'static str {
        "aldous-broder"
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
        let Some(current) = self.current else {
            let start = state.start_cell();
            state.mark_visited(start, true);
            state.select(Some(start));
            self.selector.prime(&state.maze);
            self.current = Some(start);
            return Ok(StepResult::Snapshot);
        };

        if state.all_visited() {
            return Ok(StepResult::Done);
        }

        let Some(next) = self.selector.pick(&state.maze, &mut state.rng, current) else {
            // isolated cell; the base graph is not connected
            return Ok(StepResult::Done);
        };

        if !state.visited.get(next) {
            state.connect(current, next)?;
            state.mark_visited(next, true);
        }
        self.current = Some(next);
        state.select(Some(next));
        Ok(StepResult::Snapshot)
    }
}
