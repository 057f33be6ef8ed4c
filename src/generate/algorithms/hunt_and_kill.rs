use rand::seq::SliceRandom as _;

use crate::{
    error::GenError,
    generate::{GenState, MazeAlgorithm, StepResult},
    graph::CellId,
};

#[derive(Debug)]
enum Phase {
    Start,
    Walk { current: CellId },
    Hunt { scan: i32 },
}

/// Hunt-and-Kill: random-walk into unvisited cells until stuck, then scan
/// linearly ("hunt") for the first unvisited cell adjacent to the carved
/// region and continue from there. The hunt emits one snapshot per scanned
/// cell so observers can watch the scan progress.
#[derive(Debug)]
pub struct HuntAndKill {
    phase: Phase,
}

impl HuntAndKill {
    pub fn new() -> Self {
        Self { phase: Phase::Start }
    }
}

impl Default for HuntAndKill {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeAlgorithm for HuntAndKill {
    fn name(&self) -> &'static str {
        "hunt-and-kill"
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
        loop {
            match self.phase {
                Phase::Start => {
                    let start = state.start_cell();
                    state.mark_visited(start, true);
                    state.select(Some(start));
                    self.phase = Phase::Walk { current: start };
                    return Ok(StepResult::Snapshot);
                }
                Phase::Walk { current } => {
                    let unvisited: Vec<CellId> = state
                        .maze
                        .neighbors(current)
                        .iter()
                        .copied()
                        .filter(|&n| !state.visited.get(n))
                        .collect();

                    let Some(&next) = unvisited.choose(&mut state.rng) else {
                        self.phase = Phase::Hunt { scan: 0 };
                        continue;
                    };

                    state.connect(current, next)?;
                    state.mark_visited(next, true);
                    state.select(Some(next));
                    self.phase = Phase::Walk { current: next };
                    return Ok(StepResult::Snapshot);
                }
                Phase::Hunt { scan } => {
                    if scan >= state.maze.cell_count() as i32 {
                        return Ok(StepResult::Done);
                    }
                    let cell = CellId(scan);
                    self.phase = Phase::Hunt { scan: scan + 1 };
                    state.select(Some(cell));

                    if !state.visited.get(cell) {
                        let inside: Vec<CellId> = state
                            .maze
                            .neighbors(cell)
                            .iter()
                            .copied()
                            .filter(|&n| state.visited.get(n))
                            .collect();
                        if let Some(&anchor) = inside.choose(&mut state.rng) {
                            state.connect(cell, anchor)?;
                            state.mark_visited(cell, true);
                            self.phase = Phase::Walk { current: cell };
                        }
                    }
                    // one snapshot per scanned cell
                    return Ok(StepResult::Snapshot);
                }
            }
        }
    }
}
