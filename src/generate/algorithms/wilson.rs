use rand::seq::SliceRandom as _;

use crate::{
    error::GenError,
    generate::{GenState, MazeAlgorithm, StepResult},
    graph::CellId,
};

#[derive(Debug)]
enum Phase {
    Start,
    Hunt,
    Walk,
    Carve,
}

/// Wilson's algorithm: loop-erased random walks from each unvisited cell
/// until they hit the visited set, then carve the walk.
///
/// The in-progress walk is mirrored in the highlight marks; revisiting a
/// highlighted cell erases the loop back to that cell's first occurrence.
#[derive(Debug)]
pub struct Wilson {
    phase: Phase,
    hunt_pos: i32,
    walk: Vec<CellId>,
    carve_at: usize,
}

impl Wilson {
    pub fn new() -> Self {
        Self {
            phase: Phase::Start,
            hunt_pos: 0,
            walk: Vec::new(),
            carve_at: 0,
        }
    }

    /// Truncates the walk back to the first occurrence of `hit`,
    /// unhighlighting everything dropped.
    fn erase_loop(walk: &mut Vec<CellId>, state: &mut GenState, hit: CellId) {
        let first = walk
            .iter()
            .position(|&c| c == hit)
            .expect("hit cell is highlighted, so it is on the walk");
        for cell in walk.drain(first + 1..) {
            state.highlight(cell, false);
        }
    }
}

impl Default for Wilson {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeAlgorithm for Wilson {
    fn name(&self) -> &'static str {
        "wilson"
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
        loop {
            match self.phase {
                Phase::Start => {
                    let root = state.start_cell();
                    state.mark_visited(root, true);
                    state.select(Some(root));
                    self.phase = Phase::Hunt;
                    return Ok(StepResult::Snapshot);
                }
                Phase::Hunt => {
                    // cells below hunt_pos stay visited forever, no rescan
                    while self.hunt_pos < state.maze.cell_count() as i32 {
                        let cell = CellId(self.hunt_pos);
                        if !state.visited.get(cell) {
                            self.walk.clear();
                            self.walk.push(cell);
                            state.highlight(cell, true);
                            state.select(Some(cell));
                            self.phase = Phase::Walk;
                            return Ok(StepResult::Snapshot);
                        }
                        self.hunt_pos += 1;
                    }
                    return Ok(StepResult::Done);
                }
                Phase::Walk => {
                    let tail = *self.walk.last().unwrap();
                    let &next = state
                        .maze
                        .neighbors(tail)
                        .choose(&mut state.rng)
                        .expect("connected base graphs have no isolated cells");

                    if state.visited.get(next) {
                        self.walk.push(next);
                        self.carve_at = 0;
                        self.phase = Phase::Carve;
                        continue;
                    }
                    if state.highlighted.get(next) {
                        Self::erase_loop(&mut self.walk, state, next);
                        state.select(Some(next));
                        return Ok(StepResult::Snapshot);
                    }
                    self.walk.push(next);
                    state.highlight(next, true);
                    state.select(Some(next));
                    return Ok(StepResult::Snapshot);
                }
                Phase::Carve => {
                    if self.carve_at + 1 >= self.walk.len() {
                        self.walk.clear();
                        self.phase = Phase::Hunt;
                        continue;
                    }
                    let from = self.walk[self.carve_at];
                    let to = self.walk[self.carve_at + 1];
                    state.connect(from, to)?;
                    state.mark_visited(from, true);
                    state.highlight(from, false);
                    state.select(Some(to));
                    self.carve_at += 1;
                    return Ok(StepResult::Snapshot);
                }
            }
        }
    }
}
