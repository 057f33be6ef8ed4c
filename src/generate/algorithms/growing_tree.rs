use std::fmt;

use rand::{seq::SliceRandom as _, Rng as _};

use crate::{
    error::GenError,
    generate::{GenState, MazeAlgorithm, Random, StepResult},
    graph::CellId,
};

/// Strategy for choosing which active cell to work on next. `Newest` behaves
/// like the randomized backtracker, `Random` like cell-based Prim; `Custom`
/// injects any index-picking function.
pub enum ActivePick {
    Newest,
    Oldest,
    Random,
    Custom(Box<dyn FnMut(&mut Random, usize) -> usize + Send>),
}

impl ActivePick {
    fn pick(&mut self, rng: &mut Random, len: usize) -> usize {
        match self {
            ActivePick::Newest => len - 1,
            ActivePick::Oldest => 0,
            ActivePick::Random => rng.gen_range(0..len),
            ActivePick::Custom(f) => f(rng, len).min(len - 1),
        }
    }
}

impl fmt::Debug for ActivePick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivePick::Newest => write!(f, "Newest"),
            ActivePick::Oldest => write!(f, "Oldest"),
            ActivePick::Random => write!(f, "Random"),
            ActivePick::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Growing Tree: keep a list of active cells, repeatedly pick one via the
/// injected strategy, carve toward a random unvisited neighbor, and retire
/// cells with none left. The active list is mirrored in the highlight marks.
#[derive(Debug)]
pub struct GrowingTree {
    pick: ActivePick,
    active: Vec<CellId>,
    started: bool,
}

impl GrowingTree {
    pub fn new(pick: ActivePick) -> Self {
        Self {
            pick,
            active: Vec::new(),
            started: false,
        }
    }
}

impl MazeAlgorithm for GrowingTree {
    fn name(&self) -> &'static str {
        "growing tree"
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
        if !self.started {
            self.started = true;
            let start = state.start_cell();
            state.mark_visited(start, true);
            state.highlight(start, true);
            state.select(Some(start));
            self.active.push(start);
            return Ok(StepResult::Snapshot);
        }

        if self.active.is_empty() {
            return Ok(StepResult::Done);
        }

        let idx = self.pick.pick(&mut state.rng, self.active.len());
        let cell = self.active[idx];

        let unvisited: Vec<CellId> = state
            .maze
            .neighbors(cell)
            .iter()
            .copied()
            .filter(|&n| !state.visited.get(n))
            .collect();

        match unvisited.choose(&mut state.rng) {
            Some(&next) => {
                state.connect(cell, next)?;
                state.mark_visited(next, true);
                state.highlight(next, true);
                state.select(Some(next));
                self.active.push(next);
            }
            None => {
                // order matters to Newest/Oldest, so no swap_remove
                self.active.remove(idx);
                state.highlight(cell, false);
                state.select(Some(cell));
            }
        }
        Ok(StepResult::Snapshot)
    }
}
