use rand::Rng as _;

use super::{cell_at, require_rectangle};
use crate::{
    error::GenError,
    generate::{GenState, MazeAlgorithm, StepResult},
    graph::Maze,
};

/// Sidewinder: carve horizontal runs row by row, closing each run by
/// connecting one random member downward; the last row, which has nowhere to
/// go down, becomes one continuous corridor. Only valid on a plain
/// rectangular orthogonal grid.
#[derive(Debug)]
pub struct Sidewinder {
    /// Probability that a run keeps extending horizontally.
    horizontal_bias: f64,
    pos: i32,
    run_start: i32,
}

impl Sidewinder {
    pub fn new(horizontal_bias: f64) -> Result<Self, GenError> {
        if !(0.0..=1.0).contains(&horizontal_bias) {
            return Err(GenError::ProbabilityRange(horizontal_bias));
        }
        Ok(Self {
            horizontal_bias,
            pos: 0,
            run_start: 0,
        })
    }
}

impl MazeAlgorithm for Sidewinder {
    fn name(&self) -> &'static str {
        "sidewinder"
    }

    fn check_topology(&self, maze: &Maze) -> Result<(), GenError> {
        require_rectangle(maze, self.name()).map(|_| ())
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
        let size = require_rectangle(&state.maze, self.name())?;
        if self.pos >= size.product() {
            return Ok(StepResult::Done);
        }

        let (x, y) = (self.pos % size.0, self.pos / size.0);
        let cell = cell_at(size, x, y);
        state.mark_visited(cell, true);
        state.select(Some(cell));

        if y == size.1 - 1 {
            // last row: purely horizontal
            if x > 0 {
                state.connect(cell_at(size, x - 1, y), cell)?;
            }
        } else if x < size.0 - 1 && state.rng.gen_bool(self.horizontal_bias) {
            state.connect(cell, cell_at(size, x + 1, y))?;
        } else {
            // close the run with one random downward link
            let rx = state.rng.gen_range(self.run_start..=x);
            state.connect(cell_at(size, rx, y), cell_at(size, rx, y + 1))?;
            self.run_start = (x + 1) % size.0;
        }

        self.pos += 1;
        Ok(StepResult::Snapshot)
    }
}
