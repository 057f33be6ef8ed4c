use rand::Rng as _;

use super::{cell_at, require_rectangle};
use crate::{
    dims::Dims,
    error::GenError,
    generate::{GenState, MazeAlgorithm, StepResult},
    graph::Maze,
};

#[derive(Debug, Clone, Copy)]
struct Region {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

/// Recursive Division: start fully open, then recursively bisect rectangular
/// regions with a wall containing one random gap. Orientation follows the
/// region's longer side, biased on ties. Only valid on a plain rectangular
/// orthogonal grid.
#[derive(Debug)]
pub struct RecursiveDivision {
    /// Probability of a vertical wall when a region is square.
    orientation_bias: f64,
    stack: Vec<Region>,
    started: bool,
}

impl RecursiveDivision {
    pub fn new(orientation_bias: f64) -> Result<Self, GenError> {
        if !(0.0..=1.0).contains(&orientation_bias) {
            return Err(GenError::ProbabilityRange(orientation_bias));
        }
        Ok(Self {
            orientation_bias,
            stack: Vec::new(),
            started: false,
        })
    }

    fn divide(&mut self, state: &mut GenState, size: Dims, region: Region) -> Result<(), GenError> {
        let Region { x, y, w, h } = region;
        let vertical = if w > h {
            true
        } else if h > w {
            false
        } else {
            state.rng.gen_bool(self.orientation_bias)
        };

        if vertical {
            let sx = state.rng.gen_range(x + 1..x + w);
            let gap = state.rng.gen_range(y..y + h);
            for row in y..y + h {
                if row != gap {
                    state.block(cell_at(size, sx - 1, row), cell_at(size, sx, row))?;
                }
            }
            state.select(Some(cell_at(size, sx, gap)));
            self.stack.push(Region { x, y, w: sx - x, h });
            self.stack.push(Region {
                x: sx,
                y,
                w: x + w - sx,
                h,
            });
        } else {
            let sy = state.rng.gen_range(y + 1..y + h);
            let gap = state.rng.gen_range(x..x + w);
            for col in x..x + w {
                if col != gap {
                    state.block(cell_at(size, col, sy - 1), cell_at(size, col, sy))?;
                }
            }
            state.select(Some(cell_at(size, gap, sy)));
            self.stack.push(Region { x, y, w, h: sy - y });
            self.stack.push(Region {
                x,
                y: sy,
                w,
                h: y + h - sy,
            });
        }
        Ok(())
    }
}

impl MazeAlgorithm for RecursiveDivision {
    fn name(&self) -> &'static str {
        "recursive division"
    }

    fn check_topology(&self, maze: &Maze) -> Result<(), GenError> {
        require_rectangle(maze, self.name()).map(|_| ())
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
        let size = require_rectangle(&state.maze, self.name())?;

        if !self.started {
            self.started = true;
            // open everything; the walls come back one bisection at a time
            for edge in state.maze.inner_edges() {
                let (a, b) = edge.cells();
                state.connect(a, b)?;
            }
            for cell in state.maze.iter_ids() {
                state.mark_visited(cell, true);
            }
            self.stack.push(Region {
                x: 0,
                y: 0,
                w: size.0,
                h: size.1,
            });
            return Ok(StepResult::Snapshot);
        }

        while let Some(region) = self.stack.pop() {
            if region.w < 2 || region.h < 2 {
                continue;
            }
            self.divide(state, size, region)?;
            return Ok(StepResult::Snapshot);
        }
        Ok(StepResult::Done)
    }
}
