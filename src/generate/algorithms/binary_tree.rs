use rand::seq::SliceRandom as _;

use super::{cell_at, require_rectangle};
use crate::{
    error::GenError,
    generate::{GenState, MazeAlgorithm, StepResult},
    graph::Maze,
};

/// Binary Tree: every cell independently connects to a random one of its two
/// primary directional neighbors (left or top), where present. Only valid on
/// a plain rectangular orthogonal grid.
#[derive(Debug, Default)]
pub struct BinaryTree {
    pos: i32,
}

impl BinaryTree {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MazeAlgorithm for BinaryTree {
    fn name(&self) -> &'static str {
        "binary tree"
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

        let mut primary = Vec::with_capacity(2);
        if x > 0 {
            primary.push(cell_at(size, x - 1, y));
        }
        if y > 0 {
            primary.push(cell_at(size, x, y - 1));
        }
        if let Some(&partner) = primary.choose(&mut state.rng) {
            state.connect(cell, partner)?;
        }

        state.mark_visited(cell, true);
        state.select(Some(cell));
        self.pos += 1;
        Ok(StepResult::Snapshot)
    }
}
