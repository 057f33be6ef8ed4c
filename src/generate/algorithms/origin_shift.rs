use std::collections::VecDeque;

use log::trace;

use crate::{
    error::{GenError, GraphError},
    generate::{
        directed::DirectedMaze,
        selectors::{Decay, HeatMapSelector, NeighborSelector},
        GenState, MazeAlgorithm, StateChange, StepResult,
    },
    graph::{CellId, Edge},
};

/// Configuration of an Origin Shift run.
#[derive(Debug)]
pub struct OriginShiftOptions {
    /// Policy picking the neighbor the origin rotates toward.
    pub selector: Box<dyn NeighborSelector>,
    /// Hard cap on rotation steps.
    pub max_iterations: Option<usize>,
    /// Keep rotating until the origin has touched every cell.
    pub until_all_visited: bool,
}

impl Default for OriginShiftOptions {
    fn default() -> Self {
        Self {
            selector: Box::new(
                HeatMapSelector::new(Decay::Multiplicative { factor: 0.97 })
                    .expect("0.97 is a valid decay factor"),
            ),
            max_iterations: None,
            until_all_visited: true,
        }
    }
}

#[derive(Debug)]
enum Phase {
    Init,
    Seed {
        queue: VecDeque<CellId>,
        seen: Vec<bool>,
    },
    Run,
    Finish,
    Done,
}

/// Origin Shift: maintain a directed in-tree rooted at a moving origin and
/// rotate it one edge at a time.
///
/// The tree is seeded by a BFS from the start cell, every cell pointing at
/// its parent. Each rotation points the origin at a selected neighbor, moves
/// the origin there and strips the new origin's old outgoing link, which
/// keeps the overlay an in-tree (and the maze a spanning tree) after every
/// step. Runs are bounded by `max_iterations`, `until_all_visited`, or both;
/// a configuration with neither is rejected up front.
#[derive(Debug)]
pub struct OriginShift {
    options: OriginShiftOptions,
    directed: DirectedMaze,
    origin: Option<CellId>,
    iterations: usize,
    phase: Phase,
}

impl OriginShift {
    pub fn new(options: OriginShiftOptions) -> Result<Self, GenError> {
        if options.max_iterations.is_none() && !options.until_all_visited {
            return Err(GenError::UnboundedRun);
        }
        Ok(Self {
            options,
            directed: DirectedMaze::new(),
            origin: None,
            iterations: 0,
            phase: Phase::Init,
        })
    }

    /// The directed-edge overlay, for mid-run or post-run inspection.
    pub fn directed(&self) -> &DirectedMaze {
        &self.directed
    }

    /// Current root of the in-tree; `None` before the first step.
    pub fn origin(&self) -> Option<CellId> {
        self.origin
    }

    fn done_rotating(&self, state: &GenState) -> bool {
        if let Some(max) = self.options.max_iterations {
            if self.iterations >= max {
                return true;
            }
        }
        self.options.until_all_visited && state.all_visited()
    }
}

fn link(
    directed: &mut DirectedMaze,
    state: &mut GenState,
    from: CellId,
    to: CellId,
) -> Result<(), GraphError> {
    if directed.connect(&mut state.maze, from, to)? {
        state.emit(StateChange::Passage {
            edge: Edge::new(from, to),
            open: true,
        });
    }
    Ok(())
}

fn unlink(
    directed: &mut DirectedMaze,
    state: &mut GenState,
    from: CellId,
    to: CellId,
) -> Result<(), GraphError> {
    if directed.disconnect(&mut state.maze, from, to)? {
        state.emit(StateChange::Passage {
            edge: Edge::new(from, to),
            open: false,
        });
    }
    Ok(())
}

impl MazeAlgorithm for OriginShift {
    fn name(&self) -> &'static str {
        "origin shift"
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
        loop {
            match &mut self.phase {
                Phase::Init => {
                    let origin = state.start_cell();
                    self.options.selector.prime(&state.maze);
                    self.origin = Some(origin);
                    state.mark_visited(origin, true);
                    state.select(Some(origin));

                    let mut seen = vec![false; state.maze.cell_count()];
                    seen[origin.index()] = true;
                    self.phase = Phase::Seed {
                        queue: VecDeque::from([origin]),
                        seen,
                    };
                    return Ok(StepResult::Snapshot);
                }
                Phase::Seed { queue, seen } => {
                    let Some(cell) = queue.pop_front() else {
                        self.phase = Phase::Run;
                        continue;
                    };
                    let mut fresh = Vec::new();
                    for &n in state.maze.neighbors(cell) {
                        if !seen[n.index()] {
                            seen[n.index()] = true;
                            queue.push_back(n);
                            fresh.push(n);
                        }
                    }
                    // children point at their BFS parent, toward the origin
                    for n in fresh {
                        link(&mut self.directed, state, n, cell)?;
                    }
                    state.select(Some(cell));
                    return Ok(StepResult::Snapshot);
                }
                Phase::Run => {
                    if self.done_rotating(state) {
                        self.phase = Phase::Finish;
                        continue;
                    }
                    let origin = self.origin.unwrap_or_else(|| state.start_cell());
                    let Some(next) =
                        self.options
                            .selector
                            .pick(&state.maze, &mut state.rng, origin)
                    else {
                        self.phase = Phase::Finish;
                        continue;
                    };

                    trace!("origin shift: rotate {origin} -> {next}");

                    // point the old origin at the new one, then strip the new
                    // origin's own outgoing link so it becomes the root
                    link(&mut self.directed, state, origin, next)?;
                    for target in self.directed.outgoing_all(&state.maze, next) {
                        unlink(&mut self.directed, state, next, target)?;
                    }

                    self.origin = Some(next);
                    self.iterations += 1;
                    state.mark_visited(next, true);
                    state.select(Some(next));
                    return Ok(StepResult::Snapshot);
                }
                Phase::Finish => {
                    for cell in state.maze.iter_ids() {
                        state.mark_visited(cell, true);
                    }
                    self.phase = Phase::Done;
                    return Ok(StepResult::Snapshot);
                }
                Phase::Done => return Ok(StepResult::Done),
            }
        }
    }
}
