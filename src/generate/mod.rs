pub mod algorithms;
pub mod braid;
pub mod directed;
pub mod selectors;

use std::{collections::VecDeque, fmt};

use log::debug;
use rand::{thread_rng, Rng as _, SeedableRng as _};

use crate::{
    error::{GenError, GraphError},
    graph::{CellId, Edge, Maze},
    marks::Marks,
    progress::ProgressHandle,
};

/// Random number generator used for anything where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Outcome of one generation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// The shared state was mutated in place; observe it before stepping on.
    Snapshot,
    /// The sequence is exhausted; no mutation happened.
    Done,
}

/// One observable mutation of the shared generation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Passage { edge: Edge, open: bool },
    Visited { cell: CellId, value: bool },
    Highlighted { cell: CellId, value: bool },
    Selected { old: Option<CellId>, new: Option<CellId> },
}

pub type ChangeObserver = Box<dyn FnMut(&StateChange) + Send>;

/// The stepwise-generation contract every algorithm (and post-processor)
/// implements.
///
/// An algorithm is an explicit state machine: each [`advance`](Self::advance)
/// call applies one unit of in-place mutation to the shared state and hands
/// control back. The sequence is finite (given a valid configuration),
/// non-restartable, and deterministic for a fixed seed.
pub trait MazeAlgorithm: fmt::Debug + Send {
    /// Name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Fails fast when the algorithm cannot run on the maze's topology.
    fn check_topology(&self, _maze: &Maze) -> Result<(), GenError> {
        Ok(())
    }

    /// Initial value of the visited marks for this algorithm's run.
    fn visited_default(&self) -> bool {
        false
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError>;
}

impl MazeAlgorithm for Box<dyn MazeAlgorithm> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn check_topology(&self, maze: &Maze) -> Result<(), GenError> {
        (**self).check_topology(maze)
    }

    fn visited_default(&self) -> bool {
        (**self).visited_default()
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
        (**self).advance(state)
    }
}

/// Construction-time parameters shared by every generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenOptions {
    /// Explicit seed for reproducible runs; `None` draws one from thread
    /// entropy.
    pub seed: Option<u64>,
    /// Cell the algorithm starts from, where it cares; `None` picks randomly.
    pub start: Option<CellId>,
}

impl GenOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            start: None,
        }
    }
}

/// Shared mutable state of one generation run: the maze, the per-run random
/// source, the two mark layers, and the selected cell.
///
/// All mutation helpers funnel through the single change-notification hook,
/// so a consumer registering an observer sees every passage flip, mark flip,
/// and selection move in order.
pub struct GenState {
    pub(crate) maze: Maze,
    pub(crate) rng: Random,
    pub(crate) visited: Marks,
    pub(crate) highlighted: Marks,
    selected: Option<CellId>,
    start: Option<CellId>,
    visited_count: usize,
    on_change: Option<ChangeObserver>,
}

impl GenState {
    fn new(maze: Maze, seed: u64, start: Option<CellId>, visited_default: bool) -> Self {
        let cells = maze.cell_count();
        Self {
            maze,
            rng: Random::seed_from_u64(seed),
            visited: Marks::new(cells, visited_default),
            highlighted: Marks::new(cells, false),
            selected: None,
            start,
            visited_count: if visited_default { cells } else { 0 },
            on_change: None,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn visited(&self) -> &Marks {
        &self.visited
    }

    pub fn highlighted(&self) -> &Marks {
        &self.highlighted
    }

    pub fn selected(&self) -> Option<CellId> {
        self.selected
    }

    /// Cells marked visited so far; kept incrementally, cheap to poll.
    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    pub fn all_visited(&self) -> bool {
        self.visited_count == self.maze.cell_count()
    }

    /// The configured start cell, or a random one.
    pub fn start_cell(&mut self) -> CellId {
        match self.start {
            Some(cell) => cell,
            None => self.random_cell(),
        }
    }

    pub fn random_cell(&mut self) -> CellId {
        CellId(self.rng.gen_range(0..self.maze.cell_count() as i32))
    }

    /// Opens a passage, notifying on an actual flip.
    pub fn connect(&mut self, a: CellId, b: CellId) -> Result<bool, GraphError> {
        let flipped = self.maze.connect(a, b)?;
        if flipped {
            self.emit(StateChange::Passage {
                edge: Edge::new(a, b),
                open: true,
            });
        }
        Ok(flipped)
    }

    /// Closes a passage, notifying on an actual flip.
    pub fn block(&mut self, a: CellId, b: CellId) -> Result<bool, GraphError> {
        let flipped = self.maze.block(a, b)?;
        if flipped {
            self.emit(StateChange::Passage {
                edge: Edge::new(a, b),
                open: false,
            });
        }
        Ok(flipped)
    }

    pub fn mark_visited(&mut self, cell: CellId, value: bool) -> bool {
        let flipped = self.visited.set(cell, value);
        if flipped {
            if value {
                self.visited_count += 1;
            } else {
                self.visited_count -= 1;
            }
            self.emit(StateChange::Visited { cell, value });
        }
        flipped
    }

    pub fn highlight(&mut self, cell: CellId, value: bool) -> bool {
        let flipped = self.highlighted.set(cell, value);
        if flipped {
            self.emit(StateChange::Highlighted { cell, value });
        }
        flipped
    }

    /// Moves the selection. Always notifies, even when reselecting the same
    /// cell; the selection is the canonical "where the algorithm is".
    pub fn select(&mut self, cell: Option<CellId>) {
        let old = self.selected;
        self.selected = cell;
        self.emit(StateChange::Selected { old, new: cell });
    }

    pub(crate) fn emit(&mut self, change: StateChange) {
        if let Some(observer) = &mut self.on_change {
            observer(&change);
        }
    }
}

impl fmt::Debug for GenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenState")
            .field("maze", &self.maze)
            .field("visited", &self.visited)
            .field("highlighted", &self.highlighted)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Main,
    Post,
    Done,
}

/// Drives one algorithm (plus registered post-processors) over one maze.
///
/// Step-by-step consumption pulls one snapshot at a time via
/// [`step`](Self::step); run-to-completion via [`run`](Self::run) or
/// [`generate`](Self::generate). The emitted snapshot is always the live
/// state behind the accessors, never a copy.
#[derive(Debug)]
pub struct Generator<A: MazeAlgorithm = Box<dyn MazeAlgorithm>> {
    state: GenState,
    algorithm: A,
    post: VecDeque<Box<dyn MazeAlgorithm>>,
    phase: Phase,
    progress: ProgressHandle,
    seed: u64,
}

impl<A: MazeAlgorithm> Generator<A> {
    /// Builds a generator, failing fast on a topology the algorithm cannot
    /// run on or an out-of-range start cell.
    pub fn new(maze: Maze, algorithm: A, opts: GenOptions) -> Result<Self, GenError> {
        algorithm.check_topology(&maze)?;
        if let Some(start) = opts.start {
            if start.is_outer() {
                return Err(GraphError::OuterCell(start).into());
            }
            if start.index() >= maze.cell_count() {
                return Err(GraphError::UnknownCell(start).into());
            }
        }

        let seed = opts.seed.unwrap_or_else(|| thread_rng().gen());
        debug!(
            "generator: {} over {} cells, seed {}",
            algorithm.name(),
            maze.cell_count(),
            seed
        );

        let phase = if maze.cell_count() == 0 {
            Phase::Done
        } else {
            Phase::Main
        };
        let progress = ProgressHandle::new();
        progress.lock().from = maze.cell_count();

        Ok(Self {
            state: GenState::new(maze, seed, opts.start, algorithm.visited_default()),
            algorithm,
            post: VecDeque::new(),
            phase,
            progress,
            seed,
        })
    }

    /// Appends a post-processor; its step sequence runs after the main
    /// algorithm's sequence is exhausted.
    pub fn push_post(&mut self, post: Box<dyn MazeAlgorithm>) {
        self.post.push_back(post);
    }

    pub fn set_observer(&mut self, observer: ChangeObserver) {
        self.state.on_change = Some(observer);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn maze(&self) -> &Maze {
        self.state.maze()
    }

    pub fn visited(&self) -> &Marks {
        self.state.visited()
    }

    pub fn highlighted(&self) -> &Marks {
        self.state.highlighted()
    }

    pub fn selected(&self) -> Option<CellId> {
        self.state.selected()
    }

    /// The driven algorithm, for overlay inspection mid-run (e.g. Origin
    /// Shift's directed-edge map).
    pub fn algorithm(&self) -> &A {
        &self.algorithm
    }

    pub fn progress_handle(&self) -> ProgressHandle {
        self.progress.clone()
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    /// Advances by one snapshot. `Snapshot` means the live state was mutated
    /// and should be observed now; `Done` means the whole sequence, post-
    /// processors included, is exhausted.
    pub fn step(&mut self) -> Result<StepResult, GenError> {
        loop {
            match self.phase {
                Phase::Done => return Ok(StepResult::Done),
                Phase::Main => match self.algorithm.advance(&mut self.state)? {
                    StepResult::Snapshot => {
                        self.progress.lock().done = self.state.visited_count();
                        return Ok(StepResult::Snapshot);
                    }
                    StepResult::Done => self.phase = Phase::Post,
                },
                Phase::Post => match self.post.front_mut() {
                    None => {
                        self.phase = Phase::Done;
                        self.progress.lock().finish();
                        debug!("generator: {} finished", self.algorithm.name());
                        return Ok(StepResult::Done);
                    }
                    Some(post) => match post.advance(&mut self.state)? {
                        StepResult::Snapshot => return Ok(StepResult::Snapshot),
                        StepResult::Done => {
                            self.post.pop_front();
                        }
                    },
                },
            }
        }
    }

    /// Consumes the whole step sequence. Honors [`ProgressHandle::stop`];
    /// the maze stays consistent (if incomplete) when stopped early.
    pub fn run(&mut self) -> Result<(), GenError> {
        loop {
            if self.progress.is_stopped() {
                return Err(GenError::Stopped);
            }
            match self.step()? {
                StepResult::Snapshot => {}
                StepResult::Done => return Ok(()),
            }
        }
    }

    /// Run to completion and hand back the finished maze.
    pub fn generate(mut self) -> Result<Maze, GenError> {
        self.run()?;
        Ok(self.state.maze)
    }

    pub fn into_maze(self) -> Maze {
        self.state.maze
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{generate::algorithms::DepthFirstSearch, topology::OrthogonalGrid};

    fn record_events<A: MazeAlgorithm>(
        gen: &mut Generator<A>,
    ) -> Arc<Mutex<Vec<StateChange>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        gen.set_observer(Box::new(move |change| sink.lock().unwrap().push(*change)));
        events
    }

    #[test]
    fn observer_sees_every_mutation_in_order() {
        let maze = Maze::new(&OrthogonalGrid::new(3, 3));
        let mut gen =
            Generator::new(maze, DepthFirstSearch::new(), GenOptions::seeded(21)).unwrap();
        let events = record_events(&mut gen);
        gen.run().unwrap();

        let events = events.lock().unwrap();
        let opened = events
            .iter()
            .filter(|e| matches!(e, StateChange::Passage { open: true, .. }))
            .count();
        let visited = events
            .iter()
            .filter(|e| matches!(e, StateChange::Visited { value: true, .. }))
            .count();
        assert_eq!(opened, 8);
        assert_eq!(visited, 9);

        // the start cell is marked visited, then selected
        assert!(matches!(events[0], StateChange::Visited { value: true, .. }));
        assert!(matches!(events[1], StateChange::Selected { old: None, .. }));

        // every later visit mark arrives right after the carve that caused it
        for i in 2..events.len() {
            if let StateChange::Visited { cell, .. } = events[i] {
                match events[i - 1] {
                    StateChange::Passage { edge, open: true } => {
                        assert!(edge.a() == cell || edge.b() == cell);
                    }
                    other => panic!("visit of {cell} not preceded by its carve: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn reselecting_the_same_cell_still_notifies() {
        #[derive(Debug)]
        struct Reselect {
            steps: u8,
        }
        impl MazeAlgorithm for Reselect {
            fn name(&self) -> &'static str {
                "reselect"
            }
            fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
                if self.steps == 2 {
                    return Ok(StepResult::Done);
                }
                self.steps += 1;
                state.select(Some(CellId(0)));
                Ok(StepResult::Snapshot)
            }
        }

        let maze = Maze::new(&OrthogonalGrid::new(2, 2));
        let mut gen = Generator::new(maze, Reselect { steps: 0 }, GenOptions::seeded(0)).unwrap();
        let events = record_events(&mut gen);
        gen.run().unwrap();

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                StateChange::Selected {
                    old: None,
                    new: Some(CellId(0)),
                },
                StateChange::Selected {
                    old: Some(CellId(0)),
                    new: Some(CellId(0)),
                },
            ]
        );
    }

    #[test]
    fn stop_flag_aborts_the_run_without_further_mutation() {
        let maze = Maze::new(&OrthogonalGrid::new(5, 5));
        let mut gen =
            Generator::new(maze, DepthFirstSearch::new(), GenOptions::seeded(3)).unwrap();
        for _ in 0..4 {
            gen.step().unwrap();
        }
        let carved = gen.maze().connection_count();

        gen.progress_handle().stop();
        assert!(matches!(gen.run(), Err(GenError::Stopped)));
        assert_eq!(gen.maze().connection_count(), carved);
        assert!(!gen.is_done());
    }
}
