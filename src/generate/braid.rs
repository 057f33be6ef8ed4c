use rand::seq::SliceRandom as _;

use super::{GenState, MazeAlgorithm, StepResult};
use crate::{error::GenError, graph::CellId};

#[derive(Debug)]
enum BraidPhase {
    Classify,
    Open { queue: Vec<CellId> },
    Done,
}

/// Post-processor removing a fraction of dead ends by opening one extra
/// blocked edge per selected dead end.
///
/// Dead ends with a single topological neighbor cannot be un-braided and are
/// only marked settled (highlighted); the rest are "removable" and
/// `round(braidness * removable)` of them are resolved, chosen at random
/// without replacement.
#[derive(Debug)]
pub struct Braider {
    braidness: f64,
    phase: BraidPhase,
}

impl Braider {
    pub fn new(braidness: f64) -> Result<Self, GenError> {
        if !(0.0..=1.0).contains(&braidness) {
            return Err(GenError::BraidnessRange(braidness));
        }
        Ok(Self {
            braidness,
            phase: BraidPhase::Classify,
        })
    }
}

impl MazeAlgorithm for Braider {
    fn name(&self) -> &'static str {
        "braider"
    }

    fn advance(&mut self, state: &mut GenState) -> Result<StepResult, GenError> {
        loop {
            match &mut self.phase {
                BraidPhase::Classify => {
                    let dead_ends = state.maze.find_dead_ends();
                    let mut removable = Vec::new();
                    let mut settled_any = false;

                    for cell in dead_ends {
                        let neighbors = state.maze.neighbors(cell);
                        if neighbors.len() <= 1 {
                            // complete dead end, nothing to open
                            settled_any |= state.highlight(cell, true);
                        } else {
                            removable.push(cell);
                        }
                    }

                    let take = (self.braidness * removable.len() as f64).round() as usize;
                    removable.shuffle(&mut state.rng);
                    removable.truncate(take);

                    let empty = removable.is_empty();
                    self.phase = BraidPhase::Open { queue: removable };
                    if empty && !settled_any {
                        continue;
                    }
                    return Ok(StepResult::Snapshot);
                }
                BraidPhase::Open { queue } => {
                    let Some(cell) = queue.pop() else {
                        self.phase = BraidPhase::Done;
                        continue;
                    };

                    // an earlier opening may have resolved this one already
                    if state.maze.open_degree(cell)? != 1 {
                        continue;
                    }

                    let blocked: Vec<CellId> = state
                        .maze
                        .neighbors(cell)
                        .iter()
                        .copied()
                        .filter(|&n| !state.maze.are_connected(cell, n).unwrap_or(true))
                        .collect();
                    let Some(&n) = blocked.choose(&mut state.rng) else {
                        continue;
                    };

                    state.select(Some(cell));
                    state.connect(cell, n)?;
                    return Ok(StepResult::Snapshot);
                }
                BraidPhase::Done => return Ok(StepResult::Done),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generate::{algorithms::Kruskals, GenOptions, GenState, Generator},
        graph::Maze,
        topology::OrthogonalGrid,
    };

    #[test]
    fn braidness_must_be_a_fraction() {
        assert!(matches!(
            Braider::new(1.5),
            Err(GenError::BraidnessRange(_))
        ));
        assert!(matches!(
            Braider::new(-0.1),
            Err(GenError::BraidnessRange(_))
        ));
        assert!(Braider::new(0.0).is_ok());
        assert!(Braider::new(1.0).is_ok());
    }

    #[test]
    fn zero_braidness_changes_nothing() {
        let maze = Maze::new(&OrthogonalGrid::new(6, 6));
        let mut gen = Generator::new(maze, Kruskals::new(), GenOptions::seeded(11)).unwrap();
        gen.push_post(Box::new(Braider::new(0.0).unwrap()));
        let maze = gen.generate().unwrap();

        // still a spanning tree: braiding opened no extra edge
        assert_eq!(maze.connection_count(), maze.cell_count() - 1);
    }

    #[test]
    fn openings_only_target_still_standing_dead_ends() {
        // a C-shaped corridor: cells 0 and 3 are dead ends, cell 4 is
        // isolated; opening 0-3 resolves both dead ends at once
        let mut base = Maze::new(&OrthogonalGrid::new(3, 3));
        for (a, b) in [(0, 1), (1, 2), (2, 5), (5, 8), (7, 8), (6, 7), (3, 6)] {
            base.connect(CellId(a), CellId(b)).unwrap();
        }

        for seed in 0..30 {
            let mut state = GenState::new(base.clone(), seed, None, false);
            let mut braider = Braider::new(1.0).unwrap();
            loop {
                let before = state.maze().connections().clone();
                let dead = state.maze().find_dead_ends();
                match braider.advance(&mut state).unwrap() {
                    StepResult::Done => break,
                    StepResult::Snapshot => {
                        for edge in state.maze().connections().difference(&before) {
                            let (a, b) = edge.cells();
                            assert!(
                                dead.contains(&a) || dead.contains(&b),
                                "seed {seed}: opened {edge} with no dead end left on it"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn full_braidness_removes_every_removable_dead_end() {
        let grid = OrthogonalGrid::new(6, 6);
        let plain = Generator::new(Maze::new(&grid), Kruskals::new(), GenOptions::seeded(42))
            .unwrap()
            .generate()
            .unwrap();
        assert!(!plain.find_dead_ends().is_empty());

        let mut gen =
            Generator::new(Maze::new(&grid), Kruskals::new(), GenOptions::seeded(42)).unwrap();
        gen.push_post(Box::new(Braider::new(1.0).unwrap()));
        let maze = gen.generate().unwrap();

        // every remaining dead end has a single topological neighbor; a 6x6
        // orthogonal grid has none of those
        for cell in maze.find_dead_ends() {
            assert_eq!(maze.neighbors(cell).len(), 1);
        }
        assert!(maze.find_dead_ends().is_empty());
        assert!(maze.connection_count() > maze.cell_count() - 1);
    }
}
