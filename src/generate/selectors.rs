use std::fmt;

use rand::{seq::SliceRandom as _, Rng as _};

use super::Random;
use crate::{
    error::GenError,
    graph::{CellId, Maze},
};

/// Policy for choosing the next cell in a random walk.
///
/// A selector is primed once per generator run and then repeatedly asked to
/// pick a neighbor of the given cell; it never mutates the maze.
pub trait NeighborSelector: fmt::Debug + Send {
    /// Called once before the run starts.
    fn prime(&mut self, _maze: &Maze) {}

    /// Picks a maze-part neighbor of `cell`, `None` if it has none.
    fn pick(&mut self, maze: &Maze, rng: &mut Random, cell: CellId) -> Option<CellId>;
}

/// Uniform choice among the cell's neighbors.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSelector;

impl NeighborSelector for UniformSelector {
    fn pick(&mut self, maze: &Maze, rng: &mut Random, cell: CellId) -> Option<CellId> {
        maze.neighbors(cell).choose(rng).copied()
    }
}

/// Temperature decay policy of the heat-map selector, applied to the source
/// cell on every pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decay {
    /// `temp - step`, floored at zero. `step` must be non-negative.
    Linear { step: f64 },
    /// `temp * exp(-rate)`. `rate` must be positive.
    Exponential { rate: f64 },
    /// `temp * factor`. `factor` must lie in `(0, 1)`.
    Multiplicative { factor: f64 },
    /// `1 / visits`.
    InverseVisits,
    /// `1 / (1 + ln(visits))`.
    Logarithmic,
}

impl Decay {
    /// Rejects parameters outside the function's valid domain.
    pub fn validate(self) -> Result<Self, GenError> {
        match self {
            Decay::Linear { step } if !(step >= 0.0) => Err(GenError::DecayParam(step)),
            Decay::Exponential { rate } if !(rate > 0.0) => Err(GenError::DecayParam(rate)),
            Decay::Multiplicative { factor } if !(factor > 0.0 && factor < 1.0) => {
                Err(GenError::DecayParam(factor))
            }
            _ => Ok(self),
        }
    }

    pub fn apply(self, temp: f64, visits: u32) -> f64 {
        match self {
            Decay::Linear { step } => (temp - step).max(0.0),
            Decay::Exponential { rate } => temp * (-rate).exp(),
            Decay::Multiplicative { factor } => temp * factor,
            Decay::InverseVisits => 1.0 / visits.max(1) as f64,
            Decay::Logarithmic => 1.0 / (1.0 + (visits.max(1) as f64).ln()),
        }
    }
}

/// Recency-weighted selector: every cell carries a temperature (initially
/// 1.0) that decays as the walk keeps leaving it, and neighbors are sampled
/// proportionally to their current temperatures. Biases walks toward
/// less-recently-visited regions.
#[derive(Debug, Clone)]
pub struct HeatMapSelector {
    decay: Decay,
    temps: Vec<f64>,
    visits: Vec<u32>,
}

impl HeatMapSelector {
    pub fn new(decay: Decay) -> Result<Self, GenError> {
        Ok(Self {
            decay: decay.validate()?,
            temps: Vec::new(),
            visits: Vec::new(),
        })
    }

    pub fn temperature(&self, cell: CellId) -> f64 {
        self.temps.get(cell.index()).copied().unwrap_or(1.0)
    }
}

impl NeighborSelector for HeatMapSelector {
    fn prime(&mut self, maze: &Maze) {
        self.temps = vec![1.0; maze.cell_count()];
        self.visits = vec![0; maze.cell_count()];
    }

    fn pick(&mut self, maze: &Maze, rng: &mut Random, cell: CellId) -> Option<CellId> {
        let i = cell.index();
        self.visits[i] += 1;
        self.temps[i] = self.decay.apply(self.temps[i], self.visits[i]);

        let neighbors = maze.neighbors(cell);
        if neighbors.is_empty() {
            return None;
        }

        // inverse-CDF sampling over one uniform draw
        let total: f64 = neighbors.iter().map(|n| self.temps[n.index()]).sum();
        if total > 0.0 {
            let mut draw = rng.gen::<f64>() * total;
            for &n in neighbors {
                draw -= self.temps[n.index()];
                if draw < 0.0 {
                    return Some(n);
                }
            }
            // floating-point tail; fall through to the uniform fallback
        }
        neighbors.choose(rng).copied()
    }
}
