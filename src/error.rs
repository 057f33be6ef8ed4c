use thiserror::Error;

use crate::graph::{CellId, Edge};

/// Graph-invariant violations and path lookup failures.
///
/// These are precondition errors: the offending call leaves the maze
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("cell {0} is outside the maze")]
    OuterCell(CellId),
    #[error("cell {0} is out of range")]
    UnknownCell(CellId),
    #[error("cells {0} and {1} are not neighbors")]
    NotNeighbors(CellId, CellId),
    #[error("edge {0} does not cross the maze boundary")]
    NotBoundary(Edge),
    #[error("path {0} is not registered")]
    UnknownPath(usize),
    #[error("no open route between the requested cells")]
    PathNotFound,
}

/// Generation-level failures, all surfaced before or during a run, never
/// recovered internally.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("{algorithm} needs a plain rectangular orthogonal grid")]
    TopologyMismatch { algorithm: &'static str },
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("braidness {0} is outside 0..=1")]
    BraidnessRange(f64),
    #[error("probability {0} is outside 0..=1")]
    ProbabilityRange(f64),
    #[error("decay parameter {0} is outside its valid domain")]
    DecayParam(f64),
    #[error("origin shift needs a max iteration count and/or the visit-all flag")]
    UnboundedRun,
    #[error("generation was stopped")]
    Stopped,
}
