mod cell;
mod edge;
mod maze;
mod path;

pub use cell::{Cell, CellId};
pub use edge::Edge;
pub use maze::Maze;
pub use path::Path;
