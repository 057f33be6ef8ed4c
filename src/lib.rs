//! Graph-based maze construction toolkit.
//!
//! A maze is an undirected graph of cells whose open passages are carved by
//! stepwise algorithms. Build a [`graph::Maze`] from a [`topology::Topology`],
//! drive any [`generate::MazeAlgorithm`] over it through a
//! [`generate::Generator`], and observe every intermediate snapshot or just
//! take the finished maze.
//!
//! ```
//! use gmaze::{
//!     generate::{algorithms::Kruskals, GenOptions, Generator},
//!     graph::Maze,
//!     topology::OrthogonalGrid,
//! };
//!
//! let maze = Maze::new(&OrthogonalGrid::new(8, 8));
//! let maze = Generator::new(maze, Kruskals::new(), GenOptions::seeded(42))
//!     .unwrap()
//!     .generate()
//!     .unwrap();
//! assert_eq!(maze.connection_count(), 63);
//! ```

pub mod dims;
pub mod dset;
pub mod error;
pub mod generate;
pub mod graph;
pub mod marks;
pub mod progress;
pub mod registry;
pub mod topology;

pub use dims::Dims;
pub use error::{GenError, GraphError};
pub use generate::{GenOptions, Generator, MazeAlgorithm, Random, StepResult};
pub use graph::{Cell, CellId, Edge, Maze};
pub use marks::Marks;
pub use progress::ProgressHandle;
pub use topology::{OrthogonalGrid, Topology};
