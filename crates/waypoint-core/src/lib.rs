pub mod error;
pub mod graph;
pub mod search;
pub mod heuristic;
pub mod print;
pub mod stats;
pub mod solver;
pub mod maze;

pub use error::GraphError;
pub use graph::{Graph, Heuristic, NodeId, Problem};
pub use search::{SearchResult, Visited};
pub use solver::{Report, SolveOptions, Solver, Strategy};
