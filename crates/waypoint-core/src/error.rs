use thiserror::Error;

/// Errors raised while building a `Graph` or a `Problem`.
/// An unreachable goal is not an error: strategies report it as an absent path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("malformed graph: the adjacency matrix has no rows")]
    Empty,

    #[error("malformed graph: row {row} has {found} entries, expected {expected}")]
    RowLength { row: usize, expected: usize, found: usize },

    #[error("malformed graph: heuristic has {found} entries, expected {expected}")]
    HeuristicLength { expected: usize, found: usize },

    #[error("invalid {role} index {index}: graph has {node_count} nodes")]
    InvalidIndex { role: &'static str, index: usize, node_count: usize },
}

impl GraphError {
    /// True for the construction-time shape errors, false for index errors.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, GraphError::InvalidIndex { .. })
    }
}
