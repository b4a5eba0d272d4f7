use crate::error::GraphError;

/// Node identifier: an index into the adjacency matrix.
pub type NodeId = usize;

/// A directed graph over `node_count` nodes, stored as a dense adjacency matrix.
/// `weights[i][j] == 0` means there is no edge from `i` to `j`.
/// Each node also carries a heuristic estimate of its distance to the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    weights: Vec<Vec<u32>>,
    heuristic: Vec<u32>,
}

impl Graph {
    /// Builds a graph, checking that `weights` is square and `heuristic` has one entry per node.
    pub fn new(weights: Vec<Vec<u32>>, heuristic: Vec<u32>) -> Result<Self, GraphError> {
        let node_count = weights.len();
        if node_count == 0 {
            return Err(GraphError::Empty);
        }
        if let Some((row, found)) = weights.iter().map(Vec::len).enumerate().find(|(_, len)| *len != node_count) {
            return Err(GraphError::RowLength { row, expected: node_count, found });
        }
        if heuristic.len() != node_count {
            return Err(GraphError::HeuristicLength { expected: node_count, found: heuristic.len() });
        }
        Ok(Graph { weights, heuristic })
    }

    pub fn node_count(&self) -> usize {
        self.weights.len()
    }

    /// The cost of the edge `from -> to`, or 0 when there is none.
    pub fn weight(&self, from: NodeId, to: NodeId) -> u32 {
        self.weights[from][to]
    }

    /// The outgoing edges of `node` as `(neighbor, cost)`, in index order.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, u32)> + '_ {
        self.weights[node].iter().copied().enumerate().filter(|&(_, cost)| cost != 0)
    }

    /// The heuristic estimate stored for `node`.
    pub fn heuristic(&self, node: NodeId) -> u32 {
        self.heuristic[node]
    }

    /// Sum of the edge weights along `path`. A single-node path costs 0.
    pub fn path_cost(&self, path: &[NodeId]) -> u64 {
        path.windows(2).map(|pair| self.weight(pair[0], pair[1]) as u64).sum()
    }
}

/// A per-node estimate of the remaining cost to the goal.
pub trait Heuristic {
    fn estimate(&self, node: NodeId) -> u32;

    /// Number of nodes this heuristic has an estimate for.
    fn node_count(&self) -> usize;
}

impl Heuristic for Graph {
    fn estimate(&self, node: NodeId) -> u32 {
        self.heuristic(node)
    }

    fn node_count(&self) -> usize {
        Graph::node_count(self)
    }
}

impl Heuristic for [u32] {
    fn estimate(&self, node: NodeId) -> u32 {
        self[node]
    }

    fn node_count(&self) -> usize {
        self.len()
    }
}

impl Heuristic for Vec<u32> {
    fn estimate(&self, node: NodeId) -> u32 {
        self[node]
    }

    fn node_count(&self) -> usize {
        self.len()
    }
}

/// A graph together with a validated `source` and `goal`.
#[derive(Debug, Clone)]
pub struct Problem {
    pub graph: Graph,
    pub source: NodeId,
    pub goal: NodeId,
}

impl Problem {
    pub fn new(graph: Graph, source: NodeId, goal: NodeId) -> Result<Self, GraphError> {
        let node_count = graph.node_count();
        for (role, index) in [("source", source), ("goal", goal)] {
            if index >= node_count {
                return Err(GraphError::InvalidIndex { role, index, node_count });
            }
        }
        Ok(Problem { graph, source, goal })
    }

    /// Checks that `heuristic` has exactly one estimate per node of the graph.
    pub fn check_heuristic<H: Heuristic + ?Sized>(&self, heuristic: &H) -> Result<(), GraphError> {
        let expected = self.graph.node_count();
        match heuristic.node_count() {
            found if found == expected => Ok(()),
            found => Err(GraphError::HeuristicLength { expected, found }),
        }
    }
}
