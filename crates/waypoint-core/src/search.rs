use crate::graph::{Graph, NodeId, Problem};
use hashbrown::HashMap;
use indexmap::IndexMap;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use tracing::debug;

/// Predecessor map of a search: for every node reached, the node that discovered it.
/// The source maps to `None`. Iteration follows first insertion, and re-recording a
/// node updates its predecessor in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visited(IndexMap<NodeId, Option<NodeId>>);

impl Visited {
    /// A map containing only the root `source`.
    pub fn rooted(source: NodeId) -> Self {
        let mut map = IndexMap::new();
        map.insert(source, None);
        Visited(map)
    }

    pub fn record(&mut self, node: NodeId, predecessor: NodeId) {
        self.0.insert(node, Some(predecessor));
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.0.contains_key(&node)
    }

    /// `None` if `node` was never reached, `Some(None)` for the root.
    pub fn predecessor(&self, node: NodeId) -> Option<Option<NodeId>> {
        self.0.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Option<NodeId>)> + '_ {
        self.0.iter().map(|(&node, &predecessor)| (node, predecessor))
    }

    /// Walks predecessor links back from `destination` to the root and reverses them.
    /// Returns `None` if `destination` was never reached or the links do not end at a root.
    pub fn path_to(&self, destination: NodeId) -> Option<Vec<NodeId>> {
        let mut path = Vec::new();
        let mut current = Some(destination);
        while let Some(node) = current {
            // A chain longer than the map can only be a cycle.
            if path.len() == self.len() {
                return None;
            }
            path.push(node);
            current = self.predecessor(node)?;
        }
        path.reverse();
        Some(path)
    }
}

/// The outcome of one strategy call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub visited: Visited,
    /// Nodes from source to goal, or `None` when no path was found.
    pub path: Option<Vec<NodeId>>,
}

impl SearchResult {
    /// A successful search: the path is reconstructed from `visited`.
    pub fn found(visited: Visited, destination: NodeId) -> Self {
        let path = visited.path_to(destination);
        SearchResult { visited, path }
    }

    pub fn not_found(visited: Visited) -> Self {
        SearchResult { visited, path: None }
    }

    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }

    /// Cost of the path in `graph`, `None` when there is no path.
    pub fn cost(&self, graph: &Graph) -> Option<u64> {
        self.path.as_deref().map(|path| graph.path_cost(path))
    }
}

/// Breadth-first search. A node's predecessor is fixed at first discovery.
pub fn bfs(problem: &Problem) -> SearchResult {
    let Problem { graph, source, goal: destination } = problem;
    let (source, destination) = (*source, *destination);
    let mut visited = Visited::rooted(source);
    let mut queue = VecDeque::from([source]);

    while let Some(current) = queue.pop_front() {
        if current == destination {
            return SearchResult::found(visited, destination);
        }
        for (neighbor, _) in graph.neighbors(current) {
            if !visited.contains(neighbor) {
                visited.record(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }
    SearchResult::not_found(visited)
}

/// A node on the explicit DFS stack, with the index from which to resume its neighbor scan.
struct Frame {
    node: NodeId,
    depth: usize,
    cursor: NodeId,
}

/// Whether the descent may enter `node` at `depth`. Without a limit a node is
/// entered at most once; with one, it may be re-entered from a shallower depth so
/// that every node within the limit is eventually reached.
fn may_enter(expanded: &HashMap<NodeId, usize>, node: NodeId, depth: usize, limited: bool) -> bool {
    match expanded.get(&node) {
        None => true,
        Some(&entered) => limited && depth < entered,
    }
}

/// Depth-first descent shared by `dfs` and `dls`.
///
/// Mirrors the recursive formulation: the goal test happens on entry, a node is
/// marked expanded after it, and every neighbor that may be entered is recorded
/// in `visited` just before descending into it. A branch deeper than `limit` is
/// abandoned on entry, so its node stays recorded but unexpanded.
fn depth_first(graph: &Graph, source: NodeId, destination: NodeId, limit: Option<usize>) -> SearchResult {
    let mut visited = Visited::rooted(source);
    if source == destination {
        return SearchResult::found(visited, destination);
    }

    let limited = limit.is_some();
    let mut expanded = HashMap::new();
    expanded.insert(source, 0);
    let mut stack = vec![Frame { node: source, depth: 0, cursor: 0 }];

    while let Some(frame) = stack.last_mut() {
        let depth = frame.depth + 1;
        let next = graph.neighbors(frame.node)
            .find(|&(neighbor, _)| neighbor >= frame.cursor && may_enter(&expanded, neighbor, depth, limited));
        let Some((neighbor, _)) = next else {
            stack.pop();
            continue;
        };
        frame.cursor = neighbor + 1;
        let parent = frame.node;

        visited.record(neighbor, parent);
        if limit.is_some_and(|limit| depth > limit) {
            continue;
        }
        if neighbor == destination {
            return SearchResult::found(visited, destination);
        }
        expanded.insert(neighbor, depth);
        stack.push(Frame { node: neighbor, depth, cursor: 0 });
    }
    SearchResult::not_found(visited)
}

/// Depth-first search. Returns the first path found, which need not be the shortest.
pub fn dfs(problem: &Problem) -> SearchResult {
    depth_first(&problem.graph, problem.source, problem.goal, None)
}

/// Depth-limited search: DFS that abandons any branch deeper than `limit` edges.
pub fn dls(problem: &Problem, limit: usize) -> SearchResult {
    depth_first(&problem.graph, problem.source, problem.goal, Some(limit))
}

/// Iterative deepening: `dls` with limits `0..node_count`, stopping at the first success.
/// When every limit fails, the last pass's visited map is returned.
pub fn ids(problem: &Problem) -> SearchResult {
    let mut last = SearchResult::not_found(Visited::rooted(problem.source));
    for limit in 0..problem.graph.node_count() {
        let result = dls(problem, limit);
        debug!(limit, reached = result.visited.len(), found = result.is_found(), "depth-limited pass");
        if result.is_found() {
            return result;
        }
        last = result;
    }
    last
}

/// Uniform-cost search, also returning the accumulated cost of the goal when found.
///
/// The frontier may hold several entries for one node; an entry whose cost is above
/// the best known cost for its node is stale and skipped when popped. Ties on cost
/// pop the lower node index first.
pub fn uniform_cost(problem: &Problem) -> (SearchResult, Option<u64>) {
    let Problem { graph, source, goal: destination } = problem;
    let (source, destination) = (*source, *destination);
    let mut visited = Visited::rooted(source);
    let mut best: HashMap<NodeId, u64> = HashMap::new();
    let mut frontier = BinaryHeap::new();
    best.insert(source, 0);
    frontier.push(Reverse((0u64, source)));

    while let Some(Reverse((cost, current))) = frontier.pop() {
        if best.get(&current).is_some_and(|&known| cost > known) {
            continue;
        }
        if current == destination {
            return (SearchResult::found(visited, destination), Some(cost));
        }
        for (neighbor, weight) in graph.neighbors(current) {
            let next_cost = cost + weight as u64;
            if best.get(&neighbor).map_or(true, |&known| next_cost < known) {
                best.insert(neighbor, next_cost);
                visited.record(neighbor, current);
                frontier.push(Reverse((next_cost, neighbor)));
            }
        }
    }
    (SearchResult::not_found(visited), None)
}

/// Uniform-cost search. Finds a cheapest path when all weights are non-negative.
pub fn ucs(problem: &Problem) -> SearchResult {
    uniform_cost(problem).0
}
