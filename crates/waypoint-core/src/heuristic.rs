use crate::error::GraphError;
use crate::graph::{Graph, Heuristic, NodeId, Problem};
use crate::search::{SearchResult, Visited};
use rand::seq::SliceRandom;
use rand::Rng;

/// Greedy best-first search guided by `heuristic`, which must cover every node.
pub fn gbfs<H: Heuristic + ?Sized>(problem: &Problem, heuristic: &H) -> Result<SearchResult, GraphError> {
    problem.check_heuristic(heuristic)?;
    Ok(greedy_best_first(&problem.graph, problem.source, problem.goal, heuristic))
}

/// Single-path A* guided by `heuristic`, which must cover every node.
pub fn astar<H: Heuristic + ?Sized>(problem: &Problem, heuristic: &H) -> Result<SearchResult, GraphError> {
    problem.check_heuristic(heuristic)?;
    Ok(single_path_astar(&problem.graph, problem.source, problem.goal, heuristic))
}

/// First-choice hill climbing guided by `heuristic`, which must cover every node.
pub fn hill_climbing<H, R>(problem: &Problem, heuristic: &H, rng: &mut R) -> Result<SearchResult, GraphError>
where
    H: Heuristic + ?Sized,
    R: Rng + ?Sized,
{
    problem.check_heuristic(heuristic)?;
    Ok(first_choice_climb(&problem.graph, problem.source, problem.goal, heuristic, rng))
}

/// Greedy best-first search.
///
/// From the current node, moves to the unvisited neighbor with the lowest estimate.
/// A neighbor is recorded only when it improves on the best estimate seen so far in
/// the scan. There is no backtracking: a node without unvisited neighbors ends the
/// search, even if another route to the goal exists.
pub(crate) fn greedy_best_first<H: Heuristic + ?Sized>(graph: &Graph, source: NodeId, destination: NodeId, heuristic: &H) -> SearchResult {
    let mut visited = Visited::rooted(source);
    let mut current = source;

    while current != destination {
        let mut best: Option<(NodeId, u32)> = None;
        for (neighbor, _) in graph.neighbors(current) {
            if visited.contains(neighbor) {
                continue;
            }
            let estimate = heuristic.estimate(neighbor);
            if best.map_or(true, |(_, lowest)| estimate < lowest) {
                best = Some((neighbor, estimate));
                visited.record(neighbor, current);
            }
        }
        let Some((next, _)) = best else {
            return SearchResult::not_found(visited);
        };
        current = next;
    }
    SearchResult::found(visited, destination)
}

/// Single-path A*.
///
/// Keeps one current node rather than an open set. Each step either reaches the
/// goal directly, if it is an unvisited neighbor, or commits to the unvisited
/// neighbor minimizing `edge cost + estimate` (first minimum in index order).
/// Earlier choices are never reconsidered, so an existing path can be missed.
pub(crate) fn single_path_astar<H: Heuristic + ?Sized>(graph: &Graph, source: NodeId, destination: NodeId, heuristic: &H) -> SearchResult {
    let mut visited = Visited::rooted(source);
    if source == destination {
        return SearchResult::found(visited, destination);
    }

    let mut current = source;
    while visited.len() < graph.node_count() {
        let mut best: Option<(NodeId, u64)> = None;
        for (neighbor, cost) in graph.neighbors(current) {
            if visited.contains(neighbor) {
                continue;
            }
            if neighbor == destination {
                visited.record(neighbor, current);
                return SearchResult::found(visited, destination);
            }
            let score = cost as u64 + heuristic.estimate(neighbor) as u64;
            if best.map_or(true, |(_, lowest)| score < lowest) {
                best = Some((neighbor, score));
            }
        }
        // Dead end.
        let Some((next, _)) = best else {
            return SearchResult::not_found(visited);
        };
        visited.record(next, current);
        current = next;
    }
    SearchResult::not_found(visited)
}

/// First-choice hill climbing.
///
/// Each step shuffles all node indices with `rng` and scans them in that order.
/// Every unvisited neighbor met along the way is recorded; the first one whose
/// estimate is strictly below the current node's becomes the new current node.
/// A full scan without such a neighbor fails the search.
pub(crate) fn first_choice_climb<H, R>(graph: &Graph, source: NodeId, destination: NodeId, heuristic: &H, rng: &mut R) -> SearchResult
where
    H: Heuristic + ?Sized,
    R: Rng + ?Sized,
{
    let mut visited = Visited::rooted(source);
    let mut order: Vec<NodeId> = (0..graph.node_count()).collect();
    let mut current = source;

    while current != destination {
        order.shuffle(rng);
        let floor = heuristic.estimate(current);
        let mut next = None;
        for &candidate in &order {
            if graph.weight(current, candidate) == 0 || visited.contains(candidate) {
                continue;
            }
            visited.record(candidate, current);
            if heuristic.estimate(candidate) < floor {
                next = Some(candidate);
                break;
            }
        }
        match next {
            Some(node) => current = node,
            None => return SearchResult::not_found(visited),
        }
    }
    SearchResult::found(visited, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn diamond() -> Problem {
        let graph = Graph::new(
            vec![
                vec![0, 1, 4, 0],
                vec![0, 0, 1, 1],
                vec![0, 0, 0, 1],
                vec![0, 0, 0, 0],
            ],
            vec![3, 2, 1, 0],
        ).unwrap();
        Problem::new(graph, 0, 3).unwrap()
    }

    /// 0 -> 1 -> 2 is a dead end with a tempting estimate, 0 -> 3 -> 4 reaches the goal.
    fn trap() -> Problem {
        let mut weights = vec![vec![0; 5]; 5];
        weights[0][1] = 1;
        weights[1][2] = 1;
        weights[0][3] = 1;
        weights[3][4] = 1;
        Problem::new(Graph::new(weights, vec![4, 1, 0, 3, 0]).unwrap(), 0, 4).unwrap()
    }

    fn with_endpoints(problem: &Problem, source: NodeId, goal: NodeId) -> Problem {
        Problem::new(problem.graph.clone(), source, goal).unwrap()
    }

    #[test]
    fn gbfs_prefers_lowest_estimate() {
        let problem = diamond();
        let result = gbfs(&problem, &problem.graph).unwrap();
        assert_eq!(result.path, Some(vec![0, 2, 3]));
        // 1 was the first candidate, then 2 improved on it.
        let pairs: Vec<_> = result.visited.iter().collect();
        assert_eq!(pairs, vec![(0, None), (1, Some(0)), (2, Some(0)), (3, Some(2))]);
    }

    #[test]
    fn gbfs_does_not_backtrack() {
        let problem = trap();
        let result = gbfs(&problem, &problem.graph).unwrap();
        assert_eq!(result.path, None);
        assert!(result.visited.contains(2));
    }

    #[test]
    fn gbfs_accepts_a_separate_heuristic() {
        let result = gbfs(&diamond(), &[0u32, 0, 5, 0][..]).unwrap();
        assert_eq!(result.path, Some(vec![0, 1, 3]));
    }

    #[test]
    fn informed_strategies_reject_a_short_heuristic() {
        let problem = diamond();
        let short = vec![0u32];
        let expected = Err(GraphError::HeuristicLength { expected: 4, found: 1 });
        assert_eq!(gbfs(&problem, &short), expected);
        assert_eq!(astar(&problem, &short[..]), expected);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(hill_climbing(&problem, &short, &mut rng), expected);
    }

    #[test]
    fn astar_takes_direct_edge_to_goal() {
        let problem = diamond();
        let result = astar(&problem, &problem.graph).unwrap();
        assert_eq!(result.path, Some(vec![0, 1, 3]));
        assert_eq!(result.cost(&problem.graph), Some(2));
    }

    #[test]
    fn astar_commits_to_first_choice() {
        let problem = trap();
        assert_eq!(astar(&problem, &problem.graph).unwrap().path, None);
    }

    #[test]
    fn astar_trivial_and_dead_end() {
        let problem = diamond();
        let trivial = with_endpoints(&problem, 1, 1);
        assert_eq!(astar(&trivial, &trivial.graph).unwrap().path, Some(vec![1]));
        let stuck = with_endpoints(&problem, 3, 0);
        let result = astar(&stuck, &stuck.graph).unwrap();
        assert_eq!(result.path, None);
        assert_eq!(result.visited.len(), 1);
    }

    #[test]
    fn hill_climbing_follows_a_descending_chain() {
        // 0 -> 1 -> 2 -> 3 with strictly falling estimates: every shuffle succeeds.
        let mut weights = vec![vec![0; 4]; 4];
        weights[0][1] = 1;
        weights[1][2] = 1;
        weights[2][3] = 1;
        let problem = Problem::new(Graph::new(weights, vec![3, 2, 1, 0]).unwrap(), 0, 3).unwrap();
        for seed in 0..16 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let result = hill_climbing(&problem, &problem.graph, &mut rng).unwrap();
            assert_eq!(result.path, Some(vec![0, 1, 2, 3]));
        }
    }

    #[test]
    fn hill_climbing_is_reproducible_with_a_seed() {
        // Every neighbor of every node improves on it, so the climb always succeeds;
        // which route it takes depends on the shuffle.
        let problem = diamond();
        for seed in 0..16 {
            let first = hill_climbing(&problem, &problem.graph, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
            let second = hill_climbing(&problem, &problem.graph, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
            assert_eq!(first, second);
            let path = first.path.unwrap();
            assert_eq!(path.first(), Some(&0));
            assert_eq!(path.last(), Some(&3));
            assert!(path.windows(2).all(|w| problem.graph.weight(w[0], w[1]) > 0));
            assert!(path.windows(2).all(|w| problem.graph.heuristic(w[1]) < problem.graph.heuristic(w[0])));
        }
    }

    #[test]
    fn hill_climbing_fails_without_improving_neighbor() {
        // Both neighbors of 0 have a higher estimate than 0 itself.
        let graph = Graph::new(
            vec![vec![0, 1, 1], vec![0, 0, 1], vec![0, 0, 0]],
            vec![0, 5, 5],
        ).unwrap();
        let problem = Problem::new(graph, 0, 2).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = hill_climbing(&problem, &problem.graph, &mut rng).unwrap();
        assert_eq!(result.path, None);
        assert_eq!(result.visited.len(), 3);
    }

    #[test]
    fn hill_climbing_trivial_path() {
        let problem = with_endpoints(&diamond(), 3, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(hill_climbing(&problem, &problem.graph, &mut rng).unwrap().path, Some(vec![3]));
    }
}
