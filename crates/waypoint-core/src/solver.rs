use crate::graph::Problem;
use crate::heuristic::{first_choice_climb, greedy_best_first, single_path_astar};
use crate::search::{bfs, dfs, ids, ucs, SearchResult};
use crate::stats::{timed_runs, Timer};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// The search strategies a `Solver` can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Bfs,
    Dfs,
    Ucs,
    Ids,
    Gbfs,
    AStar,
    HillClimbing,
}

impl Strategy {
    /// All strategies, in the order reports are written by default.
    pub const ALL: [Strategy; 7] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Ucs,
        Strategy::Ids,
        Strategy::Gbfs,
        Strategy::AStar,
        Strategy::HillClimbing,
    ];

    /// Short machine name, as accepted by `from_str`.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "bfs",
            Strategy::Dfs => "dfs",
            Strategy::Ucs => "ucs",
            Strategy::Ids => "ids",
            Strategy::Gbfs => "gbfs",
            Strategy::AStar => "astar",
            Strategy::HillClimbing => "hc",
        }
    }

    /// Heading used in rendered reports.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::Ucs => "UCS",
            Strategy::Ids => "IDS",
            Strategy::Gbfs => "GBFS",
            Strategy::AStar => "A*",
            Strategy::HillClimbing => "Hill-climbing",
        }
    }

    /// Whether the strategy consults the heuristic.
    pub fn is_informed(self) -> bool {
        matches!(self, Strategy::Gbfs | Strategy::AStar | Strategy::HillClimbing)
    }

    /// Run this strategy on `problem`. Only hill climbing draws from `rng`.
    pub fn run<R: rand::Rng + ?Sized>(self, problem: &Problem, rng: &mut R) -> SearchResult {
        // The graph's own heuristic was checked when the graph was built.
        let Problem { graph, source, goal } = problem;
        let (source, goal) = (*source, *goal);
        match self {
            Strategy::Bfs => bfs(problem),
            Strategy::Dfs => dfs(problem),
            Strategy::Ucs => ucs(problem),
            Strategy::Ids => ids(problem),
            Strategy::Gbfs => greedy_best_first(graph, source, goal, graph),
            Strategy::AStar => single_path_astar(graph, source, goal, graph),
            Strategy::HillClimbing => first_choice_climb(graph, source, goal, graph, rng),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for a strategy name that does not match any `Strategy`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy `{0}` (expected one of: bfs, dfs, ucs, ids, gbfs, astar, hc)")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "a*" | "a-star" => return Ok(Strategy::AStar),
            "hill-climbing" | "hill_climbing" => return Ok(Strategy::HillClimbing),
            _ => {}
        }
        Strategy::ALL.into_iter()
            .find(|strategy| strategy.name() == lowered)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

/// Options that affect how the solver runs, never what a strategy returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolveOptions {
    /// Seed for the hill-climbing shuffle. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Measure the wall time of each strategy call.
    pub timing: bool,
}

/// The outcome of one strategy on one problem.
#[derive(Debug, Clone)]
pub struct Report {
    pub strategy: Strategy,
    pub result: SearchResult,
    pub cost: Option<u64>,
    /// Diagnostic only, present when `SolveOptions::timing` is set.
    pub elapsed: Option<Duration>,
}

/// Runs strategies over a shared, read-only `Problem`.
pub struct Solver {
    pub problem: Problem,
}

impl Solver {
    pub fn new(problem: Problem) -> Self {
        Solver { problem }
    }

    /// Runs a single strategy with its own RNG.
    pub fn run(&self, strategy: Strategy, options: SolveOptions) -> Report {
        let mut rng = match options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let timer = options.timing.then(Timer::start);
        let result = strategy.run(&self.problem, &mut rng);
        let elapsed = timer.map(|timer| timer.stop());

        let cost = result.cost(&self.problem.graph);
        debug!(strategy = strategy.name(), informed = strategy.is_informed(), found = result.is_found(), reached = result.visited.len(), ?cost, "strategy finished");
        Report { strategy, result, cost, elapsed }
    }

    /// Runs `strategies` in parallel. Reports come back in the order requested.
    pub fn solve(&self, strategies: &[Strategy], options: SolveOptions) -> Vec<Report> {
        info!(
            nodes = self.problem.graph.node_count(),
            source = self.problem.source,
            goal = self.problem.goal,
            strategies = strategies.len(),
            "solving"
        );
        let reports: Vec<Report> = strategies.par_iter().map(|&strategy| self.run(strategy, options)).collect();
        if options.timing {
            info!(timed_runs = timed_runs(), "timing recorded");
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    fn problem() -> Problem {
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

    #[test]
    fn parses_names_and_labels() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>(), Ok(strategy));
        }
        assert_eq!("A*".parse::<Strategy>(), Ok(Strategy::AStar));
        assert_eq!(" Hill-Climbing ".parse::<Strategy>(), Ok(Strategy::HillClimbing));
        assert_eq!("dijkstra".parse::<Strategy>(), Err(UnknownStrategy("dijkstra".to_string())));
    }

    #[test]
    fn reports_keep_requested_order() {
        let solver = Solver::new(problem());
        let order = [Strategy::Ucs, Strategy::Bfs, Strategy::AStar];
        let reports = solver.solve(&order, SolveOptions { seed: Some(1), timing: false });
        let strategies: Vec<_> = reports.iter().map(|r| r.strategy).collect();
        assert_eq!(strategies, order);
        assert!(reports.iter().all(|r| r.elapsed.is_none()));
        assert_eq!(reports[0].cost, Some(2));
    }

    #[test]
    fn timing_is_diagnostic_only() {
        let solver = Solver::new(problem());
        let options = SolveOptions { seed: Some(9), timing: false };
        let timed = SolveOptions { timing: true, ..options };
        for strategy in Strategy::ALL {
            let plain = solver.run(strategy, options);
            let measured = solver.run(strategy, timed);
            assert_eq!(plain.result, measured.result);
            assert!(measured.elapsed.is_some());
        }
        let before = timed_runs();
        solver.solve(&Strategy::ALL, timed);
        assert!(timed_runs() >= before + Strategy::ALL.len() as u64);
    }
}
