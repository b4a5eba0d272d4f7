//! End-to-end: graph and maze files on disk through parsing, solving and rendering.

use std::fs;
use waypoint_compat::input::{GraphSpec, MazeSpec, ParseError};
use waypoint_compat::output::{render_maze, render_reports};
use waypoint_core::{SolveOptions, Solver, Strategy};

const SCENARIO: &str = "\
4
0 3
0 1 4 0
0 0 1 1
0 0 0 1
0 0 0 0
3 2 1 0
";

#[test]
fn graph_file_to_results_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.txt");
    fs::write(&input, SCENARIO).unwrap();

    let problem = GraphSpec::load(&input).unwrap().into_problem().unwrap();
    let strategies = [Strategy::Bfs, Strategy::Ucs, Strategy::AStar];
    let reports = Solver::new(problem).solve(&strategies, SolveOptions { seed: Some(1), timing: false });
    let text = render_reports(&reports);

    let output = dir.path().join("output.txt");
    fs::write(&output, &text).unwrap();
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "BFS:\nVisited: {0: None, 1: 0, 2: 0, 3: 1}\nPath: 0 -> 1 -> 3\nCost: 2\n\n\
         UCS:\nVisited: {0: None, 1: 0, 2: 1, 3: 1}\nPath: 0 -> 1 -> 3\nCost: 2\n\n\
         A*:\nVisited: {0: None, 1: 0, 3: 1}\nPath: 0 -> 1 -> 3\nCost: 2\n\n"
    );
}

#[test]
fn unreachable_goal_renders_minus_one() {
    let problem = GraphSpec::parse("2\n1 0\n0 1\n0 0\n0 0\n").unwrap().into_problem().unwrap();
    let reports = Solver::new(problem).solve(&Strategy::ALL, SolveOptions { seed: Some(2), timing: false });
    for block in render_reports(&reports).split("\n\n").filter(|b| !b.is_empty()) {
        assert!(block.contains("Path: -1\nCost: -1"), "{}", block);
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GraphSpec::load(&dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
}

#[test]
fn maze_file_to_marked_grid() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("maze.txt");
    fs::write(&input, "1 0\n1 3\n1 1 1 1\n0 0 0 0\n1 1 1 1\n").unwrap();

    let spec = MazeSpec::load(&input).unwrap();
    let search = waypoint_core::maze::ucs(&spec.maze, spec.start, spec.end).unwrap();
    assert_eq!(
        render_maze(&spec.maze, &search),
        "Path: (1, 0) -> (1, 1) -> (1, 2) -> (1, 3)\nExplored: 3\n[1, 1, 1, 1]\n[2, 2, 2, 0]\n[1, 1, 1, 1]\n"
    );
}

#[test]
fn bundled_maze_is_solvable() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/maze.txt");
    let spec = MazeSpec::load(&path).unwrap();
    assert_eq!((spec.maze.rows(), spec.maze.cols()), (21, 31));

    let search = waypoint_core::maze::ucs(&spec.maze, spec.start, spec.end).unwrap();
    let route = search.path.unwrap();
    assert_eq!(route.first(), Some(&(9, 0)));
    assert_eq!(route.last(), Some(&(11, 30)));
    assert!(route.windows(2).all(|w| w[0].0.abs_diff(w[1].0) + w[0].1.abs_diff(w[1].1) == 1));
}
