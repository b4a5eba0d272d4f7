//! `waypoint`: run graph search strategies over flat-file inputs.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mimalloc::MiMalloc;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use waypoint_compat::config::Config;
use waypoint_compat::input::{GraphSpec, MazeSpec};
use waypoint_compat::output::{render_maze, render_reports};
use waypoint_compat::server::{start_server, AppState};
use waypoint_core::{SolveOptions, Solver, Strategy};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "waypoint", version, about = "Classic graph search strategies over flat-file graphs")]
struct Cli {
    /// Configuration file (defaults to ./waypoint.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run strategies on a graph file and write the results
    Solve(SolveArgs),
    /// Run uniform-cost search on a maze file
    Maze {
        /// Maze file: start, end, then grid rows of 0 (open) and 1 (wall)
        file: PathBuf,
    },
    /// Serve the search API over HTTP
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Args)]
struct SolveArgs {
    /// Graph file: node count, `source goal`, matrix rows, heuristic
    file: PathBuf,

    /// Output file (overrides the configured path)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print results to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Strategy to run; repeat for several (default: all)
    #[arg(short, long = "strategy", value_name = "NAME")]
    strategies: Vec<Strategy>,

    /// Seed for hill climbing
    #[arg(long)]
    seed: Option<u64>,

    /// Report the wall time of each strategy
    #[arg(long)]
    timing: bool,
}

fn init_logging(config: &Config, verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn solve(config: &Config, args: SolveArgs) -> Result<()> {
    let spec = GraphSpec::load(&args.file)?;
    let problem = spec.into_problem()
        .with_context(|| format!("invalid problem in {}", args.file.display()))?;

    let strategies = if args.strategies.is_empty() {
        config.search.strategies()?
    } else {
        args.strategies
    };
    let options = SolveOptions {
        seed: args.seed.or(config.search.seed),
        timing: args.timing || config.search.timing,
    };

    let reports = Solver::new(problem).solve(&strategies, options);
    let text = render_reports(&reports);
    if args.stdout {
        print!("{}", text);
        return Ok(());
    }
    let path = args.output.unwrap_or_else(|| config.output.path.clone());
    std::fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), reports = reports.len(), "results written");
    Ok(())
}

fn maze(file: PathBuf) -> Result<()> {
    let spec = MazeSpec::load(&file)?;
    let search = waypoint_core::maze::ucs(&spec.maze, spec.start, spec.end)
        .with_context(|| format!("invalid maze in {}", file.display()))?;
    print!("{}", render_maze(&spec.maze, &search));
    Ok(())
}

fn serve(config: &Config, host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut server = config.server.clone();
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    let state = AppState {
        strategies: config.search.strategies()?,
        seed: config.search.seed,
        timing: config.search.timing,
    };
    let runtime = tokio::runtime::Runtime::new().context("failed to start the async runtime")?;
    runtime.block_on(start_server(&server.addr(), state))
        .with_context(|| format!("server on {} failed", server.addr()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Command::Solve(args) => solve(&config, args),
        Command::Maze { file } => maze(file),
        Command::Serve { host, port } => serve(&config, host, port),
    }
}
