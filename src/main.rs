use std::io;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use log::info;

use sudoku_census::{
    read_puzzle, run_enumeration, AcceptAll, Backend, BoardPresenter, Enumeration, MultiPresenter,
    OracleConfig, OracleFactory, Presenter, SearchControl, StdinControl, TextPresenter,
};

/// Count every completion of a 9×9 Sudoku by repeated feasibility queries
/// against a MIP solver.
#[derive(Parser, Debug)]
#[command(name = "sudoku-census", version, about)]
struct Cli {
    /// Delimited 9×9 puzzle file; blank fields and zeros are open cells
    puzzle: PathBuf,

    /// Field separator used in the puzzle file
    #[arg(short, long, default_value_t = ';')]
    separator: char,

    /// Solver backend answering the feasibility queries
    #[arg(short, long, value_enum, default_value = "auto")]
    backend: BackendArg,

    /// Keep searching without asking between solutions
    #[arg(short, long)]
    all: bool,

    /// Stop after this many solutions
    #[arg(short, long)]
    limit: Option<usize>,

    /// Wall-clock limit per solve, in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Re-enable backend presolving (off by default)
    #[arg(long)]
    presolve: bool,

    /// Plain text output only, no styled board
    #[arg(long)]
    plain: bool,

    /// Let the backend write its own log output
    #[arg(short, long)]
    verbose: bool,
}

/// CLI-facing backend names, mapped onto the domain enum.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendArg {
    /// Let the factory pick
    Auto,
    /// COIN-OR CBC through good_lp
    Cbc,
    /// HiGHS through its native bindings
    Highs,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Auto => Backend::Auto,
            BackendArg::Cbc => Backend::Cbc,
            BackendArg::Highs => Backend::Highs,
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let puzzle = read_puzzle(&cli.puzzle, cli.separator)?;
    info!("{}: {} givens", cli.puzzle.display(), puzzle.given_count());

    let config = OracleConfig {
        backend: Backend::from(cli.backend),
        presolve: cli.presolve,
        time_limit: cli.time_limit,
        verbose: cli.verbose,
    };
    let oracle = OracleFactory::for_config(&config);
    info!("oracle backend: {}", oracle.name());

    let mut sinks: Vec<Box<dyn Presenter>> = vec![Box::new(TextPresenter::new(io::stdout()))];
    if !cli.plain {
        sinks.push(Box::new(BoardPresenter::new(io::stdout(), puzzle.clone())));
    }
    let mut presenter = MultiPresenter::new(sinks);

    let mut control: Box<dyn SearchControl> = if cli.all || cli.limit.is_some() {
        Box::new(AcceptAll)
    } else {
        Box::new(StdinControl)
    };

    let mut enumeration = Enumeration::new(oracle, puzzle, config);
    let report = run_enumeration(&mut enumeration, &mut presenter, control.as_mut(), cli.limit)?;

    if report.exhausted {
        println!("Total solutions: {} (search space exhausted)", report.solutions);
    } else {
        println!("Total solutions so far: {} (stopped early)", report.solutions);
    }

    Ok(())
}
