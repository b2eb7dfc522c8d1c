mod generators;
mod maze;
mod solvers;
mod view;

use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use generators::{Generator, generate_maze};
use maze::{Maze, direction::Direction};
use solvers::{Solver, solve_maze};
use view::terminal::{self, TerminalView};

/// Carve a perfect maze into a bitfield grid and watch it get solved,
/// step by step.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Maze width in cells
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..=255))]
    width: u16,
    /// Maze height in cells
    #[arg(long, default_value_t = 12, value_parser = clap::value_parser!(u16).range(1..=255))]
    height: u16,
    /// Seed for reproducible runs; random otherwise
    #[arg(long)]
    seed: Option<u64>,
    /// Delay between traversal steps, in milliseconds
    #[arg(long, default_value_t = 15)]
    delay: u64,
    /// Skip the animation and only print the solution
    #[arg(long)]
    headless: bool,
}

/// Log to a file, since the terminal itself belongs to the animation.
/// The returned guard must stay alive for the duration of the program.
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(std::env::temp_dir(), "mazebit.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn print_solution(path: &[Direction]) {
    let labels: Vec<String> = path.iter().map(Direction::to_string).collect();
    println!("Solution ({} steps): {}", labels.len(), labels.join(" "));
}

fn run_headless(args: &Args) -> std::io::Result<()> {
    let mut maze = Maze::new(args.width, args.height, None);
    generate_maze(&mut maze, Generator::Dfs, args.seed);
    match solve_maze(&mut maze, Solver::Dfs, args.seed) {
        Ok(path) => {
            print_solution(&path);
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn run_animated(args: &Args) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    if let Err(msg) = terminal::check_terminal_size(args.width, args.height)? {
        eprintln!("{msg}");
        return Ok(());
    }

    terminal::setup_terminal(&mut stdout)?;
    let mut canvas = TerminalView::new(args.width, args.height, Duration::from_millis(args.delay));
    canvas.draw_grid()?;

    let mut maze = Maze::new(args.width, args.height, Some(Box::new(canvas)));
    generate_maze(&mut maze, Generator::Dfs, args.seed);
    let result = solve_maze(&mut maze, Solver::Dfs, args.seed);

    let message = match &result {
        Ok(path) => format!("Solved in {} steps. Press Esc to exit.", path.len()),
        Err(e) => format!("{e}. Press Esc to exit."),
    };
    terminal::print_status(&mut stdout, args.height, &message)?;
    terminal::wait_for_esc()?;
    terminal::restore_terminal(&mut stdout)?;

    match result {
        Ok(path) => {
            print_solution(&path);
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let _guard = init_tracing();
    tracing::info!(
        width = args.width,
        height = args.height,
        seed = ?args.seed,
        headless = args.headless,
        generator = %Generator::Dfs,
        solver = %Solver::Dfs,
        "starting"
    );

    if args.headless {
        run_headless(&args)
    } else {
        run_animated(&args)
    }
}
