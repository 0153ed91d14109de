use clap::Parser;
use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use gridfill::crossword::Crossword;
use gridfill::errors::GridError;
use gridfill::render::FilledGrid;
use gridfill::solver::Solver;

/// Crossword grid filler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the grid structure file ('_' = open cell, anything else blocked)
    structure: String,

    /// Path to the word list file (one word per line)
    words: String,

    /// Write the solved grid to this file as well as stdout
    #[arg(short, long)]
    output: Option<String>,
}

/// Entry point of the gridfill CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with a nonzero code.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("GRIDFILL_DEBUG").is_ok();
    gridfill::log::init_logger(debug_enabled);

    match try_main() {
        Ok(solved) => {
            if solved {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e.display_detailed());
            ExitCode::FAILURE
        }
    }
}

/// Core application logic.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Load the structure and word-list files into a crossword model.
/// 3. Solve the fill CSP.
/// 4. Print the filled grid (or "No solution.") and optionally write it out.
/// 5. Print performance diagnostics on stderr.
///
/// Returns whether a solution was found; loading errors bubble up to [`main`].
fn try_main() -> Result<bool, GridError> {
    let cli = Cli::parse();

    let t_load = Instant::now();
    let crossword = Crossword::load(&cli.structure, &cli.words)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    log::info!(
        "Loaded {} variables and {} words in {load_secs:.3}s",
        crossword.variables().len(),
        crossword.words().len()
    );

    let t_solve = Instant::now();
    let assignment = Solver::new(&crossword).solve();
    let solve_secs = t_solve.elapsed().as_secs_f64();

    let Some(assignment) = assignment else {
        println!("No solution.");
        eprintln!("Exhausted the search space in {solve_secs:.3}s.");
        return Ok(false);
    };

    let grid = FilledGrid::new(&crossword, &assignment);
    print!("{grid}");
    if let Some(output) = &cli.output {
        fs::write(output, grid.to_string())?;
    }

    eprintln!("Filled {} slots in {solve_secs:.3}s.", assignment.len());
    Ok(true)
}
