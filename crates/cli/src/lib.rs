//! nagare CLI -- count, enumerate, and generate Nagareru flow puzzles.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use derive_more::From;

#[derive(Debug, Parser)]
#[command(
    name = "nagare",
    about = "Count, enumerate, and generate Nagareru flow puzzles"
)]
pub struct App {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Count the solutions of a pzprv3 board file
    Solve(SolveArgs),
    /// Generate uniquely-solvable random boards
    Generate(GenerateArgs),
}

#[derive(Debug, Parser)]
pub struct SolveArgs {
    /// Board file in pzprv3 format
    #[arg(long)]
    pub file: PathBuf,
    /// Print the parsed board
    #[arg(long)]
    pub print: bool,
    /// Export Graphviz dumps of the board, the diagram, and every solution
    #[arg(long)]
    pub dump: bool,
    /// Export the CSP constraint file
    #[arg(long)]
    pub cnf: bool,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Board width
    #[arg(long, default_value_t = 5)]
    pub width: usize,
    /// Board height
    #[arg(long, default_value_t = 5)]
    pub height: usize,
    /// Number of Black cells on the initial board
    #[arg(long, default_value_t = 0)]
    pub init: usize,
    /// Random seed (a fresh one is drawn when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Number of boards to generate
    #[arg(long, default_value_t = 1)]
    pub count: u64,
    /// Output directory for the generated boards
    #[arg(long)]
    pub output_dir: PathBuf,
}

/// A fatal CLI failure: bad arguments, I/O, board parsing, serialization,
/// or generation.
#[derive(Debug, From)]
pub enum Error {
    Usage(String),
    Io(std::io::Error),
    Parse(nagare_parser::ParseError),
    Json(serde_json::Error),
    Gen(nagare_gen::Error),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Usage(message) => write!(f, "{message}"),
            Self::Io(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Json(e) => write!(f, "{e}"),
            Self::Gen(e) => write!(f, "{e}"),
        }
    }
}
