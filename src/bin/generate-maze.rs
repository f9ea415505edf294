//! CLI for maze generation

use amazeing::{pattern, MazeGenerator};
use clap::Parser;
use itertools::Itertools;

/// Print the wall masks of a perfect maze, one hex digit per cell
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Generated maze width
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(3..))]
    width: u16,

    /// Generated maze height
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u16).range(3..))]
    height: u16,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

/// Generate the maze, print output
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (width, height) = (args.width as usize, args.height as usize);

    let reserved = pattern::reserve(width, height);
    let grid = MazeGenerator::new(args.seed).generate(width, height, &reserved);
    for row in grid.rows() {
        println!("{}", row.iter().map(|mask| format!("{:X}", mask)).join(""));
    }
    Ok(())
}
