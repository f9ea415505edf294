//! CLI for maze generation, solving and viewing

use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use amazeing::display::{self, KeyInput, LineInput, View};
use amazeing::pattern::{self, PatternStatus};
use amazeing::{output, Grid, MazeConfig, MazeGenerator, Path};
use clap::Parser;

/// Generate a perfect maze, write it to a file and explore it in the terminal
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Draw without colors
    #[arg(long)]
    no_color: bool,

    /// Print the solved maze once instead of opening the menu
    #[arg(long)]
    no_display: bool,

    /// Configuration file with KEY=VALUE lines
    config: PathBuf,
}

/// Read configuration, write the maze file, run the viewer
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = MazeConfig::load(&args.config)?;
    let colored = !args.no_color && env::var_os("NO_COLOR").is_none();

    let reserved = pattern::reserve(config.width(), config.height());
    if reserved.status() == PatternStatus::TooSmall {
        eprintln!(
            "Maze of {}x{} is too small for the 42 pattern, generating without it.",
            config.width(),
            config.height()
        );
    }

    let mut build =
        |width: usize, height: usize, seed: Option<u64>| -> anyhow::Result<(Grid, Option<Path>)> {
            let grid = MazeGenerator::new(seed).generate(width, height, &reserved);
            let path = output::write_maze_file(
                config.output_file(),
                &grid,
                config.entry(),
                config.exit(),
            )?;
            if path.is_none() {
                eprintln!("Warning: No path found between entry and exit.");
            }
            println!("Maze written to '{}'.", config.output_file().display());
            Ok((grid, path))
        };

    let (grid, path) = build(config.width(), config.height(), config.seed())?;
    let mut view = View::new(
        grid,
        path,
        config.entry(),
        config.exit(),
        reserved.clone(),
        colored,
    );

    if args.no_display {
        view.state.show_path = true;
        print!("{}", view.draw());
        return Ok(());
    }

    display::exit_on_interrupt()?;
    let mut stdout = io::stdout();
    if io::stdin().is_terminal() {
        display::run(&mut KeyInput, &mut stdout, &mut view, &mut build)
    } else {
        let mut input = LineInput::new(io::stdin().lock());
        display::run(&mut input, &mut stdout, &mut view, &mut build)
    }
}
