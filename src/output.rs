//! Flat text output: one hex digit per cell, then entry, exit and path
//!
//! ```text
//! 9513
//! C7EE
//!
//! 0,0
//! 3,1
//! EEES
//! ```

use std::fmt::{self, Display};
use std::fs;

use anyhow::{anyhow, bail, Context};
use itertools::Itertools;

use crate::grid::{Grid, Point};
use crate::pathfinder::{self, Path};

/// Contents of a maze output file
#[derive(PartialEq, Debug)]
pub struct MazeFile {
    pub grid: Grid,
    pub entry: Point,
    pub exit: Point,
    /// `None` when the exit cannot be reached; written as an empty line
    pub path: Option<Path>,
}

impl MazeFile {
    /// Solve the maze and bundle it for writing
    pub fn solve(grid: Grid, entry: Point, exit: Point) -> Self {
        let path = pathfinder::shortest_path(&grid, entry, exit);
        MazeFile {
            grid,
            entry,
            exit,
            path,
        }
    }

    /// Parse the output format
    ///
    /// Hex digits may be upper or lower case. An empty path line means the
    /// exit was unreachable, unless entry and exit are the same cell.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut lines = text.lines();
        let rows: Vec<&str> = lines
            .by_ref()
            .map(str::trim_end)
            .take_while(|line| !line.is_empty())
            .collect();
        if rows.is_empty() {
            bail!("Maze file has no grid rows");
        }

        let width = rows[0].chars().count();
        let mut masks = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                bail!("Row {} has {} cells, expected {}", y, row.chars().count(), width);
            }
            for (x, c) in row.chars().enumerate() {
                let mask = c
                    .to_digit(16)
                    .ok_or_else(|| anyhow!("Unexpected character `{}` at y={}, x={}", c, y, x))?;
                masks.push(mask as u8);
            }
        }
        let grid = Grid::from_masks(width, rows.len(), masks)?;

        let entry = lines
            .next()
            .context("Missing entry coordinates")?
            .trim()
            .parse::<Point>()
            .context("Invalid entry coordinates")?;
        let exit = lines
            .next()
            .context("Missing exit coordinates")?
            .trim()
            .parse::<Point>()
            .context("Invalid exit coordinates")?;
        let path = match lines.next().map(str::trim).unwrap_or("") {
            "" if entry != exit => None,
            line => Some(
                line.parse::<Path>()
                    .map_err(|c| anyhow!("Unexpected character `{}` in path", c))?,
            ),
        };

        Ok(MazeFile {
            grid,
            entry,
            exit,
            path,
        })
    }
}

impl Display for MazeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.rows() {
            writeln!(f, "{}", row.iter().map(|mask| format!("{:X}", mask)).join(""))?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.entry)?;
        writeln!(f, "{}", self.exit)?;
        match &self.path {
            Some(path) => writeln!(f, "{}", path),
            None => writeln!(f),
        }
    }
}

/// Solve the maze and write it to `file`
///
/// Returns the shortest path, or `None` if the exit is unreachable, in
/// which case the path line is left empty.
pub fn write_maze_file(
    file: impl AsRef<std::path::Path>,
    grid: &Grid,
    entry: Point,
    exit: Point,
) -> anyhow::Result<Option<Path>> {
    let file = file.as_ref();
    let maze = MazeFile::solve(grid.clone(), entry, exit);
    fs::write(file, maze.to_string())
        .with_context(|| format!("Failed to write maze to '{}'", file.display()))?;
    Ok(maze.path)
}
