//! Generate a perfect maze, find the way through it and show it in the terminal
//!
//! The maze is a grid of 4-bit wall masks (N=1, E=2, S=4, W=8, a set bit
//! is a closed wall). Cells of a centered "42" glyph are kept closed when
//! the maze is large enough.
//!
//! # Examples
//! ## Generate and solve a maze
//! ```
//! use amazeing::{pathfinder, pattern, MazeGenerator, Point};
//!
//! let reserved = pattern::reserve(20, 15);
//! let grid = MazeGenerator::new(Some(42)).generate(20, 15, &reserved);
//!
//! // Every free cell is connected by exactly one route
//! assert_eq!(grid.open_edges(), 20 * 15 - reserved.len() - 1);
//!
//! let path = pathfinder::shortest_path(&grid, Point::new(0, 0), Point::new(19, 14)).unwrap();
//! println!("{} steps: {}", path.len(), path);
//! ```
//!
//! ## Output file
//! ```
//! use amazeing::{Grid, MazeFile, Point};
//!
//! let grid = Grid::from_masks(2, 1, vec![0b1101, 0b0111]).unwrap();
//! let maze = MazeFile::solve(grid, Point::new(0, 0), Point::new(1, 0));
//! assert_eq!(maze.to_string(), "D7\n\n0,0\n1,0\nE\n");
//! ```

pub mod config;
pub mod display;
pub mod grid;
pub mod maze_generator;
pub mod output;
pub mod pathfinder;
pub mod pattern;
pub mod render;

pub use config::MazeConfig;
pub use grid::{Direction, Grid, Point};
pub use maze_generator::MazeGenerator;
pub use output::MazeFile;
pub use pathfinder::Path;
pub use pattern::Reserved;
