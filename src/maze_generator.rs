//! Maze generation

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::{Direction, Grid, Point};
use crate::pattern::Reserved;

/// Perfect maze generator
///
/// Each generator owns its random source. With a seed, two generators
/// produce identical mazes for identical dimensions; without one, the
/// source is freshly drawn from the OS for every generator.
///
/// The source is ChaCha8, whose output stream is fixed across releases:
/// a seed names the same maze on every platform and version.
pub struct MazeGenerator {
    random: ChaCha8Rng,
}

impl MazeGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                ChaCha8Rng::seed_from_u64(state)
            } else {
                ChaCha8Rng::from_entropy()
            },
        }
    }

    /// Generate a perfect maze around the `reserved` cells
    pub fn generate(&mut self, width: usize, height: usize, reserved: &Reserved) -> Grid {
        carve(&mut self.random, width, height, reserved)
    }
}

/// Carve a spanning tree over all non-reserved cells
///
/// Iterative randomized depth-first search. Reserved cells are marked
/// visited up front, so they keep all four walls; the walk starts at the
/// first free cell in row-major order. If there is no free cell, the grid
/// comes back fully walled.
pub fn carve<R: Rng + ?Sized>(
    random: &mut R,
    width: usize,
    height: usize,
    reserved: &Reserved,
) -> Grid {
    let mut grid = Grid::new(width, height);
    let mut visited = vec![false; width * height];
    for p in reserved.iter().filter(|p| grid.contains(**p)) {
        visited[p.y * width + p.x] = true;
    }

    let Some(start) = grid.points().find(|p| !visited[p.y * width + p.x]) else {
        return grid;
    };
    visited[start.y * width + start.x] = true;
    let mut stack: Vec<Point> = vec![start];

    while let Some(&current) = stack.last() {
        let unvisited: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| {
                grid.neighbor(current, d)
                    .is_some_and(|n| !visited[n.y * width + n.x])
            })
            .collect();

        if let Some(&direction) = unvisited.choose(random) {
            if let Some(next) = grid.carve(current, direction) {
                visited[next.y * width + next.x] = true;
                stack.push(next);
            }
        } else {
            // Dead end
            stack.pop();
        }
    }

    grid
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;

    use super::*;
    use crate::pattern::{self, Reserved};

    /// Cells reachable from `start` through open walls, and whether a cycle was seen
    fn explore(grid: &Grid, start: Point) -> (HashSet<Point>, bool) {
        let mut seen = HashSet::from([start]);
        let mut stack = vec![(start, None)];
        let mut cycle = false;
        while let Some((at, from)) = stack.pop() {
            for d in Direction::ALL {
                if grid.has_wall(at, d) {
                    continue;
                }
                let Some(next) = grid.neighbor(at, d) else {
                    continue;
                };
                if Some(next) == from {
                    continue;
                }
                if !seen.insert(next) {
                    cycle = true;
                    continue;
                }
                stack.push((next, Some(at)));
            }
        }
        (seen, cycle)
    }

    #[test]
    fn spanning_tree_without_pattern() {
        for (w, h) in [(3, 3), (4, 7), (8, 6), (15, 3)] {
            let grid = MazeGenerator::new(None).generate(w, h, &Reserved::none());
            assert_eq!(grid.open_edges(), w * h - 1);

            let (seen, cycle) = explore(&grid, Point::new(0, 0));
            assert_eq!(seen.len(), w * h);
            assert!(!cycle);
        }
    }

    #[test]
    fn reserved_cells_stay_closed() {
        let (w, h) = (20, 15);
        let reserved = pattern::reserve(w, h);
        let grid = MazeGenerator::new(Some(42)).generate(w, h, &reserved);

        for p in reserved.iter() {
            assert_eq!(grid.walls(*p), Grid::ALL_WALLS);
        }
        let free = w * h - reserved.len();
        assert_eq!(grid.open_edges(), free - 1);

        let (seen, cycle) = explore(&grid, Point::new(0, 0));
        assert_eq!(seen.len(), free);
        assert!(seen.iter().all(|p| !reserved.contains(*p)));
        assert!(!cycle);
    }

    #[test]
    fn smallest_pattern_maze_is_connected() {
        for seed in 0..20 {
            let reserved = pattern::reserve(9, 7);
            let grid = MazeGenerator::new(Some(seed)).generate(9, 7, &reserved);
            assert_eq!(grid.open_edges(), 9 * 7 - 20 - 1);
        }
    }

    #[test]
    fn start_skips_reserved_origin() {
        let reserved = Reserved::from_cells([Point::new(0, 0), Point::new(1, 0)]);
        let grid = MazeGenerator::new(Some(3)).generate(3, 3, &reserved);

        assert_eq!(grid.walls(Point::new(0, 0)), Grid::ALL_WALLS);
        assert_eq!(grid.walls(Point::new(1, 0)), Grid::ALL_WALLS);
        assert_eq!(grid.open_edges(), 9 - 2 - 1);
    }

    #[test]
    fn same_seed_same_maze() {
        let reserved = pattern::reserve(12, 9);
        let a = MazeGenerator::new(Some(1)).generate(12, 9, &reserved);
        let b = MazeGenerator::new(Some(1)).generate(12, 9, &reserved);
        assert_eq!(a, b);

        let a = MazeGenerator::new(Some(1)).generate(3, 3, &Reserved::none());
        let b = MazeGenerator::new(Some(1)).generate(3, 3, &Reserved::none());
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_three_by_three_fixture() {
        let grid = MazeGenerator::new(Some(1)).generate(3, 3, &Reserved::none());
        let expected = Grid::from_masks(
            3,
            3,
            vec![0xB, 0x9, 0x3, 0xC, 0x6, 0xA, 0xD, 0x5, 0x6],
        )
        .unwrap();
        assert_eq!(grid, expected);
    }

    #[test]
    fn explicit_random_source() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(
            carve(&mut a, 6, 5, &Reserved::none()),
            carve(&mut b, 6, 5, &Reserved::none())
        );
    }

    #[test]
    fn everything_reserved() {
        let all = Reserved::from_cells((0..3).flat_map(|y| (0..3).map(move |x| Point::new(x, y))));
        let grid = MazeGenerator::new(Some(0)).generate(3, 3, &all);
        assert_eq!(grid, Grid::new(3, 3));
    }
}
