//! Shortest route through a carved maze

use std::collections::{HashSet, VecDeque};
use std::fmt::{self, Display};
use std::str::FromStr;

use itertools::Itertools;

use crate::grid::{Direction, Grid, Point};

/// Walk through the maze as a sequence of moves
///
/// An empty path means that the start and the goal are the same cell.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Path {
    steps: Vec<Direction>,
}

impl Path {
    pub fn new(steps: Vec<Direction>) -> Self {
        Path { steps }
    }

    /// Number of edges traversed
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }

    /// Cells visited when replaying the path from `start`, `start` included
    ///
    /// Coordinates are not checked against any grid; a step off the
    /// top or left edge ends the replay.
    pub fn cells(&self, start: Point) -> Vec<Point> {
        let mut at = start;
        let mut cells = vec![at];
        for step in &self.steps {
            let (dx, dy) = step.delta();
            match (at.x.checked_add_signed(dx), at.y.checked_add_signed(dy)) {
                (Some(x), Some(y)) => at = Point::new(x, y),
                _ => break,
            }
            cells.push(at);
        }
        cells
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.steps.iter().map(|d| d.letter()).join(""))
    }
}

impl FromStr for Path {
    type Err = char;

    /// Parse a string of `N`, `E`, `S`, `W` letters, returning the first
    /// offending character on failure
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| Direction::from_letter(c).ok_or(c))
            .collect::<Result<Vec<_>, _>>()
            .map(Path::new)
    }
}

/// Find the shortest path from `entry` to `exit` with breadth-first search
///
/// Moves are only allowed through open walls, tried in N, E, S, W order,
/// so ties between equally short paths are always broken the same way.
/// Returns `None` when `exit` cannot be reached from `entry`.
pub fn shortest_path(grid: &Grid, entry: Point, exit: Point) -> Option<Path> {
    if entry == exit {
        return Some(Path::default());
    }

    let mut queue: VecDeque<(Point, Vec<Direction>)> = VecDeque::from([(entry, vec![])]);
    let mut visited = HashSet::from([entry]);

    while let Some((at, steps)) = queue.pop_front() {
        for direction in Direction::ALL {
            if grid.has_wall(at, direction) {
                continue;
            }
            let Some(next) = grid.neighbor(at, direction) else {
                continue;
            };
            if !visited.insert(next) {
                continue;
            }
            let mut next_steps = steps.clone();
            next_steps.push(direction);
            if next == exit {
                return Some(Path::new(next_steps));
            }
            queue.push_back((next, next_steps));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze_generator::MazeGenerator;
    use crate::pattern::{self, Reserved};

    fn open_grid(width: usize, height: usize) -> Grid {
        Grid::from_masks(width, height, vec![0; width * height]).unwrap()
    }

    /// Follow `path` from `start`, failing on any closed wall
    fn walk(grid: &Grid, start: Point, path: &Path) -> Point {
        path.steps().iter().fold(start, |at, &d| {
            assert!(!grid.has_wall(at, d), "crossed wall {:?} at {}", d, at);
            grid.neighbor(at, d).expect("walked off the grid")
        })
    }

    /// Exhaustive distances from `start`, relaxing edges until nothing changes
    fn distances(grid: &Grid, start: Point) -> Vec<Option<usize>> {
        let index = |p: Point| p.y * grid.width() + p.x;
        let mut dist = vec![None; grid.width() * grid.height()];
        dist[index(start)] = Some(0);
        let mut changed = true;
        while changed {
            changed = false;
            for at in grid.points() {
                let Some(d) = dist[index(at)] else { continue };
                for dir in Direction::ALL {
                    if grid.has_wall(at, dir) {
                        continue;
                    }
                    if let Some(n) = grid.neighbor(at, dir) {
                        if dist[index(n)].map_or(true, |old| old > d + 1) {
                            dist[index(n)] = Some(d + 1);
                            changed = true;
                        }
                    }
                }
            }
        }
        dist
    }

    #[test]
    fn same_cell_is_empty_path() {
        let grid = Grid::new(3, 3);
        let path = shortest_path(&grid, Point::new(1, 1), Point::new(1, 1));
        assert_eq!(path, Some(Path::default()));
    }

    #[test]
    fn open_grid_corner_to_corner() {
        let grid = open_grid(3, 3);
        let path = shortest_path(&grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.to_string(), "EESS");
    }

    #[test]
    fn closed_grid_is_unreachable() {
        let grid = Grid::new(3, 3);
        assert_eq!(shortest_path(&grid, Point::new(0, 0), Point::new(2, 2)), None);
    }

    #[test]
    fn reserved_exit_is_unreachable() {
        let reserved = pattern::reserve(9, 7);
        let grid = MazeGenerator::new(Some(5)).generate(9, 7, &reserved);
        let inside = *reserved.iter().next().unwrap();
        assert_eq!(shortest_path(&grid, Point::new(0, 0), inside), None);
    }

    #[test]
    fn seeded_three_by_three() {
        // B93 / C6A / D56
        let grid = MazeGenerator::new(Some(1)).generate(3, 3, &Reserved::none());
        let exit = Point::new(2, 2);
        let path = shortest_path(&grid, Point::new(0, 0), exit).unwrap();
        assert_eq!(path.to_string(), "SENESS");
        assert_eq!(walk(&grid, Point::new(0, 0), &path), exit);
    }

    #[test]
    fn path_is_shortest() {
        // Extra openings give the maze loops, so several routes exist
        let mut grid = MazeGenerator::new(Some(11)).generate(8, 6, &Reserved::none());
        for (x, y) in [(1, 1), (4, 2), (6, 4), (2, 4)] {
            grid.carve(Point::new(x, y), Direction::East);
            grid.carve(Point::new(x, y), Direction::South);
        }

        let entry = Point::new(0, 0);
        let dist = distances(&grid, entry);
        for exit in grid.points() {
            let path = shortest_path(&grid, entry, exit).unwrap();
            assert_eq!(walk(&grid, entry, &path), exit);
            assert_eq!(Some(path.len()), dist[exit.y * grid.width() + exit.x]);
        }
    }

    #[test]
    fn parse_and_print() {
        let path: Path = "NESW".parse().unwrap();
        assert_eq!(
            path.steps(),
            &[
                Direction::North,
                Direction::East,
                Direction::South,
                Direction::West
            ]
        );
        assert_eq!(path.to_string(), "NESW");
        assert_eq!("NEX".parse::<Path>(), Err('X'));
        assert_eq!("".parse::<Path>(), Ok(Path::default()));
    }

    #[test]
    fn replay_cells() {
        let path: Path = "EES".parse().unwrap();
        assert_eq!(
            path.cells(Point::new(0, 0)),
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1)
            ]
        );
    }
}
