//! Wall-mask grid

use std::error;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Location of a cell, `x` grows east and `y` grows south
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Point { x, y }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = GridError;

    /// Parse `x,y`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridError::InvalidPoint(s.to_string());
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse().map_err(|_| invalid())?;
        let y = y.trim().parse().map_err(|_| invalid())?;
        Ok(Point { x, y })
    }
}

/// Cardinal direction, doubling as the wall bit on that side of a cell
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Fixed iteration order used by the generator and the pathfinder
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn bit(self) -> u8 {
        match self {
            Direction::North => 1,
            Direction::East => 2,
            Direction::South => 4,
            Direction::West => 8,
        }
    }

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

/// Problems found while building or parsing a grid
#[derive(Debug, PartialEq)]
pub enum GridError {
    /// Width or height is zero
    Empty,
    /// Number of masks does not match `width * height`
    SizeMismatch { expected: usize, actual: usize },
    /// Mask uses bits outside of N/E/S/W
    InvalidMask { at: Point, mask: u8 },
    /// Wall is open on one side only
    UnmirroredWall { at: Point, direction: Direction },
    InvalidPoint(String),
}

impl Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Empty => write!(f, "Grid must have at least one row and one column"),
            GridError::SizeMismatch { expected, actual } => {
                write!(f, "Expected {} cell masks, got {}", expected, actual)
            }
            GridError::InvalidMask { at, mask } => {
                write!(f, "Invalid wall mask {:#x} at {}", mask, at)
            }
            GridError::UnmirroredWall { at, direction } => write!(
                f,
                "Wall {} of cell {} does not match its neighbour",
                direction.letter(),
                at
            ),
            GridError::InvalidPoint(s) => write!(f, "Invalid coordinate `{}`, expected x,y", s),
        }
    }
}

impl error::Error for GridError {}

/// Rectangular maze of 4-bit wall masks, stored row by row
///
/// A set bit means the wall on that side is closed.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Mask of a cell with all four walls closed
    pub const ALL_WALLS: u8 = 0xF;

    /// Create a grid where every cell is fully walled
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![Self::ALL_WALLS; width * height],
        }
    }

    /// Build a grid from row-major masks
    ///
    /// Fails if the masks do not fit the dimensions, contain bits other
    /// than N/E/S/W, or if a wall between two cells is closed on one side
    /// and open on the other.
    pub fn from_masks(width: usize, height: usize, cells: Vec<u8>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Empty);
        }
        if cells.len() != width * height {
            return Err(GridError::SizeMismatch {
                expected: width * height,
                actual: cells.len(),
            });
        }
        let grid = Grid {
            width,
            height,
            cells,
        };
        for at in grid.points() {
            let mask = grid.walls(at);
            if mask > Self::ALL_WALLS {
                return Err(GridError::InvalidMask { at, mask });
            }
            // East and south cover every shared wall once
            for direction in [Direction::East, Direction::South] {
                if let Some(next) = grid.neighbor(at, direction) {
                    if grid.has_wall(at, direction) != grid.has_wall(next, direction.opposite()) {
                        return Err(GridError::UnmirroredWall { at, direction });
                    }
                }
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, at: Point) -> bool {
        at.x < self.width && at.y < self.height
    }

    /// Wall mask of a cell
    ///
    /// Panics if `at` is outside of the grid.
    pub fn walls(&self, at: Point) -> u8 {
        self.cells[at.y * self.width + at.x]
    }

    pub fn has_wall(&self, at: Point, direction: Direction) -> bool {
        self.walls(at) & direction.bit() != 0
    }

    /// Like [Self::has_wall], but cells outside of the grid have no walls
    pub fn has_wall_at(&self, x: isize, y: isize, direction: Direction) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let at = Point::new(x as usize, y as usize);
        self.contains(at) && self.has_wall(at, direction)
    }

    /// Adjacent cell in `direction`, if it is inside the grid
    pub fn neighbor(&self, at: Point, direction: Direction) -> Option<Point> {
        let (dx, dy) = direction.delta();
        let x = at.x.checked_add_signed(dx)?;
        let y = at.y.checked_add_signed(dy)?;
        let next = Point::new(x, y);
        self.contains(next).then_some(next)
    }

    /// Open the wall between `at` and its neighbour in `direction`
    ///
    /// Both sides of the wall are cleared. Returns the neighbour, or `None`
    /// (leaving the grid untouched) if there is no neighbour that way.
    pub fn carve(&mut self, at: Point, direction: Direction) -> Option<Point> {
        let next = self.neighbor(at, direction)?;
        self.cells[at.y * self.width + at.x] &= !direction.bit();
        self.cells[next.y * self.width + next.x] &= !direction.opposite().bit();
        Some(next)
    }

    /// All cell coordinates in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Point::new(x, y)))
    }

    /// Rows of wall masks
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width)
    }

    /// Number of open passages between pairs of in-bounds cells
    pub fn open_edges(&self) -> usize {
        self.points()
            .map(|at| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&d| self.neighbor(at, d).is_some() && !self.has_wall(at, d))
                    .count()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_fully_walled() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.points().count(), 12);
        assert!(grid.points().all(|p| grid.walls(p) == Grid::ALL_WALLS));
        assert_eq!(grid.open_edges(), 0);
    }

    #[test]
    fn carve_clears_both_sides() {
        let mut grid = Grid::new(3, 3);
        let next = grid.carve(Point::new(1, 1), Direction::North);

        assert_eq!(next, Some(Point::new(1, 0)));
        assert_eq!(grid.walls(Point::new(1, 1)), 0b1110);
        assert_eq!(grid.walls(Point::new(1, 0)), 0b1011);
        assert_eq!(grid.open_edges(), 1);
    }

    #[test]
    fn carve_off_the_edge_is_ignored() {
        let mut grid = Grid::new(3, 3);
        assert_eq!(grid.carve(Point::new(0, 0), Direction::West), None);
        assert_eq!(grid.carve(Point::new(2, 2), Direction::South), None);
        assert_eq!(grid, Grid::new(3, 3));
    }

    #[test]
    fn from_masks_validates() {
        assert_eq!(Grid::from_masks(0, 3, vec![]), Err(GridError::Empty));
        assert_eq!(
            Grid::from_masks(2, 2, vec![15; 3]),
            Err(GridError::SizeMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            Grid::from_masks(1, 1, vec![16]),
            Err(GridError::InvalidMask {
                at: Point::new(0, 0),
                mask: 16
            })
        );
        // (0,0) has its east wall open, (1,0) keeps its west wall
        assert_eq!(
            Grid::from_masks(2, 1, vec![0b1101, 0b1111]),
            Err(GridError::UnmirroredWall {
                at: Point::new(0, 0),
                direction: Direction::East
            })
        );
        assert!(Grid::from_masks(2, 1, vec![0b1101, 0b0111]).is_ok());
    }

    #[test]
    fn outer_walls_are_not_checked_for_mirroring() {
        let grid = Grid::from_masks(3, 3, vec![0; 9]).unwrap();
        assert_eq!(grid.open_edges(), 12);
    }

    #[test]
    fn parse_point() {
        assert_eq!("3,4".parse::<Point>(), Ok(Point::new(3, 4)));
        assert_eq!(" 0 , 12".parse::<Point>(), Ok(Point::new(0, 12)));
        assert!("3".parse::<Point>().is_err());
        assert!("-1,2".parse::<Point>().is_err());
        assert_eq!(Point::new(5, 6).to_string(), "5,6");
    }

    #[test]
    fn has_wall_at_outside_grid() {
        let grid = Grid::new(2, 2);
        assert!(!grid.has_wall_at(-1, 0, Direction::East));
        assert!(!grid.has_wall_at(0, 2, Direction::North));
        assert!(grid.has_wall_at(1, 1, Direction::South));
    }
}
