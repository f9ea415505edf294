//! Cells kept closed to draw a "42" in the middle of the maze

use std::collections::BTreeSet;

use crate::grid::Point;

/// Footprint of the glyph
pub const PATTERN_WIDTH: usize = 7;
pub const PATTERN_HEIGHT: usize = 5;

/// Smallest maze that can hold the glyph with a free ring around it
pub const MIN_WIDTH: usize = 9;
pub const MIN_HEIGHT: usize = 7;

/// Offsets from the top-left corner of the glyph
const OFFSETS: [(usize, usize); 20] = [
    // 4
    (0, 0),
    (2, 0),
    (0, 1),
    (2, 1),
    (0, 2),
    (1, 2),
    (2, 2),
    (2, 3),
    (2, 4),
    // 2
    (4, 0),
    (5, 0),
    (6, 0),
    (6, 1),
    (4, 2),
    (5, 2),
    (6, 2),
    (4, 3),
    (4, 4),
    (5, 4),
    (6, 4),
];

/// Whether the glyph could be placed
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum PatternStatus {
    Placed,
    TooSmall,
}

/// Set of cells that must never be carved
#[derive(Clone, Debug)]
pub struct Reserved {
    cells: BTreeSet<Point>,
    status: PatternStatus,
}

impl Reserved {
    /// No reserved cells at all
    pub fn none() -> Self {
        Reserved {
            cells: BTreeSet::new(),
            status: PatternStatus::TooSmall,
        }
    }

    /// Arbitrary set of cells; an empty set reports [PatternStatus::TooSmall]
    pub fn from_cells(cells: impl IntoIterator<Item = Point>) -> Self {
        let cells: BTreeSet<Point> = cells.into_iter().collect();
        let status = if cells.is_empty() {
            PatternStatus::TooSmall
        } else {
            PatternStatus::Placed
        };
        Reserved { cells, status }
    }

    pub fn contains(&self, at: Point) -> bool {
        self.cells.contains(&at)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> + Clone {
        self.cells.iter()
    }

    pub fn status(&self) -> PatternStatus {
        self.status
    }
}

/// Reserve the cells of the glyph, centered in a `width` x `height` maze
///
/// Mazes smaller than [MIN_WIDTH] x [MIN_HEIGHT] get an empty set with
/// [PatternStatus::TooSmall]; this is not an error.
pub fn reserve(width: usize, height: usize) -> Reserved {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Reserved::none();
    }
    let left = (width - PATTERN_WIDTH) / 2;
    let top = (height - PATTERN_HEIGHT) / 2;
    Reserved {
        cells: OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(left + dx, top + dy))
            .collect(),
        status: PatternStatus::Placed,
    }
}
