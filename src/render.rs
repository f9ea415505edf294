//! Box-drawing rendering of a maze

use std::collections::HashSet;

use crossterm::style::{style, Color, Stylize};

use crate::grid::{Direction, Grid, Point};
use crate::pathfinder::Path;
use crate::pattern::Reserved;

/// Wall colors offered by the viewer, in cycling order
pub const PALETTE: [(Color, &str); 7] = [
    (Color::White, "White"),
    (Color::Yellow, "Yellow"),
    (Color::Cyan, "Cyan"),
    (Color::DarkMagenta, "Magenta"),
    (Color::DarkBlue, "Blue"),
    (Color::Green, "Green"),
    (Color::Red, "Red"),
];

/// Corner characters indexed by `N<<3 | E<<2 | S<<1 | W`
const CORNERS: [char; 16] = [
    ' ', // ----
    '╴', // ---W
    '╷', // --S-
    '┐', // --SW
    '╶', // -E--
    '─', // -E-W
    '┌', // -ES-
    '┬', // -ESW
    '╵', // N---
    '┘', // N--W
    '│', // N-S-
    '┤', // N-SW
    '└', // NE--
    '┴', // NE-W
    '├', // NES-
    '┼', // NESW
];

const H_WALL: &str = "──";
const V_WALL: &str = "│";
const ENTRY: (&str, Color) = ("▶▶", Color::Green);
const EXIT: (&str, Color) = ("★★", Color::Red);
const TRAIL: (&str, Color) = ("··", Color::Cyan);
const PATTERN: (&str, Color) = ("░░", Color::Yellow);

/// Everything drawn on top of the walls
pub struct Overlay<'a> {
    pub entry: Point,
    pub exit: Point,
    pub path: Option<&'a Path>,
    pub show_path: bool,
    pub reserved: &'a Reserved,
}

/// How walls and markers are colored
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub wall: Color,
    /// Monochrome fallback when `false`: no escape sequences at all
    pub colored: bool,
}

impl Palette {
    fn paint(&self, text: &str, color: Color) -> String {
        if self.colored {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn wall(&self, text: &str) -> String {
        self.paint(text, self.wall)
    }

    /// Wall segment if `present`, otherwise blanks of the same width
    fn segment(&self, present: bool, text: &str) -> String {
        if present {
            self.wall(text)
        } else {
            " ".repeat(text.chars().count())
        }
    }
}

/// Box-drawing character for the corner at (`cx`, `cy`)
///
/// A grid of W x H cells has (W+1) x (H+1) corners; corner (cx, cy) is
/// the top-left corner of cell (cx, cy). Each arm is the wall segment
/// leaving the corner in that direction, present if either cell along
/// the segment has that wall.
pub fn corner_glyph(grid: &Grid, cx: usize, cy: usize) -> char {
    let (x, y) = (cx as isize, cy as isize);
    let has = |x, y, d| grid.has_wall_at(x, y, d);

    let arm_n = has(x - 1, y - 1, Direction::East) || has(x, y - 1, Direction::West);
    let arm_e = has(x, y - 1, Direction::South) || has(x, y, Direction::North);
    let arm_s = has(x - 1, y, Direction::East) || has(x, y, Direction::West);
    let arm_w = has(x - 1, y - 1, Direction::South) || has(x - 1, y, Direction::North);

    let key = (arm_n as usize) << 3 | (arm_e as usize) << 2 | (arm_s as usize) << 1 | arm_w as usize;
    CORNERS[key]
}

fn corner(grid: &Grid, cx: usize, cy: usize, palette: &Palette) -> String {
    match corner_glyph(grid, cx, cy) {
        ' ' => " ".to_string(),
        c => palette.wall(&c.to_string()),
    }
}

/// Interior of a cell, two columns wide
fn interior(at: Point, overlay: &Overlay, trail: &HashSet<Point>, palette: &Palette) -> String {
    let marker = if at == overlay.entry {
        Some(ENTRY)
    } else if at == overlay.exit {
        Some(EXIT)
    } else if overlay.show_path && trail.contains(&at) {
        Some(TRAIL)
    } else if overlay.reserved.contains(at) {
        Some(PATTERN)
    } else {
        None
    };
    match marker {
        Some((text, color)) => palette.paint(text, color),
        None => "  ".to_string(),
    }
}

/// Render the whole maze, one terminal line per string line
///
/// Each cell row takes two lines: the corners and north walls above it,
/// then the west walls and interiors. A final line closes the bottom.
pub fn render_maze(grid: &Grid, overlay: &Overlay, palette: &Palette) -> String {
    let trail: HashSet<Point> = match (overlay.show_path, overlay.path) {
        (true, Some(path)) => path.cells(overlay.entry).into_iter().collect(),
        _ => HashSet::new(),
    };
    let (width, height) = (grid.width(), grid.height());
    let mut out = String::new();

    for y in 0..height {
        for x in 0..width {
            out += &corner(grid, x, y, palette);
            out += &palette.segment(grid.has_wall(Point::new(x, y), Direction::North), H_WALL);
        }
        out += &corner(grid, width, y, palette);
        out.push('\n');

        for x in 0..width {
            let at = Point::new(x, y);
            out += &palette.segment(grid.has_wall(at, Direction::West), V_WALL);
            out += &interior(at, overlay, &trail, palette);
        }
        out += &palette.segment(grid.has_wall(Point::new(width - 1, y), Direction::East), V_WALL);
        out.push('\n');
    }

    for x in 0..width {
        out += &corner(grid, x, height, palette);
        out += &palette.segment(grid.has_wall(Point::new(x, height - 1), Direction::South), H_WALL);
    }
    out += &corner(grid, width, height, palette);
    out.push('\n');
    out
}
