//! Interactive terminal viewer
//!
//! A blocking menu loop: every command clears the screen and redraws the
//! whole maze.

use std::io::{self, BufRead, Write};
use std::process;

use anyhow::Context;
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::{style, Color, Stylize};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;

use crate::grid::{Grid, Point};
use crate::pathfinder::Path;
use crate::pattern::Reserved;
use crate::render::{self, Overlay, Palette, PALETTE};

const MENU_WIDTH: usize = 26;

/// Menu entries, selected with `1` to `4`
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Command {
    Regenerate,
    TogglePath,
    CycleColor,
    Quit,
}

impl Command {
    pub fn parse(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(Command::Regenerate),
            "2" => Some(Command::TogglePath),
            "3" => Some(Command::CycleColor),
            "4" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// Source of menu choices
pub trait MenuInput {
    /// Block until the next choice; `None` on end of input or interrupt
    fn read_choice(&mut self) -> io::Result<Option<String>>;
}

/// One choice per line, for piped input
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        LineInput { reader }
    }
}

impl<R: BufRead> MenuInput for LineInput<R> {
    fn read_choice(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match self.reader.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line.trim().to_string())),
        }
    }
}

/// Single key presses from the terminal
///
/// Raw mode is only enabled while waiting for a key, so everything else
/// is printed in the normal cooked mode. Ctrl-C, Ctrl-D and Esc end the
/// session.
pub struct KeyInput;

impl KeyInput {
    fn read_key() -> io::Result<Option<String>> {
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            return Ok(match key.code {
                KeyCode::Char('c') | KeyCode::Char('d') if ctrl => None,
                KeyCode::Esc => None,
                KeyCode::Char(c) => Some(c.to_string()),
                _ => Some(String::new()),
            });
        }
    }
}

impl MenuInput for KeyInput {
    fn read_choice(&mut self) -> io::Result<Option<String>> {
        terminal::enable_raw_mode()?;
        let key = Self::read_key();
        terminal::disable_raw_mode()?;
        key
    }
}

/// End the session cleanly on SIGINT
///
/// Covers line input and everything outside the raw-mode key read; in raw
/// mode Ctrl-C arrives as a key instead. Stdout must not be held locked
/// across [run], or the goodbye line could never be written.
pub fn exit_on_interrupt() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        let _ = terminal::disable_raw_mode();
        let mut out = io::stdout();
        let _ = writeln!(out, "\nGoodbye!");
        let _ = out.flush();
        process::exit(0);
    })
    .context("Failed to install interrupt handler")
}

/// Builds a new maze and its solution for the given dimensions
pub trait Regenerate {
    fn regenerate(
        &mut self,
        width: usize,
        height: usize,
        seed: Option<u64>,
    ) -> anyhow::Result<(Grid, Option<Path>)>;
}

impl<F> Regenerate for F
where
    F: FnMut(usize, usize, Option<u64>) -> anyhow::Result<(Grid, Option<Path>)>,
{
    fn regenerate(
        &mut self,
        width: usize,
        height: usize,
        seed: Option<u64>,
    ) -> anyhow::Result<(Grid, Option<Path>)> {
        self(width, height, seed)
    }
}

/// Viewer settings changed by the menu
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct RenderState {
    pub show_path: bool,
    /// Index into [PALETTE]
    pub color_index: usize,
}

/// Maze currently on screen, with its overlays and settings
pub struct View {
    grid: Grid,
    path: Option<Path>,
    entry: Point,
    exit: Point,
    reserved: Reserved,
    colored: bool,
    pub state: RenderState,
}

impl View {
    pub fn new(
        grid: Grid,
        path: Option<Path>,
        entry: Point,
        exit: Point,
        reserved: Reserved,
        colored: bool,
    ) -> Self {
        View {
            grid,
            path,
            entry,
            exit,
            reserved,
            colored,
            state: RenderState::default(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Maze with overlays, as printed
    pub fn draw(&self) -> String {
        let overlay = Overlay {
            entry: self.entry,
            exit: self.exit,
            path: self.path.as_ref(),
            show_path: self.state.show_path,
            reserved: &self.reserved,
        };
        render::render_maze(&self.grid, &overlay, &self.palette())
    }

    fn palette(&self) -> Palette {
        Palette {
            wall: PALETTE[self.state.color_index].0,
            colored: self.colored,
        }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.colored {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn summary(&self) -> String {
        match &self.path {
            Some(path) => format!(
                "{}x{} maze, shortest path: {} steps",
                self.grid.width(),
                self.grid.height(),
                path.len()
            ),
            None => format!(
                "{}x{} maze, no path between entry and exit",
                self.grid.width(),
                self.grid.height()
            ),
        }
    }

    fn menu(&self) -> String {
        let frame = |text: &str| self.paint(text, Color::White);
        let border = |left: &str, right: &str| {
            frame(&format!("{}{}{}", left, "═".repeat(MENU_WIDTH), right))
        };
        let line = |text: &str| {
            format!(
                "{} {:<width$} {}",
                frame("║"),
                text,
                frame("║"),
                width = MENU_WIDTH - 2
            )
        };

        let title = format!("{:^1$}", "A-Maze-ing", MENU_WIDTH);
        let toggle = if self.state.show_path {
            "2. Hide path"
        } else {
            "2. Show path"
        };
        let color = format!("3. Wall colour: {}", PALETTE[self.state.color_index].1);
        [
            border("╔", "╗"),
            format!("{}{}{}", frame("║"), self.paint(&title, Color::Yellow), frame("║")),
            border("╠", "╣"),
            line("1. New maze"),
            line(toggle),
            line(&color),
            line("4. Quit"),
            border("╚", "╝"),
        ]
        .join("\n")
    }

    /// Apply a menu command; returns `false` on quit
    fn apply<R: Regenerate>(&mut self, command: Command, regenerate: &mut R) -> anyhow::Result<bool> {
        match command {
            Command::Regenerate => {
                let (grid, path) = regenerate
                    .regenerate(self.grid.width(), self.grid.height(), None)
                    .context("Failed to regenerate maze")?;
                self.grid = grid;
                self.path = path;
                self.state.show_path = false;
            }
            Command::TogglePath => self.state.show_path = !self.state.show_path,
            Command::CycleColor => {
                self.state.color_index = (self.state.color_index + 1) % PALETTE.len()
            }
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }
}

/// Run the menu loop until quit, end of input or interrupt
pub fn run<I, W, R>(input: &mut I, out: &mut W, view: &mut View, regenerate: &mut R) -> anyhow::Result<()>
where
    I: MenuInput,
    W: Write,
    R: Regenerate,
{
    loop {
        out.queue(Clear(ClearType::All))?.queue(MoveTo(0, 0))?;
        write!(out, "{}", view.draw())?;
        writeln!(out, "{}", view.summary())?;
        writeln!(out)?;
        writeln!(out, "{}", view.menu())?;
        writeln!(out)?;
        write!(out, "Choice (1-4): ")?;
        out.flush()?;

        let Some(choice) = input.read_choice()? else {
            writeln!(out)?;
            break;
        };
        if let Some(command) = Command::parse(&choice) {
            if !view.apply(command, regenerate)? {
                writeln!(out)?;
                break;
            }
        }
    }
    writeln!(out, "Goodbye!")?;
    out.flush()?;
    Ok(())
}
