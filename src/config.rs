//! `KEY=VALUE` configuration file
//!
//! ```text
//! # 20x15 maze, solved from the top-left to the bottom-right corner
//! WIDTH=20
//! HEIGHT=15
//! ENTRY=0,0
//! EXIT=19,14
//! OUTPUT_FILE=maze.txt
//! PERFECT=True
//! SEED=42
//! ```

use std::collections::HashMap;
use std::error;
use std::fmt::{self, Display};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::grid::Point;
use crate::pattern;

/// Smallest accepted width and height
pub const MIN_SIDE: usize = 3;

const DEFAULT_OUTPUT_FILE: &str = "maze.txt";
const KEYS: [&str; 7] = [
    "WIDTH",
    "HEIGHT",
    "ENTRY",
    "EXIT",
    "OUTPUT_FILE",
    "PERFECT",
    "SEED",
];

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Line without `=`
    InvalidLine(usize, String),
    UnknownKey(String),
    MissingKey(&'static str),
    InvalidValue { key: &'static str, value: String },
    TooSmall { width: usize, height: usize },
    OutOfBounds { key: &'static str, at: Point },
    SameEntryExit(Point),
    /// Entry or exit sits inside the reserved pattern
    Reserved { key: &'static str, at: Point },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLine(n, line) => {
                write!(f, "Invalid format (missing '=') on line {}: {}", n, line)
            }
            ConfigError::UnknownKey(key) => write!(f, "Unknown setting '{}'", key),
            ConfigError::MissingKey(key) => write!(f, "Missing mandatory setting '{}'", key),
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{}' for {}", value, key)
            }
            ConfigError::TooSmall { width, height } => write!(
                f,
                "WIDTH and HEIGHT must be at least {}, got {}x{}",
                MIN_SIDE, width, height
            ),
            ConfigError::OutOfBounds { key, at } => write!(f, "{} ({}) is out of bounds", key, at),
            ConfigError::SameEntryExit(at) => {
                write!(f, "ENTRY and EXIT must be different coordinates, both are {}", at)
            }
            ConfigError::Reserved { key, at } => {
                write!(f, "{} ({}) lies inside the 42 pattern", key, at)
            }
        }
    }
}

impl error::Error for ConfigError {}

/// Validated maze settings
///
/// Can only be built through [MazeConfig::new] (or the parsers on top of
/// it), so every instance satisfies the size and coordinate rules.
#[derive(Debug, Clone, PartialEq)]
pub struct MazeConfig {
    width: usize,
    height: usize,
    entry: Point,
    exit: Point,
    output_file: PathBuf,
    perfect: bool,
    seed: Option<u64>,
}

impl MazeConfig {
    pub fn new(
        width: usize,
        height: usize,
        entry: Point,
        exit: Point,
        output_file: PathBuf,
        perfect: bool,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if width < MIN_SIDE || height < MIN_SIDE {
            return Err(ConfigError::TooSmall { width, height });
        }
        let reserved = pattern::reserve(width, height);
        for (key, at) in [("ENTRY", entry), ("EXIT", exit)] {
            if at.x >= width || at.y >= height {
                return Err(ConfigError::OutOfBounds { key, at });
            }
            if reserved.contains(at) {
                return Err(ConfigError::Reserved { key, at });
            }
        }
        if entry == exit {
            return Err(ConfigError::SameEntryExit(entry));
        }
        Ok(MazeConfig {
            width,
            height,
            entry,
            exit,
            output_file,
            perfect,
            seed,
        })
    }

    /// Parse and validate configuration text
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let settings = parse_settings(text)?;

        let width = parse_value(&settings, "WIDTH")?;
        let height = parse_value(&settings, "HEIGHT")?;
        let entry = parse_value(&settings, "ENTRY")?;
        let exit = parse_value(&settings, "EXIT")?;
        let output_file = settings
            .get("OUTPUT_FILE")
            .map_or(DEFAULT_OUTPUT_FILE, |s| s.as_str());
        let perfect = match settings.get("PERFECT").map(|s| s.to_lowercase()) {
            None => true,
            Some(s) if s == "true" => true,
            Some(s) if s == "false" => false,
            Some(value) => {
                return Err(ConfigError::InvalidValue {
                    key: "PERFECT",
                    value,
                })
            }
        };
        let seed = settings
            .contains_key("SEED")
            .then(|| parse_value(&settings, "SEED"))
            .transpose()?;

        Self::new(
            width,
            height,
            entry,
            exit,
            PathBuf::from(output_file),
            perfect,
            seed,
        )
    }

    /// Read and validate a configuration file
    pub fn load(file: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = file.as_ref();
        let text = fs::read_to_string(file)
            .with_context(|| format!("Configuration file not found at '{}'", file.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid configuration in '{}'", file.display()))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn entry(&self) -> Point {
        self.entry
    }

    pub fn exit(&self) -> Point {
        self.exit
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Carried along for completeness, the generator always builds perfect mazes
    pub fn perfect(&self) -> bool {
        self.perfect
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Split lines into trimmed key/value pairs, skipping blanks and `#` comments
fn parse_settings(text: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut settings = HashMap::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidLine(n + 1, line.to_string()))?;
        let key = key.trim();
        if !KEYS.contains(&key) {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }
        settings.insert(key.to_string(), value.trim().to_string());
    }
    Ok(settings)
}

fn parse_value<T: std::str::FromStr>(
    settings: &HashMap<String, String>,
    key: &'static str,
) -> Result<T, ConfigError> {
    let value = settings.get(key).ok_or(ConfigError::MissingKey(key))?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.clone(),
    })
}
