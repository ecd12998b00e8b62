//! Puzzle input lookup

use crate::config::{Config, InputOverride};
use crate::error::{CliError, InputError};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// File-based store of puzzle inputs
///
/// Directory structure: `{base_dir}/{year}/day{day:02}.txt`
pub struct InputStore {
    base_dir: PathBuf,
}

impl InputStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the path for a specific year/day
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        self.base_dir
            .join(year.to_string())
            .join(format!("day{:02}.txt", day))
    }

    /// Check if an input file exists
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read an input file
    pub fn get(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => InputError::NotFound(path),
            _ => InputError::Read { path, source },
        })
    }
}

/// Where the executor gets its inputs from
pub enum InputSource {
    /// One file per puzzle under a directory
    Store(InputStore),
    /// A single input, read up front, served for whichever puzzle asks
    Fixed(String),
}

impl InputSource {
    /// Resolve the input source from config, reading any override now
    pub fn from_config(config: &Config) -> Result<Self, CliError> {
        match &config.input_override {
            None => Ok(Self::Store(InputStore::new(config.input_dir.clone()))),
            Some(InputOverride::Stdin) => {
                let mut input = String::new();
                io::stdin().read_to_string(&mut input)?;
                Ok(Self::Fixed(input))
            }
            Some(InputOverride::File(path)) => fs::read_to_string(path)
                .map(Self::Fixed)
                .map_err(|source| {
                    InputError::Read {
                        path: path.clone(),
                        source,
                    }
                    .into()
                }),
        }
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        match self {
            Self::Store(store) => store.contains(year, day),
            Self::Fixed(_) => true,
        }
    }

    pub fn load(&self, year: u16, day: u8) -> Result<String, InputError> {
        match self {
            Self::Store(store) => store.get(year, day),
            Self::Fixed(input) => Ok(input.clone()),
        }
    }

    /// Human-readable location of the input for `year`/`day`
    pub fn describe(&self, year: u16, day: u8) -> String {
        match self {
            Self::Store(store) => store.input_path(year, day).display().to_string(),
            Self::Fixed(_) => "<provided input>".to_string(),
        }
    }
}
