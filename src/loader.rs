//! Board construction at startup: the board-file grammar and random
//! generation.
//!
//! ```text
//! FILE    ::= HEADER LINE+
//! HEADER  ::= INT SP INT NEWLINE        ; width, then height
//! LINE    ::= (VAL SP)* VAL NEWLINE     ; exactly width values
//! VAL     ::= "0" | "1"
//! NEWLINE ::= "\n" | "\r\n"
//! ```

use std::fmt;
use std::io;
use std::path::Path;

use rand::Rng;

use crate::board::Board;
use crate::config::MINE_PROBABILITY;

/// Errors raised while loading a board file. All of them are fatal at
/// startup.
#[derive(Debug)]
pub enum LoadError {
    /// Underlying I/O failure reading the file.
    Io(io::Error),
    /// The file is empty.
    MissingHeader,
    /// The first line is not two positive integers separated by a space.
    BadHeader(String),
    /// Fewer data lines than the header's height.
    MissingRows { expected: usize, found: usize },
    /// Content found after the last expected data line.
    TrailingData(String),
    /// A data line contains something other than space-separated 0/1.
    BadValue { row: usize, line: String },
    /// A data line has the wrong number of values.
    WrongWidth { row: usize, expected: usize, found: usize },
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "cannot read board file: {}", e),
            LoadError::MissingHeader => write!(f, "board file is empty"),
            LoadError::BadHeader(line) => {
                write!(f, "expected 'WIDTH HEIGHT' header, got '{}'", line)
            }
            LoadError::MissingRows { expected, found } => {
                write!(f, "expected {} board rows, found {}", expected, found)
            }
            LoadError::TrailingData(line) => {
                write!(f, "unexpected content after last board row: '{}'", line)
            }
            LoadError::BadValue { row, line } => {
                write!(f, "board row {} is not space-separated 0/1: '{}'", row, line)
            }
            LoadError::WrongWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "board row {} has {} values, expected {}",
                row, found, expected
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Parse a board file's contents. Every cell starts untouched.
pub fn parse_board(text: &str) -> Result<Board, LoadError> {
    let mut lines = text.lines();
    let header = lines.next().ok_or(LoadError::MissingHeader)?;
    let (width, height) = parse_header(header)?;

    let mut mines = Vec::with_capacity(height);
    for _ in 0..height {
        let line = lines.next().ok_or(LoadError::MissingRows {
            expected: height,
            found: mines.len(),
        })?;
        let row = parse_row(line, mines.len(), width)?;
        mines.push(row);
    }
    if let Some(extra) = lines.next() {
        return Err(LoadError::TrailingData(extra.to_string()));
    }
    Ok(Board::new(mines))
}

/// Read and parse a board file from disk.
pub fn load_file(path: &Path) -> Result<Board, LoadError> {
    let text = std::fs::read_to_string(path)?;
    parse_board(&text)
}

/// Generate a `width` x `height` board where each cell independently
/// holds a mine with probability [`MINE_PROBABILITY`].
pub fn random_board<R: Rng>(rng: &mut R, width: usize, height: usize) -> Board {
    let mines = (0..height)
        .map(|_| (0..width).map(|_| rng.random_bool(MINE_PROBABILITY)).collect())
        .collect();
    Board::new(mines)
}

fn parse_header(line: &str) -> Result<(usize, usize), LoadError> {
    let bad = || LoadError::BadHeader(line.to_string());
    let (width, height) = line.split_once(' ').ok_or_else(bad)?;
    let width = parse_dimension(width).ok_or_else(bad)?;
    let height = parse_dimension(height).ok_or_else(bad)?;
    Ok((width, height))
}

/// `[0-9]+`, and at least 1: a board has no zero-sized axis.
fn parse_dimension(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok().filter(|&n| n > 0)
}

fn parse_row(line: &str, row: usize, width: usize) -> Result<Vec<bool>, LoadError> {
    let mut values = Vec::with_capacity(width);
    for token in line.split(' ') {
        match token {
            "0" => values.push(false),
            "1" => values.push(true),
            _ => {
                return Err(LoadError::BadValue {
                    row,
                    line: line.to_string(),
                })
            }
        }
    }
    if values.len() != width {
        return Err(LoadError::WrongWidth {
            row,
            expected: width,
            found: values.len(),
        });
    }
    Ok(values)
}
