//! Error types for cube construction, turns, puzzle setup and sessions.

use thiserror::Error;

use crate::geometry::Coord;
use crate::slice::SliceId;

/// Errors arising from cube construction, grid access and slice turns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CubeError {
    #[error("cube size must be at least 1, got {0}")]
    InvalidSize(usize),
    #[error("coordinate {coord:?} is outside a cube of size {size}")]
    OutOfBounds { coord: Coord, size: usize },
    #[error("no cubit at {0:?}")]
    EmptyCell(Coord),
    #[error("slice {active} is already turning")]
    TurnInProgress { active: SliceId },
    #[error("slice {0} is not turning")]
    NotTurning(SliceId),
    #[error("slice {0} does not exist")]
    UnknownSlice(SliceId),
}

/// Errors arising from puzzle construction and rescans.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("goal word {0:?} must be non-empty and alphabetic")]
    InvalidWord(String),
    #[error("goal word has {actual} letters but the cube has size {expected}")]
    WordLength { expected: usize, actual: usize },
    #[error("cannot rescan while a slice is turning")]
    CubeMidRotation,
}

/// Errors arising from the word bank.
#[derive(Debug, Error)]
pub enum WordError {
    #[error("no words available for {0} difficulty")]
    EmptyBank(String),
    #[error("no {length}-letter words available for {difficulty} difficulty")]
    NoWordOfLength { difficulty: String, length: usize },
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse word list: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors arising from loading or validating game parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read parameters: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse parameters: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid parameters: {0}")]
    Invalid(String),
}

/// Errors surfaced by a game session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Cube(#[from] CubeError),
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
    #[error(transparent)]
    Word(#[from] WordError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("the round is already over")]
    GameOver,
}
