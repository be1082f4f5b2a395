//! Word Cube Library
//!
//! Provides the model for a 3D word puzzle played on a twisty cube whose
//! faces carry letters: the indexed cube with slice turns, letter placement
//! for a goal word, and detection of the word along rows and columns.

pub mod config;
pub mod cube;
pub mod cubit;
pub mod error;
pub mod geometry;
pub mod puzzle;
pub mod session;
pub mod shuffle;
pub mod slice;
pub mod surface;
pub mod words;

pub use config::{Difficulty, GameParameters};
pub use cube::{Cube, CubeEvent};
pub use error::{ConfigError, CubeError, PuzzleError, SessionError, WordError};
pub use geometry::{Axis, AxisPair};
pub use puzzle::{Puzzle, PuzzleSolution, SolutionCountChanged, SolutionObserver};
pub use session::{GameSession, SessionEvent};
pub use slice::{SliceId, TurnOutcome};
pub use words::{WordBank, WordInfo, WordSource};
