//! One round of play: a cube, its puzzle, and the score around them.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::config::{Difficulty, GameParameters};
use crate::cube::{Cube, CubeEvent};
use crate::error::SessionError;
use crate::puzzle::{Puzzle, PuzzleSolution, SolutionCountChanged, SolutionObserver};
use crate::slice::{SliceId, TurnOutcome};
use crate::words::{WordInfo, WordSource};

/// Notifications for the front end, drained once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ComboChanged {
        delta: i64,
        combo: usize,
    },
    PuzzleSolved {
        elapsed: Duration,
        moves: usize,
        /// Solutions beyond the goal held when the round ended.
        bonus: usize,
    },
}

#[derive(Debug, Clone)]
pub struct GameSession {
    cube: Cube,
    puzzle: Puzzle,
    word: WordInfo,
    combo_goal: usize,
    combo: usize,
    moves: usize,
    elapsed: Duration,
    paused: bool,
    game_over: bool,
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Starts a round at `difficulty` with a word drawn from `words`.
    ///
    /// The word has the tier's configured length, which sets the cube size.
    /// The session starts paused.
    pub fn setup<R: Rng>(
        params: &GameParameters,
        difficulty: Difficulty,
        words: &dyn WordSource,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        params.validate()?;
        let word = words.random_word_of_length(difficulty, params.word_length(difficulty), rng)?;
        let mut cube = Cube::new(params.word_length(difficulty))?;
        let puzzle = Puzzle::new(&mut cube, &word.word, params.density(difficulty), rng)?;
        info!(word = %word.word, %difficulty, "session ready");
        Ok(Self::new(cube, puzzle, word, params.combo_goal(difficulty)))
    }

    pub fn new(cube: Cube, puzzle: Puzzle, word: WordInfo, combo_goal: usize) -> Self {
        Self {
            cube,
            puzzle,
            word,
            combo_goal,
            combo: 0,
            moves: 0,
            elapsed: Duration::ZERO,
            paused: true,
            game_over: false,
            events: Vec::new(),
        }
    }

    /// Turns `slice` by `degrees` in one go and applies the result.
    pub fn turn(&mut self, slice: SliceId, degrees: f32) -> Result<TurnOutcome, SessionError> {
        if self.game_over {
            return Err(SessionError::GameOver);
        }
        self.cube.set_angle(slice, degrees)?;
        let outcome = self.cube.commit_or_revert(slice)?;
        self.sync()?;
        Ok(outcome)
    }

    /// Applies committed turns queued on the cube to the puzzle and score.
    ///
    /// Callers driving the cube directly call this after each commit.
    pub fn sync(&mut self) -> Result<(), SessionError> {
        for event in self.cube.drain_events() {
            let CubeEvent::SliceUpdated { slice, quarter_turns } = event;
            self.moves += 1;
            debug!(slice = %slice, quarter_turns, moves = self.moves, "move");
            self.puzzle.on_slice_updated(&mut self.cube, slice)?;
            for change in self.puzzle.drain_events() {
                self.on_event(change);
            }
        }
        Ok(())
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn unpause(&mut self) {
        if !self.game_over {
            self.paused = false;
        }
    }

    /// Advances the play timer; it only runs while unpaused.
    pub fn advance(&mut self, dt: Duration) {
        if !self.paused && !self.game_over {
            self.elapsed += dt;
        }
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn cube(&self) -> &Cube {
        &self.cube
    }

    /// Mutable access for driving turns frame by frame; call [`sync`](Self::sync)
    /// after each commit.
    pub fn cube_mut(&mut self) -> &mut Cube {
        &mut self.cube
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn solutions(&self) -> impl Iterator<Item = &PuzzleSolution> + '_ {
        self.puzzle.solutions()
    }

    pub fn word(&self) -> &WordInfo {
        &self.word
    }

    pub fn combo(&self) -> usize {
        self.combo
    }

    pub fn combo_goal(&self) -> usize {
        self.combo_goal
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}

impl SolutionObserver for GameSession {
    fn on_event(&mut self, change: SolutionCountChanged) {
        self.combo = change.total;
        self.events.push(SessionEvent::ComboChanged {
            delta: change.delta,
            combo: self.combo,
        });

        if !self.game_over && self.combo >= self.combo_goal {
            self.game_over = true;
            self.paused = true;
            let bonus = self.combo - self.combo_goal;
            info!(
                word = %self.word.word,
                moves = self.moves,
                elapsed_ms = self.elapsed.as_millis() as u64,
                bonus,
                "puzzle solved"
            );
            self.events.push(SessionEvent::PuzzleSolved {
                elapsed: self.elapsed,
                moves: self.moves,
                bonus,
            });
        }
    }
}
