//! Letter placement and solution detection.
//!
//! A [`Puzzle`] fills every face of a fresh cube with letters of the goal
//! word such that no two neighbors already form part of the word, then keeps
//! the set of complete word occurrences up to date as slices are turned.
//!
//! Key rules:
//! - a cell at `(row, col)` may only hold letter positions `row`, `N-1-row`,
//!   `col` or `N-1-col` (the positions a straight line through it could need)
//! - two neighbors *link* when they are consecutive letters of the word along
//!   a line that could spell it forward or backward
//! - duplicate letters are matched through their aliases, one level deep

use rand::Rng;
use rustc_hash::FxHashMap;
use tracing::{debug, info, trace};

use crate::cube::Cube;
use crate::cubit::FaceId;
use crate::error::PuzzleError;
use crate::geometry::Axis;
use crate::shuffle::{shuffle, shuffled};
use crate::slice::SliceId;
use crate::surface::{CubeSurface, Neighbor};

/// How many times each letter position may be used while the bias cap applies.
const BIAS_CAP_PER_POSITION: usize = 3;

/// The bias cap applies until `N * BIAS_CAP_ROUNDS` letters have been placed.
const BIAS_CAP_ROUNDS: usize = 3;

/// Whether a solution runs along a row or a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Row(usize),
    Column(usize),
}

/// The direction a solution reads in, relative to increasing index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reading {
    Forward,
    Backward,
}

/// A full row or column spelling the goal word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleSolution {
    axis: Axis,
    line: Line,
    reading: Reading,
    faces: Vec<FaceId>,
}

impl PuzzleSolution {
    /// The side of the cube the solution was found on.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn line(&self) -> Line {
        self.line
    }

    pub fn reading(&self) -> Reading {
        self.reading
    }

    /// The faces in word order: their letters spell the goal word.
    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }
}

/// Emitted when a rescan changes the total number of solutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolutionCountChanged {
    pub delta: i64,
    pub total: usize,
}

/// Receives solution count changes.
pub trait SolutionObserver {
    fn on_event(&mut self, change: SolutionCountChanged);
}

/// The goal word and the live set of its occurrences on a cube.
#[derive(Debug, Clone)]
pub struct Puzzle {
    word: String,
    goal: Vec<char>,
    duplicates: Vec<Vec<usize>>,
    solutions: [Vec<PuzzleSolution>; 6],
    pending: Vec<SolutionCountChanged>,
}

impl Puzzle {
    /// Creates a puzzle for `word` and fills the cube's faces with its letters.
    ///
    /// `density` is the target fraction of lettered cells per face.
    pub fn new<R: Rng>(
        cube: &mut Cube,
        word: &str,
        density: f32,
        rng: &mut R,
    ) -> Result<Self, PuzzleError> {
        let puzzle = Self::blank(cube, word)?;
        if cube.is_rotating() {
            return Err(PuzzleError::CubeMidRotation);
        }
        puzzle.generate(cube, density, rng);
        info!(word = %puzzle.word, size = cube.size(), density, "generated puzzle");
        Ok(puzzle)
    }

    /// Creates a puzzle for `word` without touching the cube's letters.
    pub fn blank(cube: &Cube, word: &str) -> Result<Self, PuzzleError> {
        let word = word.trim().to_lowercase();
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PuzzleError::InvalidWord(word));
        }
        let goal: Vec<char> = word.chars().collect();
        if goal.len() != cube.size() {
            return Err(PuzzleError::WordLength {
                expected: cube.size(),
                actual: goal.len(),
            });
        }

        let mut positions: FxHashMap<char, Vec<usize>> = FxHashMap::default();
        for (index, &letter) in goal.iter().enumerate() {
            positions.entry(letter).or_default().push(index);
        }
        let duplicates = goal
            .iter()
            .enumerate()
            .map(|(index, letter)| {
                positions[letter]
                    .iter()
                    .copied()
                    .filter(|&other| other != index)
                    .collect()
            })
            .collect();

        Ok(Self {
            word,
            goal,
            duplicates,
            solutions: Default::default(),
            pending: Vec::new(),
        })
    }

    /// The goal word, lowercase.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Other positions of the goal word holding the same letter as `index`.
    pub fn duplicates(&self, index: usize) -> &[usize] {
        self.duplicates.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Solutions currently recorded on one side.
    ///
    /// A turn of an outer layer also spins the side of its own axis-pair,
    /// which is not rescanned. Until a later turn rescans that side, its
    /// solutions keep the line, reading and link flags of the old layout;
    /// only the count is guaranteed current.
    pub fn face_solutions(&self, axis: Axis) -> &[PuzzleSolution] {
        &self.solutions[axis.index()]
    }

    /// All recorded solutions.
    pub fn solutions(&self) -> impl Iterator<Item = &PuzzleSolution> + '_ {
        self.solutions.iter().flatten()
    }

    pub fn solution_count(&self) -> usize {
        self.solutions.iter().map(Vec::len).sum()
    }

    /// Letter positions a straight line through `(row, col)` could need.
    fn placements_at(&self, row: usize, col: usize) -> [usize; 4] {
        let last = self.goal.len() - 1;
        [row, last - row, col, last - col]
    }

    fn generate<R: Rng>(&self, cube: &mut Cube, density: f32, rng: &mut R) {
        let size = self.goal.len();
        let ideal_blanks = ((1.0 - density.clamp(0.0, 1.0)) * (size * size) as f32).floor() as usize;

        let mut cells: Vec<usize> = (0..size * size).collect();
        // TODO: replace the bias cap with a check that every solution stays reachable
        let mut counts = vec![0usize; size];
        let mut placed_total = 0;

        for surface in cube.surfaces() {
            for &face in surface.faces() {
                cube.face_mut(face).set_blank();
            }

            let mut blanks = 0;
            shuffle(&mut cells, rng);
            for &cell in &cells {
                let (row, col) = (cell / size, cell % size);
                let candidates = shuffled(&self.placements_at(row, col), rng);
                let choice = candidates.into_iter().find(|&candidate| {
                    if placed_total < size * BIAS_CAP_ROUNDS && counts[candidate] >= BIAS_CAP_PER_POSITION {
                        return false;
                    }
                    !Neighbor::ALL
                        .into_iter()
                        .any(|direction| self.has_link(cube, &surface, direction, row, col, candidate, true))
                });

                let face = cube.face_mut(surface[(row, col)]);
                match choice {
                    Some(index) => {
                        face.set_letter(self.goal[index], index);
                        counts[index] += 1;
                        placed_total += 1;
                    }
                    None => {
                        trace!(axis = ?surface.axis(), row, col, "no free letter, leaving blank");
                        face.set_blank();
                        blanks += 1;
                    }
                }
            }

            let mut lettered: Vec<FaceId> = surface
                .faces()
                .iter()
                .copied()
                .filter(|&face| !cube.face(face).is_blank())
                .collect();
            shuffle(&mut lettered, rng);
            for face in lettered.into_iter().take(ideal_blanks.saturating_sub(blanks)) {
                cube.face_mut(face).set_blank();
            }
        }
    }

    /// Whether letter position `letter_index` at `(row, col)` links to its
    /// neighbor in `direction`.
    ///
    /// With `search_aliases`, the other positions holding the same letter are
    /// tried too.
    #[allow(clippy::too_many_arguments)]
    pub fn has_link(
        &self,
        cube: &Cube,
        surface: &CubeSurface,
        direction: Neighbor,
        row: usize,
        col: usize,
        letter_index: usize,
        search_aliases: bool,
    ) -> bool {
        if letter_index >= self.goal.len() {
            return false;
        }
        if self.direct_link(cube, surface, direction, row, col, letter_index) {
            return true;
        }
        search_aliases
            && self.duplicates[letter_index]
                .iter()
                .any(|&alias| self.direct_link(cube, surface, direction, row, col, alias))
    }

    fn direct_link(
        &self,
        cube: &Cube,
        surface: &CubeSurface,
        direction: Neighbor,
        row: usize,
        col: usize,
        letter_index: usize,
    ) -> bool {
        let Some(neighbor) = surface.neighbor(row, col, direction) else {
            return false;
        };
        let Some(letter) = cube.face(neighbor).letter() else {
            return false;
        };

        let last = self.goal.len() as i32 - 1;
        let position = (if direction.is_vertical() { row } else { col }) as i32;
        let index = letter_index as i32;
        let step = direction.step();

        let forward = index == position && self.goal_at(index + step) == Some(letter);
        let reverse = index == last - position && self.goal_at(index - step) == Some(letter);
        forward || reverse
    }

    fn goal_at(&self, index: i32) -> Option<char> {
        usize::try_from(index).ok().and_then(|i| self.goal.get(i).copied())
    }

    /// Rescans the sides affected by a committed turn of `slice`.
    ///
    /// Only the four sides orthogonal to the slice's axis-pair are rescanned;
    /// the two sides of the pair itself keep their solutions.
    pub fn on_slice_updated(&mut self, cube: &mut Cube, slice: SliceId) -> Result<(), PuzzleError> {
        if cube.is_rotating() {
            return Err(PuzzleError::CubeMidRotation);
        }

        let previous = self.solution_count();
        for axis in slice.pair.orthogonal() {
            let surface = cube.surface(axis);
            self.update_links(cube, &surface);
            self.solutions[axis.index()] = self.resolve(cube, &surface);
        }

        let total = self.solution_count();
        debug!(slice = %slice, previous, total, "rescanned surfaces");
        if total != previous {
            self.pending.push(SolutionCountChanged {
                delta: total as i64 - previous as i64,
                total,
            });
        }
        Ok(())
    }

    fn update_links(&self, cube: &mut Cube, surface: &CubeSurface) {
        let size = surface.size();
        let mut links = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                let face = surface[(row, col)];
                let Some(index) = cube.face(face).letter_index() else {
                    continue;
                };
                let linked = Neighbor::ALL
                    .into_iter()
                    .any(|direction| self.has_link(cube, surface, direction, row, col, index, true));
                links.push((face, linked));
            }
        }
        for (face, linked) in links {
            cube.face_mut(face).set_linked(linked);
        }
    }

    fn resolve(&self, cube: &Cube, surface: &CubeSurface) -> Vec<PuzzleSolution> {
        let size = surface.size();
        let mut found = Vec::new();
        for index in 0..size {
            self.match_line(cube, surface.axis(), Line::Row(index), surface.row(index), &mut found);
        }
        for index in 0..size {
            self.match_line(cube, surface.axis(), Line::Column(index), &surface.column(index), &mut found);
        }
        found
    }

    /// Records a forward and/or backward match of the goal word along `faces`.
    fn match_line(
        &self,
        cube: &Cube,
        axis: Axis,
        line: Line,
        faces: &[FaceId],
        found: &mut Vec<PuzzleSolution>,
    ) {
        let letters: Vec<Option<char>> = faces.iter().map(|&face| cube.face(face).letter()).collect();
        let forward = letters.iter().zip(&self.goal).all(|(letter, goal)| *letter == Some(*goal));
        let backward = letters
            .iter()
            .rev()
            .zip(&self.goal)
            .all(|(letter, goal)| *letter == Some(*goal));

        if forward {
            found.push(PuzzleSolution {
                axis,
                line,
                reading: Reading::Forward,
                faces: faces.to_vec(),
            });
        }
        // a palindrome matches both ways and counts twice; with a one-letter
        // word every line is a palindrome, so each side holds 2 * 2 solutions
        if backward {
            found.push(PuzzleSolution {
                axis,
                line,
                reading: Reading::Backward,
                faces: faces.iter().rev().copied().collect(),
            });
        }
    }

    /// Returns and clears pending count changes.
    pub fn drain_events(&mut self) -> Vec<SolutionCountChanged> {
        std::mem::take(&mut self.pending)
    }

    /// Delivers pending count changes to `observer`.
    pub fn dispatch<O: SolutionObserver + ?Sized>(&mut self, observer: &mut O) {
        for change in self.drain_events() {
            observer.on_event(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::geometry::AxisPair;

    /// Writes `letters` along one row of a side, using each letter's first
    /// position in `word`. `.` leaves a blank.
    fn write_row(cube: &mut Cube, axis: Axis, row: usize, word: &str, letters: &str) {
        let surface = cube.surface(axis);
        for (col, letter) in letters.chars().enumerate() {
            let face = cube.face_mut(surface[(row, col)]);
            match word.find(letter) {
                Some(index) => face.set_letter(letter, index),
                None => face.set_blank(),
            }
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<SolutionCountChanged>);

    impl SolutionObserver for Recorder {
        fn on_event(&mut self, change: SolutionCountChanged) {
            self.0.push(change);
        }
    }

    #[test]
    fn test_duplicate_table() {
        let cube = Cube::new(4).unwrap();
        let puzzle = Puzzle::blank(&cube, "anna").unwrap();
        assert_eq!(puzzle.duplicates(0), &[3]);
        assert_eq!(puzzle.duplicates(1), &[2]);
        assert_eq!(puzzle.duplicates(2), &[1]);
        assert!(Puzzle::blank(&cube, "word").unwrap().duplicates(2).is_empty());
    }

    #[test]
    fn test_word_validation() {
        let cube = Cube::new(3).unwrap();
        assert_eq!(
            Puzzle::blank(&cube, "c4t").unwrap_err(),
            PuzzleError::InvalidWord("c4t".to_string())
        );
        assert_eq!(
            Puzzle::blank(&cube, "word").unwrap_err(),
            PuzzleError::WordLength { expected: 3, actual: 4 }
        );
        assert_eq!(Puzzle::blank(&cube, "CAT").unwrap().word(), "cat");
    }

    #[test]
    fn test_has_link_cat() {
        let mut cube = Cube::new(3).unwrap();
        let puzzle = Puzzle::blank(&cube, "cat").unwrap();
        let surface = cube.surface(Axis::Forward);
        cube.face_mut(surface[(1, 1)]).set_letter('a', 1);

        cube.face_mut(surface[(0, 1)]).set_letter('t', 2);
        assert!(puzzle.has_link(&cube, &surface, Neighbor::Below, 1, 1, 1, true));

        cube.face_mut(surface[(0, 1)]).set_letter('a', 1);
        for direction in Neighbor::ALL {
            assert!(!puzzle.has_link(&cube, &surface, direction, 1, 1, 1, true));
        }
    }

    #[test]
    fn test_has_link_through_alias() {
        let mut cube = Cube::new(4).unwrap();
        let puzzle = Puzzle::blank(&cube, "moon").unwrap();
        let surface = cube.surface(Axis::Back);
        cube.face_mut(surface[(1, 0)]).set_letter('o', 2);
        cube.face_mut(surface[(0, 0)]).set_letter('m', 0);

        // position 2 needs 'n' below; its alias, position 1, needs 'm'
        assert!(!puzzle.has_link(&cube, &surface, Neighbor::Below, 1, 0, 2, false));
        assert!(puzzle.has_link(&cube, &surface, Neighbor::Below, 1, 0, 2, true));
    }

    #[test]
    fn test_detects_cat_only_on_full_lines() {
        let mut cube = Cube::new(3).unwrap();
        let mut puzzle = Puzzle::blank(&cube, "cat").unwrap();
        write_row(&mut cube, Axis::Forward, 0, "cat", "cat");
        write_row(&mut cube, Axis::Forward, 1, "cat", "ca.");
        write_row(&mut cube, Axis::Forward, 2, "cat", "tac");

        puzzle.on_slice_updated(&mut cube, SliceId::new(AxisPair::Row, 0)).unwrap();

        let found = puzzle.face_solutions(Axis::Forward);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line(), Line::Row(0));
        assert_eq!(found[0].reading(), Reading::Forward);
        assert_eq!(found[1].line(), Line::Row(2));
        assert_eq!(found[1].reading(), Reading::Backward);
        let spelled: String = found[1]
            .faces()
            .iter()
            .filter_map(|&face| cube.face(face).letter())
            .collect();
        assert_eq!(spelled, "cat");
    }

    #[test]
    fn test_palindrome_counts_twice() {
        let mut cube = Cube::new(4).unwrap();
        let mut puzzle = Puzzle::blank(&cube, "anna").unwrap();
        write_row(&mut cube, Axis::Right, 3, "anna", "anna");

        puzzle.on_slice_updated(&mut cube, SliceId::new(AxisPair::Depth, 0)).unwrap();

        assert_eq!(puzzle.face_solutions(Axis::Right).len(), 2);
        assert_eq!(
            puzzle.drain_events(),
            vec![SolutionCountChanged { delta: 2, total: 2 }]
        );
    }

    #[test]
    fn test_moved_pair_keeps_its_solutions() {
        let mut cube = Cube::new(3).unwrap();
        let mut puzzle = Puzzle::blank(&cube, "cat").unwrap();
        write_row(&mut cube, Axis::Up, 1, "cat", "cat");

        // col turns rescan Forward, Back, Up and Down
        puzzle.on_slice_updated(&mut cube, SliceId::new(AxisPair::Col, 0)).unwrap();
        let before = puzzle.face_solutions(Axis::Up).to_vec();
        assert_eq!(before.len(), 1);

        write_row(&mut cube, Axis::Up, 1, "cat", "...");
        // row turns leave Up and Down alone
        puzzle.on_slice_updated(&mut cube, SliceId::new(AxisPair::Row, 1)).unwrap();
        assert_eq!(puzzle.face_solutions(Axis::Up), before.as_slice());
    }

    #[test]
    fn test_links_are_flagged_on_rescan() {
        let mut cube = Cube::new(3).unwrap();
        let mut puzzle = Puzzle::blank(&cube, "cat").unwrap();
        write_row(&mut cube, Axis::Left, 0, "cat", "ca.");
        puzzle.on_slice_updated(&mut cube, SliceId::new(AxisPair::Depth, 2)).unwrap();

        let surface = cube.surface(Axis::Left);
        assert!(cube.face(surface[(0, 0)]).is_linked());
        assert!(cube.face(surface[(0, 1)]).is_linked());
        assert!(!cube.face(surface[(0, 2)]).is_linked());
        assert_eq!(puzzle.solution_count(), 0);
        assert!(puzzle.drain_events().is_empty());
    }

    #[test]
    fn test_dispatch_reports_deltas() {
        let mut cube = Cube::new(3).unwrap();
        let mut puzzle = Puzzle::blank(&cube, "cat").unwrap();
        let mut recorder = Recorder::default();

        write_row(&mut cube, Axis::Down, 0, "cat", "cat");
        puzzle.on_slice_updated(&mut cube, SliceId::new(AxisPair::Col, 1)).unwrap();
        write_row(&mut cube, Axis::Down, 0, "cat", "c.t");
        puzzle.on_slice_updated(&mut cube, SliceId::new(AxisPair::Depth, 1)).unwrap();
        puzzle.dispatch(&mut recorder);

        assert_eq!(
            recorder.0,
            vec![
                SolutionCountChanged { delta: 1, total: 1 },
                SolutionCountChanged { delta: -1, total: 0 },
            ]
        );
    }

    #[test]
    fn test_rescan_refuses_mid_turn() {
        let mut cube = Cube::new(3).unwrap();
        let mut puzzle = Puzzle::blank(&cube, "cat").unwrap();
        let slice = SliceId::new(AxisPair::Row, 0);
        cube.begin_turn(slice).unwrap();
        assert_eq!(
            puzzle.on_slice_updated(&mut cube, slice).unwrap_err(),
            PuzzleError::CubeMidRotation
        );
    }

    #[test]
    fn test_generated_letters_respect_placement_rules() {
        for (word, seed) in [("cat", 1), ("word", 2), ("level", 3), ("moon", 4)] {
            let mut cube = Cube::new(word.len()).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let density = 0.75;
            let puzzle = Puzzle::new(&mut cube, word, density, &mut rng).unwrap();
            let size = word.len();
            let ideal_blanks = ((1.0 - density) * (size * size) as f32).floor() as usize;

            for surface in cube.surfaces() {
                let mut blanks = 0;
                for row in 0..size {
                    for col in 0..size {
                        let face = cube.face(surface[(row, col)]);
                        let Some(index) = face.letter_index() else {
                            blanks += 1;
                            continue;
                        };
                        assert_eq!(face.letter(), word.chars().nth(index));
                        assert!(puzzle.placements_at(row, col).contains(&index));
                        for direction in Neighbor::ALL {
                            assert!(
                                !puzzle.has_link(&cube, &surface, direction, row, col, index, true),
                                "{word}: stray link at {:?} ({row}, {col})",
                                surface.axis()
                            );
                        }
                    }
                }
                assert!(blanks >= ideal_blanks, "{word}: {blanks} blanks on {:?}", surface.axis());
            }
        }
    }

    #[test]
    fn test_bias_cap_limits_early_placements() {
        // Up is filled first and, at full density, takes exactly the first
        // 3 * N placements, all of them under the cap
        for seed in 0..24 {
            let mut cube = Cube::new(3).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            Puzzle::new(&mut cube, "cat", 1.0, &mut rng).unwrap();

            let up = cube.surface(Axis::Up);
            let mut counts = [0usize; 3];
            for &face in up.faces() {
                if let Some(index) = cube.face(face).letter_index() {
                    counts[index] += 1;
                }
            }
            assert!(
                counts.iter().all(|&count| count <= BIAS_CAP_PER_POSITION),
                "seed {seed}: {counts:?}"
            );
        }
    }

    #[test]
    fn test_one_letter_cube_counts_every_line_twice() {
        let mut cube = Cube::new(1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut puzzle = Puzzle::new(&mut cube, "a", 1.0, &mut rng).unwrap();
        puzzle.on_slice_updated(&mut cube, SliceId::new(AxisPair::Row, 0)).unwrap();
        // four rescanned sides, one row and one column each, both readings
        assert_eq!(puzzle.solution_count(), 16);
    }

    #[test]
    fn test_generated_cube_starts_without_solutions() {
        let mut cube = Cube::new(4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut puzzle = Puzzle::new(&mut cube, "word", 1.0, &mut rng).unwrap();
        puzzle.on_slice_updated(&mut cube, SliceId::new(AxisPair::Depth, 0)).unwrap();
        puzzle.on_slice_updated(&mut cube, SliceId::new(AxisPair::Col, 0)).unwrap();
        assert_eq!(puzzle.solution_count(), 0);
    }

    #[test]
    fn test_same_seed_same_letters() {
        let letters = |seed| {
            let mut cube = Cube::new(4).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            Puzzle::new(&mut cube, "word", 0.8, &mut rng).unwrap();
            cube.faces().iter().map(|face| face.letter()).collect::<Vec<_>>()
        };
        assert_eq!(letters(5), letters(5));
    }
}
