//! Grid cells and the letter faces attached to them.

use crate::geometry::{rotate_axis, Axis, AxisPair, Coord};

/// Index of a [`Cubit`] in its cube's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubitId(pub usize);

/// Index of a [`CubitFace`] in its cube's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

/// One grid cell of the cube.
///
/// Faces are keyed by the direction they *currently* point to, so a turned
/// cubit re-keys its faces instead of tracking an orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cubit {
    id: CubitId,
    coord: Coord,
    faces: [Option<FaceId>; 6],
    displaced: bool,
}

impl Cubit {
    pub(crate) fn new(id: CubitId, coord: Coord) -> Self {
        Self {
            id,
            coord,
            faces: [None; 6],
            displaced: false,
        }
    }

    pub fn id(&self) -> CubitId {
        self.id
    }

    /// Current grid coordinates `(col, row, depth)`.
    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn col(&self) -> i32 {
        self.coord.0
    }

    pub fn row(&self) -> i32 {
        self.coord.1
    }

    pub fn depth(&self) -> i32 {
        self.coord.2
    }

    /// The face pointing along `axis`, if any.
    pub fn face(&self, axis: Axis) -> Option<FaceId> {
        self.faces[axis.index()]
    }

    /// All attached faces with the direction each one points to.
    pub fn active_faces(&self) -> impl Iterator<Item = (Axis, FaceId)> + '_ {
        Axis::ALL
            .into_iter()
            .filter_map(|axis| self.faces[axis.index()].map(|face| (axis, face)))
    }

    /// Whether this cubit belongs to a slice that is mid-turn.
    pub fn is_displaced(&self) -> bool {
        self.displaced
    }

    pub(crate) fn attach_face(&mut self, axis: Axis, face: FaceId) {
        self.faces[axis.index()] = Some(face);
    }

    pub(crate) fn set_coord(&mut self, coord: Coord) {
        self.coord = coord;
    }

    pub(crate) fn set_displaced(&mut self, displaced: bool) {
        self.displaced = displaced;
    }

    /// Re-keys the faces after `turns` quarter turns about `pair`.
    pub(crate) fn rotate_faces(&mut self, pair: AxisPair, turns: u8) {
        let mut rotated = [None; 6];
        for axis in Axis::ALL {
            rotated[rotate_axis(pair, turns, axis).index()] = self.faces[axis.index()];
        }
        self.faces = rotated;
    }
}

/// Background state of a face, as the presentation layer colors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    /// No letter; drawn darkened.
    #[default]
    Blank,
    /// A letter that is not part of any link.
    Plain,
    /// A letter adjacent to a neighbor it could form the goal word with.
    Highlighted,
}

/// A letter-bearing sticker on one side of a cubit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubitFace {
    owner: CubitId,
    letter: Option<char>,
    letter_index: Option<usize>,
    linked: bool,
    background: Background,
}

impl CubitFace {
    pub(crate) fn new(owner: CubitId) -> Self {
        Self {
            owner,
            letter: None,
            letter_index: None,
            linked: false,
            background: Background::Blank,
        }
    }

    /// The cubit this face is attached to.
    pub fn owner(&self) -> CubitId {
        self.owner
    }

    /// The lowercase letter, or `None` when blank.
    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    /// Which occurrence in the goal word this letter stands for.
    pub fn letter_index(&self) -> Option<usize> {
        self.letter_index
    }

    pub fn is_blank(&self) -> bool {
        self.letter.is_none()
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn background(&self) -> Background {
        self.background
    }

    /// Sets the letter at position `index` of the goal word.
    ///
    /// Whitespace blanks the face instead.
    pub fn set_letter(&mut self, letter: char, index: usize) {
        if letter.is_whitespace() {
            self.set_blank();
            return;
        }
        self.letter = Some(letter.to_ascii_lowercase());
        self.letter_index = Some(index);
        self.linked = false;
        self.background = Background::Plain;
    }

    pub fn set_blank(&mut self) {
        self.letter = None;
        self.letter_index = None;
        self.linked = false;
        self.background = Background::Blank;
    }

    /// Updates the link flag. Blank faces never link.
    pub fn set_linked(&mut self, linked: bool) {
        if self.is_blank() {
            return;
        }
        self.linked = linked;
        self.background = if linked {
            Background::Highlighted
        } else {
            Background::Plain
        };
    }
}
