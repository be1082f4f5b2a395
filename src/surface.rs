//! Two-dimensional views over one side of the cube.
//!
//! A [`CubeSurface`] is a row-major `N x N` grid of face ids. Rows and columns
//! follow the order in which cells are visited by linear index, so:
//! - Up / Down: row = depth, col = col
//! - Right / Left: row = depth, col = row
//! - Forward / Back: row = row, col = col

use std::ops::Index;

use crate::cube::Cube;
use crate::cubit::{CubitFace, FaceId};
use crate::geometry::Axis;

/// Direction from a cell to one of its four in-plane neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighbor {
    /// `row + 1`
    Above,
    /// `row - 1`
    Below,
    /// `col - 1`
    Left,
    /// `col + 1`
    Right,
}

impl Neighbor {
    pub const ALL: [Neighbor; 4] = [
        Neighbor::Above,
        Neighbor::Below,
        Neighbor::Left,
        Neighbor::Right,
    ];

    /// `(row, col)` offset to the neighbor.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Neighbor::Above => (1, 0),
            Neighbor::Below => (-1, 0),
            Neighbor::Left => (0, -1),
            Neighbor::Right => (0, 1),
        }
    }

    /// Whether this neighbor lies along the column (changes the row).
    pub const fn is_vertical(self) -> bool {
        matches!(self, Neighbor::Above | Neighbor::Below)
    }

    /// +1 when moving toward higher indices, -1 otherwise.
    pub const fn step(self) -> i32 {
        match self {
            Neighbor::Above | Neighbor::Right => 1,
            Neighbor::Below | Neighbor::Left => -1,
        }
    }
}

/// An `N x N` view over the faces pointing along one axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeSurface {
    axis: Axis,
    size: usize,
    faces: Vec<FaceId>,
}

impl CubeSurface {
    pub(crate) fn new(axis: Axis, size: usize, faces: Vec<FaceId>) -> Self {
        debug_assert_eq!(faces.len(), size * size, "surface must be square");
        Self { axis, size, faces }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Face at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: i32, col: i32) -> Option<FaceId> {
        let size = self.size as i32;
        if (0..size).contains(&row) && (0..size).contains(&col) {
            Some(self.faces[row as usize * self.size + col as usize])
        } else {
            None
        }
    }

    /// Face next to `(row, col)` in the given direction, if it exists.
    pub fn neighbor(&self, row: usize, col: usize, direction: Neighbor) -> Option<FaceId> {
        let (dr, dc) = direction.offset();
        self.get(row as i32 + dr, col as i32 + dc)
    }

    /// The faces of one row, ordered by column.
    pub fn row(&self, row: usize) -> &[FaceId] {
        &self.faces[row * self.size..(row + 1) * self.size]
    }

    /// The faces of one column, ordered by row.
    pub fn column(&self, col: usize) -> Vec<FaceId> {
        (0..self.size).map(|row| self[(row, col)]).collect()
    }

    /// All faces in row-major order.
    pub fn faces(&self) -> &[FaceId] {
        &self.faces
    }
}

impl Index<(usize, usize)> for CubeSurface {
    type Output = FaceId;

    fn index(&self, (row, col): (usize, usize)) -> &FaceId {
        assert!(row < self.size && col < self.size, "({row}, {col}) outside surface");
        &self.faces[row * self.size + col]
    }
}

/// Display character for a face: `.` when blank, uppercase when linked.
fn face_char(face: &CubitFace) -> char {
    match face.letter() {
        None => '.',
        Some(letter) if face.is_linked() => letter.to_ascii_uppercase(),
        Some(letter) => letter,
    }
}

/// Formats one surface, top row (highest index) first.
pub fn format_surface(cube: &Cube, surface: &CubeSurface) -> String {
    let mut output = String::new();
    for row in (0..surface.size()).rev() {
        for &face in surface.row(row) {
            output.push(face_char(cube.face(face)));
        }
        output.push('\n');
    }
    output
}

/// Formats all six surfaces side by side with a header line.
///
/// Blank faces show as `.`; linked letters are uppercase.
pub fn format_cube(cube: &Cube) -> String {
    let surfaces = cube.surfaces();
    let size = cube.size();
    let width = size.max("Forward".len());

    let mut header = String::new();
    for (i, surface) in surfaces.iter().enumerate() {
        if i > 0 {
            header.push_str("  ");
        }
        let name = format!("{:?}", surface.axis());
        header.push_str(&format!("{name:<width$}"));
    }

    let mut output = String::new();
    output.push_str(header.trim_end());
    output.push('\n');

    for row in (0..size).rev() {
        let mut line = String::new();
        for (i, surface) in surfaces.iter().enumerate() {
            if i > 0 {
                line.push_str("  ");
            }
            let cells: String = surface
                .row(row)
                .iter()
                .map(|&face| face_char(cube.face(face)))
                .collect();
            line.push_str(&format!("{cells:<width$}"));
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}
