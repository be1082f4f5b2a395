//! Axes, index conversion and quarter-turn rotations.
//!
//! Grid coordinates are `(col, row, depth)`, i.e. `(x, y, z)`:
//! - `x` grows to the Right
//! - `y` grows Up
//! - `z` grows Forward
//!
//! Rotations are applied to *doubled centered* coordinates (`2 * c - (N - 1)`)
//! so that both odd and even cube sizes rotate about an integer center.

/// A 3D coordinate: `(col, row, depth)`.
pub type Coord = (i32, i32, i32);

/// One of the six outward directions of the cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    Forward,
    Back,
    Right,
    Left,
    Up,
    Down,
}

/// A pair of opposing axes. Both directions of a pair share the same slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AxisPair {
    /// Forward / Back, layers ordered by depth.
    Depth,
    /// Right / Left, layers ordered by column.
    Col,
    /// Up / Down, layers ordered by row.
    Row,
}

impl Axis {
    pub const ALL: [Axis; 6] = [
        Axis::Forward,
        Axis::Back,
        Axis::Right,
        Axis::Left,
        Axis::Up,
        Axis::Down,
    ];

    /// Array index of this direction (0..6).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The axis-pair this direction belongs to.
    pub const fn pair(self) -> AxisPair {
        match self {
            Axis::Forward | Axis::Back => AxisPair::Depth,
            Axis::Right | Axis::Left => AxisPair::Col,
            Axis::Up | Axis::Down => AxisPair::Row,
        }
    }

    pub const fn opposite(self) -> Axis {
        match self {
            Axis::Forward => Axis::Back,
            Axis::Back => Axis::Forward,
            Axis::Right => Axis::Left,
            Axis::Left => Axis::Right,
            Axis::Up => Axis::Down,
            Axis::Down => Axis::Up,
        }
    }

    /// Unit direction vector.
    pub const fn vector(self) -> Coord {
        match self {
            Axis::Forward => (0, 0, 1),
            Axis::Back => (0, 0, -1),
            Axis::Right => (1, 0, 0),
            Axis::Left => (-1, 0, 0),
            Axis::Up => (0, 1, 0),
            Axis::Down => (0, -1, 0),
        }
    }

    /// Maps a unit vector back to its direction.
    pub fn from_vector(vector: Coord) -> Option<Axis> {
        Axis::ALL.into_iter().find(|axis| axis.vector() == vector)
    }

    /// The four directions perpendicular to this one.
    pub const fn orthogonal(self) -> [Axis; 4] {
        self.pair().orthogonal()
    }
}

impl AxisPair {
    pub const ALL: [AxisPair; 3] = [AxisPair::Depth, AxisPair::Col, AxisPair::Row];

    /// Array index of this pair (0..3).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The positive direction of the pair; rotation angles are measured about it.
    pub const fn positive(self) -> Axis {
        match self {
            AxisPair::Depth => Axis::Forward,
            AxisPair::Col => Axis::Right,
            AxisPair::Row => Axis::Up,
        }
    }

    /// The four directions perpendicular to this pair.
    pub const fn orthogonal(self) -> [Axis; 4] {
        match self {
            AxisPair::Col => [Axis::Forward, Axis::Back, Axis::Up, Axis::Down],
            AxisPair::Row => [Axis::Forward, Axis::Back, Axis::Right, Axis::Left],
            AxisPair::Depth => [Axis::Right, Axis::Left, Axis::Up, Axis::Down],
        }
    }

    /// The component of `coord` this pair orders its layers by.
    pub const fn layer_of(self, (col, row, depth): Coord) -> i32 {
        match self {
            AxisPair::Depth => depth,
            AxisPair::Col => col,
            AxisPair::Row => row,
        }
    }
}

/// Positive quarter turns about each axis-pair, indexed by [`AxisPair::index`].
///
/// Each entry is a proper rotation (determinant +1) that keeps the pair's own
/// component fixed, so a layer always rotates onto itself.
pub const QUARTER_TURNS: [fn(Coord) -> Coord; 3] = [
    // depth: rotate about +Z
    |(x, y, z)| (-y, x, z),
    // col: rotate about +X
    |(x, y, z)| (x, -z, y),
    // row: rotate about +Y
    |(x, y, z)| (z, y, -x),
];

/// Applies `turns` positive quarter turns about `pair`.
pub fn rotate(pair: AxisPair, turns: u8, mut coord: Coord) -> Coord {
    let quarter = QUARTER_TURNS[pair.index()];
    for _ in 0..turns % 4 {
        coord = quarter(coord);
    }
    coord
}

/// Rotates a direction `turns` quarter turns about `pair`.
pub fn rotate_axis(pair: AxisPair, turns: u8, axis: Axis) -> Axis {
    // a rotation maps unit vectors onto unit vectors
    Axis::from_vector(rotate(pair, turns, axis.vector())).unwrap_or(axis)
}

/// Rotates a grid cell of a cube of side `size` about the cube center.
pub fn rotate_cell(pair: AxisPair, turns: u8, coord: Coord, size: usize) -> Coord {
    let dim_m1 = size as i32 - 1;
    let (x, y, z) = coord;
    let doubled = (2 * x - dim_m1, 2 * y - dim_m1, 2 * z - dim_m1);
    let (rx, ry, rz) = rotate(pair, turns, doubled);
    ((rx + dim_m1) / 2, (ry + dim_m1) / 2, (rz + dim_m1) / 2)
}

/// Converts `(col, row, depth)` to a linear cell index.
///
/// Index order is col-fastest: `idx = col + row * N + depth * N * N`.
#[inline(always)]
pub const fn linearize((col, row, depth): Coord, size: usize) -> usize {
    (col as usize) + (row as usize) * size + (depth as usize) * size * size
}

/// Converts a linear cell index back to `(col, row, depth)`.
#[inline(always)]
pub const fn unlinearize(index: usize, size: usize) -> Coord {
    (
        (index % size) as i32,
        ((index / size) % size) as i32,
        (index / (size * size)) as i32,
    )
}

/// Returns `true` if `coord` lies inside `[0, size)` on every axis.
#[inline]
pub fn in_bounds((col, row, depth): Coord, size: usize) -> bool {
    let size = size as i32;
    (0..size).contains(&col) && (0..size).contains(&row) && (0..size).contains(&depth)
}

/// Returns `true` if the cell lies strictly inside the sphere inscribed in the cube.
///
/// Compares `dx² + dy² + dz² < center²` on doubled coordinates so no floating
/// point is involved.
pub fn is_interior((col, row, depth): Coord, size: usize) -> bool {
    let dim_m1 = size as i64 - 1;
    let dx = 2 * col as i64 - dim_m1;
    let dy = 2 * row as i64 - dim_m1;
    let dz = 2 * depth as i64 - dim_m1;
    dx * dx + dy * dy + dz * dz < dim_m1 * dim_m1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_share_a_pair() {
        for axis in Axis::ALL {
            assert_eq!(axis.pair(), axis.opposite().pair());
            assert_ne!(axis, axis.opposite());
        }
    }

    #[test]
    fn test_orthogonal_axes_exclude_own_pair() {
        for axis in Axis::ALL {
            let orthogonal = axis.orthogonal();
            assert!(orthogonal.iter().all(|other| other.pair() != axis.pair()));
        }
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        for pair in AxisPair::ALL {
            for axis in Axis::ALL {
                assert_eq!(rotate(pair, 4, axis.vector()), axis.vector());
                assert_eq!(rotate_axis(pair, 0, axis), axis);
            }
        }
    }

    #[test]
    fn test_quarter_turn_keeps_pair_axis_fixed() {
        for pair in AxisPair::ALL {
            let positive = pair.positive();
            assert_eq!(rotate_axis(pair, 1, positive), positive);
            assert_eq!(rotate_axis(pair, 1, positive.opposite()), positive.opposite());
        }
    }

    #[test]
    fn test_quarter_turn_about_row_moves_forward_to_right() {
        assert_eq!(rotate_axis(AxisPair::Row, 1, Axis::Forward), Axis::Right);
        assert_eq!(rotate_axis(AxisPair::Row, 1, Axis::Right), Axis::Back);
    }

    #[test]
    fn test_rotate_cell_is_a_permutation_4x4x4() {
        for pair in AxisPair::ALL {
            let mut seen = [false; 64];
            for idx in 0..64 {
                let rotated = rotate_cell(pair, 1, unlinearize(idx, 4), 4);
                assert!(in_bounds(rotated, 4), "{pair:?} moved cell {idx} out of bounds");
                let dest = linearize(rotated, 4);
                assert!(!seen[dest], "{pair:?} maps two cells to {dest}");
                seen[dest] = true;
            }
        }
    }

    #[test]
    fn test_coordinate_conversion_roundtrip_3x3x3() {
        for idx in 0..27 {
            assert_eq!(linearize(unlinearize(idx, 3), 3), idx);
        }
    }

    #[test]
    fn test_interior_cells() {
        assert!(is_interior((1, 1, 1), 3));
        assert!(!is_interior((1, 1, 0), 3));
        assert!(is_interior((1, 2, 1), 4));
        assert!(!is_interior((0, 1, 1), 4));
        assert!(!is_interior((0, 0, 0), 1));
    }
}
