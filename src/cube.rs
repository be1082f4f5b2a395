//! The indexed cube: cells, cubits, faces and slices.
//!
//! Only the shell of the cube is populated: cells strictly inside the sphere
//! inscribed in the cube are left empty, like the hidden core of a twisty
//! puzzle. Cells are stored in a dense flat array indexed by
//! [`geometry::linearize`](crate::geometry::linearize).

use tracing::debug;

use crate::cubit::{Cubit, CubitFace, CubitId, FaceId};
use crate::error::CubeError;
use crate::geometry::{in_bounds, is_interior, linearize, rotate_cell, unlinearize, Axis, AxisPair, Coord};
use crate::slice::{Slice, SliceId, SliceState, TurnOutcome};
use crate::surface::CubeSurface;

/// Order in which [`Cube::surfaces`] returns the six sides.
pub const SURFACE_ORDER: [Axis; 6] = [
    Axis::Up,
    Axis::Down,
    Axis::Left,
    Axis::Right,
    Axis::Forward,
    Axis::Back,
];

/// Notifications queued by the cube for its owner to drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeEvent {
    /// A turn was committed and the slice's cubits were re-indexed.
    SliceUpdated { slice: SliceId, quarter_turns: u8 },
}

/// A cube of side `size` made of cubits with letter faces.
#[derive(Debug, Clone)]
pub struct Cube {
    size: usize,
    cells: Vec<Option<CubitId>>,
    cubits: Vec<Cubit>,
    faces: Vec<CubitFace>,
    slices: [Vec<Slice>; 3],
    active: Option<SliceId>,
    events: Vec<CubeEvent>,
}

impl Cube {
    /// Builds the shell of a cube of side `size` with faces and slices.
    pub fn new(size: usize) -> Result<Self, CubeError> {
        if size < 1 {
            return Err(CubeError::InvalidSize(size));
        }

        let cell_count = size * size * size;
        let mut cells = vec![None; cell_count];
        let mut cubits = Vec::new();
        let mut faces = Vec::new();

        for (index, cell) in cells.iter_mut().enumerate() {
            let coord = unlinearize(index, size);
            if is_interior(coord, size) {
                continue;
            }
            let id = CubitId(cubits.len());
            let mut cubit = Cubit::new(id, coord);
            for axis in boundary_sides(coord, size) {
                cubit.attach_face(axis, FaceId(faces.len()));
                faces.push(CubitFace::new(id));
            }
            cubits.push(cubit);
            *cell = Some(id);
        }

        let slices = AxisPair::ALL.map(|pair| {
            (0..size)
                .map(|order| {
                    let members = (0..cell_count)
                        .filter(|&index| cells[index].is_some())
                        .filter(|&index| pair.layer_of(unlinearize(index, size)) == order as i32)
                        .collect();
                    Slice::new(SliceId::new(pair, order), members)
                })
                .collect()
        });

        debug!(size, cubits = cubits.len(), faces = faces.len(), "built cube");

        Ok(Self {
            size,
            cells,
            cubits,
            faces,
            slices,
            active: None,
            events: Vec::new(),
        })
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Bounds-checked lookup; `None` for out-of-range or empty cells.
    pub fn get(&self, col: i32, row: i32, depth: i32) -> Option<&Cubit> {
        self.cubit_at((col, row, depth)).ok()
    }

    /// Like [`Cube::get`], but says why a lookup failed.
    pub fn cubit_at(&self, coord: Coord) -> Result<&Cubit, CubeError> {
        if !in_bounds(coord, self.size) {
            return Err(CubeError::OutOfBounds {
                coord,
                size: self.size,
            });
        }
        match self.cells[linearize(coord, self.size)] {
            Some(id) => Ok(&self.cubits[id.0]),
            None => Err(CubeError::EmptyCell(coord)),
        }
    }

    pub fn cubit(&self, id: CubitId) -> &Cubit {
        &self.cubits[id.0]
    }

    /// All cubits, in arena order.
    pub fn cubits(&self) -> &[Cubit] {
        &self.cubits
    }

    pub fn face(&self, id: FaceId) -> &CubitFace {
        &self.faces[id.0]
    }

    pub fn face_mut(&mut self, id: FaceId) -> &mut CubitFace {
        &mut self.faces[id.0]
    }

    /// All faces, in arena order.
    pub fn faces(&self) -> &[CubitFace] {
        &self.faces
    }

    /// The cell grid as a flat array of cubit ids.
    pub fn cells(&self) -> &[Option<CubitId>] {
        &self.cells
    }

    pub fn slice(&self, id: SliceId) -> Result<&Slice, CubeError> {
        self.slices[id.pair.index()]
            .get(id.order)
            .ok_or(CubeError::UnknownSlice(id))
    }

    fn slice_mut(&mut self, id: SliceId) -> Result<&mut Slice, CubeError> {
        self.slices[id.pair.index()]
            .get_mut(id.order)
            .ok_or(CubeError::UnknownSlice(id))
    }

    /// The cubits currently occupying a slice.
    pub fn slice_cubits(&self, id: SliceId) -> Result<Vec<CubitId>, CubeError> {
        let slice = self.slice(id)?;
        Ok(slice
            .members()
            .iter()
            .filter_map(|&index| self.cells[index])
            .collect())
    }

    /// The depth, column and row slices holding `cubit`, by its current coordinates.
    pub fn slices_containing(&self, cubit: CubitId) -> [SliceId; 3] {
        let coord = self.cubits[cubit.0].coord();
        AxisPair::ALL.map(|pair| SliceId::new(pair, pair.layer_of(coord) as usize))
    }

    /// The faces pointing along `axis`, laid out row-major by linear index.
    pub fn surface(&self, axis: Axis) -> CubeSurface {
        let faces = self
            .cells
            .iter()
            .flatten()
            .filter_map(|&id| self.cubits[id.0].face(axis))
            .collect();
        CubeSurface::new(axis, self.size, faces)
    }

    /// All six surfaces in [`SURFACE_ORDER`].
    pub fn surfaces(&self) -> [CubeSurface; 6] {
        SURFACE_ORDER.map(|axis| self.surface(axis))
    }

    /// Whether any slice is mid-turn.
    pub fn is_rotating(&self) -> bool {
        self.active.is_some()
    }

    /// The slice currently mid-turn, if any.
    pub fn active_slice(&self) -> Option<SliceId> {
        self.active
    }

    /// Starts turning `id`. Only one slice may turn at a time.
    pub fn begin_turn(&mut self, id: SliceId) -> Result<(), CubeError> {
        match self.active {
            Some(active) if active == id => return Ok(()),
            Some(active) => return Err(CubeError::TurnInProgress { active }),
            None => {}
        }
        self.slice_mut(id)?.begin();
        self.active = Some(id);
        self.set_displaced(id, true)?;
        Ok(())
    }

    /// Sets the turn angle in degrees, beginning the turn if needed.
    pub fn set_angle(&mut self, id: SliceId, degrees: f32) -> Result<(), CubeError> {
        self.begin_turn(id)?;
        self.slice_mut(id)?.set_angle(degrees);
        Ok(())
    }

    /// Snaps the turn to the nearest quarter and either commits or reverts it.
    pub fn commit_or_revert(&mut self, id: SliceId) -> Result<TurnOutcome, CubeError> {
        if self.slice(id)?.state() != SliceState::Active {
            return Err(CubeError::NotTurning(id));
        }

        let quarter_turns = self.slice_mut(id)?.snap();
        let outcome = if quarter_turns == 0 {
            debug!(slice = %id, "turn reverted");
            TurnOutcome::Reverted
        } else {
            self.reindex(id, quarter_turns)?;
            debug!(slice = %id, quarter_turns, "turn committed");
            self.events.push(CubeEvent::SliceUpdated {
                slice: id,
                quarter_turns,
            });
            TurnOutcome::Committed { quarter_turns }
        };

        self.set_displaced(id, false)?;
        self.slice_mut(id)?.reset();
        self.active = None;
        Ok(outcome)
    }

    /// Returns and clears the pending events.
    pub fn drain_events(&mut self) -> Vec<CubeEvent> {
        std::mem::take(&mut self.events)
    }

    fn set_displaced(&mut self, id: SliceId, displaced: bool) -> Result<(), CubeError> {
        for cubit in self.slice_cubits(id)? {
            self.cubits[cubit.0].set_displaced(displaced);
        }
        Ok(())
    }

    /// Moves every cubit of the slice to its rotated cell and re-keys its faces.
    fn reindex(&mut self, id: SliceId, quarter_turns: u8) -> Result<(), CubeError> {
        let moved = self.slice_cubits(id)?;

        // clear every old cell first so a cubit never overwrites one not yet moved
        for &cubit in &moved {
            let index = linearize(self.cubits[cubit.0].coord(), self.size);
            self.cells[index] = None;
        }

        for &cubit in &moved {
            let target = rotate_cell(id.pair, quarter_turns, self.cubits[cubit.0].coord(), self.size);
            let entry = &mut self.cubits[cubit.0];
            entry.set_coord(target);
            entry.rotate_faces(id.pair, quarter_turns);
            self.cells[linearize(target, self.size)] = Some(cubit);
        }

        Ok(())
    }
}

/// The sides of a cell that lie on the cube boundary.
fn boundary_sides((col, row, depth): Coord, size: usize) -> Vec<Axis> {
    let upper = size as i32 - 1;
    let mut sides = Vec::new();
    if col == 0 {
        sides.push(Axis::Left);
    }
    if col == upper {
        sides.push(Axis::Right);
    }
    if row == 0 {
        sides.push(Axis::Down);
    }
    if row == upper {
        sides.push(Axis::Up);
    }
    if depth == 0 {
        sides.push(Axis::Back);
    }
    if depth == upper {
        sides.push(Axis::Forward);
    }
    sides
}
