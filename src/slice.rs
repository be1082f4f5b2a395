//! Rotatable layers and their turn state machine.
//!
//! A turn goes `Idle -> Active -> Committing -> Idle`. While active the angle
//! moves freely; on release it snaps to the nearest quarter turn. A snapped
//! angle of zero reverts the turn without touching the cube.

use std::fmt;

use crate::geometry::AxisPair;

/// Angles with a smaller magnitude count as no rotation at all.
const ANGLE_EPSILON: f32 = 1e-4;

/// Identifies a slice by axis-pair and layer order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SliceId {
    pub pair: AxisPair,
    pub order: usize,
}

impl SliceId {
    pub const fn new(pair: AxisPair, order: usize) -> Self {
        Self { pair, order }
    }
}

impl fmt::Display for SliceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} #{}", self.pair, self.order)
    }
}

/// Turn state of a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliceState {
    #[default]
    Idle,
    Active,
    Committing,
}

/// Result of finalizing a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The angle snapped to zero; nothing changed.
    Reverted,
    /// The cube was re-indexed by this many positive quarter turns (1..=3).
    Committed { quarter_turns: u8 },
}

/// One layer of cells along an axis-pair.
///
/// Members are linear cell positions, fixed at build time. The cubits sitting
/// at those positions change as the cube is turned, but a turn always maps the
/// layer onto itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    id: SliceId,
    members: Vec<usize>,
    state: SliceState,
    angle: f32,
}

impl Slice {
    pub(crate) fn new(id: SliceId, members: Vec<usize>) -> Self {
        Self {
            id,
            members,
            state: SliceState::Idle,
            angle: 0.0,
        }
    }

    pub fn id(&self) -> SliceId {
        self.id
    }

    /// Linear positions of the populated cells in this layer.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn state(&self) -> SliceState {
        self.state
    }

    /// Current rotation in degrees about the pair's positive axis.
    pub fn rotation(&self) -> f32 {
        if self.angle.abs() > ANGLE_EPSILON {
            self.angle
        } else {
            0.0
        }
    }

    pub(crate) fn begin(&mut self) {
        if self.state == SliceState::Idle {
            self.state = SliceState::Active;
        }
    }

    pub(crate) fn set_angle(&mut self, degrees: f32) {
        self.begin();
        self.angle = degrees;
    }

    /// Snaps the angle and enters `Committing`.
    ///
    /// Returns the net number of positive quarter turns (0..4).
    pub(crate) fn snap(&mut self) -> u8 {
        self.state = SliceState::Committing;
        snapped_quarter_turns(self.rotation())
    }

    /// Absorbs the rotation and returns to `Idle`.
    pub(crate) fn reset(&mut self) {
        self.angle = 0.0;
        self.state = SliceState::Idle;
    }
}

/// Rounds `degrees` to the nearest quarter turn and reduces it mod 4.
pub fn snapped_quarter_turns(degrees: f32) -> u8 {
    let quarters = (degrees / 90.0).round() as i64;
    quarters.rem_euclid(4) as u8
}
