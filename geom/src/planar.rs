use serde::{Deserialize, Serialize};

/// A position or displacement in a local planar frame, in centimeters. x points east, y points
/// north. Used both for per-node deltas and for running sums relative to a reference point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanarOffset {
    pub x: i64,
    pub y: i64,
}

impl PlanarOffset {
    pub const ZERO: PlanarOffset = PlanarOffset { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> PlanarOffset {
        PlanarOffset { x, y }
    }

    pub fn is_zero(self) -> bool {
        self == PlanarOffset::ZERO
    }

    /// None if either coordinate overflows.
    pub fn checked_add(self, other: PlanarOffset) -> Option<PlanarOffset> {
        Some(PlanarOffset::new(
            self.x.checked_add(other.x)?,
            self.y.checked_add(other.y)?,
        ))
    }
}
