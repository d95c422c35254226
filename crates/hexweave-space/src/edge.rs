//! Directed lattice edges: the strokes a pattern is made of.

use crate::hex::{Angle, Direction, HexCoord};

/// The unit segment leaving `origin` in `direction`.
///
/// The same physical segment can be traversed from either end, so every
/// edge has a [`reversed`](Self::reversed) twin. A pattern may contain at
/// most one of the two.
///
/// # Examples
///
/// ```
/// use hexweave_space::{DirectedEdge, Direction, HexCoord};
///
/// let e = DirectedEdge::new(HexCoord::ORIGIN, Direction::East);
/// let r = e.reversed();
/// assert_eq!(r.origin, HexCoord::new(1, 0));
/// assert_eq!(r.direction, Direction::West);
/// assert_eq!(r.reversed(), e);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DirectedEdge {
    /// Where the stroke begins.
    pub origin: HexCoord,
    /// Which way it points.
    pub direction: Direction,
}

impl DirectedEdge {
    /// The stroke from `origin` in `direction`.
    pub const fn new(origin: HexCoord, direction: Direction) -> Self {
        Self { origin, direction }
    }

    /// Where the stroke ends.
    pub fn end(self) -> HexCoord {
        self.origin + self.direction
    }

    /// The same segment walked from its far end.
    pub fn reversed(self) -> Self {
        Self {
            origin: self.end(),
            direction: self.direction + Angle::Back,
        }
    }
}
