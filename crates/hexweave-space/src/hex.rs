//! Hex lattice primitives: compass directions, relative angles, and axial
//! coordinates (pointy-top orientation).

use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Axial `(dq, dr)` unit offsets, indexed by [`Direction::ordinal`]:
/// NE, E, SE, SW, W, NW.
const HEX_OFFSETS: [(i32, i32); 6] = [
    (1, -1), // NE
    (1, 0),  // E
    (0, 1),  // SE
    (-1, 1), // SW
    (-1, 0), // W
    (0, -1), // NW
];

/// One of the six compass headings on the hex lattice.
///
/// Ordinals run clockwise starting from north-east, so rotating by an
/// [`Angle`] is addition modulo 6.
///
/// # Examples
///
/// ```
/// use hexweave_space::{Angle, Direction};
///
/// assert_eq!(Direction::East + Angle::Right, Direction::SouthEast);
/// assert_eq!(Direction::NorthEast + Angle::Left, Direction::NorthWest);
/// assert_eq!(Direction::West - Direction::East, Angle::Back);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Direction {
    /// Up and to the right.
    NorthEast = 0,
    /// Right.
    East = 1,
    /// Down and to the right.
    SouthEast = 2,
    /// Down and to the left.
    SouthWest = 3,
    /// Left.
    West = 4,
    /// Up and to the left.
    NorthWest = 5,
}

impl Direction {
    /// Every direction, in ordinal (clockwise) order.
    pub const ALL: [Direction; 6] = [
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Stable ordinal, `0..6`. This is the persisted form.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Inverse of [`ordinal`](Self::ordinal); `None` if out of range.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// The heading obtained by turning through `angle`.
    pub fn rotated_by(self, angle: Angle) -> Self {
        Self::ALL[(self.ordinal() as usize + angle.ordinal() as usize) % 6]
    }

    /// Axial offset of one unit step in this direction.
    pub fn offset(self) -> (i32, i32) {
        HEX_OFFSETS[self.ordinal() as usize]
    }
}

impl Add<Angle> for Direction {
    type Output = Direction;

    fn add(self, angle: Angle) -> Direction {
        self.rotated_by(angle)
    }
}

impl AddAssign<Angle> for Direction {
    fn add_assign(&mut self, angle: Angle) {
        *self = self.rotated_by(angle);
    }
}

/// `a - b` is the turn that takes heading `b` to heading `a`.
impl Sub for Direction {
    type Output = Angle;

    fn sub(self, rhs: Direction) -> Angle {
        Angle::ALL[(self.ordinal() as usize + 6 - rhs.ordinal() as usize) % 6]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NorthEast => "north_east",
            Self::East => "east",
            Self::SouthEast => "south_east",
            Self::SouthWest => "south_west",
            Self::West => "west",
            Self::NorthWest => "north_west",
        };
        f.write_str(name)
    }
}

/// A turn relative to the current heading.
///
/// Each angle has a one-character shorthand used in signatures: the
/// characters sit on a QWERTY keyboard around `s` in the direction of the
/// turn, with `w` straight ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Angle {
    /// Keep going straight (`w`).
    Forward = 0,
    /// Turn 60° clockwise (`e`).
    Right = 1,
    /// Turn 120° clockwise (`d`).
    RightBack = 2,
    /// Reverse (`s`). Never valid inside a drawn pattern.
    Back = 3,
    /// Turn 120° counter-clockwise (`a`).
    LeftBack = 4,
    /// Turn 60° counter-clockwise (`q`).
    Left = 5,
}

impl Angle {
    /// Every angle, in ordinal order.
    pub const ALL: [Angle; 6] = [
        Angle::Forward,
        Angle::Right,
        Angle::RightBack,
        Angle::Back,
        Angle::LeftBack,
        Angle::Left,
    ];

    /// Stable ordinal, `0..6`. This is the persisted form.
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Inverse of [`ordinal`](Self::ordinal); `None` if out of range.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// Signature character for this angle.
    pub const fn to_char(self) -> char {
        match self {
            Self::Forward => 'w',
            Self::Right => 'e',
            Self::RightBack => 'd',
            Self::Back => 's',
            Self::LeftBack => 'a',
            Self::Left => 'q',
        }
    }

    /// Parse a signature character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'w' => Some(Self::Forward),
            'e' => Some(Self::Right),
            'd' => Some(Self::RightBack),
            's' => Some(Self::Back),
            'a' => Some(Self::LeftBack),
            'q' => Some(Self::Left),
            _ => None,
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// An axial coordinate on the unbounded hex lattice.
///
/// Distance is cube distance: `max(|dq|, |dr|, |dq + dr|)`, which equals
/// the graph geodesic on the lattice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexCoord {
    /// Column axis.
    pub q: i32,
    /// Row axis.
    pub r: i32,
}

impl HexCoord {
    /// The lattice origin, where patterns start by default.
    pub const ORIGIN: HexCoord = HexCoord { q: 0, r: 0 };

    /// Construct from axial components.
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The neighbouring coordinate one unit step away in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dq, dr) = dir.offset();
        Self {
            q: self.q + dq,
            r: self.r + dr,
        }
    }

    /// All six neighbours, in [`Direction::ALL`] order.
    pub fn neighbours(self) -> [HexCoord; 6] {
        Direction::ALL.map(|d| self.step(d))
    }

    /// Cube distance to `other`.
    pub fn distance(self, other: HexCoord) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        let ds = dq + dr; // s = -q - r
        dq.unsigned_abs()
            .max(dr.unsigned_abs())
            .max(ds.unsigned_abs())
    }
}

impl Add<Direction> for HexCoord {
    type Output = HexCoord;

    fn add(self, dir: Direction) -> HexCoord {
        self.step(dir)
    }
}

impl AddAssign<Direction> for HexCoord {
    fn add_assign(&mut self, dir: Direction) {
        *self = self.step(dir);
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
