//! Patterns: walks on the hex lattice and their signature encoding.

use std::collections::HashSet;
use std::fmt;

use smallvec::SmallVec;

use crate::edge::DirectedEdge;
use crate::error::{AppendRejection, MalformedCause, PatternError};
use crate::hex::{Angle, Direction, HexCoord};

/// A drawn gesture: a starting heading plus a sequence of turns.
///
/// The first stroke is drawn in [`start_direction`](Self::start_direction);
/// every [`Angle`] then turns the heading before the next stroke. A pattern
/// with `n` angles therefore has `n + 1` strokes and visits `n + 2`
/// vertices. The zero-angle pattern is a single stroke with signature `""`.
///
/// Two patterns *match* when their angle sequences are equal, whatever
/// their start directions; that comparison is [`signature`](Self::signature)
/// equality. `PartialEq` compares the start direction as well.
///
/// # Examples
///
/// ```
/// use hexweave_space::{Direction, Pattern};
///
/// let mut p = Pattern::new(Direction::East);
/// assert!(p.try_append(Direction::East));      // straight on: 'w'
/// assert!(p.try_append(Direction::SouthEast)); // right turn: 'e'
/// assert!(!p.try_append(Direction::NorthWest)); // straight back: rejected
/// assert_eq!(p.signature(), "we");
///
/// let q = Pattern::from_signature("we", Direction::NorthEast).unwrap();
/// assert_eq!(q.angles(), p.angles());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    start: Direction,
    angles: SmallVec<[Angle; 16]>,
}

impl Pattern {
    /// A zero-angle pattern: one stroke in `start`.
    pub fn new(start: Direction) -> Self {
        Self {
            start,
            angles: SmallVec::new(),
        }
    }

    /// Build a pattern from raw parts without checking that it could be
    /// drawn. Used by the storage codec, which must be the exact inverse
    /// of encoding; use [`from_signature`](Self::from_signature) or
    /// [`is_well_formed`](Self::is_well_formed) when validity matters.
    pub fn from_parts(start: Direction, angles: impl IntoIterator<Item = Angle>) -> Self {
        Self {
            start,
            angles: angles.into_iter().collect(),
        }
    }

    /// Heading of the first stroke.
    pub fn start_direction(&self) -> Direction {
        self.start
    }

    /// The turns, in drawing order.
    pub fn angles(&self) -> &[Angle] {
        &self.angles
    }

    /// Number of angles (one less than the number of strokes).
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// Whether the pattern has no angles.
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Heading of the last stroke.
    pub fn final_direction(&self) -> Direction {
        self.angles.iter().fold(self.start, |dir, &a| dir + a)
    }

    /// Every stroke, in drawing order, starting at the origin.
    pub fn strokes(&self) -> Vec<DirectedEdge> {
        let mut out = Vec::with_capacity(self.angles.len() + 1);
        let mut cursor = HexCoord::ORIGIN;
        let mut compass = self.start;
        out.push(DirectedEdge::new(cursor, compass));
        for &a in &self.angles {
            cursor += compass;
            compass += a;
            out.push(DirectedEdge::new(cursor, compass));
        }
        out
    }

    /// Every vertex visited when drawing from `start`, including both
    /// endpoints. The result has `len() + 2` entries.
    pub fn positions(&self, start: HexCoord) -> Vec<HexCoord> {
        let mut out = Vec::with_capacity(self.angles.len() + 2);
        out.push(start);
        let mut cursor = start;
        let mut compass = self.start;
        for &a in &self.angles {
            cursor += compass;
            out.push(cursor);
            compass += a;
        }
        out.push(cursor + compass);
        out
    }

    /// Both orientations of every stroke drawn so far.
    pub fn occupied_edges(&self) -> HashSet<DirectedEdge> {
        let strokes = self.strokes();
        let mut seen = HashSet::with_capacity(strokes.len() * 2);
        for edge in strokes {
            seen.insert(edge);
            seen.insert(edge.reversed());
        }
        seen
    }

    /// Check whether a stroke in `next` could be drawn from the current
    /// end of the pattern, returning the angle it would append.
    ///
    /// Each call retraces the whole pattern. Use a [`PatternTracer`] when
    /// appending many strokes in a row.
    pub fn check_append(&self, next: Direction) -> Result<Angle, AppendRejection> {
        PatternTracer::resume(self).check_append(next)
    }

    /// Extend the pattern by one stroke in `next`. Returns `false` and
    /// leaves the pattern unchanged if the stroke would reverse the
    /// previous one or redraw any existing segment.
    pub fn try_append(&mut self, next: Direction) -> bool {
        match self.check_append(next) {
            Ok(angle) => {
                self.angles.push(angle);
                true
            }
            Err(_) => false,
        }
    }

    /// Remove and return the last angle.
    pub fn pop(&mut self) -> Option<Angle> {
        self.angles.pop()
    }

    /// Whether the pattern could have been drawn stroke by stroke under
    /// the [`try_append`](Self::try_append) rules.
    pub fn is_well_formed(&self) -> bool {
        let mut tracer = PatternTracer::new(self.start);
        let mut compass = self.start;
        self.angles.iter().all(|&a| {
            compass += a;
            tracer.try_append(compass)
        })
    }

    /// The compact angle signature, one character per angle.
    pub fn signature(&self) -> String {
        self.angles.iter().map(|a| a.to_char()).collect()
    }

    /// Decode a signature drawn from `start`.
    ///
    /// Fails with [`PatternError::MalformedPattern`] on a character outside
    /// `wedsaq`, or when a decoded stroke would break a drawing rule (so
    /// `"s"` and `"qqqqqq"` are rejected even though they are spelled from
    /// the alphabet).
    pub fn from_signature(signature: &str, start: Direction) -> Result<Self, PatternError> {
        let malformed = |index, cause| PatternError::MalformedPattern {
            signature: signature.to_owned(),
            index,
            cause,
        };
        let mut tracer = PatternTracer::new(start);
        let mut compass = start;
        for (index, c) in signature.chars().enumerate() {
            let angle =
                Angle::from_char(c).ok_or_else(|| malformed(index, MalformedCause::UnknownCharacter(c)))?;
            compass += angle;
            tracer
                .append(compass)
                .map_err(|r| malformed(index, MalformedCause::Rejected(r)))?;
        }
        Ok(tracer.into_pattern())
    }
}

// ── Incremental drawing ─────────────────────────────────────────

/// A pattern being drawn one stroke at a time.
///
/// Keeps the current stroke and an index of occupied segments next to the
/// pattern, so each append or pop is checked without retracing the walk.
///
/// ```
/// use hexweave_space::{Direction, PatternTracer};
///
/// let mut t = PatternTracer::new(Direction::East);
/// assert!(t.try_append(Direction::SouthWest));
/// assert!(t.try_append(Direction::NorthWest));
/// assert!(!t.try_append(Direction::East)); // redraws the first stroke
/// assert_eq!(t.pattern().signature(), "dd");
/// ```
#[derive(Clone, Debug)]
pub struct PatternTracer {
    pattern: Pattern,
    head: DirectedEdge,
    trail: Vec<DirectedEdge>,
    occupied: HashSet<DirectedEdge>,
}

impl PatternTracer {
    /// Start drawing with a single stroke in `start`.
    pub fn new(start: Direction) -> Self {
        let head = DirectedEdge::new(HexCoord::ORIGIN, start);
        Self {
            pattern: Pattern::new(start),
            head,
            trail: Vec::new(),
            occupied: HashSet::from([head, head.reversed()]),
        }
    }

    /// Continue drawing from the end of `pattern`. The pattern is taken as
    /// is, without checking that it is well formed.
    pub fn resume(pattern: &Pattern) -> Self {
        let mut tracer = Self::new(pattern.start);
        for &a in &pattern.angles {
            let next = tracer.head.direction + a;
            tracer.push(a, next);
        }
        tracer
    }

    /// The pattern drawn so far.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Finish drawing.
    pub fn into_pattern(self) -> Pattern {
        self.pattern
    }

    /// Number of angles drawn.
    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    /// Whether no angles have been drawn.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Check a stroke in `next` without drawing it.
    pub fn check_append(&self, next: Direction) -> Result<Angle, AppendRejection> {
        let angle = next - self.head.direction;
        if angle == Angle::Back {
            return Err(AppendRejection::Backtrack);
        }
        if self.occupied.contains(&DirectedEdge::new(self.head.end(), next)) {
            return Err(AppendRejection::Retrace);
        }
        Ok(angle)
    }

    /// Draw a stroke in `next`, returning the appended angle.
    pub fn append(&mut self, next: Direction) -> Result<Angle, AppendRejection> {
        let angle = self.check_append(next)?;
        self.push(angle, next);
        Ok(angle)
    }

    /// Draw a stroke in `next` if the drawing rules allow it.
    pub fn try_append(&mut self, next: Direction) -> bool {
        self.append(next).is_ok()
    }

    /// Undo the last stroke, returning its angle.
    pub fn pop(&mut self) -> Option<Angle> {
        let prev = self.trail.pop()?;
        self.occupied.remove(&self.head);
        self.occupied.remove(&self.head.reversed());
        self.head = prev;
        self.pattern.angles.pop()
    }

    fn push(&mut self, angle: Angle, next: Direction) {
        let edge = DirectedEdge::new(self.head.end(), next);
        self.trail.push(self.head);
        self.head = edge;
        self.occupied.insert(edge);
        self.occupied.insert(edge.reversed());
        self.pattern.angles.push(angle);
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern[{}, {}]", self.start, self.signature())
    }
}
