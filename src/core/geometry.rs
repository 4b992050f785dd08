//! Board geometry: positions, directions and tile rotations.
//!
//! The board is an unbounded square grid. `x` grows to the east and `y`
//! grows to the south, so the northern neighbour of `(x, y)` is `(x, y - 1)`.

use serde::{Deserialize, Serialize};

/// One of the four sides of a square tile, in clockwise order from north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    E,
    S,
    W,
}

impl Direction {
    /// All directions in clockwise order.
    pub const ALL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    /// Number of directions.
    pub const COUNT: usize = 4;

    /// Position of this direction in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The direction obtained by applying `rotation` clockwise.
    #[must_use]
    pub const fn rotated(self, rotation: Rotation) -> Direction {
        Direction::ALL[(self.index() + rotation.quarter_turns_cw()) % Self::COUNT]
    }

    /// The facing direction.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        self.rotated(Rotation::HalfTurn)
    }
}

/// Clockwise rotation of a tile, in quarter turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    Right,
    HalfTurn,
    Left,
}

impl Rotation {
    /// All rotations, ordered by their number of quarter turns.
    pub const ALL: [Rotation; 4] = [Rotation::None, Rotation::Right, Rotation::HalfTurn, Rotation::Left];

    /// Number of rotations.
    pub const COUNT: usize = 4;

    /// Ordinal of this rotation (0..4), used by the action codes.
    #[must_use]
    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    /// Rotation with the given ordinal, taken modulo 4.
    #[must_use]
    pub const fn from_ordinal(ordinal: u32) -> Rotation {
        Rotation::ALL[(ordinal % 4) as usize]
    }

    /// Number of clockwise quarter turns.
    #[must_use]
    pub const fn quarter_turns_cw(self) -> usize {
        self as usize
    }

    /// Angle in degrees, clockwise.
    #[must_use]
    pub const fn degrees_cw(self) -> u32 {
        self.ordinal() * 90
    }

    /// Sum of two rotations.
    #[must_use]
    pub const fn add(self, other: Rotation) -> Rotation {
        Rotation::ALL[(self.quarter_turns_cw() + other.quarter_turns_cw()) % Self::COUNT]
    }

    /// The rotation that undoes this one.
    #[must_use]
    pub const fn negated(self) -> Rotation {
        Rotation::ALL[(Self::COUNT - self.quarter_turns_cw()) % Self::COUNT]
    }
}

/// A cell of the board grid.
///
/// Positions order by `x` first, then `y`; the action codes rely on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    /// Where the starting tile goes.
    pub const ORIGIN: Pos = Pos { x: 0, y: 0 };

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Pos {
        Pos::new(self.x + dx, self.y + dy)
    }

    /// The adjacent cell in the given direction.
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Pos {
        match direction {
            Direction::N => self.translated(0, -1),
            Direction::E => self.translated(1, 0),
            Direction::S => self.translated(0, 1),
            Direction::W => self.translated(-1, 0),
        }
    }

    /// Iterate over the four adjacent cells with their direction.
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, Pos)> {
        Direction::ALL.into_iter().map(move |d| (d, self.neighbor(d)))
    }

    /// True if `other` lies in the 3x3 block centred on this position.
    #[must_use]
    pub fn is_within_one_of(self, other: Pos) -> bool {
        (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_rotation() {
        assert_eq!(Direction::N.rotated(Rotation::Right), Direction::E);
        assert_eq!(Direction::W.rotated(Rotation::Right), Direction::N);
        assert_eq!(Direction::E.rotated(Rotation::Left), Direction::N);
        assert_eq!(Direction::S.opposite(), Direction::N);
        assert_eq!(Direction::E.opposite(), Direction::W);
    }

    #[test]
    fn test_rotation_arithmetic() {
        assert_eq!(Rotation::Right.add(Rotation::HalfTurn), Rotation::Left);
        assert_eq!(Rotation::Left.add(Rotation::Right), Rotation::None);
        assert_eq!(Rotation::Right.negated(), Rotation::Left);
        assert_eq!(Rotation::None.negated(), Rotation::None);
        assert_eq!(Rotation::HalfTurn.degrees_cw(), 180);
        assert_eq!(Rotation::from_ordinal(3), Rotation::Left);
    }

    #[test]
    fn test_pos_neighbors() {
        let pos = Pos::new(2, -3);
        assert_eq!(pos.neighbor(Direction::N), Pos::new(2, -4));
        assert_eq!(pos.neighbor(Direction::E), Pos::new(3, -3));
        assert_eq!(pos.neighbor(Direction::S), Pos::new(2, -2));
        assert_eq!(pos.neighbor(Direction::W), Pos::new(1, -3));
        assert_eq!(pos.neighbors().count(), 4);
    }

    #[test]
    fn test_pos_order_is_x_then_y() {
        let mut positions = vec![Pos::new(1, 0), Pos::new(0, 1), Pos::new(0, -1), Pos::new(-1, 0)];
        positions.sort();
        assert_eq!(
            positions,
            vec![Pos::new(-1, 0), Pos::new(0, -1), Pos::new(0, 1), Pos::new(1, 0)]
        );
    }

    #[test]
    fn test_within_one() {
        assert!(Pos::ORIGIN.is_within_one_of(Pos::new(1, -1)));
        assert!(!Pos::ORIGIN.is_within_one_of(Pos::new(2, 0)));
    }
}
