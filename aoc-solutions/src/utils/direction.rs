//! Compass directions as a composable bitmask.
//!
//! Each cardinal owns one bit, in clockwise order starting from `UP`, so a
//! rotation is a 4-bit rotate of the mask. Combining cardinals with `|`
//! describes a diagonal (`UP | LEFT`); combining opposites cancels out when
//! moving.

use crate::utils::point::{Point, Vector};
use std::fmt;
use std::ops::BitOr;

#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Direction(u8);

const MASK: u8 = 0b1111;

impl Direction {
    pub const UP: Direction = Direction(0b0001);
    pub const RIGHT: Direction = Direction(0b0010);
    pub const DOWN: Direction = Direction(0b0100);
    pub const LEFT: Direction = Direction(0b1000);

    /// The four cardinals in clockwise order.
    pub const CARDINALS: [Direction; 4] = [Self::UP, Self::RIGHT, Self::DOWN, Self::LEFT];

    pub const fn contains(self, other: Direction) -> bool {
        self.0 & other.0 == other.0
    }

    /// Unit displacement for this direction; components of composite
    /// directions are summed.
    pub fn offset(self) -> Vector {
        let mut v = Vector::ZERO;
        if self.contains(Self::UP) {
            v += Vector::new(0, -1);
        }
        if self.contains(Self::RIGHT) {
            v += Vector::new(1, 0);
        }
        if self.contains(Self::DOWN) {
            v += Vector::new(0, 1);
        }
        if self.contains(Self::LEFT) {
            v += Vector::new(-1, 0);
        }
        v
    }

    /// Move `steps` units from `p`. Negative `steps` moves backwards.
    pub fn move_point(self, p: Point, steps: isize) -> Point {
        p + self.offset() * steps
    }

    /// UP → RIGHT → DOWN → LEFT → UP.
    pub const fn rotate_clockwise(self) -> Direction {
        Direction(((self.0 << 1) | (self.0 >> 3)) & MASK)
    }

    pub const fn rotate_counter_clockwise(self) -> Direction {
        Direction(((self.0 >> 1) | (self.0 << 3)) & MASK)
    }

    /// The opposite direction: UP ↔ DOWN, LEFT ↔ RIGHT.
    pub const fn flip(self) -> Direction {
        Direction(((self.0 << 2) | (self.0 >> 2)) & MASK)
    }
}

impl BitOr for Direction {
    type Output = Direction;

    fn bitor(self, rhs: Direction) -> Direction {
        Direction(self.0 | rhs.0)
    }
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return f.write_str("NONE");
        }
        let names = [
            (Self::UP, "UP"),
            (Self::RIGHT, "RIGHT"),
            (Self::DOWN, "DOWN"),
            (Self::LEFT, "LEFT"),
        ];
        let mut first = true;
        for (dir, name) in names {
            if self.contains(dir) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairwise_composites() -> Vec<Direction> {
        let mut all = Vec::new();
        for (i, &a) in Direction::CARDINALS.iter().enumerate() {
            for &b in &Direction::CARDINALS[i + 1..] {
                all.push(a | b);
            }
        }
        all
    }

    #[test]
    fn test_rotate_clockwise_order() {
        let mut d = Direction::UP;
        for expected in [Direction::RIGHT, Direction::DOWN, Direction::LEFT, Direction::UP] {
            d = d.rotate_clockwise();
            assert_eq!(d, expected);
        }
    }

    #[test]
    fn test_rotate_counter_clockwise_order() {
        let mut d = Direction::UP;
        for expected in [Direction::LEFT, Direction::DOWN, Direction::RIGHT, Direction::UP] {
            d = d.rotate_counter_clockwise();
            assert_eq!(d, expected);
        }
    }

    #[test]
    fn test_rotate_composite() {
        let mut d = Direction::UP | Direction::LEFT;
        for expected in [
            Direction::UP | Direction::RIGHT,
            Direction::RIGHT | Direction::DOWN,
            Direction::DOWN | Direction::LEFT,
            Direction::LEFT | Direction::UP,
        ] {
            d = d.rotate_clockwise();
            assert_eq!(d, expected);
        }
    }

    #[test]
    fn test_four_rotations_and_two_flips_are_identity() {
        let all = Direction::CARDINALS.into_iter().chain(pairwise_composites());
        for d in all {
            let cw = (0..4).fold(d, |d, _| d.rotate_clockwise());
            let ccw = (0..4).fold(d, |d, _| d.rotate_counter_clockwise());
            assert_eq!(cw, d, "{d:?}");
            assert_eq!(ccw, d, "{d:?}");
            assert_eq!(d.flip().flip(), d, "{d:?}");
            assert_eq!(d.rotate_clockwise().rotate_counter_clockwise(), d, "{d:?}");
        }
    }

    #[test]
    fn test_flip_opposites() {
        assert_eq!(Direction::UP.flip(), Direction::DOWN);
        assert_eq!(Direction::DOWN.flip(), Direction::UP);
        assert_eq!(Direction::LEFT.flip(), Direction::RIGHT);
        assert_eq!(Direction::RIGHT.flip(), Direction::LEFT);
        assert_eq!(
            (Direction::UP | Direction::LEFT).flip(),
            Direction::DOWN | Direction::RIGHT
        );
        for d in Direction::CARDINALS {
            assert_eq!(d.flip(), d.rotate_clockwise().rotate_clockwise());
        }
    }

    #[test]
    fn test_move_point() {
        let origin = Point::new(5, 5);
        assert_eq!(Direction::UP.move_point(origin, 2), Point::new(5, 3));
        assert_eq!(Direction::RIGHT.move_point(origin, 1), Point::new(6, 5));
        assert_eq!(Direction::DOWN.move_point(origin, -1), Point::new(5, 4));
        assert_eq!(
            (Direction::UP | Direction::LEFT).move_point(origin, 3),
            Point::new(2, 2)
        );
        // Opposing bits cancel on their axis.
        assert_eq!(
            (Direction::UP | Direction::DOWN | Direction::RIGHT).move_point(origin, 4),
            Point::new(9, 5)
        );
    }

    #[test]
    fn test_debug_names() {
        assert_eq!(format!("{:?}", Direction::LEFT), "LEFT");
        assert_eq!(format!("{:?}", Direction::UP | Direction::RIGHT), "UP | RIGHT");
        assert_eq!(format!("{:?}", Direction::default()), "NONE");
    }
}
