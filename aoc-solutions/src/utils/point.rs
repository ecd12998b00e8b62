//! Integer positions and displacements on a 2-D plane.
//!
//! Coordinates are signed so that a position one step off the edge of a grid
//! is still representable; the grid decides whether it exists.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A position. `y` grows downwards, matching row order of text input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: isize,
    pub y: isize,
}

/// A displacement between two [`Point`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Vector {
    pub dx: isize,
    pub dy: isize,
}

impl Point {
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }
}

impl Vector {
    pub const ZERO: Vector = Vector::new(0, 0);

    pub const fn new(dx: isize, dy: isize) -> Self {
        Self { dx, dy }
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Point) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, rhs: Vector) -> Point {
        self + -rhs
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        *self = *self + rhs;
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.dx, -self.dy)
    }
}

impl Mul<isize> for Vector {
    type Output = Vector;

    fn mul(self, scale: isize) -> Vector {
        Vector::new(self.dx * scale, self.dy * scale)
    }
}
