//! Fixed-size 2-D grid stored row-major in a single `Vec`.
//!
//! Every accessor is bounds-checked and returns `None` for coordinates off
//! the grid, so neighbours of edge cells can be probed without special cases.

use crate::utils::point::Point;
use std::fmt;
use thiserror::Error;

/// Error produced by [`Grid::parse_with`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridParseError {
    /// A row's length differs from the first row
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The cell mapping rejected a byte
    #[error("unexpected character {found:?} at ({x}, {y})")]
    InvalidCell { x: usize, y: usize, found: char },
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid<E> {
    elements: Vec<E>,
    width: usize,
    height: usize,
}

impl<E: Default + Clone> Grid<E> {
    /// A `width` × `height` grid filled with `E::default()`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            elements: vec![E::default(); width * height],
            width,
            height,
        }
    }
}

impl<E> Grid<E> {
    /// Read a rectangular block of text, one grid row per line, mapping each
    /// byte through `cell`. Reading stops at the first empty line or at the
    /// end of `input`.
    ///
    /// ```
    /// use aoc_solutions::utils::grid::Grid;
    ///
    /// let grid =
    ///     Grid::parse_with("#.\n.#\n\nignored", |b| Some(u8::from(b == b'#'))).unwrap();
    /// assert_eq!((grid.width(), grid.height()), (2, 2));
    /// assert_eq!(grid.get(1, 1), Some(&1));
    /// ```
    pub fn parse_with<F>(input: &str, mut cell: F) -> Result<Self, GridParseError>
    where
        F: FnMut(u8) -> Option<E>,
    {
        let mut elements = Vec::new();
        let mut width = 0;
        let mut height = 0;

        for (y, line) in input.lines().take_while(|line| !line.is_empty()).enumerate() {
            let row = line.as_bytes();
            if y == 0 {
                width = row.len();
            } else if row.len() != width {
                return Err(GridParseError::Ragged {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }

            for (x, &byte) in row.iter().enumerate() {
                let element = cell(byte).ok_or_else(|| GridParseError::InvalidCell {
                    x,
                    y,
                    found: char::from(byte),
                })?;
                elements.push(element);
            }
            height += 1;
        }

        Ok(Self {
            elements,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: isize, y: isize) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    fn point_at(&self, index: usize) -> Point {
        Point::new((index % self.width) as isize, (index / self.width) as isize)
    }

    /// The cell at `(x, y)`, or `None` when off the grid.
    pub fn get(&self, x: isize, y: isize) -> Option<&E> {
        self.index(x, y).map(|i| &self.elements[i])
    }

    pub fn get_mut(&mut self, x: isize, y: isize) -> Option<&mut E> {
        self.index(x, y).map(|i| &mut self.elements[i])
    }

    pub fn get_point(&self, p: Point) -> Option<&E> {
        self.get(p.x, p.y)
    }

    pub fn get_point_mut(&mut self, p: Point) -> Option<&mut E> {
        self.get_mut(p.x, p.y)
    }

    /// Every position, top to bottom, left to right.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.elements.len()).map(|i| self.point_at(i))
    }
}

impl<E: PartialEq> Grid<E> {
    /// First position holding `value`, scanning top to bottom, left to right.
    pub fn find(&self, value: &E) -> Option<Point> {
        self.elements
            .iter()
            .position(|e| e == value)
            .map(|i| self.point_at(i))
    }

    /// All positions holding `value`, in the same order as [`Grid::find`].
    pub fn find_all<'a>(&'a self, value: &'a E) -> impl Iterator<Item = Point> + 'a {
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, e)| *e == value)
            .map(|(i, _)| self.point_at(i))
    }

    pub fn count(&self, value: &E) -> usize {
        self.elements.iter().filter(|e| *e == value).count()
    }
}

impl<E: fmt::Display> fmt::Display for Grid<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.elements.chunks(self.width.max(1)) {
            for e in row {
                write!(f, "{}", e)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<E: fmt::Debug> fmt::Debug for Grid<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
