//! Shared building blocks for grid puzzles.

pub mod direction;
pub mod grid;
pub mod point;
