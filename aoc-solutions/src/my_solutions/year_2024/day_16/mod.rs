//! Reindeer maze: cheapest route through a maze where turning costs a
//! thousand steps, and the tiles shared by all cheapest routes.

mod search;
mod seats;


pub use search::{
    Configuration, Cost, DistanceMap, START_FACING, STEP_COST, SearchMode, TURN_COST,
    shortest_distances,
};
pub use seats::mark_seats;

use crate::utils::grid::{Grid, GridParseError};
use crate::utils::point::Point;
use aoc_solver::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::fmt;
use thiserror::Error;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2024, day = 16, tags = ["grid", "dijkstra"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    /// On at least one cheapest path. Only written by [`mark_seats`].
    Seat,
}

impl Tile {
    fn from_byte(b: u8) -> Option<Tile> {
        match b {
            b'.' => Some(Tile::Empty),
            b'#' => Some(Tile::Wall),
            b'S' => Some(Tile::Start),
            b'E' => Some(Tile::End),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Wall => '#',
            Tile::Start => 'S',
            Tile::End => 'E',
            Tile::Seat => 'O',
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze has no '{0}' tile")]
    MissingTile(Tile),
    #[error("end tile cannot be reached from the start tile")]
    Unreachable,
}

/// A parsed maze with its start and end located.
#[derive(Debug, Clone)]
pub struct Maze {
    grid: Grid<Tile>,
    start: Point,
    end: Point,
}

impl Maze {
    /// Locate `S` and `E` (first occurrence of each) in `grid`.
    pub fn new(grid: Grid<Tile>) -> Result<Self, MazeError> {
        let start = grid
            .find(&Tile::Start)
            .ok_or(MazeError::MissingTile(Tile::Start))?;
        let end = grid
            .find(&Tile::End)
            .ok_or(MazeError::MissingTile(Tile::End))?;
        Ok(Self { grid, start, end })
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let grid = Grid::parse_with(input, Tile::from_byte)
            .map_err(|e: GridParseError| ParseError::InvalidFormat(e.to_string()))?;
        Maze::new(grid).map_err(|e| ParseError::MissingData(e.to_string()))
    }

    pub fn grid(&self) -> &Grid<Tile> {
        &self.grid
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// Cheapest cost from start to end, from a map produced by either mode.
    pub fn lowest_cost(&self, distances: &DistanceMap) -> Result<Cost, MazeError> {
        distances
            .lowest_cost_at(self.end)
            .ok_or(MazeError::Unreachable)
    }

    /// Copy of the grid with every tile on a cheapest path marked, and the
    /// number of such tiles.
    pub fn seating(&self, distances: &DistanceMap) -> Result<(Grid<Tile>, usize), MazeError> {
        let cost = self.lowest_cost(distances)?;
        let mut seating = self.grid.clone();
        let seats = mark_seats(&mut seating, distances, self.end, cost);
        Ok((seating, seats))
    }
}

#[derive(Debug)]
pub struct SharedData {
    maze: Maze,
    exhaustive: Option<DistanceMap>,
}

impl AocParser for Solver {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(SharedData {
            maze: Maze::parse(input)?,
            exhaustive: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let cost = match &shared.exhaustive {
            Some(distances) => shared.maze.lowest_cost(distances),
            None => {
                let distances = shortest_distances(&shared.maze, SearchMode::UntilEnd);
                shared.maze.lowest_cost(&distances)
            }
        }
        .map_err(SolveError::failed)?;

        Ok(cost.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let SharedData { maze, exhaustive } = shared;
        let distances =
            exhaustive.get_or_insert_with(|| shortest_distances(maze, SearchMode::Exhaustive));

        let (seating, seats) = maze.seating(distances).map_err(SolveError::failed)?;
        log::debug!("seating chart:\n{seating}");

        Ok(seats.to_string())
    }
}
