//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Turns puzzle input into the data every part works on.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Walls;
///
/// impl AocParser for Walls {
///     // One row per line, `true` for a wall.
///     type SharedData<'a> = Vec<Vec<bool>>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|line| {
///                 line.bytes()
///                     .map(|b| match b {
///                         b'#' => Ok(true),
///                         b'.' => Ok(false),
///                         _ => Err(ParseError::InvalidFormat(line.to_string())),
///                     })
///                     .collect()
///             })
///             .collect()
///     }
/// }
///
/// assert_eq!(Walls::parse("#.\n.#").unwrap(), vec![vec![true, false], vec![false, true]]);
/// assert!(Walls::parse("#?").is_err());
/// ```
pub trait AocParser {
    /// Parsed input, plus anything one part wants to leave for a later one.
    ///
    /// The lifetime lets the data borrow from the input text.
    type SharedData<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// Implement once per part; `#[derive(AocSolver)]` generates the
/// [`Solver`] impl that dispatches a runtime part number to these.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Corridor;
///
/// impl AocParser for Corridor {
///     type SharedData<'a> = &'a str;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.trim())
///     }
/// }
///
/// impl PartSolver<1> for Corridor {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         let start = shared.find('S').ok_or_else(|| SolveError::failed("no start"))?;
///         let end = shared.find('E').ok_or_else(|| SolveError::failed("no end"))?;
///         Ok(start.abs_diff(end).to_string())
///     }
/// }
///
/// let mut shared = Corridor::parse("S....E\n").unwrap();
/// assert_eq!(<Corridor as PartSolver<1>>::solve(&mut shared).unwrap(), "5");
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError)` - An error occurred while solving
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Runtime part dispatch.
///
/// Usually derived with `#[derive(AocSolver)]`; a hand-written `match`
/// works as well.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Tiles;
///
/// impl AocParser for Tiles {
///     type SharedData<'a> = Vec<u8>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         Ok(input.bytes().filter(|b| !b.is_ascii_whitespace()).collect())
///     }
/// }
///
/// impl Solver for Tiles {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         let wanted = match part {
///             1 => b'#',
///             2 => b'.',
///             _ => return Err(SolveError::PartNotImplemented(part)),
///         };
///         Ok(shared.iter().filter(|&&b| b == wanted).count().to_string())
///     }
/// }
///
/// let mut shared = Tiles::parse("#.#\n..#").unwrap();
/// assert_eq!(Tiles::solve_part(&mut shared, 1).unwrap(), "3");
/// assert_eq!(Tiles::solve_part(&mut shared, 2).unwrap(), "3");
/// ```
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - The part is not implemented
    /// * `Err(SolveError::SolveFailed)` - An error occurred while solving
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

/// Range-checked solving, available on every [`Solver`].
pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`], but rejects part `0` and parts above
    /// `PARTS` with [`SolveError::PartOutOfRange`] before dispatching.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
