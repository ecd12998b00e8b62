//! Type-erased solver instances with timing

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{DateTime, TimeDelta, Utc};

/// Runs `f`, returning its output with the wall-clock start and elapsed time.
fn timed<T>(f: impl FnOnce() -> T) -> (T, DateTime<Utc>, TimeDelta) {
    let started = Utc::now();
    let value = f();
    (value, started, Utc::now() - started)
}

/// Answer to one part, with when and how long it was solved
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    /// When solving started (UTC)
    pub started: DateTime<Utc>,
    elapsed: TimeDelta,
}

impl SolveResult {
    pub fn duration(&self) -> TimeDelta {
        self.elapsed
    }
}

/// Parsed state for one year-day puzzle.
///
/// Parsing happens once, in [`SolverInstance::new`]; every later
/// [`DynSolver::solve`] call works on the same shared data, so a part may
/// reuse whatever an earlier part left behind.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parsed_at: DateTime<Utc>,
    parse_duration: TimeDelta,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parsed_at, parse_duration) = timed(|| S::parse(input));
        let shared = shared?;
        log::trace!("{year}/{day:02} parsed in {parse_duration}");

        Ok(Self {
            year,
            day,
            shared,
            parsed_at,
            parse_duration,
        })
    }
}

/// Object-safe view of a [`SolverInstance`], so instances of different
/// solver types can be created and driven through one registry.
///
/// # Example
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn run_all(solver: &mut dyn DynSolver) -> Result<(), Box<dyn std::error::Error>> {
///     println!("{}/{:02} parsed in {}", solver.year(), solver.day(), solver.parse_duration());
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("Part {}: {} ({})", part, result.answer, result.duration());
///     }
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve one part, rejecting part numbers outside `1..=parts()`
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    fn parts(&self) -> u8;

    /// When parsing started (UTC)
    fn parsed_at(&self) -> DateTime<Utc>;

    fn parse_duration(&self) -> TimeDelta;
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let (answer, started, elapsed) =
            timed(|| S::solve_part_checked_range(&mut self.shared, part));
        log::trace!(
            "{}/{:02} part {part} finished in {elapsed}",
            self.year,
            self.day
        );

        Ok(SolveResult {
            answer: answer?,
            started,
            elapsed,
        })
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }

    fn parsed_at(&self) -> DateTime<Utc> {
        self.parsed_at
    }

    fn parse_duration(&self) -> TimeDelta {
        self.parse_duration
    }
}
