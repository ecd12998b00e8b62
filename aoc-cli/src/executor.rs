//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, CliError, ExecutorError};
use crate::inputs::InputSource;
use aoc_solver::{DynSolver, SolveError, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single solver execution
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    /// Time spent parsing the input, absent when no input was parsed
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: SolverError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Work item representing a solver to execute
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    shared: SharedContext,
    thread_pool: rayon::ThreadPool,
}

/// Everything worker threads read while solving
struct SharedContext {
    registry: SolverRegistry,
    inputs: InputSource,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(
        registry: SolverRegistry,
        inputs: InputSource,
        config: &Config,
    ) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            shared: SharedContext {
                registry,
                inputs,
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    pub fn inputs(&self) -> &InputSource {
        &self.shared.inputs
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let ctx = &self.shared;
        filter_work_items(
            &ctx.registry,
            ctx.year_filter,
            ctx.day_filter,
            ctx.part_filter,
        )
    }

    /// Execute all work items and send results to channel
    pub fn execute(&self, tx: Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let work_items = self.collect_work_items();
        log::info!(
            "running {} solver(s), parallelized by {:?} on {} thread(s)",
            work_items.len(),
            self.shared.parallelize_by,
            self.thread_pool.current_num_threads()
        );

        match self.shared.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_work_item(&work, &tx, &self.shared) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part additionally fans out inside run_work_item
            ParallelizeBy::Day | ParallelizeBy::Part => {
                let singletons = work_items.into_iter().map(|w| vec![w]).collect();
                self.execute_parallel_grouped(singletons, &tx)
            }
        }
    }

    /// Run groups in parallel; items within a group run in order
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let shared = &self.shared;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_work_item(&work, tx, shared) {
                            err = Some(ArcExecutorError::combine_opt(err, e));
                        }
                    }
                    err
                })
                .reduce(|| None, ArcExecutorError::merge)
                .map_or(Ok(()), Err)
        })
    }
}

/// Work items the filters in `config` select from `registry`.
///
/// Fails when `--input` is given but more than one solver matches, so the
/// caller can reject the run before reading stdin or the override file.
pub fn select_work_items(
    registry: &SolverRegistry,
    config: &Config,
) -> Result<Vec<WorkItem>, CliError> {
    let items = filter_work_items(
        registry,
        config.year_filter,
        config.day_filter,
        config.part_filter,
    );
    if config.input_override.is_some() && items.len() > 1 {
        return Err(CliError::Config(format!(
            "--input needs exactly one selected solver, but {} match; narrow with --year/--day",
            items.len()
        )));
    }
    Ok(items)
}

fn filter_work_items(
    registry: &SolverRegistry,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
) -> Vec<WorkItem> {
    registry
        .storage()
        .iter_info()
        .filter(|info| year_filter.is_none_or(|y| info.year == y))
        .filter(|info| day_filter.is_none_or(|d| info.day == d))
        .map(|info| WorkItem {
            year: info.year,
            day: info.day,
            parts: filter_parts(part_filter, info.parts),
        })
        .filter(|w| !w.parts.is_empty())
        .collect()
}

/// Parts of a solver to run, given the `--part` filter and the solver's part count
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Load the input for one work item and solve its parts
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    shared: &SharedContext,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match shared.inputs.load(year, day) {
        Ok(input) => input,
        Err(source) => {
            let error = ExecutorError::InputUnavailable { year, day, source };
            log::warn!("{error}");
            let message = error.to_string();
            for part in work.parts.clone() {
                let missing = aoc_solver::ParseError::MissingData(message.clone());
                send(tx, SolverResult::failed(year, day, part, missing.into()))?;
            }
            return Ok(());
        }
    };

    if matches!(shared.parallelize_by, ParallelizeBy::Part) {
        solve_parts_parallel(work, &input, tx, &shared.registry)
    } else {
        solve_parts_sequential(work, &input, tx, &shared.registry)
    }
}

/// One parsed instance per part, each on its own rayon task
fn solve_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    work.parts
        .clone()
        .into_par_iter()
        .map(|part| {
            let result = match registry.create_solver(year, day, input) {
                Ok(mut solver) => solve_part(year, day, part, &mut *solver),
                Err(e) => SolverResult::failed(year, day, part, e),
            };
            send(tx, result).err()
        })
        .reduce(|| None, ArcExecutorError::merge)
        .map_or(Ok(()), Err)
}

/// A single parsed instance solving its parts in order
fn solve_parts_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    match registry.create_solver(year, day, input) {
        Ok(mut solver) => {
            for part in work.parts.clone() {
                send(tx, solve_part(year, day, part, &mut *solver))?;
            }
        }
        Err(e) => {
            for part in work.parts.clone() {
                send(tx, SolverResult::failed(year, day, part, duplicate(&e)))?;
            }
        }
    }
    Ok(())
}

/// Copy of an instance-creation error, reported once per part
fn duplicate(error: &SolverError) -> SolverError {
    match error {
        SolverError::ParseError(e) => SolverError::ParseError(e.clone()),
        SolverError::NotFound(year, day) => SolverError::NotFound(*year, *day),
        SolverError::InvalidYearDay(year, day) => SolverError::InvalidYearDay(*year, *day),
        // create_solver only parses, so this arm is not hit today
        SolverError::SolveError(e) => SolverError::SolveError(match e {
            SolveError::PartNotImplemented(part) => SolveError::PartNotImplemented(*part),
            SolveError::PartOutOfRange(part) => SolveError::PartOutOfRange(*part),
            SolveError::SolveFailed(source) => SolveError::failed(source.to_string()),
        }),
    }
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());

    match solver.solve(part) {
        Ok(result) => SolverResult {
            year,
            day,
            part,
            solve_duration: result.duration(),
            answer: Ok(result.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            year,
            day,
            part,
            answer: Err(e.into()),
            parse_duration,
            solve_duration: TimeDelta::zero(),
        },
    }
}
