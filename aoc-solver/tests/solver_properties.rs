//! Property-based tests for part dispatch and part bounds

use aoc_solver::{
    AocParser, AocSolver, DynSolver, ParseError, PartSolver, SolveError, Solver, SolverExt,
    SolverInstance,
};
use proptest::prelude::*;

/// Parses comma separated integers; part 1 sums, part 2 takes the maximum.
#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct CsvSolver;

impl AocParser for CsvSolver {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        input
            .trim()
            .split(',')
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("bad int: {s}")))
            })
            .collect()
    }
}

impl PartSolver<1> for CsvSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for CsvSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .iter()
            .max()
            .map(i64::to_string)
            .ok_or_else(|| SolveError::failed("no numbers"))
    }
}

fn to_input(numbers: &[i64]) -> String {
    numbers
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Derived dispatch gives the same answer as calling the part impl directly.
    #[test]
    fn prop_dispatch_matches_part_solver(
        numbers in prop::collection::vec(-1000i64..1000, 1..20),
        part in 1u8..=2,
    ) {
        let input = to_input(&numbers);
        let mut via_solver = CsvSolver::parse(&input).unwrap();
        let mut direct = CsvSolver::parse(&input).unwrap();

        let dispatched = CsvSolver::solve_part(&mut via_solver, part).unwrap();
        let expected = match part {
            1 => <CsvSolver as PartSolver<1>>::solve(&mut direct),
            _ => <CsvSolver as PartSolver<2>>::solve(&mut direct),
        }.unwrap();

        prop_assert_eq!(dispatched, expected);
    }

    /// Parts outside 1..=PARTS are rejected: unchecked dispatch reports them as
    /// not implemented, the checked variant as out of range.
    #[test]
    fn prop_invalid_parts_rejected(part in prop_oneof![Just(0u8), 3u8..=255]) {
        let mut shared = CsvSolver::parse("1,2,3").unwrap();

        match CsvSolver::solve_part(&mut shared, part) {
            Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "expected PartNotImplemented, got {:?}", other),
        }
        match CsvSolver::solve_part_checked_range(&mut shared, part) {
            Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
            other => prop_assert!(false, "expected PartOutOfRange, got {:?}", other),
        }
    }

    /// The type-erased instance answers exactly like the static solver.
    #[test]
    fn prop_dyn_solver_matches_static(numbers in prop::collection::vec(0i64..100, 1..10)) {
        let input = to_input(&numbers);
        let mut instance: Box<dyn DynSolver + '_> =
            Box::new(SolverInstance::<CsvSolver>::new(2020, 5, &input).unwrap());

        let mut shared = CsvSolver::parse(&input).unwrap();
        for part in 1..=instance.parts() {
            let expected = CsvSolver::solve_part(&mut shared, part).unwrap();
            let result = instance.solve(part).unwrap();
            prop_assert_eq!(&result.answer, &expected);
            prop_assert!(result.duration() >= chrono::TimeDelta::zero());
        }
    }
}

#[test]
fn test_instance_metadata() {
    let instance = SolverInstance::<CsvSolver>::new(2020, 5, "4,5").unwrap();
    assert_eq!(instance.year(), 2020);
    assert_eq!(instance.day(), 5);
    assert_eq!(instance.parts(), 2);
    assert!(instance.parsed_at() <= chrono::Utc::now());
    assert!(instance.parse_duration() >= chrono::TimeDelta::zero());
}

#[test]
fn test_instance_parse_error() {
    let result = SolverInstance::<CsvSolver>::new(2020, 5, "4,x");
    assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
}

#[test]
fn test_failed_part_reports_source() {
    let mut shared = CsvSolver::parse("").unwrap();
    let err = CsvSolver::solve_part(&mut shared, 2).unwrap_err();
    assert_eq!(err.to_string(), "Solve failed: no numbers");
}
