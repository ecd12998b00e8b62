use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver, SolverExt};

#[derive(Debug, Clone)]
struct SharedData {
    numbers: Vec<i32>,
    sum: Option<i32>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 3)]
struct TestDependentSolver;

impl AocParser for TestDependentSolver {
    type SharedData<'a> = SharedData;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let numbers = input
            .lines()
            .map(|line| {
                line.trim()
                    .parse::<i32>()
                    .map_err(|_| ParseError::InvalidFormat("Expected integer".into()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SharedData { numbers, sum: None })
    }
}

// Part 1 stores its result for part 2
impl PartSolver<1> for TestDependentSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum = shared.numbers.iter().sum();
        shared.sum = Some(sum);
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for TestDependentSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum = shared.sum.ok_or_else(|| SolveError::failed("part 1 has not run"))?;
        Ok((sum * 2).to_string())
    }
}

impl PartSolver<3> for TestDependentSolver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.numbers.is_empty() {
            Err(SolveError::failed("Empty input"))
        } else {
            Ok(shared.numbers.iter().product::<i32>().to_string())
        }
    }
}

#[test]
fn test_parts_constant_matches_attribute() {
    assert_eq!(TestDependentSolver::PARTS, 3);
}

#[test]
fn test_part2_sees_part1_result() {
    let mut shared = TestDependentSolver::parse("1\n2\n3").unwrap();
    assert_eq!(TestDependentSolver::solve_part(&mut shared, 1).unwrap(), "6");
    assert_eq!(TestDependentSolver::solve_part(&mut shared, 2).unwrap(), "12");
}

#[test]
fn test_part2_without_part1_fails() {
    let mut shared = TestDependentSolver::parse("1\n2\n3").unwrap();
    let result = TestDependentSolver::solve_part(&mut shared, 2);
    assert!(matches!(result, Err(SolveError::SolveFailed(_))));
}

#[test]
fn test_error_from_part_solver_propagates() {
    let mut shared = TestDependentSolver::parse("").unwrap();
    let err = TestDependentSolver::solve_part(&mut shared, 3).unwrap_err();
    assert_eq!(err.to_string(), "Solve failed: Empty input");
}

#[test]
fn test_unknown_part_not_implemented() {
    let mut shared = TestDependentSolver::parse("1").unwrap();
    assert!(matches!(
        TestDependentSolver::solve_part(&mut shared, 4),
        Err(SolveError::PartNotImplemented(4))
    ));
    assert!(matches!(
        TestDependentSolver::solve_part_checked_range(&mut shared, 4),
        Err(SolveError::PartOutOfRange(4))
    ));
}
