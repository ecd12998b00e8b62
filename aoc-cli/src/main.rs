//! AOC CLI - Command-line interface for running Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::SolverRegistryBuilder;
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, select_work_items};
use inputs::InputSource;
use output::OutputFormatter;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_filter))
        .init();

    let registry = build_registry(&config.tags)?;
    log::debug!("{} solver(s) registered", registry.storage().len());

    let work_items = select_work_items(&registry, &config)?;
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let inputs = InputSource::from_config(&config)?;
    let executor =
        Executor::new(registry, inputs, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let missing: Vec<_> = work_items
        .iter()
        .filter(|w| !executor.inputs().contains(w.year, w.day))
        .collect();
    if !missing.is_empty() {
        eprintln!("Missing {} input file(s):", missing.len());
        for w in &missing {
            eprintln!("  - {}", executor.inputs().describe(w.year, w.day));
        }
    }

    run_executor(executor, config.quiet)
}

/// Run the executor and print results in order as they become available
fn run_executor(executor: Executor, quiet: bool) -> Result<(), CliError> {
    let work_items = executor.collect_work_items();
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys: Vec<ResultKey> = work_items.iter().flat_map(ResultKey::for_work).collect();

    let (tx, rx) = std::sync::mpsc::channel();

    let executor_handle = std::thread::spawn(move || executor.execute(tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    for key in aggregator.missing() {
        log::warn!(
            "no result received for {}/{:02} part {}",
            key.year,
            key.day,
            key.part
        );
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))?
        .map_err(CliError::Executor)?;

    formatter.print_summary(&results);

    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linked_solutions_are_registered() {
        let registry = build_registry(&[]).unwrap();
        assert!(registry.storage().contains(2024, 16));
    }

    #[test]
    fn test_tag_filter_requires_every_tag() {
        let tags = |list: &[&str]| list.iter().map(|t| t.to_string()).collect::<Vec<_>>();

        let registry = build_registry(&tags(&["grid", "dijkstra"])).unwrap();
        assert!(registry.storage().contains(2024, 16));

        let registry = build_registry(&tags(&["grid", "no-such-tag"])).unwrap();
        assert!(registry.storage().is_empty());
    }

    #[test]
    fn test_maze_solved_through_registry() {
        let registry = build_registry(&[]).unwrap();
        let mut solver = registry
            .create_solver(2024, 16, "#####\n#S.E#\n#####\n")
            .unwrap();
        assert_eq!(solver.solve(1).unwrap().answer, "2");
        assert_eq!(solver.solve(2).unwrap().answer, "3");
    }
}
