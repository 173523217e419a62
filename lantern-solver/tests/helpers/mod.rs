//! Shared helpers for the integration tests of the solver.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use itertools::Itertools;
use lantern_solver::automaton::Automaton;
use lantern_solver::variables::DomainId;
use lantern_solver::Solver;
use log::LevelFilter;
use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

/// Routes the solver logs through the test harness; repeated calls are ignored.
pub(crate) fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(LevelFilter::Trace)
        .try_init();
}

/// Every word of length `domains.len()` accepted by `automaton` which only uses values from the
/// given domains. The sequence must not be empty.
pub(crate) fn accepted_words(automaton: &Automaton, domains: &[Vec<i32>]) -> Vec<Vec<i32>> {
    assert!(!domains.is_empty(), "enumerating the empty sequence");

    domains
        .iter()
        .map(|domain| domain.iter().copied())
        .multi_cartesian_product()
        .filter(|word| automaton.run(word.iter().copied()))
        .collect()
}

/// The values at `position` which occur in at least one of the words, in increasing order.
pub(crate) fn supported_values(words: &[Vec<i32>], position: usize) -> Vec<i32> {
    words
        .iter()
        .map(|word| word[position])
        .sorted()
        .dedup()
        .collect()
}

/// The current domains of the variables.
pub(crate) fn domains_of(solver: &Solver, variables: &[DomainId]) -> Vec<Vec<i32>> {
    variables
        .iter()
        .map(|&variable| solver.domain(variable))
        .collect()
}

/// A deterministic family of domains over `0..=max_value`: the `seed` selects, per position, a
/// non-empty subset of the values.
pub(crate) fn pseudo_random_domains(length: usize, max_value: i32, seed: u64) -> Vec<Vec<i32>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let num_subsets = 1_u64 << (max_value + 1);

    (0..length)
        .map(|_| {
            let subset = rng.gen_range(1..num_subsets);

            (0..=max_value)
                .filter(|&value| subset & (1 << value) != 0)
                .collect()
        })
        .collect()
}

/// Runs the `lantern` binary with the given arguments and waits for it to finish.
pub(crate) fn run_lantern<'a>(args: impl IntoIterator<Item = &'a str>) -> Output {
    let lantern = PathBuf::from(env!("CARGO_BIN_EXE_lantern"));

    let mut command = Command::new(lantern);
    for arg in args {
        let _ = command.arg(arg);
    }

    command.output().expect("failed to run lantern")
}

/// The lines which `lantern` wrote to stdout, without the `%`-prefixed log messages.
pub(crate) fn solution_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.starts_with('%'))
        .map(str::to_owned)
        .collect()
}
