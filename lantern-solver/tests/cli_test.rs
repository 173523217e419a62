#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use helpers::run_lantern;
use helpers::solution_lines;

#[test]
fn unrestricted_domains_are_printed_unpruned() {
    let output = run_lantern(["--regex", "0*1*", "--length", "3"]);

    assert!(output.status.success());
    assert_eq!(
        vec!["x[0] = {0, 1}", "x[1] = {0, 1}", "x[2] = {0, 1}"],
        solution_lines(&output)
    );
}

#[test]
fn given_domains_are_propagated() {
    let output = run_lantern(["--regex", "0*1*", "--length", "3", "--domain", "1=1"]);

    assert!(output.status.success());
    assert_eq!(
        vec!["x[0] = {0, 1}", "x[1] = {1}", "x[2] = {1}"],
        solution_lines(&output)
    );
}

#[test]
fn both_filterings_print_the_same_domains() {
    let args = ["--regex", "(0[12]|1)*", "--length", "4", "--domain", "3=0,2"];

    let incremental = run_lantern(args.into_iter().chain(["--filtering", "incremental"]));
    let from_scratch = run_lantern(args.into_iter().chain(["--filtering", "from-scratch"]));

    assert!(incremental.status.success());
    assert!(from_scratch.status.success());
    assert_eq!(solution_lines(&incremental), solution_lines(&from_scratch));
    assert_eq!(
        vec!["x[0] = {0, 1}", "x[1] = {1, 2}", "x[2] = {0}", "x[3] = {2}"],
        solution_lines(&incremental)
    );
}

#[test]
fn a_sequence_without_accepted_words_is_infeasible() {
    let output = run_lantern([
        "--regex", "0*1*", "--length", "3", "--domain", "2=0", "--domain", "0=1",
    ]);

    assert!(output.status.success());
    assert_eq!(vec!["INFEASIBLE"], solution_lines(&output));
}

#[test]
fn an_empty_alphabet_only_accepts_the_empty_sequence() {
    let output = run_lantern(["--regex", "", "--length", "1"]);
    assert!(output.status.success());
    assert_eq!(vec!["INFEASIBLE"], solution_lines(&output));

    let output = run_lantern(["--regex", "", "--length", "0"]);
    assert!(output.status.success());
    assert!(solution_lines(&output).is_empty());
}

#[test]
fn a_domain_beyond_the_sequence_is_rejected() {
    let output = run_lantern(["--regex", "0*1*", "--length", "3", "--domain", "3=0"]);

    assert!(!output.status.success());
    assert!(solution_lines(&output).is_empty());
}

#[test]
fn a_malformed_domain_is_rejected() {
    let output = run_lantern(["--regex", "0*1*", "--length", "3", "--domain", "one=0"]);

    assert!(!output.status.success());
}

#[test]
fn a_malformed_expression_is_rejected() {
    let output = run_lantern(["--regex", "(01", "--length", "3"]);

    assert!(!output.status.success());
}
