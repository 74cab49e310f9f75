#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use helpers::run_talk_placement;
use helpers::write_cost_file;

#[test]
fn cost_file_instance_is_solved_to_optimality() {
    let costs = write_cost_file("optimal", "# two conflicting pairs\n0 1 10\n2 3 10\n");
    let path = costs.to_str().expect("utf-8 path");

    let run = run_talk_placement(&[
        "--tracks",
        "2",
        "--time-slots",
        "2",
        "--costs",
        path,
        "--timeout",
        "0",
    ]);
    std::fs::remove_file(&costs).expect("Failed to remove the cost file.");

    assert!(run.success, "{}", run.stdout);
    assert!(run.stdout.contains("Outcome: optimal"), "{}", run.stdout);
    assert!(run.stdout.contains("Total cost: 0"), "{}", run.stdout);
}

#[test]
fn statistics_are_printed_on_request() {
    let run = run_talk_placement(&[
        "--tracks",
        "2",
        "--time-slots",
        "2",
        "--seed",
        "3",
        "--log-statistics",
    ]);

    assert!(run.success, "{}", run.stdout);
    assert!(
        run.stdout.contains("%%%mzn-stat: numDecisions="),
        "{}",
        run.stdout
    );
    assert!(run.stdout.contains("%%%mzn-stat-end"), "{}", run.stdout);
}

#[test]
fn capped_search_reports_a_satisfiable_placement() {
    let run = run_talk_placement(&[
        "--tracks",
        "2",
        "--time-slots",
        "3",
        "--max-cost",
        "1000",
        "--timeout",
        "5",
    ]);

    assert!(run.success, "{}", run.stdout);
    assert!(run.stdout.contains("Outcome: satisfiable"), "{}", run.stdout);
}

#[test]
fn empty_instance_fails() {
    let run = run_talk_placement(&["--tracks", "0"]);

    assert!(!run.success);
    assert!(run.stdout.contains("Execution failed, error:"), "{}", run.stdout);
}

#[test]
fn oversized_instance_fails() {
    let run = run_talk_placement(&["--tracks", "18446744073709551615", "--time-slots", "2"]);

    assert!(!run.success);
    assert!(run.stdout.contains("Invalid configuration"), "{}", run.stdout);
}

#[test]
fn malformed_cost_file_fails() {
    let costs = write_cost_file("malformed", "0 1\n");
    let path = costs.to_str().expect("utf-8 path");

    let run = run_talk_placement(&["--tracks", "2", "--time-slots", "2", "--costs", path]);
    std::fs::remove_file(&costs).expect("Failed to remove the cost file.");

    assert!(!run.success);
    assert!(run.stdout.contains("line 1"), "{}", run.stdout);
}
